//! CLI command implementations.

pub mod backends;
pub mod challenge;
pub mod classical;
pub mod common;
pub mod draw;
pub mod run;
pub mod statevector;
pub mod version;
