//! Error types for the application layer.

use qlab_hal::HalError;
use qlab_ir::IrError;
use thiserror::Error;

/// Errors surfaced by the controller and its collaborators.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// Rejected input such as a qubit count outside the allowed range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A gate or measurement addressed a qubit outside the register.
    #[error(transparent)]
    Index(IrError),

    /// Operation needs a circuit but none exists.
    #[error("Invalid state: {0}")]
    State(String),

    /// The execution engine failed or refused the request.
    #[error("Backend error: {0}")]
    Backend(#[from] HalError),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Challenge lookup or verification failed.
    #[error("Challenge error: {0}")]
    Challenge(String),
}

impl From<IrError> for AppError {
    fn from(err: IrError) -> Self {
        match err {
            IrError::InvalidQubitCount { .. } | IrError::UnknownGate(_) => {
                AppError::Validation(err.to_string())
            }
            other => AppError::Index(other),
        }
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
