//! Injected tracing dispatch.
//!
//! Components that emit events hold a [`Telemetry`] handle instead of
//! relying on a process-wide subscriber. Events raised inside
//! [`Telemetry::scope`] go to the handle's dispatcher only.

use std::fmt;

use tracing::Dispatch;
use tracing::dispatcher;

/// Handle to the dispatcher a component logs through.
#[derive(Clone)]
pub struct Telemetry {
    dispatch: Dispatch,
}

impl Telemetry {
    /// Wrap an existing dispatcher.
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// Build from a subscriber.
    pub fn from_subscriber<S>(subscriber: S) -> Self
    where
        S: tracing::Subscriber + Send + Sync + 'static,
    {
        Self::new(Dispatch::new(subscriber))
    }

    /// A handle that drops every event.
    pub fn silent() -> Self {
        Self::new(Dispatch::none())
    }

    /// The dispatcher active on the calling thread.
    pub fn current() -> Self {
        dispatcher::get_default(|d| Self::new(d.clone()))
    }

    /// Run `f` with this handle's dispatcher as the thread default.
    pub fn scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, f)
    }

    /// The wrapped dispatcher.
    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Debug for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telemetry").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_scope_routes_events_to_injected_subscriber() {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let telemetry = Telemetry::from_subscriber(subscriber);

        telemetry.scope(|| tracing::info!("inside scope"));
        tracing::info!("outside scope");

        let logged = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("inside scope"));
        assert!(!logged.contains("outside scope"));
    }

    #[test]
    fn test_silent_returns_value() {
        let value = Telemetry::silent().scope(|| 42);
        assert_eq!(value, 42);
    }
}
