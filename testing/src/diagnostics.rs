//! Counting tracing events emitted while a test runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Tracing layer counting events by severity
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticCapture {
    events: Arc<AtomicUsize>,
    warnings_and_errors: Arc<AtomicUsize>,
}

impl DiagnosticCapture {
    /// Create an empty capture
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events seen at any level
    #[must_use]
    pub fn events(&self) -> usize {
        self.events.load(Ordering::SeqCst)
    }

    /// Events seen at `WARN` or `ERROR`
    #[must_use]
    pub fn warnings_and_errors(&self) -> usize {
        self.warnings_and_errors.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for DiagnosticCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.events.fetch_add(1, Ordering::SeqCst);
        if *event.metadata().level() <= Level::WARN {
            self.warnings_and_errors.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Install a capture as this thread's default subscriber
///
/// The capture sees events until the guard is dropped. Tokio's
/// current-thread test runtime polls spawned tasks on the same thread, so
/// events from spawned continuations are counted too.
#[must_use]
pub fn capture_diagnostics() -> (DiagnosticCapture, DefaultGuard) {
    let capture = DiagnosticCapture::new();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
