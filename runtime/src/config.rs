//! Tracker configuration.

use crate::profiler::Profiler;

/// Configuration for [`AsyncTracker`](crate::AsyncTracker) instances
///
/// # Example
///
/// ```ignore
/// let config = TrackerConfig::default()
///     .with_label("book-search")
///     .with_profiler(profiler);
///
/// let tracker = AsyncTracker::with_config(AsyncStateOverrides::new(), config);
/// ```
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Name used in spans, logs and interaction ids
    pub label: String,
    /// Profiler receiving mount and commit records
    pub profiler: Option<Profiler>,
}

impl TrackerConfig {
    /// Create a configuration with the given label and no profiler
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            profiler: None,
        }
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Report commits to `profiler`
    #[must_use]
    pub fn with_profiler(mut self, profiler: Profiler) -> Self {
        self.profiler = Some(profiler);
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new("async")
    }
}
