//! # Async Lifecycle Testing
//!
//! Testing utilities and helpers for async lifecycle trackers.
//!
//! This crate provides:
//! - [`deferred`]: an operation you settle by hand, to observe the pending
//!   state before settlement
//! - [`AsyncReducerTest`]: Given-When-Then harness for the reducer
//! - [`DiagnosticCapture`]: counts warning and error events, to assert that
//!   a discarded settlement stays silent
//! - [`RecordingSink`]: a profile sink that keeps every batch
//! - [`FixedClock`] / [`test_clock`]: deterministic time
//!
//! ## Example
//!
//! ```ignore
//! use async_lifecycle_testing::deferred;
//!
//! #[tokio::test]
//! async fn test_pending_then_resolved() {
//!     let tracker = AsyncTracker::<String, String>::new();
//!     let _scope = tracker.attach().unwrap();
//!     let (operation, resolver) = deferred();
//!
//!     let handle = tracker.run(operation);
//!     assert!(tracker.is_loading());
//!
//!     resolver.resolve("done".to_string());
//!     handle.await.unwrap().unwrap();
//!     assert!(tracker.is_success());
//! }
//! ```

use async_lifecycle_core::environment::Clock;
use chrono::{DateTime, Utc};

/// Hand-settled operations
pub mod deferred;

/// Tracing layer counting diagnostics
pub mod diagnostics;


/// Recording profile sink
pub mod sink;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use async_lifecycle_testing::mocks::FixedClock;
    /// use async_lifecycle_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use deferred::{Resolver, deferred};
pub use diagnostics::{DiagnosticCapture, capture_diagnostics};
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::AsyncReducerTest;
pub use sink::RecordingSink;
