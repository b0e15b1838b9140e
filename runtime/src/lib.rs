//! # Async Lifecycle Runtime
//!
//! Runtime implementation for tracking asynchronous operations.
//!
//! This crate provides the tracker that coordinates reducer execution,
//! continuation effects, and the liveness guard of the owning scope.
//!
//! ## Core Components
//!
//! - **AsyncTracker**: The handle a rendering layer holds: `run`,
//!   `set_data`, `set_error`, `reset`, derived flags, state subscriptions
//! - **Scope / ScopeGuard**: Attach/detach lifecycle; late settlements after
//!   detach are discarded without any side effect
//! - **Profiler / ProfileQueue**: Commit timings queued in an owned buffer
//!   and flushed to an injected sink
//!
//! ## Example
//!
//! ```ignore
//! use async_lifecycle_runtime::AsyncTracker;
//!
//! let tracker = AsyncTracker::<Book, ClientError>::new();
//! let scope = tracker.attach()?;
//!
//! let handle = tracker.run(client.book(book_id));
//! assert!(tracker.is_loading());
//!
//! // Unmounting before the book arrives drops the settlement silently
//! drop(scope);
//! let _ = handle.await;
//! assert!(tracker.is_loading());
//! ```

/// Tracker configuration
pub mod config;

/// Metric descriptions
pub mod metrics;

/// Commit profiling and the flushable profile queue
pub mod profiler;

/// Owning-scope liveness
pub mod scope;

/// The tracker runtime
pub mod tracker;

pub use async_lifecycle_core::TrackerError;
pub use config::TrackerConfig;
pub use profiler::{
    ProfileError, ProfilePhase, ProfileQueue, ProfileRecord, ProfileSink, Profiler,
    ProfilerConfig, spawn_flush_loop,
};
pub use scope::{Scope, ScopeGuard, ScopePhase};
pub use tracker::{AsyncTracker, RunHandle, RunOutcome};
