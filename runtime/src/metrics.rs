//! Metric names and descriptions.
//!
//! Counters are recorded through the `metrics` facade and are no-ops until
//! the host installs a recorder. Call [`register_metrics`] once after
//! installing one so exporters carry descriptions.

use metrics::describe_counter;

// Re-export metrics macros for use in other modules
pub use metrics::counter;

/// Register descriptions for every metric this crate records
pub fn register_metrics() {
    describe_counter!(
        "async_tracker.runs.total",
        "Total operations started through run"
    );
    describe_counter!(
        "async_tracker.settlements",
        "Settlements written to state, labelled by outcome"
    );
    describe_counter!(
        "async_tracker.invalid_operations",
        "Calls to try_run without an operation"
    );
    describe_counter!("profiler.records.queued", "Profile records queued");
    describe_counter!(
        "profiler.records.dropped",
        "Profile records dropped because the queue was full"
    );
    describe_counter!("profiler.flush.failures", "Profile flushes rejected by the sink");
}
