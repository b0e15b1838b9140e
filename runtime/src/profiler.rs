//! Commit profiling with an owned, explicitly flushed queue.
//!
//! A [`Profiler`] turns committed state writes into [`ProfileRecord`]s and
//! pushes them onto a [`ProfileQueue`]. Nothing is sent until the queue is
//! flushed into a [`ProfileSink`], either directly with
//! [`ProfileQueue::flush`] or periodically with [`spawn_flush_loop`] driven
//! by an interval the caller supplies.
//!
//! # Example
//!
//! ```ignore
//! let config = ProfilerConfig::default();
//! let queue = ProfileQueue::with_config(&config);
//! let profiler = Profiler::new("book-search", queue.clone(), Arc::new(SystemClock));
//!
//! let flush = spawn_flush_loop(queue, Arc::new(my_sink), tokio::time::interval(config.flush_interval));
//! ```

use async_lifecycle_core::environment::Clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Interval;

/// Errors from profile delivery
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// The sink rejected or failed to deliver a batch
    #[error("Profile sink failed: {0}")]
    Sink(String),
}

/// Which kind of commit a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfilePhase {
    /// The owning scope was attached
    Mount,
    /// A state write was committed
    Update,
}

/// One profiled commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Profiler id
    pub id: String,
    /// Commit kind
    pub phase: ProfilePhase,
    /// Time spent applying the commit
    pub actual_duration: Duration,
    /// When the work leading to the commit began
    pub start_time: DateTime<Utc>,
    /// When the commit finished
    pub commit_time: DateTime<Utc>,
    /// Interactions the commit is attributed to
    pub interactions: Vec<String>,
}

/// Profiler configuration
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// How often a flush loop should drain the queue
    pub flush_interval: Duration,
    /// Maximum number of records held before the oldest is dropped
    pub max_queued: usize,
}

impl ProfilerConfig {
    /// Set the flush interval
    #[must_use]
    pub const fn with_flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    /// Set the queue bound
    #[must_use]
    pub const fn with_max_queued(mut self, max_queued: usize) -> Self {
        self.max_queued = max_queued;
        self
    }
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_secs(5),
            max_queued: 1000,
        }
    }
}

/// Destination for flushed batches
///
/// Transport is up to the implementor. This trait uses explicit
/// `Pin<Box<dyn Future>>` returns so it stays object safe.
pub trait ProfileSink: Send + Sync {
    /// Deliver a batch of records
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Sink`] if the batch could not be delivered.
    /// The queue puts the batch back in that case.
    fn send(
        &self,
        batch: Vec<ProfileRecord>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ProfileError>> + Send + '_>>;
}

/// Bounded queue of pending profile records
///
/// Cloning shares the same underlying queue.
#[derive(Debug, Clone)]
pub struct ProfileQueue {
    records: Arc<Mutex<VecDeque<ProfileRecord>>>,
    max_queued: usize,
}

impl ProfileQueue {
    /// Create a queue holding at most `max_queued` records
    ///
    /// A bound of zero keeps nothing; every pushed record counts as dropped.
    #[must_use]
    pub fn new(max_queued: usize) -> Self {
        Self {
            records: Arc::new(Mutex::new(VecDeque::new())),
            max_queued,
        }
    }

    /// Create a queue from a [`ProfilerConfig`]
    #[must_use]
    pub fn with_config(config: &ProfilerConfig) -> Self {
        Self::new(config.max_queued)
    }

    /// Append a record, dropping the oldest one when full
    pub fn push(&self, record: ProfileRecord) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if self.max_queued == 0 {
            metrics::counter!("profiler.records.dropped").increment(1);
            tracing::trace!("Profile queue disabled, record not kept");
            return;
        }
        if records.len() >= self.max_queued {
            records.pop_front();
            metrics::counter!("profiler.records.dropped").increment(1);
            tracing::warn!(
                max_queued = self.max_queued,
                "Profile queue at capacity, dropping oldest record"
            );
        }

        records.push_back(record);
        metrics::counter!("profiler.records.queued").increment(1);
    }

    /// Number of queued records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the queue is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every queued record, oldest first
    #[must_use]
    pub fn drain(&self) -> Vec<ProfileRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Put a failed batch back in front of anything queued since
    fn requeue(&self, batch: Vec<ProfileRecord>) {
        let mut records = self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        for record in batch.into_iter().rev() {
            records.push_front(record);
        }
        while records.len() > self.max_queued {
            records.pop_front();
            metrics::counter!("profiler.records.dropped").increment(1);
        }
    }

    /// Send everything queued to `sink`
    ///
    /// An empty queue succeeds without calling the sink. Returns the number
    /// of records delivered.
    ///
    /// # Errors
    ///
    /// Returns the sink's error; the batch is requeued first.
    pub async fn flush(&self, sink: &dyn ProfileSink) -> Result<usize, ProfileError> {
        let batch = self.drain();
        if batch.is_empty() {
            return Ok(0);
        }

        let count = batch.len();
        // Kept for requeue; the sink takes ownership of its copy
        let retained = batch.clone();
        match sink.send(batch).await {
            Ok(()) => {
                tracing::debug!(count, "Flushed profile records");
                Ok(count)
            },
            Err(error) => {
                metrics::counter!("profiler.flush.failures").increment(1);
                tracing::warn!(count, error = %error, "Profile flush failed, requeueing batch");
                self.requeue(retained);
                Err(error)
            },
        }
    }
}

impl Default for ProfileQueue {
    fn default() -> Self {
        Self::with_config(&ProfilerConfig::default())
    }
}

/// Flush `queue` into `sink` on every tick of `interval`
///
/// The first tick of a fresh [`tokio::time::interval`] completes
/// immediately. Failed flushes are logged by the queue and retried on the
/// next tick. Abort the returned handle to stop the loop.
pub fn spawn_flush_loop(
    queue: ProfileQueue,
    sink: Arc<dyn ProfileSink>,
    mut interval: Interval,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            interval.tick().await;
            // Errors are already logged and the batch requeued
            let _ = queue.flush(sink.as_ref()).await;
        }
    })
}

/// Produces profile records for one tracked unit
///
/// Records whose phase is filtered out are never queued.
#[derive(Clone)]
pub struct Profiler {
    id: String,
    phases: Option<Vec<ProfilePhase>>,
    queue: ProfileQueue,
    clock: Arc<dyn Clock>,
}

impl Profiler {
    /// Create a profiler reporting every phase into `queue`
    #[must_use]
    pub fn new(id: impl Into<String>, queue: ProfileQueue, clock: Arc<dyn Clock>) -> Self {
        Self {
            id: id.into(),
            phases: None,
            queue,
            clock,
        }
    }

    /// Only report the given phases
    #[must_use]
    pub fn with_phases(mut self, phases: Vec<ProfilePhase>) -> Self {
        self.phases = Some(phases);
        self
    }

    /// Profiler id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The queue records are pushed to
    #[must_use]
    pub const fn queue(&self) -> &ProfileQueue {
        &self.queue
    }

    /// Current time from the injected clock
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Whether `phase` passes the filter
    #[must_use]
    pub fn accepts(&self, phase: ProfilePhase) -> bool {
        self.phases
            .as_ref()
            .is_none_or(|phases| phases.contains(&phase))
    }

    /// Queue a record for a commit that just finished
    pub fn report(
        &self,
        phase: ProfilePhase,
        actual_duration: Duration,
        start_time: DateTime<Utc>,
        interactions: Vec<String>,
    ) {
        if !self.accepts(phase) {
            return;
        }

        self.queue.push(ProfileRecord {
            id: self.id.clone(),
            phase,
            actual_duration,
            start_time,
            commit_time: self.clock.now(),
            interactions,
        });
    }
}

impl std::fmt::Debug for Profiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profiler")
            .field("id", &self.id)
            .field("phases", &self.phases)
            .field("queue_len", &self.queue.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)] // Test code can use unwrap

    use super::*;
    use async_lifecycle_testing::{capture_diagnostics, test_clock};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSink {
        calls: AtomicUsize,
        fail: bool,
    }

    impl ProfileSink for CountingSink {
        fn send(
            &self,
            _batch: Vec<ProfileRecord>,
        ) -> Pin<Box<dyn Future<Output = Result<(), ProfileError>> + Send + '_>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    Err(ProfileError::Sink("offline".to_string()))
                } else {
                    Ok(())
                }
            })
        }
    }

    fn profiler(queue: &ProfileQueue) -> Profiler {
        Profiler::new("test", queue.clone(), Arc::new(test_clock()))
    }

    fn report_update(profiler: &Profiler, interaction: &str) {
        profiler.report(
            ProfilePhase::Update,
            Duration::from_millis(1),
            profiler.now(),
            vec![interaction.to_string()],
        );
    }

    #[tokio::test]
    async fn test_empty_flush_skips_sink() {
        let queue = ProfileQueue::new(10);
        let sink = CountingSink { calls: AtomicUsize::new(0), fail: false };

        let flushed = queue.flush(&sink).await;

        assert_eq!(flushed, Ok(0));
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_flush_drains_queue() {
        let queue = ProfileQueue::new(10);
        let profiler = profiler(&queue);
        report_update(&profiler, "a");
        report_update(&profiler, "b");
        let sink = CountingSink { calls: AtomicUsize::new(0), fail: false };

        let flushed = queue.flush(&sink).await;

        assert_eq!(flushed, Ok(2));
        assert!(queue.is_empty());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_flush_requeues_in_order() {
        let queue = ProfileQueue::new(10);
        let profiler = profiler(&queue);
        report_update(&profiler, "first");
        report_update(&profiler, "second");
        let sink = CountingSink { calls: AtomicUsize::new(0), fail: true };

        let flushed = queue.flush(&sink).await;

        assert_eq!(flushed, Err(ProfileError::Sink("offline".to_string())));
        let records = queue.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].interactions, vec!["first".to_string()]);
        assert_eq!(records[1].interactions, vec!["second".to_string()]);
    }

    #[test]
    fn test_overflow_drops_oldest() {
        let queue = ProfileQueue::new(2);
        let profiler = profiler(&queue);
        report_update(&profiler, "1");
        report_update(&profiler, "2");
        report_update(&profiler, "3");

        let records = queue.drain();
        let interactions: Vec<_> = records.iter().map(|r| r.interactions[0].as_str()).collect();
        assert_eq!(interactions, vec!["2", "3"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let (capture, _guard) = capture_diagnostics();
        let queue = ProfileQueue::with_config(&ProfilerConfig::default().with_max_queued(0));
        let profiler = profiler(&queue);

        report_update(&profiler, "gone");

        assert!(queue.is_empty());
        assert_eq!(capture.warnings_and_errors(), 0);
    }

    #[test]
    fn test_profiler_exposes_id_and_queue() {
        let queue = ProfileQueue::new(10);
        let profiler = profiler(&queue);

        report_update(&profiler, "shared");

        assert_eq!(profiler.id(), "test");
        assert_eq!(profiler.queue().len(), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_record_json_shape() {
        let queue = ProfileQueue::new(10);
        let profiler = profiler(&queue);
        report_update(&profiler, "search#1");
        let record = queue.drain().remove(0);

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "test");
        assert_eq!(json["phase"], "update");
        assert_eq!(json["interactions"], serde_json::json!(["search#1"]));
        assert_eq!(json["commit_time"], "2025-01-01T00:00:00Z");
        let parsed: ProfileRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_phase_filter() {
        let queue = ProfileQueue::new(10);
        let profiler = profiler(&queue).with_phases(vec![ProfilePhase::Mount]);

        report_update(&profiler, "ignored");
        profiler.report(ProfilePhase::Mount, Duration::ZERO, profiler.now(), Vec::new());

        let records = queue.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].phase, ProfilePhase::Mount);
        assert_eq!(records[0].id, "test");
        assert_eq!(records[0].commit_time, test_clock().now());
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_loop_ticks() {
        let queue = ProfileQueue::new(10);
        let profiler = profiler(&queue);
        let sink = Arc::new(CountingSink { calls: AtomicUsize::new(0), fail: false });
        report_update(&profiler, "tick");

        let handle = spawn_flush_loop(
            queue.clone(),
            Arc::clone(&sink) as Arc<dyn ProfileSink>,
            tokio::time::interval(Duration::from_secs(5)),
        );
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(queue.is_empty());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);

        report_update(&profiler, "tock");
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(queue.is_empty());
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);

        handle.abort();
    }
}
