//! The tracker - runtime shell around [`AsyncReducer`].
//!
//! The tracker owns:
//! 1. State (in a `watch` channel, so subscribers see every write)
//! 2. Reducer and environment (the initial snapshot)
//! 3. Scope liveness (gates deferred settlements)
//! 4. Effect execution (spawning continuations and feeding their actions back)

use crate::config::TrackerConfig;
use crate::profiler::ProfilePhase;
use crate::scope::{Scope, ScopeGuard, ScopePhase};
use async_lifecycle_core::effect::Effect;
use async_lifecycle_core::reducer::Reducer;
use async_lifecycle_core::{
    AsyncAction, AsyncEnvironment, AsyncReducer, AsyncState, AsyncStateOverrides, AsyncStatus,
    TrackerError,
};
use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use smallvec::SmallVec;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// The run that caused a commit, for profiling attribution
#[derive(Debug, Clone)]
struct Interaction {
    name: Arc<str>,
    started_at: DateTime<Utc>,
}

struct Shared<T, E> {
    state: watch::Sender<AsyncState<T, E>>,
    reducer: AsyncReducer<T, E>,
    environment: AsyncEnvironment<T, E>,
    scope: Arc<Scope>,
    config: TrackerConfig,
    next_run: AtomicU64,
}

/// Tracks the lifecycle of one asynchronous operation at a time
///
/// Cloning yields another handle to the same tracker. Outstanding
/// continuations hold only a weak reference, so dropping every handle ends
/// the tracker even while an operation is in flight.
///
/// # Example
///
/// ```ignore
/// let tracker = AsyncTracker::<Vec<Book>, ClientError>::new();
/// let _scope = tracker.attach()?;
///
/// let handle = tracker.run(client.search("dune"));
/// assert!(tracker.is_loading());
///
/// handle.await?;
/// assert!(tracker.is_success());
/// ```
pub struct AsyncTracker<T, E> {
    shared: Arc<Shared<T, E>>,
}

impl<T, E> Clone for AsyncTracker<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T, E> std::fmt::Debug for AsyncTracker<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncTracker")
            .field("label", &self.shared.config.label)
            .field("status", &self.shared.state.borrow().status)
            .field("scope", &self.shared.scope.phase())
            .finish_non_exhaustive()
    }
}

impl<T, E> AsyncTracker<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a tracker starting from the default idle state
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(AsyncStateOverrides::new(), TrackerConfig::default())
    }

    /// Create a tracker whose initial snapshot merges `overrides` over idle
    #[must_use]
    pub fn with_initial(overrides: AsyncStateOverrides<T, E>) -> Self {
        Self::with_config(overrides, TrackerConfig::default())
    }

    /// Create a tracker with custom configuration
    ///
    /// The merged initial snapshot is captured here and never changes;
    /// [`reset`](Self::reset) restores exactly this value.
    #[must_use]
    pub fn with_config(overrides: AsyncStateOverrides<T, E>, config: TrackerConfig) -> Self {
        let initial = overrides.merge();
        let (state, _) = watch::channel(initial.clone());

        Self {
            shared: Arc::new(Shared {
                state,
                reducer: AsyncReducer::new(),
                environment: AsyncEnvironment::new(initial),
                scope: Arc::new(Scope::new()),
                config,
                next_run: AtomicU64::new(0),
            }),
        }
    }

    /// Attach the owning scope
    ///
    /// Deferred settlements are written only while the returned guard is
    /// alive. Dropping it detaches the scope for good.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::ScopeAlreadyAttached`] on a second attach
    /// - [`TrackerError::ScopeEnded`] after the scope was detached
    pub fn attach(&self) -> Result<ScopeGuard, TrackerError> {
        self.shared.scope.attach()?;
        tracing::debug!(tracker = %self.shared.config.label, "Scope attached");

        if let Some(profiler) = &self.shared.config.profiler {
            profiler.report(ProfilePhase::Mount, Duration::ZERO, profiler.now(), Vec::new());
        }

        Ok(ScopeGuard::new(Arc::clone(&self.shared.scope)))
    }

    /// Start tracking `operation`
    ///
    /// The state is `Pending` before this returns. When the operation
    /// settles its outcome is written as `Resolved`/`Rejected`, unless the
    /// scope is no longer live, in which case nothing at all happens.
    ///
    /// A run started while another is pending does not cancel it: both
    /// settlements are written and the later one wins.
    ///
    /// The returned handle resolves to the operation's own outcome once the
    /// settlement has been written or discarded. It does not need to be
    /// awaited for tracking to happen.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[tracing::instrument(
        skip(self, operation),
        name = "tracker_run",
        fields(tracker = %self.shared.config.label, run_id = tracing::field::Empty)
    )]
    pub fn run<F>(&self, operation: F) -> RunHandle<T, E>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let run_id = self.shared.next_run.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::Span::current().record("run_id", run_id);
        metrics::counter!("async_tracker.runs.total").increment(1);

        let interaction = Interaction {
            name: format!("{}#{run_id}", self.shared.config.label).into(),
            started_at: self.now(),
        };

        self.dispatch(AsyncAction::Start, Some(&interaction));
        tracing::debug!("Operation started");

        let (outcome_tx, outcome_rx) = oneshot::channel();
        let continuation = Effect::future(async move {
            let outcome = operation.await;
            let action = AsyncAction::settle(outcome.clone());
            // The receiver is gone only if the handle was dropped
            let _ = outcome_tx.send(outcome);
            Some(action)
        });
        let task = self.execute_effect(continuation, Some(interaction));

        RunHandle::new(async move {
            if let Some(task) = task {
                task.await
                    .map_err(|e| TrackerError::OperationPanicked(e.to_string()))?;
            }
            outcome_rx.await.map_err(|_| {
                TrackerError::OperationPanicked("operation dropped before settling".to_string())
            })
        })
    }

    /// Start tracking an operation that may be missing
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidOperation`] if `operation` is `None`.
    /// The state is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn try_run<F>(&self, operation: Option<F>) -> Result<RunHandle<T, E>, TrackerError>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
    {
        let Some(operation) = operation else {
            metrics::counter!("async_tracker.invalid_operations").increment(1);
            return Err(TrackerError::InvalidOperation);
        };
        Ok(self.run(operation))
    }

    /// Set `{Resolved, data, no error}` directly
    pub fn set_data(&self, data: T) {
        self.dispatch(AsyncAction::Resolve(data), None);
    }

    /// Set `{Rejected, error, no data}` directly
    pub fn set_error(&self, error: E) {
        self.dispatch(AsyncAction::Reject(error), None);
    }

    /// Restore the snapshot captured at construction
    pub fn reset(&self) {
        self.dispatch(AsyncAction::Reset, None);
    }

    /// Subscribe to state writes
    ///
    /// Every write marks the receiver changed, including writes that leave
    /// the state equal to what it was. Discarded settlements never do.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AsyncState<T, E>> {
        self.shared.state.subscribe()
    }

    /// Read current state via a closure
    pub fn state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&AsyncState<T, E>) -> R,
    {
        f(&*self.shared.state.borrow())
    }

    /// Copy of the current state
    #[must_use]
    pub fn snapshot(&self) -> AsyncState<T, E> {
        self.state(Clone::clone)
    }

    /// The snapshot restored by [`reset`](Self::reset)
    #[must_use]
    pub fn initial_state(&self) -> &AsyncState<T, E> {
        self.shared.environment.initial_state()
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> AsyncStatus {
        self.state(|s| s.status)
    }

    /// Current data
    #[must_use]
    pub fn data(&self) -> Option<T> {
        self.state(|s| s.data.clone())
    }

    /// Current error
    #[must_use]
    pub fn error(&self) -> Option<E> {
        self.state(|s| s.error.clone())
    }

    /// `status == Idle`
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state(AsyncState::is_idle)
    }

    /// `status == Pending`
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state(AsyncState::is_loading)
    }

    /// `status == Resolved`
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state(AsyncState::is_success)
    }

    /// `status == Rejected`
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.state(AsyncState::is_error)
    }

    /// Phase of the owning scope
    #[must_use]
    pub fn scope_phase(&self) -> ScopePhase {
        self.shared.scope.phase()
    }

    /// Configured label
    #[must_use]
    pub fn label(&self) -> &str {
        &self.shared.config.label
    }

    fn now(&self) -> DateTime<Utc> {
        self.shared
            .config
            .profiler
            .as_ref()
            .map_or_else(Utc::now, crate::profiler::Profiler::now)
    }

    /// Apply an action through the reducer and execute its effects
    fn dispatch(&self, action: AsyncAction<T, E>, interaction: Option<&Interaction>) {
        let action_name = action.name();
        let start = Instant::now();

        let mut effects: SmallVec<[Effect<AsyncAction<T, E>>; 4]> = SmallVec::new();
        self.shared.state.send_modify(|state| {
            effects = self
                .shared
                .reducer
                .reduce(state, action, &self.shared.environment);
        });
        let duration = start.elapsed();

        tracing::trace!(
            action = action_name,
            "Reducer completed, returned {} effects",
            effects.len()
        );

        if let Some(profiler) = &self.shared.config.profiler {
            let (started_at, interactions) = interaction.map_or_else(
                || (profiler.now(), Vec::new()),
                |i| (i.started_at, vec![i.name.to_string()]),
            );
            profiler.report(ProfilePhase::Update, duration, started_at, interactions);
        }

        for effect in effects {
            let _ = self.execute_effect(effect, interaction.cloned());
        }
    }

    /// Execute an effect, returning the task for spawned effects
    fn execute_effect(
        &self,
        effect: Effect<AsyncAction<T, E>>,
        interaction: Option<Interaction>,
    ) -> Option<JoinHandle<()>> {
        match effect {
            Effect::None => {
                tracing::trace!("Executing Effect::None (no-op)");
                None
            },
            Effect::Future(fut) => {
                tracing::trace!("Executing Effect::Future");
                let shared = Arc::downgrade(&self.shared);
                let span = tracing::debug_span!("tracker_settle");

                Some(tokio::spawn(
                    async move {
                        let Some(action) = fut.await else {
                            return;
                        };
                        Self::feed_back(&shared, action, interaction.as_ref());
                    }
                    .instrument(span),
                ))
            },
        }
    }

    /// Write a deferred action if the tracker still exists and its scope is live
    ///
    /// Otherwise this is a complete no-op: no write, no notification, no
    /// log event, no metric. The scope stays live until the write is done.
    fn feed_back(
        shared: &Weak<Shared<T, E>>,
        action: AsyncAction<T, E>,
        interaction: Option<&Interaction>,
    ) {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        let tracker = Self { shared };
        let Some(_live) = tracker.shared.scope.enter() else {
            return;
        };

        let outcome = match action {
            AsyncAction::Resolve(_) => "resolved",
            AsyncAction::Reject(_) => "rejected",
            AsyncAction::Start | AsyncAction::Reset => "other",
        };
        metrics::counter!("async_tracker.settlements", "outcome" => outcome).increment(1);
        tracing::debug!(outcome, "Settlement applied");

        tracker.dispatch(action, interaction);
    }
}

impl<T, E> Default for AsyncTracker<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a tracked operation as seen by the caller of `run`
///
/// `Ok(outcome)` carries the operation's own `Result`, whether or not it
/// was written to state. `Err` means the operation never settled.
pub type RunOutcome<T, E> = Result<Result<T, E>, TrackerError>;

/// Handle returned by [`AsyncTracker::run`]
///
/// Resolves after the settlement has been written (or discarded), so state
/// read after awaiting it already reflects the outcome.
pub struct RunHandle<T, E> {
    inner: BoxFuture<'static, RunOutcome<T, E>>,
}

impl<T, E> RunHandle<T, E> {
    fn new<F>(fut: F) -> Self
    where
        F: Future<Output = RunOutcome<T, E>> + Send + 'static,
    {
        Self { inner: fut.boxed() }
    }
}

impl<T, E> Future for RunHandle<T, E> {
    type Output = RunOutcome<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl<T, E> std::fmt::Debug for RunHandle<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RunHandle(<future>)")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

    use super::*;
    use async_lifecycle_testing::{capture_diagnostics, deferred};
    use tokio_test::{assert_pending, assert_ready};

    type Tracker = AsyncTracker<String, String>;

    #[tokio::test]
    async fn test_initial_state() {
        let tracker = Tracker::new();

        assert_eq!(tracker.snapshot(), AsyncState::idle());
        assert!(tracker.is_idle());
        assert!(!tracker.is_loading());
        assert!(!tracker.is_success());
        assert!(!tracker.is_error());
        assert_eq!(tracker.scope_phase(), ScopePhase::Created);
    }

    #[tokio::test]
    async fn test_initial_override() {
        let tracker = Tracker::with_initial(
            AsyncStateOverrides::new()
                .status(AsyncStatus::Resolved)
                .data("cached".to_string()),
        );

        assert!(tracker.is_success());
        assert_eq!(tracker.data(), Some("cached".to_string()));
        assert_eq!(tracker.error(), None);
    }

    #[tokio::test]
    async fn test_run_is_pending_before_returning() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();
        let (operation, _resolver) = deferred::<String, String>();

        let handle = tracker.run(operation);

        assert_eq!(tracker.status(), AsyncStatus::Pending);
        assert!(tracker.is_loading());
        assert_eq!(tracker.data(), None);
        assert_eq!(tracker.error(), None);

        let mut handle = tokio_test::task::spawn(handle);
        assert_pending!(handle.poll());
    }

    #[tokio::test]
    async fn test_run_resolves() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();
        let (operation, resolver) = deferred();

        let handle = tracker.run(operation);
        resolver.resolve("dune".to_string());
        let outcome = handle.await.unwrap();

        assert_eq!(outcome, Ok("dune".to_string()));
        assert_eq!(tracker.snapshot(), AsyncState::resolved("dune".to_string()));
        assert!(tracker.is_success());
    }

    #[tokio::test]
    async fn test_run_rejects() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();
        let (operation, resolver) = deferred();

        let handle = tracker.run(operation);
        resolver.reject("not found".to_string());
        let outcome = handle.await.unwrap();

        assert_eq!(outcome, Err("not found".to_string()));
        assert_eq!(tracker.snapshot(), AsyncState::rejected("not found".to_string()));
        assert!(tracker.is_error());
    }

    #[tokio::test]
    async fn test_pending_keeps_previous_values() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();
        tracker.set_data("old".to_string());
        let (operation, _resolver) = deferred::<String, String>();

        let _handle = tracker.run(operation);

        assert!(tracker.is_loading());
        assert_eq!(tracker.data(), Some("old".to_string()));
    }

    #[tokio::test]
    async fn test_set_data_and_set_error_are_direct() {
        let tracker = Tracker::new();

        tracker.set_data("value".to_string());
        assert_eq!(tracker.snapshot(), AsyncState::resolved("value".to_string()));

        tracker.set_error("failure".to_string());
        assert_eq!(tracker.snapshot(), AsyncState::rejected("failure".to_string()));
    }

    #[tokio::test]
    async fn test_reset_restores_snapshot() {
        let overrides = AsyncStateOverrides::new().error("initial".to_string());
        let tracker = Tracker::with_initial(overrides.clone());
        tracker.set_data("changed".to_string());

        tracker.reset();
        let first = tracker.snapshot();
        tracker.reset();

        assert_eq!(first, overrides.merge());
        assert_eq!(tracker.snapshot(), first);
        assert_eq!(tracker.initial_state(), &first);
    }

    #[tokio::test]
    async fn test_try_run_without_operation() {
        let tracker = Tracker::new();
        let receiver = tracker.subscribe();

        let result = tracker.try_run(None::<std::future::Ready<Result<String, String>>>);

        assert_eq!(result.err(), Some(TrackerError::InvalidOperation));
        assert!(tracker.is_idle());
        assert!(!receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_try_run_with_operation() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();

        let handle = tracker
            .try_run(Some(async { Ok::<_, String>("ok".to_string()) }))
            .unwrap();
        assert!(tracker.is_loading());

        assert_eq!(handle.await.unwrap(), Ok("ok".to_string()));
        assert!(tracker.is_success());
    }

    #[tokio::test]
    async fn test_detached_scope_discards_settlement() {
        let (capture, _guard) = capture_diagnostics();
        let tracker = Tracker::new();
        let scope = tracker.attach().unwrap();
        let (operation, resolver) = deferred();
        let handle = tracker.run(operation);
        let receiver = tracker.subscribe();

        scope.detach();
        let events_after_detach = capture.events();
        resolver.resolve("late".to_string());
        let outcome = handle.await.unwrap();

        assert_eq!(outcome, Ok("late".to_string()));
        assert!(tracker.is_loading());
        assert_eq!(tracker.data(), None);
        assert!(!receiver.has_changed().unwrap());
        assert_eq!(capture.events(), events_after_detach);
        assert_eq!(capture.warnings_and_errors(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_write_lands_after_detach_returns() {
        let tracker = Tracker::new();
        let scope = tracker.attach().unwrap();
        let mut handles = Vec::new();
        let mut resolvers = Vec::new();
        for _ in 0..64 {
            let (operation, resolver) = deferred();
            handles.push(tracker.run(operation));
            resolvers.push(resolver);
        }

        // Settle from another thread while the scope is being detached
        let settler = std::thread::spawn(move || {
            for (i, resolver) in resolvers.into_iter().enumerate() {
                resolver.resolve(i.to_string());
            }
        });
        tokio::task::yield_now().await;
        scope.detach();
        let receiver = tracker.subscribe();
        let after_detach = tracker.snapshot();

        settler.join().unwrap();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(tracker.snapshot(), after_detach);
        assert!(!receiver.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_unattached_scope_discards_settlement() {
        let tracker = Tracker::new();

        let outcome = tracker
            .run(async { Ok::<_, String>("early".to_string()) })
            .await
            .unwrap();

        assert_eq!(outcome, Ok("early".to_string()));
        assert!(tracker.is_loading());
    }

    #[tokio::test]
    async fn test_dropped_tracker_is_not_resurrected() {
        let tracker = Tracker::new();
        let scope = tracker.attach().unwrap();
        let (operation, resolver) = deferred();
        let handle = tracker.run(operation);
        let receiver = tracker.subscribe();

        drop(tracker);
        resolver.resolve("orphan".to_string());

        assert_eq!(handle.await.unwrap(), Ok("orphan".to_string()));
        assert!(scope.is_live());
        // The sender is gone with the tracker, so the receiver sees closure
        assert!(receiver.has_changed().is_err());
    }

    #[tokio::test]
    async fn test_direct_calls_after_detach_still_write() {
        let tracker = Tracker::new();
        tracker.attach().unwrap().detach();

        tracker.set_data("direct".to_string());

        assert!(tracker.is_success());
    }

    #[tokio::test]
    async fn test_second_attach_fails() {
        let tracker = Tracker::new();
        let scope = tracker.attach().unwrap();

        assert_eq!(tracker.attach().err(), Some(TrackerError::ScopeAlreadyAttached));
        drop(scope);
        assert_eq!(tracker.attach().err(), Some(TrackerError::ScopeEnded));
        assert_eq!(tracker.scope_phase(), ScopePhase::Ended);
    }

    // Superseded runs are not fenced: whichever settles last wins.
    #[tokio::test]
    async fn test_superseded_run_last_settlement_wins() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();
        let (first, resolve_first) = deferred();
        let (second, resolve_second) = deferred();

        let first_handle = tracker.run(first);
        let second_handle = tracker.run(second);
        assert!(tracker.is_loading());

        resolve_second.resolve("second".to_string());
        second_handle.await.unwrap().unwrap();
        assert_eq!(tracker.data(), Some("second".to_string()));

        resolve_first.resolve("first".to_string());
        first_handle.await.unwrap().unwrap();
        assert_eq!(tracker.data(), Some("first".to_string()));
    }

    #[tokio::test]
    async fn test_subscriber_sees_each_write() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();
        let mut receiver = tracker.subscribe();
        let (operation, resolver) = deferred();

        let handle = tracker.run(operation);
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().is_loading());

        resolver.resolve("done".to_string());
        handle.await.unwrap().unwrap();
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().is_success());

        tracker.reset();
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().is_idle());
    }

    fn tracker_should_panic() -> bool {
        true
    }

    #[tokio::test]
    async fn test_panicking_operation_reports_error() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();

        let handle = tracker.run(async {
            if tracker_should_panic() {
                panic!("operation blew up");
            }
            Ok::<String, String>(String::new())
        });
        let outcome = handle.await;

        assert!(matches!(outcome, Err(TrackerError::OperationPanicked(_))));
        assert!(tracker.is_loading());
    }

    #[tokio::test]
    async fn test_handle_ready_after_settlement() {
        let tracker = Tracker::new();
        let _scope = tracker.attach().unwrap();
        let (operation, resolver) = deferred();
        let mut handle = tokio_test::task::spawn(tracker.run(operation));
        assert_pending!(handle.poll());

        resolver.resolve("ready".to_string());
        while !handle.is_woken() {
            tokio::task::yield_now().await;
        }

        let outcome = assert_ready!(handle.poll());
        assert_eq!(outcome, Ok(Ok("ready".to_string())));
        assert!(tracker.is_success());
    }
}
