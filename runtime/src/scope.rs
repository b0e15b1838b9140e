//! Liveness of the scope that owns a tracker.
//!
//! A scope moves `Created -> Live -> Ended` exactly once. Deferred
//! settlements write state only while it is `Live`. A settlement holds the
//! scope's gate for the duration of its write and ending the scope waits
//! for the gate, so once [`Scope::end`] returns no deferred write can land,
//! whichever thread it runs on.

use async_lifecycle_core::TrackerError;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

const CREATED: u8 = 0;
const LIVE: u8 = 1;
const ENDED: u8 = 2;

/// Lifecycle phase of a [`Scope`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePhase {
    /// Not yet attached
    Created,
    /// Attached and accepting deferred writes
    Live,
    /// Detached; deferred writes are discarded
    Ended,
}

/// Liveness flag shared by a tracker and its continuations
#[derive(Debug, Default)]
pub struct Scope {
    phase: AtomicU8,
    gate: RwLock<()>,
}

impl Scope {
    /// A scope that has not been attached yet
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(CREATED),
            gate: RwLock::new(()),
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> ScopePhase {
        match self.phase.load(Ordering::Acquire) {
            CREATED => ScopePhase::Created,
            LIVE => ScopePhase::Live,
            _ => ScopePhase::Ended,
        }
    }

    /// Whether deferred writes are currently accepted
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.phase.load(Ordering::Acquire) == LIVE
    }

    /// Move `Created -> Live`
    ///
    /// # Errors
    ///
    /// - [`TrackerError::ScopeAlreadyAttached`] if already live
    /// - [`TrackerError::ScopeEnded`] if already detached
    pub fn attach(&self) -> Result<(), TrackerError> {
        self.phase
            .compare_exchange(CREATED, LIVE, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|current| {
                if current == LIVE {
                    TrackerError::ScopeAlreadyAttached
                } else {
                    TrackerError::ScopeEnded
                }
            })
    }

    /// Hold the scope live for one deferred write
    ///
    /// Returns `None` unless the scope is `Live`. While the returned guard
    /// is held, [`end`](Self::end) blocks. The guard must not be held
    /// across an `.await`.
    pub(crate) fn enter(&self) -> Option<RwLockReadGuard<'_, ()>> {
        let gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        self.is_live().then_some(gate)
    }

    /// Move to `Ended`, returning the phase it left
    ///
    /// Waits for any deferred write already in progress.
    pub fn end(&self) -> ScopePhase {
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        match self.phase.swap(ENDED, Ordering::AcqRel) {
            CREATED => ScopePhase::Created,
            LIVE => ScopePhase::Live,
            _ => ScopePhase::Ended,
        }
    }
}

/// Attach notification in RAII form
///
/// Returned by `AsyncTracker::attach`. Dropping it is the detach
/// notification, so a scope is detached exactly once.
#[derive(Debug)]
#[must_use = "dropping the guard detaches the scope immediately"]
pub struct ScopeGuard {
    scope: Arc<Scope>,
}

impl ScopeGuard {
    pub(crate) const fn new(scope: Arc<Scope>) -> Self {
        Self { scope }
    }

    /// Whether the guarded scope is live
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.scope.is_live()
    }

    /// Detach now instead of at end of scope
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.scope.end();
        tracing::trace!(?previous, "Scope detached");
    }
}
