//! Profile sink that records instead of sending.

use async_lifecycle_runtime::{ProfileError, ProfileRecord, ProfileSink};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Keeps every delivered batch; can be told to fail
#[derive(Debug, Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<Vec<ProfileRecord>>>,
    failing: AtomicBool,
}

impl RecordingSink {
    /// Create a sink that accepts everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Batches delivered so far
    #[must_use]
    pub fn batches(&self) -> Vec<Vec<ProfileRecord>> {
        self.batches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All delivered records, flattened in delivery order
    #[must_use]
    pub fn records(&self) -> Vec<ProfileRecord> {
        self.batches().into_iter().flatten().collect()
    }
}

impl ProfileSink for RecordingSink {
    fn send(
        &self,
        batch: Vec<ProfileRecord>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ProfileError>> + Send + '_>> {
        Box::pin(async move {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ProfileError::Sink("recording sink set to fail".to_string()));
            }
            self.batches
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(batch);
            Ok(())
        })
    }
}
