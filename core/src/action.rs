//! Actions accepted by [`AsyncReducer`](crate::AsyncReducer).

/// Every input that changes an [`AsyncState`](crate::AsyncState)
///
/// `Resolve` and `Reject` are produced both by direct `set_data` /
/// `set_error` calls and by the deferred settlement of a tracked operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncAction<T, E> {
    /// An operation started; only the status changes
    Start,
    /// A value was produced
    Resolve(T),
    /// A failure was produced
    Reject(E),
    /// Restore the initial snapshot
    Reset,
}

impl<T, E> AsyncAction<T, E> {
    /// Map an operation outcome to the action that records it
    #[must_use]
    pub fn settle(outcome: Result<T, E>) -> Self {
        match outcome {
            Ok(data) => Self::Resolve(data),
            Err(error) => Self::Reject(error),
        }
    }

    /// Short name for logs and metric labels
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Resolve(_) => "resolve",
            Self::Reject(_) => "reject",
            Self::Reset => "reset",
        }
    }
}
