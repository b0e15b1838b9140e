//! Async operation state.
//!
//! [`AsyncState`] is the only entity the tracker owns. Its derived flags are
//! computed from `status`, never stored.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of the tracked operation
///
/// Exactly one status holds at any time. Serialized in lowercase
/// (`"idle"`, `"pending"`, `"resolved"`, `"rejected"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsyncStatus {
    /// No operation has run since construction or reset
    #[default]
    Idle,
    /// An operation is in flight
    Pending,
    /// The last operation (or `set_data`) produced a value
    Resolved,
    /// The last operation (or `set_error`) failed
    Rejected,
}

impl AsyncStatus {
    /// Lowercase name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AsyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single tracked asynchronous operation
///
/// `data` is meaningful only when `Resolved` and `error` only when
/// `Rejected`. A `Start` transition changes the status alone, so values from
/// a previous settlement stay readable while the next operation is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsyncState<T, E> {
    /// Current lifecycle status
    pub status: AsyncStatus,
    /// Last successfully produced value
    pub data: Option<T>,
    /// Last failure value
    pub error: Option<E>,
}

impl<T, E> AsyncState<T, E> {
    /// The default state: idle with no data and no error
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            status: AsyncStatus::Idle,
            data: None,
            error: None,
        }
    }

    /// A resolved state holding `data`
    #[must_use]
    pub const fn resolved(data: T) -> Self {
        Self {
            status: AsyncStatus::Resolved,
            data: Some(data),
            error: None,
        }
    }

    /// A rejected state holding `error`
    #[must_use]
    pub const fn rejected(error: E) -> Self {
        Self {
            status: AsyncStatus::Rejected,
            data: None,
            error: Some(error),
        }
    }

    /// `status == Idle`
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.status == AsyncStatus::Idle
    }

    /// `status == Pending`
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == AsyncStatus::Pending
    }

    /// `status == Resolved`
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == AsyncStatus::Resolved
    }

    /// `status == Rejected`
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == AsyncStatus::Rejected
    }
}

impl<T, E> Default for AsyncState<T, E> {
    fn default() -> Self {
        Self::idle()
    }
}

/// Caller-supplied overrides for the initial snapshot
///
/// Each field that is `Some` replaces the corresponding field of
/// [`AsyncState::idle`]. The merge is shallow and unchecked: an override of
/// `status: Idle` with `data: Some(..)` is taken as given.
///
/// # Example
///
/// ```
/// use async_lifecycle_core::{AsyncStateOverrides, AsyncStatus};
///
/// let initial = AsyncStateOverrides::<&str, ()>::new()
///     .status(AsyncStatus::Resolved)
///     .data("cached")
///     .merge();
///
/// assert!(initial.is_success());
/// assert_eq!(initial.data, Some("cached"));
/// assert_eq!(initial.error, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncStateOverrides<T, E> {
    /// Replacement status
    pub status: Option<AsyncStatus>,
    /// Replacement data
    pub data: Option<T>,
    /// Replacement error
    pub error: Option<E>,
}

impl<T, E> AsyncStateOverrides<T, E> {
    /// No overrides: merging yields the default idle state
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            data: None,
            error: None,
        }
    }

    /// Override the status
    #[must_use]
    pub fn status(mut self, status: AsyncStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Override the data
    #[must_use]
    pub fn data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Override the error
    #[must_use]
    pub fn error(mut self, error: E) -> Self {
        self.error = Some(error);
        self
    }

    /// Shallow-merge the overrides over the default idle state
    #[must_use]
    pub fn merge(self) -> AsyncState<T, E> {
        let default = AsyncState::idle();
        AsyncState {
            status: self.status.unwrap_or(default.status),
            data: self.data.or(default.data),
            error: self.error.or(default.error),
        }
    }
}

impl<T, E> Default for AsyncStateOverrides<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> From<AsyncState<T, E>> for AsyncStateOverrides<T, E> {
    fn from(state: AsyncState<T, E>) -> Self {
        Self {
            status: Some(state.status),
            data: state.data,
            error: state.error,
        }
    }
}
