//! # Async Lifecycle Core
//!
//! Core traits and types for tracking the lifecycle of an asynchronous
//! operation.
//!
//! This crate provides the pure half of the tracker: the state an operation
//! moves through, the actions that move it, and the reducer that applies
//! them. Execution (spawning continuations, liveness, notifications) lives in
//! `async-lifecycle-runtime`.
//!
//! ## Core Concepts
//!
//! - **State**: [`AsyncState`], one of idle / pending / resolved / rejected
//!   plus the last data or error value
//! - **Action**: [`AsyncAction`], every input that changes the state
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Side effect descriptions (not execution)
//! - **Environment**: Injected dependencies, including the initial snapshot
//!   used by `Reset`
//!
//! ## Example
//!
//! ```
//! use async_lifecycle_core::{
//!     AsyncAction, AsyncEnvironment, AsyncReducer, AsyncState, AsyncStatus,
//!     reducer::Reducer,
//! };
//!
//! let env = AsyncEnvironment::new(AsyncState::<u32, String>::idle());
//! let reducer = AsyncReducer::new();
//! let mut state = env.initial_state().clone();
//!
//! reducer.reduce(&mut state, AsyncAction::Start, &env);
//! assert!(state.is_loading());
//!
//! reducer.reduce(&mut state, AsyncAction::Resolve(7), &env);
//! assert_eq!(state.status, AsyncStatus::Resolved);
//! assert_eq!(state.data, Some(7));
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Async operation state and the overrides merged into the initial snapshot
pub mod state;

/// Actions accepted by the async reducer
pub mod action;

/// The reducer owning every async state transition
pub mod async_reducer;

pub use action::AsyncAction;
pub use async_reducer::{AsyncEnvironment, AsyncReducer};
pub use error::TrackerError;
pub use state::{AsyncState, AsyncStateOverrides, AsyncStatus};

/// Reducer module - The core trait for state transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all transition logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Updates state in place
        /// 2. Returns effect descriptions to be executed
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed by the runtime
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe side effects to be performed by the runtime.
/// They are values, not execution.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes a side effect to be executed
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen, executed by the tracker runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Arbitrary async computation
        ///
        /// Returns `Option<Action>` - if Some, the action is fed back into the reducer
        Future(Pin<Box<dyn Future<Output = Option<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Wrap a future producing an optional feedback action
        #[must_use]
        pub fn future<F>(fut: F) -> Self
        where
            F: Future<Output = Option<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }

        /// Whether this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External dependencies are abstracted behind traits and injected so tests
/// can substitute deterministic implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Production - uses system clock
    /// struct SystemClock;
    /// impl Clock for SystemClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         Utc::now()
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Wall clock backed by [`Utc::now`]
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

/// Error types shared by the tracker crates
pub mod error {
    use thiserror::Error;

    /// Errors surfaced synchronously by tracker operations
    ///
    /// Failures of the tracked operation itself are never reported here;
    /// they become `Rejected` state.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum TrackerError {
        /// `run` was handed something that is not an operation
        ///
        /// This is a contract violation by the caller and is not recovered.
        #[error(
            "The argument passed to run must be a future. Maybe a function that's passed isn't returning anything?"
        )]
        InvalidOperation,

        /// The owning scope was attached twice
        #[error("Scope is already attached")]
        ScopeAlreadyAttached,

        /// The owning scope has already ended and cannot be attached again
        #[error("Scope has already ended")]
        ScopeEnded,

        /// The task driving a tracked operation panicked or was aborted
        #[error("Operation task failed: {0}")]
        OperationPanicked(String),
    }
}
