//! The reducer owning every async state transition.
//!
//! Transitions:
//!
//! | action | result |
//! |---|---|
//! | `Start` | `status = Pending`, data and error untouched |
//! | `Resolve(v)` | `{Resolved, Some(v), None}` |
//! | `Reject(e)` | `{Rejected, None, Some(e)}` |
//! | `Reset` | the environment's initial snapshot |
//!
//! There is no terminal state; the reducer accepts every action in every
//! state.

use crate::action::AsyncAction;
use crate::effect::Effect;
use crate::reducer::Reducer;
use crate::state::{AsyncState, AsyncStatus};
use smallvec::{SmallVec, smallvec};

/// Async environment
///
/// Holds the initial snapshot captured at construction. It is never mutated
/// afterwards, so `Reset` always restores exactly this value.
#[derive(Debug, Clone)]
pub struct AsyncEnvironment<T, E> {
    initial: AsyncState<T, E>,
}

impl<T, E> AsyncEnvironment<T, E> {
    /// Create an environment around the given initial snapshot
    #[must_use]
    pub const fn new(initial: AsyncState<T, E>) -> Self {
        Self { initial }
    }

    /// The snapshot restored by `Reset`
    #[must_use]
    pub const fn initial_state(&self) -> &AsyncState<T, E> {
        &self.initial
    }
}

/// Async reducer
///
/// Pure: every action yields `Effect::None`. The continuation of a tracked
/// operation is built by the runtime because operations are not cloneable
/// action payloads.
#[derive(Debug, Clone, Copy)]
pub struct AsyncReducer<T, E> {
    _phantom: std::marker::PhantomData<fn() -> (T, E)>,
}

impl<T, E> AsyncReducer<T, E> {
    /// Create a new async reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<T, E> Default for AsyncReducer<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, E: Clone> Reducer for AsyncReducer<T, E> {
    type State = AsyncState<T, E>;
    type Action = AsyncAction<T, E>;
    type Environment = AsyncEnvironment<T, E>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AsyncAction::Start => {
                state.status = AsyncStatus::Pending;
            },
            AsyncAction::Resolve(data) => {
                *state = AsyncState::resolved(data);
            },
            AsyncAction::Reject(error) => {
                *state = AsyncState::rejected(error);
            },
            AsyncAction::Reset => {
                state.clone_from(&environment.initial);
            },
        }

        smallvec![Effect::None]
    }
}
