//! Middleware run around every dispatch.
//!
//! Middleware are observers: they see the action before the reducer runs and
//! the full [`Transition`] afterwards, but they cannot alter either. Logging,
//! inspection and similar diagnostics plug in here instead of living inside
//! reducers.

use crate::Transition;
use std::fmt::Debug;
use std::sync::Arc;
use todo_redux_core::action::ActionType;

/// Hooks invoked by the store around each action
///
/// Both hooks run while the store holds its write lock, so they observe
/// actions strictly in dispatch order. Keep them cheap.
pub trait Middleware<S, A>: Send + Sync {
    /// Called before the reducer runs, with the state it will start from
    fn before_reduce(&self, _action: &A, _state: &Arc<S>) {}

    /// Called after the new state has been produced
    fn after_reduce(&self, _transition: &Transition<S, A>) {}
}

impl<S, A, M> Middleware<S, A> for Arc<M>
where
    M: Middleware<S, A> + ?Sized,
{
    fn before_reduce(&self, action: &A, state: &Arc<S>) {
        (**self).before_reduce(action, state);
    }

    fn after_reduce(&self, transition: &Transition<S, A>) {
        (**self).after_reduce(transition);
    }
}

/// Logs every action and, optionally, the states around it
///
/// The action type is logged at `info`, the action payload at `debug`, and
/// when enabled, the previous and next states at `debug` as well.
#[derive(Debug, Clone, Copy)]
pub struct LoggingMiddleware {
    log_states: bool,
}

impl LoggingMiddleware {
    /// Log actions and states
    #[must_use]
    pub const fn new() -> Self {
        Self { log_states: true }
    }

    /// Choose whether previous/next states are logged
    #[must_use]
    pub const fn with_states(mut self, log_states: bool) -> Self {
        self.log_states = log_states;
        self
    }

    /// Whether states are logged
    #[must_use]
    pub const fn logs_states(&self) -> bool {
        self.log_states
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> Middleware<S, A> for LoggingMiddleware
where
    S: Debug + PartialEq + Send + Sync,
    A: ActionType + Debug + Send + Sync,
{
    fn before_reduce(&self, action: &A, state: &Arc<S>) {
        if self.log_states {
            tracing::debug!(action_type = action.action_type(), prev_state = ?state, "prev state");
        }
    }

    fn after_reduce(&self, transition: &Transition<S, A>) {
        let changed = transition.previous != transition.next;

        tracing::info!(
            sequence = transition.sequence,
            action_type = transition.action.action_type(),
            changed,
            "action"
        );
        tracing::debug!(action = ?transition.action, "action payload");

        if self.log_states {
            tracing::debug!(next_state = ?transition.next, "next state");
        }
    }
}
