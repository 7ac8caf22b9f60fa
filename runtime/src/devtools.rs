//! Inspection middleware.
//!
//! [`DevTools`] keeps a bounded, in-memory history of every applied action and
//! the state it produced, so the sequence of transitions can be inspected or
//! exported as JSON while the program runs.

use crate::error::StoreError;
use crate::middleware::Middleware;
use crate::Transition;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use todo_redux_core::action::ActionType;
use todo_redux_core::environment::{Clock, SystemClock};

/// Default number of retained entries
pub const DEFAULT_MAX_AGE: usize = 50;

/// One recorded transition
#[derive(Debug)]
pub struct HistoryEntry<S, A> {
    /// Dispatch sequence number of the action
    pub sequence: u64,
    /// Slice-qualified action type
    pub action_type: &'static str,
    /// The action itself
    pub action: A,
    /// State produced by the action
    pub state: Arc<S>,
    /// When the action was recorded
    pub at: DateTime<Utc>,
}

impl<S, A: Clone> Clone for HistoryEntry<S, A> {
    fn clone(&self) -> Self {
        Self {
            sequence: self.sequence,
            action_type: self.action_type,
            action: self.action.clone(),
            state: Arc::clone(&self.state),
            at: self.at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedEntry<'a, S, A> {
    sequence: u64,
    #[serde(rename = "type")]
    action_type: &'static str,
    action: &'a A,
    state: &'a S,
    at: DateTime<Utc>,
}

/// Bounded history of transitions
///
/// Clone the handle before giving one copy to the store; all clones share
/// the same history.
///
/// # Features
///
/// - Bounded queue (`max_age`), oldest entries dropped when full
/// - Thread-safe for concurrent access
/// - Entries share state snapshots with the store, nothing is deep-copied
///
/// # Example
///
/// ```ignore
/// let devtools = DevTools::new().with_max_age(25);
/// let store = Store::builder(state, reducer, env)
///     .middleware(devtools.clone())
///     .build();
///
/// store.send(action).await;
/// println!("{}", devtools.export_json()?);
/// ```
pub struct DevTools<S, A> {
    history: Arc<Mutex<VecDeque<HistoryEntry<S, A>>>>,
    clock: Arc<dyn Clock>,
    max_age: usize,
}

impl<S, A> DevTools<S, A> {
    /// Create an inspector with the system clock and [`DEFAULT_MAX_AGE`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an inspector that timestamps entries with `clock`
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            history: Arc::new(Mutex::new(VecDeque::new())),
            clock,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Set how many entries are retained (at least one)
    #[must_use]
    pub fn with_max_age(mut self, max_age: usize) -> Self {
        self.max_age = max_age.max(1);
        self
    }

    /// Maximum number of retained entries
    #[must_use]
    pub const fn max_age(&self) -> usize {
        self.max_age
    }

    /// Number of retained entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Check if nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// State recorded at `index` (0 = oldest retained entry)
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::HistoryOutOfRange`] if `index` is not retained.
    pub fn state_at(&self, index: usize) -> Result<Arc<S>, StoreError> {
        let history = self
            .history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        history
            .get(index)
            .map(|entry| Arc::clone(&entry.state))
            .ok_or(StoreError::HistoryOutOfRange {
                index,
                len: history.len(),
            })
    }

    /// Action types of the retained entries, oldest first
    #[must_use]
    pub fn action_log(&self) -> Vec<&'static str> {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .map(|entry| entry.action_type)
            .collect()
    }

    /// Copy of the retained entries, oldest first
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry<S, A>>
    where
        A: Clone,
    {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Drop every retained entry
    pub fn clear(&self) {
        self.history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();
    }

    /// Serialize the retained history as a pretty-printed JSON array
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Export`] if a state or action fails to serialize.
    pub fn export_json(&self) -> Result<String, StoreError>
    where
        S: Serialize,
        A: Serialize,
    {
        let history = self
            .history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let exported: Vec<_> = history
            .iter()
            .map(|entry| ExportedEntry {
                sequence: entry.sequence,
                action_type: entry.action_type,
                action: &entry.action,
                state: &*entry.state,
                at: entry.at,
            })
            .collect();

        Ok(serde_json::to_string_pretty(&exported)?)
    }
}

impl<S, A> Clone for DevTools<S, A> {
    fn clone(&self) -> Self {
        Self {
            history: Arc::clone(&self.history),
            clock: Arc::clone(&self.clock),
            max_age: self.max_age,
        }
    }
}

impl<S, A> Default for DevTools<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, A> std::fmt::Debug for DevTools<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevTools")
            .field("entries", &self.len())
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

impl<S, A> Middleware<S, A> for DevTools<S, A>
where
    S: Send + Sync,
    A: ActionType + Clone + Send + Sync,
{
    fn after_reduce(&self, transition: &Transition<S, A>) {
        let mut history = self
            .history
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if history.len() >= self.max_age {
            history.pop_front();
            tracing::trace!(max_age = self.max_age, "DevTools history full, dropping oldest entry");
        }

        history.push_back(HistoryEntry {
            sequence: transition.sequence,
            action_type: transition.action.action_type(),
            action: transition.action.clone(),
            state: Arc::clone(&transition.next),
            at: self.clock.now(),
        });
    }
}
