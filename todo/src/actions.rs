//! Commands accepted by the todo reducers, and the action creators that
//! build them.

use crate::types::TodoId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use todo_redux_core::environment::IdGenerator;
use todo_redux_macros::Action;

/// Every command the application state understands
///
/// Type names are slice-qualified: `todos/create`, `todos/edit`,
/// `todos/toggle`, `todos/remove` and `selectedTodo/select`.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
#[action(slice = "todos")]
pub enum TodoAction {
    /// Append a new, incomplete todo
    Create {
        /// Id assigned by [`TodoActions::create`]
        id: TodoId,
        /// Description of the new todo
        desc: String,
    },
    /// Replace the description of every todo with this id
    Edit {
        /// Target id
        id: TodoId,
        /// New description
        desc: String,
    },
    /// Set the completion flag of every todo with this id
    Toggle {
        /// Target id
        id: TodoId,
        /// New completion flag
        #[serde(rename = "isComplete")]
        is_complete: bool,
    },
    /// Delete the first todo with this id
    Remove {
        /// Target id
        id: TodoId,
    },
    /// Mark a todo as selected
    #[action(slice = "selectedTodo")]
    Select {
        /// Selected id, not checked against the list
        id: TodoId,
    },
}

impl TodoAction {
    /// Whether the activity counter tracks this command
    #[must_use]
    pub const fn counts_as_activity(&self) -> bool {
        match self {
            Self::Create { .. } | Self::Edit { .. } | Self::Toggle { .. } | Self::Remove { .. } => true,
            Self::Select { .. } => false,
        }
    }

    /// The id this command targets
    #[must_use]
    pub const fn id(&self) -> &TodoId {
        match self {
            Self::Create { id, .. }
            | Self::Edit { id, .. }
            | Self::Toggle { id, .. }
            | Self::Remove { id }
            | Self::Select { id } => id,
        }
    }
}

/// Action creators
///
/// The one place commands are built. `create` draws the new todo's id from
/// the injected generator so reducers stay deterministic.
#[derive(Clone)]
pub struct TodoActions {
    ids: Arc<dyn IdGenerator>,
}

impl TodoActions {
    /// Creates action creators backed by `ids`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// `todos/create` with a freshly generated id
    #[must_use]
    pub fn create(&self, desc: impl Into<String>) -> TodoAction {
        TodoAction::Create {
            id: TodoId::generate(self.ids.as_ref()),
            desc: desc.into(),
        }
    }

    /// `todos/edit`
    #[must_use]
    pub fn edit(&self, id: TodoId, desc: impl Into<String>) -> TodoAction {
        TodoAction::Edit {
            id,
            desc: desc.into(),
        }
    }

    /// `todos/toggle`
    #[must_use]
    pub fn toggle(&self, id: TodoId, is_complete: bool) -> TodoAction {
        TodoAction::Toggle { id, is_complete }
    }

    /// `todos/remove`
    #[must_use]
    pub fn remove(&self, id: TodoId) -> TodoAction {
        TodoAction::Remove { id }
    }

    /// `selectedTodo/select`
    #[must_use]
    pub fn select(&self, id: TodoId) -> TodoAction {
        TodoAction::Select { id }
    }
}

impl std::fmt::Debug for TodoActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoActions").finish_non_exhaustive()
    }
}
