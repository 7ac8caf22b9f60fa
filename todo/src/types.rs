//! Domain types for the todo list.
//!
//! The aggregate [`AppState`] holds three independent slices: the todo list,
//! the selected todo and the activity counter.

use serde::{Deserialize, Serialize};
use todo_redux_core::environment::IdGenerator;

/// Descriptions and completion flags of the todos every new store starts with
pub const SEED_TODOS: [(&str, bool); 3] = [
    ("Learn React", true),
    ("Learn Redux", true),
    ("Learn Redux-ToolKit", false),
];

/// Opaque identifier of a todo item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an existing identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draws a fresh identifier from `ids`
    #[must_use]
    pub fn generate(ids: &dyn IdGenerator) -> Self {
        Self(ids.next_id())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Description of the todo
    pub desc: String,
    /// Whether the todo is done
    pub is_complete: bool,
}

impl Todo {
    /// Creates a new, incomplete todo
    #[must_use]
    pub fn new(id: TodoId, desc: impl Into<String>) -> Self {
        Self {
            id,
            desc: desc.into(),
            is_complete: false,
        }
    }

    /// Returns the todo with its completion flag set to `is_complete`
    #[must_use]
    pub fn completed(mut self, is_complete: bool) -> Self {
        self.is_complete = is_complete;
        self
    }
}

/// Aggregate application state
///
/// The three fields are independent slices, each updated by its own reducer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Todo list, in insertion order
    pub todos: Vec<Todo>,
    /// Currently selected todo; not checked against `todos`
    pub selected_todo: Option<TodoId>,
    /// Number of create/edit/toggle/remove actions applied
    pub counter: u64,
}

impl AppState {
    /// The start-up state: the [`SEED_TODOS`] with fresh ids, nothing
    /// selected, counter at zero
    #[must_use]
    pub fn initial(ids: &dyn IdGenerator) -> Self {
        Self {
            todos: SEED_TODOS
                .iter()
                .map(|(desc, is_complete)| Todo::new(TodoId::generate(ids), *desc).completed(*is_complete))
                .collect(),
            selected_todo: None,
            counter: 0,
        }
    }

    /// Creates a state holding `todos`, nothing selected, counter at zero
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            ..Self::default()
        }
    }

    /// Returns the number of todos
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns the number of completed todos
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_complete).count()
    }

    /// Returns the first todo with this id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Resolves the selected id against the list
    ///
    /// `None` when nothing is selected or the selected todo no longer exists.
    #[must_use]
    pub fn selected(&self) -> Option<&Todo> {
        self.selected_todo.as_ref().and_then(|id| self.get(id))
    }
}

impl std::fmt::Display for AppState {
    /// One line per todo, then a summary line
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for todo in &self.todos {
            let status = if todo.is_complete { "✓" } else { " " };
            writeln!(f, "  [{status}] {} ({})", todo.desc, todo.id)?;
        }
        write!(
            f,
            "  completed {}/{}, selected {}, counter {}",
            self.completed_count(),
            self.count(),
            self.selected_todo.as_ref().map_or("-", TodoId::as_str),
            self.counter
        )
    }
}
