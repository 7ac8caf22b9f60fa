//! Reducer logic for the todo application.
//!
//! One reducer per slice of [`AppState`], mounted on its field with
//! `scope_reducer` and combined into [`app_reducer`]. None of them can fail:
//! commands naming an unknown id leave the slice as it was.

use crate::actions::{TodoAction, TodoActions};
use crate::types::{AppState, Todo, TodoId};
use std::sync::Arc;
use todo_redux_core::composition::{combine_reducers, scope_reducer, CombinedReducer};
use todo_redux_core::environment::{Clock, IdGenerator, SystemClock, UuidGenerator};
use todo_redux_core::reducer::Reducer;

/// Environment dependencies for the todo reducers
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of todo ids
    pub ids: Arc<dyn IdGenerator>,
    /// Clock used to timestamp inspection history
    pub clock: Arc<dyn Clock>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self { ids, clock }
    }

    /// Random UUIDs and the system clock
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(UuidGenerator), Arc::new(SystemClock))
    }

    /// Action creators sharing this environment's id generator
    #[must_use]
    pub fn actions(&self) -> TodoActions {
        TodoActions::new(Arc::clone(&self.ids))
    }

    /// The seeded start-up state, ids drawn from this environment
    #[must_use]
    pub fn initial_state(&self) -> AppState {
        AppState::initial(self.ids.as_ref())
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list slice
#[derive(Clone, Copy, Debug, Default)]
pub struct TodosReducer;

impl Reducer for TodosReducer {
    type State = Vec<Todo>;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(&self, todos: &mut Vec<Todo>, action: &TodoAction, _env: &TodoEnvironment) {
        match action {
            TodoAction::Create { id, desc } => {
                todos.push(Todo::new(id.clone(), desc.clone()));
            }
            TodoAction::Edit { id, desc } => {
                for todo in matching(todos, id) {
                    todo.desc.clone_from(desc);
                }
            }
            TodoAction::Toggle { id, is_complete } => {
                for todo in matching(todos, id) {
                    todo.is_complete = *is_complete;
                }
            }
            // First match only, unlike edit and toggle
            TodoAction::Remove { id } => {
                if let Some(index) = todos.iter().position(|t| &t.id == id) {
                    todos.remove(index);
                }
            }
            TodoAction::Select { .. } => {}
        }
    }
}

fn matching<'a>(todos: &'a mut [Todo], id: &'a TodoId) -> impl Iterator<Item = &'a mut Todo> {
    todos.iter_mut().filter(move |t| &t.id == id)
}

/// Reducer for the selected-todo slice
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectedTodoReducer;

impl Reducer for SelectedTodoReducer {
    type State = Option<TodoId>;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(&self, selected: &mut Option<TodoId>, action: &TodoAction, _env: &TodoEnvironment) {
        if let TodoAction::Select { id } = action {
            *selected = Some(id.clone());
        }
    }
}

/// Reducer for the activity counter
///
/// Counts every create, edit, toggle and remove, whether or not it matched
/// anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = u64;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(&self, counter: &mut u64, action: &TodoAction, _env: &TodoEnvironment) {
        if action.counts_as_activity() {
            *counter = counter.saturating_add(1);
        }
    }
}

/// The aggregate reducer over [`AppState`]
pub type AppReducer = CombinedReducer<AppState, TodoAction, TodoEnvironment>;

/// Combines the three slice reducers into the aggregate reducer
#[must_use]
pub fn app_reducer() -> AppReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(
            TodosReducer,
            |s: &mut AppState| &mut s.todos,
        )),
        Box::new(scope_reducer(
            SelectedTodoReducer,
            |s: &mut AppState| &mut s.selected_todo,
        )),
        Box::new(scope_reducer(
            CounterReducer,
            |s: &mut AppState| &mut s.counter,
        )),
    ])
}
