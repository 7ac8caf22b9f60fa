//! Todo list state container.
//!
//! The application state is three independent slices: the todo list, the
//! selected todo and an activity counter. Each slice has its own reducer;
//! [`app_reducer`] combines them, and the store runtime applies commands one
//! at a time, replacing the state on every action.
//!
//! It demonstrates:
//!
//! - Slice reducers composed with `scope_reducer` and `combine_reducers`
//! - Slice-qualified action types from `#[derive(Action)]`
//! - Action creators with an injected id generator
//! - Logging and inspection middleware on the store
//! - Testing with `ReducerTest`
//!
//! # Quick Start
//!
//! ```no_run
//! use todo::{app_reducer, TodoEnvironment};
//! use todo_redux_runtime::Store;
//!
//! # async fn example() {
//! let env = TodoEnvironment::production();
//! let actions = env.actions();
//! let store = Store::new(env.initial_state(), app_reducer(), env);
//!
//! let create = actions.create("Buy milk");
//! let id = create.id().clone();
//! store.send(create).await;
//! store.send(actions.toggle(id, true)).await;
//!
//! let state = store.snapshot().await;
//! println!("Completed: {}/{}", state.completed_count(), state.count());
//! println!("Activity: {}", state.counter);
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod reducer;
pub mod types;

// Re-export commonly used types
pub use actions::{TodoAction, TodoActions};
pub use config::{AppConfig, ConfigError};
pub use reducer::{app_reducer, AppReducer, CounterReducer, SelectedTodoReducer, TodoEnvironment, TodosReducer};
pub use types::{AppState, Todo, TodoId};

/// The store type the demo binary runs
pub type TodoStore = todo_redux_runtime::Store<AppState, TodoAction, TodoEnvironment, AppReducer>;
