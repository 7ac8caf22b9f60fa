//! # Todo Redux Core
//!
//! Core traits and types for the todo-redux state container.
//!
//! This crate provides the fundamental abstractions for building a
//! Redux-style state container in Rust:
//!
//! ## Core Concepts
//!
//! - **State**: Plain owned data, `Clone`-able, replaced wholesale on each action
//! - **Action**: A description of an intended state change
//! - **Reducer**: Pure function `(State, Action, Environment) → State`
//! - **Slice**: One independently-updated field of a larger state
//! - **Environment**: Injected dependencies (id generation, time)
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Previous states are never mutated, only replaced
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```
//! use todo_redux_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct CounterState {
//!     count: u64,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: &CounterAction, _env: &()) {
//!         match action {
//!             CounterAction::Increment => state.count += 1,
//!             CounterAction::Reset => state.count = 0,
//!         }
//!     }
//! }
//!
//! let before = CounterState::default();
//! let after = CounterReducer.apply(&before, &CounterAction::Increment, &());
//! assert_eq!(before.count, 0);
//! assert_eq!(after.count, 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Composition of reducers (`combine_reducers`, `scope_reducer`)
pub mod composition;

/// Action module - naming helpers shared by logging and inspection
///
/// Actions are plain enums. The only thing the runtime needs to know about
/// them beyond `Clone`/`Debug` is a stable, human-readable type name such as
/// `todos/create`, which is what [`ActionType`](action::ActionType) exposes.
/// It is normally implemented with `#[derive(Action)]` from `todo-redux-macros`.
pub mod action {
    /// Stable type name of an action.
    ///
    /// # Example
    ///
    /// ```
    /// use todo_redux_core::action::ActionType;
    ///
    /// enum Ping {
    ///     Sent,
    /// }
    ///
    /// impl ActionType for Ping {
    ///     fn action_type(&self) -> &'static str {
    ///         "network/sent"
    ///     }
    ///
    ///     fn slice(&self) -> Option<&'static str> {
    ///         Some("network")
    ///     }
    /// }
    ///
    /// assert_eq!(Ping::Sent.action_type(), "network/sent");
    /// ```
    pub trait ActionType {
        /// Slice-qualified name of this action, e.g. `todos/create`
        fn action_type(&self) -> &'static str;

        /// Name of the slice that owns this action, if any
        fn slice(&self) -> Option<&'static str>;
    }
}

/// Reducer module - the core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → State`.
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// `reduce` receives a *draft*: a private copy of the state that nobody
    /// else can observe. Callers that hold the previous value keep it intact.
    /// [`Reducer::apply`] packages that contract as a plain function.
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into the draft state
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to the draft state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: &Self::Action,
            env: &Self::Environment,
        );

        /// Produce a new state from `state` and `action`
        ///
        /// The input is left untouched; the returned value is a fresh state
        /// with the action applied.
        #[must_use]
        fn apply(
            &self,
            state: &Self::State,
            action: &Self::Action,
            env: &Self::Environment,
        ) -> Self::State
        where
            Self::State: Clone,
        {
            let mut draft = state.clone();
            self.reduce(&mut draft, action, env);
            draft
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external collaborators are abstracted behind traits and injected
/// via the Environment parameter or the action creators that need them.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of opaque, unique identifiers
    ///
    /// # Examples
    ///
    /// ```
    /// use todo_redux_core::environment::{IdGenerator, UuidGenerator};
    ///
    /// let ids = UuidGenerator;
    /// assert_ne!(ids.next_id(), ids.next_id());
    /// ```
    pub trait IdGenerator: Send + Sync {
        /// Produce a new identifier, distinct from every earlier one
        fn next_id(&self) -> String;
    }

    /// Production id generator producing random v4 UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct UuidGenerator;

    impl IdGenerator for UuidGenerator {
        fn next_id(&self) -> String {
            uuid::Uuid::new_v4().to_string()
        }
    }
}
