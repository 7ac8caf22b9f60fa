//! Reducer composition utilities
//!
//! This module provides utilities for composing reducers in various ways:
//! - **`combine_reducers`**: Run multiple reducers on the same state/action
//! - **`scope_reducer`**: Focus a reducer on a subset of state (a slice)
//!
//! Together they express the usual "one reducer per slice, combined into the
//! root reducer" layout.
//!
//! # Examples
//!
//! ```
//! use todo_redux_core::composition::{combine_reducers, scope_reducer};
//! use todo_redux_core::reducer::Reducer;
//!
//! #[derive(Clone, Default)]
//! struct AppState {
//!     hits: u32,
//!     last: Option<String>,
//! }
//!
//! enum AppAction {
//!     Visit(String),
//! }
//!
//! struct HitsReducer;
//! struct LastReducer;
//!
//! impl Reducer for HitsReducer {
//!     type State = u32;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut u32, _action: &AppAction, _env: &()) {
//!         *state += 1;
//!     }
//! }
//!
//! impl Reducer for LastReducer {
//!     type State = Option<String>;
//!     type Action = AppAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut Option<String>, action: &AppAction, _env: &()) {
//!         let AppAction::Visit(page) = action;
//!         *state = Some(page.clone());
//!     }
//! }
//!
//! let root = combine_reducers(vec![
//!     Box::new(scope_reducer(
//!         HitsReducer,
//!         |s: &mut AppState| &mut s.hits,
//!     )),
//!     Box::new(scope_reducer(
//!         LastReducer,
//!         |s: &mut AppState| &mut s.last,
//!     )),
//! ]);
//!
//! let state = root.apply(&AppState::default(), &AppAction::Visit("/".into()), &());
//! assert_eq!(state.hits, 1);
//! assert_eq!(state.last.as_deref(), Some("/"));
//! ```

use crate::reducer::Reducer;

/// A type-erased reducer that can be shared with the store runtime.
pub type BoxedReducer<S, A, E> = Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines multiple reducers that operate on the same state and action types.
///
/// Each reducer is run in sequence against the same draft, in the order given.
///
/// # Type Parameters
///
/// - `S`: The state type
/// - `A`: The action type
/// - `E`: The environment type
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxedReducer<S, A, E>>) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    reducers: Vec<BoxedReducer<S, A, E>>,
}

impl<S, A, E> CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    /// Number of reducers combined
    #[must_use]
    pub fn len(&self) -> usize {
        self.reducers.len()
    }

    /// Whether no reducers were combined
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reducers.is_empty()
    }
}

impl<S, A, E> std::fmt::Debug for CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("reducers", &self.reducers.len())
            .finish()
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action, env: &Self::Environment) {
        for reducer in &self.reducers {
            reducer.reduce(state, action, env);
        }
    }
}

/// Scopes a reducer to operate on a subset of a larger state.
///
/// This allows a slice reducer written against its own small state type to be
/// mounted on one field of the application state. `slice` borrows that field
/// out of the parent draft, so the slice reducer works on it in place.
///
/// # Type Parameters
///
/// - `S`: The parent state type
/// - `SubS`: The child state type (subset of `S`)
/// - `A`: The action type
/// - `E`: The environment type
pub fn scope_reducer<S, SubS, A, E, R>(
    reducer: R,
    slice: fn(&mut S) -> &mut SubS,
) -> ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    ScopedReducer {
        reducer,
        slice,
        _phantom: std::marker::PhantomData,
    }
}

/// A scoped reducer that operates on a subset of state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    reducer: R,
    slice: fn(&mut S) -> &mut SubS,
    _phantom: std::marker::PhantomData<fn(A, E)>,
}

impl<S, SubS, A, E, R> Reducer for ScopedReducer<S, SubS, A, E, R>
where
    S: 'static,
    SubS: 'static,
    A: 'static,
    E: 'static,
    R: Reducer<State = SubS, Action = A, Environment = E>,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action, env: &Self::Environment) {
        self.reducer.reduce((self.slice)(state), action, env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Inbox {
        messages: Vec<String>,
        unread: usize,
        muted: bool,
    }

    enum InboxAction {
        Receive(String),
        MarkAllRead,
        Mute(bool),
    }

    struct MessagesReducer;

    impl Reducer for MessagesReducer {
        type State = Vec<String>;
        type Action = InboxAction;
        type Environment = ();

        fn reduce(&self, messages: &mut Vec<String>, action: &InboxAction, _env: &()) {
            if let InboxAction::Receive(text) = action {
                messages.push(text.clone());
            }
        }
    }

    struct UnreadReducer;

    impl Reducer for UnreadReducer {
        type State = usize;
        type Action = InboxAction;
        type Environment = ();

        fn reduce(&self, unread: &mut usize, action: &InboxAction, _env: &()) {
            match action {
                InboxAction::Receive(_) => *unread += 1,
                InboxAction::MarkAllRead => *unread = 0,
                InboxAction::Mute(_) => {},
            }
        }
    }

    struct MutedReducer;

    impl Reducer for MutedReducer {
        type State = bool;
        type Action = InboxAction;
        type Environment = ();

        fn reduce(&self, muted: &mut bool, action: &InboxAction, _env: &()) {
            if let InboxAction::Mute(flag) = action {
                *muted = *flag;
            }
        }
    }

    fn inbox_reducer() -> CombinedReducer<Inbox, InboxAction, ()> {
        combine_reducers(vec![
            Box::new(scope_reducer(
                MessagesReducer,
                |s: &mut Inbox| &mut s.messages,
            )),
            Box::new(scope_reducer(
                UnreadReducer,
                |s: &mut Inbox| &mut s.unread,
            )),
            Box::new(scope_reducer(
                MutedReducer,
                |s: &mut Inbox| &mut s.muted,
            )),
        ])
    }

    #[test]
    fn test_every_slice_sees_every_action() {
        let reducer = inbox_reducer();
        assert_eq!(reducer.len(), 3);
        assert!(!reducer.is_empty());

        let state = reducer.apply(&Inbox::default(), &InboxAction::Receive("hi".into()), &());
        let state = reducer.apply(&state, &InboxAction::Receive("there".into()), &());

        assert_eq!(state.messages, vec!["hi", "there"]);
        assert_eq!(state.unread, 2);
        assert!(!state.muted);

        let state = reducer.apply(&state, &InboxAction::MarkAllRead, &());
        let state = reducer.apply(&state, &InboxAction::Mute(true), &());

        assert_eq!(
            state,
            Inbox {
                messages: vec!["hi".into(), "there".into()],
                unread: 0,
                muted: true,
            }
        );
    }

    #[test]
    fn test_scoped_reducer_leaves_other_fields_alone() {
        let scoped = scope_reducer(
            UnreadReducer,
            |s: &mut Inbox| &mut s.unread,
        );

        let mut state = Inbox {
            messages: vec!["kept".into()],
            unread: 4,
            muted: true,
        };
        scoped.reduce(&mut state, &InboxAction::Receive("ignored by this slice".into()), &());

        assert_eq!(state.unread, 5);
        assert_eq!(state.messages, vec!["kept"]);
        assert!(state.muted);
    }

    #[test]
    fn test_scoped_slices_are_reduced_in_place() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static CLONES: AtomicUsize = AtomicUsize::new(0);

        #[derive(Default)]
        struct Tally(u32);

        impl Clone for Tally {
            fn clone(&self) -> Self {
                CLONES.fetch_add(1, Ordering::SeqCst);
                Self(self.0)
            }
        }

        #[derive(Clone, Default)]
        struct Board {
            home: Tally,
            away: Tally,
        }

        struct Score;

        impl Reducer for Score {
            type State = Tally;
            type Action = ();
            type Environment = ();

            fn reduce(&self, tally: &mut Tally, _action: &(), _env: &()) {
                tally.0 += 1;
            }
        }

        let board = combine_reducers(vec![
            Box::new(scope_reducer(Score, |b: &mut Board| &mut b.home)),
            Box::new(scope_reducer(Score, |b: &mut Board| &mut b.away)),
        ]);

        let next = board.apply(&Board::default(), &(), &());

        // One copy per slice, made by `apply` when it drafts the parent
        assert_eq!(CLONES.load(Ordering::SeqCst), 2);
        assert_eq!((next.home.0, next.away.0), (1, 1));
    }

    #[test]
    fn test_combine_runs_in_order() {
        struct Push(char);

        impl Reducer for Push {
            type State = String;
            type Action = ();
            type Environment = ();

            fn reduce(&self, state: &mut String, _action: &(), _env: &()) {
                state.push(self.0);
            }
        }

        let combined = combine_reducers(vec![Box::new(Push('a')), Box::new(Push('b')), Box::new(Push('c'))]);
        assert_eq!(combined.apply(&String::new(), &(), &()), "abc");
        assert!(combine_reducers::<String, (), ()>(Vec::new()).is_empty());
    }
}
