//! # Todo Redux Runtime
//!
//! Runtime implementation for the todo-redux state container.
//!
//! This crate provides the Store runtime that owns the aggregate state,
//! applies actions through the reducer and notifies observers.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state and is its only writer
//! - **Middleware**: Observers wrapped around every dispatch (logging, inspection)
//! - **Subscriptions**: Every applied [`Transition`] is broadcast to subscribers
//!
//! ## Example
//!
//! ```ignore
//! use todo_redux_runtime::{LoggingMiddleware, Store};
//!
//! let store = Store::builder(initial_state, my_reducer, environment)
//!     .middleware(LoggingMiddleware::new())
//!     .build();
//!
//! // Send an action, get the new state back
//! let next = store.send(Action::DoSomething).await;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;

/// Inspection middleware with bounded action/state history
pub mod devtools;

/// Prometheus metrics for observability
pub mod metrics;

/// Middleware hooks run around each dispatch
pub mod middleware;

pub use devtools::{DevTools, HistoryEntry};
pub use error::StoreError;
pub use middleware::{LoggingMiddleware, Middleware};
pub use store::{Store, StoreBuilder, Subscription};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur around Store operations
    ///
    /// Dispatching itself never fails; these cover observers and inspection.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// A subscriber fell behind and missed transitions
        ///
        /// The subscription stays usable and continues with the oldest
        /// transition still buffered.
        #[error("Subscriber lagged, {0} transitions skipped")]
        Lagged(u64),

        /// The store was dropped and no more transitions will arrive
        #[error("Store closed")]
        Closed,

        /// Requested history entry is not retained
        #[error("No history entry at position {index} (history holds {len})")]
        HistoryOutOfRange {
            /// Requested position
            index: usize,
            /// Number of retained entries
            len: usize,
        },

        /// History could not be serialized
        #[error("Failed to export history: {0}")]
        Export(#[from] serde_json::Error),
    }
}

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_redux_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_broadcast_capacity(256);
/// assert_eq!(config.broadcast_capacity, 256);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Number of transitions buffered for slow subscribers
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(broadcast_capacity: usize) -> Self {
        Self { broadcast_capacity }
    }

    /// Set the broadcast capacity
    ///
    /// Values below 1 are raised to 1.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
        }
    }
}

/// One applied action together with the states on either side of it
///
/// `previous` and `next` are distinct allocations: the store never mutates a
/// state that has been handed out, so `Arc::ptr_eq(&t.previous, &t.next)` is
/// always false and `previous` still holds exactly what it held before.
#[derive(Debug)]
pub struct Transition<S, A> {
    /// 1-based position of this action in the store's dispatch order
    pub sequence: u64,
    /// The action that was applied
    pub action: A,
    /// State before the action
    pub previous: Arc<S>,
    /// State after the action
    pub next: Arc<S>,
}

impl<S, A: Clone> Clone for Transition<S, A> {
    fn clone(&self) -> Self {
        Self {
            sequence: self.sequence,
            action: self.action.clone(),
            previous: Arc::clone(&self.previous),
            next: Arc::clone(&self.next),
        }
    }
}

/// Store runtime for coordinating reducer execution and observers.
pub mod store {
    use super::{Arc, Middleware, StoreConfig, StoreError, Transition};
    use std::time::Instant;
    use todo_redux_core::{action::ActionType, reducer::Reducer};
    use tokio::sync::{broadcast, watch, RwLock};

    /// State slot guarded by the store lock
    struct Current<S> {
        state: Arc<S>,
        sequence: u64,
    }

    struct Inner<S, A, E, R> {
        current: RwLock<Current<S>>,
        reducer: R,
        environment: E,
        middleware: Vec<Arc<dyn Middleware<S, A>>>,
        transitions: broadcast::Sender<Transition<S, A>>,
        latest: watch::Sender<Arc<S>>,
    }

    /// The Store - runtime owner of the aggregate state
    ///
    /// The Store manages:
    /// 1. State (an `Arc<S>` behind an `RwLock`, replaced on every action)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Middleware and subscribers (observers)
    ///
    /// Cloning a `Store` is cheap and yields another handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        inner: Arc<Inner<S, A, E, R>>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                inner: Arc::clone(&self.inner),
            }
        }
    }

    /// Builder for [`Store`]
    ///
    /// Middleware can only be attached here, before the store is shared.
    pub struct StoreBuilder<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        initial_state: S,
        reducer: R,
        environment: E,
        config: StoreConfig,
        middleware: Vec<Arc<dyn Middleware<S, A>>>,
    }

    impl<S, A, E, R> StoreBuilder<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: ActionType + Clone + Send + Sync + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Replace the configuration
        #[must_use]
        pub fn config(mut self, config: StoreConfig) -> Self {
            self.config = config;
            self
        }

        /// Append a middleware; middleware run in the order they were added
        #[must_use]
        pub fn middleware<M>(mut self, middleware: M) -> Self
        where
            M: Middleware<S, A> + 'static,
        {
            self.middleware.push(Arc::new(middleware));
            self
        }

        /// Build the store
        #[must_use]
        pub fn build(self) -> Store<S, A, E, R> {
            let initial = Arc::new(self.initial_state);
            let (transitions, _) = broadcast::channel(self.config.broadcast_capacity.max(1));
            let (latest, _) = watch::channel(Arc::clone(&initial));

            tracing::debug!(
                middleware = self.middleware.len(),
                broadcast_capacity = self.config.broadcast_capacity,
                "Store created"
            );

            Store {
                inner: Arc::new(Inner {
                    current: RwLock::new(Current {
                        state: initial,
                        sequence: 0,
                    }),
                    reducer: self.reducer,
                    environment: self.environment,
                    middleware: self.middleware,
                    transitions,
                    latest,
                }),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: ActionType + Clone + Send + Sync + 'static,
        S: Clone + Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses the default [`StoreConfig`] and no middleware.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::builder(initial_state, reducer, environment).build()
        }

        /// Create a new Store with custom configuration and no middleware
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            Self::builder(initial_state, reducer, environment)
                .config(config)
                .build()
        }

        /// Start building a store
        #[must_use]
        pub fn builder(initial_state: S, reducer: R, environment: E) -> StoreBuilder<S, A, E, R> {
            StoreBuilder {
                initial_state,
                reducer,
                environment,
                config: StoreConfig::default(),
                middleware: Vec::new(),
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Runs every middleware's `before_reduce`
        /// 3. Clones the current state into a draft and reduces the draft
        /// 4. Publishes the draft as the new state
        /// 5. Runs every middleware's `after_reduce`, then notifies subscribers
        ///
        /// Concurrent `send()` calls serialize on the lock, so transitions are
        /// observed in exactly the order they were applied.
        ///
        /// # Returns
        ///
        /// The new state.
        ///
        /// # Panics
        ///
        /// If the reducer panics, the panic propagates to the caller.
        #[tracing::instrument(skip(self, action), fields(action_type = action.action_type()), name = "store_send")]
        pub async fn send(&self, action: A) -> Arc<S> {
            let inner = &*self.inner;
            let action_type = action.action_type();

            let mut current = inner.current.write().await;
            tracing::trace!("Acquired write lock on state");

            for middleware in &inner.middleware {
                middleware.before_reduce(&action, &current.state);
            }

            let next = {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = Instant::now();
                let mut draft = S::clone(&current.state);
                inner.reducer.reduce(&mut draft, &action, &inner.environment);
                let duration = start.elapsed();

                metrics::histogram!("store_reducer_duration_seconds").record(duration.as_secs_f64());
                metrics::counter!("store_actions_dispatched_total", "action_type" => action_type)
                    .increment(1);

                Arc::new(draft)
            };

            let previous = std::mem::replace(&mut current.state, Arc::clone(&next));
            current.sequence += 1;

            let transition = Transition {
                sequence: current.sequence,
                action,
                previous,
                next: Arc::clone(&next),
            };

            for middleware in &inner.middleware {
                middleware.after_reduce(&transition);
            }

            inner.latest.send_replace(Arc::clone(&next));

            if inner.transitions.send(transition).is_err() {
                tracing::trace!("No subscribers for transition");
            }

            tracing::debug!(sequence = current.sequence, "Action processing completed");

            next
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let todo_count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let current = self.inner.current.read().await;
            f(&current.state)
        }

        /// Current state as a shared, immutable snapshot
        pub async fn snapshot(&self) -> Arc<S> {
            Arc::clone(&self.inner.current.read().await.state)
        }

        /// Number of actions applied so far
        pub async fn dispatched(&self) -> u64 {
            self.inner.current.read().await.sequence
        }

        /// Subscribe to every transition applied after this call
        ///
        /// Subscribers are notified after middleware, in dispatch order.
        #[must_use]
        pub fn subscribe(&self) -> Subscription<S, A> {
            Subscription {
                receiver: self.inner.transitions.subscribe(),
            }
        }

        /// Watch the latest state
        ///
        /// Unlike [`Store::subscribe`], intermediate states may be skipped; the
        /// receiver always yields the most recent one.
        #[must_use]
        pub fn watch(&self) -> watch::Receiver<Arc<S>> {
            self.inner.latest.subscribe()
        }

        /// Access the environment the reducer runs with
        #[must_use]
        pub fn environment(&self) -> &E {
            &self.inner.environment
        }
    }

    /// Receiving end of [`Store::subscribe`]
    pub struct Subscription<S, A> {
        receiver: broadcast::Receiver<Transition<S, A>>,
    }

    impl<S, A: Clone> Subscription<S, A> {
        /// Wait for the next transition
        ///
        /// # Errors
        ///
        /// - [`StoreError::Lagged`] if transitions were dropped because this
        ///   subscriber fell behind; the next call continues with newer ones
        /// - [`StoreError::Closed`] once the store is gone
        pub async fn recv(&mut self) -> Result<Transition<S, A>, StoreError> {
            match self.receiver.recv().await {
                Ok(transition) => Ok(transition),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Store subscriber lagged");
                    Err(StoreError::Lagged(skipped))
                },
                Err(broadcast::error::RecvError::Closed) => Err(StoreError::Closed),
            }
        }

        /// Take the next buffered transition without waiting
        ///
        /// Returns `Ok(None)` when nothing is buffered.
        ///
        /// # Errors
        ///
        /// Same as [`Subscription::recv`].
        pub fn try_recv(&mut self) -> Result<Option<Transition<S, A>>, StoreError> {
            match self.receiver.try_recv() {
                Ok(transition) => Ok(Some(transition)),
                Err(broadcast::error::TryRecvError::Empty) => Ok(None),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => Err(StoreError::Lagged(skipped)),
                Err(broadcast::error::TryRecvError::Closed) => Err(StoreError::Closed),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use todo_redux_core::reducer::Reducer;
    use todo_redux_macros::Action;

    #[derive(Clone, Debug, PartialEq, Default)]
    struct TestState {
        count: u32,
        log: Vec<String>,
    }

    #[derive(Action, Clone, Debug, PartialEq)]
    #[action(slice = "test")]
    enum TestAction {
        Increment,
        Note(String),
    }

    struct TestReducer;

    impl Reducer for TestReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(&self, state: &mut Self::State, action: &Self::Action, _env: &Self::Environment) {
            match action {
                TestAction::Increment => state.count += 1,
                TestAction::Note(note) => state.log.push(note.clone()),
            }
        }
    }

    #[tokio::test]
    async fn send_returns_new_state_and_keeps_previous() {
        let store = Store::new(TestState::default(), TestReducer, ());
        let before = store.snapshot().await;

        let after = store.send(TestAction::Increment).await;

        assert_eq!(before.count, 0);
        assert_eq!(after.count, 1);
        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &store.snapshot().await));
    }

    #[tokio::test]
    async fn state_reads_through_closure() {
        let store = Store::new(TestState::default(), TestReducer, ());
        store.send(TestAction::Note("a".to_string())).await;

        let log = store.state(|s| s.log.clone()).await;
        assert_eq!(log, vec!["a".to_string()]);
        assert_eq!(store.dispatched().await, 1);
    }

    #[tokio::test]
    async fn subscribers_see_transitions_in_order() {
        let store = Store::new(TestState::default(), TestReducer, ());
        let mut subscription = store.subscribe();

        store.send(TestAction::Increment).await;
        store.send(TestAction::Note("x".to_string())).await;

        let first = subscription.recv().await.unwrap();
        assert_eq!(first.sequence, 1);
        assert_eq!(first.action, TestAction::Increment);
        assert_eq!(first.previous.count, 0);
        assert_eq!(first.next.count, 1);

        let second = subscription.recv().await.unwrap();
        assert_eq!(second.sequence, 2);
        assert!(Arc::ptr_eq(&first.next, &second.previous));

        assert!(subscription.try_recv().unwrap().is_none());
    }

    #[tokio::test]
    async fn slow_subscriber_reports_lag() {
        let store = Store::with_config(TestState::default(), TestReducer, (), StoreConfig::new(2));
        let mut subscription = store.subscribe();

        for _ in 0..5 {
            store.send(TestAction::Increment).await;
        }

        assert!(matches!(subscription.recv().await, Err(StoreError::Lagged(3))));
        assert_eq!(subscription.recv().await.unwrap().sequence, 4);
    }

    #[tokio::test]
    async fn subscription_closes_with_store() {
        let store = Store::new(TestState::default(), TestReducer, ());
        let mut subscription = store.subscribe();
        drop(store);

        assert!(matches!(subscription.recv().await, Err(StoreError::Closed)));
    }

    #[tokio::test]
    async fn watch_yields_latest_state() {
        let store = Store::new(TestState::default(), TestReducer, ());
        let mut watcher = store.watch();

        store.send(TestAction::Increment).await;
        store.send(TestAction::Increment).await;

        watcher.changed().await.unwrap();
        assert_eq!(watcher.borrow_and_update().count, 2);
    }

    #[tokio::test]
    async fn concurrent_sends_serialize() {
        let store = Store::new(TestState::default(), TestReducer, ());

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store.send(TestAction::Increment).await;
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.state(|s| s.count).await, 10);
        assert_eq!(store.dispatched().await, 10);
    }

    #[test]
    fn broadcast_capacity_never_zero() {
        assert_eq!(StoreConfig::default().with_broadcast_capacity(0).broadcast_capacity, 1);
    }

    #[test]
    fn transition_clone_shares_states() {
        let state = Arc::new(TestState::default());
        let transition = Transition {
            sequence: 1,
            action: TestAction::Increment,
            previous: Arc::clone(&state),
            next: Arc::clone(&state),
        };
        let copy = transition.clone();
        assert!(Arc::ptr_eq(&copy.previous, &transition.previous));
    }
}
