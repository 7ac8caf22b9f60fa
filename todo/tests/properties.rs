//! Property tests for the aggregate reducer

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use std::sync::Arc;
use todo::{app_reducer, AppReducer, AppState, Todo, TodoAction, TodoActions, TodoEnvironment, TodoId};
use todo_redux_core::reducer::Reducer;
use todo_redux_testing::{test_clock, SequentialIdGenerator};

/// Ids `id-0` .. `id-{POOL}`; generated states use a prefix of them,
/// commands draw from the whole pool so some miss.
const POOL: usize = 12;

#[derive(Clone, Debug)]
enum Cmd {
    Create(String),
    Edit(usize, String),
    Toggle(usize, bool),
    Remove(usize),
    Select(usize),
}

fn pool_id(n: usize) -> TodoId {
    TodoId::new(format!("id-{n}"))
}

fn env() -> TodoEnvironment {
    TodoEnvironment::new(Arc::new(SequentialIdGenerator::new("new")), Arc::new(test_clock()))
}

fn to_action(actions: &TodoActions, cmd: Cmd) -> TodoAction {
    match cmd {
        Cmd::Create(desc) => actions.create(desc),
        Cmd::Edit(n, desc) => actions.edit(pool_id(n), desc),
        Cmd::Toggle(n, is_complete) => actions.toggle(pool_id(n), is_complete),
        Cmd::Remove(n) => actions.remove(pool_id(n)),
        Cmd::Select(n) => actions.select(pool_id(n)),
    }
}

fn arb_desc() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}"
}

fn arb_state() -> impl Strategy<Value = AppState> {
    (
        prop::collection::vec((arb_desc(), any::<bool>()), 0..8),
        prop::option::of(0..POOL),
        0u64..100,
    )
        .prop_map(|(items, selected, counter)| AppState {
            todos: items
                .into_iter()
                .enumerate()
                .map(|(n, (desc, is_complete))| Todo::new(pool_id(n), desc).completed(is_complete))
                .collect(),
            selected_todo: selected.map(pool_id),
            counter,
        })
}

fn arb_cmd() -> impl Strategy<Value = Cmd> {
    prop_oneof![
        arb_desc().prop_map(Cmd::Create),
        (0..POOL, arb_desc()).prop_map(|(n, desc)| Cmd::Edit(n, desc)),
        (0..POOL, any::<bool>()).prop_map(|(n, flag)| Cmd::Toggle(n, flag)),
        (0..POOL).prop_map(Cmd::Remove),
        (0..POOL).prop_map(Cmd::Select),
    ]
}

fn run(reducer: &AppReducer, env: &TodoEnvironment, state: &AppState, actions: &[TodoAction]) -> AppState {
    actions
        .iter()
        .fold(state.clone(), |state, action| reducer.apply(&state, action, env))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A create appends exactly one incomplete item with a fresh id.
    #[test]
    fn prop_create_appends_one_fresh_item(state in arb_state(), desc in arb_desc()) {
        let env = env();
        let action = env.actions().create(desc.clone());
        let new_id = action.id().clone();

        let next = app_reducer().apply(&state, &action, &env);

        prop_assert!(state.get(&new_id).is_none());
        prop_assert_eq!(next.count(), state.count() + 1);
        prop_assert_eq!(&next.todos[..state.count()], &state.todos[..]);
        prop_assert_eq!(next.todos.last().unwrap(), &Todo::new(new_id, desc));
        prop_assert_eq!(next.counter, state.counter + 1);
    }

    /// Editing an existing id changes only that item's description.
    #[test]
    fn prop_edit_changes_only_the_target(state in arb_state(), pick in any::<prop::sample::Index>(), desc in arb_desc()) {
        prop_assume!(!state.todos.is_empty());
        let target = pick.index(state.count());
        let id = state.todos[target].id.clone();

        let next = app_reducer().apply(&state, &TodoAction::Edit { id, desc: desc.clone() }, &env());

        let mut expected = state.todos.clone();
        expected[target].desc = desc;
        prop_assert_eq!(next.todos, expected);
        prop_assert_eq!(next.selected_todo, state.selected_todo);
        prop_assert_eq!(next.counter, state.counter + 1);
    }

    /// Commands naming a missing id leave the list alone but still count.
    #[test]
    fn prop_missing_id_is_counted_noop(state in arb_state(), kind in 0..3u8, flag in any::<bool>()) {
        let missing = TodoId::new("absent");
        let action = match kind {
            0 => TodoAction::Edit { id: missing, desc: "changed".into() },
            1 => TodoAction::Toggle { id: missing, is_complete: flag },
            _ => TodoAction::Remove { id: missing },
        };

        let next = app_reducer().apply(&state, &action, &env());

        prop_assert_eq!(&next.todos, &state.todos);
        prop_assert_eq!(next.counter, state.counter + 1);
    }

    /// Remove shrinks the list by one when the id is present, else by zero.
    #[test]
    fn prop_remove_drops_at_most_one(state in arb_state(), n in 0..POOL) {
        let id = pool_id(n);
        let present = state.get(&id).is_some();

        let next = app_reducer().apply(&state, &TodoAction::Remove { id: id.clone() }, &env());

        let expected_len = if present { state.count() - 1 } else { state.count() };
        prop_assert_eq!(next.count(), expected_len);
        prop_assert!(next.get(&id).is_none());
    }

    /// The counter advances once per create/edit/toggle/remove and never on select.
    #[test]
    fn prop_counter_tracks_activity(state in arb_state(), cmds in prop::collection::vec(arb_cmd(), 0..40)) {
        let env = env();
        let creators = env.actions();
        let actions: Vec<TodoAction> = cmds.into_iter().map(|cmd| to_action(&creators, cmd)).collect();
        let active = u64::try_from(actions.iter().filter(|a| a.counts_as_activity()).count()).unwrap();

        let next = run(&app_reducer(), &env, &state, &actions);

        prop_assert_eq!(next.counter, state.counter + active);
    }

    /// Applying commands never alters the state they were applied to.
    #[test]
    fn prop_input_state_is_never_mutated(state in arb_state(), cmds in prop::collection::vec(arb_cmd(), 1..20)) {
        let env = env();
        let creators = env.actions();
        let reducer = app_reducer();

        let mut current = state;
        for cmd in cmds {
            let before = current.clone();
            let next = reducer.apply(&current, &to_action(&creators, cmd), &env);
            prop_assert_eq!(&current, &before);
            current = next;
        }
    }
}
