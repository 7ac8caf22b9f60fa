//! Command-line demo for the todo state container.
//!
//! Runs a scripted session against a store with logging and inspection
//! middleware, printing each transition as a subscriber sees it.
//!
//! ```bash
//! TODO_LOG_STATES=1 TODO_METRICS=1 cargo run -p todo
//! ```

use anyhow::Context;
use todo::{app_reducer, AppConfig, TodoAction, TodoEnvironment, TodoStore};
use todo_redux_runtime::metrics::MetricsRecorder;
use todo_redux_runtime::{DevTools, LoggingMiddleware, Store, StoreError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::info!(?config, "Starting todo demo");

    let recorder = if config.metrics {
        Some(MetricsRecorder::install().context("failed to install metrics recorder")?)
    } else {
        None
    };

    let env = TodoEnvironment::production();
    let actions = env.actions();
    let devtools = DevTools::with_clock(env.clock.clone()).with_max_age(config.devtools_max_age);

    let store: TodoStore = Store::builder(env.initial_state(), app_reducer(), env)
        .middleware(LoggingMiddleware::new().with_states(config.log_states))
        .middleware(devtools.clone())
        .build();

    let mut subscription = store.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            match subscription.recv().await {
                Ok(transition) => {
                    println!("#{} {:?}\n{}", transition.sequence, transition.action, transition.next);
                }
                Err(StoreError::Lagged(skipped)) => {
                    println!("(skipped {skipped} transitions)");
                }
                Err(_) => break,
            }
        }
    });

    println!("=== Todo Demo ===\n");
    let initial = store.snapshot().await;
    println!("{initial}");

    let create = actions.create("Write the release notes");
    let id = create.id().clone();

    let script: Vec<TodoAction> = vec![
        create,
        actions.select(id.clone()),
        actions.edit(id.clone(), "Write and publish the release notes"),
        actions.toggle(id.clone(), true),
        actions.remove(id.clone()),
        // Nothing left to remove; still counted
        actions.remove(id),
    ];

    for action in script {
        store.send(action).await;
    }

    let final_state = store.snapshot().await;
    drop(store);
    printer.await.context("subscriber task failed")?;

    println!("\n=== Final state ===");
    println!("{final_state}");
    println!("Selected (resolved): {:?}", final_state.selected().map(|t| &t.desc));

    println!("\n=== Action log ===");
    for (i, action_type) in devtools.action_log().iter().enumerate() {
        println!("  {i}: {action_type}");
    }
    tracing::debug!(history = %devtools.export_json()?, "DevTools export");

    if let Some(recorder) = recorder {
        println!("\n=== Metrics ===\n{}", recorder.render());
    }

    Ok(())
}
