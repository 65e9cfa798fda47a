//! Terminal front end for the todo list.
//!
//! Reads commands from stdin, sends them to the store and redraws the list.
//! The seed fetch runs in the background; its result triggers a redraw too.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use venus_runtime::Store;
use venus_todo::config::DEFAULT_LOG_FILTER;
use venus_todo::view::{self, Command};
use venus_todo::{Config, HttpSeedSource, TodoEnvironment, TodoReducer, TodoState, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);

    let seed_source = HttpSeedSource::new(config.seed.url.clone());
    let env = TodoEnvironment::new(Arc::new(seed_source));
    let store: TodoStore = Store::new(TodoState::new(), TodoReducer::new(), env);

    // Subscribe before starting the seed so its result is not missed
    let mut effect_actions = store.subscribe_actions();

    if config.seed.enabled {
        store.send(venus_todo::TodoAction::StartSeed).await?;
    } else {
        info!("Seed fetch disabled");
    }

    redraw(&store).await;
    println!("{}", view::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Dispatch(action)) => {
                        store.send(action).await?;
                        redraw(&store).await;
                    }
                    Ok(Command::List) => redraw(&store).await,
                    Ok(Command::Help) => println!("{}", view::HELP),
                    Ok(Command::Quit) => break,
                    Err(e) => println!("{e}"),
                }
            }
            action = effect_actions.recv() => {
                match action {
                    Ok(_) | Err(RecvError::Lagged(_)) => redraw(&store).await,
                    // The store owns the sender, so this only happens on teardown
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    if let Err(e) = store.shutdown(config.shutdown_timeout()).await {
        warn!(error = %e, "Exiting with the seed fetch still in flight");
    }

    Ok(())
}

async fn redraw(store: &TodoStore) {
    let screen = store.state(view::render).await;
    print!("\n{screen}");
}

/// Initialize tracing on stderr so stdout stays the UI
fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
