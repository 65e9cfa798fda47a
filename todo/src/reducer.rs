//! Reducer for the todo list.
//!
//! User commands run the pure list operations; `StartSeed` kicks off the
//! fetch effect whose result comes back as `SeedLoaded` or `SeedFailed`.

use crate::list;
use crate::seed::{SeedRecord, SeedSource};
use crate::types::{Item, SeedStatus, TodoAction, TodoState};
use std::sync::Arc;
use venus_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Source of the startup seed records
    pub seed_source: Arc<dyn SeedSource>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(seed_source: Arc<dyn SeedSource>) -> Self {
        Self { seed_source }
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Installs the result of a list operation, if it changed anything
    fn commit(state: &mut TodoState, result: Option<Vec<Item>>) {
        if let Some(items) = result {
            state.replace_items(items);
        }
    }

    /// Builds the fetch effect
    fn fetch_seed(env: &TodoEnvironment) -> Effect<TodoAction> {
        let fetch = env.seed_source.fetch();

        Effect::future(async move {
            match fetch.await {
                Ok(records) => Some(TodoAction::SeedLoaded { records }),
                Err(error) => {
                    tracing::warn!(error = %error, "Seed fetch failed");
                    Some(TodoAction::SeedFailed {
                        message: format!("Failed to load todos: {error}"),
                    })
                }
            }
        })
    }

    /// Replaces the whole list with the fetched records
    ///
    /// Anything added while the fetch was in flight is discarded.
    fn apply_seed(state: &mut TodoState, records: Vec<SeedRecord>) {
        let first_id = state.reserve_ids(records.len() as u64);
        let items = list::from_seed(records, first_id);
        state.replace_items(items);
        state.seed = SeedStatus::Populated;
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Commands ==========
            TodoAction::AddItem { text } => {
                if let Some(items) = list::add(&state.items, state.peek_id(), &text) {
                    state.reserve_ids(1);
                    state.replace_items(items);
                }
            }

            TodoAction::ToggleItem { id } => {
                let result = list::toggle(&state.items, id);
                Self::commit(state, result);
            }

            TodoAction::DeleteItem { id } => {
                let result = list::delete(&state.items, id);
                Self::commit(state, result);
            }

            TodoAction::EditItem { id, text } => {
                let result = list::edit(&state.items, id, &text);
                Self::commit(state, result);
            }

            TodoAction::StartSeed => {
                if state.seed != SeedStatus::Idle {
                    tracing::debug!(status = ?state.seed, "Seed already started, ignoring");
                    return SmallVec::new();
                }
                state.seed = SeedStatus::Loading;
                return smallvec![Self::fetch_seed(env)];
            }

            // ========== Events ==========
            TodoAction::SeedLoaded { records } => {
                if state.seed.is_loading() {
                    tracing::info!(count = records.len(), "Replacing list with seed records");
                    Self::apply_seed(state, records);
                } else {
                    tracing::debug!(status = ?state.seed, "Dropping seed result outside loading");
                }
            }

            TodoAction::SeedFailed { message } => {
                if state.seed.is_loading() {
                    state.seed = SeedStatus::Failed { message };
                } else {
                    tracing::debug!(status = ?state.seed, "Dropping seed failure outside loading");
                }
            }
        }

        SmallVec::new()
    }
}
