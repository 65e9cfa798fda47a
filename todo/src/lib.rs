//! Todo list on the Venus reducer architecture.
//!
//! Items are created, toggled, edited and deleted through [`TodoAction`]
//! commands handled by [`TodoReducer`]. At startup the list may be seeded
//! once from a remote comment API; the seed replaces whatever is in the list
//! when it arrives.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use venus_runtime::Store;
//! use venus_todo::{HttpSeedSource, ItemId, TodoAction, TodoEnvironment, TodoReducer, TodoState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TodoEnvironment::new(Arc::new(HttpSeedSource::new(venus_todo::seed::DEFAULT_SEED_URL)));
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! store.send(TodoAction::AddItem { text: "Buy milk".to_string() }).await?;
//! store.send(TodoAction::ToggleItem { id: ItemId::new(1) }).await?;
//!
//! let counts = store.state(TodoState::counts).await;
//! println!("{} of {} done", counts.completed, counts.total);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod list;
pub mod reducer;
pub mod seed;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use seed::{HttpSeedSource, SeedError, SeedRecord, SeedSource};
pub use types::{Counts, Item, ItemId, SeedStatus, TodoAction, TodoState};

/// Store type used by the binary and the integration tests
pub type TodoStore = venus_runtime::Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;
