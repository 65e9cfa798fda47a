//! Domain types for the todo list.
//!
//! A todo list is an ordered sequence of items plus the status of the one-shot
//! seed fetch that may populate it at startup.

use crate::seed::SeedRecord;
use serde::{Deserialize, Serialize};

/// Unique identifier for a todo item
///
/// Every id comes from the counter in [`TodoState`], whether the item was typed
/// in by the user or arrived with the seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an `ItemId` from its numeric value
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Display text, trimmed when entered by the user
    pub text: String,
    /// Whether the item is done
    pub completed: bool,
    /// Identifier of the remote record this item was seeded from
    pub source_id: Option<u64>,
}

impl Item {
    /// Creates an open item entered by the user
    #[must_use]
    pub const fn new(id: ItemId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
            source_id: None,
        }
    }
}

/// Aggregate counts over a list; `active + completed == total` always holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Number of items
    pub total: usize,
    /// Items not yet completed
    pub active: usize,
    /// Completed items
    pub completed: usize,
}

/// Progress of the startup seed fetch
///
/// `Idle → Loading → Populated | Failed`. Both terminal states are final.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedStatus {
    /// Fetch not started
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// The list was replaced with the fetched records
    Populated,
    /// The fetch failed; the list was left as it was
    Failed {
        /// Human-readable description of the failure
        message: String,
    },
}

impl SeedStatus {
    /// Whether the fetch is in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure message, if the fetch failed
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// State owned by the store: the list, the id counter and the seed status
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Items in insertion order
    pub items: Vec<Item>,
    /// Next id to hand out
    pub next_id: u64,
    /// Status of the startup fetch
    pub seed: SeedStatus,
    /// Bumped every time `items` is replaced with a different list
    pub revision: u64,
}

impl Default for TodoState {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoState {
    /// Creates an empty state; the first id handed out is 1
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
            seed: SeedStatus::Idle,
            revision: 0,
        }
    }

    /// Creates a state that already holds `items`
    ///
    /// The counter starts past the largest id present, saturating at `u64::MAX`.
    #[must_use]
    pub fn with_items(items: Vec<Item>) -> Self {
        let next_id = items
            .iter()
            .map(|i| i.id.value().saturating_add(1))
            .max()
            .unwrap_or(1);
        Self {
            items,
            next_id,
            ..Self::new()
        }
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Derived counts for the current list
    #[must_use]
    pub fn counts(&self) -> Counts {
        crate::list::counts(&self.items)
    }

    /// The id the next new item will get, without consuming it
    #[must_use]
    pub const fn peek_id(&self) -> ItemId {
        ItemId::new(self.next_id)
    }

    /// Consumes `count` ids and returns the first of them
    ///
    /// The counter saturates at `u64::MAX`.
    pub(crate) fn reserve_ids(&mut self, count: u64) -> u64 {
        let first = self.next_id;
        self.next_id = self.next_id.saturating_add(count);
        first
    }

    /// Installs a new list, bumping `revision` only if it differs
    pub(crate) fn replace_items(&mut self, items: Vec<Item>) {
        if self.items != items {
            self.items = items;
            self.revision += 1;
        }
    }
}

/// Every input the todo reducer understands
///
/// Commands come from the presentation layer. The seed events are produced
/// by the fetch effect and fed back by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Append an item with the trimmed text; blank text is ignored
    AddItem {
        /// Raw text as typed
        text: String,
    },

    /// Flip the completed flag of an item
    ToggleItem {
        /// Target item
        id: ItemId,
    },

    /// Remove an item
    DeleteItem {
        /// Target item
        id: ItemId,
    },

    /// Replace an item's text; blank or unchanged text abandons the edit
    EditItem {
        /// Target item
        id: ItemId,
        /// Raw text as typed
        text: String,
    },

    /// Start the one-shot seed fetch
    StartSeed,

    // ========== Events ==========
    /// The seed fetch returned records
    SeedLoaded {
        /// Records in the order the source returned them
        records: Vec<SeedRecord>,
    },

    /// The seed fetch failed
    SeedFailed {
        /// Human-readable description of the failure
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_parses_with_or_without_hash() {
        assert_eq!("7".parse::<ItemId>().unwrap(), ItemId::new(7));
        assert_eq!(" #12 ".parse::<ItemId>().unwrap(), ItemId::new(12));
        assert!("abc".parse::<ItemId>().is_err());
        assert_eq!(ItemId::new(3).to_string(), "3");
    }

    #[test]
    fn new_item_is_open() {
        let item = Item::new(ItemId::new(1), "Buy milk".to_string());
        assert!(!item.completed);
        assert_eq!(item.source_id, None);
    }

    #[test]
    fn with_items_starts_counter_past_largest_id() {
        let state = TodoState::with_items(vec![
            Item::new(ItemId::new(4), "a".to_string()),
            Item::new(ItemId::new(9), "b".to_string()),
        ]);
        assert_eq!(state.next_id, 10);
        assert_eq!(TodoState::with_items(Vec::new()).next_id, 1);
    }

    #[test]
    fn reserve_ids_is_monotonic() {
        let mut state = TodoState::new();
        assert_eq!(state.peek_id(), ItemId::new(1));
        assert_eq!(state.reserve_ids(1), 1);
        assert_eq!(state.reserve_ids(5), 2);
        assert_eq!(state.peek_id(), ItemId::new(7));
    }

    #[test]
    fn id_counter_saturates_at_max() {
        let mut state = TodoState::with_items(vec![Item::new(
            ItemId::new(u64::MAX),
            "last".to_string(),
        )]);
        assert_eq!(state.next_id, u64::MAX);
        assert_eq!(state.reserve_ids(3), u64::MAX);
        assert_eq!(state.next_id, u64::MAX);
    }

    #[test]
    fn replace_items_bumps_revision_only_on_change() {
        let items = vec![Item::new(ItemId::new(1), "a".to_string())];
        let mut state = TodoState::with_items(items.clone());

        state.replace_items(items);
        assert_eq!(state.revision, 0);

        state.replace_items(Vec::new());
        assert_eq!(state.revision, 1);
    }

    #[test]
    fn seed_status_accessors() {
        assert!(SeedStatus::Loading.is_loading());
        assert_eq!(SeedStatus::Populated.error(), None);
        let failed = SeedStatus::Failed {
            message: "boom".to_string(),
        };
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_loading());
    }
}
