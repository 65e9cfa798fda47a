//! Pure list operations.
//!
//! Every operation reads the current list and returns `Some(new_list)` when it
//! changes something, or `None` when it is a no-op. The input is never
//! mutated, and nothing here fails: an unknown id is simply a no-op.

use crate::seed::SeedRecord;
use crate::types::{Counts, Item, ItemId};

/// Append an open item with the trimmed `raw_text`
///
/// Blank text is a no-op.
#[must_use]
pub fn add(items: &[Item], id: ItemId, raw_text: &str) -> Option<Vec<Item>> {
    let text = raw_text.trim();
    if text.is_empty() {
        return None;
    }

    let mut next = Vec::with_capacity(items.len() + 1);
    next.extend_from_slice(items);
    next.push(Item::new(id, text.to_string()));
    Some(next)
}

/// Invert the completed flag of the item with `id`
#[must_use]
pub fn toggle(items: &[Item], id: ItemId) -> Option<Vec<Item>> {
    let index = position(items, id)?;
    let mut next = items.to_vec();
    next[index].completed = !next[index].completed;
    Some(next)
}

/// Remove the item with `id`
#[must_use]
pub fn delete(items: &[Item], id: ItemId) -> Option<Vec<Item>> {
    let index = position(items, id)?;
    let mut next = items.to_vec();
    next.remove(index);
    Some(next)
}

/// Replace the text of the item with `id` by the trimmed `new_text`
///
/// Blank text abandons the edit and the old text stays. Text equal to the
/// current one is a no-op as well.
#[must_use]
pub fn edit(items: &[Item], id: ItemId, new_text: &str) -> Option<Vec<Item>> {
    let text = new_text.trim();
    if text.is_empty() {
        return None;
    }

    let index = position(items, id)?;
    if items[index].text == text {
        return None;
    }

    let mut next = items.to_vec();
    next[index].text = text.to_string();
    Some(next)
}

/// Total, active and completed counts
#[must_use]
pub fn counts(items: &[Item]) -> Counts {
    let completed = items.iter().filter(|i| i.completed).count();
    Counts {
        total: items.len(),
        active: items.len() - completed,
        completed,
    }
}

/// Map fetched records to open items with ids `first_id, first_id + 1, ...`
///
/// The record's own identifier is kept as `source_id` only.
#[must_use]
pub fn from_seed(records: Vec<SeedRecord>, first_id: u64) -> Vec<Item> {
    records
        .into_iter()
        .zip(first_id..)
        .map(|(record, id)| Item {
            id: ItemId::new(id),
            text: record.name,
            completed: false,
            source_id: Some(record.id),
        })
        .collect()
}

fn position(items: &[Item], id: ItemId) -> Option<usize> {
    items.iter().position(|i| i.id == id)
}
