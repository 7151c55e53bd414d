//! Pure edits over the inventory collection.
//!
//! The repository applies exactly one of these per mutation, between a
//! full read and a full write of the persisted blob.

use crate::types::{Item, ItemId};

/// Append an item to the end of the collection.
pub fn append(mut items: Vec<Item>, item: Item) -> Vec<Item> {
    items.push(item);
    items
}

/// Replace the entry whose id matches, wholesale.
///
/// Returns the collection and whether a replacement happened. An absent
/// id leaves the collection unchanged; replace never inserts.
pub fn replace(mut items: Vec<Item>, item: Item) -> (Vec<Item>, bool) {
    match items.iter_mut().find(|existing| existing.id == item.id) {
        Some(slot) => {
            *slot = item;
            (items, true)
        }
        None => (items, false),
    }
}

/// Remove the entry whose id matches.
///
/// Returns the collection and whether an entry was removed. Removing an
/// absent id is a no-op.
pub fn remove(mut items: Vec<Item>, id: &ItemId) -> (Vec<Item>, bool) {
    let before = items.len();
    items.retain(|item| &item.id != id);
    let removed = items.len() < before;
    (items, removed)
}
