//! Core types for the inventory store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique identifier for an inventory item.
///
/// The wire format is the decimal string of the item's creation time in
/// milliseconds since the Unix epoch. Ids are assigned by the repository
/// and never change after creation.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Timestamp> for ItemId {
    fn from(ts: Timestamp) -> Self {
        ItemId(ts.0.to_string())
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards");
        Timestamp(duration.as_millis() as i64)
    }

    /// The next distinct timestamp. Used to keep derived ids unique when
    /// two creates land on the same millisecond.
    pub fn bumped(self) -> Self {
        Timestamp(self.0 + 1)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

/// A single inventory item.
///
/// `id` is required in persisted data; `name` and `image` are defaulted
/// when absent so older or hand-edited blobs still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier (assigned by the repository).
    pub id: ItemId,

    /// User-facing name. May be empty; no validation is applied.
    #[serde(default)]
    pub name: String,

    /// Device-local photo URI, if one was attached.
    #[serde(default)]
    pub image: Option<String>,
}

/// An item being composed or edited on a screen, before it is saved.
///
/// A draft without an id becomes a new item when saved; a draft carrying
/// an id replaces the existing item wholesale.
#[derive(Clone, Debug, Default)]
pub struct ItemDraft {
    pub id: Option<ItemId>,
    pub name: String,
    pub image: Option<String>,
}

impl ItemDraft {
    /// Start a draft for a brand-new item.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            image: None,
        }
    }

    /// Start a draft pre-filled from an existing item (edit flow).
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            image: item.image.clone(),
        }
    }

    /// Attach an image URI.
    pub fn with_image(mut self, uri: impl Into<String>) -> Self {
        self.image = Some(uri.into());
        self
    }
}

/// Store statistics.
#[derive(Clone, Debug, Default)]
pub struct StoreStats {
    pub item_count: u64,
    pub blob_size_bytes: u64,
}
