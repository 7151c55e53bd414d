//! Main Repository struct tying all components together.

use crate::error::{Result, StoreError};
use crate::mutations;
use crate::storage::ItemStore;
use crate::subscriptions::{
    SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
use crate::types::{Item, ItemDraft, ItemId, StoreStats, Timestamp};
use fs2::FileExt;
use parking_lot::Mutex;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Repository configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Base path for the store directory.
    pub path: PathBuf,

    /// Key the inventory is persisted under.
    pub key: String,

    /// Whether to create the store if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./inventory"),
            key: "inventory".to_string(),
            create_if_missing: true,
        }
    }
}

/// The inventory repository.
///
/// The sole mutation path for the persisted collection. Every mutation
/// reads the full inventory, applies one edit, and writes the full
/// inventory back; the write lock makes each cycle atomic with respect
/// to other users of this repository, so concurrent screens cannot
/// lose each other's writes.
pub struct Repository {
    /// Repository configuration.
    config: StoreConfig,

    /// Lock file for exclusive access.
    _lock_file: File,

    /// Durable key-value persistence.
    store: ItemStore,

    /// Change-event broadcast.
    subscriptions: SubscriptionManager,

    /// Lock for write operations to ensure read-modify-write atomicity.
    write_lock: Mutex<()>,
}

impl Repository {
    /// Open an existing store or create a new one.
    pub fn open_or_create(config: StoreConfig) -> Result<Self> {
        if config.path.exists() {
            Self::open(config)
        } else if config.create_if_missing {
            Self::create_store(config)
        } else {
            Err(StoreError::NotInitialized)
        }
    }

    /// Create a new store on disk; `create` is the item operation.
    pub fn create_store(config: StoreConfig) -> Result<Self> {
        let store = ItemStore::new(&config.path, config.key.clone())?;

        // Acquire lock
        let lock_file = Self::acquire_lock(&config.path)?;

        // First reads should see an empty inventory, not a missing entry
        store.initialize()?;

        debug!(path = %config.path.display(), key = %config.key, "created inventory store");

        Ok(Self {
            config,
            _lock_file: lock_file,
            store,
            subscriptions: SubscriptionManager::new(),
            write_lock: Mutex::new(()),
        })
    }

    /// Open an existing repository.
    pub fn open(config: StoreConfig) -> Result<Self> {
        if !config.path.exists() {
            return Err(StoreError::NotInitialized);
        }

        let store = ItemStore::new(&config.path, config.key.clone())?;

        // Acquire lock
        let lock_file = Self::acquire_lock(&config.path)?;

        // The directory can exist while the entry is still missing
        store.initialize()?;

        debug!(path = %config.path.display(), key = %config.key, "opened inventory store");

        Ok(Self {
            config,
            _lock_file: lock_file,
            store,
            subscriptions: SubscriptionManager::new(),
            write_lock: Mutex::new(()),
        })
    }

    // --- Inventory Operations ---

    /// Current inventory, in insertion order.
    ///
    /// Storage failures degrade to an empty collection at the store
    /// boundary, so there is always something to render.
    pub fn list(&self) -> Vec<Item> {
        self.store.read()
    }

    /// Create a new item from a draft.
    ///
    /// The repository assigns the id; any id already on the draft is
    /// ignored. Returns the item as persisted.
    pub fn create(&self, draft: ItemDraft) -> Result<Item> {
        let _lock = self.write_lock.lock();

        let items = self.store.read();

        // Ids are derived from the current time. Bump past any id that
        // is already taken so same-millisecond creates stay distinct.
        let mut ts = Timestamp::now();
        let mut id = ItemId::from(ts);
        while items.iter().any(|item| item.id == id) {
            ts = ts.bumped();
            id = ItemId::from(ts);
        }

        let item = Item {
            id,
            name: draft.name,
            image: draft.image,
        };

        let items = mutations::append(items, item.clone());
        self.store.write(&items)?;

        self.subscriptions.broadcast_created(&item);

        Ok(item)
    }

    /// Replace an existing item wholesale.
    ///
    /// Returns `Ok(false)` when no entry has the item's id; nothing is
    /// persisted in that case. Update never inserts.
    pub fn update(&self, item: Item) -> Result<bool> {
        let _lock = self.write_lock.lock();

        let items = self.store.read();
        let (items, replaced) = mutations::replace(items, item.clone());
        if !replaced {
            debug!(id = %item.id, "update for unknown id ignored");
            return Ok(false);
        }

        self.store.write(&items)?;

        self.subscriptions.broadcast_updated(&item);

        Ok(true)
    }

    /// Delete an item by id, returning the updated inventory.
    ///
    /// Deleting an id that is not present is a successful no-op.
    pub fn delete(&self, id: &ItemId) -> Result<Vec<Item>> {
        let _lock = self.write_lock.lock();

        let items = self.store.read();
        let (items, removed) = mutations::remove(items, id);
        if !removed {
            debug!(id = %id, "delete for unknown id ignored");
            return Ok(items);
        }

        self.store.write(&items)?;

        self.subscriptions.broadcast_deleted(id);

        Ok(items)
    }

    // --- Subscriptions ---

    /// Subscribe to change events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id)
    }

    /// Get subscription count.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.subscription_count()
    }

    // --- Store Operations ---

    /// Get store statistics.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            item_count: self.store.read().len() as u64,
            blob_size_bytes: self.store.entry_size(),
        }
    }

    /// Get the store path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Key the inventory is persisted under.
    pub fn key(&self) -> &str {
        &self.config.key
    }

    // --- Private Helpers ---

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_path = path.join("LOCK");
        let lock_file = File::create(lock_path)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked)?;

        Ok(lock_file)
    }
}
