//! Snapshot state backing a single screen.

use crate::error::Result;
use crate::repository::Repository;
use crate::subscriptions::{InventoryEvent, SubscriptionConfig, SubscriptionHandle};
use crate::types::{Item, ItemDraft, ItemId};
use crossbeam_channel::TryRecvError;
use std::sync::Arc;
use tracing::debug;

/// Where a screen is in its load cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenPhase {
    /// No snapshot pulled yet.
    Loading,
    /// A snapshot is available for rendering.
    Ready,
}

/// Locally-owned view state for one screen.
///
/// Holds the screen's snapshot of the inventory and forwards mutation
/// intents to the repository. The snapshot is refreshed when the screen
/// becomes active and after each mutation issued here; it is never
/// patched in place from events. There is no error phase: a failed
/// operation leaves the last-good snapshot in place, so the screen
/// always has something to render.
pub struct ScreenState {
    repository: Arc<Repository>,
    subscription: SubscriptionHandle,
    items: Vec<Item>,
    phase: ScreenPhase,
}

impl ScreenState {
    /// Attach a new screen to the repository.
    ///
    /// The screen starts in `Loading` with an empty snapshot; call
    /// [`activate`](Self::activate) when it becomes visible.
    pub fn attach(repository: Arc<Repository>) -> Self {
        let subscription = repository.subscribe(SubscriptionConfig::default());
        Self {
            repository,
            subscription,
            items: Vec::new(),
            phase: ScreenPhase::Loading,
        }
    }

    /// The screen became active (entered, or returned to from another
    /// screen). Pulls a fresh snapshot.
    pub fn activate(&mut self) {
        self.refresh();
    }

    /// Re-pull the snapshot from the repository.
    pub fn refresh(&mut self) {
        self.drain_events();
        self.items = self.repository.list();
        self.phase = ScreenPhase::Ready;
        debug!(items = self.items.len(), "screen snapshot refreshed");
    }

    /// The current snapshot, for rendering.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Current phase.
    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    /// Whether the inventory has changed behind this snapshot (another
    /// screen mutated it since the last refresh).
    pub fn stale(&self) -> bool {
        self.subscription.has_pending()
    }

    /// Save a draft: create when it has no id, update otherwise. The
    /// snapshot is refreshed after a successful save.
    ///
    /// Returns the item as persisted, or `None` when an update targeted
    /// an id that no longer exists (the item was deleted from another
    /// screen; saving it does not resurrect it).
    pub fn save(&mut self, draft: ItemDraft) -> Result<Option<Item>> {
        let saved = match draft.id.clone() {
            None => Some(self.repository.create(draft)?),
            Some(id) => {
                let item = Item {
                    id,
                    name: draft.name,
                    image: draft.image,
                };
                if self.repository.update(item.clone())? {
                    Some(item)
                } else {
                    None
                }
            }
        };

        self.refresh();
        Ok(saved)
    }

    /// Delete an item. The snapshot is refreshed after a successful
    /// delete; deleting an already-gone id still succeeds.
    pub fn delete(&mut self, id: &ItemId) -> Result<()> {
        self.repository.delete(id)?;
        self.refresh();
        Ok(())
    }

    /// Drain pending change events. A subscription that lapsed (buffer
    /// overflow, channel gone) is replaced so staleness tracking keeps
    /// working; the snapshot re-pull that follows covers anything the
    /// lapsed subscription missed.
    fn drain_events(&mut self) {
        let mut lapsed = false;
        loop {
            match self.subscription.try_recv() {
                Ok(InventoryEvent::Dropped { .. }) => lapsed = true,
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    lapsed = true;
                    break;
                }
            }
        }

        if lapsed {
            debug!("subscription lapsed, resubscribing");
            self.subscription = self.repository.subscribe(SubscriptionConfig::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::StoreConfig;
    use tempfile::TempDir;

    fn test_repository(dir: &TempDir) -> Arc<Repository> {
        Arc::new(
            Repository::create_store(StoreConfig {
                path: dir.path().join("store"),
                key: "inventory".to_string(),
                create_if_missing: true,
            })
            .unwrap(),
        )
    }

    #[test]
    fn test_attach_starts_loading() {
        let dir = TempDir::new().unwrap();
        let screen = ScreenState::attach(test_repository(&dir));

        assert_eq!(screen.phase(), ScreenPhase::Loading);
        assert!(screen.items().is_empty());
    }

    #[test]
    fn test_activate_pulls_snapshot() {
        let dir = TempDir::new().unwrap();
        let repo = test_repository(&dir);
        repo.create(ItemDraft::new("Kettle")).unwrap();

        let mut screen = ScreenState::attach(repo);
        screen.activate();

        assert_eq!(screen.phase(), ScreenPhase::Ready);
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.items()[0].name, "Kettle");
    }

    #[test]
    fn test_save_new_item_appears_in_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut screen = ScreenState::attach(test_repository(&dir));
        screen.activate();

        let saved = screen
            .save(ItemDraft::new("Kettle").with_image("file:///kettle.jpg"))
            .unwrap()
            .unwrap();

        assert_eq!(screen.items(), &[saved]);
    }

    #[test]
    fn test_save_existing_updates_wholesale() {
        let dir = TempDir::new().unwrap();
        let mut screen = ScreenState::attach(test_repository(&dir));
        screen.activate();

        let item = screen.save(ItemDraft::new("Kettle")).unwrap().unwrap();

        let mut draft = ItemDraft::from_item(&item);
        draft.name = "Electric kettle".into();
        let updated = screen.save(draft).unwrap().unwrap();

        assert_eq!(updated.id, item.id);
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.items()[0].name, "Electric kettle");
    }

    #[test]
    fn test_save_after_remote_delete_returns_none() {
        let dir = TempDir::new().unwrap();
        let repo = test_repository(&dir);

        let mut detail = ScreenState::attach(Arc::clone(&repo));
        detail.activate();
        let item = detail.save(ItemDraft::new("Kettle")).unwrap().unwrap();

        // Another screen deletes the item while the detail screen still
        // holds a draft for it.
        let mut list = ScreenState::attach(Arc::clone(&repo));
        list.activate();
        list.delete(&item.id).unwrap();

        let saved = detail.save(ItemDraft::from_item(&item)).unwrap();
        assert_eq!(saved, None);
        assert!(detail.items().is_empty());
    }

    #[test]
    fn test_delete_refreshes_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut screen = ScreenState::attach(test_repository(&dir));
        screen.activate();

        let item = screen.save(ItemDraft::new("Kettle")).unwrap().unwrap();
        screen.delete(&item.id).unwrap();

        assert!(screen.items().is_empty());
        assert_eq!(screen.phase(), ScreenPhase::Ready);
    }

    #[test]
    fn test_stale_after_remote_mutation() {
        let dir = TempDir::new().unwrap();
        let repo = test_repository(&dir);

        let mut screen = ScreenState::attach(Arc::clone(&repo));
        screen.activate();
        assert!(!screen.stale());

        repo.create(ItemDraft::new("Kettle")).unwrap();
        assert!(screen.stale());

        screen.refresh();
        assert!(!screen.stale());
        assert_eq!(screen.items().len(), 1);
    }

    #[test]
    fn test_refresh_heals_lapsed_subscription() {
        let dir = TempDir::new().unwrap();
        let repo = test_repository(&dir);

        let mut screen = ScreenState::attach(Arc::clone(&repo));
        screen.activate();

        // Overflow the screen's event buffer so the subscription drops.
        for i in 0..100 {
            repo.create(ItemDraft::new(format!("item {}", i))).unwrap();
        }

        screen.refresh();
        assert_eq!(screen.items().len(), 100);
        assert!(!screen.stale());

        // The replacement subscription sees new changes.
        repo.create(ItemDraft::new("one more")).unwrap();
        assert!(screen.stale());
    }
}
