//! Subscription system for live inventory updates.
//!
//! This module provides in-process subscriptions to inventory changes:
//! creations, wholesale updates, and deletions. There are no filters;
//! the store holds a single collection, so every subscriber sees every
//! change. Buffers are bounded and slow subscribers are dropped rather
//! than ever blocking a mutation.
//!
//! Screens use this to notice that another screen changed the inventory
//! behind their snapshot; the snapshot itself is always re-pulled from
//! the repository rather than patched from events.
//!
//! # Example
//!
//! ```ignore
//! let handle = repository.subscribe(SubscriptionConfig::default());
//!
//! loop {
//!     match handle.recv() {
//!         Ok(InventoryEvent::Created { item }) => println!("new: {}", item.name),
//!         Ok(InventoryEvent::Dropped { .. }) => break,
//!         Ok(_) => {}
//!         Err(_) => break,
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, InventoryEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};
