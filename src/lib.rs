//! # Stockroom
//!
//! An embedded store for a personal inventory: one durable collection of
//! items, a single serialized mutation path, and per-screen snapshot
//! state that stays consistent without screens coordinating.
//!
//! ## Core Concepts
//!
//! - **Items**: Records with a stable id, a free-form name, and an
//!   optional device-local image URI
//! - **Repository**: The sole mutation path; every create, update, and
//!   delete is a full read-modify-write of the persisted collection
//! - **Screens**: Locally cached snapshots, re-pulled on activation and
//!   after each mutation
//! - **Subscriptions**: Bounded change-event channels for noticing that
//!   another screen changed the inventory
//!
//! ## Example
//!
//! ```ignore
//! use stockroom::{ItemDraft, Repository, ScreenState, StoreConfig};
//!
//! let repository = Arc::new(Repository::open_or_create(StoreConfig {
//!     path: "./my-inventory".into(),
//!     ..Default::default()
//! })?);
//!
//! // A screen pulls its snapshot and saves a new item
//! let mut screen = ScreenState::attach(Arc::clone(&repository));
//! screen.activate();
//! screen.save(ItemDraft::new("Kettle").with_image("file:///kettle.jpg"))?;
//! ```

pub mod error;
pub mod mutations;
pub mod repository;
pub mod screens;
pub mod storage;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, StoreError};
pub use repository::{Repository, StoreConfig};
pub use screens::{PickerOutcome, ScreenPhase, ScreenState};
pub use storage::ItemStore;
pub use subscriptions::{
    DropReason, InventoryEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
    SubscriptionManager,
};
pub use types::*;
