//! Per-screen view state over the repository.
//!
//! Each screen owns a [`ScreenState`]: a locally cached snapshot of the
//! inventory plus forwarding methods for the mutations the screen can
//! issue. Screens never share view state and never write the store
//! directly; consistency comes from re-pulling the snapshot when the
//! screen becomes active and after each mutation.
//!
//! The image picker lives outside the core; [`PickerOutcome`] is the
//! boundary through which its result reaches a draft.

mod picker;
mod state;

pub use picker::PickerOutcome;
pub use state::{ScreenPhase, ScreenState};
