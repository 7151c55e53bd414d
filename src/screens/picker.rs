//! Image picker boundary.

use crate::types::ItemDraft;
use tracing::warn;

/// Result of an image-picker request.
///
/// The picker is an external collaborator; the core only consumes its
/// outcome. Cancellation and failure are ordinary outcomes rather than
/// errors, and both leave the draft exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerOutcome {
    /// The user chose an image; carries its device-local URI.
    Selected(String),
    /// The user backed out without choosing.
    Cancelled,
    /// The picker itself failed, with its reported reason.
    Failed(String),
}

impl PickerOutcome {
    /// Apply this outcome to a draft. Only a selection changes it.
    pub fn apply_to(self, draft: &mut ItemDraft) {
        match self {
            PickerOutcome::Selected(uri) => draft.image = Some(uri),
            PickerOutcome::Cancelled => {}
            PickerOutcome::Failed(reason) => {
                warn!(reason = %reason, "image picker failed");
            }
        }
    }
}
