//! Create and delete bookkeeping for notes.
//!
//! The controller does not call the API itself. It decides whether a
//! mutation may start, tracks what is in flight, and turns completion results
//! into notifications and an invalidation decision.

use crate::app::notify::Notification;
use crate::domain::{DomainError, ItemId, Note};
use std::collections::HashSet;

pub const NOTE_CREATED: &str = "Note created";
pub const NOTE_CREATE_FAILED: &str = "Failed to create note";
pub const NOTE_DELETED: &str = "Note deleted";
pub const NOTE_DELETE_FAILED: &str = "Failed to delete note";

/// What the caller must do after a mutation completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Invalidate every notes list entry.
    pub invalidate: bool,
    pub notification: Notification,
}

#[derive(Debug, Clone, Default)]
pub struct MutationController {
    deleting: HashSet<ItemId>,
    creating: bool,
}

impl MutationController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_creating(&self) -> bool {
        self.creating
    }

    #[must_use]
    pub fn is_deleting(&self, id: &ItemId) -> bool {
        self.deleting.contains(id)
    }

    /// Marks a create as started. Returns `false` if one is already running.
    pub fn begin_create(&mut self) -> bool {
        if self.creating {
            tracing::debug!("create refused, another is in flight");
            return false;
        }
        self.creating = true;
        true
    }

    pub fn finish_create(&mut self, result: &Result<Note, DomainError>) -> MutationOutcome {
        self.creating = false;
        match result {
            Ok(note) => {
                tracing::info!(id = %note.id, "note created");
                MutationOutcome {
                    invalidate: true,
                    notification: Notification::success(NOTE_CREATED),
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "note create failed");
                MutationOutcome {
                    invalidate: false,
                    notification: Notification::error(NOTE_CREATE_FAILED),
                }
            }
        }
    }

    /// Marks `id` as being deleted. Returns `false` if it already is.
    pub fn begin_delete(&mut self, id: &ItemId) -> bool {
        let inserted = self.deleting.insert(id.clone());
        if !inserted {
            tracing::debug!(id = %id, "delete refused, already in flight");
        }
        inserted
    }

    pub fn finish_delete(
        &mut self,
        id: &ItemId,
        result: &Result<Note, DomainError>,
    ) -> MutationOutcome {
        self.deleting.remove(id);
        match result {
            Ok(_) => {
                tracing::info!(id = %id, "note deleted");
                MutationOutcome {
                    invalidate: true,
                    notification: Notification::success(NOTE_DELETED),
                }
            }
            Err(error) => {
                tracing::warn!(id = %id, error = %error, "note delete failed");
                MutationOutcome {
                    invalidate: false,
                    notification: Notification::error(NOTE_DELETE_FAILED),
                }
            }
        }
    }
}
