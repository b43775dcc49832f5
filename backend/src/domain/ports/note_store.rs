//! Driving port for note use-cases.
//!
//! Inbound adapters call this to read and mutate notes without knowing about
//! replicas, timeouts, or the outage flag; handler tests substitute a mock.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::identity::Identity;
use crate::domain::note::{Note, NoteContent, NoteId};

/// Domain use-case port for the note collection pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes from the active read target, newest first.
    async fn list_notes(&self) -> Result<Vec<Note>, Error>;

    /// One note by id from the active read target.
    async fn find_note(&self, id: NoteId) -> Result<Option<Note>, Error>;

    /// Allocate an id and write the note to both collections.
    async fn create_note(&self, content: NoteContent, author: &Identity) -> Result<Note, Error>;

    /// Delete the note from both collections; `NotFound` when the active read
    /// target has no such note.
    async fn delete_note(&self, id: NoteId) -> Result<(), Error>;

    /// Flip the outage flag, returning the new state (`true` = fallback reads).
    fn toggle_outage(&self) -> bool;

    /// Current outage flag state.
    fn outage_active(&self) -> bool;

    /// Probe the active read target.
    async fn ping(&self) -> Result<(), Error>;
}
