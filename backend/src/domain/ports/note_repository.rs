//! Port abstraction over the two note collections and their errors.
//!
//! One adapter serves both logical collections; every operation names the
//! [`Replica`] it targets. The dual-write/fallback-read choreography lives in
//! the store service, not here — adapters stay dumb per-collection CRUD.

use async_trait::async_trait;

use crate::domain::note::{Note, NoteId};

use super::define_port_error;

/// One of the two logical note collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Replica {
    /// The collection read while the outage flag is clear.
    Primary,
    /// The standby copy read while the outage flag is set.
    Fallback,
}

impl Replica {
    /// Label used in logs and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Replica {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

define_port_error! {
    /// Persistence errors raised by note collection adapters.
    pub enum NotePersistenceError {
        /// Collection connection could not be established.
        Connection => "note collection connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "note collection query failed: {message}",
    }
}

/// Driven port for note persistence adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// All notes in the given collection, in no particular order.
    async fn list(&self, replica: Replica) -> Result<Vec<Note>, NotePersistenceError>;

    /// Fetch one note by id from the given collection.
    async fn find(&self, replica: Replica, id: NoteId)
    -> Result<Option<Note>, NotePersistenceError>;

    /// Write one note into the given collection.
    async fn insert(&self, replica: Replica, note: &Note) -> Result<(), NotePersistenceError>;

    /// Delete one note by id from the given collection, reporting whether a
    /// record existed.
    async fn delete(&self, replica: Replica, id: NoteId) -> Result<bool, NotePersistenceError>;

    /// Cheap connectivity probe against the given collection.
    async fn ping(&self, replica: Replica) -> Result<(), NotePersistenceError>;
}
