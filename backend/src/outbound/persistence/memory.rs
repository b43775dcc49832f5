//! In-memory adapters for demo mode and tests.
//!
//! The server falls back to these when no database is configured, so the demo
//! runs with zero infrastructure. Collections are guarded by plain mutexes;
//! critical sections never hold a lock across an await point.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::audit::AuditEvent;
use crate::domain::note::{Note, NoteId};
use crate::domain::ports::{
    AuditPersistenceError, AuditStore, NotePersistenceError, NoteRepository, Replica,
};

/// Mutex-guarded pair of note collections.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    primary: Mutex<Vec<Note>>,
    fallback: Mutex<Vec<Note>>,
}

impl MemoryNoteRepository {
    fn collection(&self, replica: Replica) -> &Mutex<Vec<Note>> {
        match replica {
            Replica::Primary => &self.primary,
            Replica::Fallback => &self.fallback,
        }
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list(&self, replica: Replica) -> Result<Vec<Note>, NotePersistenceError> {
        Ok(self
            .collection(replica)
            .lock()
            .expect("note collection mutex poisoned")
            .clone())
    }

    async fn find(
        &self,
        replica: Replica,
        id: NoteId,
    ) -> Result<Option<Note>, NotePersistenceError> {
        Ok(self
            .collection(replica)
            .lock()
            .expect("note collection mutex poisoned")
            .iter()
            .find(|note| note.id() == id)
            .cloned())
    }

    async fn insert(&self, replica: Replica, note: &Note) -> Result<(), NotePersistenceError> {
        self.collection(replica)
            .lock()
            .expect("note collection mutex poisoned")
            .push(note.clone());
        Ok(())
    }

    async fn delete(&self, replica: Replica, id: NoteId) -> Result<bool, NotePersistenceError> {
        let mut notes = self
            .collection(replica)
            .lock()
            .expect("note collection mutex poisoned");
        let before = notes.len();
        notes.retain(|note| note.id() != id);
        Ok(notes.len() < before)
    }

    async fn ping(&self, _replica: Replica) -> Result<(), NotePersistenceError> {
        Ok(())
    }
}

/// Mutex-guarded append-only audit log.
#[derive(Debug, Default)]
pub struct MemoryAuditStore {
    events: Mutex<Vec<AuditEvent>>,
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn append(&self, event: &AuditEvent) -> Result<(), AuditPersistenceError> {
        self.events
            .lock()
            .expect("audit log mutex poisoned")
            .push(event.clone());
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<AuditEvent>, AuditPersistenceError> {
        let mut events = self
            .events
            .lock()
            .expect("audit log mutex poisoned")
            .clone();
        events.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::audit::{ActorRole, AuditAction};
    use crate::domain::note::NoteContent;
    use chrono::{Duration, Utc};

    fn note(id: i64) -> Note {
        Note::new(
            NoteId::new(id),
            NoteContent::new("fixture").expect("valid content"),
            1,
            "alice",
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn collections_are_independent() {
        let repo = MemoryNoteRepository::default();
        repo.insert(Replica::Primary, &note(1))
            .await
            .expect("insert succeeds");

        assert_eq!(
            repo.list(Replica::Primary).await.expect("list").len(),
            1
        );
        assert!(repo.list(Replica::Fallback).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_existed() {
        let repo = MemoryNoteRepository::default();
        repo.insert(Replica::Primary, &note(1))
            .await
            .expect("insert succeeds");

        assert!(repo.delete(Replica::Primary, NoteId::new(1)).await.expect("delete"));
        assert!(!repo.delete(Replica::Primary, NoteId::new(1)).await.expect("delete"));
    }

    #[tokio::test]
    async fn audit_events_list_newest_first() {
        let store = MemoryAuditStore::default();
        let now = Utc::now();
        let older = AuditEvent::new(
            now - Duration::seconds(10),
            "alice",
            ActorRole::User,
            AuditAction::LoginSuccess,
        );
        let newer = AuditEvent::new(now, "alice", ActorRole::User, AuditAction::Logout);
        store.append(&older).await.expect("append succeeds");
        store.append(&newer).await.expect("append succeeds");

        let events = store.list_all().await.expect("list succeeds");
        assert_eq!(events.first().map(AuditEvent::action), Some(AuditAction::Logout));
    }
}
