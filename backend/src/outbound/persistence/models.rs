//! Row types bridging Diesel results and domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::audit::{ActorRole, AuditAction, AuditEvent};
use crate::domain::note::{Note, NoteContent, NoteId};
use crate::domain::ports::{AuditPersistenceError, NotePersistenceError};

/// One row from either note table; both share this column layout.
#[derive(Debug, Queryable)]
pub struct NoteRow {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

impl NoteRow {
    /// Convert a stored row into the domain record, re-validating content.
    pub fn into_note(self) -> Result<Note, NotePersistenceError> {
        let content = NoteContent::new(self.content).map_err(|err| {
            NotePersistenceError::query(format!("stored note {} is invalid: {err}", self.id))
        })?;
        Ok(Note::new(
            NoteId::new(self.id),
            content,
            self.author_id,
            self.author_username,
            self.created_at,
        ))
    }
}

/// One row from the audit log.
#[derive(Debug, Queryable)]
pub struct AuditEventRow {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    pub username: String,
    pub role: String,
    pub action: String,
}

impl AuditEventRow {
    /// Convert a stored row into the domain event.
    pub fn into_event(self) -> Result<AuditEvent, AuditPersistenceError> {
        let role: ActorRole = self.role.parse().map_err(|err| {
            AuditPersistenceError::query(format!("stored audit event {}: {err}", self.id))
        })?;
        let action: AuditAction = self.action.parse().map_err(|err| {
            AuditPersistenceError::query(format!("stored audit event {}: {err}", self.id))
        })?;
        Ok(AuditEvent::new(
            self.recorded_at,
            self.username,
            role,
            action,
        ))
    }
}
