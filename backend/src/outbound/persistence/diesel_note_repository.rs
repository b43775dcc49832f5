//! PostgreSQL-backed `NoteRepository` using Diesel.
//!
//! One adapter serves both collections; every operation dispatches on the
//! requested [`Replica`] to the matching table. Diesel table DSL types are
//! table-specific, so the dispatch is a per-operation match rather than a
//! parameterised query.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::note::{Note, NoteId};
use crate::domain::ports::{NotePersistenceError, NoteRepository, Replica};

use super::models::NoteRow;
use super::pool::{DbPool, PoolError};
use super::schema::{notes_fallback, notes_primary};

/// Diesel-backed implementation of the `NoteRepository` port.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a repository over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to the port's connection error.
fn map_pool_error(error: PoolError) -> NotePersistenceError {
    NotePersistenceError::connection(error.to_string())
}

/// Map Diesel errors to the port's error vocabulary.
fn map_diesel_error(error: diesel::result::Error) -> NotePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            NotePersistenceError::connection("database connection closed")
        }
        other => NotePersistenceError::query(other.to_string()),
    }
}

fn rows_to_notes(rows: Vec<NoteRow>) -> Result<Vec<Note>, NotePersistenceError> {
    rows.into_iter().map(NoteRow::into_note).collect()
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn list(&self, replica: Replica) -> Result<Vec<Note>, NotePersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let rows: Vec<NoteRow> = match replica {
            Replica::Primary => {
                notes_primary::table
                    .order(notes_primary::created_at.desc())
                    .load(&mut conn)
                    .await
            }
            Replica::Fallback => {
                notes_fallback::table
                    .order(notes_fallback::created_at.desc())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        rows_to_notes(rows)
    }

    async fn find(
        &self,
        replica: Replica,
        id: NoteId,
    ) -> Result<Option<Note>, NotePersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let row: Option<NoteRow> = match replica {
            Replica::Primary => {
                notes_primary::table
                    .filter(notes_primary::id.eq(id.value()))
                    .first(&mut conn)
                    .await
                    .optional()
            }
            Replica::Fallback => {
                notes_fallback::table
                    .filter(notes_fallback::id.eq(id.value()))
                    .first(&mut conn)
                    .await
                    .optional()
            }
        }
        .map_err(map_diesel_error)?;
        row.map(NoteRow::into_note).transpose()
    }

    async fn insert(&self, replica: Replica, note: &Note) -> Result<(), NotePersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        match replica {
            Replica::Primary => {
                diesel::insert_into(notes_primary::table)
                    .values((
                        notes_primary::id.eq(note.id().value()),
                        notes_primary::content.eq(note.content()),
                        notes_primary::author_id.eq(note.author_id()),
                        notes_primary::author_username.eq(note.author_username()),
                        notes_primary::created_at.eq(note.created_at()),
                    ))
                    .execute(&mut conn)
                    .await
            }
            Replica::Fallback => {
                diesel::insert_into(notes_fallback::table)
                    .values((
                        notes_fallback::id.eq(note.id().value()),
                        notes_fallback::content.eq(note.content()),
                        notes_fallback::author_id.eq(note.author_id()),
                        notes_fallback::author_username.eq(note.author_username()),
                        notes_fallback::created_at.eq(note.created_at()),
                    ))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn delete(&self, replica: Replica, id: NoteId) -> Result<bool, NotePersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let deleted = match replica {
            Replica::Primary => {
                diesel::delete(notes_primary::table.filter(notes_primary::id.eq(id.value())))
                    .execute(&mut conn)
                    .await
            }
            Replica::Fallback => {
                diesel::delete(notes_fallback::table.filter(notes_fallback::id.eq(id.value())))
                    .execute(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn ping(&self, _replica: Replica) -> Result<(), NotePersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
