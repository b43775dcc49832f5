//! PostgreSQL-backed `AuditStore` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::audit::AuditEvent;
use crate::domain::ports::{AuditPersistenceError, AuditStore};

use super::models::AuditEventRow;
use super::pool::{DbPool, PoolError};
use super::schema::audit_events;

/// Diesel-backed implementation of the `AuditStore` port.
#[derive(Clone)]
pub struct DieselAuditStore {
    pool: DbPool,
}

impl DieselAuditStore {
    /// Create a store over the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AuditPersistenceError {
    AuditPersistenceError::connection(error.to_string())
}

fn map_diesel_error(error: diesel::result::Error) -> AuditPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AuditPersistenceError::connection("database connection closed")
        }
        other => AuditPersistenceError::query(other.to_string()),
    }
}

#[async_trait]
impl AuditStore for DieselAuditStore {
    async fn append(&self, event: &AuditEvent) -> Result<(), AuditPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        diesel::insert_into(audit_events::table)
            .values((
                audit_events::recorded_at.eq(event.timestamp()),
                audit_events::username.eq(event.username()),
                audit_events::role.eq(event.role().as_str()),
                audit_events::action.eq(event.action().as_str()),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<AuditEvent>, AuditPersistenceError> {
        let mut conn = self.pool.checkout().await.map_err(map_pool_error)?;
        let rows: Vec<AuditEventRow> = audit_events::table
            .order(audit_events::recorded_at.desc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(AuditEventRow::into_event).collect()
    }
}
