//! Port abstraction for audit log persistence and its errors.

use async_trait::async_trait;

use crate::domain::audit::AuditEvent;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by audit store adapters.
    pub enum AuditPersistenceError {
        /// Store connection could not be established.
        Connection => "audit store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "audit store query failed: {message}",
    }
}

/// Driven port for audit log adapters.
///
/// Appends happen only through the background consumer of
/// [`crate::domain::AuditRecorder`]; the read side serves the admin listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append one immutable event.
    async fn append(&self, event: &AuditEvent) -> Result<(), AuditPersistenceError>;

    /// All recorded events, newest first.
    async fn list_all(&self) -> Result<Vec<AuditEvent>, AuditPersistenceError>;
}
