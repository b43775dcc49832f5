//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::AuditRecorder;
use crate::domain::ports::{AuditStore, LoginService, NoteStore};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// Dual-write note use-cases.
    pub notes: Arc<dyn NoteStore>,
    /// Fire-and-forget audit sink.
    pub audit: AuditRecorder,
    /// Audit read path for the admin listing.
    pub audit_log: Arc<dyn AuditStore>,
}

impl HttpState {
    /// Construct state from its port implementations.
    pub fn new(
        login: Arc<dyn LoginService>,
        notes: Arc<dyn NoteStore>,
        audit: AuditRecorder,
        audit_log: Arc<dyn AuditStore>,
    ) -> Self {
        Self {
            login,
            notes,
            audit,
            audit_log,
        }
    }
}
