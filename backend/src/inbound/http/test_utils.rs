//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::AuditStore;
use crate::domain::{
    AuditEvent, AuditRecorder, DirectoryLoginService, DualWriteNoteStore, UserDirectory,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{MemoryAuditStore, MemoryNoteRepository};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Fully wired handler state over in-memory adapters and the demo directory.
///
/// Returns the audit store alongside so tests can assert on recorded events.
pub fn demo_http_state() -> (HttpState, Arc<MemoryAuditStore>) {
    let audit_store = Arc::new(MemoryAuditStore::default());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (recorder, _consumer) = AuditRecorder::spawn(audit_store.clone(), clock.clone());
    let notes = DualWriteNoteStore::new(Arc::new(MemoryNoteRepository::default()), clock);
    let login = DirectoryLoginService::new(Arc::new(UserDirectory::with_demo_accounts()));
    let state = HttpState::new(
        Arc::new(login),
        Arc::new(notes),
        recorder,
        audit_store.clone(),
    );
    (state, audit_store)
}

/// Wait until the async audit sink has persisted at least `minimum` events.
///
/// # Panics
/// Panics when the store does not reach the expected size in time.
pub async fn wait_for_audit_events(store: &MemoryAuditStore, minimum: usize) -> Vec<AuditEvent> {
    for _ in 0..200 {
        let events = store.list_all().await.expect("audit list succeeds");
        if events.len() >= minimum {
            return events;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("audit log never reached {minimum} events");
}
