//! Fire-and-forget audit sink.
//!
//! Handlers enqueue events and move on; a background consumer persists them.
//! Recording never blocks and never fails the caller's request — persistence
//! failures are logged and swallowed, observability only.

use std::sync::Arc;

use mockable::Clock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::domain::audit::{ActorRole, AuditAction, AuditEvent};
use crate::domain::identity::Identity;
use crate::domain::ports::AuditStore;

/// Cheap-to-clone handle enqueueing audit events for the background consumer.
#[derive(Clone)]
pub struct AuditRecorder {
    sender: mpsc::UnboundedSender<AuditEvent>,
    clock: Arc<dyn Clock>,
}

impl AuditRecorder {
    /// Spawn the background consumer and return the recorder handle.
    ///
    /// The consumer drains the channel until every recorder clone is dropped,
    /// then exits; the join handle is returned so shutdown paths (and tests)
    /// can wait for the drain.
    pub fn spawn(store: Arc<dyn AuditStore>, clock: Arc<dyn Clock>) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<AuditEvent>();
        let consumer = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                if let Err(err) = store.append(&event).await {
                    warn!(
                        action = %event.action(),
                        username = event.username(),
                        error = %err,
                        "audit event dropped"
                    );
                }
            }
        });
        (Self { sender, clock }, consumer)
    }

    /// Record one event. Never blocks, never errors.
    pub fn record(&self, username: &str, role: ActorRole, action: AuditAction) {
        let event = AuditEvent::new(self.clock.utc(), username, role, action);
        if self.sender.send(event).is_err() {
            warn!(%action, "audit consumer gone; event discarded");
        }
    }

    /// Record one event attributed to an authenticated identity.
    pub fn record_identity(&self, identity: &Identity, action: AuditAction) {
        self.record(identity.username(), identity.role().into(), action);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::AuditPersistenceError;
    use crate::domain::user::Role;
    use crate::outbound::persistence::MemoryAuditStore;
    use async_trait::async_trait;
    use mockable::DefaultClock;

    #[tokio::test]
    async fn recorded_events_reach_the_store() {
        let store = Arc::new(MemoryAuditStore::default());
        let (recorder, consumer) =
            AuditRecorder::spawn(store.clone(), Arc::new(DefaultClock));

        recorder.record("alice", ActorRole::User, AuditAction::LoginSuccess);
        recorder.record_identity(
            &Identity::new(3, "admin", Role::Admin),
            AuditAction::ToggleOutage,
        );

        drop(recorder);
        consumer.await.expect("consumer drains and exits");

        let events = store.list_all().await.expect("list succeeds");
        assert_eq!(events.len(), 2);
        assert!(
            events
                .iter()
                .any(|event| event.action() == AuditAction::LoginSuccess
                    && event.username() == "alice"
                    && event.role() == ActorRole::User)
        );
    }

    struct FailingStore;

    #[async_trait]
    impl AuditStore for FailingStore {
        async fn append(&self, _event: &AuditEvent) -> Result<(), AuditPersistenceError> {
            Err(AuditPersistenceError::query("write refused"))
        }

        async fn list_all(&self) -> Result<Vec<AuditEvent>, AuditPersistenceError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn persistence_failures_never_reach_the_producer() {
        let (recorder, consumer) =
            AuditRecorder::spawn(Arc::new(FailingStore), Arc::new(DefaultClock));

        // record() has no error path; the consumer must swallow the failure
        // and keep draining rather than panic or stop.
        recorder.record("alice", ActorRole::User, AuditAction::LoginFailed);
        recorder.record("bob", ActorRole::User, AuditAction::Logout);

        drop(recorder);
        consumer.await.expect("consumer survives store failures");
    }
}
