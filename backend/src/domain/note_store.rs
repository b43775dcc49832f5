//! Dual-write note store: the central data-access service.
//!
//! Notes are written to two logical collections (primary, then fallback) and
//! read from whichever one the outage flag selects. The flag never migrates
//! data — it only switches the read target, so the fallback collection must
//! already hold a full copy written via the dual-write path.
//!
//! Replication is best-effort: there is no transaction spanning the two
//! writes. A fallback failure after a primary success leaves a detectable
//! divergence, which is logged distinctly and surfaced to the caller rather
//! than swallowed or blindly retried (a retry could double-insert).

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, warn};

use crate::domain::error::Error;
use crate::domain::identity::Identity;
use crate::domain::note::{Note, NoteContent, NoteId};
use crate::domain::ports::{NotePersistenceError, NoteRepository, NoteStore, Replica};

/// Upper bound for a single collection operation before it is abandoned.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

/// Process-wide outage flag selecting the active read target.
///
/// Owned by the store and injected rather than referenced as ambient global
/// state. Reads and flips are single atomic operations; a request racing a
/// toggle observes either the pre- or post-toggle target, never a torn state.
#[derive(Clone, Debug, Default)]
pub struct OutageFlag(Arc<AtomicBool>);

impl OutageFlag {
    /// A flag starting in the "primary up" position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the simulated outage is active (reads served from fallback).
    pub fn is_down(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Flip the flag, returning the new state.
    pub fn flip(&self) -> bool {
        !self.0.fetch_xor(true, Ordering::AcqRel)
    }

    /// Collection currently serving reads.
    pub fn active_replica(&self) -> Replica {
        if self.is_down() {
            Replica::Fallback
        } else {
            Replica::Primary
        }
    }
}

/// The dual-write/fallback-read note service.
///
/// Every repository call is bounded by a timeout so a stalled collection
/// fails the request instead of hanging it.
pub struct DualWriteNoteStore {
    notes: Arc<dyn NoteRepository>,
    clock: Arc<dyn Clock>,
    outage: OutageFlag,
    op_timeout: Duration,
    last_id: AtomicI64,
}

impl DualWriteNoteStore {
    /// Create a store over the given collection adapter.
    pub fn new(notes: Arc<dyn NoteRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            notes,
            clock,
            outage: OutageFlag::new(),
            op_timeout: DEFAULT_OP_TIMEOUT,
            last_id: AtomicI64::new(0),
        }
    }

    /// Share an externally owned outage flag.
    pub fn with_outage_flag(mut self, outage: OutageFlag) -> Self {
        self.outage = outage;
        self
    }

    /// Override the per-operation timeout.
    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Allocate the next note id.
    ///
    /// Ids are creation-timestamp-derived (milliseconds) with a monotonic
    /// guard: `max(now, last + 1)`. This keeps ids time-ordered and
    /// non-decreasing while closing the collision window two concurrent
    /// creators would otherwise race into.
    fn next_id(&self) -> NoteId {
        let now = self.clock.utc().timestamp_millis();
        let mut prev = self.last_id.load(Ordering::Relaxed);
        loop {
            let candidate = now.max(prev + 1);
            match self.last_id.compare_exchange_weak(
                prev,
                candidate,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return NoteId::new(candidate),
                Err(observed) => prev = observed,
            }
        }
    }

    /// Run one collection operation under the configured timeout, mapping
    /// failures to caller-safe domain errors.
    async fn run<T, F>(&self, op: &'static str, replica: Replica, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, NotePersistenceError>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                warn!(%replica, op, error = %err, "note collection operation failed");
                Err(match err {
                    NotePersistenceError::Connection { .. } => {
                        Error::unavailable("note store unavailable")
                    }
                    NotePersistenceError::Query { .. } => Error::internal("note store failure"),
                })
            }
            Err(_) => {
                warn!(%replica, op, timeout_ms = self.op_timeout.as_millis() as u64, "note collection operation timed out");
                Err(Error::unavailable("note store timed out"))
            }
        }
    }
}

#[async_trait]
impl NoteStore for DualWriteNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>, Error> {
        let replica = self.outage.active_replica();
        let mut notes = self.run("list", replica, self.notes.list(replica)).await?;
        notes.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b.id().cmp(&a.id()))
        });
        Ok(notes)
    }

    async fn find_note(&self, id: NoteId) -> Result<Option<Note>, Error> {
        let replica = self.outage.active_replica();
        self.run("find", replica, self.notes.find(replica, id)).await
    }

    async fn create_note(&self, content: NoteContent, author: &Identity) -> Result<Note, Error> {
        let note = Note::authored(self.next_id(), content, author, self.clock.utc());

        self.run(
            "insert",
            Replica::Primary,
            self.notes.insert(Replica::Primary, &note),
        )
        .await?;

        if let Err(err) = self
            .run(
                "insert",
                Replica::Fallback,
                self.notes.insert(Replica::Fallback, &note),
            )
            .await
        {
            // The note now exists in primary only. Surface it; do not retry.
            error!(
                note_id = note.id().value(),
                error = %err,
                "replica divergence: fallback write failed after primary success"
            );
            return Err(Error::internal("note replication incomplete"));
        }

        Ok(note)
    }

    async fn delete_note(&self, id: NoteId) -> Result<(), Error> {
        let active = self.outage.active_replica();
        if self
            .run("find", active, self.notes.find(active, id))
            .await?
            .is_none()
        {
            return Err(Error::not_found("note not found"));
        }

        // Attempt both collections even if the first fails, so a transient
        // failure on one side cannot strand the other copy.
        let primary = self
            .run(
                "delete",
                Replica::Primary,
                self.notes.delete(Replica::Primary, id),
            )
            .await;
        let fallback = self
            .run(
                "delete",
                Replica::Fallback,
                self.notes.delete(Replica::Fallback, id),
            )
            .await;

        primary?;
        fallback?;
        Ok(())
    }

    fn toggle_outage(&self) -> bool {
        self.outage.flip()
    }

    fn outage_active(&self) -> bool {
        self.outage.is_down()
    }

    async fn ping(&self) -> Result<(), Error> {
        let replica = self.outage.active_replica();
        if self
            .run("ping", replica, self.notes.ping(replica))
            .await
            .is_ok()
        {
            return Ok(());
        }
        // One transparent retry: the probe is an idempotent read.
        self.run("ping", replica, self.notes.ping(replica)).await
    }
}
