//! Persistence adapters: PostgreSQL (Diesel) and in-memory.
//!
//! The Diesel adapters back the service when a database is configured; the
//! in-memory adapters cover demo mode and the test suites. Both honour the
//! same ports, so the dual-write choreography above them never changes.

mod diesel_audit_store;
mod diesel_note_repository;
mod memory;
mod models;
mod pool;
pub mod schema;

pub use diesel_audit_store::DieselAuditStore;
pub use diesel_note_repository::DieselNoteRepository;
pub use memory::{MemoryAuditStore, MemoryNoteRepository};
pub use pool::{DbPool, PoolConfig, PoolError, shared_pool};
