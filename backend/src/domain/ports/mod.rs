//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod audit_store;
mod login_service;
mod note_repository;
mod note_store;

#[cfg(test)]
pub use audit_store::MockAuditStore;
pub use audit_store::{AuditPersistenceError, AuditStore};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{NotePersistenceError, NoteRepository, Replica};
#[cfg(test)]
pub use note_store::MockNoteStore;
pub use note_store::NoteStore;
