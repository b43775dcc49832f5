//! Authorization policy for notes.
//!
//! Pure functions, no side effects: handlers decide what to do with a denial
//! (including recording it in the audit log) — the policy only answers the
//! question.

use crate::domain::identity::Identity;
use crate::domain::note::Note;

/// Notes the caller is allowed to see: admins see everything, everyone else
/// sees only their own notes.
pub fn visible_notes(identity: &Identity, notes: Vec<Note>) -> Vec<Note> {
    if identity.role().is_admin() {
        return notes;
    }
    notes
        .into_iter()
        .filter(|note| note.author_id() == identity.id())
        .collect()
}

/// Whether the caller may delete the note: the owner or an admin.
pub fn can_delete(identity: &Identity, note: &Note) -> bool {
    identity.role().is_admin() || note.author_id() == identity.id()
}
