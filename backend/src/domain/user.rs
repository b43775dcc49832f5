//! User accounts and roles for the fixed identity table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::identity::Identity;

/// Role attached to every account, deciding note visibility and admin access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account: sees and deletes only its own notes.
    User,
    /// Administrator: sees all notes, may delete any note, may read the audit log.
    Admin,
}

impl Role {
    /// Whether this role grants administrative access.
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Wire representation used by audit storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record in the fixed identity table.
///
/// Accounts are built at process start and never mutated or persisted; the
/// secret is only ever read through [`crate::domain::SecretVerifier`].
#[derive(Debug, Clone)]
pub struct UserAccount {
    id: i64,
    username: String,
    secret: String,
    role: Role,
}

impl UserAccount {
    /// Construct an account record.
    pub fn new(id: i64, username: impl Into<String>, secret: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            secret: secret.into(),
            role,
        }
    }

    /// Stable numeric identifier.
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Unique login name.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Stored secret, compared only through a verifier.
    pub(crate) fn secret(&self) -> &str {
        self.secret.as_str()
    }

    /// Role attached to the account.
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Identity derived from this account after successful authentication.
    pub fn identity(&self) -> Identity {
        Identity::new(self.id, self.username.clone(), self.role)
    }
}
