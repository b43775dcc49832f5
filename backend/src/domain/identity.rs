//! Authenticated caller identity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::Role;

/// Resolved identity of an authenticated caller.
///
/// Established at login, persisted in the session carrier, and attached to
/// every request by the session extractor. Carries everything the policy layer
/// needs so no store lookup happens per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    id: i64,
    username: String,
    role: Role,
}

impl Identity {
    /// Construct an identity from its parts.
    pub fn new(id: i64, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }

    /// Stable numeric identifier of the account.
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Login name of the account.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Role attached to the account.
    pub const fn role(&self) -> Role {
        self.role
    }
}
