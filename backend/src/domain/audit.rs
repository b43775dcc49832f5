//! Audit events: immutable records of security-relevant actions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::user::Role;

/// Security-relevant actions recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// Credentials accepted, session established.
    LoginSuccess,
    /// Credentials rejected; the attempted username is recorded with role
    /// `unknown`, never the real role.
    LoginFailed,
    /// Session ended by the caller.
    Logout,
    /// Note written through the dual-write path.
    CreateNote,
    /// Note removed from both collections.
    DeleteNote,
    /// Deletion refused by the authorization policy.
    DeleteNoteDenied,
    /// Read path switched between primary and fallback.
    ToggleOutage,
}

impl AuditAction {
    /// Wire representation, also used by audit storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LoginSuccess => "LOGIN_SUCCESS",
            Self::LoginFailed => "LOGIN_FAILED",
            Self::Logout => "LOGOUT",
            Self::CreateNote => "CREATE_NOTE",
            Self::DeleteNote => "DELETE_NOTE",
            Self::DeleteNoteDenied => "DELETE_NOTE_DENIED",
            Self::ToggleOutage => "TOGGLE_OUTAGE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored action string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAuditValue(String);

impl fmt::Display for UnknownAuditValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown audit value: {}", self.0)
    }
}

impl std::error::Error for UnknownAuditValue {}

impl FromStr for AuditAction {
    type Err = UnknownAuditValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOGIN_SUCCESS" => Ok(Self::LoginSuccess),
            "LOGIN_FAILED" => Ok(Self::LoginFailed),
            "LOGOUT" => Ok(Self::Logout),
            "CREATE_NOTE" => Ok(Self::CreateNote),
            "DELETE_NOTE" => Ok(Self::DeleteNote),
            "DELETE_NOTE_DENIED" => Ok(Self::DeleteNoteDenied),
            "TOGGLE_OUTAGE" => Ok(Self::ToggleOutage),
            other => Err(UnknownAuditValue(other.to_owned())),
        }
    }
}

/// Role recorded against an audit event.
///
/// Failed logins reference usernames with no matching live account, so the
/// audit record carries its own role vocabulary including `unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    /// Regular account.
    User,
    /// Administrator account.
    Admin,
    /// No authenticated account, e.g. a failed login attempt.
    Unknown,
}

impl ActorRole {
    /// Wire representation, also used by audit storage.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorRole {
    type Err = UnknownAuditValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "unknown" => Ok(Self::Unknown),
            other => Err(UnknownAuditValue(other.to_owned())),
        }
    }
}

impl From<Role> for ActorRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Self::User,
            Role::Admin => Self::Admin,
        }
    }
}

/// One immutable audit record. Never updated or deleted once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    timestamp: DateTime<Utc>,
    username: String,
    role: ActorRole,
    action: AuditAction,
}

impl AuditEvent {
    /// Construct an event from its parts.
    pub fn new(
        timestamp: DateTime<Utc>,
        username: impl Into<String>,
        role: ActorRole,
        action: AuditAction,
    ) -> Self {
        Self {
            timestamp,
            username: username.into(),
            role,
            action,
        }
    }

    /// Moment the action happened.
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Username the action is attributed to.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Role recorded for the actor.
    pub const fn role(&self) -> ActorRole {
        self.role
    }

    /// What happened.
    pub const fn action(&self) -> AuditAction {
        self.action
    }
}
