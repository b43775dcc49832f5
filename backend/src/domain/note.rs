//! Note data model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::identity::Identity;

/// Maximum accepted note content length in characters.
pub const NOTE_CONTENT_MAX: usize = 10_000;

/// Validation errors returned by [`NoteContent::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteContentValidationError {
    /// Content was missing or blank once trimmed.
    Empty,
    /// Content exceeded the accepted length.
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
}

impl fmt::Display for NoteContentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "note content must not be empty"),
            Self::TooLong { max } => {
                write!(f, "note content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for NoteContentValidationError {}

/// Validated note body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteContent(String);

impl NoteContent {
    /// Validate and construct note content from caller input.
    ///
    /// Content keeps its internal whitespace; only fully blank input is
    /// rejected.
    pub fn new(content: impl Into<String>) -> Result<Self, NoteContentValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(NoteContentValidationError::Empty);
        }
        if content.chars().count() > NOTE_CONTENT_MAX {
            return Err(NoteContentValidationError::TooLong {
                max: NOTE_CONTENT_MAX,
            });
        }
        Ok(Self(content))
    }
}

impl AsRef<str> for NoteContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NoteContent> for String {
    fn from(value: NoteContent) -> Self {
        value.0
    }
}

impl TryFrom<String> for NoteContent {
    type Error = NoteContentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Note identifier: creation-timestamp-derived milliseconds, strictly
/// increasing within a process (see the store's id allocation).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw identifier value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw identifier value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A personal note, owned by its author for its whole lifetime.
///
/// ## Invariants
/// - Once created, the record exists with identical field values in both the
///   primary and fallback collections until deleted from both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[schema(value_type = i64)]
    id: NoteId,
    #[schema(value_type = String)]
    content: NoteContent,
    author_id: i64,
    author_username: String,
    created_at: DateTime<Utc>,
}

impl Note {
    /// Construct a note from stored or freshly allocated parts.
    pub fn new(
        id: NoteId,
        content: NoteContent,
        author_id: i64,
        author_username: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            content,
            author_id,
            author_username: author_username.into(),
            created_at,
        }
    }

    /// Construct a note authored by the given identity.
    pub fn authored(
        id: NoteId,
        content: NoteContent,
        author: &Identity,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(id, content, author.id(), author.username(), created_at)
    }

    /// Note identifier.
    pub const fn id(&self) -> NoteId {
        self.id
    }

    /// Note body.
    pub fn content(&self) -> &str {
        self.content.as_ref()
    }

    /// Identifier of the owning account.
    pub const fn author_id(&self) -> i64 {
        self.author_id
    }

    /// Login name of the owning account at creation time.
    pub fn author_username(&self) -> &str {
        self.author_username.as_str()
    }

    /// Creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
