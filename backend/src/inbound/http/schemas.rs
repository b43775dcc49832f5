//! Small response payloads shared across handlers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic `{message}` acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Short human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Build an acknowledgement from any message-like value.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
