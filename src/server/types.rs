// HTTP API types
//
// Body shapes for POST /chat and GET /.

use serde::{Deserialize, Serialize};

/// Request body for /chat endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's proposal. Empty strings are accepted.
    pub message: String,
}

/// Response body for /chat endpoint
///
/// Serialized untagged: `{"response": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Reply { response: String },
    Error { error: String },
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply {
            response: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error { error: text.into() }
    }
}

/// Response body for the liveness endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
