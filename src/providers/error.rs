// Generation failures
//
// Upstream error taxonomy is free text. Every variant renders the upstream
// detail in its Display output so callers can inspect the message.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Upstream answered with a non-success status.
    #[error("{provider} API request failed\n\nStatus: {status}\nBody: {body}")]
    Upstream {
        provider: String,
        status: StatusCode,
        body: String,
    },

    /// The request never got a response.
    #[error("Failed to send request to {provider} API: {source}")]
    Transport {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not what the API documents.
    #[error("Failed to parse {provider} API response: {detail}")]
    InvalidResponse { provider: String, detail: String },

    /// The response carried no text (e.g. the prompt was blocked).
    #[error("{provider} returned no text (finish reason: {reason})")]
    EmptyResponse { provider: String, reason: String },

    /// Any other failure, described by its message.
    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    /// Adapter for `map_err` on reqwest calls. The request URL is dropped
    /// from the wrapped error.
    pub fn transport(provider: &str) -> impl Fn(reqwest::Error) -> Self + '_ {
        move |source| Self::Transport {
            provider: provider.to_string(),
            source: source.without_url(),
        }
    }
}
