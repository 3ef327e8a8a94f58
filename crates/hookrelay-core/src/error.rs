//! Error types for payload decoding.
//!
//! Every variant describes a malformed inbound webhook. None of them are
//! recoverable within a request; the API layer turns them into a single
//! generic response.

use thiserror::Error;

use crate::Provider;

/// Result type alias using `PayloadError`.
pub type Result<T> = std::result::Result<T, PayloadError>;

/// Reasons an inbound payload could not be turned into a `BuildEvent`.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Body is not JSON or does not match the provider schema.
    #[error("invalid {provider} payload: {source}")]
    InvalidJson {
        /// Provider whose schema was applied
        provider: Provider,
        /// Underlying deserialization failure
        source: serde_json::Error,
    },

    /// BuildKite commit metadata carries no `Author:` line.
    #[error("commit metadata has no author line")]
    MissingAuthor,
}

impl PayloadError {
    /// Creates a JSON decoding error for the given provider.
    pub fn invalid_json(provider: Provider, source: serde_json::Error) -> Self {
        Self::InvalidJson { provider, source }
    }
}
