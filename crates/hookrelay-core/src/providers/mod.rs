//! Provider payload decoders.
//!
//! Each supported CI system has its own wire schema. Decoding is a two step
//! process: the raw body is parsed into the provider's [`ProviderPayload`]
//! variant, which is then normalized into a [`BuildEvent`]. A body that fails
//! the first step never produces an event.

pub mod buildkite;
pub mod circleci;

pub use buildkite::BuildKitePayload;
pub use circleci::CircleCiPayload;

use crate::{BuildEvent, PayloadError, Provider, Result};

/// Conversion of a decoded provider payload into a [`BuildEvent`].
pub trait NormalizeEvent {
    /// Consumes the payload and produces the normalized event.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError` when the payload parsed but lacks data the
    /// event requires.
    fn normalize(self) -> Result<BuildEvent>;
}

/// Decoded webhook body, one variant per supported provider.
#[derive(Debug, Clone)]
pub enum ProviderPayload {
    /// CircleCI build notification
    CircleCi(CircleCiPayload),
    /// BuildKite build notification
    BuildKite(BuildKitePayload),
}

impl ProviderPayload {
    /// Parses `body` with the schema of `provider`.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::InvalidJson` if the body is not JSON or does
    /// not match the provider schema.
    pub fn parse(provider: Provider, body: &[u8]) -> Result<Self> {
        let parsed = match provider {
            Provider::CircleCi => serde_json::from_slice(body).map(Self::CircleCi),
            Provider::BuildKite => serde_json::from_slice(body).map(Self::BuildKite),
        };

        parsed.map_err(|source| PayloadError::invalid_json(provider, source))
    }

    /// Provider this payload was decoded for.
    pub fn provider(&self) -> Provider {
        match self {
            Self::CircleCi(_) => Provider::CircleCi,
            Self::BuildKite(_) => Provider::BuildKite,
        }
    }
}

impl NormalizeEvent for ProviderPayload {
    fn normalize(self) -> Result<BuildEvent> {
        match self {
            Self::CircleCi(payload) => payload.normalize(),
            Self::BuildKite(payload) => payload.normalize(),
        }
    }
}

/// Decodes a raw webhook body into a [`BuildEvent`].
///
/// # Errors
///
/// Returns `PayloadError` for malformed JSON, schema mismatches, or a
/// BuildKite payload without a commit author.
///
/// # Example
///
/// ```
/// use hookrelay_core::{decode, Provider};
///
/// let body = br#"{"payload": {"build_url": "https://circleci.com/gh/acme/api/7",
///     "build_num": 7, "branch": "main", "reponame": "api",
///     "committer_name": "Ada", "outcome": "success"}}"#;
///
/// let event = decode(Provider::CircleCi, body).unwrap();
/// assert_eq!(event.build_number, 7);
/// ```
pub fn decode(provider: Provider, body: &[u8]) -> Result<BuildEvent> {
    ProviderPayload::parse(provider, body)?.normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tags_variant_with_provider() {
        let body = br#"{"payload": {"build_url": "u", "build_num": 1, "branch": "b",
            "reponame": "r", "committer_name": "c", "outcome": "success"}}"#;

        let payload = ProviderPayload::parse(Provider::CircleCi, body).unwrap();
        assert_eq!(payload.provider(), Provider::CircleCi);
    }

    #[test]
    fn circleci_body_fails_buildkite_schema() {
        let body = br#"{"payload": {"build_url": "u", "build_num": 1, "branch": "b",
            "reponame": "r", "committer_name": "c", "outcome": "success"}}"#;

        let error = ProviderPayload::parse(Provider::BuildKite, body).unwrap_err();
        assert!(matches!(error, PayloadError::InvalidJson { provider: Provider::BuildKite, .. }));
    }

    #[test]
    fn non_json_body_is_rejected() {
        let error = decode(Provider::CircleCi, b"build finished").unwrap_err();
        assert!(matches!(error, PayloadError::InvalidJson { provider: Provider::CircleCi, .. }));
    }
}
