//! Provider tags and the normalized build event.

use std::fmt;

/// CI system that sent a webhook.
///
/// The set is closed: anything that does not identify itself as BuildKite is
/// treated as CircleCI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// CircleCI build notifications.
    CircleCi,
    /// BuildKite `build.finished` notifications.
    BuildKite,
}

impl Provider {
    /// `User-Agent` value BuildKite sends with every webhook.
    pub const BUILDKITE_USER_AGENT: &'static str = "Buildkite-Request";

    /// Selects the provider from the request's `User-Agent` header.
    ///
    /// Only an exact `Buildkite-Request` match selects BuildKite; a missing or
    /// any other header selects CircleCI.
    ///
    /// # Example
    ///
    /// ```
    /// use hookrelay_core::Provider;
    ///
    /// assert_eq!(Provider::from_user_agent(Some("Buildkite-Request")), Provider::BuildKite);
    /// assert_eq!(Provider::from_user_agent(None), Provider::CircleCi);
    /// ```
    pub fn from_user_agent(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(Self::BUILDKITE_USER_AGENT) => Self::BuildKite,
            _ => Self::CircleCi,
        }
    }

    /// Name used for the provider in rendered messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::CircleCi => "CircleCI",
            Self::BuildKite => "BuildKite",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Provider-agnostic description of one finished build.
///
/// Only ever built from a successfully decoded provider payload, and dropped
/// once the chat message has been rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEvent {
    /// Provider that reported the build
    pub provider: Provider,
    /// Provider-assigned build number
    pub build_number: u64,
    /// Committer or commit author, as reported by the provider
    pub author: String,
    /// Repository (CircleCI) or pipeline slug (BuildKite)
    pub repository: String,
    /// Branch the build ran on
    pub branch: String,
    /// Build outcome or state string, verbatim
    pub outcome: String,
    /// Link to the build page
    pub build_url: String,
    /// Link to the commit on the source-control host, when known
    pub commit_url: Option<String>,
    /// Display name of the source-control host, when known
    pub provider_name: Option<String>,
}
