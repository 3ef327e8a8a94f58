//! BuildKite webhook schema.
//!
//! BuildKite does not report the commit author directly. It is recovered from
//! the `buildkite:git:commit` metadata entry, which holds `git show` style
//! output, and a payload without it is rejected.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;

use super::NormalizeEvent;
use crate::{BuildEvent, PayloadError, Provider, Result};

/// Metadata key holding the commit description.
pub const GIT_COMMIT_METADATA: &str = "buildkite:git:commit";

/// Matches `Author: Name <email>` and captures `Name <email>`.
static AUTHOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Author:[ \t]*(.+?[ \t]*<[^<>\n]*>)[ \t\r]*$").expect("invalid author pattern")
});

/// BuildKite notification body.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildKitePayload {
    /// Build details
    pub build: BuildKiteBuild,
    /// Pipeline the build belongs to
    pub pipeline: BuildKitePipeline,
}

/// Build section of a BuildKite notification.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildKiteBuild {
    /// Build number
    pub number: u64,
    /// Final state, e.g. `passed` or `failed`
    pub state: String,
    /// Link to the build page
    pub web_url: String,
    /// Commit SHA that was built
    pub commit: String,
    /// Branch that was built
    pub branch: String,
    /// Build metadata; carries the commit description
    #[serde(default)]
    pub meta_data: HashMap<String, String>,
}

/// Pipeline section of a BuildKite notification.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildKitePipeline {
    /// Pipeline slug, shown as the repository name
    pub slug: String,
    /// Source-control host configuration
    pub provider: SourceProvider,
}

/// Source-control host a pipeline pulls from.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceProvider {
    /// Host identifier, e.g. `github` or `bitbucket`
    pub id: String,
    /// Host-specific settings
    #[serde(default)]
    pub settings: ProviderSettings,
}

/// Host-specific pipeline settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    /// Repository path on the host, e.g. `acme/api`
    #[serde(default)]
    pub repository: String,
}

impl BuildKitePayload {
    /// Extracts `Name <email>` from the commit metadata.
    ///
    /// # Errors
    ///
    /// Returns `PayloadError::MissingAuthor` if the metadata entry is absent
    /// or has no author line.
    pub fn author(&self) -> Result<String> {
        let commit =
            self.build.meta_data.get(GIT_COMMIT_METADATA).ok_or(PayloadError::MissingAuthor)?;

        AUTHOR_LINE
            .captures(commit)
            .and_then(|captures| captures.get(1))
            .map(|author| author.as_str().to_string())
            .ok_or(PayloadError::MissingAuthor)
    }

    /// Link to the built commit on the source-control host.
    ///
    /// Only Bitbucket and GitHub are known; other hosts yield `None`.
    pub fn commit_url(&self) -> Option<String> {
        let repository = &self.pipeline.provider.settings.repository;
        let commit = &self.build.commit;

        match self.pipeline.provider.id.as_str() {
            "bitbucket" => Some(format!("https://bitbucket.org/{repository}/commits/{commit}")),
            "github" => Some(format!("https://github.com/{repository}/commit/{commit}")),
            _ => None,
        }
    }

    /// Source-control host id with its first letter capitalized.
    pub fn provider_name(&self) -> Option<String> {
        let mut chars = self.pipeline.provider.id.chars();
        let first = chars.next()?;

        Some(first.to_uppercase().chain(chars).collect())
    }
}

impl NormalizeEvent for BuildKitePayload {
    fn normalize(self) -> Result<BuildEvent> {
        let author = self.author()?;
        let commit_url = self.commit_url();
        let provider_name = self.provider_name();

        Ok(BuildEvent {
            provider: Provider::BuildKite,
            build_number: self.build.number,
            author,
            repository: self.pipeline.slug,
            branch: self.build.branch,
            outcome: self.build.state,
            build_url: self.build.web_url,
            commit_url,
            provider_name,
        })
    }
}
