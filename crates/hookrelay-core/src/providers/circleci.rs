//! CircleCI webhook schema.
//!
//! CircleCI reports `null` for fields it has no value for, e.g. the committer
//! of a rebuilt job. Such fields decode as empty; absent fields do not.

use serde::{Deserialize, Deserializer};

use super::NormalizeEvent;
use crate::{BuildEvent, Provider, Result};

/// CircleCI notification body; the build lives under a top-level `payload`.
#[derive(Debug, Clone, Deserialize)]
pub struct CircleCiPayload {
    /// Build details
    pub payload: CircleCiBuild,
}

/// Build fields CircleCI reports on completion.
#[derive(Debug, Clone, Deserialize)]
pub struct CircleCiBuild {
    /// Link to the build page
    #[serde(deserialize_with = "null_as_default")]
    pub build_url: String,
    /// Build number
    #[serde(deserialize_with = "null_as_default")]
    pub build_num: u64,
    /// Branch that was built
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    /// Repository name
    #[serde(deserialize_with = "null_as_default")]
    pub reponame: String,
    /// Name of the committer
    #[serde(deserialize_with = "null_as_default")]
    pub committer_name: String,
    /// Build outcome, e.g. `success` or `failed`
    #[serde(deserialize_with = "null_as_default")]
    pub outcome: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl NormalizeEvent for CircleCiPayload {
    fn normalize(self) -> Result<BuildEvent> {
        let build = self.payload;

        Ok(BuildEvent {
            provider: Provider::CircleCi,
            build_number: build.build_num,
            author: build.committer_name,
            repository: build.reponame,
            branch: build.branch,
            outcome: build.outcome,
            build_url: build.build_url,
            commit_url: None,
            provider_name: None,
        })
    }
}
