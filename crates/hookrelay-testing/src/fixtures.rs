//! Payload builders for CircleCI and BuildKite webhooks.
//!
//! Defaults describe a plausible finished build; tests override only the
//! fields they care about.

use serde_json::{json, Map, Value};

/// Builder for CircleCI notification bodies.
#[derive(Debug, Clone)]
pub struct CircleCiBuilder {
    build_num: u64,
    branch: String,
    reponame: String,
    committer_name: String,
    outcome: String,
    build_url: String,
}

impl Default for CircleCiBuilder {
    fn default() -> Self {
        Self {
            build_num: 42,
            branch: "main".to_string(),
            reponame: "api".to_string(),
            committer_name: "Ada Lovelace".to_string(),
            outcome: "success".to_string(),
            build_url: "https://circleci.com/gh/acme/api/42".to_string(),
        }
    }
}

impl CircleCiBuilder {
    /// Creates a builder with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the build number.
    pub fn build_num(mut self, build_num: u64) -> Self {
        self.build_num = build_num;
        self
    }

    /// Sets the branch.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Sets the repository name.
    pub fn reponame(mut self, reponame: impl Into<String>) -> Self {
        self.reponame = reponame.into();
        self
    }

    /// Sets the committer name.
    pub fn committer_name(mut self, committer_name: impl Into<String>) -> Self {
        self.committer_name = committer_name.into();
        self
    }

    /// Sets the outcome.
    pub fn outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    /// Sets the build URL.
    pub fn build_url(mut self, build_url: impl Into<String>) -> Self {
        self.build_url = build_url.into();
        self
    }

    /// Builds the JSON body.
    pub fn build(&self) -> Value {
        json!({
            "payload": {
                "build_url": self.build_url,
                "build_num": self.build_num,
                "branch": self.branch,
                "reponame": self.reponame,
                "committer_name": self.committer_name,
                "outcome": self.outcome,
                "lifecycle": "finished",
            }
        })
    }

    /// Builds the serialized body.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.build().to_string().into_bytes()
    }
}

/// Builder for BuildKite `build.finished` bodies.
#[derive(Debug, Clone)]
pub struct BuildKiteBuilder {
    number: u64,
    state: String,
    web_url: String,
    commit: String,
    branch: String,
    commit_blob: Option<String>,
    slug: String,
    provider_id: String,
    repository: String,
}

impl Default for BuildKiteBuilder {
    fn default() -> Self {
        let commit = "9fceb02d0ae598e95dc970b74767f19372d61af8".to_string();

        Self {
            number: 77,
            state: "passed".to_string(),
            web_url: "https://buildkite.com/acme/api/builds/77".to_string(),
            commit_blob: Some(commit_blob(&commit, "Grace Hopper <grace@example.com>")),
            commit,
            branch: "main".to_string(),
            slug: "api".to_string(),
            provider_id: "github".to_string(),
            repository: "acme/api".to_string(),
        }
    }
}

impl BuildKiteBuilder {
    /// Creates a builder with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the build number.
    pub fn number(mut self, number: u64) -> Self {
        self.number = number;
        self
    }

    /// Sets the build state.
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Sets the branch.
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Sets the commit author line to `Author: {author}`.
    pub fn author(mut self, author: &str) -> Self {
        self.commit_blob = Some(commit_blob(&self.commit, author));
        self
    }

    /// Replaces the whole `buildkite:git:commit` metadata value.
    pub fn commit_blob(mut self, blob: impl Into<String>) -> Self {
        self.commit_blob = Some(blob.into());
        self
    }

    /// Omits the `buildkite:git:commit` metadata entry.
    pub fn without_commit_metadata(mut self) -> Self {
        self.commit_blob = None;
        self
    }

    /// Sets the source-control provider id, e.g. `github` or `bitbucket`.
    pub fn provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    /// Sets the repository path on the source-control host.
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = repository.into();
        self
    }

    /// Commit SHA used in the payload.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    /// Builds the JSON body.
    pub fn build(&self) -> Value {
        let mut meta_data = Map::new();
        if let Some(blob) = &self.commit_blob {
            meta_data.insert("buildkite:git:commit".to_string(), Value::String(blob.clone()));
        }

        json!({
            "event": "build.finished",
            "build": {
                "number": self.number,
                "state": self.state,
                "web_url": self.web_url,
                "commit": self.commit,
                "branch": self.branch,
                "meta_data": meta_data,
            },
            "pipeline": {
                "slug": self.slug,
                "provider": {
                    "id": self.provider_id,
                    "settings": { "repository": self.repository },
                },
            },
        })
    }

    /// Builds the serialized body.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.build().to_string().into_bytes()
    }
}

fn commit_blob(commit: &str, author: &str) -> String {
    format!(
        "commit {commit}\nAuthor: {author}\nDate:   Tue Oct 13 09:12:00 2026 +0200\n\n    Fix flaky test\n"
    )
}
