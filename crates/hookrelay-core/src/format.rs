//! Chat message rendering.
//!
//! Messages are written in Fleep markup, where `url<<label>>` renders as a
//! link titled `label`. Event fields are inserted verbatim; no escaping is
//! applied.

use std::fmt;

use crate::{BuildEvent, Provider};

/// Fleep link markup: `url<<label>>`.
///
/// Either part may be empty, which still renders the markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleepLink<'a> {
    /// Link target
    pub url: &'a str,
    /// Text shown for the link
    pub label: &'a str,
}

impl<'a> FleepLink<'a> {
    /// Creates a link to `url` titled `label`.
    pub fn new(url: &'a str, label: &'a str) -> Self {
        Self { url, label }
    }
}

impl fmt::Display for FleepLink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<<{}>>", self.url, self.label)
    }
}

/// Renders the chat message for a build event.
///
/// The template is chosen by the event's provider tag.
///
/// # Example
///
/// ```
/// use hookrelay_core::{render_message, BuildEvent, Provider};
///
/// let event = BuildEvent {
///     provider: Provider::CircleCi,
///     build_number: 7,
///     author: "Ada".into(),
///     repository: "api".into(),
///     branch: "main".into(),
///     outcome: "success".into(),
///     build_url: "https://circleci.com/gh/acme/api/7".into(),
///     commit_url: None,
///     provider_name: None,
/// };
///
/// assert!(render_message(&event).ends_with("https://circleci.com/gh/acme/api/7<<CircleCI>>."));
/// ```
pub fn render_message(event: &BuildEvent) -> String {
    match event.provider {
        Provider::CircleCi => render_circleci(event),
        Provider::BuildKite => render_buildkite(event),
    }
}

fn render_circleci(event: &BuildEvent) -> String {
    let BuildEvent { build_number, author, repository, branch, outcome, build_url, .. } = event;
    let build_link = FleepLink::new(build_url, Provider::CircleCi.display_name());

    format!(
        "Build number {build_number} based on a commit by {author} to a {repository} repository \
         branch {branch} completed on CircleCI with a status of {outcome}. More information is \
         available on {build_link}."
    )
}

fn render_buildkite(event: &BuildEvent) -> String {
    let BuildEvent { build_number, author, repository, branch, outcome, build_url, .. } = event;
    let build_link = FleepLink::new(build_url, Provider::BuildKite.display_name());
    let commit_link = FleepLink::new(
        event.commit_url.as_deref().unwrap_or_default(),
        event.provider_name.as_deref().unwrap_or_default(),
    );

    format!(
        "Build number {build_number} based on a commit by {author} to a {repository} repository \
         branch {branch} completed on BuildKite with a status of {outcome}. Additional build \
         information is available on {build_link}. Details on the commit are available on \
         {commit_link}."
    )
}
