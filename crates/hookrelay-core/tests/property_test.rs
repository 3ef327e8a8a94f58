//! Property-based tests for decoding and rendering invariants.
//!
//! Covers field placement in rendered messages, author extraction from
//! BuildKite commit metadata and commit link derivation for arbitrary input.

#![allow(clippy::unwrap_used)]

use hookrelay_core::{decode, render_message, PayloadError, Provider};
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use serde_json::json;

/// Deterministic property test configuration for CI stability.
fn proptest_config() -> ProptestConfig {
    ProptestConfig { cases: 64, failure_persistence: None, ..ProptestConfig::default() }
}

/// Printable field values without the quote and brace characters that would
/// make the assertions ambiguous.
fn field() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ._/-]{1,30}").unwrap()
}

fn circleci_body(
    number: u64,
    author: &str,
    repository: &str,
    branch: &str,
    outcome: &str,
) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "payload": {
            "build_url": "https://circleci.com/gh/acme/api/1",
            "build_num": number,
            "branch": branch,
            "reponame": repository,
            "committer_name": author,
            "outcome": outcome,
        }
    }))
    .unwrap()
}

fn buildkite_body(provider_id: &str, commit_blob: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "build": {
            "number": 3,
            "state": "passed",
            "web_url": "https://buildkite.com/acme/api/builds/3",
            "commit": "a1b2c3d",
            "branch": "main",
            "meta_data": { "buildkite:git:commit": commit_blob },
        },
        "pipeline": {
            "slug": "api",
            "provider": { "id": provider_id, "settings": { "repository": "acme/api" } },
        },
    }))
    .unwrap()
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn circleci_fields_appear_in_template_order(
        number in any::<u64>(),
        author in field(),
        repository in field(),
        branch in field(),
        outcome in field(),
    ) {
        let body = circleci_body(number, &author, &repository, &branch, &outcome);
        let message = render_message(&decode(Provider::CircleCi, &body).unwrap());

        let expected_prefix = format!(
            "Build number {number} based on a commit by {author} to a {repository} repository \
             branch {branch} completed on CircleCI with a status of {outcome}."
        );
        prop_assert!(message.starts_with(&expected_prefix), "message: {}", message);
    }

    #[test]
    fn buildkite_author_is_the_captured_group(
        name in "[A-Z][a-z]{1,10}( [A-Z][a-z]{1,10})?",
        email in "[a-z]{1,10}@[a-z]{1,10}\\.com",
        rest in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let blob = format!("Author: {name} <{email}>\nA{rest}");
        let event = decode(Provider::BuildKite, &buildkite_body("github", &blob)).unwrap();

        prop_assert_eq!(event.author, format!("{name} <{email}>"));
    }

    #[test]
    fn buildkite_without_author_line_is_rejected(blob in "[a-zA-Z0-9 \n]{0,80}") {
        let result = decode(Provider::BuildKite, &buildkite_body("github", &blob));

        prop_assert!(matches!(result, Err(PayloadError::MissingAuthor)));
    }

    #[test]
    fn unknown_hosts_render_an_empty_commit_link(provider_id in "[a-z]{1,12}") {
        prop_assume!(provider_id != "github" && provider_id != "bitbucket");

        let body = buildkite_body(&provider_id, "Author: Ada <ada@example.com>\n");
        let event = decode(Provider::BuildKite, &body).unwrap();
        prop_assert_eq!(event.commit_url.as_deref(), None);

        let message = render_message(&event);
        prop_assert!(message.contains(" available on <<"), "message: {}", message);
    }
}
