//! Decoding of full provider webhook bodies.
//!
//! Bodies mirror what CircleCI and BuildKite actually send, including fields
//! the relay ignores.

use hookrelay_core::{decode, render_message, PayloadError, Provider};

const CIRCLECI_BODY: &str = r#"{
  "payload": {
    "vcs_url": "https://github.com/acme/api",
    "build_url": "https://circleci.com/gh/acme/api/1024",
    "build_num": 1024,
    "branch": "release/2.1",
    "vcs_revision": "0c9a1f7e",
    "committer_name": "Margaret Hamilton",
    "committer_email": "margaret@example.com",
    "subject": "Bump version",
    "status": "failed",
    "outcome": "failed",
    "username": "acme",
    "reponame": "api",
    "lifecycle": "finished",
    "steps": []
  }
}"#;

const BUILDKITE_BODY: &str = r#"{
  "event": "build.finished",
  "build": {
    "id": "f62a1b4d-10f9-4790-bc1c-e2c3a0c80983",
    "url": "https://api.buildkite.com/v2/organizations/acme/pipelines/api/builds/77",
    "web_url": "https://buildkite.com/acme/api/builds/77",
    "number": 77,
    "state": "failed",
    "message": "Fix flaky test",
    "commit": "9fceb02d0ae598e95dc970b74767f19372d61af8",
    "branch": "main",
    "meta_data": {
      "buildkite:git:commit": "commit 9fceb02d0ae598e95dc970b74767f19372d61af8\nAuthor: Linus Torvalds <linus@example.org>\nDate:   Tue Oct 13 09:12:00 2026 +0200\n\n    Fix flaky test\n"
    }
  },
  "pipeline": {
    "id": "5c0d6a3e-4a2c-4b55-9c7a-1f5f3e0d2a11",
    "slug": "api",
    "name": "API",
    "repository": "git@bitbucket.org:acme/api.git",
    "provider": {
      "id": "bitbucket",
      "settings": {
        "repository": "acme/api",
        "build_pull_requests": true
      }
    }
  },
  "sender": { "id": "8a7f", "name": "Linus" }
}"#;

#[test]
fn circleci_body_decodes_and_renders() {
    let event = decode(Provider::CircleCi, CIRCLECI_BODY.as_bytes()).expect("valid CircleCI body");

    assert_eq!(
        render_message(&event),
        "Build number 1024 based on a commit by Margaret Hamilton to a api repository branch \
         release/2.1 completed on CircleCI with a status of failed. More information is available \
         on https://circleci.com/gh/acme/api/1024<<CircleCI>>."
    );
}

#[test]
fn buildkite_body_decodes_and_renders() {
    let event =
        decode(Provider::BuildKite, BUILDKITE_BODY.as_bytes()).expect("valid BuildKite body");

    assert_eq!(event.author, "Linus Torvalds <linus@example.org>");
    assert_eq!(
        event.commit_url.as_deref(),
        Some("https://bitbucket.org/acme/api/commits/9fceb02d0ae598e95dc970b74767f19372d61af8")
    );

    let message = render_message(&event);
    assert!(message.contains("completed on BuildKite with a status of failed."));
    assert!(message.ends_with(
        "Details on the commit are available on \
         https://bitbucket.org/acme/api/commits/9fceb02d0ae598e95dc970b74767f19372d61af8<<Bitbucket>>."
    ));
}

#[test]
fn buildkite_body_sent_without_marker_is_rejected() {
    let result = decode(Provider::CircleCi, BUILDKITE_BODY.as_bytes());

    assert!(matches!(result, Err(PayloadError::InvalidJson { provider: Provider::CircleCi, .. })));
}

#[test]
fn truncated_body_is_rejected() {
    let truncated = &CIRCLECI_BODY[..CIRCLECI_BODY.len() / 2];

    assert!(decode(Provider::CircleCi, truncated.as_bytes()).is_err());
}

#[test]
fn empty_body_is_rejected() {
    assert!(decode(Provider::CircleCi, b"").is_err());
    assert!(decode(Provider::BuildKite, b"").is_err());
}
