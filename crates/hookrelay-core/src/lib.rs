//! Core build event model, provider decoders and message rendering.
//!
//! Incoming CI webhooks are decoded into a provider-agnostic [`BuildEvent`]
//! and rendered into the chat message that is relayed to Fleep. Nothing in
//! this crate performs I/O; every operation is a pure transformation of the
//! request body.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod format;
pub mod models;
pub mod providers;

pub use error::{PayloadError, Result};
pub use format::{render_message, FleepLink};
pub use models::{BuildEvent, Provider};
pub use providers::{decode, NormalizeEvent, ProviderPayload};
