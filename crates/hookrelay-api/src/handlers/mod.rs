//! HTTP request handlers for the relay.
//!
//! - `health` - liveness probe on `/`
//! - `webhook` - CI webhook relay on `/webhook/{auth}/{hash}`
//!
//! Every handler answers with a plain-text body.

pub mod health;
pub mod webhook;

pub use health::liveness_check;
pub use webhook::relay_webhook;
