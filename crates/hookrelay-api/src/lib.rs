//! HTTP API of the CI to Fleep webhook relay.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

use std::time::Duration;

pub use auth::SharedSecret;
pub use config::Config;
pub use error::ApiError;
use hookrelay_delivery::FleepClient;
pub use server::{create_router, start_server};

/// State shared by all request handlers.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Secret the `auth` path segment must match
    pub secret: SharedSecret,
    /// Client used to reach the Fleep hooks
    pub fleep: FleepClient,
    /// Upper bound on the handling time of one inbound request
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates state from its parts, with the default request timeout.
    pub fn new(secret: SharedSecret, fleep: FleepClient) -> Self {
        let request_timeout = Duration::from_secs(config::DEFAULT_REQUEST_TIMEOUT);
        Self { secret, fleep, request_timeout }
    }

    /// Builds state from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation or the Fleep
    /// client cannot be built from it.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        let fleep = FleepClient::new(config.to_client_config())?;

        Ok(Self {
            secret: SharedSecret::new(config.webhook_secret.clone()),
            fleep,
            request_timeout: Duration::from_secs(config.request_timeout),
        })
    }
}
