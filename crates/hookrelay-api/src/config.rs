//! Configuration management for the webhook relay.

use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use hookrelay_delivery::{
    client::ClientConfig, parse_hook_url, DEFAULT_HOOK_URL, DEFAULT_TIMEOUT_SECONDS,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Default inbound request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// Everything except the webhook secret has a usable default.
///
/// # Example
///
/// ```no_run
/// use hookrelay_api::Config;
///
/// let config = Config::load().expect("Failed to load configuration");
///
/// println!("Relay will bind to {}:{}", config.host, config.port);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Authentication
    /// Shared secret the `auth` path segment must match.
    ///
    /// Environment variable: `WEBHOOK_SECRET`
    #[serde(default, alias = "WEBHOOK_SECRET")]
    pub webhook_secret: String,

    // Server
    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,
    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,
    /// Inbound request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    // Delivery
    /// Base URL of the Fleep hooks; the hook hash is appended to it.
    ///
    /// Environment variable: `FLEEP_HOOK_URL`
    #[serde(default = "default_fleep_hook_url", alias = "FLEEP_HOOK_URL")]
    pub fleep_hook_url: String,
    /// Timeout for one delivery to Fleep in seconds.
    ///
    /// Environment variable: `DELIVERY_TIMEOUT_SECONDS`
    #[serde(default = "default_delivery_timeout", alias = "DELIVERY_TIMEOUT_SECONDS")]
    pub delivery_timeout_seconds: u64,

    // Logging
    /// Log filter directives.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl Config {
    /// Load configuration from defaults, config file, and environment variable
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the result fails
    /// validation, most commonly because `WEBHOOK_SECRET` is not set.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to the delivery client's configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            hook_url: self.fleep_hook_url.clone(),
            timeout: Duration::from_secs(self.delivery_timeout_seconds),
            ..ClientConfig::default()
        }
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Webhook secret masked for logging.
    pub fn webhook_secret_masked(&self) -> String {
        if self.webhook_secret.is_empty() {
            "<unset>".to_string()
        } else {
            format!("*** ({} chars)", self.webhook_secret.chars().count())
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing secret, a zero port or timeout, a
    /// delivery timeout that does not fit inside the request timeout, or an
    /// unparsable hook URL.
    pub fn validate(&self) -> Result<()> {
        if self.webhook_secret.is_empty() {
            anyhow::bail!("webhook_secret must be set (WEBHOOK_SECRET)");
        }

        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.delivery_timeout_seconds == 0 {
            anyhow::bail!("delivery_timeout_seconds must be greater than 0");
        }

        // A slower delivery would be cut off by the router with an empty 408.
        if self.delivery_timeout_seconds >= self.request_timeout {
            anyhow::bail!(
                "delivery_timeout_seconds ({}) must be less than request_timeout ({})",
                self.delivery_timeout_seconds,
                self.request_timeout
            );
        }

        let hook_url = parse_hook_url(&self.fleep_hook_url).context("Invalid fleep_hook_url")?;
        if !matches!(hook_url.scheme(), "http" | "https") {
            anyhow::bail!("fleep_hook_url must be an http(s) URL");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_secret: String::new(),
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            fleep_hook_url: default_fleep_hook_url(),
            delivery_timeout_seconds: default_delivery_timeout(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

fn default_fleep_hook_url() -> String {
    DEFAULT_HOOK_URL.to_string()
}

fn default_delivery_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_log_level() -> String {
    "info,hookrelay=debug,tower_http=debug".to_string()
}
