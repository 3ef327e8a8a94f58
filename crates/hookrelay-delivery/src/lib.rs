//! Delivery of rendered build messages to Fleep chat hooks.
//!
//! A single form POST per message, bounded by a client timeout. Transport
//! failures surface as [`DeliveryError`]; HTTP error statuses do not.
//!
//! # Example
//!
//! ```no_run
//! use hookrelay_delivery::{DeliveryError, FleepClient};
//!
//! # async fn example() -> std::result::Result<(), DeliveryError> {
//! let client = FleepClient::with_defaults()?;
//! let response = client.forward("abcHash", "Build number 7 passed").await?;
//! println!("Fleep answered {}", response.status_code);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;

pub use client::{parse_hook_url, ClientConfig, FleepClient, ForwardResponse, DEFAULT_HOOK_URL};
pub use error::{DeliveryError, ErrorCategory, Result};

/// Default timeout for a single delivery, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
