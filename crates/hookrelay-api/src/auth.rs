//! Shared-secret authentication of inbound webhooks.
//!
//! CI providers cannot sign requests for us, so the secret travels as a URL
//! path segment and is compared verbatim with the configured value.

use std::{fmt, sync::Arc};

/// Secret that the `auth` path segment must equal.
///
/// Never printed; `Debug` output is masked.
#[derive(Clone)]
pub struct SharedSecret(Arc<str>);

impl SharedSecret {
    /// Wraps the configured secret.
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    /// Returns `true` only if `candidate` equals the secret exactly.
    ///
    /// No trimming or case folding is applied.
    pub fn verify(&self, candidate: &str) -> bool {
        &*self.0 == candidate
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(***)")
    }
}
