//! CI webhook relay handler.
//!
//! A request moves through decode, render, authenticate and forward in that
//! order; the first failing step decides the response. The Fleep hook is
//! never contacted before the secret has been checked.

use axum::{
    extract::{Path, State},
    http::{header::USER_AGENT, HeaderMap},
};
use bytes::Bytes;
use hookrelay_core::{decode, render_message, Provider};
use hookrelay_delivery::ErrorCategory;
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn, Span};

use crate::{ApiError, AppState};

/// Path parameters of `/webhook/{auth}/{hash}`.
///
/// Deliberately not `Debug`: `auth` is the shared secret.
#[derive(Deserialize)]
pub struct WebhookParams {
    /// Candidate shared secret
    pub auth: String,
    /// Identifier of the destination Fleep hook
    pub hash: String,
}

/// Relays a CI build notification to a Fleep hook.
///
/// The provider is chosen from the `User-Agent` header.
///
/// # Errors
///
/// - 500 `Bad request.` if the body does not decode for the provider
/// - 401 `Unauthorized.` if `auth` does not match the configured secret
/// - 500 `Error calling Fleep Hook` if the hook cannot be reached
#[instrument(
    name = "relay_webhook",
    skip_all,
    fields(hook = %params.hash, provider = tracing::field::Empty)
)]
pub async fn relay_webhook(
    State(state): State<AppState>,
    Path(params): Path<WebhookParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<String, ApiError> {
    let user_agent = headers.get(USER_AGENT).and_then(|v| v.to_str().ok());
    let provider = Provider::from_user_agent(user_agent);
    Span::current().record("provider", tracing::field::display(provider));

    info!(payload_size = body.len(), "Processing webhook");

    let event = decode(provider, &body).map_err(|e| {
        warn!(error = %e, "Rejecting malformed payload");
        ApiError::from(e)
    })?;

    let message = render_message(&event);
    debug!(build_number = event.build_number, message_len = message.len(), "Rendered message");

    if !state.secret.verify(&params.auth) {
        warn!("Rejecting webhook with invalid secret");
        return Err(ApiError::Unauthorized);
    }

    let response = state.fleep.forward(&params.hash, &message).await.map_err(|e| {
        error!(error = %e, category = %ErrorCategory::from(&e), "Error during POST request to Fleep");
        ApiError::from(e)
    })?;

    info!(status = response.status_code, "Proxied webhook to Fleep");

    Ok(format!("Successfully proxied hook {}", params.hash))
}
