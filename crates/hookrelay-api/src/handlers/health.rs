//! Liveness probe.

use tracing::{debug, instrument};

/// Body of every liveness response.
pub const ALIVE_BODY: &str = "I'm alive.";

/// Liveness check endpoint for load balancers and uptime monitors.
///
/// Served for both `GET /` and `POST /`. It touches no other component and
/// always answers 200.
#[instrument(name = "liveness_check")]
pub async fn liveness_check() -> &'static str {
    debug!("Performing liveness check");
    ALIVE_BODY
}
