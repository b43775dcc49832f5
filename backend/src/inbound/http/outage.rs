//! Outage toggle endpoint.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{AuditAction, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Toggle response body.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    /// Whether reads are now served from the fallback collection.
    pub is_down: bool,
}

/// Flip the simulated-outage flag and return the new state.
///
/// Any authenticated user may flip it; the observed behaviour enforces no
/// admin restriction, which is preserved deliberately (see DESIGN.md) rather
/// than silently tightened.
#[utoipa::path(
    post,
    path = "/toggle_db",
    responses(
        (status = 200, description = "New flag state", body = ToggleResponse),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["outage"],
    operation_id = "toggleOutage"
)]
#[post("/toggle_db")]
pub async fn toggle_outage(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ToggleResponse>> {
    let identity = session.require_identity()?;
    let is_down = state.notes.toggle_outage();
    state
        .audit
        .record_identity(&identity, AuditAction::ToggleOutage);
    tracing::info!(user = identity.username(), is_down, "outage flag toggled");
    Ok(web::Json(ToggleResponse { is_down }))
}
