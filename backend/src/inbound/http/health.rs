//! Store health endpoint.

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Probe the active note collection.
///
/// Unauthenticated on purpose: load balancers and the demo UI poll it. The
/// probe is an idempotent read, so the store retries it once transparently
/// before reporting failure.
#[utoipa::path(
    get,
    path = "/ping",
    responses(
        (status = 200, description = "Active collection reachable", body = MessageResponse),
        (status = 500, description = "Active collection unreachable", body = Error)
    ),
    tags = ["health"],
    operation_id = "ping",
    security([])
)]
#[get("/ping")]
pub async fn ping(state: web::Data<HttpState>) -> ApiResult<web::Json<MessageResponse>> {
    state.notes.ping().await?;
    Ok(web::Json(MessageResponse::new("ok")))
}
