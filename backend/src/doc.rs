//! OpenAPI document assembly for Swagger UI and tooling.

use utoipa::OpenApi;

use crate::domain::{ActorRole, AuditAction, AuditEvent, Error, ErrorCode, Identity, Note, Role};
use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::notes::CreateNoteRequest;
use crate::inbound::http::outage::ToggleResponse;
use crate::inbound::http::schemas::MessageResponse;

/// Aggregated OpenAPI description of the REST surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::audit::list_audit,
        crate::inbound::http::outage::toggle_outage,
        crate::inbound::http::health::ping,
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        CreateNoteRequest,
        ToggleResponse,
        MessageResponse,
        Identity,
        Role,
        Note,
        AuditEvent,
        AuditAction,
        ActorRole,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "auth", description = "Login, logout, and session inspection"),
        (name = "notes", description = "Personal notes over the dual-write store"),
        (name = "audit", description = "Admin-only audit log"),
        (name = "outage", description = "Simulated primary-database outage"),
        (name = "health", description = "Store health probes"),
    )
)]
pub struct ApiDoc;
