//! Note endpoints.
//!
//! ```text
//! GET /notes
//! POST /notes {"content":"hello"}
//! DELETE /notes/{id}
//! ```
//!
//! Handlers resolve the caller first, consult the authorization policy, call
//! the dual-write store, then record the action. Audit recording is
//! fire-and-forget and can never fail the request.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{
    AuditAction, Error, Note, NoteContent, NoteContentValidationError, NoteId, policy,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Create-note request body.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateNoteRequest {
    /// Note body.
    pub content: String,
}

fn map_content_error(err: NoteContentValidationError) -> Error {
    let code = match err {
        NoteContentValidationError::Empty => "empty_content",
        NoteContentValidationError::TooLong { .. } => "content_too_long",
    };
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "content", "code": code }))
}

/// List the caller's visible notes, newest first.
///
/// Admins see every note; everyone else sees only their own.
#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "Visible notes", body = [Note]),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Note>>> {
    let identity = session.require_identity()?;
    let notes = state.notes.list_notes().await?;
    Ok(web::Json(policy::visible_notes(&identity, notes)))
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Created note", body = Note),
        (status = 400, description = "Invalid content", body = Error),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["notes"],
    operation_id = "createNote"
)]
#[post("/notes")]
pub async fn create_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateNoteRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_identity()?;
    let content = NoteContent::new(payload.into_inner().content).map_err(map_content_error)?;
    let note = state.notes.create_note(content, &identity).await?;
    state
        .audit
        .record_identity(&identity, AuditAction::CreateNote);
    Ok(HttpResponse::Created().json(note))
}

/// Delete a note by id.
///
/// Owners and admins may delete; everyone else gets a 403 and the denial is
/// recorded before the error returns.
#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note identifier")
    ),
    responses(
        (status = 200, description = "Note deleted", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Not the owner and not an admin", body = Error),
        (status = 404, description = "No such note", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("/notes/{id}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let identity = session.require_identity()?;
    let id = NoteId::new(path.into_inner());

    let Some(note) = state.notes.find_note(id).await? else {
        return Err(Error::not_found("note not found"));
    };

    if !policy::can_delete(&identity, &note) {
        state
            .audit
            .record_identity(&identity, AuditAction::DeleteNoteDenied);
        return Err(Error::forbidden("you may only delete your own notes"));
    }

    state.notes.delete_note(id).await?;
    state
        .audit
        .record_identity(&identity, AuditAction::DeleteNote);
    Ok(web::Json(MessageResponse::new("note deleted")))
}
