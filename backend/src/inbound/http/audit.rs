//! Audit log endpoint (admin only).

use actix_web::{get, web};

use crate::domain::ports::AuditPersistenceError;
use crate::domain::{AuditEvent, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

fn map_audit_error(err: AuditPersistenceError) -> Error {
    tracing::warn!(error = %err, "audit listing failed");
    match err {
        AuditPersistenceError::Connection { .. } => Error::unavailable("audit store unavailable"),
        AuditPersistenceError::Query { .. } => Error::internal("audit store failure"),
    }
}

/// List every audit event, newest first.
#[utoipa::path(
    get,
    path = "/audit",
    responses(
        (status = 200, description = "Audit events", body = [AuditEvent]),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Not an admin", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["audit"],
    operation_id = "listAudit"
)]
#[get("/audit")]
pub async fn list_audit(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<AuditEvent>>> {
    let identity = session.require_identity()?;
    if !identity.role().is_admin() {
        return Err(Error::forbidden("audit log is admin-only"));
    }
    let events = state.audit_log.list_all().await.map_err(map_audit_error)?;
    Ok(web::Json(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AuditAction;
    use crate::inbound::http::auth::LoginRequest;
    use crate::inbound::http::test_utils::{
        demo_http_state, test_session_middleware, wait_for_audit_events,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use serde_json::Value;

    fn test_app(
        state: crate::inbound::http::state::HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(crate::inbound::http::auth::login)
            .service(list_audit)
    }

    async fn login_and_get_cookie(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        username: &str,
        password: &str,
    ) -> actix_web::cookie::Cookie<'static> {
        let login_req = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request();
        let login_res = actix_test::call_service(app, login_req).await;
        assert!(login_res.status().is_success());
        login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    #[actix_web::test]
    async fn audit_requires_a_session() {
        let (state, _audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/audit").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn non_admin_is_forbidden() {
        let (state, _audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = login_and_get_cookie(&app, "alice", "alice-secret").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/audit")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn admin_reads_events_newest_first() {
        let (state, audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let _alice = login_and_get_cookie(&app, "alice", "alice-secret").await;
        let admin = login_and_get_cookie(&app, "admin", "admin-secret").await;

        // Two LOGIN_SUCCESS events must be persisted before the read.
        wait_for_audit_events(&audit, 2).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/audit")
                .cookie(admin)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let events: Value = actix_test::read_body_json(response).await;
        let events = events.as_array().expect("array body");
        assert_eq!(events.len(), 2);
        assert!(
            events
                .iter()
                .all(|event| event.get("action").and_then(Value::as_str)
                    == Some(AuditAction::LoginSuccess.as_str()))
        );

        let timestamps: Vec<&str> = events
            .iter()
            .filter_map(|event| event.get("timestamp").and_then(Value::as_str))
            .collect();
        let mut sorted = timestamps.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(timestamps, sorted);
    }
}
