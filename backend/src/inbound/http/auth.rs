//! Authentication endpoints.
//!
//! ```text
//! POST /login {"username":"alice","password":"alice-secret"}
//! GET|POST /logout
//! GET /session
//! ```

use actix_web::{get, post, route, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    ActorRole, AuditAction, Error, Identity, LoginCredentials, LoginValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Account secret.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Login response body: the authenticated identity.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Resolved identity for the established session.
    pub user: Identity,
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate and establish a session.
///
/// Wrong usernames and wrong passwords produce the identical 401 body so the
/// response never reveals which field was wrong. Every attempt lands in the
/// audit log; failed attempts carry the attempted username with role
/// `unknown`.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse, headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;

    match state.login.authenticate(&credentials).await {
        Ok(identity) => {
            session.persist_identity(&identity)?;
            state
                .audit
                .record_identity(&identity, AuditAction::LoginSuccess);
            Ok(web::Json(LoginResponse { user: identity }))
        }
        Err(err) => {
            state.audit.record(
                credentials.username(),
                ActorRole::Unknown,
                AuditAction::LoginFailed,
            );
            Err(err)
        }
    }
}

/// End the caller's session.
///
/// Registered for GET and POST: the original UI linked logout as a plain
/// anchor while API clients POST it.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Session ended", body = MessageResponse),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[route("/logout", method = "GET", method = "POST")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MessageResponse>> {
    let identity = session.require_identity()?;
    session.purge();
    state.audit.record_identity(&identity, AuditAction::Logout);
    Ok(web::Json(MessageResponse::new("logged out")))
}

/// Return the caller's resolved identity.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current identity", body = Identity),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<Identity>> {
    Ok(web::Json(session.require_identity()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;
    use crate::inbound::http::test_utils::{
        demo_http_state, test_session_middleware, wait_for_audit_events,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;
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
            .service(login)
            .service(logout)
            .service(current_session)
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

    #[rstest]
    #[case("   ", "password", "username", "empty_username")]
    #[case("alice", "", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] detail_code: &str,
    ) {
        let (state, _audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        let details = value.get("details").expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some(detail_code)
        );
    }

    #[rstest]
    #[case("alice", "wrong-secret")]
    #[case("ghost", "alice-secret")]
    #[actix_web::test]
    async fn login_failures_share_one_response_shape(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let (state, _audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&LoginRequest {
                username: username.into(),
                password: password.into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("invalid credentials")
        );
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("unauthorized")
        );
    }

    #[actix_web::test]
    async fn failed_login_is_audited_with_unknown_role() {
        let (state, audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&LoginRequest {
                username: "ghost".into(),
                password: "whatever".into(),
            })
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let events = wait_for_audit_events(&audit, 1).await;
        let event = events.first().expect("one event");
        assert_eq!(event.action(), AuditAction::LoginFailed);
        assert_eq!(event.username(), "ghost");
        assert_eq!(event.role(), ActorRole::Unknown);
    }

    #[actix_web::test]
    async fn successful_login_returns_identity_and_establishes_session() {
        let (state, audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;

        let login_req = actix_test::TestRequest::post()
            .uri("/login")
            .set_json(&LoginRequest {
                username: "alice".into(),
                password: "alice-secret".into(),
            })
            .to_request();
        let login_res = actix_test::call_service(&app, login_req).await;
        assert_eq!(login_res.status(), StatusCode::OK);
        let cookie = login_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("session cookie")
            .into_owned();
        let value: Value = actix_test::read_body_json(login_res).await;
        let user = value.get("user").expect("user present");
        assert_eq!(user.get("id").and_then(Value::as_i64), Some(1));
        assert_eq!(user.get("role").and_then(Value::as_str), Some("user"));

        let session_req = actix_test::TestRequest::get()
            .uri("/session")
            .cookie(cookie)
            .to_request();
        let session_res = actix_test::call_service(&app, session_req).await;
        assert_eq!(session_res.status(), StatusCode::OK);
        let identity: Identity = actix_test::read_body_json(session_res).await;
        assert_eq!(identity, Identity::new(1, "alice", Role::User));

        let events = wait_for_audit_events(&audit, 1).await;
        assert_eq!(
            events.first().map(crate::domain::AuditEvent::action),
            Some(AuditAction::LoginSuccess)
        );
    }

    #[actix_web::test]
    async fn logout_purges_the_session_and_is_audited() {
        let (state, audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let cookie = login_and_get_cookie(&app, "alice", "alice-secret").await;

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::OK);
        let cleared = logout_res
            .response()
            .cookies()
            .find(|c| c.name() == "session")
            .expect("logout rewrites the session cookie")
            .into_owned();

        let session_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/session")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(session_res.status(), StatusCode::UNAUTHORIZED);

        let events = wait_for_audit_events(&audit, 2).await;
        assert!(
            events
                .iter()
                .any(|event| event.action() == AuditAction::Logout
                    && event.username() == "alice")
        );
    }

    #[rstest]
    #[case("/session")]
    #[case("/logout")]
    #[actix_web::test]
    async fn authenticated_endpoints_reject_without_session(#[case] uri: &str) {
        let (state, _audit) = demo_http_state();
        let app = actix_test::init_service(test_app(state)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(uri).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
