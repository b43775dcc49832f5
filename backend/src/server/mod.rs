//! Server construction and middleware wiring.

mod config;

pub use config::{AppSettings, ServerConfig};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::warn;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{AuditStore, NoteStore};
use backend::domain::{AuditRecorder, DirectoryLoginService, DualWriteNoteStore, UserDirectory};
use backend::inbound::http::audit::list_audit;
use backend::inbound::http::auth::{current_session, login, logout};
use backend::inbound::http::health::ping;
use backend::inbound::http::notes::{create_note, delete_note, list_notes};
use backend::inbound::http::outage::toggle_outage;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{
    DieselAuditStore, DieselNoteRepository, MemoryAuditStore, MemoryNoteRepository, PoolConfig,
    shared_pool,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Select persistence adapters: PostgreSQL when a database is configured,
/// in-memory stores otherwise so the demo runs with zero infrastructure.
async fn build_stores(
    server_config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> std::io::Result<(Arc<dyn NoteStore>, Arc<dyn AuditStore>)> {
    match server_config.database_url() {
        Some(url) => {
            let pool = shared_pool(PoolConfig::new(url)).await.map_err(|err| {
                std::io::Error::other(format!("database pool initialisation failed: {err}"))
            })?;
            let notes =
                DualWriteNoteStore::new(Arc::new(DieselNoteRepository::new(pool.clone())), clock);
            Ok((Arc::new(notes), Arc::new(DieselAuditStore::new(pool.clone()))))
        }
        None => {
            warn!("no database configured; serving from in-memory stores");
            let notes =
                DualWriteNoteStore::new(Arc::new(MemoryNoteRepository::default()), clock);
            Ok((Arc::new(notes), Arc::new(MemoryAuditStore::default())))
        }
    }
}

struct AppDependencies {
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: &AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), deps.key.clone())
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(deps.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(deps.same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(24)),
        )
        .build();

    let app = App::new()
        .app_data(deps.http_state.clone())
        .wrap(session)
        .service(login)
        .service(logout)
        .service(current_session)
        .service(list_notes)
        .service(create_note)
        .service(delete_note)
        .service(list_audit)
        .service(toggle_outage)
        .service(ping);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// Wires the demo identity directory, the dual-write note store over the
/// selected persistence adapters, and the background audit consumer.
///
/// # Errors
/// Propagates [`std::io::Error`] when the database pool cannot be built or
/// when binding the socket fails.
pub async fn create_server(server_config: ServerConfig) -> std::io::Result<Server> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (notes, audit_log) = build_stores(&server_config, clock.clone()).await?;

    // The consumer task lives as long as any recorder clone does; the handle
    // is dropped because the process has no graceful-drain shutdown path.
    let (audit, _consumer) = AuditRecorder::spawn(audit_log.clone(), clock);

    let login_service =
        DirectoryLoginService::new(Arc::new(UserDirectory::with_demo_accounts()));
    let http_state = web::Data::new(HttpState::new(
        Arc::new(login_service),
        notes,
        audit,
        audit_log,
    ));

    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        database_url: _,
    } = server_config;

    let server = HttpServer::new(move || {
        build_app(&AppDependencies {
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
