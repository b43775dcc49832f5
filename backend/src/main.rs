//! Backend entry-point: configuration, logging, and server bootstrap.

mod server;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use std::env;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("configuration error: {err}")))?;

    let key = load_session_key(&settings)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| std::io::Error::other(format!("invalid bind address: {err}")))?;

    let config = ServerConfig::new(key, settings.cookie_secure, SameSite::Lax, bind_addr)
        .with_database_url(settings.database_url.clone());

    server::create_server(config).await?.await
}

/// Load the session signing/encryption key from disk.
///
/// Outside debug builds a missing key file is fatal unless the operator
/// explicitly opts into an ephemeral key (which invalidates every session on
/// restart).
fn load_session_key(settings: &AppSettings) -> std::io::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("NOTES_ALLOW_EPHEMERAL_KEY").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}
