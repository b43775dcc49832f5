//! Server configuration: layered application settings and the builder object
//! handed to `create_server`.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Application settings layered from CLI arguments, environment variables
/// (prefix `NOTES_`), and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NOTES")]
pub struct AppSettings {
    /// Socket address to bind, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; in-memory stores are used when unset.
    pub database_url: Option<String>,
    /// Path to the session signing/encryption key file.
    pub session_key_file: Option<String>,
    /// Send the session cookie with the `Secure` attribute.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
}

impl AppSettings {
    /// Parse the configured bind address, falling back to the default.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Configured session key path, falling back to the conventional secret
    /// mount point.
    pub fn session_key_file(&self) -> &str {
        self.session_key_file
            .as_deref()
            .unwrap_or("/var/run/secrets/session_key")
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
}

impl ServerConfig {
    /// Construct a server configuration from resolved settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            database_url: None,
        }
    }

    /// Attach a database URL so persistence adapters use PostgreSQL.
    #[must_use]
    pub fn with_database_url(mut self, database_url: Option<String>) -> Self {
        self.database_url = database_url;
        self
    }

    /// The database URL, when one is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}
