//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing identity store, so handler tests stay deterministic with a test
//! double.

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::identity::Identity;

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    ///
    /// Unknown usernames and wrong secrets both surface as the identical
    /// `Unauthorized` error so responses never leak which field was wrong.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}
