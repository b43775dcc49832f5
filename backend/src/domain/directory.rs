//! Fixed in-memory identity store and the directory-backed login service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::LoginCredentials;
use crate::domain::error::Error;
use crate::domain::identity::Identity;
use crate::domain::ports::LoginService;
use crate::domain::user::{Role, UserAccount};

/// Seam between stored secrets and candidate secrets.
///
/// The directory never compares secrets itself; swapping this implementation
/// for a hashed scheme changes nothing for callers.
pub trait SecretVerifier: Send + Sync {
    /// Whether the candidate matches the stored secret.
    fn verify(&self, candidate: &str, stored: &str) -> bool;
}

/// Byte-for-byte comparison of the stored secret.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectComparisonVerifier;

impl SecretVerifier for DirectComparisonVerifier {
    fn verify(&self, candidate: &str, stored: &str) -> bool {
        candidate == stored
    }
}

/// Fixed table of accounts built at process start.
///
/// Read-only at runtime: no registration, no persistence, no mutation.
pub struct UserDirectory {
    accounts: Vec<UserAccount>,
    verifier: Box<dyn SecretVerifier>,
}

impl UserDirectory {
    /// Build a directory over the given accounts and verifier.
    pub fn new(accounts: Vec<UserAccount>, verifier: Box<dyn SecretVerifier>) -> Self {
        Self { accounts, verifier }
    }

    /// The demo account table used by the server and the test suites.
    pub fn with_demo_accounts() -> Self {
        Self::new(
            vec![
                UserAccount::new(1, "alice", "alice-secret", Role::User),
                UserAccount::new(2, "bob", "bob-secret", Role::User),
                UserAccount::new(3, "admin", "admin-secret", Role::Admin),
            ],
            Box::new(DirectComparisonVerifier),
        )
    }

    /// Resolve credentials to an identity.
    ///
    /// Returns `None` for unknown usernames and for wrong secrets alike;
    /// callers cannot distinguish the two.
    pub fn verify_credentials(&self, username: &str, secret: &str) -> Option<Identity> {
        let account = self
            .accounts
            .iter()
            .find(|account| account.username() == username)?;
        self.verifier
            .verify(secret, account.secret())
            .then(|| account.identity())
    }
}

/// [`LoginService`] implementation over the fixed directory.
#[derive(Clone)]
pub struct DirectoryLoginService {
    directory: Arc<UserDirectory>,
}

impl DirectoryLoginService {
    /// Create a login service over the given directory.
    pub fn new(directory: Arc<UserDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl LoginService for DirectoryLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        self.directory
            .verify_credentials(credentials.username(), credentials.password())
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
