//! The authentication gate.
//!
//! The dashboard renders only when a user is present. The provider behind
//! `sign_in`/`sign_up`/`sign_out` is a pluggable collaborator: the bundled
//! [`LocalAccounts`] keeps a salted-digest registry under `.secrets`, and
//! [`MemoryAuth`] backs the test mode. Whatever the provider reports,
//! failures reach the user as one generic message.

use crate::utils;
use crate::{Config, Result};
use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// The one message shown for any authentication failure, whatever the cause.
pub const AUTH_FAILED_MESSAGE: &str = "Falha na autenticação. Por favor, tente novamente.";

/// The authenticated principal.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
}

/// Selects the authentication provider. When `PAINEL_IN_TEST_MODE` is set
/// and non-zero in length the mode will be `Mode::Test`, otherwise it will
/// be `Mode::Local`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// The local account registry under `.secrets/users.json`.
    Local,
    /// An in-memory provider with no persistence.
    Test,
}

impl Mode {
    pub fn from_env() -> Mode {
        match std::env::var("PAINEL_IN_TEST_MODE") {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Local,
        }
    }
}

/// The provider contract: resolve to a [`User`] on success, reject with an
/// internal error otherwise. Callers collapse every rejection to
/// [`AUTH_FAILED_MESSAGE`] before it reaches the user.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<User>;

    async fn sign_out(&self) -> Result<()>;
}

/// Returns the provider for `mode`.
pub fn provider(config: &Config, mode: Mode) -> Box<dyn AuthProvider> {
    match mode {
        Mode::Test => Box::<MemoryAuth>::default(),
        Mode::Local => Box::new(LocalAccounts::new(config.users_path())),
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// One registered account: the password is stored as a salted digest.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
struct AccountRecord {
    email: String,
    salt: String,
    digest: String,
}

/// The bundled provider: accounts registered through `sign_up` live in
/// `.secrets/users.json`.
#[derive(Debug, Clone)]
pub struct LocalAccounts {
    users_path: PathBuf,
}

impl LocalAccounts {
    pub fn new(users_path: impl Into<PathBuf>) -> Self {
        Self {
            users_path: users_path.into(),
        }
    }

    async fn accounts(&self) -> Vec<AccountRecord> {
        match utils::read(&self.users_path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    async fn save_accounts(&self, accounts: &[AccountRecord]) -> Result<()> {
        let data =
            serde_json::to_string_pretty(accounts).context("Unable to serialize accounts")?;
        utils::write(&self.users_path, data).await
    }
}

#[async_trait]
impl AuthProvider for LocalAccounts {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let accounts = self.accounts().await;
        let Some(account) = accounts.iter().find(|a| a.email == email) else {
            bail!("No account registered for '{email}'");
        };
        if digest(&account.salt, password) != account.digest {
            bail!("Wrong password for '{email}'");
        }
        Ok(User {
            email: email.to_string(),
        })
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            bail!("Email and password must not be empty");
        }
        let mut accounts = self.accounts().await;
        if accounts.iter().any(|a| a.email == email) {
            bail!("An account already exists for '{email}'");
        }
        let salt = Uuid::new_v4().to_string();
        accounts.push(AccountRecord {
            email: email.to_string(),
            digest: digest(&salt, password),
            salt,
        });
        self.save_accounts(&accounts).await?;
        Ok(User {
            email: email.to_string(),
        })
    }

    async fn sign_out(&self) -> Result<()> {
        Ok(())
    }
}

/// An in-memory provider for tests and the env-var test mode. Nothing is
/// persisted; accounts live for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryAuth {
    accounts: Mutex<HashMap<String, String>>,
}

impl MemoryAuth {
    /// Builds the provider with one account already registered.
    pub fn with_account(email: &str, password: &str) -> Self {
        let auth = MemoryAuth::default();
        auth.accounts
            .lock()
            .expect("accounts mutex")
            .insert(email.to_string(), password.to_string());
        auth
    }
}

#[async_trait]
impl AuthProvider for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        let accounts = self.accounts.lock().expect("accounts mutex");
        match accounts.get(email) {
            Some(stored) if stored == password => Ok(User {
                email: email.to_string(),
            }),
            _ => bail!("Unknown email or wrong password"),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<User> {
        if email.is_empty() || password.is_empty() {
            bail!("Email and password must not be empty");
        }
        let mut accounts = self.accounts.lock().expect("accounts mutex");
        if accounts.contains_key(email) {
            bail!("An account already exists for '{email}'");
        }
        accounts.insert(email.to_string(), password.to_string());
        Ok(User {
            email: email.to_string(),
        })
    }

    async fn sign_out(&self) -> Result<()> {
        Ok(())
    }
}

/// A persisted sign-in, stored at `.secrets/session.json` after a successful
/// `sign_in` and removed on `sign_out`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    user: User,
    signed_in_at: String,
}

impl Session {
    /// Creates a fresh session for `user` with a random token.
    pub fn new(user: User) -> Self {
        Self {
            token: Uuid::new_v4().to_string(),
            user,
            signed_in_at: chrono::Local::now().to_rfc3339(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Loads the persisted session, if any. A missing or corrupt session
    /// file means nobody is signed in; it is never an error.
    pub async fn load(path: &Path) -> Option<Session> {
        let content = utils::read(path).await.ok()?;
        serde_json::from_str(&content).ok()
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize session")?;
        utils::write(path, data).await
    }

    /// Removes the persisted session. Clearing an absent session is a no-op.
    pub async fn clear(path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Unable to remove session at {}", path.display()))
            }
        }
    }
}

/// The current-user gate. The dashboard renders only when a user is present.
#[derive(Debug, Clone)]
pub struct Gate {
    session: Option<Session>,
}

impl Gate {
    pub async fn load(config: &Config) -> Gate {
        let session = Session::load(&config.session_path()).await;
        if session.is_none() {
            debug!("No session present, the dashboard is gated");
        }
        Gate { session }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().map(Session::user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_digest_is_stable_and_salted() {
        assert_eq!(digest("salt", "senha"), digest("salt", "senha"));
        assert_ne!(digest("salt", "senha"), digest("other", "senha"));
        assert_ne!(digest("salt", "senha"), digest("salt", "outra"));
    }

    #[tokio::test]
    async fn test_local_accounts_sign_up_then_sign_in() {
        let dir = TempDir::new().unwrap();
        let provider = LocalAccounts::new(dir.path().join("users.json"));
        provider.sign_up("ana@email.com", "segredo").await.unwrap();
        let user = provider.sign_in("ana@email.com", "segredo").await.unwrap();
        assert_eq!(user.email, "ana@email.com");
    }

    #[tokio::test]
    async fn test_local_accounts_wrong_password_rejected() {
        let dir = TempDir::new().unwrap();
        let provider = LocalAccounts::new(dir.path().join("users.json"));
        provider.sign_up("ana@email.com", "segredo").await.unwrap();
        assert!(provider.sign_in("ana@email.com", "errada").await.is_err());
        assert!(provider.sign_in("bruno@email.com", "segredo").await.is_err());
    }

    #[tokio::test]
    async fn test_local_accounts_duplicate_sign_up_rejected() {
        let dir = TempDir::new().unwrap();
        let provider = LocalAccounts::new(dir.path().join("users.json"));
        provider.sign_up("ana@email.com", "segredo").await.unwrap();
        assert!(provider.sign_up("ana@email.com", "outra").await.is_err());
    }

    #[tokio::test]
    async fn test_local_accounts_do_not_store_plaintext() {
        let dir = TempDir::new().unwrap();
        let users_path = dir.path().join("users.json");
        let provider = LocalAccounts::new(&users_path);
        provider.sign_up("ana@email.com", "segredo").await.unwrap();
        let raw = tokio::fs::read_to_string(&users_path).await.unwrap();
        assert!(!raw.contains("segredo"));
    }

    #[tokio::test]
    async fn test_memory_auth() {
        let provider = MemoryAuth::with_account("ana@email.com", "segredo");
        assert!(provider.sign_in("ana@email.com", "segredo").await.is_ok());
        assert!(provider.sign_in("ana@email.com", "errada").await.is_err());
    }

    #[tokio::test]
    async fn test_session_round_trip_and_clear() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        assert!(Session::load(&path).await.is_none());

        let session = Session::new(User {
            email: "ana@email.com".to_string(),
        });
        session.save(&path).await.unwrap();
        let loaded = Session::load(&path).await.unwrap();
        assert_eq!(loaded, session);

        Session::clear(&path).await.unwrap();
        assert!(Session::load(&path).await.is_none());
        // Clearing again is a no-op.
        Session::clear(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_gate_reflects_session_presence() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("painel");
        let config = Config::create(&home, None).await.unwrap();

        let gate = Gate::load(&config).await;
        assert!(!gate.is_signed_in());

        let session = Session::new(User {
            email: "ana@email.com".to_string(),
        });
        session.save(&config.session_path()).await.unwrap();

        let gate = Gate::load(&config).await;
        assert_eq!(gate.current_user().unwrap().email, "ana@email.com");
    }
}
