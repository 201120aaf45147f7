//! Auth command handlers.
//!
//! Whatever the provider reports, a failed sign-in or sign-up reaches the
//! user as the one generic authentication message, with no distinction
//! between causes.

use crate::auth::{AuthProvider, Gate, Session, AUTH_FAILED_MESSAGE};
use crate::commands::Out;
use crate::{Config, Result};
use anyhow::anyhow;
use tracing::debug;

/// Signs in through `provider` and stores the session, unlocking the
/// dashboard.
///
/// # Errors
///
/// - Returns the generic authentication-failed message if the provider
///   rejects the credentials, whatever the cause.
/// - Returns an error if the session cannot be persisted.
pub async fn auth_sign_in(
    config: &Config,
    provider: &dyn AuthProvider,
    email: &str,
    password: &str,
) -> Result<Out<()>> {
    let user = provider.sign_in(email, password).await.map_err(|e| {
        debug!("Sign-in rejected: {e}");
        anyhow!(AUTH_FAILED_MESSAGE)
    })?;
    let session = Session::new(user.clone());
    session.save(&config.session_path()).await?;
    Ok(Out::new_message(format!("Signed in as {}", user.email)))
}

/// Registers an account through `provider` and signs it in.
///
/// # Errors
///
/// - Returns the generic authentication-failed message if the provider
///   rejects the registration, whatever the cause.
pub async fn auth_sign_up(
    config: &Config,
    provider: &dyn AuthProvider,
    email: &str,
    password: &str,
) -> Result<Out<()>> {
    let user = provider.sign_up(email, password).await.map_err(|e| {
        debug!("Sign-up rejected: {e}");
        anyhow!(AUTH_FAILED_MESSAGE)
    })?;
    let session = Session::new(user.clone());
    session.save(&config.session_path()).await?;
    Ok(Out::new_message(format!(
        "Created account and signed in as {}",
        user.email
    )))
}

/// Signs out and discards the stored session.
pub async fn auth_sign_out(config: &Config, provider: &dyn AuthProvider) -> Result<Out<()>> {
    provider.sign_out().await.map_err(|e| {
        debug!("Sign-out rejected: {e}");
        anyhow!(AUTH_FAILED_MESSAGE)
    })?;
    Session::clear(&config.session_path()).await?;
    Ok(Out::new_message("Signed out"))
}

/// Reports who is currently signed in.
pub async fn auth_verify(config: &Config) -> Result<Out<()>> {
    let gate = Gate::load(config).await;
    let message = match gate.current_user() {
        Some(user) => format!("Signed in as {}", user.email),
        None => "Nobody is signed in".to_string(),
    };
    Ok(Out::new_message(message))
}
