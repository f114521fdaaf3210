//! Credential manager with transparent login and refresh
//!
//! Manages the bearer token lifecycle for every outbound gateway call:
//! - Password-grant login when no token is held
//! - Refresh-grant once the held token is at or past its expiry
//! - Serialized read-check-renew, so concurrent callers share one renewal
//!
//! Expiry is judged client-side. The default margin is zero: a token is
//! renewed only once `now >= expires_at`. A token the gateway rejects before
//! that point surfaces as a gateway request error, not an auth error.

use std::sync::Arc;

use chrono::{Duration, Utc};
use daasgateway_domain::{GatewayError, Result, TokenSet, UserCredentials};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::ports::IdentityProvider;

/// Owns the credential triple and renews it on demand
///
/// One instance is shared (behind an `Arc`) by every request the client
/// sends. The token state is only ever replaced as a whole; a failed login or
/// refresh leaves the previous state untouched.
pub struct CredentialManager {
    provider: Arc<dyn IdentityProvider>,
    credentials: UserCredentials,
    tokens: Mutex<Option<TokenSet>>,
    refresh_margin: Duration,
}

impl CredentialManager {
    /// Create a manager with no tokens; the first `authorize` logs in.
    pub fn new(provider: Arc<dyn IdentityProvider>, credentials: UserCredentials) -> Self {
        Self { provider, credentials, tokens: Mutex::new(None), refresh_margin: Duration::zero() }
    }

    /// Renew tokens this long before their reported expiry.
    ///
    /// Defaults to zero.
    #[must_use]
    pub fn with_refresh_margin(mut self, margin: std::time::Duration) -> Self {
        self.refresh_margin = Duration::from_std(margin).unwrap_or_else(|_| Duration::zero());
        self
    }

    /// Login identity this manager authenticates as
    pub fn credentials(&self) -> &UserCredentials {
        &self.credentials
    }

    /// Value for the `Authorization` header of the next outbound request
    ///
    /// Logs in if no token is held, refreshes if the held token is expired,
    /// otherwise returns the held token unchanged. The lock is held across the
    /// renewal, so concurrent callers observing the same stale state trigger a
    /// single login or refresh.
    ///
    /// # Errors
    /// Returns [`GatewayError::Auth`] if login or refresh fails; no token is
    /// produced in that case.
    #[instrument(skip(self), fields(username = %self.credentials.username))]
    pub async fn authorize(&self) -> Result<String> {
        let mut tokens = self.tokens.lock().await;

        let renewed = match tokens.as_ref() {
            None => self.login_locked().await?,
            Some(current) if current.is_expired_at(Utc::now(), self.refresh_margin) => {
                self.refresh_locked(current).await?
            }
            Some(current) => return Ok(current.bearer()),
        };

        let bearer = renewed.bearer();
        *tokens = Some(renewed);
        Ok(bearer)
    }

    /// Force a password-grant login, replacing any held tokens on success.
    ///
    /// # Errors
    /// Returns [`GatewayError::Auth`] on failure; held tokens are kept.
    pub async fn login(&self) -> Result<()> {
        let mut tokens = self.tokens.lock().await;
        let renewed = self.login_locked().await?;
        *tokens = Some(renewed);
        Ok(())
    }

    /// Force a refresh-grant with the held refresh token.
    ///
    /// # Errors
    /// Returns [`GatewayError::Auth`] if nothing is held yet or the refresh
    /// fails; held tokens are kept on failure.
    pub async fn refresh(&self) -> Result<()> {
        let mut tokens = self.tokens.lock().await;
        let renewed = match tokens.as_ref() {
            Some(current) => self.refresh_locked(current).await?,
            None => {
                return Err(GatewayError::auth("No refresh token available; login first", None))
            }
        };
        *tokens = Some(renewed);
        Ok(())
    }

    /// Snapshot of the held tokens
    pub async fn tokens(&self) -> Option<TokenSet> {
        self.tokens.lock().await.clone()
    }

    /// `true` once a login has succeeded and tokens are held
    pub async fn is_authenticated(&self) -> bool {
        self.tokens.lock().await.is_some()
    }

    /// Seconds until the held token expires, `None` if not logged in
    pub async fn seconds_until_expiry(&self) -> Option<i64> {
        self.tokens.lock().await.as_ref().map(|t| t.seconds_until_expiry(Utc::now()))
    }

    /// Drop held tokens; the next `authorize` logs in again.
    pub async fn clear(&self) {
        *self.tokens.lock().await = None;
        debug!("Credential state cleared");
    }

    async fn login_locked(&self) -> Result<TokenSet> {
        debug!("No identity token held; logging in");

        let result = self.provider.password_grant(&self.credentials).await.map_err(|err| {
            warn!(error = %err, status = ?err.status_code(), "Login failed");
            err
        })?;
        let expires_in = result.expires_in;

        let tokens = TokenSet::from_authentication(result, None, Utc::now()).map_err(|err| {
            warn!(error = %err, "Login response rejected");
            err
        })?;

        info!(expires_in, "Logged in to identity provider");
        Ok(tokens)
    }

    async fn refresh_locked(&self, current: &TokenSet) -> Result<TokenSet> {
        debug!(expired_at = %current.expires_at(), "Identity token expired; refreshing");

        let result = self
            .provider
            .refresh_grant(&self.credentials, current.refresh_token())
            .await
            .map_err(|err| {
                warn!(error = %err, status = ?err.status_code(), "Token refresh failed");
                err
            })?;
        let expires_in = result.expires_in;

        let tokens =
            TokenSet::from_authentication(result, Some(current.refresh_token()), Utc::now())
                .map_err(|err| {
                    warn!(error = %err, "Refresh response rejected");
                    err
                })?;

        info!(expires_in, "Refreshed identity token");
        Ok(tokens)
    }
}
