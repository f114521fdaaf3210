//! Identity provider token types
//!
//! [`AuthenticationResult`] is what Cognito's `InitiateAuth` returns;
//! [`TokenSet`] is the credential triple the client holds between calls.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::{GatewayError, Result};

/// `AuthenticationResult` object of an `InitiateAuth` response
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    /// Bearer credential sent to the gateway
    pub id_token: String,
    /// Absent on refresh-grant responses from Cognito
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of `id_token` in seconds
    pub expires_in: i64,
}

impl fmt::Debug for AuthenticationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationResult")
            .field("id_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Envelope of an `InitiateAuth` response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitiateAuthResponse {
    /// Tokens issued by the grant
    pub authentication_result: AuthenticationResult,
}

/// Identity token, refresh token and expiry, always replaced together
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSet {
    id_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Build a token set from a provider result received at `issued_at`.
    ///
    /// When the provider omits the refresh token (refresh grants), the
    /// `previous_refresh_token` is carried over so the set stays complete.
    ///
    /// # Errors
    /// Returns [`GatewayError::Auth`] if no refresh token is available or
    /// `ExpiresIn` does not yield a representable expiry instant.
    pub fn from_authentication(
        result: AuthenticationResult,
        previous_refresh_token: Option<&str>,
        issued_at: DateTime<Utc>,
    ) -> Result<Self> {
        let refresh_token = result
            .refresh_token
            .or_else(|| previous_refresh_token.map(ToString::to_string))
            .ok_or_else(|| {
                GatewayError::auth("Identity provider did not issue a refresh token", None)
            })?;

        let expires_at = Duration::try_seconds(result.expires_in)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                GatewayError::auth("Identity provider returned an invalid ExpiresIn", None)
            })?;

        Ok(Self { id_token: result.id_token, refresh_token, expires_at })
    }

    /// Bearer credential
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// Credential for the next refresh grant
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Instant the identity token stops being accepted
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// `true` once `now + margin` is at or past the expiry instant.
    ///
    /// A margin too large to add to `now` counts as expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        match now.checked_add_signed(margin) {
            Some(deadline) => deadline >= self.expires_at,
            None => true,
        }
    }

    /// Seconds remaining until expiry (negative once expired)
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds()
    }

    /// Value for the `Authorization` header
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.id_token)
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("id_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
