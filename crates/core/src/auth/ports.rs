//! Port interfaces for the identity provider

use async_trait::async_trait;
use daasgateway_domain::{AuthenticationResult, Result, UserCredentials};

/// Issues bearer tokens for the gateway
///
/// Implementations report every failure (non-2xx or transport fault) as
/// [`daasgateway_domain::GatewayError::Auth`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Password grant with username, password, client id and region
    async fn password_grant(&self, credentials: &UserCredentials) -> Result<AuthenticationResult>;

    /// Refresh grant with a previously issued refresh token
    async fn refresh_grant(
        &self,
        credentials: &UserCredentials,
        refresh_token: &str,
    ) -> Result<AuthenticationResult>;
}
