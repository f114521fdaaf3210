//! Authorization header source for gateway calls

use async_trait::async_trait;
use daasgateway_core::CredentialManager;
use daasgateway_domain::Result;

/// Trait for providing the `Authorization` header value
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Header value for the next request, e.g. `Bearer <token>`
    ///
    /// Implementations log in or refresh as needed.
    async fn authorization(&self) -> Result<String>;
}

#[async_trait]
impl AccessTokenProvider for CredentialManager {
    async fn authorization(&self) -> Result<String> {
        self.authorize().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use daasgateway_core::IdentityProvider;
    use daasgateway_domain::{AuthenticationResult, SecretString, UserCredentials};

    use super::*;

    struct FixedIdentity;

    #[async_trait]
    impl IdentityProvider for FixedIdentity {
        async fn password_grant(&self, _: &UserCredentials) -> Result<AuthenticationResult> {
            Ok(AuthenticationResult {
                id_token: "id-token".to_string(),
                refresh_token: Some("refresh".to_string()),
                expires_in: 3600,
            })
        }

        async fn refresh_grant(
            &self,
            _: &UserCredentials,
            _: &str,
        ) -> Result<AuthenticationResult> {
            unreachable!("token never expires in this test")
        }
    }

    #[tokio::test]
    async fn test_credential_manager_provides_bearer_header() {
        let manager = CredentialManager::new(
            Arc::new(FixedIdentity),
            UserCredentials {
                username: "shop@example.com".to_string(),
                password: SecretString::new("pw"),
                client_id: SecretString::new("client"),
                region: "ap-northeast-2".to_string(),
            },
        );
        let provider: &dyn AccessTokenProvider = &manager;

        assert_eq!(provider.authorization().await.unwrap(), "Bearer id-token");
    }
}
