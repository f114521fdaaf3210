//! AWS Cognito identity provider
//!
//! Implements the core [`IdentityProvider`] port with Cognito's
//! `InitiateAuth` action: `USER_PASSWORD_AUTH` for login and
//! `REFRESH_TOKEN_AUTH` for refresh. Secrets are only ever placed in the
//! request body, never in logs.

use async_trait::async_trait;
use daasgateway_core::IdentityProvider;
use daasgateway_domain::constants::{COGNITO_CONTENT_TYPE, COGNITO_TARGET};
use daasgateway_domain::{
    AuthenticationResult, GatewayError, InitiateAuthResponse, Result, UserCredentials,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};

use crate::errors::InfraError;
use crate::http::HttpClient;

const LOGIN_FAILED: &str = "Failed to login to Cognito";
const REFRESH_FAILED: &str = "Failed to refresh Cognito token";

/// Body of an `InitiateAuth` call
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: Value,
}

/// Error document Cognito returns with 4xx answers
#[derive(Debug, Default, Deserialize)]
struct CognitoErrorBody {
    #[serde(rename = "__type", default)]
    kind: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Cognito `InitiateAuth` client
#[derive(Clone, Debug)]
pub struct CognitoIdentityProvider {
    http: HttpClient,
    endpoint: String,
}

impl CognitoIdentityProvider {
    /// Provider posting to `endpoint`, normally
    /// `https://cognito-idp.{region}.amazonaws.com/`.
    pub fn new(http: HttpClient, endpoint: impl Into<String>) -> Self {
        Self { http, endpoint: endpoint.into() }
    }

    /// Provider for the regional Cognito endpoint.
    pub fn for_region(http: HttpClient, region: &str) -> Self {
        Self::new(http, format!("https://cognito-idp.{region}.amazonaws.com/"))
    }

    /// Cognito endpoint this provider calls
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn initiate_auth(
        &self,
        request: InitiateAuthRequest<'_>,
        failure_message: &str,
    ) -> Result<AuthenticationResult> {
        let body = serde_json::to_vec(&request)
            .map_err(|e| GatewayError::auth(format!("{failure_message}: {e}"), None))?;

        let builder = self
            .http
            .request(Method::POST, self.endpoint.as_str())
            .header("X-Amz-Target", COGNITO_TARGET)
            .header(CONTENT_TYPE, COGNITO_CONTENT_TYPE)
            .body(body);

        let response = self
            .http
            .send(builder)
            .await
            .map_err(|e| GatewayError::from(InfraError::auth_transport(failure_message, &e)))?;

        let status = response.status();
        if !status.is_success() {
            let error: CognitoErrorBody = response.json().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                kind = error.kind.as_deref().unwrap_or("unknown"),
                message = error.message.as_deref().unwrap_or(""),
                "Cognito rejected InitiateAuth"
            );
            return Err(GatewayError::auth(failure_message, Some(status.as_u16())));
        }

        let parsed: InitiateAuthResponse = response.json().await.map_err(|e| {
            GatewayError::auth(format!("{failure_message}: {e}"), Some(status.as_u16()))
        })?;

        debug!(expires_in = parsed.authentication_result.expires_in, "InitiateAuth succeeded");
        Ok(parsed.authentication_result)
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn password_grant(&self, credentials: &UserCredentials) -> Result<AuthenticationResult> {
        let request = InitiateAuthRequest {
            auth_flow: "USER_PASSWORD_AUTH",
            client_id: credentials.client_id.expose(),
            auth_parameters: json!({
                "USERNAME": credentials.username,
                "PASSWORD": credentials.password.expose(),
            }),
        };
        self.initiate_auth(request, LOGIN_FAILED).await
    }

    #[instrument(skip(self, credentials, refresh_token), fields(username = %credentials.username))]
    async fn refresh_grant(
        &self,
        credentials: &UserCredentials,
        refresh_token: &str,
    ) -> Result<AuthenticationResult> {
        let request = InitiateAuthRequest {
            auth_flow: "REFRESH_TOKEN_AUTH",
            client_id: credentials.client_id.expose(),
            auth_parameters: json!({ "REFRESH_TOKEN": refresh_token }),
        };
        self.initiate_auth(request, REFRESH_FAILED).await
    }
}
