//! Gateway REST client
//!
//! Implements the core [`GatewayService`] port over [`HttpClient`]. Each
//! [`GatewayOperation`] becomes exactly one authorized HTTP call; nothing is
//! retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use daasgateway_core::GatewayService;
use daasgateway_domain::constants::DEFAULT_REQUEST_TIMEOUT_SECS;
use daasgateway_domain::{
    GatewayEnvironment, GatewayError, GatewayOperation, OperationMethod, Result,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use super::auth::AccessTokenProvider;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Configuration for the gateway client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL without trailing slash, e.g. the `prod` stage URL
    pub base_url: String,
    /// Timeout for each request
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: GatewayEnvironment::default().base_url().to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Authorized client for the DaaS Gateway REST surface
pub struct GatewayApiClient {
    http_client: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    config: ApiClientConfig,
}

impl GatewayApiClient {
    /// Create a client with its own [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the HTTP client cannot be built
    pub fn new(config: ApiClientConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(config.timeout).build()?;
        Ok(Self::with_http_client(config, auth, http_client))
    }

    /// Create a client sharing an existing transport.
    pub fn with_http_client(
        mut config: ApiClientConfig,
        auth: Arc<dyn AccessTokenProvider>,
        http_client: HttpClient,
    ) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self { http_client, auth, config }
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> GatewayApiClientBuilder {
        GatewayApiClientBuilder::default()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url_for(&self, operation: &GatewayOperation) -> String {
        format!("{}{}", self.config.base_url, operation.path())
    }

    fn map_status_error(
        operation: &GatewayOperation,
        status: StatusCode,
        body: String,
    ) -> GatewayError {
        let error = GatewayError::request(operation.failure_message(), Some(status.as_u16()));
        if body.is_empty() {
            error
        } else {
            error.with_detail(body)
        }
    }
}

#[async_trait]
impl GatewayService for GatewayApiClient {
    #[instrument(skip(self, body), fields(operation = %operation))]
    async fn invoke(&self, operation: GatewayOperation, body: Option<&[Value]>) -> Result<Value> {
        let url = self.url_for(&operation);
        let authorization = self.auth.authorization().await?;

        let request = match operation.method() {
            OperationMethod::Get => self.http_client.request(Method::GET, &url),
            OperationMethod::Post => {
                self.http_client.request(Method::POST, &url).json(&body.unwrap_or_default())
            }
        }
        .header(AUTHORIZATION, authorization);

        debug!(url = %url, "Sending gateway request");

        let response = self.http_client.send(request).await.map_err(|e| {
            warn!(error = %e, "Gateway request failed in transport");
            GatewayError::from(InfraError::from_transport(operation.failure_message(), &e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gateway returned non-success status");
            return Err(Self::map_status_error(&operation, status, body));
        }

        let bytes = response.bytes().await.map_err(|e| {
            GatewayError::from(InfraError::from_transport(operation.failure_message(), &e))
        })?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            GatewayError::request(operation.failure_message(), Some(status.as_u16()))
                .with_detail(format!("response is not JSON: {e}"))
        })?;

        debug!(status = status.as_u16(), "Gateway request successful");
        Ok(value)
    }
}

/// Builder for [`GatewayApiClient`]
#[derive(Default)]
pub struct GatewayApiClientBuilder {
    config: Option<ApiClientConfig>,
    auth: Option<Arc<dyn AccessTokenProvider>>,
    http_client: Option<HttpClient>,
}

impl GatewayApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the authentication provider
    pub fn auth(mut self, auth: Arc<dyn AccessTokenProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Reuse an existing transport instead of building one
    pub fn http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the auth provider is missing or client creation fails
    pub fn build(self) -> Result<GatewayApiClient> {
        let config = self.config.unwrap_or_default();
        let auth = self
            .auth
            .ok_or_else(|| GatewayError::Config("Auth provider not set".to_string()))?;

        match self.http_client {
            Some(http_client) => Ok(GatewayApiClient::with_http_client(config, auth, http_client)),
            None => GatewayApiClient::new(config, auth),
        }
    }
}
