//! # DaaS Gateway Infrastructure
//!
//! Infrastructure implementations of the core ports.
//!
//! This crate contains:
//! - The shared reqwest [`HttpClient`]
//! - The Cognito [`CognitoIdentityProvider`]
//! - The REST [`GatewayApiClient`]
//! - Configuration loading from caller settings and environment variables
//!
//! ## Architecture
//! - Implements traits defined in `daasgateway-core`
//! - Contains all I/O (HTTP, environment)
//! - [`connect`] wires everything into a ready [`DaasGatewayClient`]

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;

use std::sync::Arc;

pub use api::{AccessTokenProvider, ApiClientConfig, GatewayApiClient};
pub use auth::CognitoIdentityProvider;
pub use daasgateway_core::DaasGatewayClient;
use daasgateway_core::CredentialManager;
use daasgateway_domain::{ClientConfig, ClientSettings, Result};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
use tracing::info;

/// Resolve `settings` (falling back to the environment) and build a client.
///
/// No network call is made; the first request logs in.
///
/// # Errors
/// Returns `GatewayError::Config` for missing or invalid configuration.
pub fn connect(settings: ClientSettings) -> Result<DaasGatewayClient> {
    connect_with_config(config::resolve(settings)?)
}

/// Build a client configured only from environment variables.
///
/// # Errors
/// See [`connect`].
pub fn connect_from_env() -> Result<DaasGatewayClient> {
    connect(ClientSettings::default())
}

/// Build a client from an already resolved configuration.
///
/// # Errors
/// Returns `GatewayError::Config` if the HTTP client cannot be built.
pub fn connect_with_config(config: ClientConfig) -> Result<DaasGatewayClient> {
    let http = HttpClient::builder().timeout(config.request_timeout).build()?;

    let identity = Arc::new(CognitoIdentityProvider::new(http.clone(), config.identity_endpoint()));
    let credentials = Arc::new(CredentialManager::new(identity, config.credentials.clone()));

    let gateway = GatewayApiClient::builder()
        .config(ApiClientConfig {
            base_url: config.base_url.clone(),
            timeout: config.request_timeout,
        })
        .auth(credentials)
        .http_client(http)
        .build()?;

    info!(
        environment = %config.environment,
        base_url = %config.base_url,
        username = %config.credentials.username,
        "DaaS Gateway client ready"
    );
    Ok(DaasGatewayClient::new(Arc::new(gateway)))
}
