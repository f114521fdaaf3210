//! Configuration management

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{BETA_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS, PROD_BASE_URL};
use crate::{GatewayError, SecretString};

/// Deployment target of the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayEnvironment {
    /// Staging gateway
    Beta,
    /// Production gateway
    #[default]
    Prod,
}

impl GatewayEnvironment {
    /// Fixed base URL of this deployment target.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Beta => BETA_BASE_URL,
            Self::Prod => PROD_BASE_URL,
        }
    }
}

impl fmt::Display for GatewayEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beta => f.write_str("beta"),
            Self::Prod => f.write_str("prod"),
        }
    }
}

impl FromStr for GatewayEnvironment {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beta" => Ok(Self::Beta),
            "prod" => Ok(Self::Prod),
            _ => Err(GatewayError::Config(format!(
                "Invalid DAAS_GATEWAY_ENV '{s}'. It must be one of 'beta' or 'prod'."
            ))),
        }
    }
}

/// Identity used for the password grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Cognito username
    pub username: String,
    /// Cognito password
    pub password: SecretString,
    /// Cognito app client id
    pub client_id: SecretString,
    /// Cognito region, e.g. `ap-northeast-2`
    pub region: String,
}

/// Caller-supplied settings; every `None` falls back to the process environment.
#[derive(Debug, Clone, Default)]
pub struct ClientSettings {
    /// Cognito username
    pub username: Option<String>,
    /// Cognito password
    pub password: Option<SecretString>,
    /// Cognito app client id
    pub client_id: Option<SecretString>,
    /// Cognito region
    pub region: Option<String>,
    /// `"beta"` or `"prod"`
    pub environment: Option<String>,
    /// Replaces the environment's fixed base URL (tests, private deployments)
    pub base_url: Option<String>,
    /// Replaces the regional Cognito endpoint
    pub identity_endpoint: Option<String>,
    /// Per-request HTTP timeout
    pub request_timeout: Option<Duration>,
}

impl ClientSettings {
    /// Settings with everything unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password
    #[must_use]
    pub fn password(mut self, password: impl Into<SecretString>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the app client id
    #[must_use]
    pub fn client_id(mut self, client_id: impl Into<SecretString>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the Cognito region
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the environment selector
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Override the gateway base URL
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the Cognito endpoint
    #[must_use]
    pub fn identity_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.identity_endpoint = Some(endpoint.into());
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// Fully resolved client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Login identity
    pub credentials: UserCredentials,
    /// Deployment target
    pub environment: GatewayEnvironment,
    /// Base URL without trailing slash
    pub base_url: String,
    /// Cognito endpoint override, `None` for the regional default
    pub identity_endpoint: Option<String>,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Configuration targeting `environment` with its fixed base URL.
    pub fn new(credentials: UserCredentials, environment: GatewayEnvironment) -> Self {
        Self {
            credentials,
            environment,
            base_url: environment.base_url().to_string(),
            identity_endpoint: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Cognito endpoint for the configured region unless overridden.
    pub fn identity_endpoint(&self) -> String {
        self.identity_endpoint.clone().unwrap_or_else(|| {
            format!("https://cognito-idp.{}.amazonaws.com/", self.credentials.region)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> UserCredentials {
        UserCredentials {
            username: "shop@example.com".to_string(),
            password: SecretString::new("pw"),
            client_id: SecretString::new("client"),
            region: "ap-northeast-2".to_string(),
        }
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!("beta".parse::<GatewayEnvironment>().unwrap(), GatewayEnvironment::Beta);
        assert_eq!("prod".parse::<GatewayEnvironment>().unwrap(), GatewayEnvironment::Prod);

        let err = "staging".parse::<GatewayEnvironment>().unwrap_err();
        assert!(matches!(err, GatewayError::Config(ref msg) if msg.contains("'beta' or 'prod'")));
    }

    #[test]
    fn test_environment_base_urls_are_distinct() {
        assert!(GatewayEnvironment::Beta.base_url().ends_with("/beta"));
        assert!(GatewayEnvironment::Prod.base_url().ends_with("/prod"));
        assert_eq!(GatewayEnvironment::default(), GatewayEnvironment::Prod);
    }

    #[test]
    fn test_identity_endpoint_defaults_to_region() {
        let mut config = ClientConfig::new(credentials(), GatewayEnvironment::Beta);
        assert_eq!(config.identity_endpoint(), "https://cognito-idp.ap-northeast-2.amazonaws.com/");

        config.identity_endpoint = Some("http://127.0.0.1:9000/".to_string());
        assert_eq!(config.identity_endpoint(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_debug_never_prints_password() {
        let config = ClientConfig::new(credentials(), GatewayEnvironment::Prod);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("pw\""));
        assert!(rendered.contains("[REDACTED]"));
    }
}
