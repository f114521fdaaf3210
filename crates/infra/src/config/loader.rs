//! Configuration loader
//!
//! Resolves caller-supplied [`ClientSettings`] into a validated
//! [`ClientConfig`]. Every value the caller leaves unset falls back to the
//! process environment.
//!
//! ## Environment Variables
//! - `DAAS_GATEWAY_USERNAME`: Cognito username (required)
//! - `DAAS_GATEWAY_PASSWORD`: Cognito password (required)
//! - `DAAS_GATEWAY_CLIENT_ID`: Cognito app client id (required)
//! - `AWS_REGION`: Cognito region (required)
//! - `DAAS_GATEWAY_ENV`: `beta` or `prod` (default `prod`)
//!
//! Empty values count as unset, except for `DAAS_GATEWAY_ENV`: a set but
//! empty selector is rejected like any other unknown value.

use daasgateway_domain::constants::{
    ENV_CLIENT_ID, ENV_ENVIRONMENT, ENV_PASSWORD, ENV_REGION, ENV_USERNAME,
};
use daasgateway_domain::{
    ClientConfig, ClientSettings, GatewayEnvironment, GatewayError, Result, SecretString,
    UserCredentials,
};
use url::Url;

/// Load configuration purely from environment variables
///
/// # Errors
/// Returns `GatewayError::Config` if a required variable is missing or the
/// environment selector is invalid.
pub fn load_from_env() -> Result<ClientConfig> {
    resolve(ClientSettings::default())
}

/// Resolve `settings` against the process environment
///
/// Caller values take precedence over environment variables.
///
/// # Errors
/// Returns `GatewayError::Config` if:
/// - Username, password, client id or region is missing from both sources
/// - The environment selector is not `beta` or `prod`
/// - A base URL or identity endpoint override is not a valid URL
pub fn resolve(settings: ClientSettings) -> Result<ClientConfig> {
    resolve_with(settings, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable variable lookup
///
/// # Errors
/// See [`resolve`].
pub fn resolve_with<F>(settings: ClientSettings, lookup: F) -> Result<ClientConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let username =
        required(non_blank(settings.username), || env(ENV_USERNAME), "username", ENV_USERNAME)?;
    let password = required(
        settings.password.filter(|p| !p.is_empty()),
        || env(ENV_PASSWORD).map(SecretString::from),
        "password",
        ENV_PASSWORD,
    )?;
    let client_id = required(
        settings.client_id.filter(|c| !c.is_empty()),
        || env(ENV_CLIENT_ID).map(SecretString::from),
        "client id",
        ENV_CLIENT_ID,
    )?;
    let region = required(non_blank(settings.region), || env(ENV_REGION), "region", ENV_REGION)?;

    let environment = match settings.environment.or_else(|| lookup(ENV_ENVIRONMENT)) {
        Some(selector) => selector.parse::<GatewayEnvironment>()?,
        None => GatewayEnvironment::default(),
    };

    let credentials = UserCredentials { username, password, client_id, region };
    let mut config = ClientConfig::new(credentials, environment);

    if let Some(base_url) = settings.base_url {
        config.base_url = validate_url("base URL", &base_url)?.trim_end_matches('/').to_string();
    }
    if let Some(endpoint) = settings.identity_endpoint {
        config.identity_endpoint = Some(validate_url("identity endpoint", &endpoint)?);
    }
    if let Some(timeout) = settings.request_timeout {
        if timeout.is_zero() {
            return Err(GatewayError::Config("request timeout must be positive".to_string()));
        }
        config.request_timeout = timeout;
    }

    tracing::debug!(
        environment = %config.environment,
        base_url = %config.base_url,
        username = %config.credentials.username,
        "Client configuration resolved"
    );
    Ok(config)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Caller value, else environment value, else a configuration error
fn required<T>(
    value: Option<T>,
    fallback: impl FnOnce() -> Option<T>,
    name: &str,
    key: &str,
) -> Result<T> {
    value.or_else(fallback).ok_or_else(|| {
        GatewayError::Config(format!("Missing required setting {name}; pass it or set {key}"))
    })
}

fn validate_url(name: &str, value: &str) -> Result<String> {
    let parsed = Url::parse(value)
        .map_err(|e| GatewayError::Config(format!("Invalid {name} '{value}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(GatewayError::Config(format!("Invalid {name} '{value}': unsupported scheme")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use daasgateway_domain::constants::{BETA_BASE_URL, PROD_BASE_URL};

    use super::*;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_USERNAME, "env-user"),
            (ENV_PASSWORD, "env-pass"),
            (ENV_CLIENT_ID, "env-client"),
            (ENV_REGION, "ap-northeast-2"),
        ])
    }

    fn lookup(vars: HashMap<&'static str, &'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| vars.get(key).map(ToString::to_string)
    }

    #[test]
    fn test_env_only_defaults_to_prod() {
        let config = resolve_with(ClientSettings::default(), lookup(full_env())).unwrap();

        assert_eq!(config.credentials.username, "env-user");
        assert_eq!(config.credentials.password.expose(), "env-pass");
        assert_eq!(config.environment, GatewayEnvironment::Prod);
        assert_eq!(config.base_url, PROD_BASE_URL);
        assert_eq!(
            config.identity_endpoint(),
            "https://cognito-idp.ap-northeast-2.amazonaws.com/"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_caller_values_take_precedence() {
        let mut vars = full_env();
        vars.insert(ENV_ENVIRONMENT, "prod");
        let settings = ClientSettings::new()
            .username("caller-user")
            .password("caller-pass")
            .region("us-east-1")
            .environment("beta");

        let config = resolve_with(settings, lookup(vars)).unwrap();

        assert_eq!(config.credentials.username, "caller-user");
        assert_eq!(config.credentials.password.expose(), "caller-pass");
        assert_eq!(config.credentials.client_id.expose(), "env-client");
        assert_eq!(config.credentials.region, "us-east-1");
        assert_eq!(config.base_url, BETA_BASE_URL);
    }

    #[test]
    fn test_missing_required_value_is_config_error() {
        let mut vars = full_env();
        vars.remove(ENV_CLIENT_ID);

        let err = resolve_with(ClientSettings::default(), lookup(vars)).unwrap_err();

        assert!(matches!(err, GatewayError::Config(ref msg) if msg.contains(ENV_CLIENT_ID)));
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut vars = full_env();
        vars.insert(ENV_PASSWORD, "  ");

        let err = resolve_with(ClientSettings::default(), lookup(vars)).unwrap_err();
        assert!(matches!(err, GatewayError::Config(ref msg) if msg.contains("password")));
    }

    #[test]
    fn test_unknown_environment_is_fatal() {
        let mut vars = full_env();
        vars.insert(ENV_ENVIRONMENT, "staging");

        let err = resolve_with(ClientSettings::default(), lookup(vars)).unwrap_err();
        assert_eq!(
            err,
            GatewayError::Config(
                "Invalid DAAS_GATEWAY_ENV 'staging'. It must be one of 'beta' or 'prod'."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_blank_environment_is_fatal() {
        let mut vars = full_env();
        vars.insert(ENV_ENVIRONMENT, "");

        let err = resolve_with(ClientSettings::default(), lookup(vars)).unwrap_err();
        assert_eq!(
            err,
            GatewayError::Config(
                "Invalid DAAS_GATEWAY_ENV ''. It must be one of 'beta' or 'prod'.".to_string()
            )
        );

        let err = resolve_with(ClientSettings::new().environment(""), lookup(full_env()))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_overrides_are_validated() {
        let settings = ClientSettings::new()
            .base_url("http://127.0.0.1:8080/")
            .identity_endpoint("http://127.0.0.1:9090/")
            .request_timeout(Duration::from_secs(5));
        let config = resolve_with(settings, lookup(full_env())).unwrap();

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.identity_endpoint(), "http://127.0.0.1:9090/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));

        let err = resolve_with(ClientSettings::new().base_url("not a url"), lookup(full_env()))
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));

        let err = resolve_with(
            ClientSettings::new().identity_endpoint("ftp://example.com/"),
            lookup(full_env()),
        )
        .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
    }
}
