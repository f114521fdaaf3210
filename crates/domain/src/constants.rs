//! Gateway constants
//!
//! Fixed endpoints, environment variable names and polling defaults.

// Deployment targets
/// Beta gateway base URL
pub const BETA_BASE_URL: &str = "https://od9dawmxfa.execute-api.ap-northeast-2.amazonaws.com/beta";
/// Production gateway base URL
pub const PROD_BASE_URL: &str = "https://3jncvwc1d1.execute-api.ap-northeast-2.amazonaws.com/prod";

// Environment variables read by the configuration loader
/// Username variable
pub const ENV_USERNAME: &str = "DAAS_GATEWAY_USERNAME";
/// Password variable
pub const ENV_PASSWORD: &str = "DAAS_GATEWAY_PASSWORD";
/// App client id variable
pub const ENV_CLIENT_ID: &str = "DAAS_GATEWAY_CLIENT_ID";
/// Cognito region variable
pub const ENV_REGION: &str = "AWS_REGION";
/// Environment selector variable
pub const ENV_ENVIRONMENT: &str = "DAAS_GATEWAY_ENV";

// Polling defaults (seconds)
/// Default pause between status polls
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;
/// Default budget for one wait
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 60;

/// Default per-request HTTP timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Cognito InitiateAuth
/// `X-Amz-Target` header of an `InitiateAuth` call
pub const COGNITO_TARGET: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
/// Content type Cognito expects
pub const COGNITO_CONTENT_TYPE: &str = "application/x-amz-json-1.1";
