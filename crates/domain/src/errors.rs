//! Error types used throughout the client

use std::time::Duration;

use thiserror::Error;

/// Main error type for DaaS Gateway operations
///
/// Every failure that can reach a caller is one of these variants; nothing is
/// retried or swallowed on the way up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Login or token refresh against the identity provider failed.
    #[error("{message}")]
    Auth {
        message: String,
        /// HTTP status returned by the identity provider, if a response arrived.
        status: Option<u16>,
    },

    /// A gateway call failed with a non-2xx response or a transport fault.
    #[error("{message}")]
    Request {
        /// Fixed, operation-specific message (e.g. "Failed to create orders.").
        message: String,
        /// HTTP status, `None` for DNS/connection/timeout faults.
        status: Option<u16>,
        /// Underlying cause (response body or transport error), for diagnostics.
        detail: Option<String>,
    },

    /// Polling did not observe a terminal job group within its budget.
    #[error("Timed out after {0:?} waiting for job group to complete")]
    Timeout(Duration),

    /// Missing or invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request payload failed validation before anything was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    /// Authentication failure with an optional provider status.
    pub fn auth(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Auth { message: message.into(), status }
    }

    /// Gateway request failure with an optional HTTP status.
    pub fn request(message: impl Into<String>, status: Option<u16>) -> Self {
        Self::Request { message: message.into(), status, detail: None }
    }

    /// Attach a diagnostic detail to a [`GatewayError::Request`].
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        match self {
            Self::Request { message, status, .. } => {
                Self::Request { message, status, detail: Some(detail.into()) }
            }
            other => other,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Request { status, .. } => *status,
            Self::Timeout(_) | Self::Config(_) | Self::InvalidInput(_) => None,
        }
    }

    /// `true` for login or refresh failures
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// `true` when a wait ran out of time
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Result type alias for DaaS Gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;
