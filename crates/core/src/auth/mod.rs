//! Credential lifecycle
//!
//! This module provides the identity provider port and the
//! [`CredentialManager`] that keeps a valid bearer token around every call.

pub mod credential_manager;
pub mod ports;

pub use credential_manager::CredentialManager;
pub use ports::IdentityProvider;
