//! # DaaS Gateway Domain
//!
//! Domain types and models for the DaaS Gateway client.
//!
//! This crate contains:
//! - Job group / job wire types and status enums
//! - Identity provider token types
//! - The gateway operation table (paths, methods, failure messages)
//! - Typed request payloads with field validation
//! - Error types, Result alias and configuration structures
//!
//! ## Architecture
//! - No dependencies on other gateway crates
//! - No I/O
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod secret;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use secret::SecretString;
pub use types::*;
pub use validation::{FieldError, Validate, ValidationError};
