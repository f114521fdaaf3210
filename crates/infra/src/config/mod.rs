//! Configuration loading
//!
//! Resolves client settings against environment variables.

pub mod loader;

// Re-export commonly used items
pub use loader::{load_from_env, resolve, resolve_with};
