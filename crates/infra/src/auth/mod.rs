//! Identity provider adapters

pub mod cognito;

pub use cognito::CognitoIdentityProvider;
