//! DaaS Gateway REST adapter
//!
//! - [`GatewayApiClient`]: the [`GatewayService`](daasgateway_core::GatewayService)
//!   implementation over HTTP
//! - [`AccessTokenProvider`]: where the `Authorization` header comes from

pub mod auth;
pub mod client;

pub use auth::AccessTokenProvider;
pub use client::{ApiClientConfig, GatewayApiClient, GatewayApiClientBuilder};
