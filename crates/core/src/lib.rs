//! # DaaS Gateway Core
//!
//! Client logic with no transport dependencies.
//!
//! This crate contains:
//! - Port interfaces ([`IdentityProvider`], [`GatewayService`])
//! - The [`CredentialManager`] driving login and refresh
//! - Job group tracking ([`JobGroup`], [`Job`], [`PollPolicy`])
//! - The high-level [`DaasGatewayClient`]
//!
//! ## Architecture Principles
//! - Only depends on `daasgateway-domain`
//! - No HTTP or environment access
//! - All I/O goes through the ports

pub mod auth;
pub mod client;
pub mod jobs;

pub use auth::{CredentialManager, IdentityProvider};
pub use client::DaasGatewayClient;
pub use jobs::{GatewayService, Job, JobGroup, PollPolicy};
