//! Domain types and models
//!
//! Wire types exchanged with the gateway and the identity provider.

pub mod auth;
pub mod job;
pub mod operation;
pub mod requests;

pub use auth::{AuthenticationResult, InitiateAuthResponse, TokenSet};
pub use job::{
    JobGroupCreated, JobGroupId, JobGroupSnapshot, JobGroupStatus, JobId, JobRecord, JobStatus,
};
pub use operation::{GatewayOperation, OperationMethod};
pub use requests::{
    CreateOrderRequest, CreateShippingItemRequest, OrderItem, Product, RequestPayload,
    ShopAddress,
};
