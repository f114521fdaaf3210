//! Gateway operation table
//!
//! Every REST call the client can make is one [`GatewayOperation`]. The table
//! below is the single place that knows paths, HTTP methods and the fixed
//! failure message reported for each operation.

use std::fmt;

use super::job::{JobGroupId, JobId};

/// HTTP method used by an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMethod {
    /// Read, no body
    Get,
    /// Write, JSON list body
    Post,
}

/// One logical gateway call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    /// Register orders
    CreateOrders,
    /// Register shipping items for existing orders
    CreateShippingItems,
    /// Mark orders ready for pickup
    ReadyForPickup,
    /// Cancel shippings
    CancelShipping,
    /// Request return shippings
    ReturnShipping,
    /// Link shippings to existing tracking numbers
    AssociateShipping,
    /// Book pickups
    CreatePickup,
    /// Book pickups for shipping items
    CreatePickupShippingItems,
    /// Status and jobs of one group
    JobGroupStatus(JobGroupId),
    /// Payload submitted for one job
    JobRequestPayload(JobGroupId, JobId),
    /// Gateway response recorded for one job
    JobResponse(JobGroupId, JobId),
}

impl GatewayOperation {
    /// All batch submission operations (POST with a list of payloads)
    pub const SUBMISSIONS: [GatewayOperation; 8] = [
        Self::CreateOrders,
        Self::CreateShippingItems,
        Self::ReadyForPickup,
        Self::CancelShipping,
        Self::ReturnShipping,
        Self::AssociateShipping,
        Self::CreatePickup,
        Self::CreatePickupShippingItems,
    ];

    /// HTTP method of this operation
    pub fn method(&self) -> OperationMethod {
        match self {
            Self::JobGroupStatus(_) | Self::JobRequestPayload(..) | Self::JobResponse(..) => {
                OperationMethod::Get
            }
            _ => OperationMethod::Post,
        }
    }

    /// Path relative to the gateway base URL
    pub fn path(&self) -> String {
        match self {
            Self::CreateOrders => "/api/v2/order/orders/".to_string(),
            Self::CreateShippingItems => "/api/v2/order/orders/shipping/".to_string(),
            Self::ReadyForPickup => "/api/v2/order/orders/readyforpickup/".to_string(),
            Self::CancelShipping => "/api/v2/order/shippings/cancel/".to_string(),
            Self::ReturnShipping => "/api/v2/order/returns/".to_string(),
            Self::AssociateShipping => "/api/v2/order/shippings/associate/".to_string(),
            Self::CreatePickup => "/api/v2/order/pickups/".to_string(),
            Self::CreatePickupShippingItems => "/api/v2/order/pickups/shipping/".to_string(),
            Self::JobGroupStatus(group) => format!("/api/v1/jobs/groups/{group}/"),
            Self::JobRequestPayload(group, job) => {
                format!("/api/v1/jobs/groups/{group}/jobs/{job}/request/")
            }
            Self::JobResponse(group, job) => {
                format!("/api/v1/jobs/groups/{group}/jobs/{job}/response/")
            }
        }
    }

    /// Message carried by the error when this operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::CreateOrders => "Failed to create orders.",
            Self::CreateShippingItems => "Failed to create shipping items",
            Self::ReadyForPickup => "Failed to set ready for pickup",
            Self::CancelShipping => "Failed to cancel shipping",
            Self::ReturnShipping => "Failed to return shipping",
            Self::AssociateShipping => "Failed to associate shippings",
            Self::CreatePickup => "Failed to create pickup",
            Self::CreatePickupShippingItems => "Failed to create pickup shipping items",
            Self::JobGroupStatus(_) => "Failed to get job group status.",
            Self::JobRequestPayload(..) => "Failed to get job payload.",
            Self::JobResponse(..) => "Failed to get job response.",
        }
    }

    /// Short name used in logs and spans
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateOrders => "create_orders",
            Self::CreateShippingItems => "create_shipping_items",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::CancelShipping => "cancel_shipping",
            Self::ReturnShipping => "return_shipping",
            Self::AssociateShipping => "associate_shipping",
            Self::CreatePickup => "create_pickup",
            Self::CreatePickupShippingItems => "create_pickup_shipping_items",
            Self::JobGroupStatus(_) => "get_job_group_status",
            Self::JobRequestPayload(..) => "get_job_request_payload",
            Self::JobResponse(..) => "get_job_response",
        }
    }
}

impl fmt::Display for GatewayOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
