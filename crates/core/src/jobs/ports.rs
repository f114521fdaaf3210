//! Gateway service port

use async_trait::async_trait;
use daasgateway_domain::{GatewayOperation, JobGroupId, JobId, Result};
use serde_json::Value;

/// One authorized HTTP call per [`GatewayOperation`]
///
/// Implementations attach the bearer credential, send the request and return
/// the decoded JSON body. A non-2xx answer is a [`GatewayError::Request`]
/// carrying the status and [`GatewayOperation::failure_message`]; transport
/// faults are the same variant without a status.
///
/// [`GatewayError::Request`]: daasgateway_domain::GatewayError::Request
#[async_trait]
pub trait GatewayService: Send + Sync {
    /// Send `operation`, with `body` as the JSON array for POST operations.
    async fn invoke(&self, operation: GatewayOperation, body: Option<&[Value]>) -> Result<Value>;

    /// POST a batch of payloads to a submission endpoint.
    async fn submit(&self, operation: GatewayOperation, payloads: &[Value]) -> Result<Value> {
        self.invoke(operation, Some(payloads)).await
    }

    /// Current status and jobs of a group.
    async fn get_job_group_status(&self, group: JobGroupId) -> Result<Value> {
        self.invoke(GatewayOperation::JobGroupStatus(group), None).await
    }

    /// Payload submitted for one job.
    async fn get_job_request_payload(&self, group: JobGroupId, job: JobId) -> Result<Value> {
        self.invoke(GatewayOperation::JobRequestPayload(group, job), None).await
    }

    /// Response the gateway recorded for one job.
    async fn get_job_response(&self, group: JobGroupId, job: JobId) -> Result<Value> {
        self.invoke(GatewayOperation::JobResponse(group, job), None).await
    }
}
