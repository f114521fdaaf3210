//! High-level gateway client
//!
//! Ties request shaping, submission and job-group tracking together. The
//! client owns no transport itself; it drives whatever [`GatewayService`] the
//! composition root hands it.

use std::sync::Arc;

use daasgateway_domain::{
    CreateOrderRequest, CreateShippingItemRequest, GatewayError, GatewayOperation,
    JobGroupCreated, JobGroupId, JobGroupStatus, JobId, OperationMethod, RequestPayload, Result,
};
use serde_json::Value;
use tracing::{info, instrument};

use crate::jobs::{GatewayService, Job, JobGroup, PollPolicy};

/// Order and shipping operations against the DaaS Gateway
///
/// # Example
///
/// ```ignore
/// let client = DaasGatewayClient::new(gateway);
/// let mut group = client.create_orders(&orders).await?;
/// client.wait_until_completed(&mut group).await?;
/// for job in group.failed_jobs() {
///     let payload = client.job_payload(job).await?;
/// }
/// ```
#[derive(Clone)]
pub struct DaasGatewayClient {
    gateway: Arc<dyn GatewayService>,
    poll_policy: PollPolicy,
}

impl DaasGatewayClient {
    /// Client over any gateway port, polling with the default policy
    pub fn new(gateway: Arc<dyn GatewayService>) -> Self {
        Self { gateway, poll_policy: PollPolicy::default() }
    }

    /// Override the policy used by [`DaasGatewayClient::wait_until_completed`].
    #[must_use]
    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.poll_policy = policy;
        self
    }

    /// Policy used by the waiting helpers
    pub fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }

    /// Underlying gateway port
    pub fn gateway(&self) -> &dyn GatewayService {
        self.gateway.as_ref()
    }

    /// Validate and submit a batch of orders.
    ///
    /// # Errors
    /// [`GatewayError::InvalidInput`] before any I/O if a request is invalid,
    /// otherwise the submission error.
    pub async fn create_orders(&self, orders: &[CreateOrderRequest]) -> Result<JobGroup> {
        self.submit_requests(GatewayOperation::CreateOrders, orders).await
    }

    /// Validate and submit a batch of shipping items.
    ///
    /// # Errors
    /// Same as [`DaasGatewayClient::create_orders`].
    pub async fn create_shipping_items(
        &self,
        items: &[CreateShippingItemRequest],
    ) -> Result<JobGroup> {
        self.submit_requests(GatewayOperation::CreateShippingItems, items).await
    }

    /// Normalize, validate and submit typed requests to `operation`.
    ///
    /// # Errors
    /// Fails on the first invalid request; nothing is sent in that case.
    pub async fn submit_requests<R: RequestPayload + Sync>(
        &self,
        operation: GatewayOperation,
        requests: &[R],
    ) -> Result<JobGroup> {
        let payloads = requests.iter().map(RequestPayload::to_payload).collect::<Result<Vec<_>>>()?;
        self.submit(operation, &payloads).await
    }

    /// Submit raw payload maps to a write operation and track the new group.
    ///
    /// # Errors
    /// - [`GatewayError::InvalidInput`] if `operation` is not a submission
    /// - The gateway error of the call
    /// - [`GatewayError::Request`] if the answer carries no valid `job_group_uuid`
    #[instrument(skip(self, payloads), fields(operation = %operation, count = payloads.len()))]
    pub async fn submit(
        &self,
        operation: GatewayOperation,
        payloads: &[Value],
    ) -> Result<JobGroup> {
        if operation.method() != OperationMethod::Post {
            return Err(GatewayError::InvalidInput(format!(
                "{operation} is not a submission operation"
            )));
        }

        let body = self.gateway.submit(operation, payloads).await?;
        let created: JobGroupCreated = serde_json::from_value(body).map_err(|e| {
            GatewayError::request(operation.failure_message(), None)
                .with_detail(format!("response has no valid job_group_uuid: {e}"))
        })?;

        info!(group = %created.job_group_uuid, "Submitted batch");
        Ok(JobGroup::new(created.job_group_uuid))
    }

    /// Send any operation and return the raw JSON body.
    ///
    /// # Errors
    /// The gateway error of the call.
    pub async fn invoke(
        &self,
        operation: GatewayOperation,
        body: Option<&[Value]>,
    ) -> Result<Value> {
        self.gateway.invoke(operation, body).await
    }

    /// Track an existing group, e.g. one submitted by an earlier process.
    pub fn job_group(&self, id: JobGroupId) -> JobGroup {
        JobGroup::new(id)
    }

    /// Poll `group` once.
    ///
    /// # Errors
    /// See [`JobGroup::poll_once`].
    pub async fn refresh_status(&self, group: &mut JobGroup) -> Result<JobGroupStatus> {
        group.poll_once(self.gateway.as_ref()).await
    }

    /// Wait for `group` with the client's poll policy.
    ///
    /// # Errors
    /// See [`JobGroup::wait_until_completed`].
    pub async fn wait_until_completed(&self, group: &mut JobGroup) -> Result<()> {
        group.wait_until_completed(self.gateway.as_ref(), self.poll_policy).await
    }

    /// Wait for `group` with an explicit policy.
    ///
    /// # Errors
    /// See [`JobGroup::wait_until_completed`].
    pub async fn wait_until_completed_with(
        &self,
        group: &mut JobGroup,
        policy: PollPolicy,
    ) -> Result<()> {
        group.wait_until_completed(self.gateway.as_ref(), policy).await
    }

    /// Request payload of `job`, cached on the job instance.
    ///
    /// # Errors
    /// The gateway error of the fetch.
    pub async fn job_payload<'a>(&self, job: &'a Job) -> Result<&'a Value> {
        job.payload(self.gateway.as_ref()).await
    }

    /// Response of `job`, cached on the job instance.
    ///
    /// # Errors
    /// The gateway error of the fetch.
    pub async fn job_response<'a>(&self, job: &'a Job) -> Result<&'a Value> {
        job.response(self.gateway.as_ref()).await
    }

    /// Uncached request payload lookup by identifiers.
    ///
    /// # Errors
    /// The gateway error of the fetch.
    pub async fn fetch_job_payload(&self, group: JobGroupId, job: JobId) -> Result<Value> {
        self.gateway.get_job_request_payload(group, job).await
    }

    /// Uncached response lookup by identifiers.
    ///
    /// # Errors
    /// The gateway error of the fetch.
    pub async fn fetch_job_response(&self, group: JobGroupId, job: JobId) -> Result<Value> {
        self.gateway.get_job_response(group, job).await
    }
}
