//! A single job inside a job group
//!
//! A [`Job`] is built fresh from every status poll and never mutated. Its
//! request payload and response are fetched on first access and cached on the
//! instance only; a job from an older snapshot keeps its own cache.

use daasgateway_domain::{JobGroupId, JobId, JobRecord, JobStatus, Result};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use super::ports::GatewayService;

/// One job of a polled job group
#[derive(Debug)]
pub struct Job {
    group_id: JobGroupId,
    id: JobId,
    status: JobStatus,
    status_code: Option<u16>,
    payload: OnceCell<Value>,
    response: OnceCell<Value>,
}

impl Job {
    /// Build a job from one entry of a status response
    pub fn from_record(group_id: JobGroupId, record: &JobRecord) -> Self {
        Self {
            group_id,
            id: record.uuid,
            status: record.job_status,
            status_code: record.job_status_code,
            payload: OnceCell::new(),
            response: OnceCell::new(),
        }
    }

    /// Group this job belongs to
    pub fn group_id(&self) -> JobGroupId {
        self.group_id
    }

    /// Job identifier
    pub fn id(&self) -> JobId {
        self.id
    }

    /// Status at the time of the poll
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Outcome code reported by the gateway, `None` until the job has run
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// `true` when the job status is `FAILED`
    pub fn is_failed(&self) -> bool {
        self.status == JobStatus::Failed
    }

    /// `true` when the reported status code is 2xx
    pub fn is_success(&self) -> bool {
        matches!(self.status_code, Some(code) if (200..300).contains(&code))
    }

    /// The request payload this job was created from.
    ///
    /// Fetched once per instance; later calls return the cached value.
    ///
    /// # Errors
    /// Returns the gateway error of the fetch. Nothing is cached on failure.
    #[instrument(skip(self, gateway), fields(group = %self.group_id, job = %self.id))]
    pub async fn payload(&self, gateway: &dyn GatewayService) -> Result<&Value> {
        self.payload
            .get_or_try_init(|| async {
                debug!("Fetching job request payload");
                gateway.get_job_request_payload(self.group_id, self.id).await
            })
            .await
    }

    /// The gateway's response for this job, fetched once per instance.
    ///
    /// # Errors
    /// Returns the gateway error of the fetch. Nothing is cached on failure.
    #[instrument(skip(self, gateway), fields(group = %self.group_id, job = %self.id))]
    pub async fn response(&self, gateway: &dyn GatewayService) -> Result<&Value> {
        self.response
            .get_or_try_init(|| async {
                debug!("Fetching job response");
                gateway.get_job_response(self.group_id, self.id).await
            })
            .await
    }

    /// Payload if already fetched on this instance
    pub fn cached_payload(&self) -> Option<&Value> {
        self.payload.get()
    }

    /// Response if already fetched on this instance
    pub fn cached_response(&self) -> Option<&Value> {
        self.response.get()
    }
}
