//! Job group tracker
//!
//! A [`JobGroup`] starts `PENDING` right after submission and is advanced only
//! by polling the gateway. Each poll replaces the status and the whole job list;
//! `COMPLETED` is terminal.

use std::time::Duration;

use daasgateway_domain::constants::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_POLL_TIMEOUT_SECS};
use daasgateway_domain::{
    GatewayError, GatewayOperation, JobGroupId, JobGroupSnapshot, JobGroupStatus, JobId, Result,
};
use tracing::{debug, info, instrument, warn};

use super::job::Job;
use super::ports::GatewayService;

/// Interval between polls and the total budget for one wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Pause between two status polls
    pub interval: Duration,
    /// Total budget for one wait
    pub timeout: Duration,
}

impl PollPolicy {
    /// Policy with explicit interval and timeout
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Replace the poll interval
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replace the wait budget
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_POLL_TIMEOUT_SECS),
        }
    }
}

/// Client-side view of one submission batch
#[derive(Debug)]
pub struct JobGroup {
    id: JobGroupId,
    status: JobGroupStatus,
    jobs: Vec<Job>,
}

impl JobGroup {
    /// A freshly submitted group: `PENDING`, no jobs known yet.
    pub fn new(id: JobGroupId) -> Self {
        Self { id, status: JobGroupStatus::Pending, jobs: Vec::new() }
    }

    /// Group identifier
    pub fn id(&self) -> JobGroupId {
        self.id
    }

    /// Group status from the latest snapshot
    pub fn status(&self) -> JobGroupStatus {
        self.status
    }

    /// `true` once the gateway reports `COMPLETED`
    pub fn is_completed(&self) -> bool {
        self.status == JobGroupStatus::Completed
    }

    /// Jobs of the latest snapshot, in gateway order
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Job with `id` in the latest snapshot
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id() == id)
    }

    /// Jobs whose status is `FAILED`
    pub fn failed_jobs(&self) -> Vec<&Job> {
        self.jobs.iter().filter(|job| job.is_failed()).collect()
    }

    /// Number of failed jobs
    pub fn failed_job_count(&self) -> usize {
        self.jobs.iter().filter(|job| job.is_failed()).count()
    }

    /// Jobs whose status code is 2xx
    pub fn succeeded_jobs(&self) -> Vec<&Job> {
        self.jobs.iter().filter(|job| job.is_success()).collect()
    }

    /// Split the snapshot into (2xx, everything else).
    pub fn partition(&self) -> (Vec<&Job>, Vec<&Job>) {
        self.jobs.iter().partition(|job| job.is_success())
    }

    /// Replace status and jobs with `snapshot`. Existing job instances (and
    /// their fetched payloads) are discarded.
    pub fn apply_snapshot(&mut self, snapshot: JobGroupSnapshot) {
        let id = self.id;
        self.jobs = snapshot.jobs.iter().map(|record| Job::from_record(id, record)).collect();
        self.status = snapshot.job_group_status;
    }

    /// Fetch the current status once and apply it.
    ///
    /// # Errors
    /// Returns the gateway error, or a [`GatewayError::Request`] if the body is
    /// not a job-group status document. State is unchanged on error.
    #[instrument(skip(self, gateway), fields(group = %self.id))]
    pub async fn poll_once(&mut self, gateway: &dyn GatewayService) -> Result<JobGroupStatus> {
        let body = gateway.get_job_group_status(self.id).await?;
        let snapshot: JobGroupSnapshot = serde_json::from_value(body).map_err(|e| {
            GatewayError::request(GatewayOperation::JobGroupStatus(self.id).failure_message(), None)
                .with_detail(e.to_string())
        })?;

        self.apply_snapshot(snapshot);
        debug!(status = %self.status, jobs = self.jobs.len(), "Polled job group");
        Ok(self.status)
    }

    /// Poll until the group reports `COMPLETED`.
    ///
    /// Returns immediately without a network call if already completed.
    /// Snapshots fetched before a failure or timeout stay visible.
    ///
    /// # Errors
    /// - [`GatewayError::Timeout`] when `policy.timeout` elapses first
    /// - Any poll error, which ends the wait at once
    #[instrument(skip(self, gateway), fields(group = %self.id))]
    pub async fn wait_until_completed(
        &mut self,
        gateway: &dyn GatewayService,
        policy: PollPolicy,
    ) -> Result<()> {
        if self.is_completed() {
            return Ok(());
        }

        let polling = self.poll_until_completed(gateway, policy.interval);
        let outcome = tokio::time::timeout(policy.timeout, polling).await;

        match outcome {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    timeout = ?policy.timeout,
                    status = %self.status,
                    jobs = self.jobs.len(),
                    "Job group did not complete in time"
                );
                Err(GatewayError::Timeout(policy.timeout))
            }
        }
    }

    async fn poll_until_completed(
        &mut self,
        gateway: &dyn GatewayService,
        interval: Duration,
    ) -> Result<()> {
        loop {
            if self.poll_once(gateway).await? == JobGroupStatus::Completed {
                info!(
                    jobs = self.jobs.len(),
                    failed = self.failed_job_count(),
                    "Job group completed"
                );
                return Ok(());
            }
            tokio::time::sleep(interval).await;
        }
    }
}
