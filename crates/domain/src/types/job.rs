//! Job and job group wire types
//!
//! These mirror the gateway's job-group status payload. The stateful
//! tracker lives in `daasgateway-core`; here we only describe what one poll
//! returns.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impl_status_conversions;

/// Identifies a job group (one submission batch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobGroupId(Uuid);

impl JobGroupId {
    /// Wrap a raw uuid
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Raw uuid
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for JobGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for JobGroupId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Identifies one job inside a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Wrap a raw uuid
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Raw uuid
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for JobId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Status of a whole job group. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobGroupStatus {
    /// Jobs still running
    #[default]
    Pending,
    /// Every job reached a final status
    Completed,
}

impl_status_conversions!(JobGroupStatus {
    Pending => "PENDING",
    Completed => "COMPLETED",
});

/// Status of a single job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobStatus {
    /// Accepted, not yet queued
    #[default]
    Pending,
    /// Waiting for a worker
    Queued,
    /// Finished; see the status code for the outcome
    Completed,
    /// Finished unsuccessfully
    Failed,
    /// Scheduled for another attempt
    Retrying,
}

impl_status_conversions!(JobStatus {
    Pending => "PENDING",
    Queued => "QUEUED",
    Completed => "COMPLETED",
    Failed => "FAILED",
    Retrying => "RETRYING",
});

/// One job entry in a job-group status response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Job identifier
    pub uuid: JobId,
    /// Job status
    pub job_status: JobStatus,
    /// Gateway-assigned outcome code, absent until the job has run
    #[serde(default)]
    pub job_status_code: Option<u16>,
}

/// Body of `GET /api/v1/jobs/groups/{group}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobGroupSnapshot {
    /// Group status
    pub job_group_status: JobGroupStatus,
    /// Jobs in submission order
    #[serde(default)]
    pub jobs: Vec<JobRecord>,
}

/// Body returned by the batch creation endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobGroupCreated {
    /// Identifier of the created group
    pub job_group_uuid: JobGroupId,
}
