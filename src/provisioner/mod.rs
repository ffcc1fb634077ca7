//! Cluster provisioning.
//!
//! Two cooperating pieces, composed by simple call order:
//!
//! - the request builder ([`builder`]) assembles the base launch-request
//!   payload from job parameters and settings;
//! - the job provisioner ([`jobs`]) uploads the notebook artifact, extends
//!   the base request with the job's bootstrap action and execution steps,
//!   submits it, and lists result artifacts afterwards.

pub mod builder;
pub mod jobs;
pub mod results;

pub use builder::{assemble_job_flow, JobParams};
pub use jobs::{compose_submission, SparkJobProvisioner};
pub use results::ResultIndex;

use crate::clients::{ComputeError, FetchError, StoreError};

/// Errors from provisioning operations.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("cluster size must be at least 1, got {0}")]
    InvalidClusterSize(u32),

    #[error(transparent)]
    Configuration(#[from] FetchError),

    #[error(transparent)]
    Compute(#[from] ComputeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
