//! Cluster control-plane client trait.

use cumulus_emr::{JobFlowId, JobFlowRequest};

/// Errors from the control-plane API.
#[derive(Debug, thiserror::Error)]
pub enum ComputeError {
    #[error("control plane unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("control plane rejected the launch request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// The compute control plane, consumed as a request/response API.
///
/// The cluster's lifecycle (pending, running, terminated) is owned entirely
/// by the remote side; this layer submits launch requests and nothing more.
pub trait ComputeClient: Send + Sync {
    /// Submit a launch request and return the assigned job-flow handle.
    fn run_job_flow(&self, request: &JobFlowRequest) -> Result<JobFlowId, ComputeError>;
}
