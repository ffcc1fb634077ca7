//! Mock cluster control plane.

use std::sync::{Arc, RwLock};

use cumulus_emr::{JobFlowId, JobFlowRequest};

use crate::clients::{ComputeClient, ComputeError};

/// Thread-safe mock control plane that records every launch request and
/// hands out sequential job-flow handles.
#[derive(Debug, Clone, Default)]
pub struct MockCompute {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    launched: Vec<JobFlowRequest>,
    id_counter: u64,
    /// When set, `run_job_flow` fails with this status and message.
    reject: Option<(u16, String)>,
}

impl MockCompute {
    pub fn new() -> Self {
        Self::default()
    }

    /// All launch requests submitted so far, in order.
    pub fn launched(&self) -> Vec<JobFlowRequest> {
        self.inner.read().unwrap().launched.clone()
    }

    /// The most recent launch request, if any.
    pub fn last_launched(&self) -> Option<JobFlowRequest> {
        self.inner.read().unwrap().launched.last().cloned()
    }

    /// Make subsequent submissions fail with the given status and message.
    pub fn reject_with(&self, status: u16, message: impl Into<String>) {
        self.inner.write().unwrap().reject = Some((status, message.into()));
    }
}

impl ComputeClient for MockCompute {
    fn run_job_flow(&self, request: &JobFlowRequest) -> Result<JobFlowId, ComputeError> {
        let mut inner = self.inner.write().unwrap();
        if let Some((status, message)) = inner.reject.clone() {
            return Err(ComputeError::Rejected { status, message });
        }
        inner.launched.push(request.clone());
        inner.id_counter += 1;
        Ok(format!("j-{:08X}", inner.id_counter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_emr::{Application, Instances, Tag};

    fn make_request(name: &str) -> JobFlowRequest {
        JobFlowRequest {
            name: name.to_string(),
            log_uri: "s3://logs/jobs/x/now".to_string(),
            release_label: "emr-5.0.0".to_string(),
            configurations: serde_json::json!([]),
            instances: Instances {
                instance_groups: Vec::new(),
                ec2_key_name: "key".to_string(),
                keep_job_flow_alive_when_no_steps: false,
            },
            job_flow_role: "role".to_string(),
            service_role: "EMR_DefaultRole".to_string(),
            applications: vec![Application::new("Spark")],
            bootstrap_actions: Vec::new(),
            steps: Vec::new(),
            tags: vec![Tag::new("Owner", "jdoe@example.com")],
            visible_to_all_users: true,
        }
    }

    #[test]
    fn test_handles_are_sequential_and_distinct() {
        let compute = MockCompute::new();
        let first = compute.run_job_flow(&make_request("a")).unwrap();
        let second = compute.run_job_flow(&make_request("b")).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("j-"));
        assert_eq!(compute.launched().len(), 2);
    }

    #[test]
    fn test_rejection_propagates() {
        let compute = MockCompute::new();
        compute.reject_with(400, "ValidationException");

        let result = compute.run_job_flow(&make_request("a"));
        assert!(matches!(
            result,
            Err(ComputeError::Rejected { status: 400, .. })
        ));
        assert!(compute.launched().is_empty());
    }
}
