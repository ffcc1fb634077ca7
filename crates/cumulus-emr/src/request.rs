//! The complete launch-request payload.

use serde::{Deserialize, Serialize};

use crate::instance::InstanceGroup;
use crate::step::{BootstrapAction, Step};

/// A software application installed on the cluster, e.g. Spark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Application {
    pub name: String,
}

impl Application {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A key/value tag attached to the cluster for ownership and billing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Instance topology of the cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instances {
    /// Ordered instance groups; the master group is always first.
    pub instance_groups: Vec<InstanceGroup>,
    /// Name of the EC2 key pair for SSH access.
    pub ec2_key_name: String,
    /// Whether the cluster stays up after the last step. Always false here:
    /// clusters are ephemeral and exist only for the duration of their steps.
    pub keep_job_flow_alive_when_no_steps: bool,
}

/// The full description needed to launch a compute cluster.
///
/// Built once per job submission and treated as immutable afterwards;
/// serializes to the control plane's `RunJobFlow` request schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobFlowRequest {
    /// Human-readable cluster name,
    /// `<product>-<environment>-<component>-<username>-<identifier>`.
    pub name: String,
    /// Destination URI for cluster logs.
    pub log_uri: String,
    /// Software release label, e.g. "emr-5.0.0".
    pub release_label: String,
    /// Opaque configuration blob fetched from the shared configuration URL.
    pub configurations: serde_json::Value,
    /// Instance topology.
    pub instances: Instances,
    /// Instance profile the cluster nodes assume.
    pub job_flow_role: String,
    /// Service role the control plane assumes.
    pub service_role: String,
    /// Applications installed on the cluster.
    pub applications: Vec<Application>,
    /// Scripts run on every node before any step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bootstrap_actions: Vec<BootstrapAction>,
    /// Ordered execution steps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
    /// Ownership and billing tags.
    pub tags: Vec<Tag>,
    /// Whether the cluster is visible to all account users.
    pub visible_to_all_users: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{InstanceGroup, InstanceRole};

    fn make_request() -> JobFlowRequest {
        JobFlowRequest {
            name: "cumulus-stage-job-jdoe-unruffled-nightingale-9993".to_string(),
            log_uri: "s3://log-bucket/jobs/unruffled-nightingale-9993/2026-08-25T00:00:00Z"
                .to_string(),
            release_label: "emr-5.0.0".to_string(),
            configurations: serde_json::json!([{"Classification": "spark"}]),
            instances: Instances {
                instance_groups: vec![InstanceGroup::on_demand(
                    "Master",
                    InstanceRole::Master,
                    "c3.4xlarge",
                    1,
                )],
                ec2_key_name: "cumulus-key".to_string(),
                keep_job_flow_alive_when_no_steps: false,
            },
            job_flow_role: "spark-instance-profile".to_string(),
            service_role: "EMR_DefaultRole".to_string(),
            applications: vec![
                Application::new("Spark"),
                Application::new("Hive"),
                Application::new("Zeppelin"),
            ],
            bootstrap_actions: Vec::new(),
            steps: Vec::new(),
            tags: vec![Tag::new("Owner", "jdoe@example.com")],
            visible_to_all_users: true,
        }
    }

    #[test]
    fn test_wire_shape_matches_run_job_flow() {
        let value = serde_json::to_value(make_request()).unwrap();
        let object = value.as_object().unwrap();

        for key in [
            "Name",
            "LogUri",
            "ReleaseLabel",
            "Configurations",
            "Instances",
            "JobFlowRole",
            "ServiceRole",
            "Applications",
            "Tags",
            "VisibleToAllUsers",
        ] {
            assert!(object.contains_key(key), "missing wire field {}", key);
        }
        assert_eq!(value["Instances"]["KeepJobFlowAliveWhenNoSteps"], false);
        assert_eq!(value["Applications"][0]["Name"], "Spark");
    }

    #[test]
    fn test_empty_steps_omitted_from_payload() {
        let value = serde_json::to_value(make_request()).unwrap();
        assert!(value.get("Steps").is_none());
        assert!(value.get("BootstrapActions").is_none());
    }

    #[test]
    fn test_round_trip() {
        let request = make_request();
        let json = serde_json::to_string(&request).unwrap();
        let back: JobFlowRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
