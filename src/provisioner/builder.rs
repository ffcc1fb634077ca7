//! Base launch-request assembly.
//!
//! Turns job parameters and settings into the common part of a
//! [`JobFlowRequest`]: instance topology, log destination, tags,
//! applications. Job-specific bootstrap actions and steps are layered on by
//! [`super::jobs`].

use chrono::{DateTime, SecondsFormat, Utc};
use cumulus_emr::{Application, InstanceGroup, InstanceRole, Instances, JobFlowRequest, Tag};

use super::ProvisionError;
use crate::settings::Settings;

/// Parameters of one job submission.
///
/// `identifier` is a caller-supplied unique token; it names the cluster,
/// the log path, and the storage paths. Uniqueness is the caller's
/// responsibility and is not checked here.
#[derive(Debug, Clone)]
pub struct JobParams {
    /// Username of the job owner.
    pub owner_username: String,
    /// Email address of the job owner.
    pub owner_email: String,
    /// Unique identifier of the job.
    pub identifier: String,
    /// EMR release version, e.g. "5.0.0".
    pub emr_release: String,
    /// Requested cluster size. Must be at least 1.
    pub size: u32,
}

/// Assemble the base launch request.
///
/// The master group is always present with a count of exactly 1. A core
/// group is added only when `size > 1`; it uses spot pricing (with the
/// configured bid price) when the spot toggle is set at call time, on-demand
/// otherwise.
pub fn assemble_job_flow(
    settings: &Settings,
    params: &JobParams,
    configurations: serde_json::Value,
    log_dir: &str,
    name_component: &str,
    now: DateTime<Utc>,
) -> Result<JobFlowRequest, ProvisionError> {
    if params.size < 1 {
        return Err(ProvisionError::InvalidClusterSize(params.size));
    }

    let mut instance_groups = vec![InstanceGroup::on_demand(
        "Master",
        InstanceRole::Master,
        settings.master_instance_type.as_str(),
        1,
    )];

    if params.size > 1 {
        let core_group = if settings.use_spot_instances {
            InstanceGroup::spot(
                "Worker Instances",
                InstanceRole::Core,
                settings.worker_instance_type.as_str(),
                params.size,
                settings.spot_bid_price.as_str(),
            )
        } else {
            InstanceGroup::on_demand(
                "Worker Instances",
                InstanceRole::Core,
                settings.worker_instance_type.as_str(),
                params.size,
            )
        };
        instance_groups.push(core_group);
    }

    let log_uri = format!(
        "s3://{}/{}/{}/{}",
        settings.log_bucket,
        log_dir,
        params.identifier,
        now.to_rfc3339_opts(SecondsFormat::Micros, true)
    );

    // <product>-<environment>-<component>-<username>-<identifier>
    // e.g. cumulus-stage-job-jdoe-unruffled-nightingale-9993
    let environment = settings.environment.to_string();
    let name = [
        settings.product.as_str(),
        environment.as_str(),
        name_component,
        params.owner_username.as_str(),
        params.identifier.as_str(),
    ]
    .join("-");

    Ok(JobFlowRequest {
        name,
        log_uri,
        release_label: format!("emr-{}", params.emr_release),
        configurations,
        instances: Instances {
            instance_groups,
            ec2_key_name: settings.ec2_key_name.clone(),
            keep_job_flow_alive_when_no_steps: false,
        },
        job_flow_role: settings.instance_profile.clone(),
        service_role: settings.service_role.clone(),
        applications: vec![
            Application::new("Spark"),
            Application::new("Hive"),
            Application::new("Zeppelin"),
        ],
        bootstrap_actions: Vec::new(),
        steps: Vec::new(),
        tags: vec![
            Tag::new("Owner", params.owner_email.as_str()),
            Tag::new("Name", params.identifier.as_str()),
            Tag::new("Environment", environment),
            Tag::new("Application", settings.instance_app_tag.as_str()),
            Tag::new("App", settings.accounting_app_tag.as_str()),
            Tag::new("Type", settings.accounting_type_tag.as_str()),
        ],
        visible_to_all_users: true,
    })
}
