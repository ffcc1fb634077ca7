//! Spark notebook job provisioning.
//!
//! Stateless orchestration over the cloud clients: upload the notebook
//! artifact, compose and submit the launch request, list result artifacts.
//! The submitted job's lifecycle is owned entirely by the control plane;
//! nothing here polls or tracks progress.

use std::sync::Arc;

use chrono::Utc;
use cumulus_emr::{BootstrapAction, JobFlowId, JobFlowRequest, Step};

use super::builder::{assemble_job_flow, JobParams};
use super::results::ResultIndex;
use super::ProvisionError;
use crate::clients::{CloudClients, StoreError};
use crate::settings::Settings;

/// Directory under the log bucket receiving job logs.
pub const JOB_LOG_DIR: &str = "jobs";

/// Component field of job cluster names.
pub const JOB_NAME_COMPONENT: &str = "job";

const BOOTSTRAP_NAME: &str = "setup-spark-job";
const SETUP_STEP_NAME: &str = "setup-zeppelin";
const RUN_STEP_NAME: &str = "run-notebook";

/// Extend a base launch request with the job's bootstrap action and the two
/// fixed execution steps, in order: environment setup, then notebook run.
///
/// The notebook run reads from and writes to the public or private data
/// bucket depending on `is_public`. `timeout_minutes` is forwarded to the
/// remote bootstrap script in seconds; it is not enforced locally.
pub fn compose_submission(
    settings: &Settings,
    mut request: JobFlowRequest,
    identifier: &str,
    notebook_key: &str,
    is_public: bool,
    timeout_minutes: u32,
) -> JobFlowRequest {
    let notebook_uri = format!("s3://{}/{}", settings.code_bucket, notebook_key);
    let data_bucket = if is_public {
        &settings.public_data_bucket
    } else {
        &settings.private_data_bucket
    };
    let jar = settings.script_runner_jar_uri();

    request.bootstrap_actions = vec![BootstrapAction::new(
        BOOTSTRAP_NAME,
        settings.bootstrap_script_uri(),
        vec![
            "--timeout".to_string(),
            (timeout_minutes * 60).to_string(),
        ],
    )];
    request.steps = vec![
        Step::terminating(SETUP_STEP_NAME, jar.as_str(), vec![settings.zeppelin_setup_uri()]),
        Step::terminating(
            RUN_STEP_NAME,
            jar.as_str(),
            vec![
                settings.batch_script_uri(),
                "--job-name".to_string(),
                identifier.to_string(),
                "--notebook".to_string(),
                notebook_uri,
                "--data-bucket".to_string(),
                data_bucket.clone(),
            ],
        ),
    ];
    request
}

/// The Spark job provisioner.
///
/// Holds the settings and the injected [`CloudClients`] bundle. All
/// operations are synchronous and fail-fast; concurrent submissions by
/// different callers need no coordination from this type.
pub struct SparkJobProvisioner {
    settings: Arc<Settings>,
    clients: CloudClients,
}

impl SparkJobProvisioner {
    pub fn new(settings: Arc<Settings>, clients: CloudClients) -> Self {
        Self { settings, clients }
    }

    /// Build the base launch request for a job, fetching the shared
    /// configuration document. The spot toggle is read at call time, so
    /// identical calls at different times may produce different pricing
    /// modes; that is an operational knob, not a bug.
    pub fn job_flow_params(&self, params: &JobParams) -> Result<JobFlowRequest, ProvisionError> {
        let configurations = self.clients.configuration.fetch()?;
        assemble_job_flow(
            &self.settings,
            params,
            configurations,
            JOB_LOG_DIR,
            JOB_NAME_COMPONENT,
            Utc::now(),
        )
    }

    /// Upload the notebook file to the code bucket under
    /// `jobs/<identifier>/<filename>`, overwriting any existing object.
    /// Returns the storage key for later reference.
    pub fn upload_artifact(
        &self,
        identifier: &str,
        filename: &str,
        body: Vec<u8>,
    ) -> Result<String, ProvisionError> {
        let key = format!("jobs/{}/{}", identifier, filename);
        self.clients
            .store
            .put_object(&self.settings.code_bucket, &key, body)?;
        log::info!("uploaded notebook artifact to s3://{}/{}", self.settings.code_bucket, key);
        Ok(key)
    }

    /// Retrieve a notebook artifact from the code bucket.
    pub fn fetch_artifact(&self, key: &str) -> Result<Vec<u8>, ProvisionError> {
        Ok(self.clients.store.get_object(&self.settings.code_bucket, key)?)
    }

    /// Remove a notebook artifact from the code bucket. Deleting a missing
    /// key succeeds, making the operation idempotent.
    pub fn delete_artifact(&self, key: &str) -> Result<(), ProvisionError> {
        match self.clients.store.delete_object(&self.settings.code_bucket, key) {
            Err(StoreError::NotFound { .. }) | Ok(()) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Compose and submit the job's launch request. Returns the control
    /// plane's job-flow handle. Submission failures propagate; no retry.
    ///
    /// The caller sequences this after [`Self::upload_artifact`]; if
    /// submission never happens the uploaded object is simply orphaned and
    /// cleaned up out of band.
    pub fn submit_job(
        &self,
        params: &JobParams,
        notebook_key: &str,
        is_public: bool,
        timeout_minutes: u32,
    ) -> Result<JobFlowId, ProvisionError> {
        let base = self.job_flow_params(params)?;
        let request = compose_submission(
            &self.settings,
            base,
            &params.identifier,
            notebook_key,
            is_public,
            timeout_minutes,
        );
        let job_flow_id = self.clients.compute.run_job_flow(&request)?;
        log::info!(
            "submitted job flow {} for job {}",
            job_flow_id,
            params.identifier
        );
        Ok(job_flow_id)
    }

    /// List result artifacts for a job, grouped by result-group segment.
    ///
    /// Drains every listing page before returning; the caller always sees a
    /// complete listing. An empty index (not an error) means no results yet.
    pub fn results(
        &self,
        identifier: &str,
        is_public: bool,
    ) -> Result<ResultIndex, ProvisionError> {
        let bucket = if is_public {
            &self.settings.public_data_bucket
        } else {
            &self.settings.private_data_bucket
        };
        let prefix = format!("{}/", identifier);

        let mut index = ResultIndex::new();
        let mut continuation: Option<String> = None;
        loop {
            let page = self
                .clients
                .store
                .list_objects_page(bucket, &prefix, continuation.as_deref())?;
            for key in page.keys {
                index.insert(key);
            }
            match page.continuation {
                Some(token) => continuation = Some(token),
                None => break,
            }
        }
        Ok(index)
    }
}
