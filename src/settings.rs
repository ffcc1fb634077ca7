//! Runtime settings.
//!
//! Parses and validates the settings file (TOML). Settings are constructed
//! once at process start and passed by reference into the provisioner; no
//! component performs ambient configuration lookup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Deployment environment the process runs in.
///
/// Appears in the cluster name and tags. `Unknown` is a sentinel used only
/// at the boundary when the environment cannot be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Stage,
    Prod,
    #[default]
    Unknown,
}

impl Environment {
    /// Derive the environment from a runtime configuration name such as
    /// `settings.Prod`: the last dotted segment, lower-cased. Anything
    /// unrecognized maps to [`Environment::Unknown`].
    pub fn from_runtime_name(name: &str) -> Self {
        let segment = name.rsplit('.').next().unwrap_or(name);
        match segment.to_lowercase().as_str() {
            "dev" => Self::Dev,
            "stage" => Self::Stage,
            "prod" => Self::Prod,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Stage => write!(f, "stage"),
            Self::Prod => write!(f, "prod"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Errors that can occur when loading the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
}

/// All configuration consumed by the provisioner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Product name used as the first component of cluster names.
    #[serde(default = "default_product")]
    pub product: String,

    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,

    /// Cloud region, e.g. "us-west-2".
    pub region: String,

    /// Instance type for the master group.
    pub master_instance_type: String,

    /// Instance type for the core (worker) group.
    pub worker_instance_type: String,

    /// EC2 key pair name for SSH access to cluster nodes.
    pub ec2_key_name: String,

    /// Bucket holding uploaded notebook artifacts.
    pub code_bucket: String,

    /// Bucket receiving cluster logs.
    pub log_bucket: String,

    /// Bucket for publicly readable job results.
    pub public_data_bucket: String,

    /// Bucket for private job results.
    pub private_data_bucket: String,

    /// Bucket holding the shared Spark EMR scripts and configuration.
    pub spark_emr_bucket: String,

    /// Instance profile the cluster nodes assume.
    pub instance_profile: String,

    /// Service role the control plane assumes.
    #[serde(default = "default_service_role")]
    pub service_role: String,

    /// Value of the "Application" tag.
    pub instance_app_tag: String,

    /// Value of the accounting "App" tag.
    pub accounting_app_tag: String,

    /// Value of the accounting "Type" tag.
    pub accounting_type_tag: String,

    /// Whether core groups use spot pricing. An operational knob: flipping
    /// it changes the pricing mode of subsequently built requests.
    #[serde(default)]
    pub use_spot_instances: bool,

    /// Bid price used when spot pricing is enabled.
    #[serde(default = "default_spot_bid_price")]
    pub spot_bid_price: String,
}

fn default_product() -> String {
    "cumulus".to_string()
}

fn default_service_role() -> String {
    "EMR_DefaultRole".to_string()
}

fn default_spot_bid_price() -> String {
    "0.84".to_string()
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// URL of the shared configuration document, stored in object storage so
    /// it can be shared between services.
    pub fn configuration_url(&self) -> String {
        format!(
            "https://s3-{}.amazonaws.com/{}/configuration/configuration.json",
            self.region, self.spark_emr_bucket
        )
    }

    /// URI of the bootstrap script run on every cluster node.
    pub fn bootstrap_script_uri(&self) -> String {
        format!("s3://{}/bootstrap/setup.sh", self.spark_emr_bucket)
    }

    /// URI of the Zeppelin environment-setup step script.
    pub fn zeppelin_setup_uri(&self) -> String {
        format!("s3://{}/steps/zeppelin/zeppelin.sh", self.spark_emr_bucket)
    }

    /// URI of the notebook batch-run step script.
    pub fn batch_script_uri(&self) -> String {
        format!("s3://{}/steps/batch.sh", self.spark_emr_bucket)
    }

    /// URI of the provider's script-runner jar for the configured region.
    pub fn script_runner_jar_uri(&self) -> String {
        format!(
            "s3://{}.elasticmapreduce/libs/script-runner/script-runner.jar",
            self.region
        )
    }
}

/// Example settings shared across unit tests.
#[cfg(test)]
pub(crate) const EXAMPLE_TOML: &str = r#"
    environment = "stage"
    region = "us-west-2"
    master_instance_type = "c3.4xlarge"
    worker_instance_type = "c3.4xlarge"
    ec2_key_name = "cumulus-key"
    code_bucket = "cumulus-code"
    log_bucket = "cumulus-logs"
    public_data_bucket = "cumulus-data-public"
    private_data_bucket = "cumulus-data-private"
    spark_emr_bucket = "cumulus-spark-emr"
    instance_profile = "spark-instance-profile"
    instance_app_tag = "cumulus-app"
    accounting_app_tag = "spark-analysis"
    accounting_type_tag = "adhoc"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_with_defaults() {
        let settings: Settings = toml::from_str(EXAMPLE_TOML).unwrap();

        assert_eq!(settings.product, "cumulus");
        assert_eq!(settings.environment, Environment::Stage);
        assert_eq!(settings.service_role, "EMR_DefaultRole");
        assert_eq!(settings.spot_bid_price, "0.84");
        assert!(!settings.use_spot_instances);
    }

    #[test]
    fn test_derived_uris() {
        let settings: Settings = toml::from_str(EXAMPLE_TOML).unwrap();

        assert_eq!(
            settings.configuration_url(),
            "https://s3-us-west-2.amazonaws.com/cumulus-spark-emr/configuration/configuration.json"
        );
        assert_eq!(
            settings.bootstrap_script_uri(),
            "s3://cumulus-spark-emr/bootstrap/setup.sh"
        );
        assert_eq!(
            settings.script_runner_jar_uri(),
            "s3://us-west-2.elasticmapreduce/libs/script-runner/script-runner.jar"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cumulus.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(EXAMPLE_TOML.as_bytes()).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.region, "us-west-2");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Settings::load("/nonexistent/cumulus.toml");
        assert!(matches!(result, Err(SettingsError::NotFound(_))));
    }

    #[test]
    fn test_environment_from_runtime_name() {
        assert_eq!(Environment::from_runtime_name("settings.Prod"), Environment::Prod);
        assert_eq!(Environment::from_runtime_name("app.config.Stage"), Environment::Stage);
        assert_eq!(Environment::from_runtime_name("dev"), Environment::Dev);
        assert_eq!(Environment::from_runtime_name("settings.Testing"), Environment::Unknown);
        assert_eq!(Environment::from_runtime_name(""), Environment::Unknown);
    }

    #[test]
    fn test_environment_display_is_lowercase() {
        assert_eq!(Environment::Prod.to_string(), "prod");
        assert_eq!(Environment::Unknown.to_string(), "unknown");
    }
}
