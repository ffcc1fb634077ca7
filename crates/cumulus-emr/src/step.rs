//! Execution step and bootstrap action types.
//!
//! A step is one unit of remote work run sequentially on the launched
//! cluster; a bootstrap action runs on every node before any step starts.

use serde::{Deserialize, Serialize};

/// What the control plane does with the cluster when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionOnFailure {
    /// Terminate the whole job flow. The only policy used by cumulus jobs.
    TerminateJobFlow,
    /// Cancel remaining steps but keep the cluster alive.
    CancelAndWait,
    /// Keep running subsequent steps.
    Continue,
}

/// The invocation a step runs: a runner artifact plus its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HadoopJarStep {
    /// URI of the runner artifact, e.g. the script-runner jar.
    pub jar: String,
    /// Ordered argument list passed to the runner.
    pub args: Vec<String>,
}

/// One execution step of a job flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Step {
    /// Display name, e.g. "setup-zeppelin".
    pub name: String,
    /// Failure policy.
    pub action_on_failure: ActionOnFailure,
    /// The invocation to run.
    pub hadoop_jar_step: HadoopJarStep,
}

impl Step {
    /// Create a step that terminates the job flow on failure.
    pub fn terminating(
        name: impl Into<String>,
        jar: impl Into<String>,
        args: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            action_on_failure: ActionOnFailure::TerminateJobFlow,
            hadoop_jar_step: HadoopJarStep {
                jar: jar.into(),
                args,
            },
        }
    }
}

/// The script invocation of a bootstrap action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScriptBootstrapAction {
    /// URI of the bootstrap script.
    pub path: String,
    /// Ordered argument list passed to the script.
    pub args: Vec<String>,
}

/// A script run on every cluster node before steps execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BootstrapAction {
    /// Display name, e.g. "setup-telemetry-spark-job".
    pub name: String,
    /// The script to run.
    pub script_bootstrap_action: ScriptBootstrapAction,
}

impl BootstrapAction {
    /// Create a bootstrap action for the given script and arguments.
    pub fn new(name: impl Into<String>, path: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            script_bootstrap_action: ScriptBootstrapAction {
                path: path.into(),
                args,
            },
        }
    }
}
