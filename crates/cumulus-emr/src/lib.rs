//! EMR Launch-Request Payload Types
//!
//! Defines the JSON payload shapes consumed by the cluster control plane's
//! `RunJobFlow` endpoint. These are pure data types with the provider's
//! PascalCase wire names; all I/O lives in the `cumulus` crate.

pub mod instance;
pub mod request;
pub mod step;

pub use instance::{InstanceGroup, InstanceRole, Market};
pub use request::{Application, Instances, JobFlowRequest, Tag};
pub use step::{ActionOnFailure, BootstrapAction, HadoopJarStep, ScriptBootstrapAction, Step};

/// Opaque cluster handle assigned by the control plane, e.g. `j-3H6EATEXAMPLE`.
pub type JobFlowId = String;
