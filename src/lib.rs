//! Cumulus - ephemeral Spark cluster provisioning
//!
//! This crate provisions ephemeral big-data compute clusters on a cloud
//! provider: it uploads user-submitted notebook code to object storage,
//! composes and submits a two-step launch request (environment setup +
//! notebook execution), and retrieves result listings afterwards. A
//! separate identity module verifies third-party OpenID Connect logins.
//!
//! The compute control plane, the object store, and the identity provider
//! are external collaborators consumed behind the [`clients`] traits; mock
//! implementations live in [`mock`].

pub mod clients;
pub mod identity;
pub mod logger;
pub mod mock;
pub mod provisioner;
pub mod settings;

pub use clients::{CloudClients, ComputeClient, ConfigurationSource, ObjectStore, RemoteConfiguration};
pub use provisioner::{JobParams, ProvisionError, ResultIndex, SparkJobProvisioner};
pub use settings::{Environment, Settings, SettingsError};
