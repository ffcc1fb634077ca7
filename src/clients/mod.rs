//! Cloud client capabilities.
//!
//! The control plane, the object store, and the configuration endpoint are
//! external collaborators consumed behind small traits. A [`CloudClients`]
//! bundle is built once and injected into job-type-specific provisioners
//! (composition, not a shared base type).

pub mod compute;
pub mod config;
pub mod store;

use std::sync::Arc;

pub use compute::{ComputeClient, ComputeError};
pub use config::{ConfigurationSource, FetchError, RemoteConfiguration};
pub use store::{ObjectPage, ObjectStore, StoreError};

/// Capability bundle holding one client per external collaborator.
#[derive(Clone)]
pub struct CloudClients {
    /// Cluster control-plane client.
    pub compute: Arc<dyn ComputeClient>,
    /// Object-storage client.
    pub store: Arc<dyn ObjectStore>,
    /// Source of the shared launch configuration document.
    pub configuration: Arc<dyn ConfigurationSource>,
}

impl CloudClients {
    pub fn new(
        compute: Arc<dyn ComputeClient>,
        store: Arc<dyn ObjectStore>,
        configuration: Arc<dyn ConfigurationSource>,
    ) -> Self {
        Self {
            compute,
            store,
            configuration,
        }
    }
}
