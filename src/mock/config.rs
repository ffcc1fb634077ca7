//! Mock configuration source.

use std::sync::{Arc, RwLock};

use crate::clients::{ConfigurationSource, FetchError};

/// Configuration source returning a fixed JSON document, with optional
/// injected rejection to exercise the hard-failure path.
#[derive(Debug, Clone)]
pub struct StaticConfiguration {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug)]
struct Inner {
    value: serde_json::Value,
    reject_status: Option<u16>,
}

impl StaticConfiguration {
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                value,
                reject_status: None,
            })),
        }
    }

    /// An empty configuration list, the smallest valid document.
    pub fn empty() -> Self {
        Self::new(serde_json::json!([]))
    }

    /// Make subsequent fetches fail with the given HTTP status.
    pub fn reject_with(&self, status: u16) {
        self.inner.write().unwrap().reject_status = Some(status);
    }
}

impl ConfigurationSource for StaticConfiguration {
    fn fetch(&self) -> Result<serde_json::Value, FetchError> {
        let inner = self.inner.read().unwrap();
        if let Some(status) = inner.reject_status {
            return Err(FetchError::Rejected {
                url: "mock://configuration.json".to_string(),
                status,
            });
        }
        Ok(inner.value.clone())
    }
}
