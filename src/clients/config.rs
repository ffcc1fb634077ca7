//! Shared launch-configuration fetch.
//!
//! The Spark EMR configuration blob lives at a well-known HTTPS URL so it
//! can be shared between services. It is fetched fresh on every request
//! build; there is no local fallback or cached copy.

/// Errors from the configuration fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("configuration endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("configuration endpoint returned {status} for {url}")]
    Rejected { url: String, status: u16 },
}

/// A source of the launch configuration document.
pub trait ConfigurationSource: Send + Sync {
    /// Fetch the configuration JSON. Any failure is hard; no retry.
    fn fetch(&self) -> Result<serde_json::Value, FetchError>;
}

/// HTTP-backed configuration source.
#[derive(Debug, Clone)]
pub struct RemoteConfiguration {
    http: reqwest::blocking::Client,
    url: String,
}

impl RemoteConfiguration {
    /// Create a fetcher for the given URL with a default HTTP client.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            url: url.into(),
        }
    }

    /// Create a fetcher reusing an existing HTTP client.
    pub fn with_client(http: reqwest::blocking::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// The URL this fetcher reads from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ConfigurationSource for RemoteConfiguration {
    fn fetch(&self) -> Result<serde_json::Value, FetchError> {
        let response = self.http.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Rejected {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }
}
