//! Configuration for PineconeClient and PineconeMemory.
//!
//! Defines PineconeConfig and its default values.

use std::time::Duration;

/// How `delete` and `overwrite` treat ids that are not in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteVerification {
    /// Fire and report: the confirmation is returned whether or not the ids existed.
    #[default]
    Lenient,
    /// Fetch the ids first and fail with `MemoryError::UnknownIds` if any are missing.
    Strict,
}

/// Configuration for the Pinecone backend.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `api_key` | `String` | Pinecone API key |
/// | `environment` | `String` | Pinecone environment / region (e.g. `us-east1-gcp`) |
/// | `controller_url` | `Option<String>` | Overrides `https://controller.<environment>.pinecone.io` |
/// | `index_name` | `String` | Index to use; created when absent |
/// | `namespace` | `String` | Namespace all records are written to |
/// | `write_verification` | `WriteVerification` | Strictness of `delete` / `overwrite` |
/// | `request_timeout` | `Duration` | Per-request HTTP timeout |
/// | `ready_timeout` | `Duration` | How long to wait for a newly created index to become ready |
/// | `ready_poll_interval` | `Duration` | Delay between readiness checks |
#[derive(Debug, Clone)]
pub struct PineconeConfig {
    pub api_key: String,
    pub environment: String,
    pub controller_url: Option<String>,
    pub index_name: String,
    pub namespace: String,
    pub write_verification: WriteVerification,
    pub request_timeout: Duration,
    pub ready_timeout: Duration,
    pub ready_poll_interval: Duration,
}

impl PineconeConfig {
    pub fn new(
        api_key: impl Into<String>,
        environment: impl Into<String>,
        index_name: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            environment: environment.into(),
            index_name: index_name.into(),
            ..Default::default()
        }
    }

    /// Sends control-plane requests to `url` instead of the environment's controller.
    pub fn with_controller_url(mut self, url: impl Into<String>) -> Self {
        self.controller_url = Some(url.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_write_verification(mut self, mode: WriteVerification) -> Self {
        self.write_verification = mode;
        self
    }

    /// Control-plane base URL without trailing slash.
    pub fn controller_base_url(&self) -> String {
        match self.controller_url.as_deref().filter(|u| !u.is_empty()) {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://controller.{}.pinecone.io", self.environment),
        }
    }
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            environment: String::new(),
            controller_url: None,
            index_name: "auto-gpt".to_string(),
            namespace: "permanent_memory".to_string(),
            write_verification: WriteVerification::Lenient,
            request_timeout: Duration::from_secs(30),
            ready_timeout: Duration::from_secs(300),
            ready_poll_interval: Duration::from_secs(5),
        }
    }
}
