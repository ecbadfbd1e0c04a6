use crate::config::ServerConfig;
use artifacts::ArtifactStore;
use std::sync::Arc;

/// Shared application state
///
/// Everything in here is immutable after startup; requests share nothing else.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Artifact corpus rooted at the configured directories
    pub store: Arc<ArtifactStore>,
}

impl ServerState {
    /// Create new server state
    pub fn new(config: ServerConfig) -> Self {
        let store = Arc::new(ArtifactStore::new(config.data.clone()));
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Names of configured artifact directories that are missing
    pub fn missing_directories(&self) -> Vec<&'static str> {
        self.config.data.missing()
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
