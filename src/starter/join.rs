use std::{io, path::Path};

use serde::{Deserialize, Serialize};

use tracing::{debug, info};

use crate::errors::{StarterError, StarterErrorKind};

pub const DEFAULT_CLUSTER: &str = "eu";

/// NetworkJoinConfig tells whether the gateway joins The Things Network and which regional cluster
/// it targets. It is bound as `ttn_config` when the configuration template is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkJoinConfig {
    #[serde(alias = "ttn_enabled")]
    pub enabled: bool,

    #[serde(alias = "ttn_cluster")]
    pub cluster: String,
}

impl Default for NetworkJoinConfig {
    fn default() -> Self {
        NetworkJoinConfig {
            enabled: false,
            cluster: DEFAULT_CLUSTER.to_string(),
        }
    }
}

/// Loads the join config at `path`. A missing file is not an error and yields the defaults; any
/// other read or parse failure is.
pub async fn load_join_config(path: &Path) -> Result<NetworkJoinConfig, StarterError> {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No join config found, using defaults");

            return Ok(NetworkJoinConfig::default());
        }
        Err(e) => {
            return Err(StarterError::with_source(
                StarterErrorKind::ReadJoinConfig,
                format!("Error reading join config {}: {}", path.display(), e),
                e,
            ));
        }
    };

    let config: NetworkJoinConfig = serde_json::from_slice(&content).map_err(|e| {
        StarterError::with_source(
            StarterErrorKind::ParseJoinConfig,
            format!("Error parsing join config {}: {}", path.display(), e),
            e,
        )
    })?;

    debug!(enabled = config.enabled, cluster = %config.cluster, "join config loaded");

    Ok(config)
}
