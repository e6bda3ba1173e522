use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use super::EtlConfig;
use crate::error::{ErrorCode, EtlError, Result};

/// Load the configuration file at `path`, or the defaults when no path is given
pub async fn load_config(path: Option<&Path>) -> Result<EtlConfig> {
    let Some(path) = path else {
        debug!("No configuration file given, using defaults");
        return Ok(EtlConfig::default());
    };

    let content = fs::read_to_string(path).await.map_err(|e| {
        let code = if e.kind() == std::io::ErrorKind::NotFound {
            ErrorCode::CONFIG_NOT_FOUND
        } else {
            ErrorCode::CONFIG_GENERIC
        };
        EtlError::config_with_code(code, format!("cannot read {}", path.display())).with_source(e)
    })?;

    let config = EtlConfig::from_toml_str(&content)
        .map_err(|e| e.with_context(path.display()))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
