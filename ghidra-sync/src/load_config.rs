//! `load_config` module: reads the optional YAML config into a [`SyncConfig`].
//!
//! Without a file the defaults reproduce the upstream layout. Every key is optional;
//! missing ones fall back to those defaults.
//!
//! # Errors
//! All errors use `anyhow::Error` and surface at the CLI boundary.
use anyhow::Result;
use ghidra_sync_core::config::SyncConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub fn load_config(path: Option<&Path>) -> Result<SyncConfig> {
    let Some(path_ref) = path else {
        info!("No config file given, using upstream defaults");
        return Ok(SyncConfig::default());
    };
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    // An empty document deserialises to null; treat it as all defaults.
    if config_content.trim().is_empty() {
        return Ok(SyncConfig::default());
    }

    match serde_yaml::from_str::<SyncConfig>(&config_content) {
        Ok(conf) => {
            info!(config_path = ?path_ref, "Parsed config YAML successfully");
            Ok(conf)
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            Err(anyhow::anyhow!("Failed to parse config YAML: {e}"))
        }
    }
}
