//! File-based configuration loading
//!
//! Optional JSON file overriding the server and animation settings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::settings::Settings;

/// Config file name searched in the default locations
pub const CONFIG_FILE_NAME: &str = "aipowermeter.json";

/// Server overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

/// Animation overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnimationOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    /// Seconds before a failed fetch is retried
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Session overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionOverrides {
    /// Idle seconds before a session is dropped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    #[serde(rename = "maxSessions", skip_serializing_if = "Option::is_none")]
    pub max_sessions: Option<usize>,
}

/// Configuration loaded from JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerOverrides,
    #[serde(default)]
    pub animation: AnimationOverrides,
    #[serde(default)]
    pub session: SessionOverrides,
}

impl FileConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: FileConfig =
            serde_json::from_str(&content).with_context(|| "Failed to parse config JSON")?;

        Ok(config)
    }

    /// Default locations, in search order:
    /// 1. ~/.config/aipowermeter/aipowermeter.json
    /// 2. ./aipowermeter.json
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("aipowermeter").join(CONFIG_FILE_NAME));
        }
        paths.push(PathBuf::from(CONFIG_FILE_NAME));
        paths
    }

    /// Load the first config file found in the default locations.
    ///
    /// A missing file yields empty overrides; an unreadable or malformed one is an error.
    pub fn load_default() -> Result<Self> {
        Self::load_first(&Self::default_paths())
    }

    pub fn load_first(paths: &[PathBuf]) -> Result<Self> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Self::load(path),
            None => {
                debug!("No configuration file found, using environment only");
                Ok(Self::default())
            }
        }
    }

    /// Overwrite the settings fields this file sets
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.server.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.server.port {
            settings.server.port = port;
        }
        if let Some(enabled) = self.animation.enabled {
            settings.animation.enabled = enabled;
        }
        if let Some(url) = &self.animation.url {
            settings.animation.url = url.clone();
        }
        if let Some(timeout) = self.animation.timeout {
            settings.animation.timeout = timeout;
        }
        if let Some(retry_after) = self.animation.retry_after {
            settings.animation.retry_after = retry_after;
        }
        if let Some(ttl) = self.session.ttl {
            settings.session.ttl = ttl;
        }
        if let Some(max_sessions) = self.session.max_sessions {
            settings.session.max_sessions = max_sessions;
        }
    }
}
