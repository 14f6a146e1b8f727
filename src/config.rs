//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Server used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:4080/omero_forms/";

/// Request timeout used when nothing is configured
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssignerConfig {
    /// Base URL of the forms app, e.g. `https://omero.example.org/omero_forms/`
    pub base_url: Option<String>,
    /// Value of the web session cookie
    pub session_id: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl AssignerConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "openmicroscopy", "forms-assigner")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get the log file path
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("forms-assigner.log"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        Ok(config.with_overrides(
            std::env::var("FORMS_ASSIGNER_BASE_URL").ok(),
            std::env::var("FORMS_ASSIGNER_SESSION").ok(),
        ))
    }

    /// Apply non-empty overrides on top of the file values
    pub fn with_overrides(mut self, base_url: Option<String>, session_id: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|s| !s.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(session) = session_id.filter(|s| !s.is_empty()) {
            self.session_id = Some(session);
        }
        self
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
