//! Configuration handling for the wizard host

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::storage::SessionId;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WizardConfig {
    /// Directory holding session snapshots
    pub snapshot_dir: Option<PathBuf>,
    /// Session used when none is given on the command line
    pub active_session: Option<String>,
    /// Default tracing filter (overridden by RUST_LOG)
    pub log_filter: Option<String>,
}

impl WizardConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "zoning", "zoning-wizard")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Configured snapshot directory, or the platform data directory
    pub fn snapshot_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.snapshot_dir {
            return Ok(dir.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_local_dir().join("sessions"))
            .context("could not determine a data directory for session snapshots")
    }

    /// The recorded active session, ignoring values that are not session ids
    pub fn active_session_id(&self) -> Option<SessionId> {
        let raw = self.active_session.as_deref()?;
        match raw.parse() {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(value = raw, error = %err, "ignoring malformed active session");
                None
            }
        }
    }

    pub fn set_active_session(&mut self, session_id: Option<SessionId>) {
        self.active_session = session_id.map(|id| id.to_string());
    }
}
