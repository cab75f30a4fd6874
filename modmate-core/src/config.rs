//! ModMate configuration
//!
//! ## Configuration Sources (in precedence order)
//!
//! 1. `--config <path>` on the command line
//! 2. `config.yaml` in the platform config directory
//!    (e.g. `~/.config/modmate/config.yaml`)
//! 3. Built-in defaults
//!
//! A missing file is not an error; every field is optional.
//!
//! ```yaml
//! api_base_url: https://api.nusmods.com/v2
//! request_timeout_secs: 30
//! academic_year: 2024-2025
//! log_level: warn
//! session_file: /home/me/.local/share/modmate/session.json
//! autosave: true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{AcademicYear, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};

const CONFIG_FILE_NAME: &str = "config.yaml";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModmateConfig {
    /// Root of the NUSMods API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Timeout for catalog requests in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Fixed academic year instead of the one containing today
    #[serde(default)]
    pub academic_year: Option<AcademicYear>,

    /// Log filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where the user's timetables and bookmarks are saved
    #[serde(default)]
    pub session_file: Option<PathBuf>,

    /// Save the session on exit
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_autosave() -> bool {
    true
}

impl Default for ModmateConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_timeout(),
            academic_year: None,
            log_level: default_log_level(),
            session_file: None,
            autosave: default_autosave(),
        }
    }
}

impl ModmateConfig {
    /// Load from `override_path`, or from the default location
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        match override_path {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file does not exist: {}", path.display());
                }
                Self::load_from_path(path)
            }
            None => match Self::default_config_path() {
                Some(path) => Self::load_from_path(&path),
                None => {
                    tracing::debug!("No platform config directory, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load from a specific path; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_yaml_ng::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            anyhow::bail!("api_base_url must start with http:// or https://");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// The academic year treated as current
    pub fn current_year(&self) -> AcademicYear {
        self.academic_year.unwrap_or_else(AcademicYear::current)
    }

    /// Configured session file, or the platform data directory default
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().join(SESSION_FILE_NAME)))
    }

    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", "modmate", "modmate")
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ModmateConfig::load_from_path(&temp_dir.path().join("config.yaml")).unwrap();

        assert_eq!(config, ModmateConfig::default());
        assert_eq!(config.api_base_url, "https://api.nusmods.com/v2");
        assert!(config.autosave);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "academic_year: 2023-2024\nautosave: false\nsession_file: /tmp/session.json\n",
        )
        .unwrap();

        let config = ModmateConfig::load_from_path(&path).unwrap();
        assert_eq!(config.academic_year, Some(AcademicYear::new(2023)));
        assert_eq!(config.current_year(), AcademicYear::new(2023));
        assert!(!config.autosave);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.session_path(), Some(PathBuf::from("/tmp/session.json")));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");

        std::fs::write(&path, "api_base_url: ftp://example.com\n").unwrap();
        let err = ModmateConfig::load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("http:// or https://"));

        std::fs::write(&path, "request_timeout_secs: 0\n").unwrap();
        assert!(ModmateConfig::load_from_path(&path).is_err());

        std::fs::write(&path, "academic_year: soon\n").unwrap();
        assert!(ModmateConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.yaml");
        assert!(ModmateConfig::load(Some(&missing)).is_err());
    }
}
