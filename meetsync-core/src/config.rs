//! Global meetsync configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{MeetSyncError, MeetSyncResult};
use crate::store::FileSlotStore;

static DEFAULT_DATA_DIR: &str = "~/.meetsync";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Configuration at ~/.config/meetsync/config.toml
///
/// Any key can be overridden with a `MEETSYNC_`-prefixed environment
/// variable, e.g. `MEETSYNC_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MeetSyncConfig {
    /// Where event and identity slots are stored
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Name used for new events when no display name has been remembered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_name: Option<String>,
}

impl Default for MeetSyncConfig {
    fn default() -> Self {
        MeetSyncConfig {
            data_dir: default_data_dir(),
            default_name: None,
        }
    }
}

impl MeetSyncConfig {
    pub fn config_path() -> MeetSyncResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MeetSyncError::Config("Could not determine config directory".into()))?
            .join("meetsync");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file first if
    /// there is none yet.
    pub fn load() -> MeetSyncResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load `path` with `MEETSYNC_*` environment overrides applied.
    pub fn load_from(path: &Path) -> MeetSyncResult<Self> {
        Self::build(path, true)
    }

    /// Load only what is written in `path`, ignoring the environment.
    pub fn load_file(path: &Path) -> MeetSyncResult<Self> {
        Self::build(path, false)
    }

    fn build(path: &Path, with_env: bool) -> MeetSyncResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from(path.to_path_buf()).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix("MEETSYNC"));
        }

        builder
            .build()
            .map_err(|e| MeetSyncError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MeetSyncError::Config(e.to_string()))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn slot_store(&self) -> FileSlotStore {
        FileSlotStore::new(self.data_path())
    }

    /// Change `default_name` in the config file at `path`. Other keys keep
    /// their file values; environment overrides are never written back.
    pub fn save_default_name(path: &Path, default_name: Option<String>) -> MeetSyncResult<()> {
        let mut file_config = Self::load_file(path)?;
        file_config.default_name = default_name;
        file_config.save_to(path)
    }

    /// Save the current config to `path`.
    pub fn save_to(&self, path: &Path) -> MeetSyncResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| MeetSyncError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| MeetSyncError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MeetSyncResult<()> {
        let contents = format!(
            "\
# meetsync configuration

# Where events and your identity are stored:
# data_dir = \"{}\"

# Name to sign new events with until you set one:
# default_name = \"Anonymous\"
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MeetSyncError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MeetSyncError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
