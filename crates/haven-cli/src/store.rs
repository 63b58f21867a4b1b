//! CLI-side persistence: a JSON registry snapshot plus a small TOML config.
//!
//! The engine never touches storage; this store owns it. Load failures are
//! reported in calm, non-technical terms and never imply data loss -- a
//! snapshot that cannot be read is left exactly where it is.

use std::fs;
use std::path::PathBuf;

use haven_core::InMemoryRegistry;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the snapshot path (used by tests).
pub const REGISTRY_PATH_ENV: &str = "HAVEN_REGISTRY_PATH";

/// CLI configuration, loaded from `<config dir>/haven/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// The user all commands act as.
    pub user_id: String,
    /// Optional explicit snapshot path.
    pub registry_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            user_id: "local".to_string(),
            registry_path: None,
        }
    }
}

impl CliConfig {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("haven").join("config.toml"))
    }

    /// Load the config, falling back to defaults when absent or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(raw) = fs::read_to_string(&path) else {
            return Self::default();
        };
        toml::from_str(&raw).unwrap_or_default()
    }
}

/// An opened registry snapshot, ready to read and write back.
pub struct Store {
    path: PathBuf,
    pub user_id: String,
    pub registry: InMemoryRegistry,
}

impl Store {
    /// Open the snapshot named by the environment, the config, or the
    /// default data directory, in that order. A missing file is an empty
    /// registry, not an error.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = CliConfig::load_or_default();
        let path = snapshot_path(&config)?;

        let registry = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|_| {
                "your saved data could not be read right now; nothing has been changed"
            })?;
            serde_json::from_str(&raw).map_err(|_| {
                "your saved data could not be read right now; nothing has been changed"
            })?
        } else {
            InMemoryRegistry::new()
        };

        Ok(Self {
            path,
            user_id: config.user_id,
            registry,
        })
    }

    /// Write the snapshot back.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.registry)?;
        fs::write(&self.path, json)
            .map_err(|_| "your changes could not be saved; the previous data is intact")?;
        Ok(())
    }
}

fn snapshot_path(config: &CliConfig) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Ok(path) = std::env::var(REGISTRY_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = &config.registry_path {
        return Ok(path.clone());
    }
    let dir = dirs::data_dir().ok_or("no data directory available on this system")?;
    Ok(dir.join("haven").join("registry.json"))
}
