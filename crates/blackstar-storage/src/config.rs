use blackstar_config::{BlackstarPaths, ConfigError, config_backend};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sección `[storage]` de blackstar.toml.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
  /// Ruta de la base SQLite. Si falta, `data/blackstar.db`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub db_path: Option<PathBuf>,
  pub journal_mode: Option<String>,
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig { db_path: None, journal_mode: Some("WAL".to_string()) }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section("storage")
  }

  pub fn resolved_db_path(&self, paths: &BlackstarPaths) -> PathBuf {
    self.db_path.clone().unwrap_or_else(|| paths.data_dir.join("blackstar.db"))
  }
}
