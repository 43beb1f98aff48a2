use blackstar_config::{ConfigError, config_backend};
use blackstar_core::services::DEFAULT_DELETE_ATTEMPTS;
use serde::{Deserialize, Serialize};

/// Sección `[lifecycle]` de blackstar.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
  /// Intentos de borrar el registro en `delete`.
  pub delete_attempts: u32,
}

impl Default for LifecycleConfig {
  fn default() -> Self {
    Self { delete_attempts: DEFAULT_DELETE_ATTEMPTS }
  }
}

impl LifecycleConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section("lifecycle")
  }
}

/// Sección `[logging]`. `RUST_LOG` tiene prioridad sobre `level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
  pub level: String,
}

impl Default for LoggingConfig {
  fn default() -> Self {
    Self { level: "info".to_string() }
  }
}

impl LoggingConfig {
  pub fn load() -> Result<Self, ConfigError> {
    config_backend()?.load_or_init_section("logging")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_sections_fill_missing_keys_with_defaults() {
    let lifecycle: LifecycleConfig = toml::from_str("").unwrap();
    let logging: LoggingConfig = toml::from_str("level = \"debug\"").unwrap();

    assert_eq!(lifecycle.delete_attempts, 3);
    assert_eq!(logging.level, "debug");
  }
}
