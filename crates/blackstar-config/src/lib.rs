mod backend;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use paths::{BASE_DIR_ENV, BlackstarPaths, ConfigError};

use once_cell::sync::OnceCell;

static PATHS: OnceCell<BlackstarPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Rutas del proceso (portable o de sistema), resueltas una sola vez.
pub fn paths() -> Result<&'static BlackstarPaths, ConfigError> {
  PATHS.get_or_try_init(BlackstarPaths::detect)
}

/// Backend de configuración sobre `config/blackstar.toml` de [`paths`].
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| Ok(TomlConfigBackend::new(paths()?.clone())))
}
