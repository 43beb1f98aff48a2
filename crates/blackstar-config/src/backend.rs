use crate::paths::{BlackstarPaths, ConfigError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;

use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

/// Configuración en un único archivo TOML, una sección por componente.
#[derive(Debug, Clone)]
pub struct TomlConfigBackend {
  paths: BlackstarPaths,
}

impl TomlConfigBackend {
  pub fn new(paths: BlackstarPaths) -> Self {
    Self { paths }
  }

  pub fn paths(&self) -> &BlackstarPaths {
    &self.paths
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    match fs::read_to_string(self.paths.config_file()) {
      Ok(content) => Ok(Some(toml::from_str(&content)?)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }

  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(value) = self.read_table()?.and_then(|mut t| t.remove(section)) else {
      return Ok(T::default());
    };

    value.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  /// Carga la sección (o su valor por defecto) y la escribe de vuelta, así
  /// el archivo siempre muestra todas las claves en uso.
  pub fn load_or_init_section<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Serialize + Default,
  {
    let value = self.load_section_with_default(section)?;
    self.save_section(section, &value)?;
    Ok(value)
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let path = self.paths.config_file();
    let value = self
      .read_table()?
      .and_then(|mut t| t.remove(section))
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {path:?}")))?;

    value.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    let path = self.paths.config_file();

    let mut doc: DocumentMut = match fs::read_to_string(&path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // La sección se serializa sola (sin cabecera) y se inserta como tabla;
    // el resto del documento conserva comentarios y formato.
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;
    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?
      .into_item();

    doc[section] = section_item;

    blackstar_fs::atomic_write_str(&path, &doc.to_string())?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde::Deserialize;
  use tempfile::tempdir;

  #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
  #[serde(default)]
  struct Lifecycle {
    delete_attempts: u32,
  }

  fn backend(dir: &std::path::Path) -> TomlConfigBackend {
    TomlConfigBackend::new(BlackstarPaths::from_base(dir).unwrap())
  }

  #[test]
  fn test_missing_file_falls_back_to_default_and_is_written() {
    let tmp = tempdir().unwrap();
    let backend = backend(tmp.path());

    let value: Lifecycle = backend.load_or_init_section("lifecycle").unwrap();

    assert_eq!(value, Lifecycle::default());
    let written = fs::read_to_string(backend.paths().config_file()).unwrap();
    assert!(written.contains("[lifecycle]"));
  }

  #[test]
  fn test_save_section_preserves_comments() {
    let tmp = tempdir().unwrap();
    let backend = backend(tmp.path());
    let path = backend.paths().config_file();
    fs::write(&path, "# configuración del sello\n[logging]\nlevel = \"debug\" # detalle\n").unwrap();

    backend.save_section("lifecycle", &Lifecycle { delete_attempts: 5 }).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("# configuración del sello"));
    assert!(written.contains("# detalle"));
    let value: Lifecycle = backend.load_section("lifecycle").unwrap();
    assert_eq!(value, Lifecycle { delete_attempts: 5 });
  }

  #[test]
  fn test_missing_section_is_an_error_without_default() {
    let tmp = tempdir().unwrap();
    let backend = backend(tmp.path());
    fs::write(backend.paths().config_file(), "[logging]\nlevel = \"info\"\n").unwrap();

    let err = backend.load_section::<Lifecycle>("lifecycle").unwrap_err();

    assert!(matches!(err, ConfigError::Other(msg) if msg.contains("[lifecycle]")));
  }
}
