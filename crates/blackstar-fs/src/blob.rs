use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use blackstar_core::ports::{BlobError, BlobStore};
use tracing::debug;

use crate::config::BlobsConfig;
use crate::io::atomic_write;

/// `BlobStore` sobre el disco local.
///
/// Cada blob vive en `root/{path}` con el mismo esquema de rutas del núcleo
/// (`capas/...`, `audios/...`). La URL devuelta es
/// `{public_base_url}/{path}`, o una URL `file://` si no hay prefijo.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
  root: PathBuf,
  public_base_url: Option<String>,
}

impl LocalBlobStore {
  pub fn new(root: impl Into<PathBuf>, public_base_url: Option<String>) -> Self {
    let public_base_url = public_base_url.map(|url| url.trim_end_matches('/').to_string());
    Self { root: root.into(), public_base_url }
  }

  /// Construye el store desde `[blobs]`, con `default_root` si no hay raíz.
  pub fn from_config(config: &BlobsConfig, default_root: &Path) -> Self {
    let root = config.root.clone().unwrap_or_else(|| default_root.to_path_buf());
    Self::new(root, config.public_base_url.clone())
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  /// Ruta en disco de un blob. Rechaza rutas vacías, absolutas o con `..`.
  pub fn resolve(&self, path: &str) -> Result<PathBuf, BlobError> {
    let relative = Path::new(path);
    let valid = !path.is_empty()
      && relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !valid {
      return Err(BlobError::InvalidPath(path.to_string()));
    }
    Ok(self.root.join(relative))
  }

  pub fn url_for(&self, path: &str) -> String {
    match &self.public_base_url {
      Some(base) => format!("{base}/{path}"),
      None => format!("file://{}", self.root.join(path).display()),
    }
  }

  /// Borra las carpetas que quedaron vacías entre `file` y la raíz.
  async fn prune_empty_parents(&self, file: &Path) {
    let mut dir = file.parent();
    while let Some(current) = dir {
      if current == self.root || tokio::fs::remove_dir(current).await.is_err() {
        break;
      }
      dir = current.parent();
    }
  }
}

fn io_error(path: &Path, err: std::io::Error) -> BlobError {
  BlobError::Io(format!("{}: {err}", path.display()))
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
  async fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, BlobError> {
    let target = self.resolve(path)?;
    if let Some(parent) = target.parent() {
      tokio::fs::create_dir_all(parent).await.map_err(|e| io_error(parent, e))?;
    }
    atomic_write(&target, bytes).await.map_err(|e| io_error(&target, e))?;
    debug!(%path, bytes = bytes.len(), "blob stored");
    Ok(self.url_for(path))
  }

  async fn delete(&self, path: &str) -> Result<(), BlobError> {
    let target = self.resolve(path)?;
    match tokio::fs::remove_file(&target).await {
      Ok(()) => {
        debug!(%path, "blob deleted");
        self.prune_empty_parents(&target).await;
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
      Err(e) => Err(io_error(&target, e)),
    }
  }
}
