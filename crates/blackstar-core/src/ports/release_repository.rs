use chrono::{DateTime, Utc};

use crate::domain::{DownloadLog, Release, ReleaseId, ReleasePatch};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  #[error("storage error: {0}")]
  Storage(String),
}

/// Artista registrado explícitamente en el directorio.
///
/// La clave es `name`, ya normalizado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredArtist {
  pub name: String,
  pub created_at: DateTime<Utc>,
}

/// Port de persistencia de lanzamientos y del registro de artistas.
///
/// Un documento por lanzamiento, indexado por `id`. Las implementaciones
/// deciden cómo guardan el documento; el núcleo solo ve [`Release`].
#[async_trait::async_trait]
pub trait ReleaseRepository: Send + Sync {
  /// Todos los lanzamientos, del más reciente al más antiguo (`created_at`).
  async fn list_releases(&self) -> Result<Vec<Release>, RepoError>;

  async fn find_release(&self, id: ReleaseId) -> Result<Option<Release>, RepoError>;

  /// Crea o reemplaza el documento completo.
  async fn save_release(&self, release: &Release) -> Result<(), RepoError>;

  /// Aplica una actualización parcial. `RepoError::NotFound` si no existe.
  async fn update_release(&self, id: ReleaseId, patch: ReleasePatch) -> Result<(), RepoError>;

  /// Borra el documento. Borrar un id inexistente no es un error.
  async fn delete_release(&self, id: ReleaseId) -> Result<(), RepoError>;

  /// Agrega una entrada al historial de descargas sin tocar las existentes.
  async fn append_download(&self, id: ReleaseId, entry: DownloadLog) -> Result<(), RepoError>;

  async fn list_artists(&self) -> Result<Vec<RegisteredArtist>, RepoError>;

  /// Inserta o sobrescribe el artista con la misma clave.
  async fn insert_artist(&self, artist: &RegisteredArtist) -> Result<(), RepoError>;
}
