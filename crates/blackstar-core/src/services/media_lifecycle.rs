use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use crate::domain::media::{audio_blob_path, cover_blob_path};
use crate::domain::{AudioFingerprint, MediaRef, Release, ReleaseId, ReleasePatch, Track};
use crate::errors::CoreError;
use crate::ports::{BlobStore, ReleaseRepository, RepoError};
use crate::services::locks::ReleaseLocks;

/// Intentos de borrar el registro en `delete_permanently` si no se configura otro valor.
pub const DEFAULT_DELETE_ATTEMPTS: u32 = 3;

/// Rutas de todos los archivos que el lanzamiento todavía tiene en el blob store.
pub fn present_blob_paths(release: &Release) -> Vec<String> {
  let cover = release.cover.file_name().map(|name| cover_blob_path(release.id, name));
  let audios = release
    .tracks
    .iter()
    .filter_map(|t| t.audio.file_name().map(|name| audio_blob_path(release.id, t.id, name)));
  cover.into_iter().chain(audios).collect()
}

/// Estado final de una purga: sin archivos, registro conservado.
///
/// El checklist y el estado no cambian.
pub fn purge_patch(release: &Release) -> ReleasePatch {
  let tracks = release
    .tracks
    .iter()
    .map(|t| Track {
      audio: MediaRef::Purged,
      audio_fingerprint: Some(AudioFingerprint::Purged),
      ..t.clone()
    })
    .collect();

  ReleasePatch {
    cover: Some(MediaRef::Purged),
    tracks: Some(tracks),
    purged: Some(true),
    ..ReleasePatch::default()
  }
}

/// Borrado de archivos (purga) y borrado definitivo de lanzamientos.
pub struct MediaLifecycleManager<R, B>
where
  R: ReleaseRepository,
  B: BlobStore,
{
  repo: Arc<R>,
  blobs: Arc<B>,
  locks: Arc<ReleaseLocks>,
  delete_attempts: u32,
}

impl<R, B> MediaLifecycleManager<R, B>
where
  R: ReleaseRepository,
  B: BlobStore,
{
  pub fn new(repo: Arc<R>, blobs: Arc<B>, locks: Arc<ReleaseLocks>) -> Self {
    Self { repo, blobs, locks, delete_attempts: DEFAULT_DELETE_ATTEMPTS }
  }

  /// Cambia los intentos de borrado del registro (mínimo 1).
  pub fn with_delete_attempts(mut self, attempts: u32) -> Self {
    self.delete_attempts = attempts.max(1);
    self
  }

  /// Borra la capa y los audios del lanzamiento y lo marca como purgado.
  ///
  /// Los fallos al borrar un archivo se registran y se ignoran: la purga
  /// sigue con el resto y siempre deja el registro en estado purgado.
  /// Purgar dos veces no genera borrados nuevos.
  #[instrument(skip_all, fields(release_id = %id))]
  pub async fn purge(&self, id: ReleaseId) -> Result<Release, CoreError> {
    let _guard = self.locks.acquire(id).await;
    let release = self.load(id).await?;
    self.purge_loaded(release).await
  }

  /// Purga el lanzamiento y luego elimina su registro.
  ///
  /// Si eliminar el registro falla se reintenta hasta `delete_attempts`
  /// veces; solo entonces se devuelve el error. Los archivos perdidos no
  /// importan, un registro huérfano sí.
  #[instrument(skip_all, fields(release_id = %id))]
  pub async fn delete_permanently(&self, id: ReleaseId) -> Result<(), CoreError> {
    let _guard = self.locks.acquire(id).await;

    match self.repo.find_release(id).await {
      Ok(Some(release)) => {
        if let Err(err) = self.purge_loaded(release).await {
          warn!(error = %err, "purge before delete failed, deleting record anyway");
        }
      }
      Ok(None) => debug!("release already gone, nothing to purge"),
      Err(err) => warn!(error = %err, "could not load release before delete"),
    }

    let mut last_err = None;
    for attempt in 1..=self.delete_attempts {
      match self.repo.delete_release(id).await {
        Ok(()) => {
          info!(attempt, "release deleted permanently");
          return Ok(());
        }
        Err(err) => {
          warn!(attempt, error = %err, "record delete failed");
          last_err = Some(err);
        }
      }
    }

    Err(CoreError::Repository(last_err.unwrap_or(RepoError::Storage("no delete attempts".into()))))
  }

  async fn load(&self, id: ReleaseId) -> Result<Release, CoreError> {
    self.repo.find_release(id).await?.ok_or(CoreError::NotFound(id))
  }

  async fn purge_loaded(&self, mut release: Release) -> Result<Release, CoreError> {
    let paths = present_blob_paths(&release);
    let results = join_all(paths.iter().map(|path| self.blobs.delete(path))).await;

    let failed = paths
      .iter()
      .zip(results)
      .filter_map(|(path, result)| result.err().map(|err| (path, err)))
      .inspect(|(path, err)| warn!(%path, error = %err, "asset delete failed"))
      .count();

    let patch = purge_patch(&release);
    self
      .repo
      .update_release(release.id, patch.clone())
      .await
      .map_err(|e| CoreError::from_repo(release.id, e))?;
    patch.apply_to(&mut release);

    info!(assets = paths.len(), failed, "release purged");
    Ok(release)
  }
}
