use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::domain::{
  Checklist, DownloadLog, FileType, Release, ReleaseId, ReleasePatch, ReleaseStatus, derive_status,
};
use crate::errors::CoreError;
use crate::ports::ReleaseRepository;
use crate::services::locks::ReleaseLocks;

/// Trabajo del staff sobre lanzamientos ya recibidos.
pub struct ReviewService<R>
where
  R: ReleaseRepository,
{
  repo: Arc<R>,
  locks: Arc<ReleaseLocks>,
}

impl<R> ReviewService<R>
where
  R: ReleaseRepository,
{
  pub fn new(repo: Arc<R>, locks: Arc<ReleaseLocks>) -> Self {
    Self { repo, locks }
  }

  // -------- QUERY (read) --------

  pub async fn list_releases(&self) -> Result<Vec<Release>, CoreError> {
    Ok(self.repo.list_releases().await?)
  }

  pub async fn get_release(&self, id: ReleaseId) -> Result<Release, CoreError> {
    self.repo.find_release(id).await?.ok_or(CoreError::NotFound(id))
  }

  // -------- COMMANDS --------

  /// Guarda el checklist y recalcula el estado.
  ///
  /// Un lanzamiento rechazado guarda el checklist pero sigue `Rejected`
  /// hasta que se reabra.
  #[instrument(skip_all, fields(release_id = %id))]
  pub async fn update_checklist(
    &self,
    id: ReleaseId,
    checklist: Checklist,
  ) -> Result<ReleaseStatus, CoreError> {
    let _guard = self.locks.acquire(id).await;
    let current = self.get_release(id).await?;

    let status = match current.status {
      ReleaseStatus::Rejected => ReleaseStatus::Rejected,
      _ => derive_status(&checklist),
    };

    let patch =
      ReleasePatch { checklist: Some(checklist), status: Some(status), ..Default::default() };
    self.apply(id, patch).await?;
    info!(%status, "checklist updated");
    Ok(status)
  }

  #[instrument(skip_all, fields(release_id = %id))]
  pub async fn reject(&self, id: ReleaseId) -> Result<(), CoreError> {
    let _guard = self.locks.acquire(id).await;
    self.get_release(id).await?;
    self
      .apply(id, ReleasePatch { status: Some(ReleaseStatus::Rejected), ..Default::default() })
      .await?;
    info!("release rejected");
    Ok(())
  }

  /// Saca un lanzamiento de `Rejected` recalculando el estado desde su checklist.
  #[instrument(skip_all, fields(release_id = %id))]
  pub async fn reopen(&self, id: ReleaseId) -> Result<ReleaseStatus, CoreError> {
    let _guard = self.locks.acquire(id).await;
    let current = self.get_release(id).await?;
    let status = derive_status(&current.checklist);
    self.apply(id, ReleasePatch { status: Some(status), ..Default::default() }).await?;
    info!(%status, "release reopened");
    Ok(status)
  }

  #[instrument(skip_all, fields(release_id = %id))]
  pub async fn set_admin_notes(&self, id: ReleaseId, notes: &str) -> Result<(), CoreError> {
    let _guard = self.locks.acquire(id).await;
    let patch = ReleasePatch { admin_notes: Some(notes.to_string()), ..Default::default() };
    self.apply(id, patch).await
  }

  /// Registra que `user` descargó un archivo del lanzamiento.
  #[instrument(skip_all, fields(release_id = %id, %file_type))]
  pub async fn register_download(
    &self,
    id: ReleaseId,
    user: &str,
    file_type: FileType,
    file_name: &str,
    at: DateTime<Utc>,
  ) -> Result<(), CoreError> {
    let _guard = self.locks.acquire(id).await;
    let entry =
      DownloadLog { date: at, user: user.to_string(), file_type, file_name: file_name.to_string() };
    self.repo.append_download(id, entry).await.map_err(|e| CoreError::from_repo(id, e))
  }

  async fn apply(&self, id: ReleaseId, patch: ReleasePatch) -> Result<(), CoreError> {
    self.repo.update_release(id, patch).await.map_err(|e| CoreError::from_repo(id, e))
  }
}
