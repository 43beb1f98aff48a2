use thiserror::Error;

use crate::domain::ReleaseId;
use crate::ports::{BlobError, RepoError};
use crate::validation::ValidationError;

/// Error genérico del núcleo de Blackstar.
///
/// Las capas superiores (CLI, etc.) deberían mapear este error a mensajes
/// de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  /// La entrega no cumple alguna regla; no se escribió nada.
  #[error("validation failed: {0}")]
  Validation(#[from] ValidationError),

  #[error("repository error: {0}")]
  Repository(#[from] RepoError),

  #[error("blob store error: {0}")]
  Blob(#[from] BlobError),

  #[error("release {0} not found")]
  NotFound(ReleaseId),

  /// Algunas escrituras de `normalize_all` fallaron.
  #[error("normalization updated {updated} releases, {failed} failed")]
  PartialNormalization { updated: usize, failed: usize },
}

impl CoreError {
  /// Traduce `RepoError::NotFound` al id concreto que se buscaba.
  pub(crate) fn from_repo(id: ReleaseId, err: RepoError) -> Self {
    match err {
      RepoError::NotFound => CoreError::NotFound(id),
      other => CoreError::Repository(other),
    }
  }
}
