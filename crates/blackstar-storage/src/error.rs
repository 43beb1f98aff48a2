use blackstar_core::ports::RepoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("release not found")]
  NotFound,

  #[error("database error: {0}")]
  Diesel(#[from] diesel::result::Error),

  #[error("pool error: {0}")]
  Pool(#[from] diesel::r2d2::PoolError),

  #[error("migration error: {0}")]
  Migration(String),

  #[error("document encoding error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("corrupt row: {0}")]
  Corrupt(String),

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("config error: {0}")]
  Config(#[from] blackstar_config::ConfigError),
}

impl From<StorageError> for RepoError {
  fn from(err: StorageError) -> Self {
    match err {
      StorageError::NotFound => RepoError::NotFound,
      other => RepoError::Storage(other.to_string()),
    }
  }
}
