#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobError {
  #[error("io error: {0}")]
  Io(String),

  #[error("invalid blob path: {0}")]
  InvalidPath(String),

  #[error("blob backend error: {0}")]
  Backend(String),
}

/// Port del almacenamiento de archivos (capas y audios).
///
/// Las rutas siguen el esquema de `domain::media` (`capas/...`, `audios/...`).
/// El núcleo nunca lee los bytes de vuelta: solo guarda la URL devuelta.
#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
  /// Sube `bytes` a `path` y devuelve la URL de descarga.
  async fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, BlobError>;

  /// Borra el objeto en `path`. Si no existe, no es un error.
  async fn delete(&self, path: &str) -> Result<(), BlobError>;
}
