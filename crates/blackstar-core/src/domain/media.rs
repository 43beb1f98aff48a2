use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::ids::{ReleaseId, TrackId};

/// Nombre de archivo que queda en el documento tras una purga.
pub const DELETED_MEDIA_SENTINEL: &str = "[DELETED_MEDIA]";

/// Huella de audio que queda en el documento tras una purga.
pub const PURGED_HASH_SENTINEL: &str = "[PURGED]";

/// Prefijo común de los centinelas de borrado, incluidos los de registros
/// antiguos (`"[DELETED]"`).
pub(crate) const DELETED_PREFIX: &str = "[DELETED";

/// Referencia a un archivo multimedia (capa o audio) de un lanzamiento.
///
/// Internamente se trabaja con este estado explícito; los centinelas de texto
/// solo existen en el documento persistido (ver `domain::document`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaRef {
  /// Nunca se subió archivo.
  #[default]
  Absent,
  /// Archivo disponible en el blob store.
  Present(StoredMedia),
  /// El archivo fue eliminado; el registro se conserva.
  Purged,
}

/// Archivo almacenado: nombre original y URL devuelta por el blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMedia {
  pub file_name: String,
  pub url: String,
}

impl MediaRef {
  pub fn present(file_name: impl Into<String>, url: impl Into<String>) -> Self {
    MediaRef::Present(StoredMedia { file_name: file_name.into(), url: url.into() })
  }

  /// Nombre original del archivo, si todavía existe.
  pub fn file_name(&self) -> Option<&str> {
    match self {
      MediaRef::Present(media) => Some(media.file_name.as_str()),
      _ => None,
    }
  }
}

/// Huella del contenido de un audio, calculada al recibir la entrega.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFingerprint {
  /// SHA-256 en hexadecimal (prefijado con `sha256-` en el documento).
  Sha256(String),
  /// El audio fue purgado.
  Purged,
}

impl AudioFingerprint {
  pub fn of_bytes(bytes: &[u8]) -> Self {
    AudioFingerprint::Sha256(hex::encode(Sha256::digest(bytes)))
  }
}

/// Ruta de la capa en el blob store: `capas/{releaseId}/{fileName}`.
pub fn cover_blob_path(release_id: ReleaseId, file_name: &str) -> String {
  format!("capas/{release_id}/{file_name}")
}

/// Ruta de un audio en el blob store: `audios/{releaseId}/{trackId}/{fileName}`.
pub fn audio_blob_path(release_id: ReleaseId, track_id: TrackId, file_name: &str) -> String {
  format!("audios/{release_id}/{track_id}/{file_name}")
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  #[test]
  fn test_blob_paths_follow_storage_layout() {
    let release = ReleaseId::from_uuid(Uuid::nil());
    let track = TrackId::from_uuid(Uuid::from_u128(u128::MAX));

    assert_eq!(
      cover_blob_path(release, "capa.jpg"),
      "capas/00000000-0000-0000-0000-000000000000/capa.jpg"
    );
    assert_eq!(
      audio_blob_path(release, track, "faixa 1.wav"),
      "audios/00000000-0000-0000-0000-000000000000/ffffffff-ffff-ffff-ffff-ffffffffffff/faixa 1.wav"
    );
  }

  #[test]
  fn test_fingerprint_is_sha256_hex() {
    assert_eq!(
      AudioFingerprint::of_bytes(b"abc"),
      AudioFingerprint::Sha256(
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad".to_string()
      )
    );
  }
}
