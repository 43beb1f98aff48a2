use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::genre::Genre;
use crate::domain::ids::{ReleaseId, TrackId};
use crate::domain::media::{AudioFingerprint, MediaRef};
use crate::domain::release_type::ReleaseType;
use crate::domain::status::{Checklist, ReleaseStatus};

/// Un lanzamiento enviado por un artista del sello.
///
/// Es la entidad central del catálogo:
/// - metadatos editoriales (título, artistas, género, fecha),
/// - archivos asociados (capa y audios),
/// - estado de revisión derivado del checklist,
/// - historial de descargas hechas por el staff.
///
/// `id` y `created_at` no cambian nunca después de la creación.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
  pub id: ReleaseId,
  pub release_type: ReleaseType,
  pub title: String,

  /// Artistas principales, en orden. Al menos uno.
  pub main_artists: Vec<String>,

  pub genre: Genre,

  /// Fecha de salida prevista.
  pub release_date: NaiveDate,

  /// Momento de la entrega.
  pub created_at: DateTime<Utc>,

  /// El artista declaró que el lanzamiento tiene capa propia.
  pub has_cover: bool,
  pub cover: MediaRef,

  pub status: ReleaseStatus,
  pub checklist: Checklist,

  /// Exactamente una pista para `Single`, una o más para `AlbumEp`.
  pub tracks: Vec<Track>,

  /// `true` cuando los archivos se borraron pero el registro se conserva.
  pub purged: bool,

  pub admin_notes: Option<String>,

  /// Registro de descargas, solo se agregan entradas.
  pub downloads: Vec<DownloadLog>,
}

/// Una pista dentro de un lanzamiento.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
  pub id: TrackId,
  pub title: String,

  /// Intérpretes. En un álbum toma los artistas principales si se deja vacío.
  pub artists: Vec<String>,

  /// Compositores; nunca vacío en una entrega aceptada.
  pub composers: Vec<String>,

  pub has_isrc: bool,
  pub isrc: Option<String>,

  pub audio: MediaRef,
  pub audio_fingerprint: Option<AudioFingerprint>,

  pub lyrics: Option<String>,
}

/// Tipo de archivo descargado por el staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
  Audio,
  Cover,
}

impl fmt::Display for FileType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FileType::Audio => write!(f, "audio"),
      FileType::Cover => write!(f, "cover"),
    }
  }
}

/// Entrada inmutable del historial de descargas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLog {
  pub date: DateTime<Utc>,
  pub user: String,
  pub file_type: FileType,
  pub file_name: String,
}

/// Actualización parcial de un lanzamiento.
///
/// Equivale a un `update` por campos sobre el documento: solo se tocan los
/// campos presentes. Los adapters cargan el documento, aplican el patch y lo
/// vuelven a guardar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReleasePatch {
  pub status: Option<ReleaseStatus>,
  pub checklist: Option<Checklist>,
  pub admin_notes: Option<String>,
  pub main_artists: Option<Vec<String>>,
  pub tracks: Option<Vec<Track>>,
  pub cover: Option<MediaRef>,
  pub purged: Option<bool>,
}

impl ReleasePatch {
  pub fn apply_to(self, release: &mut Release) {
    if let Some(status) = self.status {
      release.status = status;
    }
    if let Some(checklist) = self.checklist {
      release.checklist = checklist;
    }
    if let Some(notes) = self.admin_notes {
      release.admin_notes = Some(notes);
    }
    if let Some(main_artists) = self.main_artists {
      release.main_artists = main_artists;
    }
    if let Some(tracks) = self.tracks {
      release.tracks = tracks;
    }
    if let Some(cover) = self.cover {
      release.cover = cover;
    }
    if let Some(purged) = self.purged {
      release.purged = purged;
    }
  }
}
