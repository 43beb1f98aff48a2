use chrono::NaiveDate;

use crate::domain::release_type::ReleaseType;

/// Archivo adjuntado por quien llama (formulario, CLI...).
///
/// El núcleo solo necesita el nombre original y los bytes; no conoce el
/// selector de archivos ni el tipo de archivo del runtime que lo produjo.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
  pub name: String,
  pub bytes: Vec<u8>,
}

impl Attachment {
  pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
    Self { name: name.into(), bytes: bytes.into() }
  }
}

impl std::fmt::Debug for Attachment {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Attachment")
      .field("name", &self.name)
      .field("bytes", &format_args!("{} bytes", self.bytes.len()))
      .finish()
  }
}

/// Imagen adjunta con sus dimensiones declaradas en píxeles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
  pub file: Attachment,
  pub width: u32,
  pub height: u32,
}

/// Datos de una entrega tal como llegan del formulario, antes de validar.
///
/// Los campos de texto llegan sin normalizar; `SubmissionService` los
/// normaliza al construir el [`Release`](crate::domain::release::Release).
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseDraft {
  pub release_type: ReleaseType,
  pub title: String,
  pub main_artists: Vec<String>,
  /// Artistas invitados. Solo se usan en singles.
  pub featured_artists: Vec<String>,
  /// Opción elegida en el selector de género.
  pub genre: Option<String>,
  /// Género libre cuando la opción es "Outros".
  pub sub_genre: Option<String>,
  pub release_date: Option<NaiveDate>,
  pub has_cover: bool,
  pub cover: Option<ImageAttachment>,
  pub tracks: Vec<TrackDraft>,
}

impl ReleaseDraft {
  /// Borrador vacío del tipo indicado.
  pub fn new(release_type: ReleaseType) -> Self {
    Self {
      release_type,
      title: String::new(),
      main_artists: Vec::new(),
      featured_artists: Vec::new(),
      genre: None,
      sub_genre: None,
      release_date: None,
      has_cover: false,
      cover: None,
      tracks: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackDraft {
  pub title: String,
  pub artists: Vec<String>,
  pub composers: Vec<String>,
  pub has_isrc: bool,
  pub isrc: Option<String>,
  pub audio: Option<Attachment>,
  pub lyrics: Option<String>,
}
