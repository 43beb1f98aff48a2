//! Borrador de entrega escrito a mano en TOML.
//!
//! ```toml
//! type = "Single"
//! title = "noite de verão"
//! main_artists = ["mc kevin"]
//! genre = "Funk"
//! release_date = "2025-07-01"
//!
//! [cover]
//! file = "capa.jpg"
//! width = 3000
//! height = 3000
//!
//! [[tracks]]
//! composers = ["ana souza"]
//! audio = "noite.wav"
//! ```
//!
//! Las rutas de archivos son relativas al propio borrador. Las dimensiones
//! de la capa son las declaradas; no se decodifica la imagen.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use blackstar_core::domain::{
  Attachment, ImageAttachment, ReleaseDraft, ReleaseType, TrackDraft,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DraftFile {
  #[serde(rename = "type")]
  release_type: String,
  title: String,
  main_artists: Vec<String>,
  #[serde(default)]
  featured_artists: Vec<String>,
  genre: Option<String>,
  sub_genre: Option<String>,
  release_date: Option<NaiveDate>,
  /// Si falta, se asume `true` cuando hay `[cover]`.
  has_cover: Option<bool>,
  cover: Option<CoverFile>,
  #[serde(default)]
  tracks: Vec<TrackFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CoverFile {
  file: PathBuf,
  width: u32,
  height: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TrackFile {
  title: String,
  artists: Vec<String>,
  composers: Vec<String>,
  has_isrc: Option<bool>,
  isrc: Option<String>,
  audio: Option<PathBuf>,
  lyrics: Option<String>,
}

async fn attachment(base: &Path, file: &Path) -> Result<Attachment> {
  let path = base.join(file);
  let bytes =
    tokio::fs::read(&path).await.with_context(|| format!("reading {}", path.display()))?;
  let name = file
    .file_name()
    .with_context(|| format!("{} has no file name", file.display()))?
    .to_string_lossy()
    .into_owned();
  Ok(Attachment::new(name, bytes))
}

/// Lee el borrador y sus archivos adjuntos.
pub async fn load_draft(path: &Path) -> Result<ReleaseDraft> {
  let content = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("reading draft {}", path.display()))?;
  let file: DraftFile =
    toml::from_str(&content).with_context(|| format!("parsing draft {}", path.display()))?;
  let base = path.parent().unwrap_or(Path::new("."));

  let mut draft = ReleaseDraft::new(file.release_type.parse::<ReleaseType>()?);
  draft.title = file.title;
  draft.main_artists = file.main_artists;
  draft.featured_artists = file.featured_artists;
  draft.genre = file.genre;
  draft.sub_genre = file.sub_genre;
  draft.release_date = file.release_date;
  draft.has_cover = file.has_cover.unwrap_or(file.cover.is_some());

  if let Some(cover) = file.cover {
    draft.cover = Some(ImageAttachment {
      file: attachment(base, &cover.file).await?,
      width: cover.width,
      height: cover.height,
    });
  }

  for track in file.tracks {
    let audio = match &track.audio {
      Some(audio) => Some(attachment(base, audio).await?),
      None => None,
    };
    draft.tracks.push(TrackDraft {
      title: track.title,
      artists: track.artists,
      composers: track.composers,
      has_isrc: track.has_isrc.unwrap_or(track.isrc.is_some()),
      isrc: track.isrc,
      audio,
      lyrics: track.lyrics,
    });
  }

  Ok(draft)
}
