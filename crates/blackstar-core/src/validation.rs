//! Reglas que una entrega debe cumplir antes de aceptarse.
//!
//! [`validate`] no modifica el borrador: asignar ids, estado inicial y
//! normalizar textos es trabajo de `SubmissionService`.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::domain::draft::{ReleaseDraft, TrackDraft};
use crate::domain::genre::Genre;
use crate::domain::release_type::ReleaseType;

/// Días mínimos entre la entrega y la fecha de salida.
pub const MIN_LEAD_DAYS: u64 = 10;

/// Tamaño exacto exigido a la capa, en píxeles.
pub const COVER_SIZE_PX: u32 = 3000;

/// Regla incumplida. El texto que ve el usuario es cosa de la UI; aquí solo
/// importa la condición. Los índices de pista empiezan en 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("title, main artist, genre and release date are required")]
  MissingHeaderFields,

  #[error("release date {requested} is earlier than {earliest}")]
  ReleaseDateTooSoon { requested: NaiveDate, earliest: NaiveDate },

  #[error("a custom genre must be given when genre is \"Other\"")]
  MissingSubGenre,

  #[error("cover was declared but no file was attached")]
  MissingCover,

  #[error("cover must be exactly {COVER_SIZE_PX}x{COVER_SIZE_PX}px, got {width}x{height}")]
  InvalidCoverDimensions { width: u32, height: u32 },

  #[error("a single must have exactly one track, got {found}")]
  SingleTrackCount { found: usize },

  #[error("an album/EP needs at least one track")]
  EmptyTracklist,

  #[error("track {track}: composer(s) and audio file are required")]
  SingleTrackIncomplete { track: usize },

  #[error("track {track}: title is required")]
  TrackMissingTitle { track: usize },

  #[error("track {track}: artist(s) are required")]
  TrackMissingArtist { track: usize },

  #[error("track {track}: composer(s) are required")]
  TrackMissingComposer { track: usize },

  #[error("track {track}: audio file is required")]
  TrackMissingAudio { track: usize },

  #[error("track {track}: ISRC was declared but is empty")]
  MissingIsrc { track: usize },

  #[error("artist name cannot be empty")]
  EmptyArtistName,
}

fn is_blank(s: &str) -> bool {
  s.trim().is_empty()
}

fn is_blank_opt(s: &Option<String>) -> bool {
  s.as_deref().is_none_or(is_blank)
}

/// Primera fecha de salida aceptada para una entrega hecha `today`.
pub fn earliest_release_date(today: NaiveDate) -> NaiveDate {
  today.checked_add_days(Days::new(MIN_LEAD_DAYS)).unwrap_or(NaiveDate::MAX)
}

/// Valida un borrador. Las reglas se evalúan en orden y se corta en el
/// primer fallo.
///
/// `today` es la fecha actual de quien llama; el plazo mínimo se cuenta
/// desde ahí.
pub fn validate(draft: &ReleaseDraft, today: NaiveDate) -> Result<(), ValidationError> {
  let genre = draft.genre.as_deref().filter(|g| !is_blank(g));

  let (Some(genre), Some(release_date)) = (genre, draft.release_date) else {
    return Err(ValidationError::MissingHeaderFields);
  };
  if is_blank(&draft.title) || draft.main_artists.is_empty() {
    return Err(ValidationError::MissingHeaderFields);
  }

  let earliest = earliest_release_date(today);
  if release_date < earliest {
    return Err(ValidationError::ReleaseDateTooSoon { requested: release_date, earliest });
  }

  if Genre::is_other_label(genre) && is_blank_opt(&draft.sub_genre) {
    return Err(ValidationError::MissingSubGenre);
  }

  if draft.has_cover && draft.cover.is_none() {
    return Err(ValidationError::MissingCover);
  }
  if let Some(cover) = &draft.cover {
    if cover.width != COVER_SIZE_PX || cover.height != COVER_SIZE_PX {
      return Err(ValidationError::InvalidCoverDimensions {
        width: cover.width,
        height: cover.height,
      });
    }
  }

  match draft.release_type {
    ReleaseType::Single if draft.tracks.len() != 1 => {
      return Err(ValidationError::SingleTrackCount { found: draft.tracks.len() });
    }
    ReleaseType::AlbumEp if draft.tracks.is_empty() => {
      return Err(ValidationError::EmptyTracklist);
    }
    _ => {}
  }

  for (i, track) in draft.tracks.iter().enumerate() {
    validate_track(draft.release_type, i + 1, track)?;
  }

  Ok(())
}

fn validate_track(
  release_type: ReleaseType,
  number: usize,
  track: &TrackDraft,
) -> Result<(), ValidationError> {
  match release_type {
    ReleaseType::Single => {
      if track.composers.is_empty() || track.audio.is_none() {
        return Err(ValidationError::SingleTrackIncomplete { track: number });
      }
    }
    ReleaseType::AlbumEp => {
      if is_blank(&track.title) {
        return Err(ValidationError::TrackMissingTitle { track: number });
      }
      if track.artists.is_empty() {
        return Err(ValidationError::TrackMissingArtist { track: number });
      }
      if track.composers.is_empty() {
        return Err(ValidationError::TrackMissingComposer { track: number });
      }
      if track.audio.is_none() {
        return Err(ValidationError::TrackMissingAudio { track: number });
      }
    }
  }

  if track.has_isrc && is_blank_opt(&track.isrc) {
    return Err(ValidationError::MissingIsrc { track: number });
  }

  Ok(())
}
