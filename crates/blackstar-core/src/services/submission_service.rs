use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::{OptionFuture, join_all, try_join_all};
use tracing::{info, instrument, warn};

use crate::domain::media::{audio_blob_path, cover_blob_path};
use crate::domain::{
  AudioFingerprint, Checklist, Genre, MediaRef, Release, ReleaseDraft, ReleaseId, ReleaseStatus,
  ReleaseType, Track, TrackDraft, TrackId,
};
use crate::errors::CoreError;
use crate::normalize::{normalize_name, normalize_names};
use crate::ports::{BlobStore, ReleaseRepository};
use crate::validation::{ValidationError, validate};

fn non_blank(value: &Option<String>) -> Option<String> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Género a guardar: la opción elegida, o el sub-género normalizado si la
/// opción es "Outros".
fn resolve_genre(label: &str, sub_genre: &Option<String>) -> Genre {
  if Genre::is_other_label(label) {
    return Genre::Custom(normalize_name(sub_genre.as_deref().unwrap_or_default().trim()));
  }
  match label.parse::<Genre>() {
    Ok(Genre::Custom(custom)) => Genre::Custom(normalize_name(&custom)),
    Ok(genre) => genre,
    Err(never) => match never {},
  }
}

/// En un álbum, las pistas sin artistas heredan los artistas principales
/// antes de validar.
fn fill_default_track_artists(draft: &mut ReleaseDraft) {
  if draft.release_type != ReleaseType::AlbumEp {
    return;
  }
  for track in draft.tracks.iter_mut().filter(|t| t.artists.is_empty()) {
    track.artists = draft.main_artists.clone();
  }
}

/// Pista tal como se guarda, todavía sin archivo subido.
fn build_track(
  draft: &ReleaseDraft,
  release_title: &str,
  main_artists: &[String],
  track: &TrackDraft,
) -> Track {
  let (title, artists) = match draft.release_type {
    ReleaseType::Single => {
      let title = match track.title.trim() {
        "" => release_title.to_string(),
        own => normalize_name(own),
      };
      let mut artists = main_artists.to_vec();
      artists.extend(normalize_names(&draft.featured_artists));
      (title, artists)
    }
    ReleaseType::AlbumEp => (normalize_name(track.title.trim()), normalize_names(&track.artists)),
  };

  Track {
    id: TrackId::new(),
    title,
    artists,
    composers: normalize_names(&track.composers),
    has_isrc: track.has_isrc,
    isrc: if track.has_isrc { non_blank(&track.isrc) } else { None },
    audio: MediaRef::Absent,
    audio_fingerprint: None,
    lyrics: non_blank(&track.lyrics),
  }
}

/// Recepción de nuevas entregas.
pub struct SubmissionService<R, B>
where
  R: ReleaseRepository,
  B: BlobStore,
{
  repo: Arc<R>,
  blobs: Arc<B>,
}

impl<R, B> SubmissionService<R, B>
where
  R: ReleaseRepository,
  B: BlobStore,
{
  pub fn new(repo: Arc<R>, blobs: Arc<B>) -> Self {
    Self { repo, blobs }
  }

  pub async fn submit(&self, draft: ReleaseDraft) -> Result<Release, CoreError> {
    self.submit_at(draft, Utc::now()).await
  }

  /// Valida el borrador, sube sus archivos y guarda el lanzamiento.
  ///
  /// `now` fija tanto la fecha de referencia de la validación como
  /// `created_at`. Si la validación falla no se escribe nada. La capa solo
  /// se sube si el artista declaró tenerla.
  #[instrument(skip_all, fields(title = %draft.title, release_type = %draft.release_type))]
  pub async fn submit_at(
    &self,
    mut draft: ReleaseDraft,
    now: DateTime<Utc>,
  ) -> Result<Release, CoreError> {
    fill_default_track_artists(&mut draft);
    validate(&draft, now.date_naive())?;

    // `validate` ya garantizó género y fecha.
    let genre_label = draft.genre.as_deref().unwrap_or_default();
    let Some(release_date) = draft.release_date else {
      return Err(ValidationError::MissingHeaderFields.into());
    };

    let id = ReleaseId::new();
    let title = normalize_name(draft.title.trim());
    let main_artists = normalize_names(&draft.main_artists);
    let mut tracks: Vec<Track> =
      draft.tracks.iter().map(|t| build_track(&draft, &title, &main_artists, t)).collect();

    let cover_path =
      draft.cover.as_ref().filter(|_| draft.has_cover).map(|c| cover_blob_path(id, &c.file.name));
    let mut blob_paths: Vec<String> = cover_path.iter().cloned().collect();

    let cover_upload: OptionFuture<_> = draft
      .cover
      .as_ref()
      .zip(cover_path)
      .map(|(cover, path)| async move {
        let url = self.blobs.upload(&path, &cover.file.bytes).await?;
        Ok::<_, CoreError>(MediaRef::present(cover.file.name.clone(), url))
      })
      .into();

    let audio_jobs: Vec<_> = draft
      .tracks
      .iter()
      .zip(&tracks)
      .filter_map(|(src, track)| {
        let audio = src.audio.as_ref()?;
        Some((track.id, audio, audio_blob_path(id, track.id, &audio.name)))
      })
      .collect();
    blob_paths.extend(audio_jobs.iter().map(|(_, _, path)| path.clone()));

    let audio_uploads = audio_jobs.iter().map(|(track_id, audio, path)| async move {
      let url = self.blobs.upload(path, &audio.bytes).await?;
      Ok::<_, CoreError>((
        *track_id,
        MediaRef::present(audio.name.clone(), url),
        AudioFingerprint::of_bytes(&audio.bytes),
      ))
    });

    let (cover, audios) = futures::join!(cover_upload, try_join_all(audio_uploads));

    let stored = match (cover.transpose(), audios) {
      (Ok(cover), Ok(audios)) => {
        for (track_id, audio, fingerprint) in audios {
          if let Some(track) = tracks.iter_mut().find(|t| t.id == track_id) {
            track.audio = audio;
            track.audio_fingerprint = Some(fingerprint);
          }
        }

        let release = Release {
          id,
          release_type: draft.release_type,
          title,
          main_artists,
          genre: resolve_genre(genre_label, &draft.sub_genre),
          release_date,
          created_at: now,
          has_cover: draft.has_cover,
          cover: cover.unwrap_or_default(),
          status: ReleaseStatus::INITIAL,
          checklist: Checklist::default(),
          tracks,
          purged: false,
          admin_notes: None,
          downloads: Vec::new(),
        };
        self.repo.save_release(&release).await.map(|()| release).map_err(CoreError::from)
      }
      (Err(err), _) | (_, Err(err)) => Err(err),
    };

    match stored {
      Ok(release) => {
        info!(release_id = %release.id, tracks = release.tracks.len(), "release submitted");
        Ok(release)
      }
      Err(err) => {
        self.discard_uploads(&blob_paths).await;
        Err(err)
      }
    }
  }

  /// Borra lo que se haya subido de una entrega que no llegó a guardarse.
  async fn discard_uploads(&self, paths: &[String]) {
    let results = join_all(paths.iter().map(|path| self.blobs.delete(path))).await;
    for (path, result) in paths.iter().zip(results) {
      if let Err(err) = result {
        warn!(%path, error = %err, "could not discard upload of failed submission");
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_resolve_genre() {
    assert_eq!(resolve_genre("Funk", &None), Genre::Funk);
    assert_eq!(
      resolve_genre("Outros", &Some("  piseiro  ".into())),
      Genre::Custom("Piseiro".into())
    );
    assert_eq!(resolve_genre("brega funk", &None), Genre::Custom("Brega Funk".into()));
  }

  #[test]
  fn test_single_track_takes_release_title_and_featured_artists() {
    let mut draft = ReleaseDraft::new(ReleaseType::Single);
    draft.featured_artists = vec!["mc lan".into()];
    let track = TrackDraft { composers: vec!["ana  souza".into()], ..TrackDraft::default() };

    let built = build_track(&draft, "Noite de Verão", &["Mc Kevin".to_string()], &track);

    assert_eq!(built.title, "Noite de Verão");
    assert_eq!(built.artists, vec!["Mc Kevin".to_string(), "Mc Lan".to_string()]);
    assert_eq!(built.composers, vec!["Ana  Souza".to_string()]);
  }

  #[test]
  fn test_album_track_defaults_to_main_artists() {
    let mut draft = ReleaseDraft::new(ReleaseType::AlbumEp);
    draft.main_artists = vec!["mc kevin".into()];
    draft.tracks = vec![
      TrackDraft {
        title: "faixa um".into(),
        has_isrc: false,
        isrc: Some("ignored".into()),
        ..TrackDraft::default()
      },
      TrackDraft { artists: vec!["mc lan".into()], ..TrackDraft::default() },
    ];

    fill_default_track_artists(&mut draft);
    let built = build_track(&draft, "Disco", &["Mc Kevin".to_string()], &draft.tracks[0]);

    assert_eq!(draft.tracks[1].artists, vec!["mc lan".to_string()]);
    assert_eq!(built.title, "Faixa Um");
    assert_eq!(built.artists, vec!["Mc Kevin".to_string()]);
    assert_eq!(built.isrc, None);
  }

  #[test]
  fn test_singles_keep_empty_track_artists() {
    let mut draft = ReleaseDraft::new(ReleaseType::Single);
    draft.main_artists = vec!["mc kevin".into()];
    draft.tracks = vec![TrackDraft::default()];

    fill_default_track_artists(&mut draft);

    assert!(draft.tracks[0].artists.is_empty());
  }
}
