#![allow(dead_code)]

use std::sync::Arc;

use blackstar_core::domain::{
  Attachment, ImageAttachment, ReleaseDraft, ReleaseType, TrackDraft,
};
use blackstar_core::services::{
  ArtistDirectory, MediaLifecycleManager, ReleaseLocks, ReviewService, SubmissionService,
};
use blackstar_core::test_utils::{InMemoryBlobStore, InMemoryReleaseRepository};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

pub type Repo = InMemoryReleaseRepository;
pub type Blobs = InMemoryBlobStore;

/// Servicios cableados sobre los mismos fakes, como en el binario.
pub struct Harness {
  pub repo: Arc<Repo>,
  pub blobs: Arc<Blobs>,
  pub submissions: SubmissionService<Repo, Blobs>,
  pub review: ReviewService<Repo>,
  pub media: MediaLifecycleManager<Repo, Blobs>,
  pub artists: ArtistDirectory<Repo>,
  pub locks: Arc<ReleaseLocks>,
}

impl Harness {
  pub fn new() -> Self {
    Self::with_repo(Repo::new())
  }

  pub fn with_repo(repo: Repo) -> Self {
    let repo = Arc::new(repo);
    let blobs = Arc::new(Blobs::new());
    let locks = Arc::new(ReleaseLocks::new());
    Self {
      submissions: SubmissionService::new(repo.clone(), blobs.clone()),
      review: ReviewService::new(repo.clone(), locks.clone()),
      media: MediaLifecycleManager::new(repo.clone(), blobs.clone(), locks.clone()),
      artists: ArtistDirectory::new(repo.clone(), locks.clone()),
      locks,
      repo,
      blobs,
    }
  }
}

pub fn now() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap()
}

pub fn days_from_now(days: u64) -> NaiveDate {
  now().date_naive().checked_add_days(Days::new(days)).unwrap()
}

pub fn single_draft(release_in_days: u64) -> ReleaseDraft {
  let mut draft = ReleaseDraft::new(ReleaseType::Single);
  draft.title = "noite de verão".into();
  draft.main_artists = vec!["MC KEVIN".into()];
  draft.featured_artists = vec!["mc lan".into()];
  draft.genre = Some("Funk".into());
  draft.release_date = Some(days_from_now(release_in_days));
  draft.has_cover = true;
  draft.cover = Some(ImageAttachment {
    file: Attachment::new("capa.jpg", vec![0xFF, 0xD8, 0xFF]),
    width: 3000,
    height: 3000,
  });
  draft.tracks = vec![TrackDraft {
    composers: vec!["joão da silva".into()],
    audio: Some(Attachment::new("noite.wav", b"RIFF-noite".to_vec())),
    ..TrackDraft::default()
  }];
  draft
}

pub fn album_draft(tracks: usize) -> ReleaseDraft {
  let mut draft = single_draft(30);
  draft.release_type = ReleaseType::AlbumEp;
  draft.featured_artists.clear();
  draft.tracks = (1..=tracks)
    .map(|n| TrackDraft {
      title: format!("faixa {n}"),
      artists: if n == 1 { Vec::new() } else { vec!["mc lan".into()] },
      composers: vec!["ana souza".into()],
      audio: Some(Attachment::new(format!("{n}.wav"), format!("audio-{n}").into_bytes())),
      ..TrackDraft::default()
    })
    .collect();
  draft
}
