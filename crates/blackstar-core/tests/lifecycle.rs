mod common;

use blackstar_core::CoreError;
use blackstar_core::domain::media::{audio_blob_path, cover_blob_path};
use blackstar_core::domain::{
  AudioFingerprint, Checklist, MediaRef, ReleaseDocument, ReleaseStatus,
};
use blackstar_core::validation::ValidationError;
use common::{Harness, album_draft, days_from_now, now, single_draft};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_single_too_close_to_release_is_rejected_without_writes() {
  let h = Harness::new();

  let err = h.submissions.submit_at(single_draft(5), now()).await.unwrap_err();

  assert!(matches!(
    err,
    CoreError::Validation(ValidationError::ReleaseDateTooSoon { earliest, .. })
      if earliest == days_from_now(10)
  ));
  assert!(h.repo.is_empty());
  assert!(h.blobs.paths().is_empty());
}

#[tokio::test]
async fn test_single_is_accepted_under_review_with_uploaded_media() {
  let h = Harness::new();

  let release = h.submissions.submit_at(single_draft(10), now()).await.unwrap();

  assert_eq!(release.status, ReleaseStatus::UnderReview);
  assert_eq!(release.checklist, Checklist::default());
  assert_eq!(release.created_at, now());
  assert_eq!(release.title, "Noite de Verão");
  assert_eq!(release.main_artists, vec!["Mc Kevin".to_string()]);

  let track = &release.tracks[0];
  assert_eq!(track.title, "Noite de Verão");
  assert_eq!(track.artists, vec!["Mc Kevin".to_string(), "Mc Lan".to_string()]);
  assert_eq!(track.composers, vec!["João da Silva".to_string()]);
  assert_eq!(track.audio_fingerprint, Some(AudioFingerprint::of_bytes(b"RIFF-noite")));

  let cover_path = cover_blob_path(release.id, "capa.jpg");
  let audio_path = audio_blob_path(release.id, track.id, "noite.wav");
  assert_eq!(release.cover, MediaRef::present("capa.jpg", format!("memory://{cover_path}")));
  assert_eq!(track.audio, MediaRef::present("noite.wav", format!("memory://{audio_path}")));
  assert!(h.blobs.contains(&cover_path) && h.blobs.contains(&audio_path));

  assert_eq!(h.repo.get(release.id), Some(release));
}

#[tokio::test]
async fn test_album_tracks_default_to_main_artists() {
  let h = Harness::new();

  let release = h.submissions.submit_at(album_draft(3), now()).await.unwrap();

  assert_eq!(release.tracks.len(), 3);
  assert_eq!(release.tracks[0].artists, vec!["Mc Kevin".to_string()]);
  assert_eq!(release.tracks[1].artists, vec!["Mc Lan".to_string()]);
  assert_eq!(release.tracks[2].title, "Faixa 3");
  assert_eq!(h.blobs.paths().len(), 4);
}

#[tokio::test]
async fn test_finalized_release_keeps_status_after_purge() {
  let h = Harness::new();
  let release = h.submissions.submit_at(single_draft(10), now()).await.unwrap();

  let status = h.review.update_checklist(release.id, Checklist::new(true, true, true, true)).await;
  assert_eq!(status.unwrap(), ReleaseStatus::Finalized);

  let purged = h.media.purge(release.id).await.unwrap();

  assert!(purged.purged);
  assert_eq!(purged.status, ReleaseStatus::Finalized);
  assert_eq!(purged.checklist, Checklist::new(true, true, true, true));
  assert_eq!(purged.cover, MediaRef::Purged);
  assert_eq!(purged.tracks[0].audio, MediaRef::Purged);
  assert!(h.blobs.paths().is_empty());

  let doc = serde_json::to_value(ReleaseDocument::from(&purged)).unwrap();
  assert_eq!(doc["coverFileName"], "[DELETED_MEDIA]");
  assert_eq!(doc["coverUrl"], "");
  assert_eq!(doc["tracks"][0]["audioFileName"], "[DELETED_MEDIA]");
  assert_eq!(doc["tracks"][0]["audioHash"], "[PURGED]");
  assert_eq!(doc["status"], "Finalizado");
}

#[tokio::test]
async fn test_purge_is_idempotent() {
  let h = Harness::new();
  let release = h.submissions.submit_at(album_draft(2), now()).await.unwrap();

  let first = h.media.purge(release.id).await.unwrap();
  let deletes_after_first = h.blobs.delete_calls();
  let second = h.media.purge(release.id).await.unwrap();

  assert_eq!(deletes_after_first.len(), 3);
  assert_eq!(h.blobs.delete_calls(), deletes_after_first);
  assert_eq!(first, second);
  assert_eq!(h.repo.get(release.id), Some(second));
}

#[tokio::test]
async fn test_purge_survives_failing_blob_deletes() {
  let h = Harness::new();
  let release = h.submissions.submit_at(single_draft(10), now()).await.unwrap();
  h.blobs.fail_all_deletes();

  let purged = h.media.purge(release.id).await.unwrap();

  assert!(purged.purged);
  assert_eq!(h.blobs.delete_calls().len(), 2);
  assert_eq!(h.blobs.paths().len(), 2);
}

#[tokio::test]
async fn test_purge_unknown_release_is_not_found() {
  let h = Harness::new();
  let id = blackstar_core::domain::ReleaseId::new();

  assert!(matches!(h.media.purge(id).await, Err(CoreError::NotFound(missing)) if missing == id));
}

#[tokio::test]
async fn test_delete_permanently_removes_record_even_if_every_blob_delete_fails() {
  let h = Harness::new();
  let release = h.submissions.submit_at(album_draft(2), now()).await.unwrap();
  h.blobs.fail_all_deletes();

  h.media.delete_permanently(release.id).await.unwrap();

  assert_eq!(h.repo.get(release.id), None);
  assert_eq!(h.blobs.delete_calls().len(), 3);
}

#[tokio::test]
async fn test_delete_permanently_retries_record_removal() {
  let h = Harness::new();
  let release = h.submissions.submit_at(single_draft(10), now()).await.unwrap();
  h.repo.fail_next_deletes(2);

  h.media.delete_permanently(release.id).await.unwrap();

  assert_eq!(h.repo.get(release.id), None);
  assert_eq!(h.repo.delete_calls(), 3);
}

#[tokio::test]
async fn test_delete_permanently_surfaces_error_after_last_attempt() {
  let h = Harness::new();
  let release = h.submissions.submit_at(single_draft(10), now()).await.unwrap();
  h.repo.fail_next_deletes(5);

  let err = h.media.delete_permanently(release.id).await.unwrap_err();

  assert!(matches!(err, CoreError::Repository(_)));
  assert_eq!(h.repo.delete_calls(), 3);
}

#[tokio::test]
async fn test_delete_permanently_of_missing_release_is_ok() {
  let h = Harness::new();
  h.media.delete_permanently(blackstar_core::domain::ReleaseId::new()).await.unwrap();
  assert!(h.blobs.delete_calls().is_empty());
}

#[tokio::test]
async fn test_failed_audio_upload_discards_stored_files() {
  let h = Harness::new();
  h.blobs.fail_uploads_ending_with("/2.wav");

  let err = h.submissions.submit_at(album_draft(3), now()).await.unwrap_err();

  assert!(matches!(err, CoreError::Blob(_)));
  assert!(h.repo.is_empty());
  assert_eq!(h.blobs.paths(), Vec::<String>::new());
  assert_eq!(h.blobs.delete_calls().len(), 4);
}

#[tokio::test]
async fn test_failed_save_discards_uploaded_files() {
  let h = Harness::new();
  h.repo.fail_all_saves();

  let err = h.submissions.submit_at(single_draft(10), now()).await.unwrap_err();

  assert!(matches!(err, CoreError::Repository(_)));
  assert_eq!(h.blobs.paths(), Vec::<String>::new());
  assert_eq!(h.blobs.delete_calls().len(), 2);
}
