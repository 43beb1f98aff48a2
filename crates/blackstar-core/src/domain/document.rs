//! Forma persistida de un lanzamiento.
//!
//! Un documento por lanzamiento, con claves camelCase. Aquí viven los
//! centinelas de texto (`[DELETED_MEDIA]`, `[PURGED]`) que los registros ya
//! almacenados usan para marcar archivos borrados; fuera de este módulo se
//! trabaja con [`MediaRef`] y [`AudioFingerprint`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::genre::Genre;
use crate::domain::ids::{ReleaseId, TrackId};
use crate::domain::media::{
  AudioFingerprint, DELETED_MEDIA_SENTINEL, DELETED_PREFIX, MediaRef, PURGED_HASH_SENTINEL,
  StoredMedia,
};
use crate::domain::release::{DownloadLog, Release, Track};
use crate::domain::release_type::ReleaseType;
use crate::domain::status::{Checklist, ReleaseStatus};

const SHA256_PREFIX: &str = "sha256-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDocument {
  pub id: ReleaseId,
  #[serde(rename = "type")]
  pub release_type: ReleaseType,
  pub title: String,
  pub main_artist: Vec<String>,
  pub genre: Genre,
  #[serde(default)]
  pub has_cover: bool,
  #[serde(default)]
  pub cover_file_name: Option<String>,
  #[serde(default)]
  pub cover_url: Option<String>,
  pub release_date: NaiveDate,
  pub status: ReleaseStatus,
  #[serde(default)]
  pub checklist: Checklist,
  pub created_at: DateTime<Utc>,
  pub tracks: Vec<TrackDocument>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub admin_notes: Option<String>,
  #[serde(default)]
  pub purged: bool,
  #[serde(default)]
  pub downloads: Vec<DownloadLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDocument {
  pub id: TrackId,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub artist: Vec<String>,
  #[serde(default)]
  pub composer: Vec<String>,
  #[serde(default)]
  pub has_isrc: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub isrc: Option<String>,
  #[serde(default)]
  pub audio_file_name: Option<String>,
  #[serde(default)]
  pub audio_url: Option<String>,
  #[serde(default)]
  pub audio_hash: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lyrics: Option<String>,
}

fn media_to_fields(media: &MediaRef) -> (Option<String>, Option<String>) {
  match media {
    MediaRef::Absent => (None, None),
    MediaRef::Present(m) => (Some(m.file_name.clone()), Some(m.url.clone())),
    MediaRef::Purged => (Some(DELETED_MEDIA_SENTINEL.to_string()), Some(String::new())),
  }
}

fn media_from_fields(file_name: Option<String>, url: Option<String>) -> MediaRef {
  match file_name {
    Some(name) if name.starts_with(DELETED_PREFIX) => MediaRef::Purged,
    Some(name) if !name.is_empty() => {
      MediaRef::Present(StoredMedia { file_name: name, url: url.unwrap_or_default() })
    }
    _ => MediaRef::Absent,
  }
}

fn fingerprint_to_field(fingerprint: &Option<AudioFingerprint>) -> Option<String> {
  fingerprint.as_ref().map(|fp| match fp {
    AudioFingerprint::Sha256(hex) => format!("{SHA256_PREFIX}{hex}"),
    AudioFingerprint::Purged => PURGED_HASH_SENTINEL.to_string(),
  })
}

fn fingerprint_from_field(field: Option<String>) -> Option<AudioFingerprint> {
  let field = field.filter(|f| !f.is_empty())?;
  if field == PURGED_HASH_SENTINEL {
    return Some(AudioFingerprint::Purged);
  }
  let hex = field.strip_prefix(SHA256_PREFIX).unwrap_or(&field);
  Some(AudioFingerprint::Sha256(hex.to_string()))
}

impl From<&Track> for TrackDocument {
  fn from(track: &Track) -> Self {
    let (audio_file_name, audio_url) = media_to_fields(&track.audio);
    TrackDocument {
      id: track.id,
      title: track.title.clone(),
      artist: track.artists.clone(),
      composer: track.composers.clone(),
      has_isrc: track.has_isrc,
      isrc: track.isrc.clone(),
      audio_file_name,
      audio_url,
      audio_hash: fingerprint_to_field(&track.audio_fingerprint),
      lyrics: track.lyrics.clone(),
    }
  }
}

impl From<TrackDocument> for Track {
  fn from(doc: TrackDocument) -> Self {
    Track {
      id: doc.id,
      title: doc.title,
      artists: doc.artist,
      composers: doc.composer,
      has_isrc: doc.has_isrc,
      isrc: doc.isrc,
      audio: media_from_fields(doc.audio_file_name, doc.audio_url),
      audio_fingerprint: fingerprint_from_field(doc.audio_hash),
      lyrics: doc.lyrics,
    }
  }
}

impl From<&Release> for ReleaseDocument {
  fn from(release: &Release) -> Self {
    let (cover_file_name, cover_url) = media_to_fields(&release.cover);
    ReleaseDocument {
      id: release.id,
      release_type: release.release_type,
      title: release.title.clone(),
      main_artist: release.main_artists.clone(),
      genre: release.genre.clone(),
      has_cover: release.has_cover,
      cover_file_name,
      cover_url,
      release_date: release.release_date,
      status: release.status,
      checklist: release.checklist,
      created_at: release.created_at,
      tracks: release.tracks.iter().map(TrackDocument::from).collect(),
      admin_notes: release.admin_notes.clone(),
      purged: release.purged,
      downloads: release.downloads.clone(),
    }
  }
}

impl From<ReleaseDocument> for Release {
  fn from(doc: ReleaseDocument) -> Self {
    Release {
      id: doc.id,
      release_type: doc.release_type,
      title: doc.title,
      main_artists: doc.main_artist,
      genre: doc.genre,
      release_date: doc.release_date,
      created_at: doc.created_at,
      has_cover: doc.has_cover,
      cover: media_from_fields(doc.cover_file_name, doc.cover_url),
      status: doc.status,
      checklist: doc.checklist,
      tracks: doc.tracks.into_iter().map(Track::from).collect(),
      purged: doc.purged,
      admin_notes: doc.admin_notes,
      downloads: doc.downloads,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  fn stored_single() -> serde_json::Value {
    json!({
      "id": "6a1f0c52-4a0e-4a8f-9a51-3f1bd1a1e001",
      "type": "Single",
      "title": "Noite de Verão",
      "mainArtist": ["Mc Kevin"],
      "genre": "Funk",
      "hasCover": true,
      "coverFileName": "[DELETED_MEDIA]",
      "coverUrl": "",
      "releaseDate": "2025-03-01",
      "status": "Finalizado",
      "checklist": {
        "arquivosConferidos": true,
        "metadadosVerificados": true,
        "enviadoDistribuidora": true,
        "shareInEnviado": true
      },
      "createdAt": "2025-02-10T12:00:00.000Z",
      "tracks": [{
        "id": "6a1f0c52-4a0e-4a8f-9a51-3f1bd1a1e002",
        "title": "",
        "artist": ["Mc Kevin"],
        "composer": ["João da Silva"],
        "hasIsrc": false,
        "audioFileName": "[DELETED]",
        "audioUrl": "",
        "audioHash": "[PURGED]"
      }],
      "purged": true,
      "downloads": [{
        "date": "2025-02-11T09:30:00Z",
        "user": "Admin",
        "fileType": "audio",
        "fileName": "noite.wav"
      }]
    })
  }

  #[test]
  fn test_stored_sentinels_decode_as_purged_state() {
    let doc: ReleaseDocument = serde_json::from_value(stored_single()).unwrap();
    let release = Release::from(doc);

    assert_eq!(release.status, ReleaseStatus::Finalized);
    assert_eq!(release.cover, MediaRef::Purged);
    assert_eq!(release.tracks[0].audio, MediaRef::Purged);
    assert_eq!(release.tracks[0].audio_fingerprint, Some(AudioFingerprint::Purged));
    assert_eq!(release.downloads.len(), 1);
    assert!(release.purged);
  }

  #[test]
  fn test_purged_media_encodes_with_sentinels() {
    let doc: ReleaseDocument = serde_json::from_value(stored_single()).unwrap();
    let encoded = serde_json::to_value(ReleaseDocument::from(&Release::from(doc))).unwrap();

    assert_eq!(encoded["coverFileName"], json!("[DELETED_MEDIA]"));
    assert_eq!(encoded["coverUrl"], json!(""));
    assert_eq!(encoded["tracks"][0]["audioFileName"], json!("[DELETED_MEDIA]"));
    assert_eq!(encoded["tracks"][0]["audioUrl"], json!(""));
    assert_eq!(encoded["tracks"][0]["audioHash"], json!("[PURGED]"));
  }

  #[test]
  fn test_present_media_and_fingerprint() {
    assert_eq!(
      media_from_fields(Some("capa.jpg".into()), Some("https://cdn/capa.jpg".into())),
      MediaRef::present("capa.jpg", "https://cdn/capa.jpg")
    );
    assert_eq!(media_from_fields(None, Some(String::new())), MediaRef::Absent);
    assert_eq!(
      fingerprint_from_field(Some("sha256-abcd".into())),
      Some(AudioFingerprint::Sha256("abcd".into()))
    );
    assert_eq!(
      fingerprint_to_field(&Some(AudioFingerprint::Sha256("abcd".into()))),
      Some("sha256-abcd".to_string())
    );
  }
}
