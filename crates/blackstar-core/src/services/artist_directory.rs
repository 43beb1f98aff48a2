use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, instrument, warn};

use crate::domain::{Release, ReleaseId, ReleasePatch, Track};
use crate::errors::CoreError;
use crate::normalize::{normalize_name, normalize_names};
use crate::ports::{RegisteredArtist, ReleaseRepository};
use crate::services::locks::ReleaseLocks;
use crate::validation::ValidationError;

/// Une los artistas registrados con los que aparecen en los lanzamientos
/// (principales y de cada pista). Ordenado y sin repetidos.
pub fn collect_known_artists(registered: &[RegisteredArtist], releases: &[Release]) -> Vec<String> {
  let observed = releases.iter().flat_map(|r| {
    r.main_artists.iter().chain(r.tracks.iter().flat_map(|t| t.artists.iter()))
  });

  registered
    .iter()
    .map(|a| &a.name)
    .chain(observed)
    .map(|name| name.trim())
    .filter(|name| !name.is_empty())
    .map(str::to_string)
    .collect::<BTreeSet<_>>()
    .into_iter()
    .collect()
}

/// Actualización que deja normalizados los artistas y compositores del
/// lanzamiento, o `None` si ya lo están.
pub fn normalization_patch(release: &Release) -> Option<ReleasePatch> {
  let main_artists = normalize_names(&release.main_artists);
  let tracks: Vec<Track> = release
    .tracks
    .iter()
    .map(|t| Track {
      artists: normalize_names(&t.artists),
      composers: normalize_names(&t.composers),
      ..t.clone()
    })
    .collect();

  if main_artists == release.main_artists && tracks == release.tracks {
    return None;
  }

  Some(ReleasePatch {
    main_artists: Some(main_artists),
    tracks: Some(tracks),
    ..ReleasePatch::default()
  })
}

/// Directorio de artistas del sello.
pub struct ArtistDirectory<R>
where
  R: ReleaseRepository,
{
  repo: Arc<R>,
  locks: Arc<ReleaseLocks>,
}

impl<R> ArtistDirectory<R>
where
  R: ReleaseRepository,
{
  pub fn new(repo: Arc<R>, locks: Arc<ReleaseLocks>) -> Self {
    Self { repo, locks }
  }

  /// Registra un artista por su nombre normalizado y lo devuelve.
  ///
  /// Registrar dos veces el mismo nombre sobrescribe el registro anterior.
  #[instrument(skip(self))]
  pub async fn add_artist(&self, name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(ValidationError::EmptyArtistName.into());
    }

    let artist = RegisteredArtist { name: normalize_name(name), created_at: Utc::now() };
    self.repo.insert_artist(&artist).await?;
    info!(artist = %artist.name, "artist registered");
    Ok(artist.name)
  }

  /// Artistas registrados más los observados en todo el catálogo.
  pub async fn list_known_artists(&self) -> Result<Vec<String>, CoreError> {
    let (registered, releases) =
      futures::try_join!(self.repo.list_artists(), self.repo.list_releases())?;
    Ok(collect_known_artists(&registered, &releases))
  }

  /// Normaliza artistas y compositores de todo el catálogo.
  ///
  /// Solo se reescriben los lanzamientos que cambian; devuelve cuántos. Las
  /// escrituras van en paralelo. Si alguna falla, el resto se completa igual
  /// y se devuelve [`CoreError::PartialNormalization`].
  #[instrument(skip(self))]
  pub async fn normalize_all(&self) -> Result<usize, CoreError> {
    let releases = self.repo.list_releases().await?;
    let total = releases.len();

    let outcomes = join_all(releases.iter().map(|r| self.normalize_one(r.id))).await;

    let mut updated = 0;
    let mut failed = 0;
    for outcome in outcomes {
      match outcome {
        Ok(true) => updated += 1,
        Ok(false) => {}
        Err(err) => {
          warn!(error = %err, "could not normalize release");
          failed += 1;
        }
      }
    }

    info!(total, updated, failed, "catalog normalization finished");
    if failed > 0 {
      return Err(CoreError::PartialNormalization { updated, failed });
    }
    Ok(updated)
  }

  /// Relee el lanzamiento bajo su cerrojo para no pisar una purga o un
  /// cambio de checklist concurrente.
  async fn normalize_one(&self, id: ReleaseId) -> Result<bool, CoreError> {
    let _guard = self.locks.acquire(id).await;
    let Some(release) = self.repo.find_release(id).await? else {
      return Ok(false);
    };
    let Some(patch) = normalization_patch(&release) else {
      return Ok(false);
    };
    self.repo.update_release(id, patch).await.map_err(|e| CoreError::from_repo(id, e))?;
    Ok(true)
  }
}
