//! Fakes en memoria de los ports, para tests de este crate y de los demás
//! (feature `test_utils`).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::domain::{DownloadLog, Release, ReleaseId, ReleasePatch};
use crate::ports::{BlobError, BlobStore, RegisteredArtist, ReleaseRepository, RepoError};

/// Repositorio en memoria con inyección de fallos.
#[derive(Default)]
pub struct InMemoryReleaseRepository {
  releases: Mutex<HashMap<ReleaseId, Release>>,
  artists: Mutex<BTreeMap<String, RegisteredArtist>>,
  failing_deletes: AtomicUsize,
  fail_saves: AtomicBool,
  failing_updates: Mutex<HashSet<ReleaseId>>,
  update_calls: AtomicUsize,
  delete_calls: AtomicUsize,
}

impl InMemoryReleaseRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_releases(releases: impl IntoIterator<Item = Release>) -> Self {
    let repo = Self::new();
    repo.releases.lock().unwrap().extend(releases.into_iter().map(|r| (r.id, r)));
    repo
  }

  /// Las próximas `n` llamadas a `delete_release` fallan.
  pub fn fail_next_deletes(&self, n: usize) {
    self.failing_deletes.store(n, Ordering::SeqCst);
  }

  /// Todos los `save_release` fallan a partir de ahora.
  pub fn fail_all_saves(&self) {
    self.fail_saves.store(true, Ordering::SeqCst);
  }

  /// Toda actualización de `id` falla hasta nuevo aviso.
  pub fn fail_updates_for(&self, id: ReleaseId) {
    self.failing_updates.lock().unwrap().insert(id);
  }

  pub fn get(&self, id: ReleaseId) -> Option<Release> {
    self.releases.lock().unwrap().get(&id).cloned()
  }

  pub fn len(&self) -> usize {
    self.releases.lock().unwrap().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn update_calls(&self) -> usize {
    self.update_calls.load(Ordering::SeqCst)
  }

  pub fn delete_calls(&self) -> usize {
    self.delete_calls.load(Ordering::SeqCst)
  }
}

#[async_trait::async_trait]
impl ReleaseRepository for InMemoryReleaseRepository {
  async fn list_releases(&self) -> Result<Vec<Release>, RepoError> {
    let mut all: Vec<Release> = self.releases.lock().unwrap().values().cloned().collect();
    all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(all)
  }

  async fn find_release(&self, id: ReleaseId) -> Result<Option<Release>, RepoError> {
    Ok(self.get(id))
  }

  async fn save_release(&self, release: &Release) -> Result<(), RepoError> {
    if self.fail_saves.load(Ordering::SeqCst) {
      return Err(RepoError::Storage(format!("injected save failure for {}", release.id)));
    }
    self.releases.lock().unwrap().insert(release.id, release.clone());
    Ok(())
  }

  async fn update_release(&self, id: ReleaseId, patch: ReleasePatch) -> Result<(), RepoError> {
    self.update_calls.fetch_add(1, Ordering::SeqCst);
    if self.failing_updates.lock().unwrap().contains(&id) {
      return Err(RepoError::Storage(format!("injected update failure for {id}")));
    }
    let mut releases = self.releases.lock().unwrap();
    let release = releases.get_mut(&id).ok_or(RepoError::NotFound)?;
    patch.apply_to(release);
    Ok(())
  }

  async fn delete_release(&self, id: ReleaseId) -> Result<(), RepoError> {
    self.delete_calls.fetch_add(1, Ordering::SeqCst);
    let injected =
      self.failing_deletes.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    if injected.is_ok() {
      return Err(RepoError::Storage(format!("injected delete failure for {id}")));
    }
    self.releases.lock().unwrap().remove(&id);
    Ok(())
  }

  async fn append_download(&self, id: ReleaseId, entry: DownloadLog) -> Result<(), RepoError> {
    let mut releases = self.releases.lock().unwrap();
    let release = releases.get_mut(&id).ok_or(RepoError::NotFound)?;
    release.downloads.push(entry);
    Ok(())
  }

  async fn list_artists(&self) -> Result<Vec<RegisteredArtist>, RepoError> {
    Ok(self.artists.lock().unwrap().values().cloned().collect())
  }

  async fn insert_artist(&self, artist: &RegisteredArtist) -> Result<(), RepoError> {
    self.artists.lock().unwrap().insert(artist.name.clone(), artist.clone());
    Ok(())
  }
}

/// Blob store en memoria que registra cada borrado pedido.
#[derive(Default)]
pub struct InMemoryBlobStore {
  blobs: Mutex<HashMap<String, Vec<u8>>>,
  deletes: Mutex<Vec<String>>,
  fail_deletes: AtomicBool,
  failing_uploads: Mutex<Vec<String>>,
}

impl InMemoryBlobStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Todos los borrados fallan a partir de ahora.
  pub fn fail_all_deletes(&self) {
    self.fail_deletes.store(true, Ordering::SeqCst);
  }

  /// Las subidas cuya ruta termina en `suffix` fallan.
  pub fn fail_uploads_ending_with(&self, suffix: &str) {
    self.failing_uploads.lock().unwrap().push(suffix.to_string());
  }

  pub fn contains(&self, path: &str) -> bool {
    self.blobs.lock().unwrap().contains_key(path)
  }

  pub fn paths(&self) -> Vec<String> {
    let mut paths: Vec<String> = self.blobs.lock().unwrap().keys().cloned().collect();
    paths.sort();
    paths
  }

  /// Rutas cuyo borrado se pidió, incluidas las que fallaron.
  pub fn delete_calls(&self) -> Vec<String> {
    self.deletes.lock().unwrap().clone()
  }
}

#[async_trait::async_trait]
impl BlobStore for InMemoryBlobStore {
  async fn upload(&self, path: &str, bytes: &[u8]) -> Result<String, BlobError> {
    if self.failing_uploads.lock().unwrap().iter().any(|suffix| path.ends_with(suffix.as_str())) {
      return Err(BlobError::Backend(format!("injected upload failure for {path}")));
    }
    self.blobs.lock().unwrap().insert(path.to_string(), bytes.to_vec());
    Ok(format!("memory://{path}"))
  }

  async fn delete(&self, path: &str) -> Result<(), BlobError> {
    self.deletes.lock().unwrap().push(path.to_string());
    if self.fail_deletes.load(Ordering::SeqCst) {
      return Err(BlobError::Backend(format!("injected delete failure for {path}")));
    }
    self.blobs.lock().unwrap().remove(path);
    Ok(())
  }
}
