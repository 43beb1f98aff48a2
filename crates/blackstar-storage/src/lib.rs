pub mod config;
pub mod error;
pub mod models;
pub mod schema;

use std::path::Path;

use blackstar_core::domain::{DownloadLog, Release, ReleaseDocument, ReleaseId, ReleasePatch};
use blackstar_core::ports::{RegisteredArtist, ReleaseRepository, RepoError};
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

pub use crate::config::StorageConfig;
pub use crate::error::StorageError;
use crate::models::{ArtistRow, ReleaseRow};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Pragmas aplicados a cada conexión que entrega el pool.
#[derive(Debug, Clone)]
struct SqlitePragmas {
  journal_mode: Option<String>,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    let mut pragmas = String::from("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;");
    if let Some(mode) = &self.journal_mode {
      pragmas.push_str(&format!(" PRAGMA journal_mode = {mode};"));
    }
    conn.batch_execute(&pragmas).map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Marca de tiempo con ancho fijo: el orden de texto es el orden temporal.
fn timestamp(at: &DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn encode(release: &Release) -> Result<ReleaseRow, StorageError> {
  Ok(ReleaseRow {
    id: release.id.to_string(),
    created_at: timestamp(&release.created_at),
    document: serde_json::to_string(&ReleaseDocument::from(release))?,
  })
}

fn decode(document: &str) -> Result<Release, StorageError> {
  let doc: ReleaseDocument = serde_json::from_str(document)?;
  Ok(Release::from(doc))
}

fn row_to_artist(row: ArtistRow) -> Result<RegisteredArtist, StorageError> {
  let created_at = DateTime::parse_from_rfc3339(&row.created_at)
    .map_err(|e| StorageError::Corrupt(format!("artist {:?} created_at: {e}", row.name)))?
    .with_timezone(&Utc);
  Ok(RegisteredArtist { name: row.name, created_at })
}

/// Carga, modifica y guarda un documento dentro de una transacción.
/// `BEGIN IMMEDIATE`: el lock de escritura se toma antes del SELECT.
fn modify_release(
  conn: &mut SqliteConnection,
  release_id: &str,
  change: impl FnOnce(&mut Release),
) -> Result<(), StorageError> {
  use crate::schema::releases::dsl::*;

  conn.immediate_transaction(|conn| {
    let stored = releases
      .find(release_id)
      .select(document)
      .first::<String>(conn)
      .optional()?
      .ok_or(StorageError::NotFound)?;

    let mut release = decode(&stored)?;
    change(&mut release);
    let row = encode(&release)?;

    diesel::update(releases.find(release_id)).set(document.eq(row.document)).execute(conn)?;
    Ok(())
  })
}

/// `ReleaseRepository` sobre SQLite.
///
/// Diesel es bloqueante: cada operación toma una conexión del pool dentro
/// de `spawn_blocking`.
#[derive(Clone)]
pub struct SqliteReleaseRepository {
  pool: SqlitePool,
}

impl SqliteReleaseRepository {
  /// Abre (o crea) la base y aplica las migraciones pendientes.
  pub fn open(db_path: &Path, journal_mode: Option<String>) -> Result<Self, StorageError> {
    if let Some(parent) = db_path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    let manager = ConnectionManager::<SqliteConnection>::new(db_path.to_string_lossy());
    let pool = Pool::builder()
      .max_size(4)
      .connection_customizer(Box::new(SqlitePragmas { journal_mode }))
      .build(manager)?;

    let mut conn = pool.get()?;
    let applied =
      conn.run_pending_migrations(MIGRATIONS).map_err(|e| StorageError::Migration(e.to_string()))?;
    info!(db = %db_path.display(), migrations = applied.len(), "release store ready");

    Ok(Self { pool })
  }

  pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
    let paths = blackstar_config::paths()?;
    Self::open(&config.resolved_db_path(paths), config.journal_mode.clone())
  }

  async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, StorageError> + Send + 'static,
  {
    let pool = self.pool.clone();
    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get()?;
      f(&mut conn)
    })
    .await?
  }
}

#[async_trait::async_trait]
impl ReleaseRepository for SqliteReleaseRepository {
  async fn list_releases(&self) -> Result<Vec<Release>, RepoError> {
    use crate::schema::releases::dsl::*;

    let docs = self
      .with_conn(|conn| {
        Ok(releases.order(created_at.desc()).select(document).load::<String>(conn)?)
      })
      .await?;
    Ok(docs.iter().map(|d| decode(d)).collect::<Result<Vec<_>, _>>()?)
  }

  async fn find_release(&self, release_id: ReleaseId) -> Result<Option<Release>, RepoError> {
    use crate::schema::releases::dsl::*;

    let key = release_id.to_string();
    let doc = self
      .with_conn(move |conn| {
        Ok(releases.find(key).select(document).first::<String>(conn).optional()?)
      })
      .await?;
    Ok(doc.as_deref().map(decode).transpose()?)
  }

  async fn save_release(&self, release: &Release) -> Result<(), RepoError> {
    use crate::schema::releases::dsl::*;

    let row = encode(release)?;
    self
      .with_conn(move |conn| Ok(diesel::replace_into(releases).values(&row).execute(conn)?))
      .await?;
    debug!(release_id = %release.id, "release saved");
    Ok(())
  }

  async fn update_release(
    &self,
    release_id: ReleaseId,
    patch: ReleasePatch,
  ) -> Result<(), RepoError> {
    let key = release_id.to_string();
    self.with_conn(move |conn| modify_release(conn, &key, |r| patch.apply_to(r))).await?;
    Ok(())
  }

  async fn delete_release(&self, release_id: ReleaseId) -> Result<(), RepoError> {
    use crate::schema::releases::dsl::*;

    let key = release_id.to_string();
    let removed =
      self.with_conn(move |conn| Ok(diesel::delete(releases.find(key)).execute(conn)?)).await?;
    debug!(%release_id, removed, "release deleted");
    Ok(())
  }

  async fn append_download(
    &self,
    release_id: ReleaseId,
    entry: DownloadLog,
  ) -> Result<(), RepoError> {
    let key = release_id.to_string();
    self.with_conn(move |conn| modify_release(conn, &key, |r| r.downloads.push(entry))).await?;
    Ok(())
  }

  async fn list_artists(&self) -> Result<Vec<RegisteredArtist>, RepoError> {
    use crate::schema::artists::dsl::*;

    let rows = self
      .with_conn(|conn| Ok(artists.order(name.asc()).select(ArtistRow::as_select()).load(conn)?))
      .await?;
    Ok(rows.into_iter().map(row_to_artist).collect::<Result<Vec<_>, _>>()?)
  }

  async fn insert_artist(&self, artist: &RegisteredArtist) -> Result<(), RepoError> {
    use crate::schema::artists::dsl::*;

    let row = ArtistRow { name: artist.name.clone(), created_at: timestamp(&artist.created_at) };
    self
      .with_conn(move |conn| Ok(diesel::replace_into(artists).values(&row).execute(conn)?))
      .await?;
    Ok(())
  }
}
