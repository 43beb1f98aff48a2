pub mod cli;
mod config;
mod draft_file;

use std::sync::Arc;

use anyhow::{Context, Result};
use blackstar_config::config_backend;
use blackstar_core::catalog;
use blackstar_core::domain::{Checklist, Release, ReleaseDocument};
use blackstar_core::services::{
  ArtistDirectory, MediaLifecycleManager, ReleaseLocks, ReviewService, SubmissionService,
};
use blackstar_fs::{BlobsConfig, LocalBlobStore};
use blackstar_storage::{SqliteReleaseRepository, StorageConfig};
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{ArtistsCommand, Cli, Command};
use crate::config::{LifecycleConfig, LoggingConfig};

type Repo = SqliteReleaseRepository;

/// Logs a stderr. El nivel sale de `[logging] level`, salvo que `RUST_LOG`
/// esté definida.
pub fn init_tracing() {
  let configured = LoggingConfig::load();
  let level = configured.as_ref().map(|c| c.level.clone()).unwrap_or_else(|_| "info".into());

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level)))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();

  if let Err(err) = configured {
    warn!(error = %err, "could not read [logging], using \"info\"");
  }
}

/// Servicios del núcleo conectados a SQLite y al disco local.
struct App {
  submissions: SubmissionService<Repo, LocalBlobStore>,
  review: ReviewService<Repo>,
  media: MediaLifecycleManager<Repo, LocalBlobStore>,
  artists: ArtistDirectory<Repo>,
}

impl App {
  fn from_config() -> Result<Self> {
    let paths = blackstar_config::paths()?;
    let storage = StorageConfig::load().context("loading [storage]")?;
    let blobs: BlobsConfig =
      config_backend()?.load_or_init_section("blobs").context("loading [blobs]")?;
    let lifecycle = LifecycleConfig::load().context("loading [lifecycle]")?;

    let repo = Arc::new(SqliteReleaseRepository::from_config(&storage)?);
    let blobs = Arc::new(LocalBlobStore::from_config(&blobs, &paths.data_dir.join("blobs")));
    let locks = Arc::new(ReleaseLocks::new());
    info!(blobs = %blobs.root().display(), "catalog opened");

    Ok(Self {
      submissions: SubmissionService::new(repo.clone(), blobs.clone()),
      review: ReviewService::new(repo.clone(), locks.clone()),
      media: MediaLifecycleManager::new(repo.clone(), blobs, locks.clone())
        .with_delete_attempts(lifecycle.delete_attempts),
      artists: ArtistDirectory::new(repo, locks),
    })
  }
}

fn summary(release: &Release) -> String {
  format!(
    "{}  {:<12} {:<9} {}  {} - {}{}",
    release.id,
    release.status.to_string(),
    release.release_type.to_string(),
    release.release_date,
    release.main_artists.join(", "),
    release.title,
    if release.purged { "  [purged]" } else { "" },
  )
}

pub async fn run(cli: Cli) -> Result<()> {
  let app = App::from_config()?;

  match cli.command {
    Command::List { active, history } => {
      let releases = app.review.list_releases().await?;
      let shown = match (active, history) {
        (true, _) => catalog::active(&releases),
        (_, true) => catalog::history(&releases),
        _ => releases.iter().collect(),
      };
      for release in shown {
        println!("{}", summary(release));
      }
    }
    Command::Show { id } => {
      let release = app.review.get_release(id).await?;
      println!("{}", serde_json::to_string_pretty(&ReleaseDocument::from(&release))?);
    }
    Command::Submit { draft } => {
      let draft = draft_file::load_draft(&draft).await?;
      let release = app.submissions.submit(draft).await?;
      println!("{}", summary(&release));
    }
    Command::Checklist(args) => {
      let checklist = Checklist::new(args.files, args.metadata, args.distributed, args.share_in);
      let status = app.review.update_checklist(args.id, checklist).await?;
      println!("{} {status}", args.id);
    }
    Command::Reject { id } => {
      app.review.reject(id).await?;
      println!("{id} rejected");
    }
    Command::Reopen { id } => {
      let status = app.review.reopen(id).await?;
      println!("{id} {status}");
    }
    Command::Notes { id, text } => app.review.set_admin_notes(id, &text).await?,
    Command::Download { id, file_type, file_name, user } => {
      app.review.register_download(id, &user, file_type.into(), &file_name, Utc::now()).await?;
    }
    Command::Purge { id } => {
      let release = app.media.purge(id).await?;
      println!("{}", summary(&release));
    }
    Command::Delete { id } => {
      app.media.delete_permanently(id).await?;
      println!("{id} deleted");
    }
    Command::Artists(ArtistsCommand::Add { name }) => {
      println!("{}", app.artists.add_artist(&name).await?);
    }
    Command::Artists(ArtistsCommand::List) => {
      for name in app.artists.list_known_artists().await? {
        println!("{name}");
      }
    }
    Command::Artists(ArtistsCommand::Normalize) => {
      let updated = app.artists.normalize_all().await?;
      println!("{updated} releases updated");
    }
    Command::Stats => {
      let releases = app.review.list_releases().await?;
      let board = catalog::dashboard(&releases, Utc::now().date_naive());
      println!("pending:               {}", board.pending);
      println!("awaiting distribution: {}", board.awaiting_distribution);
      println!("finalized this month:  {}", board.finalized_this_month);
      println!();
      for (genre, count) in catalog::genre_breakdown(&releases) {
        println!("{count:>4}  {genre}");
      }
    }
  }

  Ok(())
}
