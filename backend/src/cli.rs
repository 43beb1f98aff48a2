use std::path::PathBuf;

use blackstar_core::domain::{FileType, ReleaseId};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Recepción y revisión de lanzamientos del catálogo Blackstar.
#[derive(Parser, Debug)]
#[command(name = "blackstar")]
#[command(version)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Lista los lanzamientos, del más reciente al más antiguo.
  List {
    /// Solo los que siguen en revisión.
    #[arg(long, conflicts_with = "history")]
    active: bool,
    /// Solo los finalizados o rechazados.
    #[arg(long)]
    history: bool,
  },
  /// Muestra el documento completo de un lanzamiento.
  Show { id: ReleaseId },
  /// Valida y guarda una entrega descrita en un archivo TOML.
  Submit { draft: PathBuf },
  /// Reemplaza el checklist y recalcula el estado.
  Checklist(ChecklistArgs),
  /// Marca un lanzamiento como rechazado.
  Reject { id: ReleaseId },
  /// Devuelve un lanzamiento rechazado al flujo según su checklist.
  Reopen { id: ReleaseId },
  /// Reemplaza las notas internas.
  Notes { id: ReleaseId, text: String },
  /// Registra la descarga de un archivo por el staff.
  Download {
    id: ReleaseId,
    #[arg(long, value_enum)]
    file_type: FileKind,
    #[arg(long)]
    file_name: String,
    #[arg(long, env = "BLACKSTAR_USER", default_value = "Admin")]
    user: String,
  },
  /// Borra los archivos y conserva el registro.
  Purge { id: ReleaseId },
  /// Borra los archivos y el registro.
  Delete { id: ReleaseId },
  /// Directorio de artistas.
  #[command(subcommand)]
  Artists(ArtistsCommand),
  /// Contadores del panel y géneros más usados.
  Stats,
}

#[derive(Args, Debug)]
pub struct ChecklistArgs {
  pub id: ReleaseId,
  #[arg(long)]
  pub files: bool,
  #[arg(long)]
  pub metadata: bool,
  #[arg(long)]
  pub distributed: bool,
  #[arg(long)]
  pub share_in: bool,
}

#[derive(Subcommand, Debug)]
pub enum ArtistsCommand {
  /// Registra un artista (el nombre se normaliza).
  Add { name: String },
  /// Artistas registrados y los que aparecen en el catálogo.
  List,
  /// Normaliza artistas y compositores de todo el catálogo.
  Normalize,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FileKind {
  Audio,
  Cover,
}

impl From<FileKind> for FileType {
  fn from(kind: FileKind) -> Self {
    match kind {
      FileKind::Audio => FileType::Audio,
      FileKind::Cover => FileType::Cover,
    }
  }
}
