use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Formato del lanzamiento. Inmutable tras la creación.
///
/// - `Single`: exactamente una pista; el título de la pista es el del release.
/// - `AlbumEp`: una o más pistas, cada una con título y artistas propios.
///
/// En el documento persistido se guardan las etiquetas históricas
/// `"Single"` y `"Álbum/EP"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReleaseType {
  #[serde(rename = "Single")]
  Single,
  #[serde(rename = "Álbum/EP")]
  AlbumEp,
}

impl ReleaseType {
  pub fn is_single(self) -> bool {
    matches!(self, ReleaseType::Single)
  }
}

/// Error producido cuando una cadena no describe un [`ReleaseType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid release type: {input}")]
pub struct ReleaseTypeParseError {
  pub input: String,
}

impl FromStr for ReleaseType {
  type Err = ReleaseTypeParseError;

  /// Acepta las etiquetas persistidas y variantes habituales
  /// (`single`, `album`, `ep`, `album/ep`), sin distinguir mayúsculas.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let normalized = s.trim().to_lowercase().replace('á', "a");

    match normalized.as_str() {
      "single" => Ok(ReleaseType::Single),
      "album" | "ep" | "album/ep" | "albumep" | "album-ep" => Ok(ReleaseType::AlbumEp),
      _ => Err(ReleaseTypeParseError { input: s.to_string() }),
    }
  }
}

impl fmt::Display for ReleaseType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseType::Single => write!(f, "Single"),
      ReleaseType::AlbumEp => write!(f, "Álbum/EP"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_accepts_persisted_labels() {
    assert_eq!("Single".parse::<ReleaseType>(), Ok(ReleaseType::Single));
    assert_eq!("Álbum/EP".parse::<ReleaseType>(), Ok(ReleaseType::AlbumEp));
    assert_eq!(" ep ".parse::<ReleaseType>(), Ok(ReleaseType::AlbumEp));
    assert!("mixtape".parse::<ReleaseType>().is_err());
  }
}
