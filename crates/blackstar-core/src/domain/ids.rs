use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Identificador único de un lanzamiento (`Release`).
///
/// Se asigna una sola vez al crear el lanzamiento y nunca cambia.
/// También forma parte de las rutas de los blobs (`capas/{id}/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReleaseId(Uuid);

impl ReleaseId {
  /// Crea un nuevo `ReleaseId` único.
  pub fn new() -> Self {
    ReleaseId(Uuid::new_v4())
  }

  /// Construye un `ReleaseId` desde un UUID ya existente.
  pub fn from_uuid(u: Uuid) -> Self {
    ReleaseId(u)
  }

  /// Devuelve el valor UUID interno.
  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for ReleaseId {
  fn default() -> Self {
    Self::new()
  }
}

impl FromStr for ReleaseId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(ReleaseId)
  }
}

impl From<Uuid> for ReleaseId {
  fn from(u: Uuid) -> Self {
    ReleaseId(u)
  }
}

impl From<ReleaseId> for Uuid {
  fn from(id: ReleaseId) -> Self {
    id.0
  }
}

impl fmt::Display for ReleaseId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Identificador de una pista. Único dentro de su lanzamiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(Uuid);

impl TrackId {
  pub fn new() -> Self {
    TrackId(Uuid::new_v4())
  }

  pub fn from_uuid(u: Uuid) -> Self {
    TrackId(u)
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for TrackId {
  fn default() -> Self {
    Self::new()
  }
}

impl FromStr for TrackId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(TrackId)
  }
}

impl From<Uuid> for TrackId {
  fn from(u: Uuid) -> Self {
    TrackId(u)
  }
}

impl fmt::Display for TrackId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}
