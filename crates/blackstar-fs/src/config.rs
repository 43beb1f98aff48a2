use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sección `[blobs]` de blackstar.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobsConfig {
  /// Carpeta raíz de los blobs. Si falta, el binario usa `data/blobs`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub root: Option<PathBuf>,
  /// Prefijo de las URLs devueltas. Si falta, se usan URLs `file://`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub public_base_url: Option<String>,
}
