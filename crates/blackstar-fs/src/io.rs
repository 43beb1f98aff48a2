use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// Ruta temporal junto al destino: `nombre.ext.tmp`.
fn tmp_path_for(path: &Path) -> PathBuf {
  let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
  name.push(".tmp");
  path.with_file_name(name)
}

/// Escribe `contents` en un temporal y lo renombra sobre `path`.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  let tmp_path = tmp_path_for(path);

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

/// Versión async de [`atomic_write_str`] para contenido binario.
pub async fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
  let tmp_path = tmp_path_for(path);

  {
    let mut tmp_file = tokio::fs::File::create(&tmp_path).await?;
    tmp_file.write_all(bytes).await?;
    tmp_file.sync_all().await?;
  }

  tokio::fs::rename(&tmp_path, path).await
}
