//! Writes the raw body of the last response per currency to disk.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
}

impl SnapshotWriter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        SnapshotWriter {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, currency: &str) -> PathBuf {
        self.dir.join(format!(".{}divEUR.json", currency.to_uppercase()))
    }

    /// Overwrites the snapshot for `currency`, creating the directory first if
    /// needed.
    pub async fn write(&self, currency: &str, body: &str) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(currency);
        tokio::fs::write(&path, body).await?;
        debug!("Wrote response snapshot to {}", path.display());
        Ok(path)
    }
}
