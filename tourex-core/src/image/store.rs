use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::{Result, TourError};

/// Flat-file image store rooted at a single directory.
///
/// All reads, writes, and deletes are confined to the root directory:
/// a filename is accepted only if it is exactly one normal path component,
/// so separators, `..`, and absolute paths can never escape the root even
/// if a hostile filename reaches this layer.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a bare filename to a path inside the root.
    fn resolve(&self, filename: &str) -> Result<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == filename => {
                Ok(self.root.join(name))
            }
            _ => Err(TourError::InvalidFilename(filename.to_string())),
        }
    }

    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(TourError::Io)
    }

    /// Write `bytes` under `filename`, durably.
    ///
    /// The file is flushed to stable storage before this returns, so a
    /// filename handed to the record store always references bytes that
    /// survive a crash.
    pub async fn write(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        let path = self.resolve(filename)?;
        let mut file = fs::File::create(&path).await.map_err(TourError::Io)?;
        file.write_all(bytes).await.map_err(TourError::Io)?;
        file.sync_all().await.map_err(TourError::Io)?;
        debug!(file = %path.display(), size = bytes.len(), "stored image");
        Ok(())
    }

    pub async fn exists(&self, filename: &str) -> Result<bool> {
        let path = self.resolve(filename)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TourError::Io(e)),
        }
    }

    /// Remove `filename` if present.
    ///
    /// Returns `Ok(true)` if a file was removed and `Ok(false)` if it was
    /// already gone; only genuine I/O trouble surfaces as an error.
    pub async fn delete(&self, filename: &str) -> Result<bool> {
        let path = self.resolve(filename)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(TourError::Io(e)),
        }
    }

    /// Round-trip a probe file to catch filesystem misconfiguration
    /// (permissions, read-only mounts, overlayfs quirks) at startup.
    pub async fn validate(&self) -> Result<()> {
        const PROBE: &str = ".health-check";

        self.ensure_root().await?;
        self.write(PROBE, b"probe").await?;
        let path = self.resolve(PROBE)?;
        let read_back = fs::read(&path).await.map_err(TourError::Io)?;
        if read_back != b"probe" {
            return Err(TourError::Internal(format!(
                "image store probe mismatch in {}",
                self.root.display()
            )));
        }
        self.delete(PROBE).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn write_exists_delete_round_trip() {
        let (_dir, store) = store();
        store.write("tour-a-1-cover.jpeg", b"bytes").await.unwrap();
        assert!(store.exists("tour-a-1-cover.jpeg").await.unwrap());

        assert!(store.delete("tour-a-1-cover.jpeg").await.unwrap());
        assert!(!store.exists("tour-a-1-cover.jpeg").await.unwrap());
        // Second delete is a no-op, not an error.
        assert!(!store.delete("tour-a-1-cover.jpeg").await.unwrap());
    }

    #[tokio::test]
    async fn rejects_filenames_that_escape_the_root() {
        let (_dir, store) = store();
        for bad in [
            "../evil.jpeg",
            "sub/dir.jpeg",
            "/etc/passwd",
            "..",
            "",
            "a/../b.jpeg",
        ] {
            assert!(
                matches!(
                    store.write(bad, b"x").await,
                    Err(TourError::InvalidFilename(_))
                ),
                "accepted {:?}",
                bad
            );
            assert!(matches!(
                store.delete(bad).await,
                Err(TourError::InvalidFilename(_))
            ));
        }
    }

    #[tokio::test]
    async fn validate_round_trips_and_cleans_up() {
        let (dir, store) = store();
        store.validate().await.unwrap();
        assert!(!store.exists(".health-check").await.unwrap());
        drop(dir);
    }
}
