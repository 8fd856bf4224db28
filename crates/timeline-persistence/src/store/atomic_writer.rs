use std::path::Path;
use timeline_core::TimelineResult;
use tokio::fs;

/// Writes files through a sibling temp file and a rename, so readers never
/// see a half-written catalog.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TimelineResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        // Same directory keeps the rename on one filesystem
        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        fs::write(&temp_path, data).await?;
        temp_path.persist(path).map_err(std::io::Error::from)?;

        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    pub async fn read_all(path: &Path) -> TimelineResult<Vec<u8>> {
        let data = fs::read(path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), path.display());
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        AtomicWriter::write_atomic(&path, b"{\"lists\":[]}").await.unwrap();

        let data = AtomicWriter::read_all(&path).await.unwrap();
        assert_eq!(data, b"{\"lists\":[]}");
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");

        AtomicWriter::write_atomic(&path, b"first").await.unwrap();
        AtomicWriter::write_atomic(&path, b"second").await.unwrap();

        assert_eq!(AtomicWriter::read_all(&path).await.unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_creates_missing_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timeline").join("catalog.json");

        AtomicWriter::write_atomic(&path, b"{}").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = AtomicWriter::read_all(&dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, timeline_core::TimelineError::Io(_)));
    }
}
