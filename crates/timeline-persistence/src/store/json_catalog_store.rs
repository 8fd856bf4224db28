use crate::catalog::ViewCatalog;
use crate::store::atomic_writer::AtomicWriter;
use crate::traits::{CatalogStore, PersistenceMetadata, FORMAT_VERSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use timeline_core::{TimelineError, TimelineResult};
use uuid::Uuid;

/// Catalog stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
    instance_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonEnvelope {
    version: u32,
    metadata: PersistenceMetadata,
    catalog: ViewCatalog,
}

impl JsonCatalogStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_instance_id(path, Uuid::new_v4())
    }

    pub fn with_instance_id(path: impl AsRef<Path>, instance_id: Uuid) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            instance_id,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }
}

#[async_trait::async_trait]
impl CatalogStore for JsonCatalogStore {
    async fn save(&self, catalog: &ViewCatalog) -> TimelineResult<PersistenceMetadata> {
        let envelope = JsonEnvelope {
            version: FORMAT_VERSION,
            metadata: PersistenceMetadata::new(self.instance_id),
            catalog: catalog.clone(),
        };
        let bytes = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TimelineError::Serialization(e.to_string()))?;

        AtomicWriter::write_atomic(&self.path, &bytes).await?;

        tracing::info!(
            "Saved catalog ({} lists, {} searches) to {}",
            catalog.lists.len(),
            catalog.searches.len(),
            self.path.display()
        );
        Ok(envelope.metadata)
    }

    async fn load(&self) -> TimelineResult<(ViewCatalog, PersistenceMetadata)> {
        let bytes = AtomicWriter::read_all(&self.path).await?;
        let envelope: JsonEnvelope = serde_json::from_slice(&bytes)
            .map_err(|e| TimelineError::Serialization(e.to_string()))?;

        if envelope.version != FORMAT_VERSION {
            return Err(TimelineError::Serialization(format!(
                "Unsupported catalog format version: {}",
                envelope.version
            )));
        }

        tracing::debug!(
            "Loaded catalog saved by {} at {}",
            envelope.metadata.instance_id,
            envelope.metadata.saved_at
        );
        Ok((envelope.catalog, envelope.metadata))
    }

    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;
    use timeline_domain::ViewKind;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let store = JsonCatalogStore::new(dir.path().join("catalog.json"));

        let mut catalog = ViewCatalog::default();
        catalog.add_list("42", "Friends").unwrap();
        catalog.add_search("rust lang").unwrap();
        catalog.set_last_view(ViewKind::list("42")).unwrap();

        let saved = store.save(&catalog).await.unwrap();
        assert_eq!(saved.instance_id, store.instance_id());
        assert_eq!(saved.format_version, FORMAT_VERSION);

        let (loaded, metadata) = store.load().await.unwrap();
        assert_eq!(loaded, catalog);
        assert_eq!(metadata, saved);
    }

    #[tokio::test]
    async fn test_load_or_default_when_missing() {
        let dir = tempdir().unwrap();
        let store = JsonCatalogStore::new(dir.path().join("missing.json"));

        assert!(!store.exists().await);
        assert_eq!(store.load_or_default().await.unwrap(), ViewCatalog::default());
    }

    #[tokio::test]
    async fn test_file_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let store = JsonCatalogStore::new(&path);

        let mut catalog = ViewCatalog::default();
        catalog.set_last_view(ViewKind::Home).unwrap();
        store.save(&catalog).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], json!(1));
        assert_eq!(raw["catalog"]["last_view"], json!({ "kind": "home" }));
        assert!(raw["metadata"]["instance_id"].is_string());
    }

    #[tokio::test]
    async fn test_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let envelope = json!({
            "version": 9,
            "metadata": {
                "format_version": 9,
                "instance_id": Uuid::new_v4(),
                "saved_at": "2024-01-01T00:00:00Z"
            },
            "catalog": {}
        });
        std::fs::write(&path, serde_json::to_vec(&envelope).unwrap()).unwrap();

        let err = JsonCatalogStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, TimelineError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = JsonCatalogStore::new(&path);
        assert!(store.exists().await);
        assert!(store.load_or_default().await.is_err());
    }
}
