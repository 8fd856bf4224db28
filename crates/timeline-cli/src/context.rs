use std::path::Path;
use timeline_core::TimelineResult;
use timeline_persistence::{CatalogStore, JsonCatalogStore, ViewCatalog};

/// The view catalog plus the file it came from.
pub struct CliContext {
    pub catalog: ViewCatalog,
    store: JsonCatalogStore,
}

impl CliContext {
    pub async fn load(path: &Path) -> TimelineResult<Self> {
        let store = JsonCatalogStore::new(path);
        let catalog = store.load_or_default().await?;
        Ok(Self { catalog, store })
    }

    pub async fn save(&self) -> TimelineResult<()> {
        self.store.save(&self.catalog).await?;
        Ok(())
    }
}
