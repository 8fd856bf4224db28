use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use timeline_core::TimelineResult;
use uuid::Uuid;

use crate::catalog::ViewCatalog;

/// Current on-disk catalog format.
pub const FORMAT_VERSION: u32 = 1;

/// Written alongside every saved catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceMetadata {
    pub format_version: u32,
    /// Process that performed the save
    pub instance_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

impl PersistenceMetadata {
    pub fn new(instance_id: Uuid) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            instance_id,
            saved_at: Utc::now(),
        }
    }
}

/// Storage backend for the view catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn save(&self, catalog: &ViewCatalog) -> TimelineResult<PersistenceMetadata>;

    async fn load(&self) -> TimelineResult<(ViewCatalog, PersistenceMetadata)>;

    async fn exists(&self) -> bool;

    fn path(&self) -> &Path;

    /// Load the catalog, or an empty one if nothing was saved yet.
    async fn load_or_default(&self) -> TimelineResult<ViewCatalog> {
        if self.exists().await {
            Ok(self.load().await?.0)
        } else {
            Ok(ViewCatalog::default())
        }
    }
}
