use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use timeline_core::{Identified, ItemId};

/// A single timeline entry as delivered by the remote service.
///
/// The engine only looks at `id`; everything else is carried along for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: ItemId,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    pub fn new(id: impl Into<ItemId>, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            text: text.into(),
            created_at: None,
        }
    }
}

impl Identified for Post {
    fn id(&self) -> ItemId {
        self.id
    }
}
