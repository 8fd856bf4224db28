//! A `TimelineSource` backed by a JSON fixture.
//!
//! The fixture maps view specs to posts:
//!
//! ```json
//! { "home": [{ "id": "30", "author": "ana", "text": "hi" }], "list:42": [] }
//! ```
//!
//! Posts may be listed in any order; they are served newest first. Views the
//! fixture does not mention have no posts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use timeline_core::{Identified, TimelineError, TimelineResult};
use timeline_domain::{FetchBounds, Post, TimelineSource, ViewKind};

pub struct FixtureSource {
    feeds: HashMap<ViewKind, Vec<Post>>,
}

impl FixtureSource {
    pub async fn load(path: &Path) -> TimelineResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_json(&bytes)
    }

    pub fn from_json(bytes: &[u8]) -> TimelineResult<Self> {
        let raw: HashMap<String, Vec<Post>> = serde_json::from_slice(bytes)
            .map_err(|e| TimelineError::Serialization(format!("Invalid fixture: {}", e)))?;

        let mut feeds = HashMap::with_capacity(raw.len());
        for (spec, mut posts) in raw {
            let view: ViewKind = spec.parse()?;
            posts.sort_by(|a, b| b.id.cmp(&a.id));
            posts.dedup_by_key(|post| post.id);
            feeds.insert(view, posts);
        }
        Ok(Self { feeds })
    }
}

#[async_trait]
impl TimelineSource for FixtureSource {
    type Item = Post;

    async fn fetch(
        &self,
        view: &ViewKind,
        bounds: FetchBounds,
        limit: usize,
    ) -> TimelineResult<Vec<Post>> {
        let admitted: Vec<&Post> = self
            .feeds
            .get(view)
            .map(|posts| posts.iter().filter(|p| bounds.admits(p.id())).collect())
            .unwrap_or_default();

        // Serve the posts nearest the boundary
        let skip = if bounds.newer_than.is_some() {
            admitted.len().saturating_sub(limit)
        } else {
            0
        };
        let page: Vec<Post> = admitted
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        tracing::debug!("Fixture {} {:?}: {} posts", view, bounds, page.len());
        Ok(page)
    }
}
