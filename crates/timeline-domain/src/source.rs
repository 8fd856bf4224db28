use async_trait::async_trait;
use timeline_core::{Identified, TimelineResult};

use crate::cursor::FetchBounds;
use crate::view::ViewKind;

/// The remote fetch primitive every view paginates against.
///
/// Implementations wrap the service API. They must return items newest-first
/// and only items admitted by `bounds`; anything else is rejected at merge time.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    type Item: Identified + Clone + Send + Sync + 'static;

    /// Fetch at most `limit` items of `view` inside `bounds`.
    async fn fetch(
        &self,
        view: &ViewKind,
        bounds: FetchBounds,
        limit: usize,
    ) -> TimelineResult<Vec<Self::Item>>;
}
