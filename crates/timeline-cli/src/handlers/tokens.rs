use crate::output;
use serde::Serialize;
use timeline_core::{ItemId, TimelineResult};
use timeline_domain::{FetchBounds, Timeline};

#[derive(Serialize)]
struct TokensReport {
    count: usize,
    newer_bound: ItemId,
    older_bound: ItemId,
    /// `None` once nothing more can exist in that direction
    newer_request: Option<FetchBounds>,
    older_request: Option<FetchBounds>,
}

pub fn handle(raw_ids: &[String]) -> anyhow::Result<()> {
    let ids = raw_ids
        .iter()
        .map(|raw| raw.parse::<ItemId>())
        .collect::<TimelineResult<Vec<_>>>()?;
    let timeline = Timeline::from_items(ids)?;
    let tokens = timeline.cursor_tokens();

    output::print_data(TokensReport {
        count: timeline.len(),
        newer_bound: tokens.newer_bound,
        older_bound: tokens.older_bound,
        newer_request: tokens.newer_request(),
        older_request: tokens.older_request(),
    });
    Ok(())
}
