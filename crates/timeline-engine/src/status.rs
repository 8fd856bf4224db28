use serde::Serialize;
use timeline_domain::FetchDirection;

/// The one-line feedback area shared by every view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusLine {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// What a fetch did to its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The timeline was replaced by a fresh most-recent page.
    Loaded { count: usize },
    /// Items were merged at one end.
    Merged {
        direction: FetchDirection,
        count: usize,
    },
    /// The service had nothing beyond the boundary.
    Empty,
    /// A fetch for this view was already in flight.
    Ignored,
}

impl FetchOutcome {
    pub fn describe(&self) -> String {
        match self {
            Self::Loaded { count } => format!("Loaded {} posts", count),
            Self::Merged {
                direction: FetchDirection::Newer,
                count,
            } => format!("{} newer posts", count),
            Self::Merged {
                direction: FetchDirection::Older,
                count,
            } => format!("{} older posts", count),
            Self::Empty => "Nothing new".to_string(),
            Self::Ignored => "Still loading".to_string(),
        }
    }
}

/// What a navigation intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum NavOutcome {
    Moved,
    Unchanged,
    /// Dropped because the view is mid-fetch.
    Ignored,
    /// The move ran past loaded data and triggered a fetch.
    Fetched { fetch: FetchOutcome },
}
