use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use timeline_core::TimelineError;

/// Identifies one independently paginated view ("column" in the UI).
///
/// Each variant doubles as the fetch parameters the source needs to query it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewKind {
    #[default]
    Home,
    Mentions,
    List { list_id: String },
    Search { query: String },
}

impl ViewKind {
    pub fn list(list_id: impl Into<String>) -> Self {
        Self::List {
            list_id: list_id.into(),
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self::Search {
            query: query.into(),
        }
    }

    /// Only the home feed is throttled on the client side.
    pub fn has_refresh_cooldown(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// Short human-readable label for status lines.
    pub fn label(&self) -> String {
        match self {
            Self::Home => "Home".to_string(),
            Self::Mentions => "Mentions".to_string(),
            Self::List { list_id } => format!("List {}", list_id),
            Self::Search { query } => format!("Search \"{}\"", query),
        }
    }
}

/// Parses `home`, `mentions`, `list:<id>` and `search:<query>`.
impl FromStr for ViewKind {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some(("list", id)) if !id.trim().is_empty() => Ok(Self::list(id.trim())),
            Some(("search", query)) if !query.trim().is_empty() => Ok(Self::search(query.trim())),
            None if s.eq_ignore_ascii_case("home") => Ok(Self::Home),
            None if s.eq_ignore_ascii_case("mentions") => Ok(Self::Mentions),
            _ => Err(TimelineError::Validation(format!(
                "Unknown view '{}': expected home, mentions, list:<id> or search:<query>",
                s
            ))),
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Mentions => write!(f, "mentions"),
            Self::List { list_id } => write!(f, "list:{}", list_id),
            Self::Search { query } => write!(f, "search:{}", query),
        }
    }
}
