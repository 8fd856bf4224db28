//! The set of views a user can switch between.
//!
//! Home and mentions always exist. Lists and saved searches are added by the
//! user and remembered across runs, together with the last active view.

use serde::{Deserialize, Serialize};
use timeline_core::{TimelineError, TimelineResult};
use timeline_domain::ViewKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    pub list_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewCatalog {
    #[serde(default)]
    pub lists: Vec<ListEntry>,
    #[serde(default)]
    pub searches: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_view: Option<ViewKind>,
}

fn non_empty(value: &str, what: &str) -> TimelineResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimelineError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(value.to_string())
}

impl ViewCatalog {
    /// Add a list, or rename it if already known. Returns true if it was new.
    pub fn add_list(&mut self, list_id: &str, name: &str) -> TimelineResult<bool> {
        let list_id = non_empty(list_id, "List id")?;
        let name = match name.trim() {
            "" => list_id.clone(),
            name => name.to_string(),
        };

        if let Some(entry) = self.lists.iter_mut().find(|e| e.list_id == list_id) {
            entry.name = name;
            return Ok(false);
        }
        self.lists.push(ListEntry { list_id, name });
        Ok(true)
    }

    pub fn remove_list(&mut self, list_id: &str) -> TimelineResult<ListEntry> {
        let index = self
            .lists
            .iter()
            .position(|e| e.list_id == list_id.trim())
            .ok_or_else(|| TimelineError::NotFound(format!("List '{}'", list_id)))?;
        let entry = self.lists.remove(index);
        self.forget_last_view(&ViewKind::list(entry.list_id.clone()));
        Ok(entry)
    }

    /// Save a search query. Returns true if it was new.
    pub fn add_search(&mut self, query: &str) -> TimelineResult<bool> {
        let query = non_empty(query, "Search query")?;
        if self.searches.contains(&query) {
            return Ok(false);
        }
        self.searches.push(query);
        Ok(true)
    }

    pub fn remove_search(&mut self, query: &str) -> TimelineResult<String> {
        let index = self
            .searches
            .iter()
            .position(|q| q == query.trim())
            .ok_or_else(|| TimelineError::NotFound(format!("Search '{}'", query)))?;
        let query = self.searches.remove(index);
        self.forget_last_view(&ViewKind::search(query.clone()));
        Ok(query)
    }

    pub fn set_last_view(&mut self, view: ViewKind) -> TimelineResult<()> {
        if !self.contains(&view) {
            return Err(TimelineError::NotFound(format!("View '{}'", view)));
        }
        self.last_view = Some(view);
        Ok(())
    }

    fn forget_last_view(&mut self, view: &ViewKind) {
        if self.last_view.as_ref() == Some(view) {
            self.last_view = None;
        }
    }

    pub fn contains(&self, view: &ViewKind) -> bool {
        match view {
            ViewKind::Home | ViewKind::Mentions => true,
            ViewKind::List { list_id } => self.lists.iter().any(|e| &e.list_id == list_id),
            ViewKind::Search { query } => self.searches.contains(query),
        }
    }

    /// Every switchable view: home, mentions, then lists and searches in
    /// the order they were added.
    pub fn views(&self) -> Vec<ViewKind> {
        let mut views = vec![ViewKind::Home, ViewKind::Mentions];
        views.extend(self.lists.iter().map(|e| ViewKind::list(e.list_id.clone())));
        views.extend(self.searches.iter().cloned().map(ViewKind::search));
        views
    }

    /// Display name for a view, using the list's saved name when known.
    pub fn display_name(&self, view: &ViewKind) -> String {
        match view {
            ViewKind::List { list_id } => self
                .lists
                .iter()
                .find(|e| &e.list_id == list_id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| view.label()),
            _ => view.label(),
        }
    }
}
