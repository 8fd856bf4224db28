use timeline_core::{display_window, Identified, ItemId, TimelineError, TimelineResult, WindowSize};

use crate::cursor::CursorTokens;

/// A newest-first, duplicate-free sequence of items.
///
/// Every mutation checks its ordering precondition up front and leaves the
/// sequence untouched when it does not hold.
#[derive(Debug, Clone)]
pub struct Timeline<T> {
    items: Vec<T>,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identified> Timeline<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<T>) -> TimelineResult<Self> {
        ensure_descending(&items)?;
        Ok(Self { items })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn newest_id(&self) -> Option<ItemId> {
        self.items.first().map(Identified::id)
    }

    pub fn oldest_id(&self) -> Option<ItemId> {
        self.items.last().map(Identified::id)
    }

    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.binary_search_by(|item| id.cmp(&item.id())).ok()
    }

    pub fn cursor_tokens(&self) -> CursorTokens {
        CursorTokens::compute(&self.items)
    }

    pub fn window(&self, cursor: usize, size: WindowSize) -> &[T] {
        display_window(&self.items, cursor, size)
    }

    /// Discard everything and start over from `batch`.
    pub fn replace(&mut self, batch: Vec<T>) -> TimelineResult<()> {
        ensure_descending(&batch)?;
        self.items = batch;
        Ok(())
    }

    /// Prepend a batch of strictly newer items. Returns the batch length.
    pub fn merge_newer(&mut self, batch: Vec<T>) -> TimelineResult<usize> {
        ensure_descending(&batch)?;
        if let (Some(batch_oldest), Some(newest)) = (batch.last(), self.newest_id()) {
            if batch_oldest.id() <= newest {
                return Err(TimelineError::InvariantViolation(format!(
                    "newer batch reaches down to {} but timeline already starts at {}",
                    batch_oldest.id(),
                    newest
                )));
            }
        }
        let added = batch.len();
        self.items.splice(0..0, batch);
        Ok(added)
    }

    /// Append a batch of strictly older items. Returns the batch length.
    pub fn merge_older(&mut self, batch: Vec<T>) -> TimelineResult<usize> {
        ensure_descending(&batch)?;
        if let (Some(batch_newest), Some(oldest)) = (batch.first(), self.oldest_id()) {
            if batch_newest.id() >= oldest {
                return Err(TimelineError::InvariantViolation(format!(
                    "older batch reaches up to {} but timeline already ends at {}",
                    batch_newest.id(),
                    oldest
                )));
            }
        }
        let added = batch.len();
        self.items.extend(batch);
        Ok(added)
    }
}

fn ensure_descending<T: Identified>(items: &[T]) -> TimelineResult<()> {
    match items.windows(2).find(|pair| pair[0].id() <= pair[1].id()) {
        Some(pair) => Err(TimelineError::InvariantViolation(format!(
            "batch is not strictly newest-first: {} followed by {}",
            pair[0].id(),
            pair[1].id()
        ))),
        None => Ok(()),
    }
}
