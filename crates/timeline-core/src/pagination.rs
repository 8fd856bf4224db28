//! Window projection utilities.
//!
//! A timeline is only ever shown through a small fixed-size window. This module
//! owns the window size bounds and the pure projection from
//! (sequence, cursor, size) to the visible slice plus its scroll indicators.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Smallest window the user can shrink to.
pub const MIN_WINDOW_SIZE: usize = 1;
/// Largest window the user can grow to.
pub const MAX_WINDOW_SIZE: usize = 20;
/// Window size used when nothing is configured.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Number of items visible at once, always within
/// [`MIN_WINDOW_SIZE`]..=[`MAX_WINDOW_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct WindowSize(usize);

impl WindowSize {
    /// Create a window size, clamping out-of-range values.
    pub fn new(size: usize) -> Self {
        Self(size.clamp(MIN_WINDOW_SIZE, MAX_WINDOW_SIZE))
    }

    pub fn get(self) -> usize {
        self.0
    }

    /// Grow by one. Returns false when already at the maximum.
    pub fn increment(&mut self) -> bool {
        if self.0 >= MAX_WINDOW_SIZE {
            return false;
        }
        self.0 += 1;
        true
    }

    /// Shrink by one. Returns false when already at the minimum.
    pub fn decrement(&mut self) -> bool {
        if self.0 <= MIN_WINDOW_SIZE {
            return false;
        }
        self.0 -= 1;
        true
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(DEFAULT_WINDOW_SIZE)
    }
}

impl From<usize> for WindowSize {
    fn from(size: usize) -> Self {
        Self::new(size)
    }
}

impl From<WindowSize> for usize {
    fn from(size: WindowSize) -> Self {
        size.0
    }
}

/// Indices of the visible slice, clamped to the sequence length.
pub fn window_range(total_items: usize, cursor: usize, size: WindowSize) -> Range<usize> {
    let start = cursor.min(total_items);
    let end = cursor.saturating_add(size.get()).min(total_items);
    start..end
}

/// The visible slice of `items` starting at `cursor`.
pub fn display_window<T>(items: &[T], cursor: usize, size: WindowSize) -> &[T] {
    &items[window_range(items.len(), cursor, size)]
}

/// Information about the visible portion of a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    /// Index of the first visible item.
    pub first_visible: usize,
    /// Number of items actually visible (may be less than the window size).
    pub visible_count: usize,
    /// Configured window size.
    pub window_size: usize,
    /// Count of loaded items above the window.
    pub items_above: usize,
    /// Count of loaded items below the window.
    pub items_below: usize,
}

impl WindowInfo {
    pub fn compute(total_items: usize, cursor: usize, size: WindowSize) -> Self {
        let range = window_range(total_items, cursor, size);
        Self {
            first_visible: range.start,
            visible_count: range.len(),
            window_size: size.get(),
            items_above: range.start,
            items_below: total_items - range.end,
        }
    }

    pub fn show_above_indicator(&self) -> bool {
        self.items_above > 0
    }

    pub fn show_below_indicator(&self) -> bool {
        self.items_below > 0
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count == 0
    }
}
