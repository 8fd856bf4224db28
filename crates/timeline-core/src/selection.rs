//! Window origin and focus tracking.
//!
//! A `Position` is the pair every view carries around: where its window
//! starts in the timeline (`cursor`) and which row inside that window is
//! highlighted (`focus`).

use serde::{Deserialize, Serialize};

use crate::pagination::WindowSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Offset of the window's first item in the timeline.
    pub cursor: usize,
    /// Index of the highlighted item within the window.
    pub focus: usize,
}

impl Position {
    pub fn new(cursor: usize, focus: usize) -> Self {
        Self { cursor, focus }
    }

    /// Index of the focused item in the whole timeline.
    pub fn absolute_index(&self) -> usize {
        self.cursor + self.focus
    }

    /// Keep focus inside the window. Returns true if anything changed.
    pub fn clamp_focus(&mut self, size: WindowSize) -> bool {
        let max = size.get() - 1;
        if self.focus > max {
            self.focus = max;
            return true;
        }
        false
    }

    /// Restore every at-rest invariant against a timeline of `len` items.
    ///
    /// Focus is clamped to the window first; if the focused item would still
    /// fall past the end, the cursor is pulled back before focus is given up.
    pub fn clamp_to(&mut self, len: usize, size: WindowSize) -> bool {
        let before = *self;
        self.clamp_focus(size);
        if len == 0 {
            self.cursor = 0;
            self.focus = 0;
        } else if self.absolute_index() >= len {
            let last = len - 1;
            if self.focus <= last {
                self.cursor = last - self.focus;
            } else {
                self.cursor = 0;
                self.focus = last;
            }
        }
        before != *self
    }

    /// Whether the position is valid at rest for a timeline of `len` items.
    pub fn is_valid(&self, len: usize, size: WindowSize) -> bool {
        self.focus < size.get() && (len == 0 || self.absolute_index() < len)
    }

    /// Focus index if it points at one of `visible` items.
    pub fn focused_in(&self, visible: usize) -> Option<usize> {
        (self.focus < visible).then_some(self.focus)
    }
}
