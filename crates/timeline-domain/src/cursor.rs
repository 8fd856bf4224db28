//! Pagination boundary tokens.
//!
//! Tokens are derived from the extremes of the loaded timeline every time they
//! are needed and never stored, so they cannot go stale after a merge.

use serde::Serialize;
use timeline_core::{Identified, ItemId};

/// Boundary ids to send with the next fetch in either direction.
///
/// `ItemId::ZERO` in both fields means the timeline is empty and the next
/// fetch should ask for the most recent page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CursorTokens {
    /// One above the newest loaded id.
    pub newer_bound: ItemId,
    /// One below the oldest loaded id.
    pub older_bound: ItemId,
}

impl CursorTokens {
    pub const EMPTY: CursorTokens = CursorTokens {
        newer_bound: ItemId::ZERO,
        older_bound: ItemId::ZERO,
    };

    /// Compute tokens for a newest-first sequence.
    pub fn compute<T: Identified>(items: &[T]) -> Self {
        match (items.first(), items.last()) {
            (Some(newest), Some(oldest)) => Self {
                newer_bound: newest.id().successor(),
                older_bound: oldest.id().predecessor(),
            },
            _ => Self::EMPTY,
        }
    }

    /// Whether these are the tokens of an empty timeline.
    pub fn is_empty(&self) -> bool {
        self.newer_bound.is_zero()
    }

    /// Bounds for fetching items newer than everything loaded.
    ///
    /// `None` when the newest loaded id is already the largest representable.
    pub fn newer_request(&self) -> Option<FetchBounds> {
        if self.is_empty() {
            Some(FetchBounds::latest())
        } else if self.newer_bound == ItemId::new(u128::MAX) {
            None
        } else {
            Some(FetchBounds::newer_than(self.newer_bound))
        }
    }

    /// Bounds for fetching items older than everything loaded.
    ///
    /// `None` when the oldest loaded id leaves no room below it.
    pub fn older_request(&self) -> Option<FetchBounds> {
        if self.is_empty() {
            Some(FetchBounds::latest())
        } else if self.older_bound.is_zero() {
            None
        } else {
            Some(FetchBounds::older_than(self.older_bound))
        }
    }
}

/// Boundary passed to the fetch primitive.
///
/// `newer_than = b` asks for ids `>= b`, `older_than = b` for ids `<= b`.
/// Neither set means "the most recent page".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FetchBounds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newer_than: Option<ItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub older_than: Option<ItemId>,
}

impl FetchBounds {
    pub fn latest() -> Self {
        Self::default()
    }

    pub fn newer_than(bound: ItemId) -> Self {
        Self {
            newer_than: Some(bound),
            older_than: None,
        }
    }

    pub fn older_than(bound: ItemId) -> Self {
        Self {
            newer_than: None,
            older_than: Some(bound),
        }
    }

    pub fn is_latest(&self) -> bool {
        self.newer_than.is_none() && self.older_than.is_none()
    }

    /// Whether `id` falls inside these bounds.
    pub fn admits(&self, id: ItemId) -> bool {
        self.newer_than.map_or(true, |b| id >= b) && self.older_than.map_or(true, |b| id <= b)
    }
}
