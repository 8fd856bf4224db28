use std::collections::HashMap;
use timeline_core::Position;

use crate::view::ViewKind;

/// Remembers where each view was scrolled when the user left it.
#[derive(Debug, Clone, Default)]
pub struct PositionCache {
    positions: HashMap<ViewKind, Position>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the position of a view being deactivated.
    pub fn save(&mut self, view: &ViewKind, position: Position) {
        tracing::debug!(
            "Caching position {}:{} for {}",
            position.cursor,
            position.focus,
            view
        );
        self.positions.insert(view.clone(), position);
    }

    /// The position a view had when last deactivated.
    pub fn restore(&self, view: &ViewKind) -> Option<Position> {
        self.positions.get(view).copied()
    }

    pub fn forget(&mut self, view: &ViewKind) -> Option<Position> {
        self.positions.remove(view)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_restore() {
        let mut cache = PositionCache::new();
        cache.save(&ViewKind::Home, Position::new(3, 1));
        assert_eq!(cache.restore(&ViewKind::Home), Some(Position::new(3, 1)));
        assert_eq!(cache.restore(&ViewKind::Mentions), None);
    }

    #[test]
    fn test_views_are_independent() {
        let mut cache = PositionCache::new();
        cache.save(&ViewKind::list("1"), Position::new(4, 0));
        cache.save(&ViewKind::list("2"), Position::new(9, 2));

        assert_eq!(cache.restore(&ViewKind::list("1")), Some(Position::new(4, 0)));
        assert_eq!(cache.restore(&ViewKind::list("2")), Some(Position::new(9, 2)));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_save_overwrites() {
        let mut cache = PositionCache::new();
        cache.save(&ViewKind::Home, Position::new(1, 1));
        cache.save(&ViewKind::Home, Position::new(5, 0));
        assert_eq!(cache.restore(&ViewKind::Home), Some(Position::new(5, 0)));
    }

    #[test]
    fn test_forget() {
        let mut cache = PositionCache::new();
        cache.save(&ViewKind::search("rust"), Position::new(2, 2));
        assert_eq!(
            cache.forget(&ViewKind::search("rust")),
            Some(Position::new(2, 2))
        );
        assert!(cache.is_empty());
    }
}
