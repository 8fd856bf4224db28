//! Navigation state machine.
//!
//! Turns a navigation intent into a new window position, and reports when the
//! movement runs past the loaded data so the caller can fetch more. The mover
//! itself never fetches; it only says which direction is needed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use timeline_core::{Position, TimelineError, WindowSize};

/// A discrete navigation request from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NavIntent {
    /// Move the focus one item toward newer items ("prev").
    StepNewer,
    /// Move the focus one item toward older items ("next").
    StepOlder,
    /// Move the window one page toward newer items.
    PageNewer,
    /// Move the window one page toward older items.
    PageOlder,
    /// Show the newest loaded items.
    JumpTop,
    /// Show the oldest loaded items.
    JumpBottom,
}

impl NavIntent {
    pub const ALL: [NavIntent; 6] = [
        NavIntent::StepNewer,
        NavIntent::StepOlder,
        NavIntent::PageNewer,
        NavIntent::PageOlder,
        NavIntent::JumpTop,
        NavIntent::JumpBottom,
    ];
}

impl FromStr for NavIntent {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "prev" | "up" | "k" => Ok(Self::StepNewer),
            "next" | "down" | "j" => Ok(Self::StepOlder),
            "page-up" => Ok(Self::PageNewer),
            "page-down" => Ok(Self::PageOlder),
            "top" | "g" => Ok(Self::JumpTop),
            "bottom" | "G" => Ok(Self::JumpBottom),
            other => Err(TimelineError::Validation(format!(
                "Unknown navigation step '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for NavIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StepNewer => "prev",
            Self::StepOlder => "next",
            Self::PageNewer => "page-up",
            Self::PageOlder => "page-down",
            Self::JumpTop => "top",
            Self::JumpBottom => "bottom",
        };
        f.write_str(name)
    }
}

/// Which end of the timeline needs more data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchDirection {
    Newer,
    Older,
}

/// Result of planning one navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Movement {
    /// Position after the step.
    pub position: Position,
    /// Fetch the caller must issue to satisfy the step, if any.
    pub request: Option<FetchDirection>,
}

impl Movement {
    fn stay(position: Position, request: Option<FetchDirection>) -> Self {
        Self { position, request }
    }

    pub fn moved_from(&self, before: Position) -> bool {
        self.position != before
    }
}

/// Plan `intent` from `position` over a timeline of `len` items.
///
/// Page moves may both move the cursor and request a fetch.
pub fn plan(intent: NavIntent, position: Position, size: WindowSize, len: usize) -> Movement {
    let count = size.get();
    let Position { mut cursor, mut focus } = position;

    let request = match intent {
        NavIntent::StepNewer => {
            if focus > 0 {
                focus -= 1;
                None
            } else if cursor > 0 {
                cursor -= 1;
                None
            } else {
                Some(FetchDirection::Newer)
            }
        }
        NavIntent::StepOlder => {
            // Short windows at the tail must not let focus run past the last item.
            let visible = count.min(len.saturating_sub(cursor));
            if focus + 1 < visible {
                focus += 1;
                None
            } else if cursor + count < len {
                cursor += 1;
                None
            } else {
                Some(FetchDirection::Older)
            }
        }
        NavIntent::PageNewer => {
            if cursor + focus <= count {
                cursor = 0;
                Some(FetchDirection::Newer)
            } else {
                cursor = cursor.saturating_sub(count);
                None
            }
        }
        NavIntent::PageOlder => {
            if cursor + 2 * count > len {
                cursor = len.saturating_sub(count);
                Some(FetchDirection::Older)
            } else {
                cursor = (cursor + count).min(len - count - 1);
                None
            }
        }
        NavIntent::JumpTop => {
            cursor = 0;
            None
        }
        NavIntent::JumpBottom => {
            if cursor < len.saturating_sub(count) {
                cursor = len - count;
            }
            None
        }
    };

    Movement::stay(Position::new(cursor, focus), request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> WindowSize {
        WindowSize::new(n)
    }

    #[test]
    fn test_step_older_slides_window_at_last_row() {
        // [30, 20, 10], window of 2 showing [30, 20] with 20 focused
        let m = plan(NavIntent::StepOlder, Position::new(0, 1), size(2), 3);
        assert_eq!(m.position, Position::new(1, 1));
        assert_eq!(m.request, None);
    }

    #[test]
    fn test_step_older_requests_fetch_at_tail() {
        let m = plan(NavIntent::StepOlder, Position::new(1, 1), size(2), 3);
        assert_eq!(m.position, Position::new(1, 1));
        assert_eq!(m.request, Some(FetchDirection::Older));
        assert!(!m.moved_from(Position::new(1, 1)));
    }

    #[test]
    fn test_step_older_moves_focus_first() {
        let m = plan(NavIntent::StepOlder, Position::new(0, 0), size(2), 3);
        assert_eq!(m.position, Position::new(0, 1));
    }

    #[test]
    fn test_step_older_short_timeline_stops_at_last_item() {
        let m = plan(NavIntent::StepOlder, Position::new(0, 1), size(5), 2);
        assert_eq!(m.position, Position::new(0, 1));
        assert_eq!(m.request, Some(FetchDirection::Older));
    }

    #[test]
    fn test_step_older_on_empty_requests_fetch() {
        let m = plan(NavIntent::StepOlder, Position::default(), size(5), 0);
        assert_eq!(m.request, Some(FetchDirection::Older));
    }

    #[test]
    fn test_step_newer_moves_focus_then_cursor() {
        let m = plan(NavIntent::StepNewer, Position::new(2, 1), size(3), 10);
        assert_eq!(m.position, Position::new(2, 0));

        let m = plan(NavIntent::StepNewer, Position::new(2, 0), size(3), 10);
        assert_eq!(m.position, Position::new(1, 0));
    }

    #[test]
    fn test_step_newer_at_head_requests_fetch() {
        let m = plan(NavIntent::StepNewer, Position::new(0, 0), size(3), 10);
        assert_eq!(m.position, Position::new(0, 0));
        assert_eq!(m.request, Some(FetchDirection::Newer));
    }

    #[test]
    fn test_page_newer_near_head_resets_and_fetches() {
        let m = plan(NavIntent::PageNewer, Position::new(2, 1), size(3), 10);
        assert_eq!(m.position, Position::new(0, 1));
        assert_eq!(m.request, Some(FetchDirection::Newer));
    }

    #[test]
    fn test_page_newer_far_from_head_pages() {
        let m = plan(NavIntent::PageNewer, Position::new(7, 0), size(3), 20);
        assert_eq!(m.position, Position::new(4, 0));
        assert_eq!(m.request, None);
    }

    #[test]
    fn test_page_older_pages_without_fetch() {
        let m = plan(NavIntent::PageOlder, Position::new(0, 0), size(3), 20);
        assert_eq!(m.position, Position::new(3, 0));
        assert_eq!(m.request, None);
    }

    #[test]
    fn test_page_older_stops_short_of_tail() {
        // cursor + 2*count == len: allowed to page, capped one short of the last page
        let m = plan(NavIntent::PageOlder, Position::new(4, 0), size(3), 10);
        assert_eq!(m.position, Position::new(6, 0));
        assert_eq!(m.request, None);
    }

    #[test]
    fn test_page_older_near_tail_jumps_and_fetches() {
        let m = plan(NavIntent::PageOlder, Position::new(5, 2), size(3), 10);
        assert_eq!(m.position, Position::new(7, 2));
        assert_eq!(m.request, Some(FetchDirection::Older));
    }

    #[test]
    fn test_page_older_short_timeline() {
        let m = plan(NavIntent::PageOlder, Position::new(0, 1), size(5), 3);
        assert_eq!(m.position, Position::new(0, 1));
        assert_eq!(m.request, Some(FetchDirection::Older));
    }

    #[test]
    fn test_jump_top_keeps_focus() {
        let m = plan(NavIntent::JumpTop, Position::new(6, 2), size(3), 10);
        assert_eq!(m.position, Position::new(0, 2));
        assert_eq!(m.request, None);
    }

    #[test]
    fn test_jump_bottom() {
        let m = plan(NavIntent::JumpBottom, Position::new(0, 1), size(3), 10);
        assert_eq!(m.position, Position::new(7, 1));
        assert_eq!(m.request, None);

        // Already there
        let m = plan(NavIntent::JumpBottom, Position::new(7, 1), size(3), 10);
        assert_eq!(m.position, Position::new(7, 1));
    }

    #[test]
    fn test_jump_bottom_short_timeline_is_noop() {
        let m = plan(NavIntent::JumpBottom, Position::new(0, 1), size(5), 3);
        assert_eq!(m.position, Position::new(0, 1));
    }

    #[test]
    fn test_intent_names_round_trip() {
        for intent in NavIntent::ALL {
            assert_eq!(intent.to_string().parse::<NavIntent>().unwrap(), intent);
        }
        assert!("sideways".parse::<NavIntent>().is_err());
    }
}
