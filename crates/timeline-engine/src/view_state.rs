use serde::Serialize;
use timeline_core::{Identified, Position, WindowSize};
use timeline_domain::Timeline;
use tokio::time::{Duration, Instant};

/// Whether a view is waiting on the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    #[default]
    Idle,
    Fetching,
}

/// Everything one view owns: its timeline, where it is scrolled, and
/// whether a fetch is in flight.
#[derive(Debug, Clone)]
pub struct ViewState<T> {
    pub timeline: Timeline<T>,
    pub position: Position,
    pub activity: Activity,
    refreshed_at: Option<Instant>,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            timeline: Timeline::default(),
            position: Position::default(),
            activity: Activity::Idle,
            refreshed_at: None,
        }
    }
}

impl<T: Identified> ViewState<T> {
    pub fn is_fetching(&self) -> bool {
        self.activity == Activity::Fetching
    }

    /// Re-establish the at-rest position invariants. No-op while fetching.
    pub fn settle(&mut self, size: WindowSize) -> bool {
        if self.is_fetching() {
            return false;
        }
        self.position.clamp_to(self.timeline.len(), size)
    }

    pub fn focused(&self, size: WindowSize) -> Option<&T> {
        let window = self.timeline.window(self.position.cursor, size);
        self.position
            .focused_in(window.len())
            .map(|focus| &window[focus])
    }

    pub(crate) fn mark_refreshed(&mut self, at: Instant) {
        self.refreshed_at = Some(at);
    }

    /// Time left before another refresh is allowed under `period`.
    pub(crate) fn cooldown_remaining(&self, now: Instant, period: Duration) -> Option<Duration> {
        let ready_at = self.refreshed_at? + period;
        (ready_at > now).then(|| ready_at - now)
    }
}
