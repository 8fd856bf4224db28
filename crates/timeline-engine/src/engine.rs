//! Per-view pagination engine.
//!
//! One `PaginationEngine` exists per view. It runs the three fetch intents
//! against the source, feeds navigation through the mover, and enforces the
//! single in-flight fetch and home refresh cool-down policies.

use std::sync::Arc;
use std::time::Duration;
use timeline_core::{AppConfig, Identified, RateLimitHint, TimelineError, TimelineResult};
use timeline_domain::mover::plan;
use timeline_domain::{FetchBounds, FetchDirection, NavIntent, TimelineSource, ViewKind};
use tokio::time::Instant;

use crate::status::{FetchOutcome, NavOutcome};
use crate::store::{TimelineStore, ViewSnapshot};
use crate::view_state::Activity;

/// Tunables for one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Items requested per fetch.
    pub page_size: usize,
    /// Minimum gap between newer-fetches, if throttled.
    pub refresh_cooldown: Option<Duration>,
}

impl EngineOptions {
    pub fn for_view(config: &AppConfig, view: &ViewKind) -> Self {
        Self {
            page_size: config.effective_page_size(),
            refresh_cooldown: if view.has_refresh_cooldown() {
                config.effective_home_cooldown()
            } else {
                None
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Select,
    Newer,
    Older,
}

impl From<FetchDirection> for FetchKind {
    fn from(direction: FetchDirection) -> Self {
        match direction {
            FetchDirection::Newer => Self::Newer,
            FetchDirection::Older => Self::Older,
        }
    }
}

enum Begin {
    Start(FetchBounds),
    Busy,
    Exhausted,
    Throttled(Duration),
}

/// Returns a view to idle if its fetch is dropped before the result is
/// applied.
struct InFlight<'a, T: Identified + Clone> {
    store: &'a TimelineStore<T>,
    view: &'a ViewKind,
    armed: bool,
}

impl<T: Identified + Clone> InFlight<'_, T> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T: Identified + Clone> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::debug!("{}: fetch dropped before completing", self.view);
        self.store.transact(self.view, |txn| {
            txn.state.activity = Activity::Idle;
            txn.mark_changed();
        });
    }
}

pub struct PaginationEngine<S: TimelineSource> {
    view: ViewKind,
    source: Arc<S>,
    store: Arc<TimelineStore<S::Item>>,
    options: EngineOptions,
}

impl<S: TimelineSource> PaginationEngine<S> {
    pub fn new(
        view: ViewKind,
        source: Arc<S>,
        store: Arc<TimelineStore<S::Item>>,
        options: EngineOptions,
    ) -> Self {
        Self {
            view,
            source,
            store,
            options,
        }
    }

    pub fn view(&self) -> &ViewKind {
        &self.view
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn snapshot(&self) -> Option<ViewSnapshot<S::Item>> {
        self.store.get(&self.view)
    }

    /// Load the most recent page, replacing whatever was there.
    pub async fn select_or_reset(&self) -> TimelineResult<FetchOutcome> {
        self.fetch(FetchKind::Select).await
    }

    /// Prepend items newer than the head of the timeline.
    pub async fn fetch_newer(&self) -> TimelineResult<FetchOutcome> {
        self.fetch(FetchKind::Newer).await
    }

    /// Append items older than the tail of the timeline.
    pub async fn fetch_older(&self) -> TimelineResult<FetchOutcome> {
        self.fetch(FetchKind::Older).await
    }

    /// Apply a navigation intent, fetching when it runs past loaded data.
    pub async fn navigate(&self, intent: NavIntent) -> TimelineResult<NavOutcome> {
        let planned = self.store.transact(&self.view, |txn| {
            if txn.state.is_fetching() {
                return None;
            }
            let size = txn.window_size;
            let settled = txn.state.settle(size);
            let before = txn.state.position;
            let movement = plan(intent, before, size, txn.state.timeline.len());
            txn.state.position = movement.position;
            let moved = movement.moved_from(before);
            if settled || moved {
                txn.mark_changed();
            }
            Some((moved, movement.request))
        });

        match planned {
            None => {
                tracing::debug!("{}: ignoring {} while fetching", self.view, intent);
                Ok(NavOutcome::Ignored)
            }
            Some((_, Some(direction))) => {
                tracing::debug!("{}: {} needs {:?} items", self.view, intent, direction);
                let fetch = self.fetch(direction.into()).await?;
                Ok(NavOutcome::Fetched { fetch })
            }
            Some((true, None)) => Ok(NavOutcome::Moved),
            Some((false, None)) => Ok(NavOutcome::Unchanged),
        }
    }

    async fn fetch(&self, kind: FetchKind) -> TimelineResult<FetchOutcome> {
        let cooldown = match kind {
            FetchKind::Newer => self.options.refresh_cooldown,
            _ => None,
        };

        let begin = self.store.transact(&self.view, |txn| {
            if txn.state.is_fetching() {
                return Begin::Busy;
            }
            if let Some(period) = cooldown {
                if let Some(remaining) = txn.state.cooldown_remaining(Instant::now(), period) {
                    return Begin::Throttled(remaining);
                }
            }
            let tokens = txn.state.timeline.cursor_tokens();
            let bounds = match kind {
                FetchKind::Select => Some(FetchBounds::latest()),
                FetchKind::Newer => tokens.newer_request(),
                FetchKind::Older => tokens.older_request(),
            };
            match bounds {
                Some(bounds) => {
                    txn.state.activity = Activity::Fetching;
                    txn.mark_changed();
                    Begin::Start(bounds)
                }
                None => Begin::Exhausted,
            }
        });

        let bounds = match begin {
            Begin::Start(bounds) => bounds,
            Begin::Busy => return Ok(FetchOutcome::Ignored),
            Begin::Exhausted => return Ok(FetchOutcome::Empty),
            Begin::Throttled(remaining) => {
                let err = TimelineError::RateLimited(RateLimitHint::retry_after(remaining));
                tracing::warn!("{}: refresh throttled: {}", self.view, err);
                self.store.report_error(err.to_string());
                return Err(err);
            }
        };

        tracing::debug!(
            "{}: fetching {:?} with {:?}, limit {}",
            self.view,
            kind,
            bounds,
            self.options.page_size
        );
        let in_flight = InFlight {
            store: &*self.store,
            view: &self.view,
            armed: true,
        };
        let fetched = self
            .source
            .fetch(&self.view, bounds, self.options.page_size)
            .await;

        let applied = self.store.transact(&self.view, |txn| -> TimelineResult<FetchOutcome> {
            txn.state.activity = Activity::Idle;
            txn.mark_changed();
            let batch = fetched?;

            let outcome = match kind {
                FetchKind::Select => {
                    let count = batch.len();
                    txn.state.timeline.replace(batch)?;
                    txn.state.position = Default::default();
                    if !txn.is_active {
                        txn.forget_cached_position();
                    }
                    FetchOutcome::Loaded { count }
                }
                _ if batch.is_empty() => FetchOutcome::Empty,
                FetchKind::Newer => {
                    let had_items = !txn.state.timeline.is_empty();
                    let count = txn.state.timeline.merge_newer(batch)?;
                    // Keep the same items under the window after the prepend.
                    if had_items {
                        txn.state.position.cursor += count;
                        if !txn.is_active {
                            txn.shift_cached_cursor(count);
                        }
                    }
                    FetchOutcome::Merged {
                        direction: FetchDirection::Newer,
                        count,
                    }
                }
                FetchKind::Older => {
                    let count = txn.state.timeline.merge_older(batch)?;
                    FetchOutcome::Merged {
                        direction: FetchDirection::Older,
                        count,
                    }
                }
            };
            // Only a newer-fetch that was accepted starts the cool-down
            if kind == FetchKind::Newer {
                txn.state.mark_refreshed(Instant::now());
            }
            let size = txn.window_size;
            txn.state.settle(size);
            Ok(outcome)
        });
        in_flight.disarm();

        match &applied {
            Ok(outcome) => {
                tracing::info!("{}: {}", self.view, outcome.describe());
                self.store
                    .report_success(format!("{}: {}", self.view.label(), outcome.describe()));
            }
            Err(err @ TimelineError::InvariantViolation(_)) => {
                tracing::error!("{}: rejected fetch result: {}", self.view, err);
            }
            Err(err) => {
                tracing::warn!("{}: fetch failed: {}", self.view, err);
                self.store.report_error(err.to_string());
            }
        }
        applied
    }
}
