//! Explicit state store for every view.
//!
//! All view state lives behind one lock so a fetch result (timeline merge,
//! cursor shift, focus clamp) is applied as a single transition. Derived values
//! such as the display window and cursor tokens are computed on read.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use timeline_core::{Identified, Position, WindowInfo, WindowSize};
use timeline_domain::{CursorTokens, PositionCache, ViewKind};
use tokio::sync::broadcast;

use crate::status::StatusLine;
use crate::view_state::ViewState;

const EVENT_CAPACITY: usize = 64;

/// Change notifications for subscribers (usually the renderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    ViewChanged(ViewKind),
    Activated(ViewKind),
    WindowResized(WindowSize),
    StatusChanged,
}

/// Result of making a view the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    AlreadyActive,
    /// The view had data; its cached position was put back.
    Restored(Position),
    /// The view has never been loaded and needs its initial fetch.
    NeedsLoad,
}

/// Read-only projection of one view, computed at read time.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot<T> {
    pub view: ViewKind,
    pub window: Vec<T>,
    pub position: Position,
    pub focused: Option<T>,
    pub tokens: CursorTokens,
    pub info: WindowInfo,
    pub loaded: usize,
    pub fetching: bool,
}

/// Mutable access to one view inside a store transaction.
pub struct ViewTransaction<'a, T> {
    pub state: &'a mut ViewState<T>,
    pub window_size: WindowSize,
    pub is_active: bool,
    view: &'a ViewKind,
    positions: &'a mut PositionCache,
    changed: bool,
}

impl<T> ViewTransaction<'_, T> {
    /// Flag the view as modified; subscribers hear about it once the
    /// transaction ends.
    pub fn mark_changed(&mut self) {
        self.changed = true;
    }

    /// Shift the cached position of an inactive view after a prepend, so
    /// restoring it lands on the same items.
    pub fn shift_cached_cursor(&mut self, by: usize) {
        if let Some(mut position) = self.positions.restore(self.view) {
            position.cursor += by;
            self.positions.save(self.view, position);
        }
    }

    /// Drop the cached position of an inactive view whose timeline was
    /// replaced, so its next activation starts at the top.
    pub fn forget_cached_position(&mut self) {
        self.positions.forget(self.view);
    }
}

struct StoreInner<T> {
    views: HashMap<ViewKind, ViewState<T>>,
    active: Option<ViewKind>,
    window_size: WindowSize,
    status: StatusLine,
    positions: PositionCache,
}

pub struct TimelineStore<T> {
    inner: Mutex<StoreInner<T>>,
    events: broadcast::Sender<StoreEvent>,
}

impl<T: Identified + Clone> TimelineStore<T> {
    pub fn new(window_size: WindowSize) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Mutex::new(StoreInner {
                views: HashMap::new(),
                active: None,
                window_size,
                status: StatusLine::default(),
                positions: PositionCache::new(),
            }),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    pub fn window_size(&self) -> WindowSize {
        self.inner.lock().window_size
    }

    /// Change the shared window size. Only the active view is clamped now;
    /// the others settle the next time they are read or navigated.
    pub fn set_window_size(&self, size: WindowSize) -> WindowSize {
        {
            let mut inner = self.inner.lock();
            inner.window_size = size;
            if let Some(active) = inner.active.clone() {
                if let Some(state) = inner.views.get_mut(&active) {
                    state.settle(size);
                }
            }
        }
        tracing::debug!("Window size set to {}", size.get());
        self.emit(StoreEvent::WindowResized(size));
        size
    }

    pub fn grow_window(&self) -> WindowSize {
        let mut size = self.window_size();
        size.increment();
        self.set_window_size(size)
    }

    pub fn shrink_window(&self) -> WindowSize {
        let mut size = self.window_size();
        size.decrement();
        self.set_window_size(size)
    }

    pub fn active_view(&self) -> Option<ViewKind> {
        self.inner.lock().active.clone()
    }

    pub fn status(&self) -> StatusLine {
        self.inner.lock().status.clone()
    }

    /// Record a successful operation: clears any error.
    pub fn report_success(&self, message: impl Into<String>) {
        {
            let mut inner = self.inner.lock();
            inner.status.error = None;
            inner.status.message = Some(message.into());
        }
        self.emit(StoreEvent::StatusChanged);
    }

    pub fn report_error(&self, error: impl Into<String>) {
        self.inner.lock().status.error = Some(error.into());
        self.emit(StoreEvent::StatusChanged);
    }

    /// Derived view state, settling the stored position first.
    pub fn get(&self, view: &ViewKind) -> Option<ViewSnapshot<T>> {
        let mut inner = self.inner.lock();
        let size = inner.window_size;
        let state = inner.views.get_mut(view)?;
        state.settle(size);

        let window = state.timeline.window(state.position.cursor, size).to_vec();
        Some(ViewSnapshot {
            view: view.clone(),
            focused: state.focused(size).cloned(),
            window,
            position: state.position,
            tokens: state.timeline.cursor_tokens(),
            info: WindowInfo::compute(state.timeline.len(), state.position.cursor, size),
            loaded: state.timeline.len(),
            fetching: state.is_fetching(),
        })
    }

    /// Run `f` against one view under the store lock, creating the view if
    /// it does not exist yet. `ViewChanged` is emitted only when `f` calls
    /// [`ViewTransaction::mark_changed`].
    pub fn transact<R>(&self, view: &ViewKind, f: impl FnOnce(&mut ViewTransaction<'_, T>) -> R) -> R {
        let (result, changed) = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            let is_active = inner.active.as_ref() == Some(view);
            let mut txn = ViewTransaction {
                state: inner.views.entry(view.clone()).or_default(),
                window_size: inner.window_size,
                is_active,
                view,
                positions: &mut inner.positions,
                changed: false,
            };
            let result = f(&mut txn);
            (result, txn.changed)
        };
        if changed {
            self.emit(StoreEvent::ViewChanged(view.clone()));
        }
        result
    }

    /// Make `view` the active one, caching the outgoing view's position and
    /// restoring the incoming view's.
    pub fn activate(&self, view: &ViewKind) -> Activation {
        let activation = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            if inner.active.as_ref() == Some(view) {
                return Activation::AlreadyActive;
            }

            if let Some(previous) = inner.active.take() {
                if let Some(state) = inner.views.get_mut(&previous) {
                    inner.positions.save(&previous, state.position);
                    state.position = Position::default();
                }
            }

            inner.active = Some(view.clone());
            let size = inner.window_size;
            let state = inner.views.entry(view.clone()).or_default();
            if state.timeline.is_empty() {
                Activation::NeedsLoad
            } else {
                let mut position = inner.positions.restore(view).unwrap_or_default();
                position.clamp_to(state.timeline.len(), size);
                state.position = position;
                Activation::Restored(position)
            }
        };
        tracing::debug!("Activated {} ({:?})", view, activation);
        self.emit(StoreEvent::Activated(view.clone()));
        activation
    }
}
