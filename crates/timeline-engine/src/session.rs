use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use timeline_core::{AppConfig, Position, TimelineError, TimelineResult, WindowSize};
use timeline_domain::{NavIntent, TimelineSource, ViewKind};

use crate::engine::{EngineOptions, PaginationEngine};
use crate::status::{FetchOutcome, NavOutcome, StatusLine};
use crate::store::{Activation, TimelineStore, ViewSnapshot};

/// What switching to a view did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "switch", rename_all = "snake_case")]
pub enum SwitchOutcome {
    Unchanged,
    /// Previously visited view, put back where the user left it.
    Restored { position: Position },
    /// First visit: the initial page was fetched.
    Loaded { fetch: FetchOutcome },
}

/// All views of one client, sharing a store, a source and a window size.
pub struct Session<S: TimelineSource> {
    source: Arc<S>,
    store: Arc<TimelineStore<S::Item>>,
    config: AppConfig,
    engines: Mutex<HashMap<ViewKind, Arc<PaginationEngine<S>>>>,
}

impl<S: TimelineSource> Session<S> {
    pub fn new(source: S, config: AppConfig) -> Self {
        let store = Arc::new(TimelineStore::new(config.effective_window_size()));
        Self::with_store(Arc::new(source), store, config)
    }

    pub fn with_store(
        source: Arc<S>,
        store: Arc<TimelineStore<S::Item>>,
        config: AppConfig,
    ) -> Self {
        Self {
            source,
            store,
            config,
            engines: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn store(&self) -> &Arc<TimelineStore<S::Item>> {
        &self.store
    }

    pub fn active_view(&self) -> Option<ViewKind> {
        self.store.active_view()
    }

    /// The engine for `view`, created on first use.
    pub fn engine(&self, view: &ViewKind) -> Arc<PaginationEngine<S>> {
        self.engines
            .lock()
            .entry(view.clone())
            .or_insert_with(|| {
                Arc::new(PaginationEngine::new(
                    view.clone(),
                    Arc::clone(&self.source),
                    Arc::clone(&self.store),
                    EngineOptions::for_view(&self.config, view),
                ))
            })
            .clone()
    }

    fn active_engine(&self) -> TimelineResult<Arc<PaginationEngine<S>>> {
        self.active_view()
            .map(|view| self.engine(&view))
            .ok_or_else(|| TimelineError::NotFound("no active view".to_string()))
    }

    /// Make `view` active: restore its cached position if it has data,
    /// otherwise run its initial fetch.
    pub async fn switch_to(&self, view: ViewKind) -> TimelineResult<SwitchOutcome> {
        match self.store.activate(&view) {
            Activation::AlreadyActive => Ok(SwitchOutcome::Unchanged),
            Activation::Restored(position) => Ok(SwitchOutcome::Restored { position }),
            Activation::NeedsLoad => {
                let fetch = self.engine(&view).select_or_reset().await?;
                Ok(SwitchOutcome::Loaded { fetch })
            }
        }
    }

    pub async fn navigate(&self, intent: NavIntent) -> TimelineResult<NavOutcome> {
        self.active_engine()?.navigate(intent).await
    }

    /// Throw away the active view's timeline and load the latest page.
    pub async fn reselect(&self) -> TimelineResult<FetchOutcome> {
        self.active_engine()?.select_or_reset().await
    }

    pub async fn refresh(&self) -> TimelineResult<FetchOutcome> {
        self.active_engine()?.fetch_newer().await
    }

    pub fn grow_window(&self) -> WindowSize {
        self.store.grow_window()
    }

    pub fn shrink_window(&self) -> WindowSize {
        self.store.shrink_window()
    }

    pub fn status(&self) -> StatusLine {
        self.store.status()
    }

    pub fn snapshot(&self) -> Option<ViewSnapshot<S::Item>> {
        self.active_view().and_then(|view| self.store.get(&view))
    }
}
