// ── Product fetch controller ──
//
// Owns the filter, the accumulated product collection and the fetch
// status for one search screen. All state lives in a `watch` channel;
// every transition runs inside `send_if_modified`, so the "is this
// allowed?" check and the state change happen under the same lock.
//
// Each load/refresh bumps a generation number. A response commits only
// if its generation is still current and the controller is not closed.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::collection::ProductCollection;
use super::status::FetchStatus;
use crate::error::CoreError;
use crate::model::{FilterState, Product, ProductPage};
use crate::source::ProductDataSource;

// ── State snapshot ───────────────────────────────────────────────

/// Everything a front end needs to render the result list.
#[derive(Debug, Clone, Default)]
pub struct FetchState {
    /// Filter of the last committed page (page 1 during a fresh load).
    pub filter: FilterState,
    pub products: ProductCollection,
    pub has_more: bool,
    pub status: FetchStatus,
    /// A first page (or its failure) has committed at least once.
    pub loaded: bool,
    pub(crate) generation: u64,
}

impl FetchState {
    pub fn items(&self) -> &[Arc<Product>] {
        self.products.as_slice()
    }

    pub fn loading(&self) -> bool {
        self.status.loading()
    }

    pub fn is_loading_more(&self) -> bool {
        self.status.is_loading_more()
    }

    pub fn refreshing(&self) -> bool {
        self.status.refreshing()
    }

    pub fn error(&self) -> Option<&str> {
        self.status.error()
    }

    /// Last page that was committed.
    pub fn page(&self) -> u32 {
        self.filter.page()
    }
}

/// A unit of fetch work, for handing to a spawned task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchIntent {
    Load(FilterState),
    LoadMore,
    Refresh,
}

// ── Controller ───────────────────────────────────────────────────

/// Orchestrates initial load, refresh and incremental load-more.
///
/// Cheaply cloneable; clones share state. Not meant to be shared across
/// screens: each search screen owns its own controller.
pub struct ProductFetchController<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    source: S,
    state: watch::Sender<FetchState>,
    cancel: CancellationToken,
}

impl<S> Clone for ProductFetchController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ProductDataSource> ProductFetchController<S> {
    pub fn new(source: S) -> Self {
        Self::with_filter(source, FilterState::default())
    }

    /// Controller whose baseline filter is `filter` (page forced to 1).
    /// Nothing is fetched until a load is requested.
    pub fn with_filter(source: S, filter: FilterState) -> Self {
        let (state, _) = watch::channel(FetchState {
            filter: filter.first_page(),
            ..FetchState::default()
        });
        Self {
            inner: Arc::new(Inner {
                source,
                state,
                cancel: CancellationToken::new(),
            }),
        }
    }

    // ── Observation ──────────────────────────────────────────────

    pub fn snapshot(&self) -> FetchState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.inner.state.subscribe()
    }

    pub fn status(&self) -> FetchStatus {
        self.inner.state.borrow().status.clone()
    }

    pub fn filter(&self) -> FilterState {
        self.inner.state.borrow().filter.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Tear down: in-flight fetches are abandoned and nothing commits
    /// afterwards.
    pub fn close(&self) {
        self.inner.cancel.cancel();
        debug!("fetch controller closed");
    }

    pub async fn dispatch(&self, intent: FetchIntent) {
        match intent {
            FetchIntent::Load(filter) => self.load_products(filter).await,
            FetchIntent::LoadMore => self.load_more().await,
            FetchIntent::Refresh => self.refresh().await,
        }
    }

    // ── Operations ───────────────────────────────────────────────

    /// Replace the collection with page 1 of `filter`.
    ///
    /// Supersedes any fetch in flight. On failure the collection is
    /// left empty and the status carries the message.
    pub async fn load_products(&self, filter: FilterState) {
        let filter = filter.first_page();
        let Some(generation) = self.begin(|state| {
            state.filter = filter.clone();
            state.products.clear();
            state.has_more = false;
            state.status = FetchStatus::InitialLoading;
        }) else {
            return;
        };
        debug!(generation, category = ?filter.category, "loading products");

        let Some(result) = self.fetch(&filter).await else {
            return;
        };
        self.commit_first_page(generation, result);
    }

    /// Re-fetch page 1 of the current filter, replacing the collection
    /// once the response arrives.
    pub async fn refresh(&self) {
        let mut filter = FilterState::default();
        let Some(generation) = self.begin(|state| {
            state.filter = state.filter.first_page();
            state.status = FetchStatus::Refreshing;
            filter = state.filter.clone();
        }) else {
            return;
        };
        debug!(generation, "refreshing products");

        let Some(result) = self.fetch(&filter).await else {
            return;
        };
        self.commit_first_page(generation, result);
    }

    /// Append the next page. No-op unless idle with more pages to load.
    pub async fn load_more(&self) {
        let mut claimed = None;
        let cancelled = self.inner.cancel.is_cancelled();
        self.inner.state.send_if_modified(|state| {
            if cancelled || !state.status.is_idle() || !state.has_more {
                return false;
            }
            state.status = FetchStatus::LoadingMore;
            claimed = Some((state.generation, state.filter.next_page()));
            true
        });
        let Some((generation, next)) = claimed else {
            debug!("load_more ignored");
            return;
        };
        debug!(generation, page = next.page(), "loading more products");

        let Some(result) = self.fetch(&next).await else {
            return;
        };
        let committed = self.commit(generation, |state| match result {
            Ok(page) => {
                let added = state.products.extend(page.items);
                debug!(page = next.page(), added, has_more = page.has_more, "page appended");
                state.has_more = page.has_more;
                state.filter = next;
                state.status = FetchStatus::Idle;
            }
            Err(e) => {
                warn!(error = %e, page = next.page(), "load more failed");
                state.status = FetchStatus::Error(e.to_string());
            }
        });
        if !committed {
            debug!(generation, "discarded stale page");
        }
    }

    /// Clear an error so a failed `load_more` can be retried.
    /// Items and page are kept.
    pub fn dismiss_error(&self) {
        self.inner.state.send_if_modified(|state| {
            if state.status.error().is_none() {
                return false;
            }
            state.status = FetchStatus::Idle;
            true
        });
    }

    // ── Internals ────────────────────────────────────────────────

    /// Start a superseding fetch: bump the generation and apply `start`.
    /// Returns the new generation, or `None` once closed.
    fn begin(&self, start: impl FnOnce(&mut FetchState)) -> Option<u64> {
        if self.inner.cancel.is_cancelled() {
            return None;
        }
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            start(state);
        });
        Some(generation)
    }

    /// Race the data source against `close()`.
    async fn fetch(&self, filter: &FilterState) -> Option<Result<ProductPage, CoreError>> {
        tokio::select! {
            biased;
            () = self.inner.cancel.cancelled() => None,
            result = self.inner.source.fetch_page(filter) => Some(result),
        }
    }

    fn commit_first_page(&self, generation: u64, result: Result<ProductPage, CoreError>) {
        let committed = self.commit(generation, |state| match result {
            Ok(page) => {
                debug!(items = page.items.len(), has_more = page.has_more, "first page loaded");
                state.products.replace(page.items);
                state.has_more = page.has_more;
                state.status = FetchStatus::Idle;
                state.loaded = true;
            }
            Err(e) => {
                warn!(error = %e, "product load failed");
                state.products.clear();
                state.has_more = false;
                state.status = FetchStatus::Error(e.to_string());
                state.loaded = true;
            }
        });
        if !committed {
            debug!(generation, "discarded stale first page");
        }
    }

    /// Apply `apply` only if `generation` is current and not closed.
    fn commit(&self, generation: u64, apply: impl FnOnce(&mut FetchState)) -> bool {
        let cancel = &self.inner.cancel;
        self.inner.state.send_if_modified(|state| {
            if cancel.is_cancelled() || state.generation != generation {
                return false;
            }
            apply(state);
            true
        })
    }
}
