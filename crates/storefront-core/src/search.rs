// ── Search screen glue ──
//
// Translates user gestures into controller work and derives what the
// screen should draw. Holds only UI-local state (search text, modal
// visibility); everything else is read from the controller.

use std::sync::Arc;

use crate::fetch::{FetchIntent, FetchState, ProductFetchController};
use crate::model::{FilterSelection, FilterState, Product};
use crate::source::ProductDataSource;

/// Distance from the end of the content at which load-more triggers.
pub const DEFAULT_NEAR_END_PADDING: f64 = 20.0;

/// Scroll position of the result list, in layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub offset: f64,
    pub viewport: f64,
    pub content: f64,
}

impl ScrollMetrics {
    /// `offset + viewport >= content - padding`.
    pub fn is_near_end(&self, padding: f64) -> bool {
        self.offset + self.viewport >= self.content - padding
    }
}

/// User gestures the search screen reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Screen shown for the first time.
    Mounted,
    /// Screen regained focus, possibly with a category from navigation.
    Focused { category: Option<String> },
    TextChanged(String),
    Submit,
    Scrolled(ScrollMetrics),
    OpenFilter,
    DismissFilter,
    ApplyFilter(FilterSelection),
    ResetFilter,
    PullToRefresh,
    DismissError,
}

/// Main area of the screen: exactly one of these is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchBody {
    Skeleton,
    Grid(Vec<Arc<Product>>),
}

/// Render contract for one frame of the search screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub body: SearchBody,
    /// Footer spinner, only while loading more.
    pub show_spinner: bool,
    /// "No more items" notice.
    pub show_end_notice: bool,
    /// Empty-results message.
    pub show_empty: bool,
    /// Error banner text.
    pub error: Option<String>,
    pub refreshing: bool,
    pub filter_modal: bool,
    pub filter: FilterState,
}

impl SearchView {
    /// Derive the view from controller state plus modal visibility.
    pub fn from_state(state: &FetchState, filter_modal: bool) -> Self {
        let in_flight = state.status.is_in_flight();
        let error = state.error().map(str::to_owned);
        let body = if state.loading() || !state.loaded {
            SearchBody::Skeleton
        } else {
            SearchBody::Grid(state.items().to_vec())
        };
        Self {
            body,
            show_spinner: state.is_loading_more(),
            show_end_notice: state.loaded && !state.has_more && !in_flight && error.is_none(),
            show_empty: state.loaded
                && !in_flight
                && state.products.is_empty()
                && error.is_none(),
            error,
            refreshing: state.refreshing(),
            filter_modal,
            filter: state.filter.clone(),
        }
    }
}

/// Interaction state for one search screen.
pub struct SearchScreen<S> {
    controller: ProductFetchController<S>,
    initial_category: Option<String>,
    text: String,
    filter_modal: bool,
    near_end_padding: f64,
}

impl<S: ProductDataSource> SearchScreen<S> {
    /// `initial_category` seeds the filter used by [`SearchEvent::Mounted`].
    pub fn new(controller: ProductFetchController<S>, initial_category: Option<String>) -> Self {
        Self {
            controller,
            initial_category,
            text: String::new(),
            filter_modal: false,
            near_end_padding: DEFAULT_NEAR_END_PADDING,
        }
    }

    #[must_use]
    pub fn with_near_end_padding(mut self, padding: f64) -> Self {
        self.near_end_padding = padding;
        self
    }

    pub fn controller(&self) -> &ProductFetchController<S> {
        &self.controller
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn filter_open(&self) -> bool {
        self.filter_modal
    }

    /// Update local state for `event` and return the fetch work it asks
    /// for, if any. The caller runs the intent (inline or spawned).
    pub fn handle(&mut self, event: SearchEvent) -> Option<FetchIntent> {
        match event {
            SearchEvent::Mounted => {
                let filter = match self.initial_category {
                    Some(ref category) => FilterState::for_category(category.clone()),
                    None => FilterState::default(),
                };
                Some(FetchIntent::Load(filter))
            }
            SearchEvent::Focused { category } => {
                let category = category?;
                let filter = self.controller.filter().merge(&FilterSelection {
                    category: Some(category),
                    sort: None,
                });
                Some(FetchIntent::Load(filter))
            }
            SearchEvent::TextChanged(text) => {
                self.text = text;
                None
            }
            SearchEvent::Submit => {
                let filter = self.controller.filter().with_keyword(&self.text);
                Some(FetchIntent::Load(filter))
            }
            SearchEvent::Scrolled(metrics) => {
                let busy = self.controller.status().is_in_flight();
                (metrics.is_near_end(self.near_end_padding) && !busy)
                    .then_some(FetchIntent::LoadMore)
            }
            SearchEvent::OpenFilter => {
                self.filter_modal = true;
                None
            }
            SearchEvent::DismissFilter => {
                self.filter_modal = false;
                None
            }
            SearchEvent::ApplyFilter(selection) => {
                self.filter_modal = false;
                Some(FetchIntent::Load(self.controller.filter().merge(&selection)))
            }
            SearchEvent::ResetFilter => {
                self.filter_modal = false;
                Some(FetchIntent::Load(FilterState::default()))
            }
            SearchEvent::PullToRefresh => Some(FetchIntent::Refresh),
            SearchEvent::DismissError => {
                self.controller.dismiss_error();
                None
            }
        }
    }

    /// Handle `event` and run any resulting fetch to completion.
    pub async fn apply(&mut self, event: SearchEvent) {
        if let Some(intent) = self.handle(event) {
            self.controller.dispatch(intent).await;
        }
    }

    pub fn view(&self) -> SearchView {
        SearchView::from_state(&self.controller.snapshot(), self.filter_modal)
    }
}
