//! All possible UI actions. Actions are the sole mechanism for state mutation.

use storefront_core::{CategoryState, SearchRoute};

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    /// Show the search screen, seeded with the route's category.
    OpenSearch(SearchRoute),

    // ── Data ──────────────────────────────────────────────────────
    ReloadCategories,
    CategoriesLoaded(CategoryState),
    /// The product controller published a new snapshot.
    ProductsChanged,

    // ── Help ──────────────────────────────────────────────────────
    ToggleHelp,
}
