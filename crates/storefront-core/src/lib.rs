//! Headless storefront logic shared by the CLI and TUI.
//!
//! This crate owns the domain model and the state machines that sit
//! between `storefront-api` and any front end:
//!
//! - **[`ProductFetchController`]** — Owns the [`FilterState`], the
//!   de-duplicated product collection and a [`FetchStatus`]. Runs initial
//!   load, refresh and incremental load-more against a
//!   [`ProductDataSource`], discarding responses that were superseded or
//!   that arrive after [`close()`](ProductFetchController::close).
//!
//! - **[`SearchScreen`]** — Turns user gestures ([`SearchEvent`]) into
//!   [`FetchIntent`]s and derives the [`SearchView`] render contract.
//!
//! - **[`reduce`]** / **[`Authenticator`]** — Pure authentication reducer
//!   and the driver that feeds it from an [`AuthService`].
//!
//! - **[`CategoryList`]** — Home screen category loader and
//!   [`category_route`] navigation payloads.
//!
//! - **[`RemoteCatalog`]** — HTTP-backed implementation of every data
//!   source trait, built from a [`StoreConfig`].

pub mod auth;
pub mod categories;
pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod model;
pub mod search;
pub mod source;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::{AuthEvent, AuthState, Authenticator, reduce};
pub use categories::{CategoryList, CategoryState, SearchRoute, category_route};
pub use config::{Credentials, DEFAULT_PAGE_SIZE, StoreConfig, TlsVerification};
pub use error::CoreError;
pub use fetch::{FetchIntent, FetchState, FetchStatus, ProductCollection, ProductFetchController};
pub use search::{
    DEFAULT_NEAR_END_PADDING, ScrollMetrics, SearchBody, SearchEvent, SearchScreen, SearchView,
};
pub use source::{AuthService, CategoryDataSource, ProductDataSource, RemoteCatalog};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Category, FilterSelection, FilterState, Product, ProductId, ProductPage, Session, SortOrder,
    User,
};
