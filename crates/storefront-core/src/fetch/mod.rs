// ── Search result fetching ──

pub mod collection;
pub mod controller;
pub mod status;

pub use collection::ProductCollection;
pub use controller::{FetchIntent, FetchState, ProductFetchController};
pub use status::FetchStatus;
