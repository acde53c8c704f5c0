// ── Domain model ──
//
// Canonical types shared by the fetch controller, the search screen
// glue and the front ends.

pub mod catalog;
pub mod filter;
pub mod product_id;
pub mod user;

pub use catalog::{Category, Product, ProductPage};
pub use filter::{FilterSelection, FilterState, SortOrder};
pub use product_id::ProductId;
pub use user::{Session, User};
