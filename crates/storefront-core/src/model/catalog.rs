// ── Catalog domain types ──

use serde::{Deserialize, Serialize};

use super::product_id::ProductId;

/// A product listed by the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    /// Category name, when the service reports it.
    pub category: Option<String>,
    pub image_url: Option<String>,
}

/// One batch of results plus whether more exist after it.
///
/// `items` keep the order the service returned them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub has_more: bool,
}

/// A browsable product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
}
