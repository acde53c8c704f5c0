// Wire types for the storefront REST service.
//
// Field names follow the service's JSON (`_id`, `imageURL`, `hasMore`);
// Rust names are snake_case via serde renames.

use serde::{Deserialize, Serialize};

// ── Products ─────────────────────────────────────────────────────────

/// A product as returned by `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
}

/// One page of `GET /products`.
///
/// The service reports pagination either as an explicit `hasMore` flag or
/// as a `total` count; see [`has_more_after`](Self::has_more_after).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<ProductResponse>,
    #[serde(rename = "hasMore", default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl ProductListResponse {
    /// Whether another page exists after this one.
    ///
    /// Prefers `hasMore`; falls back to `total`, and finally to "the page
    /// came back full".
    pub fn has_more_after(&self, page: u32, limit: u32) -> bool {
        if let Some(flag) = self.has_more {
            return flag;
        }
        let len = u64::try_from(self.products.len()).unwrap_or(u64::MAX);
        match self.total {
            Some(total) => {
                let seen = u64::from(page.saturating_sub(1)) * u64::from(limit) + len;
                seen < total
            }
            None => limit > 0 && len >= u64::from(limit),
        }
    }
}

/// Query parameters for `GET /products`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub page: u32,
    pub limit: u32,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub keyword: Option<String>,
}

impl ProductQuery {
    /// Render as URL query pairs, omitting unconstrained fields.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.max(1).to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(ref category) = self.category {
            params.push(("category", category.clone()));
        }
        if let Some(ref sort) = self.sort {
            params.push(("sort", sort.clone()));
        }
        if let Some(ref keyword) = self.keyword {
            params.push(("keyword", keyword.clone()));
        }
        params
    }
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryListResponse {
    #[serde(default)]
    pub categories: Vec<CategoryResponse>,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(n: usize) -> ProductListResponse {
        ProductListResponse {
            products: (0..n)
                .map(|i| ProductResponse {
                    id: format!("p{i}"),
                    name: format!("Product {i}"),
                    price: 1.0,
                    description: None,
                    category: None,
                    image_url: None,
                })
                .collect(),
            has_more: None,
            total: None,
        }
    }

    #[test]
    fn explicit_flag_wins_over_total() {
        let mut page = page_of(20);
        page.has_more = Some(false);
        page.total = Some(1_000);
        assert!(!page.has_more_after(1, 20));
    }

    #[test]
    fn total_count_drives_has_more() {
        let mut page = page_of(20);
        page.total = Some(45);
        assert!(page.has_more_after(2, 20));

        let mut last = page_of(5);
        last.total = Some(45);
        assert!(!last.has_more_after(3, 20));
    }

    #[test]
    fn short_page_means_no_more_without_metadata() {
        assert!(page_of(20).has_more_after(1, 20));
        assert!(!page_of(7).has_more_after(1, 20));
    }

    #[test]
    fn query_omits_unconstrained_fields() {
        let query = ProductQuery {
            page: 0,
            limit: 20,
            category: Some("shoes".into()),
            ..ProductQuery::default()
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
                ("category", "shoes".to_string()),
            ]
        );
    }

    #[test]
    fn product_uses_wire_field_names() {
        let product: ProductResponse = serde_json::from_str(
            r#"{"_id":"abc","name":"Runner","price":59.5,"imageURL":"https://img/1.png"}"#,
        )
        .expect("valid product json");
        assert_eq!(product.id, "abc");
        assert_eq!(product.image_url.as_deref(), Some("https://img/1.png"));
        assert!(product.category.is_none());
    }
}
