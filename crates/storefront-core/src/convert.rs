// ── API-to-domain type conversions ──
//
// Bridges raw `storefront_api` response types into canonical
// `storefront_core::model` domain types, and filters into queries.

use storefront_api::{
    CategoryResponse, LoginResponse, ProductListResponse, ProductQuery, ProductResponse,
    UserResponse,
};

use crate::model::{Category, FilterState, Product, ProductId, ProductPage, Session, User};

/// Treat empty strings from the service as absent.
fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

impl From<ProductResponse> for Product {
    fn from(p: ProductResponse) -> Self {
        Self {
            id: ProductId::from(p.id),
            name: p.name,
            price: p.price,
            description: non_empty(p.description),
            category: non_empty(p.category),
            image_url: non_empty(p.image_url),
        }
    }
}

impl From<CategoryResponse> for Category {
    fn from(c: CategoryResponse) -> Self {
        Self {
            id: c.id,
            name: c.name,
            image_url: non_empty(c.image_url),
        }
    }
}

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        Self {
            id: u.id,
            name: non_empty(u.name),
            email: u.email,
        }
    }
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            user: resp.user.into(),
            token: resp.token.into(),
        }
    }
}

/// Build the wire query for `filter` at the given page size.
pub(crate) fn product_query(filter: &FilterState, limit: u32) -> ProductQuery {
    ProductQuery {
        page: filter.page(),
        limit,
        category: filter.category.clone(),
        sort: filter.sort.map(|s| s.to_string()),
        keyword: filter.keyword.clone(),
    }
}

/// Decode one page of results for the request that produced it.
pub(crate) fn product_page(resp: ProductListResponse, filter: &FilterState, limit: u32) -> ProductPage {
    let has_more = resp.has_more_after(filter.page(), limit);
    ProductPage {
        items: resp.products.into_iter().map(Product::from).collect(),
        has_more,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortOrder;

    #[test]
    fn query_carries_every_constraint() {
        let filter = FilterState::for_category("shoes")
            .with_sort(Some(SortOrder::PriceAsc))
            .with_keyword("boots")
            .with_page(3);

        let query = product_query(&filter, 20);

        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 20);
        assert_eq!(query.category.as_deref(), Some("shoes"));
        assert_eq!(query.sort.as_deref(), Some("price-asc"));
        assert_eq!(query.keyword.as_deref(), Some("boots"));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let product = Product::from(ProductResponse {
            id: "p1".into(),
            name: "Runner".into(),
            price: 10.0,
            description: Some(String::new()),
            category: Some("  ".into()),
            image_url: None,
        });
        assert_eq!(product.id.as_str(), "p1");
        assert!(product.description.is_none());
        assert!(product.category.is_none());
    }
}
