// ── Home screen categories ──
//
// Loads the category list once and produces the navigation payload that
// seeds a search screen.

use tracing::warn;

use crate::model::Category;
use crate::source::CategoryDataSource;

/// Loaded categories plus load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for CategoryState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

impl CategoryState {
    /// The home view shows placeholders while loading and after a failure.
    pub fn show_skeleton(&self) -> bool {
        self.loading || self.error.is_some()
    }
}

/// One-shot category loader for the home screen.
pub struct CategoryList<S> {
    source: S,
    state: CategoryState,
}

impl<S: CategoryDataSource> CategoryList<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: CategoryState::default(),
        }
    }

    /// Fetch categories; `loading` is cleared on success and failure.
    pub async fn load(&mut self) -> &CategoryState {
        self.state.loading = true;
        match self.source.fetch_categories().await {
            Ok(categories) => {
                self.state.categories = categories;
                self.state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "category load failed");
                self.state.error = Some(e.to_string());
            }
        }
        self.state.loading = false;
        &self.state
    }

    pub fn state(&self) -> &CategoryState {
        &self.state
    }

    pub fn into_state(self) -> CategoryState {
        self.state
    }
}

/// Navigation payload for the search screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRoute {
    pub category: Option<String>,
}

/// Route that opens search filtered to `category`. Names are lowercased.
pub fn category_route(category: &Category) -> SearchRoute {
    SearchRoute {
        category: Some(category.name.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    struct Fixed(Result<Vec<Category>, String>);

    impl CategoryDataSource for Fixed {
        async fn fetch_categories(&self) -> Result<Vec<Category>, CoreError> {
            self.0.clone().map_err(|message| CoreError::Api {
                message,
                status: Some(500),
            })
        }
    }

    fn category(name: &str) -> Category {
        Category {
            id: name.to_lowercase(),
            name: name.into(),
            image_url: None,
        }
    }

    #[test]
    fn starts_loading_with_skeleton() {
        let state = CategoryState::default();
        assert!(state.loading);
        assert!(state.show_skeleton());
    }

    #[tokio::test]
    async fn success_keeps_service_order() {
        let mut list = CategoryList::new(Fixed(Ok(vec![category("Shoes"), category("Bags")])));
        let state = list.load().await;

        assert!(!state.loading);
        assert!(!state.show_skeleton());
        let names: Vec<_> = state.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Shoes", "Bags"]);
    }

    #[tokio::test]
    async fn failure_keeps_skeleton_and_records_message() {
        let mut list = CategoryList::new(Fixed(Err("categories unavailable".into())));
        let state = list.load().await.clone();

        assert!(!state.loading);
        assert!(state.show_skeleton());
        assert_eq!(state.error.as_deref(), Some("categories unavailable"));
    }

    #[test]
    fn route_lowercases_the_name() {
        let route = category_route(&category("Running Shoes"));
        assert_eq!(route.category.as_deref(), Some("running shoes"));
    }
}
