// ── Search constraints ──
//
// FilterState is the value object every product query is built from.
// Absent fields mean "unconstrained"; the page number is always >= 1.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Result ordering offered by the storefront.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SortOrder {
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl SortOrder {
    /// Human-readable label for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::PriceAsc => "Price: low to high",
            Self::PriceDesc => "Price: high to low",
            Self::Name => "Name",
        }
    }
}

/// The fields a user can change in the filter modal.
///
/// `None` means "left untouched", not "cleared".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub category: Option<String>,
    pub sort: Option<SortOrder>,
}

/// Constraints narrowing a product query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawFilterState")]
pub struct FilterState {
    pub category: Option<String>,
    pub sort: Option<SortOrder>,
    pub keyword: Option<String>,
    page: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            sort: None,
            keyword: None,
            page: 1,
        }
    }
}

/// Wire form; a missing or zero page becomes page 1.
#[derive(Deserialize)]
struct RawFilterState {
    category: Option<String>,
    sort: Option<SortOrder>,
    keyword: Option<String>,
    #[serde(default)]
    page: u32,
}

impl From<RawFilterState> for FilterState {
    fn from(raw: RawFilterState) -> Self {
        Self {
            category: raw.category,
            sort: raw.sort,
            keyword: raw.keyword,
            page: raw.page.max(1),
        }
    }
}

impl FilterState {
    /// Unconstrained filter seeded with a category, e.g. from navigation.
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    /// Same page, category replaced.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Same page, sort replaced.
    pub fn with_sort(mut self, sort: Option<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Same constraints, explicit page. Zero is clamped to 1.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Same constraints, page 1.
    pub fn first_page(&self) -> Self {
        self.with_page(1)
    }

    /// Same constraints, the page after this one.
    pub fn next_page(&self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    /// Apply search text as the keyword. Blank text clears it.
    pub fn with_keyword(&self, text: &str) -> Self {
        let trimmed = text.trim();
        Self {
            keyword: (!trimmed.is_empty()).then(|| trimmed.to_owned()),
            ..self.first_page()
        }
    }

    /// Merge the fields the user actually changed; resets to page 1.
    pub fn merge(&self, selection: &FilterSelection) -> Self {
        let mut merged = self.first_page();
        if let Some(ref category) = selection.category {
            merged.category = Some(category.clone());
        }
        if let Some(sort) = selection.sort {
            merged.sort = Some(sort);
        }
        merged
    }

    /// Whether any constraint besides the page is set.
    pub fn is_constrained(&self) -> bool {
        self.category.is_some() || self.sort.is_some() || self.keyword.is_some()
    }
}
