// ── Accumulated product collection ──
//
// Ordered storage with an id index so appended pages never introduce a
// product twice. The first occurrence of an id wins.

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::{Product, ProductId};

/// Ordered, de-duplicated list of products across loaded pages.
///
/// Items are `Arc`-wrapped so state snapshots clone pointers, not records.
#[derive(Debug, Clone, Default)]
pub struct ProductCollection {
    items: Vec<Arc<Product>>,
    ids: HashSet<ProductId>,
}

impl ProductCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with a fresh first page.
    pub(crate) fn replace(&mut self, items: Vec<Product>) {
        self.clear();
        self.extend(items);
    }

    /// Append in arrival order, skipping ids already present.
    /// Returns how many items were actually added.
    pub(crate) fn extend(&mut self, items: Vec<Product>) -> usize {
        let before = self.items.len();
        for product in items {
            if self.ids.insert(product.id.clone()) {
                self.items.push(Arc::new(product));
            }
        }
        self.items.len() - before
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn as_slice(&self) -> &[Arc<Product>] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ProductCollection {
    type Item = &'a Arc<Product>;
    type IntoIter = std::slice::Iter<'a, Arc<Product>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.into(),
            price: 1.0,
            description: None,
            category: None,
            image_url: None,
        }
    }

    #[test]
    fn extend_skips_known_ids_and_keeps_first() {
        let mut col = ProductCollection::new();
        col.replace(vec![product("a", "first"), product("b", "b")]);

        let added = col.extend(vec![product("a", "second"), product("c", "c")]);

        assert_eq!(added, 1);
        let names: Vec<_> = col.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["first", "b", "c"]);
    }

    #[test]
    fn duplicates_within_one_page_are_dropped() {
        let mut col = ProductCollection::new();
        col.replace(vec![product("a", "x"), product("a", "y")]);
        assert_eq!(col.len(), 1);
        assert_eq!(col.as_slice()[0].name, "x");
    }

    #[test]
    fn replace_forgets_previous_ids() {
        let mut col = ProductCollection::new();
        col.replace(vec![product("a", "old")]);
        col.replace(vec![product("b", "b")]);
        assert!(!col.contains(&ProductId::from("a")));

        col.extend(vec![product("a", "new")]);
        assert_eq!(col.len(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut col = ProductCollection::new();
        col.replace(vec![product("a", "a")]);
        col.clear();
        assert!(col.is_empty());
        assert!(!col.contains(&ProductId::from("a")));
    }
}
