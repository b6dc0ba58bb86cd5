use std::sync::Arc;

use crate::catalog::collate;
use crate::catalog::product::Product;

/// Products whose name or category contains `term` (case-insensitive),
/// sorted by name. An empty term keeps everything.
pub fn filter_products(products: &[Product], term: &str) -> Vec<Product> {
    let needle = term.to_lowercase();
    let mut matched: Vec<Product> = products
        .iter()
        .filter(|product| matches(product, &needle))
        .cloned()
        .collect();
    matched.sort_by(|left, right| collate::compare(&left.name, &right.name));
    matched
}

/// `needle` must already be lowercase.
fn matches(product: &Product, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(needle)
        || product
            .category
            .as_deref()
            .is_some_and(|category| category.to_lowercase().contains(needle))
}

/// Memoized [`filter_products`]. The result keeps its `Arc` identity until
/// either the source allocation or the term changes, which is what the
/// paginator keys its page reset on.
#[derive(Debug, Clone)]
pub struct FilteredCatalog {
    products: Arc<[Product]>,
    term: String,
    result: Arc<[Product]>,
}

impl FilteredCatalog {
    pub fn new(products: Arc<[Product]>, term: &str) -> Self {
        let result = filter_products(&products, term).into();
        Self {
            products,
            term: term.to_string(),
            result,
        }
    }

    /// Recomputes only when an input changed. Returns whether it did.
    pub fn refresh(&mut self, products: &Arc<[Product]>, term: &str) -> bool {
        if Arc::ptr_eq(&self.products, products) && self.term == term {
            return false;
        }
        self.products = Arc::clone(products);
        self.term = term.to_string();
        self.result = filter_products(&self.products, term).into();
        true
    }

    pub fn set_term(&mut self, term: &str) -> bool {
        let products = Arc::clone(&self.products);
        self.refresh(&products, term)
    }

    pub fn products(&self) -> &Arc<[Product]> {
        &self.products
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn result(&self) -> &Arc<[Product]> {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::{FilteredCatalog, filter_products};
    use crate::catalog::product::Product;
    use proptest::prelude::*;
    use std::sync::Arc;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("1", "Smartphone X", 900.0).with_category("Phones"),
            Product::new("2", "Laptop Air", 1500.0).with_category("Laptops"),
            Product::new("3", "Auriculares", 80.0).with_category("Audio"),
            Product::new("4", "Cargador", 20.0),
            Product::new("5", "phone case", 15.0).with_category("Accessories"),
        ]
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_term_sorts_everything_by_name() {
        let result = filter_products(&catalog(), "");
        assert_eq!(
            names(&result),
            vec!["Auriculares", "Cargador", "Laptop Air", "phone case", "Smartphone X"]
        );
    }

    #[test]
    fn matches_name_or_category_ignoring_case() {
        let result = filter_products(&catalog(), "PHONE");
        assert_eq!(names(&result), vec!["phone case", "Smartphone X"]);

        let by_category = filter_products(&catalog(), "audio");
        assert_eq!(names(&by_category), vec!["Auriculares"]);
    }

    #[test]
    fn missing_category_never_matches_category_terms() {
        let result = filter_products(&catalog(), "accessories");
        assert_eq!(names(&result), vec!["phone case"]);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_products(&catalog(), "television").is_empty());
    }

    #[test]
    fn cache_keeps_identity_until_inputs_change() {
        let products: Arc<[Product]> = catalog().into();
        let mut view = FilteredCatalog::new(Arc::clone(&products), "");
        let first = Arc::clone(view.result());

        assert!(!view.refresh(&products, ""));
        assert!(Arc::ptr_eq(&first, view.result()));

        assert!(view.refresh(&products, "lap"));
        assert!(!Arc::ptr_eq(&first, view.result()));
        assert_eq!(names(view.result()), vec!["Laptop Air"]);

        let reloaded: Arc<[Product]> = catalog().into();
        assert!(view.refresh(&reloaded, "lap"));
    }

    fn arb_product() -> impl Strategy<Value = Product> {
        (
            "[a-zA-Z ]{0,12}",
            proptest::option::of("[a-zA-Z]{0,8}"),
            0u32..1000,
        )
            .prop_map(|(name, category, id)| Product {
                category,
                ..Product::new(id.to_string(), name, 1.0)
            })
    }

    proptest! {
        #[test]
        fn filtering_is_deterministic(
            products in proptest::collection::vec(arb_product(), 0..30),
            term in "[a-zA-Z]{0,3}",
        ) {
            prop_assert_eq!(filter_products(&products, &term), filter_products(&products, &term));
        }

        #[test]
        fn result_is_exactly_the_matching_products(
            products in proptest::collection::vec(arb_product(), 0..30),
            term in "[a-zA-Z]{0,3}",
        ) {
            let result = filter_products(&products, &term);
            let needle = term.to_lowercase();
            let expected = products
                .iter()
                .filter(|p| {
                    p.name.to_lowercase().contains(&needle)
                        || p.category.as_ref().is_some_and(|c| c.to_lowercase().contains(&needle))
                })
                .count();
            prop_assert_eq!(result.len(), expected);
            for pair in result.windows(2) {
                prop_assert!(crate::catalog::collate::compare(&pair[0].name, &pair[1].name).is_le());
            }
        }
    }
}
