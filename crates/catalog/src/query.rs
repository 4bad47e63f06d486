//! Category-page filter/sort pipeline.
//!
//! The pipeline is pure and always runs in the same order:
//! category → attribute filters → price range → sort.

use core::str::FromStr;
use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::DomainError;

use crate::product::Product;

/// Attribute key → accepted values.
///
/// Values for one key are OR-ed; keys are AND-ed. An empty value set for a key
/// means the key is inactive (no boxes checked), never "reject everything".
pub type AttributeFilters = BTreeMap<String, BTreeSet<String>>;

/// Sort order for the category page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Catalog insertion order (ascending id).
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    /// Most reviewed first.
    Popular,
}

impl FromStr for SortOption {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SortOption::Default),
            "price_asc" => Ok(SortOption::PriceAsc),
            "price_desc" => Ok(SortOption::PriceDesc),
            "popular" => Ok(SortOption::Popular),
            other => Err(DomainError::invalid_id(format!("SortOption: {other}"))),
        }
    }
}

/// Inclusive price window `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Every non-negative price passes.
    pub fn unbounded() -> Self {
        Self {
            min: Decimal::ZERO,
            max: Decimal::MAX,
        }
    }

    /// `min > max` is a valid but vacuous window.
    pub fn is_vacuous(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Full set of category-page inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub category: String,
    #[serde(default)]
    pub attributes: AttributeFilters,
    #[serde(default)]
    pub price: PriceRange,
    #[serde(default)]
    pub sort: SortOption,
}

impl CatalogQuery {
    pub fn for_category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            attributes: AttributeFilters::new(),
            price: PriceRange::unbounded(),
            sort: SortOption::Default,
        }
    }

    /// Add accepted values for an attribute key (merged with any already selected).
    pub fn with_attribute<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes
            .entry(key.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    pub fn with_price(mut self, min: Decimal, max: Decimal) -> Self {
        self.price = PriceRange::new(min, max);
        self
    }

    pub fn sorted_by(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Run the pipeline over `products`.
    pub fn run(&self, products: &[Product]) -> Vec<Product> {
        query(
            products,
            &self.category,
            &self.attributes,
            self.price,
            self.sort,
        )
    }
}

/// Filter then sort a product collection for a category page.
pub fn query(
    products: &[Product],
    category: &str,
    attributes: &AttributeFilters,
    price: PriceRange,
    sort: SortOption,
) -> Vec<Product> {
    if price.is_vacuous() {
        return Vec::new();
    }

    let mut matched: Vec<Product> = products
        .iter()
        .filter(|p| p.category == category)
        .filter(|p| matches_attributes(p, attributes))
        .filter(|p| price.contains(p.price))
        .cloned()
        .collect();

    sort_products(&mut matched, sort);
    matched
}

/// AND across keys, OR within a key; inactive (empty) keys are skipped.
pub fn matches_attributes(product: &Product, attributes: &AttributeFilters) -> bool {
    attributes
        .iter()
        .filter(|(_, accepted)| !accepted.is_empty())
        .all(|(key, accepted)| match product.attribute(key) {
            Some(value) => accepted.contains(value.as_ref()),
            None => false,
        })
}

/// Stable in-place sort; ties keep their prior relative order.
pub fn sort_products(products: &mut [Product], sort: SortOption) {
    match sort {
        SortOption::Default => products.sort_by_key(|p| p.id),
        SortOption::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOption::Popular => products.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::ProductId;

    fn gpu(id: u64, brand: &str, price: i64, reviews: u32) -> Product {
        Product::new(ProductId::new(id), format!("GPU {id}"), "gpu", brand, Decimal::from(price))
            .with_reviews(reviews, Decimal::new(45, 1))
    }

    fn test_catalog() -> Vec<Product> {
        vec![
            gpu(3, "MSI", 700, 12).with_spec("memory", 12.0),
            gpu(1, "ASUS", 1000, 40).with_spec("memory", 16.0),
            gpu(2, "Gigabyte", 500, 40).with_spec("memory", 8.0),
            gpu(4, "ASUS", 450, 3).with_spec("memory", 8.0),
            Product::new(ProductId::new(5), "Ryzen 5", "cpu", "AMD", Decimal::from(200)),
        ]
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn category_is_always_applied() {
        let result = CatalogQuery::for_category("cpu").run(&test_catalog());
        assert_eq!(ids(&result), vec![5]);
    }

    #[test]
    fn default_sort_is_ascending_id() {
        let result = CatalogQuery::for_category("gpu").run(&test_catalog());
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn brand_values_are_or_within_key() {
        let result = CatalogQuery::for_category("gpu")
            .with_attribute("brand", ["ASUS", "MSI"])
            .run(&test_catalog());
        assert_eq!(ids(&result), vec![1, 3, 4]);
    }

    #[test]
    fn keys_are_and_across() {
        let result = CatalogQuery::for_category("gpu")
            .with_attribute("brand", ["ASUS", "MSI"])
            .with_attribute("specs.memory", ["8"])
            .run(&test_catalog());
        assert_eq!(ids(&result), vec![4]);
    }

    #[test]
    fn empty_value_set_is_inactive() {
        let result = CatalogQuery::for_category("gpu")
            .with_attribute("brand", Vec::<String>::new())
            .run(&test_catalog());
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn missing_attribute_fails_active_filter() {
        let result = CatalogQuery::for_category("gpu")
            .with_attribute("specs.tdp", ["200"])
            .run(&test_catalog());
        assert!(result.is_empty());
    }

    #[test]
    fn price_range_is_inclusive() {
        let result = CatalogQuery::for_category("gpu")
            .with_price(Decimal::from(500), Decimal::from(700))
            .run(&test_catalog());
        assert_eq!(ids(&result), vec![2, 3]);
    }

    #[test]
    fn inverted_price_range_yields_empty() {
        let result = CatalogQuery::for_category("gpu")
            .with_price(Decimal::from(900), Decimal::from(100))
            .run(&test_catalog());
        assert!(result.is_empty());
    }

    #[test]
    fn empty_collection_yields_empty() {
        let result = CatalogQuery::for_category("gpu").run(&[]);
        assert!(result.is_empty());
    }

    #[test]
    fn price_sorts() {
        let catalog = test_catalog();
        let asc = CatalogQuery::for_category("gpu")
            .sorted_by(SortOption::PriceAsc)
            .run(&catalog);
        assert_eq!(ids(&asc), vec![4, 2, 3, 1]);

        let desc = CatalogQuery::for_category("gpu")
            .sorted_by(SortOption::PriceDesc)
            .run(&catalog);
        assert_eq!(ids(&desc), vec![1, 3, 2, 4]);
    }

    #[test]
    fn price_sorts_keep_ties_in_prior_order() {
        // Equal prices arrive in descending id order; both price sorts must keep it.
        let tied = vec![
            gpu(9, "MSI", 300, 0),
            gpu(8, "ASUS", 300, 0),
            gpu(7, "MSI", 300, 0),
            gpu(6, "ASUS", 100, 0),
            gpu(5, "MSI", 900, 0),
        ];

        let mut asc = tied.clone();
        sort_products(&mut asc, SortOption::PriceAsc);
        assert_eq!(ids(&asc), vec![6, 9, 8, 7, 5]);

        let mut desc = tied.clone();
        sort_products(&mut desc, SortOption::PriceDesc);
        assert_eq!(ids(&desc), vec![5, 9, 8, 7, 6]);

        let listed = CatalogQuery::for_category("gpu")
            .sorted_by(SortOption::PriceAsc)
            .run(&tied);
        assert_eq!(ids(&listed), vec![6, 9, 8, 7, 5]);
    }

    #[test]
    fn popular_sort_is_stable_on_ties() {
        // Ids 1 and 2 both have 40 reviews; input order (1 before 2) must survive.
        let result = CatalogQuery::for_category("gpu")
            .sorted_by(SortOption::Popular)
            .run(&test_catalog());
        assert_eq!(ids(&result), vec![1, 2, 3, 4]);

        let mut reversed = test_catalog();
        reversed.reverse();
        let result = CatalogQuery::for_category("gpu")
            .sorted_by(SortOption::Popular)
            .run(&reversed);
        assert_eq!(ids(&result), vec![2, 1, 3, 4]);
    }

    #[test]
    fn sort_option_parses_wire_names() {
        assert_eq!("price_desc".parse::<SortOption>().unwrap(), SortOption::PriceDesc);
        assert!(matches!("cheapest".parse::<SortOption>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn query_deserializes_with_defaults() {
        let q: CatalogQuery = serde_json::from_str(r#"{ "category": "gpu", "sort": "popular" }"#).unwrap();
        assert_eq!(q.sort, SortOption::Popular);
        assert_eq!(q.price, PriceRange::unbounded());
        assert!(q.attributes.is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_product() -> impl Strategy<Value = Product> {
            (
                1u64..50,
                prop_oneof![Just("gpu"), Just("cpu")],
                prop_oneof![Just("ASUS"), Just("MSI"), Just("Gigabyte")],
                0i64..2000,
                0u32..100,
            )
                .prop_map(|(id, category, brand, price, reviews)| {
                    Product::new(ProductId::new(id), "item", category, brand, Decimal::from(price))
                        .with_reviews(reviews, Decimal::ZERO)
                })
        }

        fn arb_sort() -> impl Strategy<Value = SortOption> {
            prop_oneof![
                Just(SortOption::Default),
                Just(SortOption::PriceAsc),
                Just(SortOption::PriceDesc),
                Just(SortOption::Popular),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: identical inputs give deeply-equal outputs.
            #[test]
            fn query_is_deterministic(
                products in prop::collection::vec(arb_product(), 0..30),
                sort in arb_sort(),
                min in 0i64..2000,
                max in 0i64..2000,
            ) {
                let q = CatalogQuery::for_category("gpu")
                    .with_attribute("brand", ["ASUS", "MSI"])
                    .with_price(Decimal::from(min), Decimal::from(max))
                    .sorted_by(sort);
                prop_assert_eq!(q.run(&products), q.run(&products));
            }

            /// Property: inverted ranges never match anything.
            #[test]
            fn inverted_range_is_empty(
                products in prop::collection::vec(arb_product(), 0..30),
                min in 1i64..2000,
                gap in 1i64..500,
            ) {
                let q = CatalogQuery::for_category("gpu")
                    .with_price(Decimal::from(min), Decimal::from(min - gap));
                prop_assert!(q.run(&products).is_empty());
            }

            /// Property: every result satisfies every active constraint.
            #[test]
            fn results_satisfy_constraints(
                products in prop::collection::vec(arb_product(), 0..30),
                max in 0i64..2000,
            ) {
                let q = CatalogQuery::for_category("gpu")
                    .with_attribute("brand", ["MSI"])
                    .with_price(Decimal::ZERO, Decimal::from(max));
                for p in q.run(&products) {
                    prop_assert_eq!(p.category.as_str(), "gpu");
                    prop_assert_eq!(p.brand.as_str(), "MSI");
                    prop_assert!(p.price <= Decimal::from(max));
                }
            }
        }
    }
}
