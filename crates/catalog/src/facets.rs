//! Filter facets offered on a category page.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::product::Product;
use crate::query::PriceRange;

/// Values the filter sidebar can offer for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryFacets {
    pub brands: BTreeSet<String>,
    /// Spec key → distinct canonical values.
    pub specs: BTreeMap<String, BTreeSet<String>>,
    /// Cheapest and most expensive product; `None` for an empty category.
    pub price_bounds: Option<PriceRange>,
}

pub fn facets(products: &[Product], category: &str) -> CategoryFacets {
    let mut out = CategoryFacets::default();

    for product in products.iter().filter(|p| p.category == category) {
        out.brands.insert(product.brand.clone());

        for (key, value) in &product.specs {
            out.specs
                .entry(key.clone())
                .or_default()
                .insert(value.canonical().into_owned());
        }

        out.price_bounds = Some(match out.price_bounds {
            None => PriceRange::new(product.price, product.price),
            Some(bounds) => PriceRange::new(bounds.min.min(product.price), bounds.max.max(product.price)),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use storefront_core::ProductId;

    #[test]
    fn collects_brands_specs_and_bounds_for_category() {
        let products = vec![
            Product::new(ProductId::new(1), "A", "ram", "Kingston", Decimal::from(90))
                .with_spec("capacity", 16.0),
            Product::new(ProductId::new(2), "B", "ram", "Corsair", Decimal::from(150))
                .with_spec("capacity", 32.0)
                .with_spec("type", "DDR5"),
            Product::new(ProductId::new(3), "C", "ssd", "Samsung", Decimal::from(10)),
        ];

        let f = facets(&products, "ram");
        assert_eq!(f.brands.iter().collect::<Vec<_>>(), vec!["Corsair", "Kingston"]);
        assert_eq!(f.specs["capacity"].iter().collect::<Vec<_>>(), vec!["16", "32"]);
        assert_eq!(f.specs["type"].len(), 1);
        assert_eq!(
            f.price_bounds,
            Some(PriceRange::new(Decimal::from(90), Decimal::from(150)))
        );
    }

    #[test]
    fn empty_category_has_no_bounds() {
        let f = facets(&[], "ram");
        assert!(f.brands.is_empty());
        assert_eq!(f.price_bounds, None);
    }
}
