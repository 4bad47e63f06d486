//! Catalog domain module.
//!
//! Product model plus the category-page pipeline (filters, price window,
//! sorting) and facet extraction. Pure, deterministic logic (no IO).

pub mod catalog;
pub mod facets;
pub mod product;
pub mod query;

pub use catalog::Catalog;
pub use facets::{CategoryFacets, facets};
pub use product::{Product, SpecValue};
pub use query::{AttributeFilters, CatalogQuery, PriceRange, SortOption, query};
