use std::borrow::Cow;
use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ProductId};

/// A single value in a product's technical specification.
///
/// Specs are sparse and loosely typed in the catalog admin: a socket is text
/// (`"AM5"`), a memory size is a number (`16`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Text(String),
    Number(f64),
}

impl SpecValue {
    /// Canonical string form used for filter matching and facet values.
    ///
    /// Whole numbers render without a fractional part (`16`, not `16.0`).
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            SpecValue::Text(s) => Cow::Borrowed(s.as_str()),
            SpecValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Cow::Owned(format!("{}", *n as i64))
            }
            SpecValue::Number(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl From<&str> for SpecValue {
    fn from(value: &str) -> Self {
        SpecValue::Text(value.to_string())
    }
}

impl From<f64> for SpecValue {
    fn from(value: f64) -> Self {
        SpecValue::Number(value)
    }
}

/// Catalog product as seen by the storefront.
///
/// Read-only to the session layer: the catalog admin owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Internal category tag (e.g. `"gpu"`, `"cpu"`).
    pub category: String,
    pub brand: String,
    pub price: Decimal,
    /// Pre-sale price; strictly greater than `price` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Decimal>,
    #[serde(default)]
    pub specs: BTreeMap<String, SpecValue>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub rating: Decimal,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        brand: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            brand: brand.into(),
            price,
            old_price: None,
            specs: BTreeMap::new(),
            review_count: 0,
            rating: Decimal::ZERO,
        }
    }

    pub fn with_old_price(mut self, old_price: Decimal) -> Self {
        self.old_price = Some(old_price);
        self
    }

    pub fn with_spec(mut self, key: impl Into<String>, value: impl Into<SpecValue>) -> Self {
        self.specs.insert(key.into(), value.into());
        self
    }

    pub fn with_reviews(mut self, review_count: u32, rating: Decimal) -> Self {
        self.review_count = review_count;
        self.rating = rating;
        self
    }

    /// Check the product contract. A failure here is an upstream bug, not a user scenario.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: name cannot be empty",
                self.id
            )));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: category cannot be empty",
                self.id
            )));
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "product {}: price must not be negative",
                self.id
            )));
        }
        if let Some(old_price) = self.old_price {
            if old_price <= self.price {
                return Err(DomainError::invariant(format!(
                    "product {}: old price must exceed current price",
                    self.id
                )));
            }
        }
        Ok(())
    }

    /// Sale badge percentage derived from `old_price`, rounded to a whole percent.
    pub fn discount_percent(&self) -> Option<u32> {
        let old_price = self.old_price?;
        if old_price <= self.price || old_price.is_zero() {
            return None;
        }
        let ratio = (old_price - self.price).checked_mul(Decimal::ONE_HUNDRED)? / old_price;
        ratio
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }

    /// Resolve a filter attribute key to this product's value.
    ///
    /// `brand`, `category` and `name` address top-level fields; `specs.<key>`
    /// (or any other bare key) addresses `specs`.
    pub fn attribute(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "brand" => Some(Cow::Borrowed(self.brand.as_str())),
            "category" => Some(Cow::Borrowed(self.category.as_str())),
            "name" => Some(Cow::Borrowed(self.name.as_str())),
            other => {
                let spec_key = other.strip_prefix("specs.").unwrap_or(other);
                self.specs.get(spec_key).map(SpecValue::canonical)
            }
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
