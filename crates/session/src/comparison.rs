//! Side-by-side product comparison set.

use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{Entity, ProductId};

/// Most products the comparison table can hold.
pub const COMPARISON_CAPACITY: usize = 4;

/// Result of offering a product to the comparison set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    Added,
    AlreadyPresent,
    Full,
}

/// Bounded, deduplicated, insertion-ordered product collection.
///
/// Invariants: no two items share an id; never more than [`COMPARISON_CAPACITY`] items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonSet {
    items: Vec<Product>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted items, dropping duplicates and overflow.
    pub fn from_items(items: Vec<Product>) -> Self {
        let mut set = Self::new();
        for item in items {
            set.add(item);
        }
        set
    }

    pub fn add(&mut self, product: Product) -> CompareOutcome {
        if self.contains(product.id()) {
            return CompareOutcome::AlreadyPresent;
        }
        if self.is_full() {
            return CompareOutcome::Full;
        }
        self.items.push(product);
        CompareOutcome::Added
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id() != id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|p| p.id() == id)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= COMPARISON_CAPACITY
    }

    /// Union of spec keys, in order of first appearance, for the table rows.
    pub fn spec_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for product in &self.items {
            for key in product.specs.keys() {
                if !keys.iter().any(|k| k == key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }

    /// Spec keys whose values are not the same across all compared products.
    ///
    /// A product lacking the key counts as a distinct value.
    pub fn differing_keys(&self) -> Vec<String> {
        if self.items.len() < 2 {
            return Vec::new();
        }
        self.spec_keys()
            .into_iter()
            .filter(|key| {
                let first = self.items[0].specs.get(key).map(|v| v.canonical());
                self.items[1..]
                    .iter()
                    .any(|p| p.specs.get(key).map(|v| v.canonical()) != first)
            })
            .collect()
    }
}
