//! Shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{Entity, ProductId};

/// One product-quantity pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn line_total(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

impl Entity for CartLine {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.product.id
    }
}

/// Requested quantities below 1 become 1; zero is expressed by removing the line.
fn clamp_quantity(quantity: i64) -> u32 {
    u32::try_from(quantity.max(1)).unwrap_or(u32::MAX)
}

/// Quantity-merging cart: at most one line per product id.
///
/// Totals are recomputed on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted lines, merging duplicates and repairing zero quantities.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.add(line.product, i64::from(line.quantity));
        }
        cart
    }

    /// Add `quantity` of `product`; returns the line's resulting quantity.
    pub fn add(&mut self, product: Product, quantity: i64) -> u32 {
        let quantity = clamp_quantity(quantity);
        match self.lines.iter_mut().find(|l| l.id() == product.id()) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity);
                line.quantity
            }
            None => {
                self.lines.push(CartLine { product, quantity });
                quantity
            }
        }
    }

    /// Delete the line regardless of quantity. Returns whether a line existed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id() != id);
        self.lines.len() != before
    }

    /// Set an existing line's quantity (min 1). `None` if the product is not in the cart.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) -> Option<u32> {
        let line = self.lines.iter_mut().find(|l| l.id() == id)?;
        line.quantity = clamp_quantity(quantity);
        Some(line.quantity)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn quantity_of(&self, id: ProductId) -> Option<u32> {
        self.lines.iter().find(|l| l.id() == id).map(|l| l.quantity)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.quantity_of(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }
}
