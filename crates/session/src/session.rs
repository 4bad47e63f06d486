//! The shopper's session: owns the comparison set, the cart and the applied
//! discount, and writes every change through the persistence gateway.

use std::sync::Arc;

use storefront_catalog::Product;
use storefront_core::ProductId;
use storefront_pricing::{AppliedDiscount, CheckoutSummary, DiscountCode, DiscountEngine, DiscountRejection};

use crate::cart::{Cart, CartLine};
use crate::comparison::{COMPARISON_CAPACITY, CompareOutcome, ComparisonSet};
use crate::config::SessionConfig;
use crate::gateway::PersistenceGateway;
use crate::notify::{Notifier, Severity};
use crate::storage::KeyValueStore;

const CART_KEY: &str = "cart";
const COMPARISON_KEY: &str = "compare";
const DISCOUNT_KEY: &str = "discount";

pub struct StorefrontSession<S> {
    gateway: PersistenceGateway<S>,
    notifier: Arc<dyn Notifier>,
    engine: DiscountEngine,
    comparison: ComparisonSet,
    cart: Cart,
    /// Snapshot of the code definition at the time it was applied.
    discount: Option<DiscountCode>,
}

impl<S: KeyValueStore> StorefrontSession<S> {
    /// Start a session, restoring whatever the store holds for this prefix.
    pub fn open(config: &SessionConfig, store: S, notifier: Arc<dyn Notifier>) -> Self {
        let gateway = PersistenceGateway::new(store, config.storage_prefix.clone(), notifier.clone());

        let comparison = ComparisonSet::from_items(gateway.get::<Vec<Product>>(COMPARISON_KEY, Vec::new()));
        let cart = Cart::from_lines(gateway.get::<Vec<CartLine>>(CART_KEY, Vec::new()));
        let discount = gateway.get::<Option<DiscountCode>>(DISCOUNT_KEY, None);

        tracing::info!(
            prefix = %config.storage_prefix,
            compared = comparison.len(),
            cart_lines = cart.lines().len(),
            "storefront session opened"
        );

        Self {
            gateway,
            notifier,
            engine: DiscountEngine::new(config.currency_minor_units),
            comparison,
            cart,
            discount,
        }
    }

    pub fn gateway(&self) -> &PersistenceGateway<S> {
        &self.gateway
    }

    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // Comparison set

    pub fn compare_add(&mut self, product: Product) -> CompareOutcome {
        let name = product.name.clone();
        let id = product.id;
        let outcome = self.comparison.add(product);
        tracing::debug!(product_id = %id, ?outcome, "compare add");

        match outcome {
            CompareOutcome::Added => {
                self.persist_comparison();
                self.notify(&format!("{name} added to comparison"), Severity::Success);
            }
            CompareOutcome::AlreadyPresent => {
                self.notify(&format!("{name} is already in the comparison"), Severity::Info);
            }
            CompareOutcome::Full => {
                self.notify(
                    &format!("Comparison limit reached: up to {COMPARISON_CAPACITY} products"),
                    Severity::Error,
                );
            }
        }
        outcome
    }

    pub fn compare_remove(&mut self, id: ProductId) -> bool {
        let removed = self.comparison.remove(id);
        if removed {
            tracing::debug!(product_id = %id, "compare remove");
            self.persist_comparison();
            self.notify("Removed from comparison", Severity::Info);
        }
        removed
    }

    pub fn compare_clear(&mut self) {
        self.comparison.clear();
        self.persist_comparison();
        self.notify("Comparison cleared", Severity::Info);
    }

    pub fn compare_contains(&self, id: ProductId) -> bool {
        self.comparison.contains(id)
    }

    // Cart

    /// Add to cart; returns the line's new quantity.
    pub fn cart_add(&mut self, product: Product, quantity: i64) -> u32 {
        let name = product.name.clone();
        let id = product.id;
        let line_quantity = self.cart.add(product, quantity);
        tracing::debug!(product_id = %id, quantity = line_quantity, "cart add");

        self.persist_cart();
        self.notify(&format!("{name} added to cart"), Severity::Success);
        line_quantity
    }

    pub fn cart_remove(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove(id);
        if removed {
            tracing::debug!(product_id = %id, "cart remove");
            self.persist_cart();
            self.notify("Removed from cart", Severity::Info);
        }
        removed
    }

    pub fn cart_set_quantity(&mut self, id: ProductId, quantity: i64) -> Option<u32> {
        let updated = self.cart.set_quantity(id, quantity)?;
        tracing::debug!(product_id = %id, quantity = updated, "cart set quantity");
        self.persist_cart();
        Some(updated)
    }

    /// Empty the cart (e.g. after checkout). Drops any applied discount too.
    pub fn cart_clear(&mut self) {
        self.cart.clear();
        self.persist_cart();
        if self.discount.take().is_some() {
            self.persist_discount();
        }
        self.notify("Cart cleared", Severity::Info);
    }

    // Discounts

    /// Apply a code against the current cart subtotal.
    ///
    /// A rejected code leaves any previously applied code in place.
    pub fn apply_discount(
        &mut self,
        input: &str,
        codes: &[DiscountCode],
    ) -> Result<AppliedDiscount, DiscountRejection> {
        match self.engine.apply(input, self.cart.subtotal(), codes) {
            Ok(applied) => {
                self.discount = codes
                    .iter()
                    .find(|c| c.is_active && c.code == applied.code)
                    .cloned();
                self.persist_discount();
                self.notify(&format!("Discount code {} applied", applied.code), Severity::Success);
                Ok(applied)
            }
            Err(rejection) => {
                tracing::debug!(input = input.trim(), %rejection, "discount rejected");
                self.notify(&rejection.to_string(), Severity::Error);
                Err(rejection)
            }
        }
    }

    pub fn remove_discount(&mut self) -> bool {
        if self.discount.take().is_none() {
            return false;
        }
        self.persist_discount();
        self.notify("Discount code removed", Severity::Info);
        true
    }

    /// Re-check the applied code against the admin's current list.
    pub fn refresh_discount(&mut self, codes: &[DiscountCode]) {
        let Some(current) = self.discount.as_ref() else {
            return;
        };

        match codes.iter().find(|c| c.is_active && c.code == current.code) {
            Some(latest) if latest == current => {}
            Some(latest) => {
                self.discount = Some(latest.clone());
                self.persist_discount();
            }
            None => {
                let code = current.code.clone();
                self.discount = None;
                self.persist_discount();
                self.notify(&format!("Discount code {code} is no longer available"), Severity::Info);
            }
        }
    }

    /// Applied discount recomputed for the current subtotal.
    pub fn applied_discount(&self) -> Option<AppliedDiscount> {
        let code = self.discount.as_ref()?;
        Some(AppliedDiscount {
            code: code.code.clone(),
            kind: code.kind,
            amount: self.engine.amount_for(code, self.cart.subtotal()),
        })
    }

    pub fn checkout_summary(&self) -> CheckoutSummary {
        CheckoutSummary::new(self.cart.subtotal(), self.applied_discount().as_ref())
    }

    // Write-through helpers: persist the full state first, notify after.

    fn persist_comparison(&mut self) {
        self.gateway.set(COMPARISON_KEY, &self.comparison);
    }

    fn persist_cart(&mut self) {
        self.gateway.set(CART_KEY, &self.cart);
    }

    fn persist_discount(&mut self) {
        self.gateway.set(DISCOUNT_KEY, &self.discount);
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }
}
