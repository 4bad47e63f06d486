//! Checkout totals shown next to the cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::AppliedDiscount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub discount: Decimal,
    /// `subtotal - discount`, never negative.
    pub total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
}

impl CheckoutSummary {
    pub fn new(subtotal: Decimal, applied: Option<&AppliedDiscount>) -> Self {
        let discount = applied
            .map(|a| a.amount.max(Decimal::ZERO).min(subtotal))
            .unwrap_or(Decimal::ZERO);
        Self {
            subtotal,
            discount,
            total: (subtotal - discount).max(Decimal::ZERO),
            discount_code: applied.map(|a| a.code.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discount::DiscountKind;

    #[test]
    fn without_discount_total_equals_subtotal() {
        let summary = CheckoutSummary::new(Decimal::from(420), None);
        assert_eq!(summary.total, Decimal::from(420));
        assert_eq!(summary.discount, Decimal::ZERO);
        assert_eq!(summary.discount_code, None);
    }

    #[test]
    fn discount_is_subtracted_and_clamped() {
        let applied = AppliedDiscount {
            code: "BIG".to_string(),
            kind: DiscountKind::Fixed,
            amount: Decimal::from(500),
        };
        let summary = CheckoutSummary::new(Decimal::from(300), Some(&applied));
        assert_eq!(summary.discount, Decimal::from(300));
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.discount_code.as_deref(), Some("BIG"));
    }
}
