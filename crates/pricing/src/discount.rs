use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{DEFAULT_MINOR_UNITS, DomainError, DomainResult, round_half_up};

/// How a discount code reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `value` is a percentage in `0..=100`.
    Percentage,
    /// `value` is an amount in store currency.
    Fixed,
}

/// Discount code as configured in the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub value: Decimal,
    pub is_active: bool,
}

impl DiscountCode {
    pub fn percentage(code: impl Into<String>, value: Decimal) -> Self {
        Self {
            code: code.into(),
            kind: DiscountKind::Percentage,
            value,
            is_active: true,
        }
    }

    pub fn fixed(code: impl Into<String>, value: Decimal) -> Self {
        Self {
            code: code.into(),
            kind: DiscountKind::Fixed,
            value,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Admin-side contract check for a code definition.
    pub fn validate(&self) -> DomainResult<()> {
        if self.code.trim().is_empty() {
            return Err(DomainError::validation("discount code cannot be empty"));
        }
        if self.value < Decimal::ZERO {
            return Err(DomainError::validation("discount value must not be negative"));
        }
        if self.kind == DiscountKind::Percentage && self.value > Decimal::ONE_HUNDRED {
            return Err(DomainError::validation("percentage discount cannot exceed 100"));
        }
        Ok(())
    }
}

/// A code that matched, with the amount it takes off the subtotal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    pub code: String,
    pub kind: DiscountKind,
    /// Never negative, never above the subtotal it was computed for.
    pub amount: Decimal,
}

/// Why a code was not applied. A normal user outcome, not a failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscountRejection {
    #[error("enter a discount code")]
    Blank,

    #[error("code not found or inactive")]
    NotFoundOrInactive,
}

/// Discount calculator bound to a currency precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountEngine {
    minor_units: u32,
}

impl Default for DiscountEngine {
    fn default() -> Self {
        Self::new(DEFAULT_MINOR_UNITS)
    }
}

impl DiscountEngine {
    pub fn new(minor_units: u32) -> Self {
        Self { minor_units }
    }

    /// Look up `input` among the active codes and compute its amount.
    ///
    /// Matching is case-sensitive on the trimmed input. `codes` is not modified.
    pub fn apply(
        &self,
        input: &str,
        subtotal: Decimal,
        codes: &[DiscountCode],
    ) -> Result<AppliedDiscount, DiscountRejection> {
        let wanted = input.trim();
        if wanted.is_empty() {
            return Err(DiscountRejection::Blank);
        }

        let code = codes
            .iter()
            .find(|c| c.is_active && c.code == wanted)
            .ok_or(DiscountRejection::NotFoundOrInactive)?;

        Ok(AppliedDiscount {
            code: code.code.clone(),
            kind: code.kind,
            amount: self.amount_for(code, subtotal),
        })
    }

    /// Amount a matched code takes off `subtotal`, clamped to `[0, subtotal]`.
    pub fn amount_for(&self, code: &DiscountCode, subtotal: Decimal) -> Decimal {
        let subtotal = subtotal.max(Decimal::ZERO);
        let raw = match code.kind {
            DiscountKind::Percentage => {
                let share = subtotal
                    .checked_mul(code.value)
                    .map(|scaled| scaled / Decimal::ONE_HUNDRED)
                    .unwrap_or_else(|| (subtotal / Decimal::ONE_HUNDRED).saturating_mul(code.value));
                round_half_up(share, self.minor_units)
            }
            DiscountKind::Fixed => code.value,
        };
        raw.max(Decimal::ZERO).min(subtotal)
    }
}

/// [`DiscountEngine::apply`] at the default precision.
pub fn apply(
    input: &str,
    subtotal: Decimal,
    codes: &[DiscountCode],
) -> Result<AppliedDiscount, DiscountRejection> {
    DiscountEngine::default().apply(input, subtotal, codes)
}
