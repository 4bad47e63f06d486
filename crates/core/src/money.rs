//! Money arithmetic helpers.
//!
//! Amounts are plain `Decimal`s in the store currency; the currency itself is
//! not tracked because the storefront sells in a single currency.

use rust_decimal::{Decimal, RoundingStrategy};

/// Minor-unit precision used when nothing else is configured (e.g. cents, kopecks).
pub const DEFAULT_MINOR_UNITS: u32 = 2;

/// Round to `minor_units` decimal places, halves away from zero.
///
/// For the non-negative amounts handled here this is classic round-half-up.
pub fn round_half_up(amount: Decimal, minor_units: u32) -> Decimal {
    amount.round_dp_with_strategy(minor_units, RoundingStrategy::MidpointAwayFromZero)
}
