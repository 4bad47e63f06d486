//! Pricing domain module.
//!
//! Discount-code arithmetic and checkout totals, implemented purely as
//! deterministic functions over amounts (no IO, no storage).

pub mod discount;
pub mod summary;

pub use discount::{AppliedDiscount, DiscountCode, DiscountEngine, DiscountKind, DiscountRejection, apply};
pub use summary::CheckoutSummary;
