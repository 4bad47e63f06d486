//! `storefront-core` — shared building blocks for the storefront session crates.
//!
//! This crate contains **pure domain** primitives (no storage, no UI concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod money;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use money::{DEFAULT_MINOR_UNITS, round_half_up};
