//! `storefront-session`
//!
//! **Responsibility:** the shopper's in-memory commerce session.
//!
//! This crate provides:
//! - Comparison set (bounded, deduplicated)
//! - Cart (quantity-merging, derived totals)
//! - Persistence gateway over a key-value store (write-through, memory-only fallback)
//! - Notification side-channel for user-facing outcomes
//!
//! The session is a **single owner** of all mutable state; nothing here is global.

pub mod cart;
pub mod comparison;
pub mod config;
pub mod gateway;
pub mod notify;
pub mod session;
pub mod storage;

pub use cart::{Cart, CartLine};
pub use comparison::{COMPARISON_CAPACITY, CompareOutcome, ComparisonSet};
pub use config::SessionConfig;
pub use gateway::{Durability, PersistenceGateway};
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use session::StorefrontSession;
pub use storage::{InMemoryStore, JsonFileStore, KeyValueStore, StorageError};
