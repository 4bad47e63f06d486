//! Customer orders domain module.
//!
//! Admin-managed order records and the customer-facing progress timeline
//! derived from them. Pure, deterministic logic (no IO, no storage).

pub mod order;
pub mod timeline;

pub use order::{AdminOrder, AdminOrderStatus, OrderLine};
pub use timeline::{OrderProgress, OrderStatusStep, OrderStep, completed_step_count, project, project_steps};
