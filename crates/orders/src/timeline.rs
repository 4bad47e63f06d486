//! Customer-facing order progress timeline.
//!
//! The admin panel only records a coarse [`AdminOrderStatus`]. Customers see a
//! fixed four-step progress bar whose timestamps are synthesized from the
//! order creation date.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::order::{AdminOrder, AdminOrderStatus};

/// One of the four fixed progress steps, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStep {
    Received,
    Preparing,
    Shipped,
    Delivered,
}

impl OrderStep {
    pub const SEQUENCE: [OrderStep; 4] = [
        OrderStep::Received,
        OrderStep::Preparing,
        OrderStep::Shipped,
        OrderStep::Delivered,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStep::Received => "Received",
            OrderStep::Preparing => "Preparing",
            OrderStep::Shipped => "Shipped",
            OrderStep::Delivered => "Delivered",
        }
    }

    /// Display offset from the order creation date.
    pub fn offset(self) -> Duration {
        match self {
            OrderStep::Received => Duration::zero(),
            OrderStep::Preparing => Duration::hours(2),
            OrderStep::Shipped => Duration::days(1),
            OrderStep::Delivered => Duration::days(2),
        }
    }
}

/// A projected step. Derived on every render, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatusStep {
    pub step: OrderStep,
    pub completed: bool,
    /// `None` for steps not reached yet (rendered as "pending").
    pub at: Option<DateTime<Utc>>,
}

impl OrderStatusStep {
    pub fn label(&self) -> &'static str {
        self.step.label()
    }
}

/// What the order page should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "steps", rename_all = "lowercase")]
pub enum OrderProgress {
    /// Terminal cancelled state; shown as a distinct notice, never as a timeline.
    Cancelled,
    Timeline([OrderStatusStep; 4]),
}

impl OrderProgress {
    pub fn steps(&self) -> Option<&[OrderStatusStep; 4]> {
        match self {
            OrderProgress::Cancelled => None,
            OrderProgress::Timeline(steps) => Some(steps),
        }
    }
}

/// Number of leading steps a status marks as done.
///
/// `Cancelled` maps to 1 only as a fallback; it is never shown as progress.
pub fn completed_step_count(status: AdminOrderStatus) -> usize {
    match status {
        AdminOrderStatus::Pending => 1,
        AdminOrderStatus::Processing => 2,
        AdminOrderStatus::Shipped => 3,
        AdminOrderStatus::Completed => 4,
        AdminOrderStatus::Cancelled => 1,
    }
}

/// Project a non-cancelled status onto the four steps.
///
/// Callers must branch on `Cancelled` first (see [`project`]); doing otherwise
/// trips a debug assertion.
pub fn project_steps(status: AdminOrderStatus, placed_at: DateTime<Utc>) -> [OrderStatusStep; 4] {
    debug_assert!(
        status != AdminOrderStatus::Cancelled,
        "cancelled orders have no progress timeline"
    );

    let done = completed_step_count(status);
    OrderStep::SEQUENCE.map(|step| {
        let completed = (step as usize) < done;
        OrderStatusStep {
            step,
            completed,
            at: completed.then(|| placed_at + step.offset()),
        }
    })
}

/// Project an order into what the customer sees.
pub fn project(order: &AdminOrder) -> OrderProgress {
    if order.is_cancelled() {
        return OrderProgress::Cancelled;
    }
    OrderProgress::Timeline(project_steps(order.status, order.date))
}
