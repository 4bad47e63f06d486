use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, OrderId, ProductId};

/// Order status as set by the admin panel.
///
/// The set is closed: an unknown tag is a contract violation and fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminOrderStatus {
    #[serde(alias = "Pending")]
    Pending,
    #[serde(alias = "Processing")]
    Processing,
    #[serde(alias = "Shipped")]
    Shipped,
    #[serde(alias = "Completed")]
    Completed,
    #[serde(alias = "Cancelled")]
    Cancelled,
}

impl AdminOrderStatus {
    pub const ALL: [AdminOrderStatus; 5] = [
        AdminOrderStatus::Pending,
        AdminOrderStatus::Processing,
        AdminOrderStatus::Shipped,
        AdminOrderStatus::Completed,
        AdminOrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AdminOrderStatus::Pending => "pending",
            AdminOrderStatus::Processing => "processing",
            AdminOrderStatus::Shipped => "shipped",
            AdminOrderStatus::Completed => "completed",
            AdminOrderStatus::Cancelled => "cancelled",
        }
    }

    /// No further admin transitions are expected.
    pub fn is_terminal(self) -> bool {
        matches!(self, AdminOrderStatus::Completed | AdminOrderStatus::Cancelled)
    }

    /// The parcel has left the warehouse (tracking info may be present).
    pub fn has_shipped(self) -> bool {
        matches!(self, AdminOrderStatus::Shipped | AdminOrderStatus::Completed)
    }
}

impl core::fmt::Display for AdminOrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminOrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminOrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::invalid_id(format!("AdminOrderStatus: {s}")))
    }
}

/// Order line: product, quantity, unit price at purchase time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Order record as maintained by the admin panel. Read-only to the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOrder {
    pub id: OrderId,
    pub status: AdminOrderStatus,
    /// Order creation time.
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default)]
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
}

impl AdminOrder {
    pub fn new(id: OrderId, status: AdminOrderStatus, date: DateTime<Utc>) -> Self {
        Self {
            id,
            status,
            date,
            tracking_number: None,
            carrier: None,
            lines: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    pub fn with_tracking(mut self, carrier: impl Into<String>, tracking_number: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self.tracking_number = Some(tracking_number.into());
        self
    }

    pub fn with_line(mut self, line: OrderLine) -> Self {
        self.total = self.total.saturating_add(line.line_total());
        self.lines.push(line);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AdminOrderStatus::Cancelled
    }

    /// Tracking details, shown only once the order has shipped.
    pub fn tracking(&self) -> Option<(&str, &str)> {
        if !self.status.has_shipped() {
            return None;
        }
        match (self.carrier.as_deref(), self.tracking_number.as_deref()) {
            (Some(carrier), Some(number)) => Some((carrier, number)),
            _ => None,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        let has_tracking = self.tracking_number.is_some() || self.carrier.is_some();
        if has_tracking && !self.status.has_shipped() {
            return Err(DomainError::invariant(format!(
                "order {}: tracking info present before shipment ({})",
                self.id, self.status
            )));
        }
        if self.lines.iter().any(|l| l.quantity == 0) {
            return Err(DomainError::validation(format!(
                "order {}: line quantity must be positive",
                self.id
            )));
        }
        if self.total < Decimal::ZERO {
            return Err(DomainError::validation(format!(
                "order {}: total must not be negative",
                self.id
            )));
        }
        Ok(())
    }
}

impl Entity for AdminOrder {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
