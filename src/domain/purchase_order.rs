//! Purchase order entity, status enum, and write shapes.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PurchaseOrderId, VendorId};

/// Lifecycle status of a purchase order.
///
/// There is no transition graph: any status may be set to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            other => Err(format!("\"{other}\" is not a valid choice")),
        }
    }
}

/// A purchase order belonging to one vendor.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    /// Unique 10-digit order number assigned at creation, immutable afterwards.
    pub po_number: String,
    pub vendor_id: VendorId,
    pub order_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    /// Line items; opaque to the service.
    pub items: Value,
    pub quantity: i32,
    pub status: OrderStatus,
    pub quality_rating: Option<f64>,
    pub issue_date: Option<DateTime<Utc>>,
    pub acknowledgment_date: Option<DateTime<Utc>>,
}

/// Fields required to create a purchase order.
#[derive(Debug, Clone)]
pub struct NewPurchaseOrder {
    pub vendor_id: VendorId,
    pub order_date: DateTime<Utc>,
    pub delivery_date: DateTime<Utc>,
    pub items: Value,
    pub quantity: i32,
    pub status: OrderStatus,
    pub quality_rating: Option<f64>,
    pub issue_date: Option<DateTime<Utc>>,
    pub acknowledgment_date: Option<DateTime<Utc>>,
}

/// Partial update of a purchase order.
///
/// Outer `None` keeps the current value; for nullable fields the inner
/// `Option` distinguishes "set to null" from "leave alone".
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderPatch {
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub items: Option<Value>,
    pub quantity: Option<i32>,
    pub status: Option<OrderStatus>,
    pub quality_rating: Option<Option<f64>>,
    pub issue_date: Option<Option<DateTime<Utc>>>,
    pub acknowledgment_date: Option<Option<DateTime<Utc>>>,
}

impl PurchaseOrderPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.order_date.is_none()
            && self.delivery_date.is_none()
            && self.items.is_none()
            && self.quantity.is_none()
            && self.status.is_none()
            && self.quality_rating.is_none()
            && self.issue_date.is_none()
            && self.acknowledgment_date.is_none()
    }
}

/// Generate a fresh 10-digit order number.
pub fn generate_po_number() -> String {
    let mut rng = rand::thread_rng();
    (0..10).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}
