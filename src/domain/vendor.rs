//! Vendor entity and its write shapes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::VendorId;

/// A vendor record with its current derived performance metrics.
///
/// The four metric fields are owned by the recalculation engine; they start
/// out unset and are only ever written as a group after a completed
/// purchase-order write.
#[derive(Debug, Clone, Serialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub contact_details: String,
    pub address: String,
    /// Unique code assigned at creation, immutable afterwards.
    pub vendor_code: String,
    pub on_time_delivery_rate: Option<f64>,
    pub quality_rating_avg: Option<f64>,
    pub average_response_time: Option<f64>,
    pub fulfillment_rate: Option<f64>,
    pub created: DateTime<Utc>,
}

/// Fields required to create a vendor.
#[derive(Debug, Clone)]
pub struct NewVendor {
    pub name: String,
    pub contact_details: String,
    pub address: String,
}

/// Partial update of a vendor; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct VendorPatch {
    pub name: Option<String>,
    pub contact_details: Option<String>,
    pub address: Option<String>,
}

impl VendorPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.contact_details.is_none() && self.address.is_none()
    }
}

/// Generate a fresh unique vendor code.
pub fn generate_vendor_code() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vendor_codes_are_unique() {
        let a = generate_vendor_code();
        let b = generate_vendor_code();
        assert_ne!(a, b);
    }
}
