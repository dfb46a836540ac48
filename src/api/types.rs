//! Request and response shapes for the HTTP API.
//!
//! Create/update requests deserialize every field as optional so that
//! missing values surface as per-field validation errors rather than
//! deserializer rejections; `vendor_code` and `po_number` are
//! server-generated and never accepted on writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::{ApiError, ValidationErrors};
use crate::domain::{
    NewPurchaseOrder, NewVendor, OrderStatus, PurchaseOrderPatch, Vendor, VendorId, VendorPatch,
};

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";

/// Distinguish an absent field from an explicit null: absent deserializes to
/// `None` via the default, an explicit null to `Some(None)`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn require_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        None => {
            errors.add(field, REQUIRED);
            None
        }
        Some(s) if s.trim().is_empty() => {
            errors.add(field, BLANK);
            None
        }
        Some(s) => Some(s),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateVendorRequest {
    pub name: Option<String>,
    pub contact_details: Option<String>,
    pub address: Option<String>,
}

impl CreateVendorRequest {
    pub fn validate(self) -> Result<NewVendor, ApiError> {
        let mut errors = ValidationErrors::new();
        let name = require_text(&mut errors, "name", self.name);
        let contact_details = require_text(&mut errors, "contact_details", self.contact_details);
        let address = require_text(&mut errors, "address", self.address);
        errors.into_result()?;
        Ok(NewVendor {
            name: name.unwrap_or_default(),
            contact_details: contact_details.unwrap_or_default(),
            address: address.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateVendorRequest {
    pub name: Option<String>,
    pub contact_details: Option<String>,
    pub address: Option<String>,
}

impl UpdateVendorRequest {
    pub fn validate(self) -> Result<VendorPatch, ApiError> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("name", &self.name),
            ("contact_details", &self.contact_details),
            ("address", &self.address),
        ] {
            if value.as_deref().is_some_and(|s| s.trim().is_empty()) {
                errors.add(field, BLANK);
            }
        }
        errors.into_result()?;
        Ok(VendorPatch {
            name: self.name,
            contact_details: self.contact_details,
            address: self.address,
        })
    }
}

/// Read-only projection of a vendor's identity and metrics.
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub name: String,
    pub vendor_code: String,
    pub on_time_delivery_rate: Option<f64>,
    pub quality_rating_avg: Option<f64>,
    pub average_response_time: Option<f64>,
    pub fulfillment_rate: Option<f64>,
}

impl From<Vendor> for PerformanceResponse {
    fn from(vendor: Vendor) -> Self {
        Self {
            name: vendor.name,
            vendor_code: vendor.vendor_code,
            on_time_delivery_rate: vendor.on_time_delivery_rate,
            quality_rating_avg: vendor.quality_rating_avg,
            average_response_time: vendor.average_response_time,
            fulfillment_rate: vendor.fulfillment_rate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    pub vendor_id: Option<i32>,
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub items: Option<Value>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
    pub quality_rating: Option<f64>,
    pub issue_date: Option<DateTime<Utc>>,
    pub acknowledgment_date: Option<DateTime<Utc>>,
}

impl CreatePurchaseOrderRequest {
    pub fn validate(self) -> Result<NewPurchaseOrder, ApiError> {
        let mut errors = ValidationErrors::new();

        if self.vendor_id.is_none() {
            errors.add("vendor_id", REQUIRED);
        }
        if self.order_date.is_none() {
            errors.add("order_date", REQUIRED);
        }
        if self.delivery_date.is_none() {
            errors.add("delivery_date", REQUIRED);
        }
        if self.items.is_none() {
            errors.add("items", REQUIRED);
        }
        if self.quantity.is_none() {
            errors.add("quantity", REQUIRED);
        }

        let status = match self.status.as_deref() {
            None => OrderStatus::default(),
            Some(raw) => match raw.parse() {
                Ok(status) => status,
                Err(message) => {
                    errors.add("status", message);
                    OrderStatus::default()
                }
            },
        };

        errors.into_result()?;
        let (Some(vendor_id), Some(order_date), Some(delivery_date), Some(items), Some(quantity)) = (
            self.vendor_id,
            self.order_date,
            self.delivery_date,
            self.items,
            self.quantity,
        ) else {
            return Err(ApiError::internal("required fields missing after validation"));
        };

        Ok(NewPurchaseOrder {
            vendor_id: VendorId::new(vendor_id),
            order_date,
            delivery_date,
            items,
            quantity,
            status,
            quality_rating: self.quality_rating,
            issue_date: self.issue_date,
            acknowledgment_date: self.acknowledgment_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePurchaseOrderRequest {
    pub order_date: Option<DateTime<Utc>>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub items: Option<Value>,
    pub quantity: Option<i32>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub quality_rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub issue_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub acknowledgment_date: Option<Option<DateTime<Utc>>>,
}

impl UpdatePurchaseOrderRequest {
    pub fn validate(self) -> Result<PurchaseOrderPatch, ApiError> {
        let mut errors = ValidationErrors::new();

        let status = match self.status.as_deref() {
            None => None,
            Some(raw) => match raw.parse() {
                Ok(status) => Some(status),
                Err(message) => {
                    errors.add("status", message);
                    None
                }
            },
        };

        errors.into_result()?;
        Ok(PurchaseOrderPatch {
            order_date: self.order_date,
            delivery_date: self.delivery_date,
            items: self.items,
            quantity: self.quantity,
            status,
            quality_rating: self.quality_rating,
            issue_date: self.issue_date,
            acknowledgment_date: self.acknowledgment_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
