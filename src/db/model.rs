//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{historical_performances, purchase_orders, vendors};

/// Database row for a vendor (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = vendors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VendorRow {
    pub id: i32,
    pub name: String,
    pub contact_details: String,
    pub address: String,
    pub vendor_code: String,
    pub on_time_delivery_rate: Option<f64>,
    pub quality_rating_avg: Option<f64>,
    pub average_response_time: Option<f64>,
    pub fulfillment_rate: Option<f64>,
    pub created: String,
}

/// Database row for a vendor (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = vendors)]
pub struct NewVendorRow {
    pub name: String,
    pub contact_details: String,
    pub address: String,
    pub vendor_code: String,
    pub created: String,
}

/// Database row for a purchase order (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = purchase_orders)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PurchaseOrderRow {
    pub id: i32,
    pub po_number: String,
    pub vendor_id: i32,
    pub order_date: String,
    pub delivery_date: String,
    pub items: String,
    pub quantity: i32,
    pub status: String,
    pub quality_rating: Option<f64>,
    pub issue_date: Option<String>,
    pub acknowledgment_date: Option<String>,
}

/// Database row for a purchase order (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = purchase_orders)]
pub struct NewPurchaseOrderRow {
    pub po_number: String,
    pub vendor_id: i32,
    pub order_date: String,
    pub delivery_date: String,
    pub items: String,
    pub quantity: i32,
    pub status: String,
    pub quality_rating: Option<f64>,
    pub issue_date: Option<String>,
    pub acknowledgment_date: Option<String>,
}

/// Database row for a historical performance snapshot (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = historical_performances)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HistoricalPerformanceRow {
    pub id: i32,
    pub vendor_id: i32,
    pub date: String,
    pub on_time_delivery_rate: Option<f64>,
    pub quality_rating_avg: Option<f64>,
    pub average_response_time: Option<f64>,
    pub fulfillment_rate: Option<f64>,
}

/// Database row for a historical performance snapshot (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = historical_performances)]
pub struct NewHistoricalPerformanceRow {
    pub vendor_id: i32,
    pub date: String,
    pub on_time_delivery_rate: Option<f64>,
    pub quality_rating_avg: Option<f64>,
    pub average_response_time: Option<f64>,
    pub fulfillment_rate: Option<f64>,
}
