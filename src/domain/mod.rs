//! Domain types for vendors, purchase orders, and performance metrics.

mod ids;
mod metrics;
mod purchase_order;
mod vendor;

pub use ids::{PurchaseOrderId, VendorId};
pub use metrics::{HistoricalPerformance, PerformanceMetrics};
pub use purchase_order::{
    generate_po_number, NewPurchaseOrder, OrderStatus, PurchaseOrder, PurchaseOrderPatch,
};
pub use vendor::{generate_vendor_code, NewVendor, Vendor, VendorPatch};
