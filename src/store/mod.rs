//! Persistence layer with pluggable storage backends.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::future::Future;

use crate::domain::{
    HistoricalPerformance, NewPurchaseOrder, NewVendor, PerformanceMetrics, PurchaseOrder,
    PurchaseOrderId, PurchaseOrderPatch, Vendor, VendorId, VendorPatch,
};
use crate::error::Result;

/// Storage operations for vendors.
pub trait VendorStore: Send + Sync {
    /// List all vendors, ordered by creation time.
    fn list_vendors(&self) -> impl Future<Output = Result<Vec<Vendor>>> + Send;

    /// Create a vendor together with its initial (all-null) performance
    /// snapshot, as one atomic unit.
    fn create_vendor(&self, new: NewVendor) -> impl Future<Output = Result<Vendor>> + Send;

    /// Get a vendor by ID.
    fn get_vendor(&self, id: VendorId) -> impl Future<Output = Result<Option<Vendor>>> + Send;

    /// Apply a partial update. Returns `None` if the vendor does not exist.
    fn update_vendor(
        &self,
        id: VendorId,
        patch: VendorPatch,
    ) -> impl Future<Output = Result<Option<Vendor>>> + Send;

    /// Delete a vendor and everything it owns: purchase orders and history
    /// rows go with it. Returns whether a vendor was deleted.
    fn delete_vendor(&self, id: VendorId) -> impl Future<Output = Result<bool>> + Send;
}

/// Storage operations for purchase orders.
pub trait PurchaseOrderStore: Send + Sync {
    /// List purchase orders, optionally restricted to one vendor, ordered by
    /// order date.
    fn list_purchase_orders(
        &self,
        vendor: Option<VendorId>,
    ) -> impl Future<Output = Result<Vec<PurchaseOrder>>> + Send;

    /// Create a purchase order. Fails with a not-found error if the owning
    /// vendor does not exist.
    fn create_purchase_order(
        &self,
        new: NewPurchaseOrder,
    ) -> impl Future<Output = Result<PurchaseOrder>> + Send;

    /// Get a purchase order by ID.
    fn get_purchase_order(
        &self,
        id: PurchaseOrderId,
    ) -> impl Future<Output = Result<Option<PurchaseOrder>>> + Send;

    /// Apply a partial update. Returns `None` if the order does not exist.
    fn update_purchase_order(
        &self,
        id: PurchaseOrderId,
        patch: PurchaseOrderPatch,
    ) -> impl Future<Output = Result<Option<PurchaseOrder>>> + Send;

    /// Delete a purchase order. Returns whether an order was deleted.
    fn delete_purchase_order(
        &self,
        id: PurchaseOrderId,
    ) -> impl Future<Output = Result<bool>> + Send;
}

/// Storage operations for derived performance metrics.
pub trait PerformanceStore: Send + Sync {
    /// List a vendor's historical performance snapshots.
    fn history_for_vendor(
        &self,
        vendor: VendorId,
    ) -> impl Future<Output = Result<Vec<HistoricalPerformance>>> + Send;

    /// Write freshly computed metrics onto the vendor record and onto every
    /// one of its history rows, as one atomic unit: a reader never observes
    /// an updated vendor with stale history rows or vice versa.
    fn apply_metrics(
        &self,
        vendor: VendorId,
        metrics: PerformanceMetrics,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Convenience bound for the full storage surface.
pub trait Store: VendorStore + PurchaseOrderStore + PerformanceStore + 'static {}

impl<T> Store for T where T: VendorStore + PurchaseOrderStore + PerformanceStore + 'static {}
