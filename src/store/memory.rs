//! In-memory store implementation for testing.

use std::collections::BTreeMap;

use chrono::Utc;
use parking_lot::RwLock;

use super::{PerformanceStore, PurchaseOrderStore, VendorStore};
use crate::domain::{
    generate_po_number, generate_vendor_code, HistoricalPerformance, NewPurchaseOrder, NewVendor,
    PerformanceMetrics, PurchaseOrder, PurchaseOrderId, PurchaseOrderPatch, Vendor, VendorId,
    VendorPatch,
};
use crate::error::{Result, StoreError};

#[derive(Debug, Default)]
struct Inner {
    vendors: BTreeMap<i32, Vendor>,
    orders: BTreeMap<i32, PurchaseOrder>,
    history: BTreeMap<i32, HistoricalPerformance>,
    next_vendor_id: i32,
    next_order_id: i32,
    next_history_id: i32,
}

/// In-memory store for testing purposes.
///
/// A single lock over all three maps keeps the paired writes (vendor +
/// initial snapshot, metrics onto vendor + history) atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl VendorStore for MemoryStore {
    async fn list_vendors(&self) -> Result<Vec<Vendor>> {
        let inner = self.inner.read();
        let mut vendors: Vec<Vendor> = inner.vendors.values().cloned().collect();
        vendors.sort_by_key(|v| v.created);
        Ok(vendors)
    }

    async fn create_vendor(&self, new: NewVendor) -> Result<Vendor> {
        let mut inner = self.inner.write();
        let now = Utc::now();

        inner.next_vendor_id += 1;
        let id = inner.next_vendor_id;
        let vendor = Vendor {
            id: VendorId::new(id),
            name: new.name,
            contact_details: new.contact_details,
            address: new.address,
            vendor_code: generate_vendor_code(),
            on_time_delivery_rate: None,
            quality_rating_avg: None,
            average_response_time: None,
            fulfillment_rate: None,
            created: now,
        };
        inner.vendors.insert(id, vendor.clone());

        inner.next_history_id += 1;
        let history_id = inner.next_history_id;
        inner.history.insert(
            history_id,
            HistoricalPerformance {
                id: history_id,
                vendor_id: vendor.id,
                date: now,
                on_time_delivery_rate: None,
                quality_rating_avg: None,
                average_response_time: None,
                fulfillment_rate: None,
            },
        );

        Ok(vendor)
    }

    async fn get_vendor(&self, id: VendorId) -> Result<Option<Vendor>> {
        Ok(self.inner.read().vendors.get(&id.get()).cloned())
    }

    async fn update_vendor(&self, id: VendorId, patch: VendorPatch) -> Result<Option<Vendor>> {
        let mut inner = self.inner.write();
        let Some(vendor) = inner.vendors.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            vendor.name = name;
        }
        if let Some(contact_details) = patch.contact_details {
            vendor.contact_details = contact_details;
        }
        if let Some(address) = patch.address {
            vendor.address = address;
        }
        Ok(Some(vendor.clone()))
    }

    async fn delete_vendor(&self, id: VendorId) -> Result<bool> {
        let mut inner = self.inner.write();
        let existed = inner.vendors.remove(&id.get()).is_some();
        if existed {
            inner.orders.retain(|_, o| o.vendor_id != id);
            inner.history.retain(|_, h| h.vendor_id != id);
        }
        Ok(existed)
    }
}

impl PurchaseOrderStore for MemoryStore {
    async fn list_purchase_orders(&self, vendor: Option<VendorId>) -> Result<Vec<PurchaseOrder>> {
        let inner = self.inner.read();
        let mut orders: Vec<PurchaseOrder> = inner
            .orders
            .values()
            .filter(|o| vendor.map_or(true, |v| o.vendor_id == v))
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.order_date);
        Ok(orders)
    }

    async fn create_purchase_order(&self, new: NewPurchaseOrder) -> Result<PurchaseOrder> {
        let mut inner = self.inner.write();
        if !inner.vendors.contains_key(&new.vendor_id.get()) {
            return Err(StoreError::NotFound { entity: "vendor" }.into());
        }

        inner.next_order_id += 1;
        let id = inner.next_order_id;
        let order = PurchaseOrder {
            id: PurchaseOrderId::new(id),
            po_number: generate_po_number(),
            vendor_id: new.vendor_id,
            order_date: new.order_date,
            delivery_date: new.delivery_date,
            items: new.items,
            quantity: new.quantity,
            status: new.status,
            quality_rating: new.quality_rating,
            issue_date: new.issue_date,
            acknowledgment_date: new.acknowledgment_date,
        };
        inner.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn get_purchase_order(&self, id: PurchaseOrderId) -> Result<Option<PurchaseOrder>> {
        Ok(self.inner.read().orders.get(&id.get()).cloned())
    }

    async fn update_purchase_order(
        &self,
        id: PurchaseOrderId,
        patch: PurchaseOrderPatch,
    ) -> Result<Option<PurchaseOrder>> {
        let mut inner = self.inner.write();
        let Some(order) = inner.orders.get_mut(&id.get()) else {
            return Ok(None);
        };
        if let Some(order_date) = patch.order_date {
            order.order_date = order_date;
        }
        if let Some(delivery_date) = patch.delivery_date {
            order.delivery_date = delivery_date;
        }
        if let Some(items) = patch.items {
            order.items = items;
        }
        if let Some(quantity) = patch.quantity {
            order.quantity = quantity;
        }
        if let Some(status) = patch.status {
            order.status = status;
        }
        if let Some(quality_rating) = patch.quality_rating {
            order.quality_rating = quality_rating;
        }
        if let Some(issue_date) = patch.issue_date {
            order.issue_date = issue_date;
        }
        if let Some(acknowledgment_date) = patch.acknowledgment_date {
            order.acknowledgment_date = acknowledgment_date;
        }
        Ok(Some(order.clone()))
    }

    async fn delete_purchase_order(&self, id: PurchaseOrderId) -> Result<bool> {
        Ok(self.inner.write().orders.remove(&id.get()).is_some())
    }
}

impl PerformanceStore for MemoryStore {
    async fn history_for_vendor(&self, vendor: VendorId) -> Result<Vec<HistoricalPerformance>> {
        let inner = self.inner.read();
        Ok(inner
            .history
            .values()
            .filter(|h| h.vendor_id == vendor)
            .cloned()
            .collect())
    }

    async fn apply_metrics(&self, vendor: VendorId, metrics: PerformanceMetrics) -> Result<()> {
        let mut inner = self.inner.write();
        let Some(record) = inner.vendors.get_mut(&vendor.get()) else {
            return Err(StoreError::NotFound { entity: "vendor" }.into());
        };
        record.on_time_delivery_rate = Some(metrics.on_time_delivery_rate);
        record.quality_rating_avg = Some(metrics.quality_rating_avg);
        record.average_response_time = Some(metrics.average_response_time);
        record.fulfillment_rate = Some(metrics.fulfillment_rate);

        for snapshot in inner.history.values_mut().filter(|h| h.vendor_id == vendor) {
            snapshot.on_time_delivery_rate = Some(metrics.on_time_delivery_rate);
            snapshot.quality_rating_avg = Some(metrics.quality_rating_avg);
            snapshot.average_response_time = Some(metrics.average_response_time);
            snapshot.fulfillment_rate = Some(metrics.fulfillment_rate);
        }
        Ok(())
    }
}
