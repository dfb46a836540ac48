//! Vendor metric recalculation, triggered by purchase-order writes.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{OrderStatus, PerformanceMetrics, PurchaseOrder, VendorId};
use crate::error::Result;
use crate::store::{PerformanceStore, PurchaseOrderStore};

/// Recomputes a vendor's four performance metrics from its full
/// purchase-order set and persists them.
///
/// The write path calls [`MetricsEngine::order_saved`] right after a
/// purchase order is persisted; nothing else writes the metric fields.
pub struct MetricsEngine<S> {
    store: Arc<S>,
}

impl<S> Clone for MetricsEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> MetricsEngine<S>
where
    S: PurchaseOrderStore + PerformanceStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// React to a saved purchase order.
    ///
    /// A no-op unless the saved order's status is completed. The caller's
    /// purchase-order write is already durable at this point; a failure here
    /// surfaces to the caller without rolling that write back.
    pub async fn order_saved(&self, order: &PurchaseOrder) -> Result<()> {
        if order.status != OrderStatus::Completed {
            return Ok(());
        }
        self.recalculate(order.vendor_id).await
    }

    /// Recompute and persist the metrics for one vendor.
    ///
    /// Recomputing twice with unchanged inputs yields identical output, so
    /// repeated saves of a completed order are harmless.
    pub async fn recalculate(&self, vendor: VendorId) -> Result<()> {
        let orders = self.store.list_purchase_orders(Some(vendor)).await?;
        let metrics = PerformanceMetrics::compute(&orders);

        if let Err(e) = self.store.apply_metrics(vendor, metrics).await {
            warn!(vendor = %vendor, error = %e, "Metric recalculation failed to persist");
            return Err(e);
        }

        debug!(
            vendor = %vendor,
            orders = orders.len(),
            on_time_delivery_rate = metrics.on_time_delivery_rate,
            quality_rating_avg = metrics.quality_rating_avg,
            average_response_time = metrics.average_response_time,
            fulfillment_rate = metrics.fulfillment_rate,
            "Recalculated vendor metrics"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::domain::{NewPurchaseOrder, NewVendor, PurchaseOrderPatch};
    use crate::store::{MemoryStore, VendorStore};

    fn engine_with_store() -> (MetricsEngine<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (MetricsEngine::new(Arc::clone(&store)), store)
    }

    async fn vendor(store: &MemoryStore) -> VendorId {
        store
            .create_vendor(NewVendor {
                name: "Acme Supply".into(),
                contact_details: "ops@acme.example".into(),
                address: "1 Factory Rd".into(),
            })
            .await
            .unwrap()
            .id
    }

    fn order(vendor: VendorId, status: OrderStatus) -> NewPurchaseOrder {
        NewPurchaseOrder {
            vendor_id: vendor,
            order_date: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            delivery_date: Utc.with_ymd_and_hms(2024, 5, 3, 8, 0, 0).unwrap(),
            items: json!([{"sku": "W-100", "qty": 5}]),
            quantity: 5,
            status,
            quality_rating: None,
            issue_date: None,
            acknowledgment_date: None,
        }
    }

    #[tokio::test]
    async fn pending_save_leaves_metrics_unset() {
        let (engine, store) = engine_with_store();
        let vendor_id = vendor(&store).await;

        let saved = store
            .create_purchase_order(order(vendor_id, OrderStatus::Pending))
            .await
            .unwrap();
        engine.order_saved(&saved).await.unwrap();

        let vendor = store.get_vendor(vendor_id).await.unwrap().unwrap();
        assert!(vendor.on_time_delivery_rate.is_none());
        assert!(vendor.fulfillment_rate.is_none());
    }

    #[tokio::test]
    async fn completed_save_writes_metrics_and_history() {
        let (engine, store) = engine_with_store();
        let vendor_id = vendor(&store).await;

        let mut new = order(vendor_id, OrderStatus::Completed);
        new.issue_date = Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        new.quality_rating = Some(4.0);
        let saved = store.create_purchase_order(new).await.unwrap();
        engine.order_saved(&saved).await.unwrap();

        let vendor = store.get_vendor(vendor_id).await.unwrap().unwrap();
        assert_eq!(vendor.on_time_delivery_rate, Some(100.0));
        assert_eq!(vendor.quality_rating_avg, Some(4.0));
        assert_eq!(vendor.fulfillment_rate, Some(100.0));

        let history = store.history_for_vendor(vendor_id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(
            history[0].on_time_delivery_rate,
            vendor.on_time_delivery_rate
        );
        assert_eq!(history[0].fulfillment_rate, vendor.fulfillment_rate);
    }

    #[tokio::test]
    async fn recalculation_is_idempotent() {
        let (engine, store) = engine_with_store();
        let vendor_id = vendor(&store).await;

        let mut new = order(vendor_id, OrderStatus::Completed);
        new.issue_date = Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        new.quality_rating = Some(3.5);
        let saved = store.create_purchase_order(new).await.unwrap();

        engine.order_saved(&saved).await.unwrap();
        let first = store.get_vendor(vendor_id).await.unwrap().unwrap();

        // Saving again without changing inputs recomputes the same values.
        let resaved = store
            .update_purchase_order(saved.id, PurchaseOrderPatch::default())
            .await
            .unwrap()
            .unwrap();
        engine.order_saved(&resaved).await.unwrap();
        let second = store.get_vendor(vendor_id).await.unwrap().unwrap();

        assert_eq!(first.on_time_delivery_rate, second.on_time_delivery_rate);
        assert_eq!(first.quality_rating_avg, second.quality_rating_avg);
        assert_eq!(first.average_response_time, second.average_response_time);
        assert_eq!(first.fulfillment_rate, second.fulfillment_rate);
    }

    #[tokio::test]
    async fn completed_set_shrinks_when_order_leaves_completed() {
        let (engine, store) = engine_with_store();
        let vendor_id = vendor(&store).await;

        let mut new = order(vendor_id, OrderStatus::Completed);
        new.issue_date = Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        let saved = store.create_purchase_order(new).await.unwrap();
        engine.order_saved(&saved).await.unwrap();

        // Flip it back to pending and complete a second, late order: the
        // recomputation sees only the currently-completed set.
        store
            .update_purchase_order(
                saved.id,
                PurchaseOrderPatch {
                    status: Some(OrderStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let mut late = order(vendor_id, OrderStatus::Completed);
        late.issue_date = Some(Utc.with_ymd_and_hms(2024, 5, 4, 9, 0, 0).unwrap());
        let late = store.create_purchase_order(late).await.unwrap();
        engine.order_saved(&late).await.unwrap();

        let vendor = store.get_vendor(vendor_id).await.unwrap().unwrap();
        assert_eq!(vendor.on_time_delivery_rate, Some(0.0));
        assert_eq!(vendor.fulfillment_rate, Some(50.0));
    }
}
