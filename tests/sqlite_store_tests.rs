//! SQLite store behavior around partial updates and ordering.

use chrono::{TimeZone, Utc};
use serde_json::json;

use vendord::domain::{
    NewPurchaseOrder, NewVendor, OrderStatus, PurchaseOrderPatch, VendorPatch,
};
use vendord::store::{PurchaseOrderStore, VendorStore};
use vendord::testkit;

fn new_vendor(name: &str) -> NewVendor {
    NewVendor {
        name: name.into(),
        contact_details: "ops@acme.example".into(),
        address: "1 Factory Rd".into(),
    }
}

fn order_on(
    vendor: vendord::domain::VendorId,
    day: u32,
) -> NewPurchaseOrder {
    NewPurchaseOrder {
        vendor_id: vendor,
        order_date: Utc.with_ymd_and_hms(2024, 5, day, 8, 0, 0).unwrap(),
        delivery_date: Utc.with_ymd_and_hms(2024, 5, day + 2, 8, 0, 0).unwrap(),
        items: json!([{"sku": "W-100", "qty": 1}]),
        quantity: 1,
        status: OrderStatus::Pending,
        quality_rating: None,
        issue_date: None,
        acknowledgment_date: None,
    }
}

#[tokio::test]
async fn orders_list_sorted_by_order_date() {
    let store = testkit::sqlite_store();
    let vendor = store.create_vendor(new_vendor("Acme Supply")).await.unwrap();

    // Inserted newest-first; listed oldest-first.
    store.create_purchase_order(order_on(vendor.id, 9)).await.unwrap();
    store.create_purchase_order(order_on(vendor.id, 3)).await.unwrap();
    store.create_purchase_order(order_on(vendor.id, 6)).await.unwrap();

    let orders = store.list_purchase_orders(Some(vendor.id)).await.unwrap();
    let days: Vec<u32> = orders
        .iter()
        .map(|o| chrono::Datelike::day(&o.order_date))
        .collect();
    assert_eq!(days, vec![3, 6, 9]);
}

#[tokio::test]
async fn empty_patch_is_a_no_op() {
    let store = testkit::sqlite_store();
    let vendor = store.create_vendor(new_vendor("Acme Supply")).await.unwrap();

    let updated = store
        .update_vendor(vendor.id, VendorPatch::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, vendor.name);
    assert_eq!(updated.vendor_code, vendor.vendor_code);
}

#[tokio::test]
async fn patch_can_null_out_nullable_fields() {
    let store = testkit::sqlite_store();
    let vendor = store.create_vendor(new_vendor("Acme Supply")).await.unwrap();

    let mut new = order_on(vendor.id, 3);
    new.quality_rating = Some(4.0);
    new.issue_date = Some(Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap());
    let order = store.create_purchase_order(new).await.unwrap();

    let updated = store
        .update_purchase_order(
            order.id,
            PurchaseOrderPatch {
                quality_rating: Some(None),
                issue_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert!(updated.quality_rating.is_none());
    assert!(updated.issue_date.is_none());
    // Untouched fields survive.
    assert_eq!(updated.quantity, order.quantity);
    assert_eq!(updated.po_number, order.po_number);
}

#[tokio::test]
async fn status_changes_round_trip_freely() {
    let store = testkit::sqlite_store();
    let vendor = store.create_vendor(new_vendor("Acme Supply")).await.unwrap();
    let order = store.create_purchase_order(order_on(vendor.id, 3)).await.unwrap();

    // No transition graph: pending -> canceled -> completed -> pending.
    for status in [
        OrderStatus::Canceled,
        OrderStatus::Completed,
        OrderStatus::Pending,
    ] {
        let updated = store
            .update_purchase_order(
                order.id,
                PurchaseOrderPatch {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, status);
    }
}

#[tokio::test]
async fn items_payload_round_trips_as_json() {
    let store = testkit::sqlite_store();
    let vendor = store.create_vendor(new_vendor("Acme Supply")).await.unwrap();

    let mut new = order_on(vendor.id, 3);
    new.items = json!({"lines": [{"sku": "A", "qty": 1}, {"sku": "B", "qty": 2}], "note": "rush"});
    let order = store.create_purchase_order(new.clone()).await.unwrap();

    let fetched = store
        .get_purchase_order(order.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.items, new.items);
}

#[tokio::test]
async fn vendor_codes_are_unique_per_vendor() {
    let store = testkit::sqlite_store();
    let a = store.create_vendor(new_vendor("Acme Supply")).await.unwrap();
    let b = store.create_vendor(new_vendor("Globex Parts")).await.unwrap();
    assert_ne!(a.vendor_code, b.vendor_code);
}
