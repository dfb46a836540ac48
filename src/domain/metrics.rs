//! Performance metric aggregation over a vendor's purchase orders.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{OrderStatus, PurchaseOrder, VendorId};

/// The four derived metrics computed from a vendor's purchase-order set.
///
/// Every rate carries a zero-denominator guard: a vendor with no completed
/// orders gets 0 across the board rather than a division fault.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Share of completed orders delivered on or before their issue date
    /// comparison (`delivery_date >= issue_date`), in percent.
    pub on_time_delivery_rate: f64,
    /// Mean of the non-null quality ratings over completed orders (0-5).
    pub quality_rating_avg: f64,
    /// Mean issue-to-acknowledgment time over completed orders, in seconds.
    pub average_response_time: f64,
    /// Share of all orders that are completed, in percent.
    pub fulfillment_rate: f64,
}

impl PerformanceMetrics {
    /// Compute the metrics from the full purchase-order set of one vendor.
    ///
    /// An order with a null `issue_date` never satisfies the on-time
    /// comparison: it stays in the completed count and registers as not on
    /// time, matching the SQL NULL comparison semantics of the original
    /// queries.
    pub fn compute(orders: &[PurchaseOrder]) -> Self {
        let completed: Vec<&PurchaseOrder> = orders
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .collect();

        let on_time_delivery_rate = if completed.is_empty() {
            0.0
        } else {
            let on_time = completed
                .iter()
                .filter(|o| o.issue_date.is_some_and(|issued| o.delivery_date >= issued))
                .count();
            on_time as f64 / completed.len() as f64 * 100.0
        };

        let ratings: Vec<f64> = completed.iter().filter_map(|o| o.quality_rating).collect();
        let quality_rating_avg = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        };

        let response_times: Vec<f64> = completed
            .iter()
            .filter_map(|o| match (o.acknowledgment_date, o.issue_date) {
                (Some(ack), Some(issued)) => {
                    Some((ack - issued).num_milliseconds() as f64 / 1000.0)
                }
                _ => None,
            })
            .collect();
        let average_response_time = if response_times.is_empty() {
            0.0
        } else {
            response_times.iter().sum::<f64>() / response_times.len() as f64
        };

        let fulfillment_rate = if completed.is_empty() {
            0.0
        } else {
            completed.len() as f64 / orders.len() as f64 * 100.0
        };

        Self {
            on_time_delivery_rate,
            quality_rating_avg,
            average_response_time,
            fulfillment_rate,
        }
    }

    /// Metrics for a vendor with no completed orders.
    pub fn zeroed() -> Self {
        Self {
            on_time_delivery_rate: 0.0,
            quality_rating_avg: 0.0,
            average_response_time: 0.0,
            fulfillment_rate: 0.0,
        }
    }
}

/// A stored snapshot of a vendor's metrics.
///
/// One row is created alongside the vendor with all metrics unset; every
/// recomputation overwrites the metric fields of all of the vendor's rows
/// while leaving `date` untouched.
#[derive(Debug, Clone, Serialize)]
pub struct HistoricalPerformance {
    pub id: i32,
    pub vendor_id: VendorId,
    pub date: DateTime<Utc>,
    pub on_time_delivery_rate: Option<f64>,
    pub quality_rating_avg: Option<f64>,
    pub average_response_time: Option<f64>,
    pub fulfillment_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::domain::PurchaseOrderId;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn order(status: OrderStatus) -> PurchaseOrder {
        PurchaseOrder {
            id: PurchaseOrderId::new(1),
            po_number: "0000000001".into(),
            vendor_id: VendorId::new(1),
            order_date: ts(8),
            delivery_date: ts(12),
            items: json!([{"sku": "A-1", "qty": 2}]),
            quantity: 2,
            status,
            quality_rating: None,
            issue_date: None,
            acknowledgment_date: None,
        }
    }

    #[test]
    fn no_orders_yields_zeroes() {
        assert_eq!(PerformanceMetrics::compute(&[]), PerformanceMetrics::zeroed());
    }

    #[test]
    fn pending_orders_only_yields_zeroes() {
        let orders = vec![order(OrderStatus::Pending), order(OrderStatus::Canceled)];
        assert_eq!(
            PerformanceMetrics::compute(&orders),
            PerformanceMetrics::zeroed()
        );
    }

    #[test]
    fn mixed_order_set_matches_worked_example() {
        // One on-time completed order rated 4.0, one late completed order
        // rated 5.0, one pending order.
        let mut on_time = order(OrderStatus::Completed);
        on_time.issue_date = Some(ts(9));
        on_time.delivery_date = ts(12);
        on_time.quality_rating = Some(4.0);

        let mut late = order(OrderStatus::Completed);
        late.issue_date = Some(ts(14));
        late.delivery_date = ts(12);
        late.quality_rating = Some(5.0);

        let orders = vec![on_time, late, order(OrderStatus::Pending)];
        let metrics = PerformanceMetrics::compute(&orders);

        assert!((metrics.on_time_delivery_rate - 50.0).abs() < 1e-9);
        assert!((metrics.quality_rating_avg - 4.5).abs() < 1e-9);
        assert!((metrics.fulfillment_rate - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn null_issue_date_counts_as_not_on_time() {
        let mut with_issue = order(OrderStatus::Completed);
        with_issue.issue_date = Some(ts(9));
        with_issue.delivery_date = ts(12);

        // Completed but never issued: stays in the denominator.
        let without_issue = order(OrderStatus::Completed);

        let metrics = PerformanceMetrics::compute(&[with_issue, without_issue]);
        assert!((metrics.on_time_delivery_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn response_time_averages_only_acknowledged_orders() {
        let mut fast = order(OrderStatus::Completed);
        fast.issue_date = Some(ts(9));
        fast.acknowledgment_date = Some(ts(10));

        let mut slow = order(OrderStatus::Completed);
        slow.issue_date = Some(ts(9));
        slow.acknowledgment_date = Some(ts(12));

        // No acknowledgment: excluded from the response-time mean entirely.
        let mut unacknowledged = order(OrderStatus::Completed);
        unacknowledged.issue_date = Some(ts(9));

        let metrics = PerformanceMetrics::compute(&[fast, slow, unacknowledged]);
        assert!((metrics.average_response_time - 7200.0).abs() < 1e-9);
    }

    #[test]
    fn quality_average_ignores_unrated_orders() {
        let mut rated = order(OrderStatus::Completed);
        rated.quality_rating = Some(3.0);
        let unrated = order(OrderStatus::Completed);

        let metrics = PerformanceMetrics::compute(&[rated, unrated]);
        assert!((metrics.quality_rating_avg - 3.0).abs() < 1e-9);
    }

    #[test]
    fn fulfillment_rate_counts_all_statuses_in_denominator() {
        let orders = vec![
            order(OrderStatus::Completed),
            order(OrderStatus::Pending),
            order(OrderStatus::Canceled),
            order(OrderStatus::Completed),
        ];
        let metrics = PerformanceMetrics::compute(&orders);
        assert!((metrics.fulfillment_rate - 50.0).abs() < 1e-9);
    }
}
