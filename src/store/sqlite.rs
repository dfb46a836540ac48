//! SQLite store implementation using Diesel.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;

use super::{PerformanceStore, PurchaseOrderStore, VendorStore};
use crate::db::model::{
    HistoricalPerformanceRow, NewHistoricalPerformanceRow, NewPurchaseOrderRow, NewVendorRow,
    PurchaseOrderRow, VendorRow,
};
use crate::db::schema::{historical_performances, purchase_orders, vendors};
use crate::db::DbPool;
use crate::domain::{
    generate_po_number, generate_vendor_code, HistoricalPerformance, NewPurchaseOrder, NewVendor,
    PerformanceMetrics, PurchaseOrder, PurchaseOrderId, PurchaseOrderPatch, Vendor, VendorId,
    VendorPatch,
};
use crate::error::{Result, StoreError};

/// SQLite-backed store for vendors, purchase orders, and history rows.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

/// Helper struct for querying last_insert_rowid().
#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::Integer)]
    #[diesel(column_name = "id")]
    id: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = vendors)]
struct VendorChanges {
    name: Option<String>,
    contact_details: Option<String>,
    address: Option<String>,
}

#[derive(AsChangeset)]
#[diesel(table_name = purchase_orders)]
struct PurchaseOrderChanges {
    order_date: Option<String>,
    delivery_date: Option<String>,
    items: Option<String>,
    quantity: Option<i32>,
    status: Option<String>,
    quality_rating: Option<Option<f64>>,
    issue_date: Option<Option<String>>,
    acknowledgment_date: Option<Option<String>>,
}

impl SqliteStore {
    /// Create a new SQLite store over an existing pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        crate::db::configure_sqlite_connection(&mut conn)?;
        Ok(conn)
    }

    fn last_insert_rowid(conn: &mut SqliteConnection) -> QueryResult<i32> {
        // SQLite has no RETURNING on this diesel feature set; must be read
        // immediately after the INSERT on the same connection.
        diesel::sql_query("SELECT last_insert_rowid() AS id")
            .get_result::<LastInsertRowId>(conn)
            .map(|row| row.id)
    }

    fn parse_ts(value: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StoreError::Database(format!("bad timestamp in row: {e}")).into())
    }

    fn vendor_from_row(row: VendorRow) -> Result<Vendor> {
        Ok(Vendor {
            id: VendorId::new(row.id),
            name: row.name,
            contact_details: row.contact_details,
            address: row.address,
            vendor_code: row.vendor_code,
            on_time_delivery_rate: row.on_time_delivery_rate,
            quality_rating_avg: row.quality_rating_avg,
            average_response_time: row.average_response_time,
            fulfillment_rate: row.fulfillment_rate,
            created: Self::parse_ts(&row.created)?,
        })
    }

    fn order_from_row(row: PurchaseOrderRow) -> Result<PurchaseOrder> {
        let status = row
            .status
            .parse()
            .map_err(|e| StoreError::Database(format!("bad status in row {}: {e}", row.id)))?;
        Ok(PurchaseOrder {
            id: PurchaseOrderId::new(row.id),
            po_number: row.po_number,
            vendor_id: VendorId::new(row.vendor_id),
            order_date: Self::parse_ts(&row.order_date)?,
            delivery_date: Self::parse_ts(&row.delivery_date)?,
            items: serde_json::from_str(&row.items)?,
            quantity: row.quantity,
            status,
            quality_rating: row.quality_rating,
            issue_date: row.issue_date.as_deref().map(Self::parse_ts).transpose()?,
            acknowledgment_date: row
                .acknowledgment_date
                .as_deref()
                .map(Self::parse_ts)
                .transpose()?,
        })
    }

    fn history_from_row(row: HistoricalPerformanceRow) -> Result<HistoricalPerformance> {
        Ok(HistoricalPerformance {
            id: row.id,
            vendor_id: VendorId::new(row.vendor_id),
            date: Self::parse_ts(&row.date)?,
            on_time_delivery_rate: row.on_time_delivery_rate,
            quality_rating_avg: row.quality_rating_avg,
            average_response_time: row.average_response_time,
            fulfillment_rate: row.fulfillment_rate,
        })
    }
}

impl VendorStore for SqliteStore {
    async fn list_vendors(&self) -> Result<Vec<Vendor>> {
        let mut conn = self.conn()?;
        let rows: Vec<VendorRow> = vendors::table
            .order(vendors::created.asc())
            .load(&mut conn)
            .map_err(StoreError::from)?;
        rows.into_iter().map(Self::vendor_from_row).collect()
    }

    async fn create_vendor(&self, new: NewVendor) -> Result<Vendor> {
        let mut conn = self.conn()?;
        let now = Utc::now();
        let row = NewVendorRow {
            name: new.name,
            contact_details: new.contact_details,
            address: new.address,
            vendor_code: generate_vendor_code(),
            created: now.to_rfc3339(),
        };

        // The vendor and its initial history row land together or not at all.
        let created: VendorRow = conn.transaction::<_, StoreError, _>(|conn| {
            diesel::insert_into(vendors::table)
                .values(&row)
                .execute(conn)?;
            let id = Self::last_insert_rowid(conn)?;

            diesel::insert_into(historical_performances::table)
                .values(&NewHistoricalPerformanceRow {
                    vendor_id: id,
                    date: now.to_rfc3339(),
                    on_time_delivery_rate: None,
                    quality_rating_avg: None,
                    average_response_time: None,
                    fulfillment_rate: None,
                })
                .execute(conn)?;

            Ok(vendors::table.find(id).first(conn)?)
        })?;

        Self::vendor_from_row(created)
    }

    async fn get_vendor(&self, id: VendorId) -> Result<Option<Vendor>> {
        let mut conn = self.conn()?;
        let row: Option<VendorRow> = vendors::table
            .find(id.get())
            .first(&mut conn)
            .optional()
            .map_err(StoreError::from)?;
        row.map(Self::vendor_from_row).transpose()
    }

    async fn update_vendor(&self, id: VendorId, patch: VendorPatch) -> Result<Option<Vendor>> {
        let mut conn = self.conn()?;
        let updated: Option<VendorRow> = conn.transaction::<_, StoreError, _>(|conn| {
            let existing: Option<VendorRow> =
                vendors::table.find(id.get()).first(conn).optional()?;
            if existing.is_none() {
                return Ok(None);
            }

            if !patch.is_empty() {
                diesel::update(vendors::table.find(id.get()))
                    .set(&VendorChanges {
                        name: patch.name,
                        contact_details: patch.contact_details,
                        address: patch.address,
                    })
                    .execute(conn)?;
            }

            Ok(Some(vendors::table.find(id.get()).first(conn)?))
        })?;

        updated.map(Self::vendor_from_row).transpose()
    }

    async fn delete_vendor(&self, id: VendorId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = conn.transaction::<_, StoreError, _>(|conn| {
            diesel::delete(
                historical_performances::table
                    .filter(historical_performances::vendor_id.eq(id.get())),
            )
            .execute(conn)?;
            diesel::delete(
                purchase_orders::table.filter(purchase_orders::vendor_id.eq(id.get())),
            )
            .execute(conn)?;
            let n = diesel::delete(vendors::table.find(id.get())).execute(conn)?;
            Ok(n > 0)
        })?;
        Ok(deleted)
    }
}

impl PurchaseOrderStore for SqliteStore {
    async fn list_purchase_orders(&self, vendor: Option<VendorId>) -> Result<Vec<PurchaseOrder>> {
        let mut conn = self.conn()?;
        let mut query = purchase_orders::table.into_boxed();
        if let Some(vendor) = vendor {
            query = query.filter(purchase_orders::vendor_id.eq(vendor.get()));
        }
        let rows: Vec<PurchaseOrderRow> = query
            .order(purchase_orders::order_date.asc())
            .load(&mut conn)
            .map_err(StoreError::from)?;
        rows.into_iter().map(Self::order_from_row).collect()
    }

    async fn create_purchase_order(&self, new: NewPurchaseOrder) -> Result<PurchaseOrder> {
        let mut conn = self.conn()?;
        let items = serde_json::to_string(&new.items)?;
        let row = NewPurchaseOrderRow {
            po_number: generate_po_number(),
            vendor_id: new.vendor_id.get(),
            order_date: new.order_date.to_rfc3339(),
            delivery_date: new.delivery_date.to_rfc3339(),
            items,
            quantity: new.quantity,
            status: new.status.as_str().to_string(),
            quality_rating: new.quality_rating,
            issue_date: new.issue_date.map(|ts| ts.to_rfc3339()),
            acknowledgment_date: new.acknowledgment_date.map(|ts| ts.to_rfc3339()),
        };

        let created: PurchaseOrderRow = conn.transaction::<_, StoreError, _>(|conn| {
            let vendor_exists: Option<i32> = vendors::table
                .find(new.vendor_id.get())
                .select(vendors::id)
                .first(conn)
                .optional()?;
            if vendor_exists.is_none() {
                return Err(StoreError::NotFound { entity: "vendor" });
            }

            diesel::insert_into(purchase_orders::table)
                .values(&row)
                .execute(conn)?;
            let id = Self::last_insert_rowid(conn)?;

            Ok(purchase_orders::table.find(id).first(conn)?)
        })?;

        Self::order_from_row(created)
    }

    async fn get_purchase_order(&self, id: PurchaseOrderId) -> Result<Option<PurchaseOrder>> {
        let mut conn = self.conn()?;
        let row: Option<PurchaseOrderRow> = purchase_orders::table
            .find(id.get())
            .first(&mut conn)
            .optional()
            .map_err(StoreError::from)?;
        row.map(Self::order_from_row).transpose()
    }

    async fn update_purchase_order(
        &self,
        id: PurchaseOrderId,
        patch: PurchaseOrderPatch,
    ) -> Result<Option<PurchaseOrder>> {
        let mut conn = self.conn()?;
        let items = match &patch.items {
            Some(value) => Some(serde_json::to_string(value)?),
            None => None,
        };

        let updated: Option<PurchaseOrderRow> = conn.transaction::<_, StoreError, _>(|conn| {
            let existing: Option<i32> = purchase_orders::table
                .find(id.get())
                .select(purchase_orders::id)
                .first(conn)
                .optional()?;
            if existing.is_none() {
                return Ok(None);
            }

            if !patch.is_empty() {
                diesel::update(purchase_orders::table.find(id.get()))
                    .set(&PurchaseOrderChanges {
                        order_date: patch.order_date.map(|ts| ts.to_rfc3339()),
                        delivery_date: patch.delivery_date.map(|ts| ts.to_rfc3339()),
                        items,
                        quantity: patch.quantity,
                        status: patch.status.map(|s| s.as_str().to_string()),
                        quality_rating: patch.quality_rating,
                        issue_date: patch
                            .issue_date
                            .map(|opt| opt.map(|ts| ts.to_rfc3339())),
                        acknowledgment_date: patch
                            .acknowledgment_date
                            .map(|opt| opt.map(|ts| ts.to_rfc3339())),
                    })
                    .execute(conn)?;
            }

            Ok(Some(purchase_orders::table.find(id.get()).first(conn)?))
        })?;

        updated.map(Self::order_from_row).transpose()
    }

    async fn delete_purchase_order(&self, id: PurchaseOrderId) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(purchase_orders::table.find(id.get()))
            .execute(&mut conn)
            .map_err(StoreError::from)?;
        Ok(deleted > 0)
    }
}

impl PerformanceStore for SqliteStore {
    async fn history_for_vendor(&self, vendor: VendorId) -> Result<Vec<HistoricalPerformance>> {
        let mut conn = self.conn()?;
        let rows: Vec<HistoricalPerformanceRow> = historical_performances::table
            .filter(historical_performances::vendor_id.eq(vendor.get()))
            .order(historical_performances::id.asc())
            .load(&mut conn)
            .map_err(StoreError::from)?;
        rows.into_iter().map(Self::history_from_row).collect()
    }

    async fn apply_metrics(&self, vendor: VendorId, metrics: PerformanceMetrics) -> Result<()> {
        let mut conn = self.conn()?;
        conn.transaction::<_, StoreError, _>(|conn| {
            let updated = diesel::update(vendors::table.find(vendor.get()))
                .set((
                    vendors::on_time_delivery_rate.eq(metrics.on_time_delivery_rate),
                    vendors::quality_rating_avg.eq(metrics.quality_rating_avg),
                    vendors::average_response_time.eq(metrics.average_response_time),
                    vendors::fulfillment_rate.eq(metrics.fulfillment_rate),
                ))
                .execute(conn)?;
            if updated == 0 {
                return Err(StoreError::NotFound { entity: "vendor" });
            }

            diesel::update(
                historical_performances::table
                    .filter(historical_performances::vendor_id.eq(vendor.get())),
            )
            .set((
                historical_performances::on_time_delivery_rate.eq(metrics.on_time_delivery_rate),
                historical_performances::quality_rating_avg.eq(metrics.quality_rating_avg),
                historical_performances::average_response_time.eq(metrics.average_response_time),
                historical_performances::fulfillment_rate.eq(metrics.fulfillment_rate),
            ))
            .execute(conn)?;

            Ok(())
        })?;
        Ok(())
    }
}
