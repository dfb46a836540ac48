//! Purchase order CRUD handlers.
//!
//! Create and update invoke the metrics engine after the write lands, so a
//! save that ends in the completed status refreshes the owning vendor's
//! metrics before the response goes out.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use super::error::{ApiError, ValidationErrors};
use super::types::{CreatePurchaseOrderRequest, UpdatePurchaseOrderRequest};
use super::AppContext;
use crate::domain::{PurchaseOrder, PurchaseOrderId, VendorId};
use crate::store::Store;

const ORDER_NOT_FOUND: &str = "Purchase Order not found";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub filter_by_vendor_id: Option<i32>,
}

pub async fn list<S: Store>(
    State(ctx): State<AppContext<S>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PurchaseOrder>>, ApiError> {
    let vendor = query.filter_by_vendor_id.map(VendorId::new);
    let orders = ctx.store.list_purchase_orders(vendor).await?;
    Ok(Json(orders))
}

pub async fn create<S: Store>(
    State(ctx): State<AppContext<S>>,
    Json(request): Json<CreatePurchaseOrderRequest>,
) -> Result<(StatusCode, Json<PurchaseOrder>), ApiError> {
    let new = request.validate()?;

    if ctx.store.get_vendor(new.vendor_id).await?.is_none() {
        let mut errors = ValidationErrors::new();
        errors.add("vendor_id", "Vendor does not exist.");
        return Err(ApiError::Validation(errors));
    }

    let order = ctx.store.create_purchase_order(new).await?;
    info!(order = %order.id, po_number = %order.po_number, "Purchase order created");

    ctx.engine.order_saved(&order).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn retrieve<S: Store>(
    State(ctx): State<AppContext<S>>,
    Path(id): Path<i32>,
) -> Result<Json<PurchaseOrder>, ApiError> {
    let order = ctx
        .store
        .get_purchase_order(PurchaseOrderId::new(id))
        .await?
        .ok_or(ApiError::not_found(ORDER_NOT_FOUND))?;
    Ok(Json(order))
}

pub async fn update<S: Store>(
    State(ctx): State<AppContext<S>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePurchaseOrderRequest>,
) -> Result<Json<PurchaseOrder>, ApiError> {
    let patch = request.validate()?;
    let order = ctx
        .store
        .update_purchase_order(PurchaseOrderId::new(id), patch)
        .await?
        .ok_or(ApiError::not_found(ORDER_NOT_FOUND))?;

    ctx.engine.order_saved(&order).await?;
    Ok(Json(order))
}

pub async fn destroy<S: Store>(
    State(ctx): State<AppContext<S>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let deleted = ctx
        .store
        .delete_purchase_order(PurchaseOrderId::new(id))
        .await?;
    if !deleted {
        return Err(ApiError::not_found(ORDER_NOT_FOUND));
    }
    info!(order = id, "Purchase order deleted");
    Ok(StatusCode::NO_CONTENT)
}
