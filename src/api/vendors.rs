//! Vendor CRUD handlers and the performance projection.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use super::error::ApiError;
use super::types::{CreateVendorRequest, PerformanceResponse, UpdateVendorRequest};
use super::AppContext;
use crate::domain::{Vendor, VendorId};
use crate::store::Store;

const VENDOR_NOT_FOUND: &str = "Vendor not found";

pub async fn list<S: Store>(
    State(ctx): State<AppContext<S>>,
) -> Result<Json<Vec<Vendor>>, ApiError> {
    let vendors = ctx.store.list_vendors().await?;
    Ok(Json(vendors))
}

pub async fn create<S: Store>(
    State(ctx): State<AppContext<S>>,
    Json(request): Json<CreateVendorRequest>,
) -> Result<(StatusCode, Json<Vendor>), ApiError> {
    let new = request.validate()?;
    let vendor = ctx.store.create_vendor(new).await?;
    info!(vendor = %vendor.id, vendor_code = %vendor.vendor_code, "Vendor created");
    Ok((StatusCode::CREATED, Json(vendor)))
}

pub async fn retrieve<S: Store>(
    State(ctx): State<AppContext<S>>,
    Path(id): Path<i32>,
) -> Result<Json<Vendor>, ApiError> {
    let vendor = ctx
        .store
        .get_vendor(VendorId::new(id))
        .await?
        .ok_or(ApiError::not_found(VENDOR_NOT_FOUND))?;
    Ok(Json(vendor))
}

pub async fn update<S: Store>(
    State(ctx): State<AppContext<S>>,
    Path(id): Path<i32>,
    Json(request): Json<UpdateVendorRequest>,
) -> Result<Json<Vendor>, ApiError> {
    let patch = request.validate()?;
    let vendor = ctx
        .store
        .update_vendor(VendorId::new(id), patch)
        .await?
        .ok_or(ApiError::not_found(VENDOR_NOT_FOUND))?;
    Ok(Json(vendor))
}

pub async fn destroy<S: Store>(
    State(ctx): State<AppContext<S>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let deleted = ctx.store.delete_vendor(VendorId::new(id)).await?;
    if !deleted {
        return Err(ApiError::not_found(VENDOR_NOT_FOUND));
    }
    info!(vendor = id, "Vendor deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn performance<S: Store>(
    State(ctx): State<AppContext<S>>,
    Path(id): Path<i32>,
) -> Result<Json<PerformanceResponse>, ApiError> {
    let vendor = ctx
        .store
        .get_vendor(VendorId::new(id))
        .await?
        .ok_or(ApiError::not_found(VENDOR_NOT_FOUND))?;
    Ok(Json(vendor.into()))
}
