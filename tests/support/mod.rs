#![allow(dead_code)]

//! Shared helpers for driving the API router in tests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Send one request through the router, returning status and parsed body.
///
/// A 204 or otherwise empty body comes back as `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    send_with_token(app, method, uri, body, None).await
}

/// Same as [`send`], with an optional `Authorization: Token` header.
pub async fn send_with_token(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a vendor through the API and return its body.
pub async fn create_vendor(app: &Router, name: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/vendors/",
        Some(json!({
            "name": name,
            "contact_details": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            "address": "1 Factory Rd",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "vendor create failed: {body}");
    body
}

/// Default purchase-order payload for the given vendor, with overrides
/// merged on top.
pub fn order_payload(vendor_id: i64, overrides: Value) -> Value {
    let mut payload = json!({
        "vendor_id": vendor_id,
        "order_date": "2024-05-01T08:00:00Z",
        "delivery_date": "2024-05-03T08:00:00Z",
        "items": [{"sku": "W-100", "qty": 5}],
        "quantity": 5,
    });
    if let (Some(base), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    payload
}

/// Create a purchase order through the API and return its body.
pub async fn create_order(app: &Router, vendor_id: i64, overrides: Value) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/purchase_orders/",
        Some(order_payload(vendor_id, overrides)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "order create failed: {body}");
    body
}
