//! Response helpers that attach alert metadata for mutating operations.

use crate::alert::Alert;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 201 with `Location` and body.
pub fn created<T: Serialize>(location: String, data: T, alert: Alert) -> Response {
    let mut response = (StatusCode::CREATED, [(header::LOCATION, location)], Json(data)).into_response();
    response.extensions_mut().insert(alert);
    response
}

/// 200 with body and alert.
pub fn ok_with_alert<T: Serialize>(data: T, alert: Alert) -> Response {
    let mut response = (StatusCode::OK, Json(data)).into_response();
    response.extensions_mut().insert(alert);
    response
}

pub fn no_content(alert: Alert) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    response.extensions_mut().insert(alert);
    response
}
