//! Small helpers shared by the route handlers.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use blog_core::errors::BlogError;
use serde::Serialize;
use serde_json::{json, Value};

use crate::BlogAxumError;

pub type RestResult<T> = Result<T, BlogAxumError>;

pub fn map_json_rejection(rejection: JsonRejection) -> BlogAxumError {
    BlogError::bad_request("Failed to parse the request body as JSON")
        .with_errors(json!({"_schema": [rejection.body_text()]}))
        .into_anyhow()
        .into()
}

/// Unwrap a JSON body, turning extractor rejections into `BadRequest`.
pub fn body(data: Result<Json<Value>, JsonRejection>) -> RestResult<Value> {
    let Json(value) = data.map_err(map_json_rejection)?;
    Ok(value)
}

/// `{ key: value }` response envelope.
pub fn envelope<T: Serialize>(key: &str, value: T) -> RestResult<Json<Value>> {
    let value = serde_json::to_value(value).map_err(anyhow::Error::from)?;
    Ok(Json(json!({ key: value })))
}

pub fn created<T: Serialize>(key: &str, value: T) -> RestResult<(StatusCode, Json<Value>)> {
    Ok((StatusCode::CREATED, envelope(key, value)?))
}

pub fn message(text: &str) -> Json<Value> {
    Json(json!({ "message": text }))
}
