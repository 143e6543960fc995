use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use blog_core::NewAuthor;
use blog_schema::{validate, CreateAuthorBody};
use serde_json::Value;

use crate::rest::{self, RestResult};
use crate::BlogAxumState;

async fn create(
    State(state): State<BlogAxumState>,
    data: Result<Json<Value>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Value>)> {
    let data = rest::body(data)?;
    let body: CreateAuthorBody = validate(&data, "Author schema validation failed")?;

    let author = state.blogs.create_author(NewAuthor::from(body)).await?;
    rest::created("author", author)
}

pub fn router(state: BlogAxumState) -> Router<()> {
    Router::new()
        .route("/author", post(create))
        .with_state(state)
}
