//! `/blog` routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use blog_schema::{validate, CreateBlogBody, UpdateBlogBody};
use serde_json::Value;

use crate::rest::{self, RestResult};
use crate::BlogAxumState;

async fn create(
    State(state): State<BlogAxumState>,
    data: Result<Json<Value>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Value>)> {
    let data = rest::body(data)?;
    let body: CreateBlogBody = validate(&data, "Blog schema validation failed")?;

    let blog = state.blogs.create_blog(body.into_input()?).await?;
    rest::created("blog", blog)
}

async fn list(State(state): State<BlogAxumState>) -> RestResult<Json<Value>> {
    let blogs = state.blogs.list_blogs().await?;
    rest::envelope("blogs", blogs)
}

async fn get_by_id(
    State(state): State<BlogAxumState>,
    Path(id): Path<String>,
) -> RestResult<Json<Value>> {
    let blog = state.blogs.get_blog(&id).await?;
    rest::envelope("blog", blog)
}

async fn update(
    State(state): State<BlogAxumState>,
    data: Result<Json<Value>, JsonRejection>,
) -> RestResult<Json<Value>> {
    let data = rest::body(data)?;
    let body: UpdateBlogBody = validate(&data, "Blog schema validation failed")?;

    state.blogs.update_blog(body.into_input()?).await?;
    Ok(rest::message("blog updated!"))
}

async fn delete(
    State(state): State<BlogAxumState>,
    Path(id): Path<String>,
) -> RestResult<Json<Value>> {
    state.blogs.delete_blog(&id).await?;
    Ok(rest::message("blog deleted"))
}

pub fn router(state: BlogAxumState) -> Router<()> {
    Router::new()
        .route("/blog", post(create).put(update))
        .route("/blog/all", get(list))
        .route("/blog/{id}", get(get_by_id).delete(delete))
        .with_state(state)
}
