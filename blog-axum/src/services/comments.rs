use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use blog_schema::{validate, CreateCommentBody};
use serde_json::Value;

use crate::rest::{self, RestResult};
use crate::BlogAxumState;

async fn create(
    State(state): State<BlogAxumState>,
    data: Result<Json<Value>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Value>)> {
    let data = rest::body(data)?;
    let body: CreateCommentBody = validate(&data, "Comment schema validation failed")?;

    let comment = state.blogs.create_comment(body.into_input()?).await?;
    rest::created("comment", comment)
}

/// Comments of one blog post.
async fn by_blog(
    State(state): State<BlogAxumState>,
    Path(id): Path<String>,
) -> RestResult<Json<Value>> {
    let comments = state.blogs.list_comments(&id).await?;
    rest::envelope("data", comments)
}

pub fn router(state: BlogAxumState) -> Router<()> {
    Router::new()
        .route("/comment", post(create))
        .route("/comment/{id}", get(by_blog))
        .with_state(state)
}
