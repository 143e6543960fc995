use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_core::errors::BlogError;

/// Handler error: any `anyhow::Error`, rendered as a `BlogError` JSON body.
#[derive(Debug)]
pub struct BlogAxumError(pub anyhow::Error);

impl From<anyhow::Error> for BlogAxumError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

fn render(blog: &BlogError) -> Response {
    let safe = blog.sanitize_for_client();
    let status = StatusCode::from_u16(safe.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(safe.to_json())).into_response()
}

impl IntoResponse for BlogAxumError {
    fn into_response(self) -> Response {
        // A BlogError anywhere in the chain keeps its kind and field errors.
        if let Some(blog) = BlogError::from_anyhow(&self.0) {
            if blog.kind.is_client_fault() {
                tracing::debug!(error = %blog, "request rejected");
            } else {
                tracing::error!(error = ?self.0, "request failed");
            }
            return render(blog);
        }

        tracing::error!(error = ?self.0, "unhandled error");
        render(&BlogError::general_error(self.0.to_string()))
    }
}
