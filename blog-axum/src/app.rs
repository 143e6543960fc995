use std::path::PathBuf;

use axum::extract::DefaultBodyLimit;
use axum::handler::Handler;
use axum::http::{HeaderName, Request};
use axum::routing::get;
use axum::Router;
use blog_core::BlogConfig;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::BlogAxumState;

const REQUEST_ID: &str = "x-request-id";

/// Inline images are base64 inside JSON; 16MB covers a 10MB decoded image.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Router under construction plus the state its handlers share.
#[derive(Clone)]
pub struct AxumApp {
    pub config: BlogConfig,
    pub state: BlogAxumState,
    pub router: Router<()>,
}

impl AxumApp {
    pub fn new(config: BlogConfig, state: BlogAxumState) -> Self {
        Self {
            config,
            state,
            router: Router::new(),
        }
    }

    /// Add routes that already carry their full paths.
    pub fn merge(mut self, router: Router<()>) -> Self {
        self.router = self.router.merge(router);
        self
    }

    pub fn service<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    /// Serve files from `dir` under `path`.
    pub fn use_static(mut self, path: &str, dir: impl Into<PathBuf>) -> Self {
        self.router = self.router.nest_service(path, ServeDir::new(dir.into()));
        self
    }

    /// Tracing and `x-request-id` layers. Call once every route is mounted.
    pub fn with_layers(mut self) -> Self {
        let header = HeaderName::from_static(REQUEST_ID);

        self.router = self
            .router
            .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
            .layer(PropagateRequestIdLayer::new(header.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<_>| {
                let request_id = req
                    .headers()
                    .get(REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::new(header, MakeRequestUuid));
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.config.host(), self.config.port())
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}
