//! blog-axum: HTTP front end for the blog service.
//!
//! | route                | handler                        |
//! |----------------------|--------------------------------|
//! | `POST /blog`         | create, 201 `{blog}`           |
//! | `GET /blog/all`      | list, `{blogs}`                |
//! | `GET /blog/{id}`     | get with author, `{blog}`      |
//! | `PUT /blog`          | update, `{message}`            |
//! | `DELETE /blog/{id}`  | delete + comment cascade       |
//! | `POST /author`       | create author, 201 `{author}`  |
//! | `POST /comment`      | create comment, 201 `{comment}`|
//! | `GET /comment/{id}`  | comments of a blog, `{data}`   |
//! | `GET /storage/*`     | stored images                  |
//! | `GET /health`        | `ok`                           |

pub mod app;
mod error;
pub mod rest;
mod services;
pub mod state;

use std::sync::Arc;

use anyhow::Result;
use blog_blob::{AssetAdapter, AssetConfig, FsAssetStore};
use blog_core::{BlogConfig, BlogLifecycleManager, MemoryRecordStore, RecordStore};

pub use app::AxumApp;
pub use error::BlogAxumError;
pub use state::BlogAxumState;

/// Asset settings derived from the service config.
pub fn asset_config(config: &BlogConfig) -> AssetConfig {
    AssetConfig::new()
        .with_root_dir(config.storage_dir())
        .with_public_base_url(config.public_base_url())
}

/// Build the app with a filesystem asset store and in-process records.
pub async fn build(config: BlogConfig) -> Result<AxumApp> {
    let retention = config.asset_retention()?;
    let assets = asset_config(&config);
    let store = FsAssetStore::new(assets.root_dir.clone()).await?;

    let records: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
    let blogs = BlogLifecycleManager::new(records, AssetAdapter::new(store, assets))
        .with_retention(retention);

    tracing::info!(
        storage = %config.storage_dir().display(),
        retention = ?retention,
        "blog service configured"
    );

    Ok(app(config, blogs))
}

/// Mount every route around an already assembled lifecycle manager.
pub fn app(config: BlogConfig, blogs: BlogLifecycleManager) -> AxumApp {
    let assets = blogs.assets().config().clone();
    let storage_path = format!("/{}", assets.public_prefix.trim_matches('/'));

    let ax = AxumApp::new(config, BlogAxumState::new(blogs));

    services::configure(ax)
        .use_static(&storage_path, assets.root_dir)
        .service("/health", || async { "ok" })
        .with_layers()
}
