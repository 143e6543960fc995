//! # blog-blob: image asset storage for the blog service
//!
//! Posts carry one image each. Clients send it inline as
//! `data:image/png;base64,...`; this crate decodes the payload, names the
//! asset, writes it to a store and composes its public URL.
//!
//! ```text
//! ┌──────────────────────┐
//! │ BlogLifecycleManager │  ← record/asset consistency
//! ├──────────────────────┤
//! │     AssetAdapter     │  ← decode, naming, public URLs
//! ├──────────────────────┤
//! │      AssetStore      │  ← storage primitives (fs, memory)
//! └──────────────────────┘
//! ```
//!
//! ```rust,no_run
//! use blog_blob::{AssetAdapter, AssetConfig, BlobResult, FsAssetStore};
//!
//! # #[tokio::main]
//! # async fn main() -> BlobResult<()> {
//! let config = AssetConfig::new().with_root_dir("storage");
//! let store = FsAssetStore::new(config.root_dir.clone()).await?;
//! let assets = AssetAdapter::new(store, config);
//!
//! let image = assets.decode("data:image/png;base64,aGVsbG8=")?;
//! let receipt = assets.put("507f1f77bcf86cd799439011", &image).await?;
//! println!("{}", receipt.url);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
mod clock;
mod config;
mod error;
mod fs_store;
mod memory_store;
mod receipt;
pub mod store;
mod types;

pub use adapter::AssetAdapter;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AssetConfig;
pub use error::{BlobError, BlobResult};
pub use fs_store::FsAssetStore;
pub use memory_store::MemoryAssetStore;
pub use receipt::AssetReceipt;
pub use store::{AssetNaming, AssetStore, PutResult, TimestampNaming};
pub use types::{AssetName, ImageFormat, InlineImage};

