use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{AssetName, BlobResult, Clock};

/// Core asset storage operations - implemented by every storage backend.
///
/// Stores address assets by flat name only; URL composition is the
/// adapter's job.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Whether an asset with this name currently exists.
    async fn exists(&self, name: &AssetName) -> BlobResult<bool>;

    /// Make sure the backing location exists. Idempotent.
    async fn ensure_dir(&self) -> BlobResult<()>;

    /// Write (or overwrite) an asset.
    async fn write(&self, name: &AssetName, bytes: Bytes) -> BlobResult<PutResult>;

    /// Read an asset's bytes. Missing assets are `BlobError::NotFound`.
    async fn read(&self, name: &AssetName) -> BlobResult<Bytes>;

    /// Delete an asset. Missing assets are `BlobError::NotFound`.
    async fn delete(&self, name: &AssetName) -> BlobResult<()>;
}

#[async_trait]
impl<S: AssetStore + ?Sized> AssetStore for Arc<S> {
    async fn exists(&self, name: &AssetName) -> BlobResult<bool> {
        (**self).exists(name).await
    }

    async fn ensure_dir(&self) -> BlobResult<()> {
        (**self).ensure_dir().await
    }

    async fn write(&self, name: &AssetName, bytes: Bytes) -> BlobResult<PutResult> {
        (**self).write(name, bytes).await
    }

    async fn read(&self, name: &AssetName) -> BlobResult<Bytes> {
        (**self).read(name).await
    }

    async fn delete(&self, name: &AssetName) -> BlobResult<()> {
        (**self).delete(name).await
    }
}

/// Result of a successful write
#[derive(Debug, Clone)]
pub struct PutResult {
    pub size_bytes: u64,
}

/// Strategy for generating asset names
pub trait AssetNaming: Send + Sync {
    fn asset_name(&self, owner_id: &str) -> BlobResult<AssetName>;
}

/// Default naming: `{unixMillis}-{ownerId}.png`, whatever format was uploaded.
///
/// Uniqueness relies on the millisecond clock; collisions are not detected.
pub struct TimestampNaming<C> {
    clock: C,
}

impl<C: Clock> TimestampNaming<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> AssetNaming for TimestampNaming<C> {
    fn asset_name(&self, owner_id: &str) -> BlobResult<AssetName> {
        AssetName::parse(format!("{}-{}.png", self.clock.now_millis(), owner_id))
    }
}
