use std::sync::Arc;

use bytes::Bytes;

use crate::{
    AssetConfig, AssetName, AssetNaming, AssetReceipt, AssetStore, BlobError, BlobResult,
    InlineImage, SystemClock, TimestampNaming,
};

/// The image asset adapter - this is what the lifecycle manager embeds.
///
/// Combines a store, a naming strategy and the public URL configuration.
#[derive(Clone)]
pub struct AssetAdapter {
    store: Arc<dyn AssetStore>,
    naming: Arc<dyn AssetNaming>,
    config: AssetConfig,
}

impl AssetAdapter {
    /// Create an adapter using `{unixMillis}-{owner}.png` names from the wall clock.
    pub fn new<S: AssetStore + 'static>(store: S, config: AssetConfig) -> Self {
        Self {
            store: Arc::new(store),
            naming: Arc::new(TimestampNaming::new(SystemClock)),
            config,
        }
    }

    /// Create with a custom naming strategy
    pub fn with_naming<S: AssetStore + 'static, N: AssetNaming + 'static>(
        store: S,
        naming: N,
        config: AssetConfig,
    ) -> Self {
        Self {
            store: Arc::new(store),
            naming: Arc::new(naming),
            config,
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Decode an inline payload, enforcing the configured size limit.
    pub fn decode(&self, payload: &str) -> BlobResult<InlineImage> {
        let image = InlineImage::decode(payload)?;
        if image.len() > self.config.max_asset_bytes {
            return Err(BlobError::TooLarge {
                actual: image.len(),
                limit: self.config.max_asset_bytes,
            });
        }
        Ok(image)
    }

    /// Store a decoded image under a freshly generated name for `owner_id`.
    pub async fn put(&self, owner_id: &str, image: &InlineImage) -> BlobResult<AssetReceipt> {
        let name = self.naming.asset_name(owner_id)?;
        let result = self.store.write(&name, image.bytes.clone()).await?;
        let url = self.public_url(&name);
        Ok(AssetReceipt::new(name, url, result.size_bytes))
    }

    /// Put bytes back under a known name (used to undo a deletion).
    pub async fn restore(&self, name: &AssetName, bytes: Bytes) -> BlobResult<()> {
        self.store.write(name, bytes).await.map(|_| ())
    }

    pub async fn open(&self, name: &AssetName) -> BlobResult<Bytes> {
        self.store.read(name).await
    }

    pub async fn delete(&self, name: &AssetName) -> BlobResult<()> {
        self.store.delete(name).await
    }

    pub fn public_url(&self, name: &AssetName) -> String {
        self.config.public_url(name.as_str())
    }
}
