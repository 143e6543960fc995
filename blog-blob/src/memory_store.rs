use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use crate::{AssetName, AssetStore, BlobError, BlobResult, PutResult};

/// In-memory asset store, for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryAssetStore {
    assets: RwLock<HashMap<String, Bytes>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all stored assets, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.assets.read().await.keys().cloned().collect();
        names.sort();
        names
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn exists(&self, name: &AssetName) -> BlobResult<bool> {
        Ok(self.assets.read().await.contains_key(name.as_str()))
    }

    async fn ensure_dir(&self) -> BlobResult<()> {
        Ok(())
    }

    async fn write(&self, name: &AssetName, bytes: Bytes) -> BlobResult<PutResult> {
        let size_bytes = bytes.len() as u64;
        self.assets
            .write()
            .await
            .insert(name.as_str().to_string(), bytes);
        Ok(PutResult { size_bytes })
    }

    async fn read(&self, name: &AssetName) -> BlobResult<Bytes> {
        self.assets
            .read()
            .await
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| BlobError::not_found(name.as_str()))
    }

    async fn delete(&self, name: &AssetName) -> BlobResult<()> {
        self.assets
            .write()
            .await
            .remove(name.as_str())
            .map(|_| ())
            .ok_or_else(|| BlobError::not_found(name.as_str()))
    }
}
