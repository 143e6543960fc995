use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;

use crate::{AssetName, AssetStore, BlobError, BlobResult, PutResult};

/// Filesystem-backed asset store.
///
/// Assets live flat under `root`: `{root}/{name}`. Writes go to a staging
/// directory beside it (`{parent}/.{root_name}.tmp/`) and are renamed into
/// place, so `root` only ever holds complete assets.
pub struct FsAssetStore {
    root: PathBuf,
    staging: PathBuf,
}

impl FsAssetStore {
    /// Create the store and its directories.
    pub async fn new<P: Into<PathBuf>>(root: P) -> BlobResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        let staging = staging_dir(&fs::canonicalize(&root).await?);

        let store = Self { root, staging };
        store.ensure_dir().await?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn asset_path(&self, name: &AssetName) -> PathBuf {
        self.root.join(name.as_str())
    }

    pub fn staging(&self) -> &Path {
        &self.staging
    }

    fn temp_path(&self) -> PathBuf {
        self.staging.join(uuid::Uuid::new_v4().to_string())
    }
}

fn staging_dir(root: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(root.file_name().unwrap_or(OsStr::new("assets")));
    name.push(".tmp");
    root.with_file_name(name)
}

fn not_found_or_io(name: &AssetName, e: std::io::Error) -> BlobError {
    if e.kind() == ErrorKind::NotFound {
        BlobError::not_found(name.as_str())
    } else {
        e.into()
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn exists(&self, name: &AssetName) -> BlobResult<bool> {
        Ok(fs::try_exists(self.asset_path(name)).await?)
    }

    async fn ensure_dir(&self) -> BlobResult<()> {
        fs::create_dir_all(&self.root).await?;
        fs::create_dir_all(&self.staging).await?;
        Ok(())
    }

    async fn write(&self, name: &AssetName, bytes: Bytes) -> BlobResult<PutResult> {
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, self.asset_path(name)).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(asset = %name, size = bytes.len(), "asset written");
        Ok(PutResult {
            size_bytes: bytes.len() as u64,
        })
    }

    async fn read(&self, name: &AssetName) -> BlobResult<Bytes> {
        fs::read(self.asset_path(name))
            .await
            .map(Bytes::from)
            .map_err(|e| not_found_or_io(name, e))
    }

    async fn delete(&self, name: &AssetName) -> BlobResult<()> {
        fs::remove_file(self.asset_path(name))
            .await
            .map_err(|e| not_found_or_io(name, e))?;
        tracing::debug!(asset = %name, "asset deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> AssetName {
        AssetName::parse(s).unwrap()
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn new_creates_nested_root_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("storage");

        let store = FsAssetStore::new(&root).await.unwrap();
        assert!(root.is_dir());
        store.ensure_dir().await.unwrap();
        assert!(store.staging().is_dir());
    }

    #[tokio::test]
    async fn staging_lives_beside_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("storage");

        let store = FsAssetStore::new(&root).await.unwrap();
        let root = std::fs::canonicalize(&root).unwrap();
        assert!(!store.staging().starts_with(&root));
        assert_eq!(store.staging().parent(), root.parent());
        assert_eq!(store.staging().file_name().unwrap(), ".storage.tmp");
    }

    #[tokio::test]
    async fn root_only_ever_holds_complete_assets() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("storage");
        let store = FsAssetStore::new(&root).await.unwrap();
        assert!(entries(&root).is_empty());

        store.write(&name("1-a.png"), Bytes::from_static(b"img")).await.unwrap();
        store.write(&name("2-b.png"), Bytes::from_static(b"img")).await.unwrap();

        assert_eq!(entries(&root), ["1-a.png", "2-b.png"]);
        assert!(entries(store.staging()).is_empty());
    }

    #[tokio::test]
    async fn write_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("storage");
        let store = FsAssetStore::new(&root).await.unwrap();
        let n = name("1-a.png");

        let put = store.write(&n, Bytes::from_static(b"img")).await.unwrap();
        assert_eq!(put.size_bytes, 3);
        assert!(store.exists(&n).await.unwrap());
        assert_eq!(&store.read(&n).await.unwrap()[..], b"img");
        assert_eq!(std::fs::read(root.join("1-a.png")).unwrap(), b"img");

        store.delete(&n).await.unwrap();
        assert!(!store.exists(&n).await.unwrap());
    }

    #[tokio::test]
    async fn missing_assets_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAssetStore::new(dir.path().join("storage")).await.unwrap();
        let n = name("missing.png");

        assert!(store.read(&n).await.unwrap_err().is_not_found());
        assert!(store.delete(&n).await.unwrap_err().is_not_found());
    }
}
