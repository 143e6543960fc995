use std::path::PathBuf;

/// Configuration for image asset storage
#[derive(Debug, Clone)]
pub struct AssetConfig {
    /// Directory the filesystem store writes into
    pub root_dir: PathBuf,

    /// Externally visible base URL of the server (e.g. `http://localhost:5000`)
    pub public_base_url: String,

    /// Route segment assets are served under (`{base}/{prefix}/{name}`)
    pub public_prefix: String,

    /// Absolute max size allowed for a single decoded image
    pub max_asset_bytes: u64,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("storage"),
            public_base_url: "http://localhost:5000".to_string(),
            public_prefix: "storage".to_string(),
            max_asset_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl AssetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.root_dir = dir.into();
        self
    }

    pub fn with_public_base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.public_base_url = url.into();
        self
    }

    pub fn with_public_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.public_prefix = prefix.into();
        self
    }

    pub fn with_max_asset_bytes(mut self, bytes: u64) -> Self {
        self.max_asset_bytes = bytes;
        self
    }

    /// Public URL for an asset name: `{public_base_url}/{public_prefix}/{name}`.
    pub fn public_url(&self, name: &str) -> String {
        let base = self.public_base_url.trim_end_matches('/');
        let prefix = self.public_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{base}/{name}")
        } else {
            format!("{base}/{prefix}/{name}")
        }
    }
}
