//! # Configuration
//!
//! A minimal string key/value store with typed getters for the keys the
//! blog service reads.
//!
//! ```rust
//! use blog_core::BlogConfig;
//!
//! let mut config = BlogConfig::defaults();
//! config.set("http.port", "8080");
//! assert_eq!(config.get_u16("http.port"), Some(8080));
//! ```
//!
//! ## Environment overrides
//! Variables with the `BLOG__` prefix override keys, with `__` separating
//! segments and the remainder camel-cased per segment:
//!
//! ```bash
//! export BLOG__HTTP__PORT=8080                       # http.port
//! export BLOG__STORAGE__PUBLIC_BASE_URL=https://x    # storage.publicBaseUrl
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::errors::BlogError;
use crate::lifecycle::AssetRetention;

pub const ENV_PREFIX: &str = "BLOG__";

pub const HTTP_HOST: &str = "http.host";
pub const HTTP_PORT: &str = "http.port";
pub const STORAGE_DIR: &str = "storage.dir";
pub const STORAGE_PUBLIC_BASE_URL: &str = "storage.publicBaseUrl";
pub const BLOGS_ASSET_ON_DELETE: &str = "blogs.assetOnDelete";

#[derive(Debug, Clone, Default)]
pub struct BlogConfig {
    values: HashMap<String, String>,
}

impl BlogConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Config pre-filled with the service defaults.
    pub fn defaults() -> Self {
        let mut config = Self::new();
        config.set(HTTP_HOST, "127.0.0.1");
        config.set(HTTP_PORT, "5000");
        config.set(STORAGE_DIR, "storage");
        config.set(STORAGE_PUBLIC_BASE_URL, "http://localhost:5000");
        config.set(BLOGS_ASSET_ON_DELETE, "retain");
        config
    }

    /// Defaults, then `.env`, then `BLOG__*` process variables.
    pub fn from_env() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "failed to load .env");
            }
        }

        let mut config = Self::defaults();
        config.apply_env(std::env::vars());
        config
    }

    /// Apply `BLOG__*` style overrides from any iterator of pairs.
    pub fn apply_env<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            if let Some(stripped) = key.as_ref().strip_prefix(ENV_PREFIX) {
                let normalized = stripped
                    .split("__")
                    .map(camel_case)
                    .collect::<Vec<_>>()
                    .join(".");
                if !normalized.is_empty() {
                    self.set(normalized, value);
                }
            }
        }
    }

    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    pub fn get_u16(&self, key: &str) -> Option<u16> {
        self.get(key).and_then(|v| v.parse::<u16>().ok())
    }

    pub fn host(&self) -> String {
        self.get_string(HTTP_HOST)
            .unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn port(&self) -> u16 {
        match self.get(HTTP_PORT) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = raw, "invalid http.port, using 5000");
                5000
            }),
            None => 5000,
        }
    }

    pub fn storage_dir(&self) -> PathBuf {
        PathBuf::from(self.get(STORAGE_DIR).unwrap_or("storage"))
    }

    /// The externally visible server URL used to compose photo URLs.
    pub fn public_base_url(&self) -> String {
        self.get_string(STORAGE_PUBLIC_BASE_URL)
            .unwrap_or_else(|| "http://localhost:5000".to_string())
    }

    pub fn asset_retention(&self) -> anyhow::Result<AssetRetention> {
        match self.get(BLOGS_ASSET_ON_DELETE) {
            None => Ok(AssetRetention::default()),
            Some(raw) => AssetRetention::parse(raw).ok_or_else(|| {
                BlogError::bad_request(format!(
                    "Invalid {BLOGS_ASSET_ON_DELETE}: {raw} (expected retain or delete)"
                ))
                .into_anyhow()
            }),
        }
    }
}

/// `PUBLIC_BASE_URL` → `publicBaseUrl`, `HTTP` → `http`.
fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for (i, word) in segment.split('_').filter(|w| !w.is_empty()).enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            let mut chars = lower.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}
