use crate::AssetName;

/// Receipt returned after successfully storing an image asset
#[derive(Debug, Clone, PartialEq)]
pub struct AssetReceipt {
    pub name: AssetName,
    /// Public URL composed from the configured base URL
    pub url: String,
    pub size_bytes: u64,
}

impl AssetReceipt {
    pub fn new(name: AssetName, url: String, size_bytes: u64) -> Self {
        Self {
            name,
            url,
            size_bytes,
        }
    }
}
