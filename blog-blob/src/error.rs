use thiserror::Error;

/// Result type for asset operations
pub type BlobResult<T> = Result<T, BlobError>;

/// Errors that can occur while storing or loading image assets
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Asset not found: {name}")]
    NotFound { name: String },

    #[error("Invalid asset name: {name}")]
    InvalidName { name: String },

    #[error("Malformed image payload: {reason}")]
    Decode { reason: String },

    #[error("Asset too large: {actual} bytes exceeds limit of {limit}")]
    TooLarge { actual: u64, limit: u64 },

    #[error("Storage backend error: {source}")]
    Backend {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl BlobError {
    /// Create a backend error from any error type
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            source: Box::new(error),
        }
    }

    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn decode<S: Into<String>>(reason: S) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    pub fn invalid_name<S: Into<String>>(name: S) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// True when the asset simply is not there (as opposed to an I/O failure).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
