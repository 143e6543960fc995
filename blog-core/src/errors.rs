//! # Errors
//!
//! The blog service surfaces a small, structured error taxonomy:
//! - consistent status codes + class names
//! - can be carried through `anyhow::Error` across crate boundaries
//! - transport-agnostic (the server crate decides how to serialize)
//!
//! Client faults (bad JSON, validation, undecodable images, unknown ids)
//! map to 4xx; asset I/O and record store failures map to 5xx.

use std::fmt;

use anyhow::Error as AnyError;
use serde_json::Value;

/// A convenience result type for blog core APIs.
pub type BlogResult<T> = std::result::Result<T, AnyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,   // 400
    Validation,   // 422
    Decode,       // 400
    NotFound,     // 404
    AssetWrite,   // 500
    AssetDelete,  // 500
    Persistence,  // 500
    GeneralError, // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Validation => 422,
            ErrorKind::Decode => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::AssetWrite => 500,
            ErrorKind::AssetDelete => 500,
            ErrorKind::Persistence => 500,
            ErrorKind::GeneralError => 500,
        }
    }

    /// Error `name` as it appears in response bodies.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Decode => "DecodeError",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::AssetWrite => "AssetWriteError",
            ErrorKind::AssetDelete => "AssetDeleteError",
            ErrorKind::Persistence => "PersistenceError",
            ErrorKind::GeneralError => "GeneralError",
        }
    }

    /// Kebab-cased `className`.
    pub fn class_name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad-request",
            ErrorKind::Validation => "validation-error",
            ErrorKind::Decode => "decode-error",
            ErrorKind::NotFound => "not-found",
            ErrorKind::AssetWrite => "asset-write-error",
            ErrorKind::AssetDelete => "asset-delete-error",
            ErrorKind::Persistence => "persistence-error",
            ErrorKind::GeneralError => "general-error",
        }
    }

    pub fn is_client_fault(&self) -> bool {
        self.status_code() < 500
    }
}

/// A structured blog error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct BlogError {
    pub kind: ErrorKind,
    pub message: String,
    pub errors: Option<Value>,
    pub source: Option<AnyError>,
}

impl BlogError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            errors: None,
            source: None,
        }
    }

    /// Attach per-field details, e.g. `{"title": ["is required"]}`.
    pub fn with_errors(mut self, errors: Value) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn with_source(mut self, source: impl Into<AnyError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn class_name(&self) -> &'static str {
        self.kind.class_name()
    }

    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Find a `BlogError` anywhere in an `anyhow` chain.
    pub fn from_anyhow(err: &AnyError) -> Option<&BlogError> {
        err.chain().find_map(|e| e.downcast_ref::<BlogError>())
    }

    /// Turn any error into a BlogError:
    /// - if it's already a BlogError, keep it (lossless)
    /// - otherwise wrap as GeneralError
    pub fn normalize(err: AnyError) -> BlogError {
        match err.downcast::<BlogError>() {
            Ok(blog) => blog,
            Err(other) => BlogError::new(ErrorKind::GeneralError, other.to_string()).with_source(other),
        }
    }

    /// Copy suitable for clients: the `source` chain is dropped.
    pub fn sanitize_for_client(&self) -> BlogError {
        BlogError {
            kind: self.kind,
            message: self.message.clone(),
            errors: self.errors.clone(),
            source: None,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut base = serde_json::json!({
            "name": self.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.class_name(),
        });

        if let Some(e) = &self.errors {
            base["errors"] = e.clone();
        }
        base
    }

    // ---- Constructors ----

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, msg)
    }
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn asset_write(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssetWrite, msg)
    }
    pub fn asset_delete(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssetDelete, msg)
    }
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Persistence, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }
}

impl fmt::Display for BlogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for BlogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Convenience helper for "bail with BlogError".
#[macro_export]
macro_rules! bail_blog {
    ($ctor:ident, $msg:expr) => {
        return Err($crate::errors::BlogError::$ctor($msg).into_anyhow())
    };
    ($ctor:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::BlogError::$ctor(format!($fmt, $($arg)*)).into_anyhow())
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_shape_carries_name_code_class_and_errors() {
        let err = BlogError::validation("Blog schema validation failed")
            .with_errors(json!({"title": ["is required"]}));

        let body = err.to_json();
        assert_eq!(body["name"], "ValidationError");
        assert_eq!(body["code"], 422);
        assert_eq!(body["className"], "validation-error");
        assert_eq!(body["errors"]["title"][0], "is required");
    }

    #[test]
    fn client_and_server_faults_are_split_by_status() {
        assert!(ErrorKind::Decode.is_client_fault());
        assert!(ErrorKind::Validation.is_client_fault());
        assert!(ErrorKind::NotFound.is_client_fault());
        assert!(!ErrorKind::AssetWrite.is_client_fault());
        assert!(!ErrorKind::AssetDelete.is_client_fault());
        assert!(!ErrorKind::Persistence.is_client_fault());
    }

    #[test]
    fn from_anyhow_sees_through_context() {
        let err = BlogError::not_found("Blog not found: x")
            .into_anyhow()
            .context("loading blog");
        let blog = BlogError::from_anyhow(&err).expect("must be BlogError");
        assert_eq!(blog.kind, ErrorKind::NotFound);
    }

    #[test]
    fn normalize_wraps_foreign_errors_as_general_error() {
        let blog = BlogError::normalize(anyhow::anyhow!("boom"));
        assert_eq!(blog.kind, ErrorKind::GeneralError);
        assert_eq!(blog.message, "boom");
        assert!(blog.sanitize_for_client().source.is_none());
    }

    fn bails() -> BlogResult<()> {
        bail_blog!(bad_request, "bad {}", "input");
    }

    #[test]
    fn bail_macro_builds_kinded_error() {
        let err = bails().unwrap_err();
        let blog = BlogError::from_anyhow(&err).unwrap();
        assert_eq!(blog.kind, ErrorKind::BadRequest);
        assert_eq!(blog.message, "bad input");
    }
}
