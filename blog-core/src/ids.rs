use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::errors::BlogError;

/// Record identifier: 24 hexadecimal characters (ObjectId-compatible).
///
/// Generated ids are 8 hex chars of unix seconds followed by 16 random hex
/// chars, so they sort roughly by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub const LEN: usize = 24;

    pub fn generate() -> Self {
        let secs = chrono::Utc::now().timestamp().max(0) as u32;
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{secs:08x}{}", &random[..16]))
    }

    pub fn is_well_formed(s: &str) -> bool {
        s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Parse a record id; malformed input is a validation error on `field`.
    pub fn parse_field(s: &str, field: &str) -> anyhow::Result<Self> {
        if Self::is_well_formed(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(BlogError::validation(format!("Invalid {field}"))
                .with_errors(json!({ field: ["must be a 24 character hex id"] }))
                .into_anyhow())
        }
    }

    pub fn parse(s: &str) -> anyhow::Result<Self> {
        Self::parse_field(s, "id")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn generated_ids_are_well_formed_and_distinct() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert!(RecordId::is_well_formed(a.as_str()));
        assert_eq!(a.as_str().len(), 24);
        assert_ne!(a, b);
    }

    #[test]
    fn parse_accepts_mixed_case_hex_and_normalizes() {
        let id = RecordId::parse("507F1F77BCF86CD799439011").unwrap();
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn parse_rejects_wrong_length_or_non_hex() {
        for bad in ["", "507f1f77", "507f1f77bcf86cd79943901z", "507f1f77bcf86cd7994390111"] {
            let err = RecordId::parse_field(bad, "blogId").unwrap_err();
            let blog = BlogError::from_anyhow(&err).unwrap();
            assert_eq!(blog.kind, ErrorKind::Validation);
            assert!(blog.errors.as_ref().unwrap().get("blogId").is_some());
        }
    }
}
