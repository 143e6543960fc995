use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{BlobError, BlobResult};

/// Name of a stored asset, e.g. `1700000000000-507f1f77bcf86cd799439011.png`.
///
/// Always a flat file name: no separators, no traversal, no hidden files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetName(String);

impl AssetName {
    /// Parse and validate a flat asset name.
    pub fn parse<S: Into<String>>(name: S) -> BlobResult<Self> {
        let name = name.into();
        let ok = !name.is_empty()
            && !name.starts_with('.')
            && !name.contains('/')
            && !name.contains('\\')
            && !name.chars().any(|c| c.is_ascii_control());
        if ok {
            Ok(Self(name))
        } else {
            Err(BlobError::invalid_name(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AssetName {
    type Error = BlobError;

    fn try_from(value: String) -> BlobResult<Self> {
        Self::parse(value)
    }
}

impl From<AssetName> for String {
    fn from(value: AssetName) -> Self {
        value.0
    }
}

impl std::fmt::Display for AssetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Image formats accepted in an inline payload marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpg,
    Jpeg,
}

impl ImageFormat {
    const ALL: [ImageFormat; 3] = [ImageFormat::Png, ImageFormat::Jpg, ImageFormat::Jpeg];

    pub fn subtype(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    fn marker(&self) -> String {
        format!("data:image/{};base64,", self.subtype())
    }
}

/// Standard alphabet; padding optional, trailing bits ignored.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// A decoded inline image (`data:image/png;base64,...`).
#[derive(Debug, Clone)]
pub struct InlineImage {
    /// Format named by the marker; `None` when the payload was bare base64.
    pub format: Option<ImageFormat>,
    pub bytes: Bytes,
}

impl InlineImage {
    /// Strip the MIME marker (if any) and base64-decode the remainder.
    pub fn decode(payload: &str) -> BlobResult<Self> {
        let payload = payload.trim();

        let (format, data) = ImageFormat::ALL
            .iter()
            .find_map(|f| payload.strip_prefix(f.marker().as_str()).map(|rest| (Some(*f), rest)))
            .unwrap_or((None, payload));

        if data.starts_with("data:") {
            return Err(BlobError::decode(
                "unsupported image type, expected png, jpg or jpeg",
            ));
        }

        // Wrapped payloads: whitespace is not part of the data.
        let data: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = LENIENT
            .decode(data)
            .map_err(|e| BlobError::decode(e.to_string()))?;

        if bytes.is_empty() {
            return Err(BlobError::decode("image payload is empty"));
        }

        Ok(Self {
            format,
            bytes: Bytes::from(bytes),
        })
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_each_supported_marker() {
        for (marker, expected) in [
            ("data:image/png;base64,", ImageFormat::Png),
            ("data:image/jpg;base64,", ImageFormat::Jpg),
            ("data:image/jpeg;base64,", ImageFormat::Jpeg),
        ] {
            let img = InlineImage::decode(&format!("{marker}aGVsbG8=")).unwrap();
            assert_eq!(img.format, Some(expected));
            assert_eq!(&img.bytes[..], b"hello");
        }
    }

    #[test]
    fn bare_base64_is_accepted() {
        let img = InlineImage::decode("aGVsbG8=").unwrap();
        assert_eq!(img.format, None);
        assert_eq!(&img.bytes[..], b"hello");
    }

    #[test]
    fn unpadded_base64_is_accepted() {
        let img = InlineImage::decode("data:image/png;base64,aGVsbG8").unwrap();
        assert_eq!(img.format, Some(ImageFormat::Png));
        assert_eq!(&img.bytes[..], b"hello");
    }

    #[test]
    fn line_wrapped_base64_is_accepted() {
        let img = InlineImage::decode("data:image/jpeg;base64,aGVs\nbG8=").unwrap();
        assert_eq!(&img.bytes[..], b"hello");

        let img = InlineImage::decode("aGVs\r\n bG8").unwrap();
        assert_eq!(&img.bytes[..], b"hello");
    }

    #[test]
    fn malformed_payloads_are_decode_errors() {
        for bad in [
            "data:image/png;base64,@@not-base64@@",
            "data:image/gif;base64,aGVsbG8=",
            "data:image/png;base64,",
        ] {
            let err = InlineImage::decode(bad).unwrap_err();
            assert!(matches!(err, BlobError::Decode { .. }), "{bad}: {err}");
        }
    }

    #[test]
    fn asset_names_must_be_flat() {
        assert!(AssetName::parse("1700000000000-abc.png").is_ok());
        for bad in ["", "../etc/passwd", "a/b.png", ".hidden", "a\\b", "a\nb"] {
            assert!(AssetName::parse(bad).is_err(), "{bad:?}");
        }
    }
}
