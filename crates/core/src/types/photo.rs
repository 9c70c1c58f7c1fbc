//! Profile photos stored as text.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Photo`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhotoError {
    /// The input is not a `data:<mime>;base64,<payload>` URL.
    #[error("photo must be a base64 data URL")]
    NotDataUrl,
    /// The MIME type is not an image type.
    #[error("unsupported photo type: {0}")]
    UnsupportedType(String),
    /// The payload is not valid base64.
    #[error("photo payload is not valid base64")]
    InvalidPayload,
    /// The decoded image is larger than allowed.
    #[error("photo must be at most {max} bytes")]
    TooLarge {
        /// Maximum decoded size in bytes.
        max: usize,
    },
}

/// A profile photo held as a base64 data URL.
///
/// Sessions are persisted as text, so the photo travels as
/// `data:image/png;base64,...` rather than raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Photo(String);

impl Photo {
    /// Maximum decoded image size (2 MiB).
    pub const MAX_BYTES: usize = 2 * 1024 * 1024;

    /// Encode raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `mime` is not an `image/*` type or the image is
    /// larger than [`Photo::MAX_BYTES`].
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Result<Self, PhotoError> {
        if !mime.starts_with("image/") {
            return Err(PhotoError::UnsupportedType(mime.to_owned()));
        }
        if bytes.len() > Self::MAX_BYTES {
            return Err(PhotoError::TooLarge {
                max: Self::MAX_BYTES,
            });
        }
        Ok(Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
    }

    /// Validate an existing data URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, not an image, not valid
    /// base64, or too large once decoded.
    pub fn parse(data_url: &str) -> Result<Self, PhotoError> {
        let (mime, payload) = split_data_url(data_url)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|_| PhotoError::InvalidPayload)?;
        Self::from_bytes(mime, &bytes)
    }

    /// The MIME type of the image.
    #[must_use]
    pub fn mime(&self) -> &str {
        split_data_url(&self.0).map_or("", |(mime, _)| mime)
    }

    /// Decode the image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PhotoError::InvalidPayload`] if the stored payload cannot be decoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>, PhotoError> {
        let (_, payload) = split_data_url(&self.0)?;
        STANDARD
            .decode(payload)
            .map_err(|_| PhotoError::InvalidPayload)
    }

    /// The data URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn split_data_url(s: &str) -> Result<(&str, &str), PhotoError> {
    let rest = s.strip_prefix("data:").ok_or(PhotoError::NotDataUrl)?;
    let (mime, payload) = rest.split_once(";base64,").ok_or(PhotoError::NotDataUrl)?;
    if !mime.starts_with("image/") {
        return Err(PhotoError::UnsupportedType(mime.to_owned()));
    }
    Ok((mime, payload))
}

impl TryFrom<String> for Photo {
    type Error = PhotoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Photo> for String {
    fn from(photo: Photo) -> Self {
        photo.0
    }
}
