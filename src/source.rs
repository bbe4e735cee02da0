//! Input classification and ingestion.
//!
//! A caller can hand over an image three ways: an in-memory buffer with a
//! declared MIME type, a data URL, or a filesystem path. Ingestion classifies
//! the reference, reads path inputs into memory, and computes the MIME type
//! and byte size exactly once, producing an immutable [`ImageSource`] — the
//! rest of the pipeline never recomputes or mutates any of it.
//!
//! For data URLs the byte size is the
//! [estimate](crate::encoding::estimate_decoded_size) rather than a decoded
//! count; the size comparison downstream is calibrated against the same
//! estimator, so both sides of the comparison use one yardstick.

use crate::encoding::{self, FormatError};
use std::borrow::Cow;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no image data to compress")]
    Empty,
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An image reference as supplied by the caller.
#[derive(Debug, Clone)]
pub enum ImageRef {
    /// In-memory binary image with its declared MIME type.
    Binary { bytes: Vec<u8>, mime: String },
    /// `data:image/...;base64,` text.
    DataUrl(String),
    /// Path resolved through the filesystem at ingestion time.
    Path(PathBuf),
}

impl ImageRef {
    /// Classify a text reference: data URL or path-like string.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if encoding::is_data_url(&text) {
            Self::DataUrl(text)
        } else {
            Self::Path(PathBuf::from(text))
        }
    }
}

/// How the source arrived, which doubles as its native representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Binary,
    DataUrl,
    Path,
}

impl SourceKind {
    /// Label used in the diagnostic report.
    pub fn label(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::DataUrl => "base64",
            Self::Path => "path",
        }
    }
}

enum Payload {
    Bytes(Vec<u8>),
    Text(String),
}

/// An ingested source image: payload plus facts computed once.
pub struct ImageSource {
    kind: SourceKind,
    mime: String,
    byte_size: u64,
    payload: Payload,
}

impl ImageSource {
    /// Ingest a caller-supplied reference.
    ///
    /// Reads path inputs from disk, derives the MIME type (declared for
    /// binary, parsed for text), and fixes the byte size.
    pub fn ingest(input: ImageRef) -> Result<Self, SourceError> {
        match input {
            ImageRef::Binary { bytes, mime } => {
                if bytes.is_empty() {
                    return Err(SourceError::Empty);
                }
                Ok(Self {
                    kind: SourceKind::Binary,
                    byte_size: bytes.len() as u64,
                    mime,
                    payload: Payload::Bytes(bytes),
                })
            }
            ImageRef::DataUrl(text) => {
                if text.is_empty() {
                    return Err(SourceError::Empty);
                }
                let mime = encoding::mime_from_data_url(&text)?;
                Ok(Self {
                    kind: SourceKind::DataUrl,
                    byte_size: encoding::estimate_decoded_size(&text),
                    mime,
                    payload: Payload::Text(text),
                })
            }
            ImageRef::Path(path) => {
                if path.as_os_str().is_empty() {
                    return Err(SourceError::Empty);
                }
                let mime = encoding::mime_from_path(&path.to_string_lossy())?;
                let bytes = std::fs::read(&path)?;
                if bytes.is_empty() {
                    return Err(SourceError::Empty);
                }
                Ok(Self {
                    kind: SourceKind::Path,
                    byte_size: bytes.len() as u64,
                    mime,
                    payload: Payload::Bytes(bytes),
                })
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    /// The raw bytes, decoding the base64 payload for data-URL sources.
    pub fn bytes(&self) -> Result<Cow<'_, [u8]>, FormatError> {
        match &self.payload {
            Payload::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Payload::Text(text) => Ok(Cow::Owned(encoding::decode_data_url(text)?)),
        }
    }

    /// The source as a data URL, encoding binary payloads on demand.
    pub fn as_data_url(&self) -> Cow<'_, str> {
        match &self.payload {
            Payload::Text(text) => Cow::Borrowed(text.as_str()),
            Payload::Bytes(bytes) => Cow::Owned(encoding::encode_data_url(bytes, &self.mime)),
        }
    }
}
