//! Pixel codec trait and shared types.
//!
//! The [`PixelCodec`] trait is the seam between the decision pipeline and
//! actual pixel work: decode, draw (transform + resample), transparency
//! flattening, and encode. The planning code upstream never touches pixels,
//! so a recording mock can stand in for the whole codec in tests.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec) — pure Rust, statically
//! linked, built on the `image` crate.

use super::params::{DrawParams, EncodeParams};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
    #[error("no encoder available for {0}")]
    UnsupportedFormat(String),
}

/// Result of a decode: the pixel surface plus what the container said about it.
///
/// `orientation_tag` is the raw EXIF value when present; interpreting it is
/// the pipeline's job, not the codec's.
#[derive(Debug)]
pub struct Decoded<S> {
    pub surface: S,
    pub width: u32,
    pub height: u32,
    pub orientation_tag: Option<u32>,
}

/// Trait for pixel codecs.
///
/// `Surface` is the codec's in-memory pixel representation. The pipeline only
/// moves surfaces between codec calls and never inspects them.
pub trait PixelCodec {
    type Surface;

    /// Decode an image from raw bytes, reporting stored dimensions and the
    /// EXIF orientation tag if one exists.
    fn decode(&self, bytes: &[u8]) -> Result<Decoded<Self::Surface>, CodecError>;

    /// Draw the surface into a new surface of exactly `params.target`,
    /// applying the orientation correction (rotation, then horizontal
    /// mirror).
    fn draw(&self, surface: &Self::Surface, params: &DrawParams)
    -> Result<Self::Surface, CodecError>;

    /// Replace fully transparent pixels (alpha = 0) with opaque white.
    ///
    /// Called by the pipeline only when the output format cannot represent
    /// transparency. Partially transparent pixels are left alone.
    fn flatten_transparency(&self, surface: &mut Self::Surface);

    /// Encode the surface as a data URL.
    fn encode(&self, surface: &Self::Surface, params: &EncodeParams) -> Result<String, CodecError>;

    /// Whether an encoder for `mime` is compiled in.
    fn supports_output(&self, mime: &str) -> bool;
}
