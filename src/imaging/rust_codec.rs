//! Pure Rust pixel codec — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image::load_from_memory` |
//! | Orientation tag | `kamadak-exif` (`Reader::read_from_container`) |
//! | Rotate / mirror | `image::DynamicImage::{rotate90,rotate180,rotate270,fliph}` |
//! | Resample | `image::DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality-aware) |
//! | Encode → PNG / WebP | `image::DynamicImage::write_to` (WebP is lossless) |

use super::codec::{CodecError, Decoded, PixelCodec};
use super::params::{DrawParams, EncodeParams};
use crate::encoding;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, ImageFormat, Rgba};
use std::io::Cursor;

/// Map a MIME type to the `image` crate format, if this build knows it.
fn format_for_mime(mime: &str) -> Option<ImageFormat> {
    match mime {
        "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
        "image/png" => Some(ImageFormat::Png),
        "image/webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// Read the EXIF Orientation tag out of the container bytes.
///
/// Any parse failure or absent tag is `None` — an unreadable tag means "no
/// correction", never an error.
fn orientation_tag(bytes: &[u8]) -> Option<u32> {
    let mut cursor = Cursor::new(bytes);
    let exif = exif::Reader::new().read_from_container(&mut cursor).ok()?;
    let field = exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?;
    field.value.get_uint(0)
}

/// Pure Rust codec using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelCodec for RustCodec {
    type Surface = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<Decoded<DynamicImage>, CodecError> {
        let surface =
            image::load_from_memory(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;
        let (width, height) = (surface.width(), surface.height());
        Ok(Decoded {
            surface,
            width,
            height,
            orientation_tag: orientation_tag(bytes),
        })
    }

    fn draw(
        &self,
        surface: &DynamicImage,
        params: &DrawParams,
    ) -> Result<DynamicImage, CodecError> {
        // Rotation first, then the horizontal mirror — the orientation
        // decomposition assumes this order.
        let upright = match params.orientation.rotation_degrees() {
            90 => surface.rotate90(),
            180 => surface.rotate180(),
            270 => surface.rotate270(),
            _ => surface.clone(),
        };
        let upright = if params.orientation.mirrored() {
            upright.fliph()
        } else {
            upright
        };
        // The planner preserved the aspect ratio, so exact resize does not
        // distort; it only guarantees the output surface size.
        Ok(upright.resize_exact(params.target.width, params.target.height, FilterType::Lanczos3))
    }

    fn flatten_transparency(&self, surface: &mut DynamicImage) {
        if !surface.color().has_alpha() {
            return;
        }
        let mut rgba = surface.to_rgba8();
        for px in rgba.pixels_mut() {
            if px[3] == 0 {
                *px = Rgba([255, 255, 255, 255]);
            }
        }
        *surface = DynamicImage::ImageRgba8(rgba);
    }

    fn encode(&self, surface: &DynamicImage, params: &EncodeParams) -> Result<String, CodecError> {
        let format = format_for_mime(&params.mime)
            .ok_or_else(|| CodecError::UnsupportedFormat(params.mime.clone()))?;
        let mut buf = Vec::new();
        match format {
            ImageFormat::Jpeg => {
                let rgb = surface.to_rgb8();
                JpegEncoder::new_with_quality(&mut buf, params.quality_percent())
                    .encode(
                        rgb.as_raw(),
                        rgb.width(),
                        rgb.height(),
                        ExtendedColorType::Rgb8,
                    )
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            other => {
                surface
                    .write_to(&mut Cursor::new(&mut buf), other)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
        }
        Ok(encoding::encode_data_url(&buf, &params.mime))
    }

    fn supports_output(&self, mime: &str) -> bool {
        format_for_mime(mime).is_some_and(|f| f.writing_enabled())
    }
}
