//! Parameter types for pixel operations.
//!
//! These structs describe *what* the codec should do, not *how*. They are the
//! interface between the planning pipeline (which decides dimensions and
//! transforms) and the [`codec`](super::codec) (which does the actual pixel
//! work), so a mock codec can stand in during tests without changing any
//! planning logic.

use super::orientation::Orientation;

/// Pixel dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Full specification of a draw: upright-correcting transform plus the exact
/// output surface size (already orientation-swapped and aspect-planned).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawParams {
    pub orientation: Orientation,
    pub target: Dimensions,
}

/// Full specification of an encode: output MIME type and quality fraction.
///
/// `quality` is validated to [0, 1] by config resolution before it gets here.
/// Lossless formats ignore it.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub mime: String,
    pub quality: f32,
}

impl EncodeParams {
    /// Quality as the 1–100 percentage most encoders take.
    pub fn quality_percent(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Whether a MIME type has no transparency support, requiring alpha
/// flattening before encode.
pub fn mime_is_opaque(mime: &str) -> bool {
    matches!(mime, "image/jpeg" | "image/jpg" | "image/bmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_fraction_converts_to_percent() {
        let p = EncodeParams {
            mime: "image/jpeg".into(),
            quality: 0.8,
        };
        assert_eq!(p.quality_percent(), 80);
    }

    #[test]
    fn quality_percent_never_hits_zero() {
        let p = EncodeParams {
            mime: "image/jpeg".into(),
            quality: 0.0,
        };
        assert_eq!(p.quality_percent(), 1);
    }

    #[test]
    fn jpeg_is_opaque_png_is_not() {
        assert!(mime_is_opaque("image/jpeg"));
        assert!(mime_is_opaque("image/jpg"));
        assert!(!mime_is_opaque("image/png"));
        assert!(!mime_is_opaque("image/webp"));
    }

    #[test]
    fn dimensions_from_tuple() {
        assert_eq!(Dimensions::from((750, 1000)), Dimensions::new(750, 1000));
    }
}
