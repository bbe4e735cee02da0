//! EXIF orientation → geometric transform mapping.
//!
//! Cameras store pixels in sensor order and record the capture-time rotation
//! in the Orientation tag (TIFF tag 274, values 1–8). Each value decomposes
//! into a clockwise rotation (0/90/180/270°) followed by a horizontal mirror,
//! applied in that order to present the image upright. Values 5–8 involve a
//! quarter turn, so the displayed width/height are the stored height/width.

/// Named transform for each EXIF orientation value.
///
/// Derived solely from the tag integer; anything absent or outside [1,8]
/// maps to [`Normal`](Orientation::Normal).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Orientation {
    /// No rotation or mirror needed.
    #[default]
    Normal = 1,
    /// Mirror left-right.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Mirror top-bottom (180° rotation + horizontal mirror).
    FlipVertical = 4,
    /// Rotate 90° CW, then mirror (swaps dimensions).
    Transpose = 5,
    /// Rotate 90 degrees clockwise (swaps dimensions).
    Rotate90 = 6,
    /// Rotate 270° CW, then mirror (swaps dimensions).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (swaps dimensions).
    Rotate270 = 8,
}

impl Orientation {
    /// Create from an EXIF Orientation tag value.
    ///
    /// `None` and out-of-range values both mean "no correction".
    pub fn from_exif(tag: Option<u32>) -> Self {
        match tag {
            Some(1) => Self::Normal,
            Some(2) => Self::FlipHorizontal,
            Some(3) => Self::Rotate180,
            Some(4) => Self::FlipVertical,
            Some(5) => Self::Transpose,
            Some(6) => Self::Rotate90,
            Some(7) => Self::Transverse,
            Some(8) => Self::Rotate270,
            _ => Self::Normal,
        }
    }

    /// Clockwise rotation component in degrees (0, 90, 180, or 270).
    pub fn rotation_degrees(self) -> u32 {
        match self {
            Self::Normal | Self::FlipHorizontal => 0,
            Self::Rotate180 | Self::FlipVertical => 180,
            Self::Transpose | Self::Rotate90 => 90,
            Self::Transverse | Self::Rotate270 => 270,
        }
    }

    /// Whether a horizontal mirror is applied after the rotation.
    pub fn mirrored(self) -> bool {
        matches!(
            self,
            Self::FlipHorizontal | Self::FlipVertical | Self::Transpose | Self::Transverse
        )
    }

    /// Whether the transform exchanges width and height.
    ///
    /// True for the quarter-turn orientations (values 5–8).
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::Transpose | Self::Rotate90 | Self::Transverse | Self::Rotate270
        )
    }

    /// Upright dimensions for the given stored dimensions.
    pub fn oriented_dimensions(self, stored_width: u32, stored_height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (stored_height, stored_width)
        } else {
            (stored_width, stored_height)
        }
    }

    /// Whether no correction is needed.
    pub fn is_identity(self) -> bool {
        matches!(self, Self::Normal)
    }
}
