//! Pixel-facing half of the pipeline.
//!
//! | Concern | Where |
//! |---|---|
//! | **Orientation mapping** | [`Orientation`] — EXIF tag → rotation/mirror/swap |
//! | **Dimension planning** | [`plan_dimensions`] — pure math, no I/O |
//! | **Operation descriptions** | [`DrawParams`] / [`EncodeParams`] — what to do, not how |
//! | **Codec seam** | [`codec`] — [`PixelCodec`] trait + mock |
//! | **Production codec** | [`rust_codec`] — `image` crate + `kamadak-exif` |

mod calculations;
pub mod codec;
mod orientation;
mod params;
pub mod rust_codec;

pub use calculations::plan_dimensions;
pub use codec::{CodecError, Decoded, PixelCodec};
pub use orientation::Orientation;
pub use params::{Dimensions, DrawParams, EncodeParams, mime_is_opaque};
pub use rust_codec::RustCodec;
