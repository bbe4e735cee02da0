//! # shrinkray
//!
//! Decides HOW to shrink an image for transport. Given a source image, an
//! EXIF orientation tag, and a target configuration, shrinkray computes the
//! output pixel size, the transform that presents the image upright, and —
//! once the encoder has produced bytes — whether the compressed candidate or
//! the original should be returned, in the caller's requested representation
//! (data URL vs. named binary).
//!
//! ```no_run
//! use shrinkray::{Compressor, ImageRef, RustCodec};
//!
//! let compressor = Compressor::new(RustCodec::new());
//! let result = compressor.compress(ImageRef::Path("photo.jpg".into()), None)?;
//! # Ok::<(), shrinkray::CompressError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`compress`] | Pipeline orchestration: ingest → decode → plan → draw → select |
//! | [`config`] | Layered configuration (defaults ← global ← per-call) and validation |
//! | [`source`] | Input classification and one-shot ingestion into an immutable value |
//! | [`encoding`] | Data-URL transcoding, MIME derivation, byte-size estimation |
//! | [`imaging`] | Orientation mapping, dimension planning, the codec seam, the `image`-crate codec |
//! | [`naming`] | Random download names for binary results |
//!
//! # Design Decisions
//!
//! ## Pixels Behind a Trait
//!
//! The decision logic never touches pixels. All pixel work — decode, rotate,
//! resample, flatten, encode — goes through [`imaging::PixelCodec`], and the
//! pipeline is tested against a recording mock. The shipped implementation,
//! [`imaging::RustCodec`], is pure Rust (`image` crate + `kamadak-exif`), so
//! the binary has zero system dependencies.
//!
//! ## Never Upscale, Never Grow
//!
//! Dimension planning only ever shrinks, and the size comparator refuses to
//! hand back a "compressed" file that is bigger than what came in: the
//! original bytes win, converted to the requested representation if needed.
//! Recompression is a transport optimization, not an obligation.
//!
//! ## Fallback Over Failure
//!
//! When the encoder fails or produces implausible output, the call still
//! succeeds: the original bytes come back, unchanged and un-rotated, and the
//! event is logged. Decode failures are the only pixel-path errors surfaced
//! to the caller — without decoded pixels there is nothing to fall back to.

pub mod compress;
pub mod config;
pub mod encoding;
pub mod imaging;
pub mod naming;
pub mod source;

pub use compress::{CompressError, CompressionReport, CompressionResult, Compressor, SideReport};
pub use config::{CompressionConfig, ConfigError, ConfigOverrides, ResultMode};
pub use encoding::FormatError;
pub use imaging::{Orientation, PixelCodec, RustCodec, plan_dimensions};
pub use source::{ImageRef, ImageSource, SourceKind};
