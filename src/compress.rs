//! The compression pipeline: ingest → decode → plan → draw → select.
//!
//! [`Compressor`] wires the decision components around a [`PixelCodec`]:
//! configuration is resolved per call, the source is ingested once, the
//! codec decodes and reports dimensions plus the EXIF orientation tag, the
//! planner computes the output size, the codec draws and encodes, and the
//! size comparator keeps whichever of candidate/original is smaller —
//! converted to the caller's requested representation.
//!
//! ## The fallback contract
//!
//! A failed draw or encode (including implausibly short encoder output) is
//! not an error: the pipeline falls back to returning the original bytes in
//! the requested representation, skipping orientation correction and
//! transparency flattening. This is an explicit, logged outcome
//! (a two-branch `PixelOutcome`, not a catch-all), kept
//! for low-resource environments where encoders give out on large surfaces.
//! The codec is invoked at most once per call — the fallback never retries.

use crate::config::{self, CompressionConfig, ConfigError, ConfigOverrides, ResultMode};
use crate::encoding::{self, FormatError};
use crate::imaging::{
    CodecError, Decoded, Dimensions, DrawParams, EncodeParams, Orientation, PixelCodec,
    mime_is_opaque, plan_dimensions,
};
use crate::naming;
use crate::source::{ImageRef, ImageSource, SourceError};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

/// Encoder output shorter than this is treated as a failed encode.
const MIN_PLAUSIBLE_OUTPUT: usize = 10;

#[derive(Error, Debug)]
pub enum CompressError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no image data to compress")]
    MissingInput,
    #[error("no encoder available for {0}")]
    UnsupportedEnvironment(String),
    #[error("could not decode source image: {0}")]
    Decode(String),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SourceError> for CompressError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Empty => Self::MissingInput,
            SourceError::Format(e) => Self::Format(e),
            SourceError::Io(e) => Self::Io(e),
        }
    }
}

/// The value handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum CompressionResult {
    /// Text representation: a data URL.
    DataUrl(String),
    /// Binary representation with a download name.
    File {
        name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl CompressionResult {
    /// Byte size of the payload (estimated for the text representation).
    pub fn byte_size(&self) -> u64 {
        match self {
            Self::DataUrl(url) => encoding::estimate_decoded_size(url),
            Self::File { bytes, .. } => bytes.len() as u64,
        }
    }

    /// MIME type of the payload, when derivable.
    pub fn mime(&self) -> Option<String> {
        match self {
            Self::DataUrl(url) => encoding::mime_from_data_url(url).ok(),
            Self::File { mime, .. } => Some(mime.clone()),
        }
    }
}

/// One side of the dev-mode before/after report.
#[derive(Debug, Serialize)]
pub struct SideReport {
    pub width: u32,
    pub height: u32,
    pub byte_size: u64,
    pub mime: String,
    pub mode: &'static str,
}

/// Structured before/after report, logged in dev mode as JSON.
#[derive(Debug, Serialize)]
pub struct CompressionReport {
    pub source: SideReport,
    pub result: SideReport,
}

/// Outcome of the pixel path: either an encoded candidate or the reason the
/// pipeline is falling back to the original.
enum PixelOutcome {
    Rendered(String),
    Fallback { reason: String },
}

/// The compression pipeline around a pixel codec.
///
/// Holds only the codec and the read-only global override layer; every call
/// is independent, so `&self` calls are safe from multiple threads.
pub struct Compressor<C> {
    codec: C,
    global: Option<ConfigOverrides>,
}

impl<C: PixelCodec> Compressor<C> {
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            global: None,
        }
    }

    /// Build with a global override layer applied under every per-call layer.
    pub fn with_overrides(codec: C, overrides: ConfigOverrides) -> Self {
        Self {
            codec,
            global: Some(overrides),
        }
    }

    /// Compress one image.
    ///
    /// `per_call` overrides apply to this invocation only — they are an
    /// argument, not state, so nothing persists into the next call no matter
    /// how this one ends.
    pub fn compress(
        &self,
        input: ImageRef,
        per_call: Option<&ConfigOverrides>,
    ) -> Result<CompressionResult, CompressError> {
        let config = config::resolve(self.global.as_ref(), per_call);
        config.validate()?;

        let source = ImageSource::ingest(input)?;
        let out_mime = config
            .mime
            .clone()
            .unwrap_or_else(|| source.mime().to_string());
        if !self.codec.supports_output(&out_mime) {
            return Err(CompressError::UnsupportedEnvironment(out_mime));
        }

        let decoded = {
            let bytes = source.bytes()?;
            self.codec
                .decode(&bytes)
                .map_err(|e| CompressError::Decode(e.to_string()))?
        };
        let stored = (decoded.width, decoded.height);

        let orientation = Orientation::from_exif(decoded.orientation_tag);
        let upright = orientation.oriented_dimensions(decoded.width, decoded.height);
        let target = plan_dimensions(upright, config.width, config.height);

        let result = match self.render(&decoded, orientation, target, &out_mime, config.quality) {
            PixelOutcome::Rendered(candidate) => select_result(&candidate, &source, &config)?,
            PixelOutcome::Fallback { reason } => {
                warn!("pixel path failed ({reason}); returning original without correction");
                keep_original(&source, &config)?
            }
        };

        if config.dev {
            emit_report(&source, stored, target, &result, &config);
        }
        Ok(result)
    }

    /// Draw, conditionally flatten, encode. Every codec failure past decode
    /// becomes a fallback, never an error.
    fn render(
        &self,
        decoded: &Decoded<C::Surface>,
        orientation: Orientation,
        target: (u32, u32),
        mime: &str,
        quality: f32,
    ) -> PixelOutcome {
        let params = DrawParams {
            orientation,
            target: Dimensions::from(target),
        };
        let mut drawn = match self.codec.draw(&decoded.surface, &params) {
            Ok(surface) => surface,
            Err(e) => {
                return PixelOutcome::Fallback {
                    reason: e.to_string(),
                };
            }
        };

        if mime_is_opaque(mime) {
            self.codec.flatten_transparency(&mut drawn);
        }

        let encode = EncodeParams {
            mime: mime.to_string(),
            quality,
        };
        match self.codec.encode(&drawn, &encode) {
            Ok(text) if text.len() >= MIN_PLAUSIBLE_OUTPUT => PixelOutcome::Rendered(text),
            Ok(text) => PixelOutcome::Fallback {
                reason: format!("encoder produced {} chars", text.len()),
            },
            Err(CodecError::UnsupportedFormat(mime)) => PixelOutcome::Fallback {
                reason: format!("no encoder for {mime}"),
            },
            Err(e) => PixelOutcome::Fallback {
                reason: e.to_string(),
            },
        }
    }
}

/// Keep whichever of candidate/original is smaller, in the requested
/// representation. Ties favor the candidate — it is already upright.
fn select_result(
    candidate: &str,
    source: &ImageSource,
    config: &CompressionConfig,
) -> Result<CompressionResult, CompressError> {
    let candidate_size = encoding::estimate_decoded_size(candidate);
    if candidate_size > source.byte_size() {
        debug!(
            "candidate ({candidate_size} B) outgrew the source ({} B); keeping original",
            source.byte_size()
        );
        return keep_original(source, config);
    }

    match config.result_mode {
        ResultMode::Base64 => Ok(CompressionResult::DataUrl(candidate.to_string())),
        ResultMode::File => {
            let mime = encoding::mime_from_data_url(candidate)?;
            let bytes = encoding::decode_data_url(candidate)?;
            Ok(CompressionResult::File {
                name: result_name(config, &mime),
                mime,
                bytes,
            })
        }
    }
}

/// Return the original source, converting representation only when its
/// native one differs from the requested mode.
fn keep_original(
    source: &ImageSource,
    config: &CompressionConfig,
) -> Result<CompressionResult, CompressError> {
    match config.result_mode {
        ResultMode::Base64 => Ok(CompressionResult::DataUrl(source.as_data_url().into_owned())),
        ResultMode::File => {
            let bytes = source.bytes()?.into_owned();
            let mime = source.mime().to_string();
            Ok(CompressionResult::File {
                name: result_name(config, &mime),
                mime,
                bytes,
            })
        }
    }
}

fn result_name(config: &CompressionConfig, mime: &str) -> String {
    config
        .name
        .clone()
        .unwrap_or_else(|| naming::random_name(mime))
}

fn emit_report(
    source: &ImageSource,
    stored: (u32, u32),
    target: (u32, u32),
    result: &CompressionResult,
    config: &CompressionConfig,
) {
    let report = CompressionReport {
        source: SideReport {
            width: stored.0,
            height: stored.1,
            byte_size: source.byte_size(),
            mime: source.mime().to_string(),
            mode: source.kind().label(),
        },
        result: SideReport {
            width: target.0,
            height: target.1,
            byte_size: result.byte_size(),
            mime: result.mime().unwrap_or_default(),
            mode: config.result_mode.label(),
        },
    };
    if let Ok(json) = serde_json::to_string(&report) {
        info!(target: "shrinkray::report", "{json}");
    }
}
