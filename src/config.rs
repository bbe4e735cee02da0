//! Compression configuration: defaults, override layers, validation.
//!
//! Three layers, later wins: the built-in defaults, an optional global
//! override layer fixed when the [`Compressor`](crate::Compressor) is built,
//! and an optional per-call layer passed to each
//! [`compress`](crate::Compressor::compress) invocation. The per-call layer
//! is a plain argument — nothing is stored between calls, so overrides can
//! never leak into the next invocation.
//!
//! ## Override File Format
//!
//! The CLI loads the global layer from a TOML file. All keys are optional —
//! override just the values you want:
//!
//! ```toml
//! width = 1200         # target width in px; 0 clears the bound
//! height = 0           # target height in px; 0 clears the bound
//! quality = 0.7        # encoder quality, 0.0–1.0
//! mime = "image/webp"  # output format; "" preserves the source format
//! result_mode = "file" # "base64" (data URL) or "file" (named binary)
//! name = "avatar.webp" # fixed output name for file mode
//! dev = true           # log a before/after report per compression
//! ```
//!
//! TOML has no `null`, so the two "unset this default" cases use in-band
//! sentinels: a zero dimension clears that bound, and an empty MIME string
//! selects "keep the source's own format". Unknown keys are rejected to
//! catch typos early.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Requested output representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultMode {
    /// A data URL, embeddable directly in markup.
    #[default]
    Base64,
    /// A named binary object.
    File,
}

impl ResultMode {
    /// Label used in the diagnostic report.
    pub fn label(self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::File => "file",
        }
    }
}

/// Effective configuration for one compression call.
///
/// Produced by [`resolve`]; fields are plain values, all layering already
/// applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionConfig {
    /// Output name for file-mode results. `None` means a random name per
    /// result (see [`naming`](crate::naming)).
    pub name: Option<String>,
    /// Target width bound in pixels.
    pub width: Option<u32>,
    /// Target height bound in pixels.
    pub height: Option<u32>,
    /// Encoder quality in [0, 1].
    pub quality: f32,
    /// Output MIME type. `None` preserves the source format — rarely what
    /// you want for PNG sources, which tend to grow under recompression.
    pub mime: Option<String>,
    /// Requested output representation.
    pub result_mode: ResultMode,
    /// Emit a structured before/after report through the `log` facade.
    pub dev: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            name: None,
            width: Some(750),
            height: None,
            quality: 0.8,
            mime: Some("image/jpeg".to_string()),
            result_mode: ResultMode::Base64,
            dev: false,
        }
    }
}

impl CompressionConfig {
    /// Validate option ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.quality) || !self.quality.is_finite() {
            return Err(ConfigError::Validation(format!(
                "quality must be within 0.0–1.0, got {}",
                self.quality
            )));
        }
        Ok(())
    }
}

/// One sparse override layer.
///
/// Every present field overwrites the value below it; absent fields pass the
/// lower layer through. See the [module docs](self) for the zero/empty-string
/// sentinels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub name: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<f32>,
    pub mime: Option<String>,
    pub result_mode: Option<ResultMode>,
    pub dev: Option<bool>,
}

impl ConfigOverrides {
    /// Load a layer from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply(&self, config: &mut CompressionConfig) {
        if let Some(name) = &self.name {
            config.name = Some(name.clone());
        }
        if let Some(width) = self.width {
            config.width = positive(width);
        }
        if let Some(height) = self.height {
            config.height = positive(height);
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(mime) = &self.mime {
            config.mime = if mime.is_empty() {
                None
            } else {
                Some(mime.clone())
            };
        }
        if let Some(mode) = self.result_mode {
            config.result_mode = mode;
        }
        if let Some(dev) = self.dev {
            config.dev = dev;
        }
    }
}

/// Zero is the "clear this bound" sentinel.
fn positive(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

/// Resolve the effective configuration: defaults ← global ← per-call.
pub fn resolve(
    global: Option<&ConfigOverrides>,
    per_call: Option<&ConfigOverrides>,
) -> CompressionConfig {
    let mut config = CompressionConfig::default();
    if let Some(layer) = global {
        layer.apply(&mut config);
    }
    if let Some(layer) = per_call {
        layer.apply(&mut config);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_template() {
        let config = CompressionConfig::default();
        assert_eq!(config.width, Some(750));
        assert_eq!(config.height, None);
        assert_eq!(config.quality, 0.8);
        assert_eq!(config.mime.as_deref(), Some("image/jpeg"));
        assert_eq!(config.result_mode, ResultMode::Base64);
        assert!(!config.dev);
        assert!(config.name.is_none());
    }

    #[test]
    fn per_call_wins_over_global_wins_over_default() {
        let global = ConfigOverrides {
            width: Some(1200),
            quality: Some(0.5),
            ..ConfigOverrides::default()
        };
        let per_call = ConfigOverrides {
            quality: Some(0.9),
            ..ConfigOverrides::default()
        };
        let config = resolve(Some(&global), Some(&per_call));
        assert_eq!(config.width, Some(1200)); // from global
        assert_eq!(config.quality, 0.9); // per-call beats global
        assert_eq!(config.height, None); // default untouched
    }

    #[test]
    fn zero_dimension_clears_the_bound() {
        let layer = ConfigOverrides {
            width: Some(0),
            height: Some(600),
            ..ConfigOverrides::default()
        };
        let config = resolve(Some(&layer), None);
        assert_eq!(config.width, None);
        assert_eq!(config.height, Some(600));
    }

    #[test]
    fn empty_mime_preserves_source_format() {
        let layer = ConfigOverrides {
            mime: Some(String::new()),
            ..ConfigOverrides::default()
        };
        assert_eq!(resolve(Some(&layer), None).mime, None);
    }

    #[test]
    fn validation_rejects_out_of_range_quality() {
        for quality in [-0.1, 1.01, f32::NAN] {
            let config = CompressionConfig {
                quality,
                ..CompressionConfig::default()
            };
            assert!(config.validate().is_err(), "quality {quality}");
        }
    }

    #[test]
    fn validation_accepts_the_boundaries() {
        for quality in [0.0, 1.0, 0.45] {
            let config = CompressionConfig {
                quality,
                ..CompressionConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn toml_layer_parses_sparse_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("overrides.toml");
        std::fs::write(&path, "width = 1200\nresult_mode = \"file\"\n").unwrap();

        let layer = ConfigOverrides::from_toml_file(&path).unwrap();
        assert_eq!(layer.width, Some(1200));
        assert_eq!(layer.result_mode, Some(ResultMode::File));
        assert_eq!(layer.quality, None);
    }

    #[test]
    fn toml_layer_rejects_unknown_keys() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("overrides.toml");
        std::fs::write(&path, "widht = 1200\n").unwrap();
        assert!(matches!(
            ConfigOverrides::from_toml_file(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn empty_layer_is_detectable() {
        assert!(ConfigOverrides::default().is_empty());
        assert!(
            !ConfigOverrides {
                dev: Some(true),
                ..ConfigOverrides::default()
            }
            .is_empty()
        );
    }
}
