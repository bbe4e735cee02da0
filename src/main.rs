use clap::Parser;
use rayon::prelude::*;
use shrinkray::{CompressionResult, Compressor, ConfigOverrides, ImageRef, ResultMode, RustCodec};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shrinkray")]
#[command(version)]
#[command(about = "Shrink images for transport")]
#[command(long_about = "\
Shrink images for transport

Each input is decoded, rotated upright per its EXIF orientation tag, scaled
down to fit the configured bounds (never up), and re-encoded. If the encoded
result would be larger than the original, the original is returned instead.

Results are written to the output directory: data URLs as <stem>.b64 text
files, file-mode results under their generated (or --name) filename.

Configuration layers, later wins: built-in defaults (width 750, quality 0.8,
JPEG output, base64 mode) ← --config TOML file ← command-line flags.")]
struct Cli {
    /// Image files to compress
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Target width in pixels (0 clears the default bound of 750)
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels (0 clears the bound)
    #[arg(long)]
    height: Option<u32>,

    /// Encoder quality, 0.0-1.0
    #[arg(long)]
    quality: Option<f32>,

    /// Output MIME type, e.g. image/webp ("" keeps each source's format)
    #[arg(long)]
    mime: Option<String>,

    /// Result representation
    #[arg(long, value_parser = parse_mode)]
    mode: Option<ResultMode>,

    /// Fixed output filename (file mode; only sensible with one input)
    #[arg(long)]
    name: Option<String>,

    /// Output directory
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// TOML file with a global override layer
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log a structured before/after report per image
    #[arg(long)]
    dev: bool,
}

impl Cli {
    /// Flag-level overrides — the per-call layer, applied over --config.
    fn flag_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            quality: self.quality,
            mime: self.mime.clone(),
            result_mode: self.mode,
            dev: self.dev.then_some(true),
        }
    }
}

fn parse_mode(s: &str) -> Result<ResultMode, String> {
    match s {
        "base64" => Ok(ResultMode::Base64),
        "file" => Ok(ResultMode::File),
        other => Err(format!(
            "unknown result mode {other:?} (expected \"base64\" or \"file\")"
        )),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let global = match &cli.config {
        Some(path) => Some(ConfigOverrides::from_toml_file(path)?),
        None => None,
    };
    let compressor = match global {
        Some(layer) => Compressor::with_overrides(RustCodec::new(), layer),
        None => Compressor::new(RustCodec::new()),
    };
    let per_call = cli.flag_overrides();

    std::fs::create_dir_all(&cli.out)?;

    let failures: Vec<String> = cli
        .files
        .par_iter()
        .filter_map(|file| {
            match compress_one(&compressor, file, &per_call, &cli.out) {
                Ok(line) => {
                    println!("{line}");
                    None
                }
                Err(e) => Some(format!("{}: {e}", file.display())),
            }
        })
        .collect();

    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("error: {failure}");
        }
        return Err(format!("{} of {} inputs failed", failures.len(), cli.files.len()).into());
    }
    Ok(())
}

/// Compress one file and write the result; returns the summary line.
fn compress_one(
    compressor: &Compressor<RustCodec>,
    file: &Path,
    per_call: &ConfigOverrides,
    out_dir: &Path,
) -> Result<String, Box<dyn std::error::Error>> {
    let source_size = std::fs::metadata(file)?.len();
    let layer = (!per_call.is_empty()).then_some(per_call);
    let result = compressor.compress(ImageRef::Path(file.to_path_buf()), layer)?;

    let dest = match &result {
        CompressionResult::DataUrl(url) => {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            let dest = out_dir.join(format!("{stem}.b64"));
            std::fs::write(&dest, url)?;
            dest
        }
        CompressionResult::File { name, bytes, .. } => {
            let dest = out_dir.join(name);
            std::fs::write(&dest, bytes)?;
            dest
        }
    };

    Ok(format!(
        "{} → {} ({} → {})",
        file.display(),
        dest.display(),
        format_kb(source_size),
        format_kb(result.byte_size()),
    ))
}

fn format_kb(bytes: u64) -> String {
    format!("{:.2} kB", bytes as f64 / 1024.0)
}
