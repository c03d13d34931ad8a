//! EXIF Decoder - dump EXIF metadata from TIFF and JPEG files.
//!
//! Prints the decoded tags of each file given on the command line, as text
//! or JSON, and optionally saves embedded thumbnails.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_decoder::{open_file, process_reader, Config, DecodeOptions, ExifData, Thumbnail};

fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let options = config.decode_options();
    debug!(?options, files = config.files.len(), "decoding");

    let mut failed = false;
    for path in &config.files {
        if let Err(e) = run_file(&config, &options, path) {
            error!("{}: {}", path.display(), e);
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so that stdout carries only tag output.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_decoder=debug"
    } else {
        "exif_decoder=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// =============================================================================
// Per-file Processing
// =============================================================================

/// Decode one file and print it. Errors only when the file cannot be read.
fn run_file(config: &Config, options: &DecodeOptions, path: &Path) -> Result<(), String> {
    let reader =
        open_file(path, config.block_size, config.cache_blocks).map_err(|e| e.to_string())?;
    let data = process_reader(&reader, options).map_err(|e| e.to_string())?;

    if config.json {
        print_json(path, &data)?;
    } else {
        print_text(path, &data);
    }

    if let (Some(dir), Some(thumbnail)) = (&config.thumbnail_dir, &data.thumbnail) {
        match save_thumbnail(dir, path, thumbnail) {
            Ok(target) => info!("{}: thumbnail saved to {}", path.display(), target.display()),
            Err(e) => warn!("{}: could not save thumbnail: {}", path.display(), e),
        }
    }

    Ok(())
}

fn print_text(path: &Path, data: &ExifData) {
    println!("{}:", path.display());

    if data.is_empty() {
        println!("  No EXIF information found");
        println!();
        return;
    }

    for (key, tag) in &data.tags {
        println!("  {} ({}): {}", key, tag.type_abbreviation(), tag.display());
    }

    if let Some(thumbnail) = &data.thumbnail {
        println!(
            "  Thumbnail: {} bytes ({})",
            thumbnail.len(),
            thumbnail.kind.extension()
        );
    }
    println!();
}

fn print_json(path: &Path, data: &ExifData) -> Result<(), String> {
    let thumbnail = data.thumbnail.as_ref().map(|thumbnail| {
        serde_json::json!({
            "kind": thumbnail.kind,
            "length": thumbnail.len(),
        })
    });

    let json = serde_json::json!({
        "file": path.display().to_string(),
        "container": data.container,
        "tags": data.tags,
        "thumbnail": thumbnail,
    });

    let text = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
    println!("{}", text);
    Ok(())
}

/// Write a thumbnail to `<dir>/<file stem>.thumb.<ext>`.
fn save_thumbnail(dir: &Path, source: &Path, thumbnail: &Thumbnail) -> std::io::Result<PathBuf> {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let target = dir.join(format!("{}.thumb.{}", stem, thumbnail.kind.extension()));

    fs::create_dir_all(dir)?;
    fs::write(&target, &thumbnail.data)?;
    Ok(target)
}
