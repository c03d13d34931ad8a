//! Configuration for EXIF decoding.
//!
//! Two layers live here:
//! - [`DecodeOptions`]: what the library needs for one decode pass
//! - [`Config`]: the command line of the `exif-decoder` binary, parsed with
//!   clap, with environment variable fallbacks
//!
//! # Example
//!
//! ```ignore
//! use exif_decoder::config::Config;
//!
//! let config = Config::parse();
//! let options = config.decode_options();
//! for path in &config.files {
//!     let data = exif_decoder::process_file(path, &options)?;
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_STOP_TAG` - Stop decoding a directory after this tag
//! - `EXIF_QUICK` - Skip MakerNote decoding and thumbnails (default: false)
//! - `EXIF_STRICT` - Fail on malformed entries instead of skipping them
//! - `EXIF_BLOCK_SIZE` - Read block size in bytes (default: 16KB)
//! - `EXIF_CACHE_BLOCKS` - Blocks kept per file (default: 64)

use std::path::PathBuf;

use clap::Parser;

use crate::io::{DEFAULT_BLOCK_SIZE, DEFAULT_CACHE_CAPACITY};

// =============================================================================
// Default Values
// =============================================================================

/// Smallest accepted block size.
pub const MIN_BLOCK_SIZE: usize = 512;

/// Largest accepted block size.
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;

// =============================================================================
// Decode Options
// =============================================================================

/// Options for one decode pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Stop decoding a directory once this tag has been decoded.
    /// `None` never stops.
    pub stop_tag: Option<String>,

    /// Decode MakerNotes and extract thumbnails. When off, the MakerNote and
    /// UserComment tags are not decoded at all.
    pub details: bool,

    /// Fail on the first malformed entry instead of skipping it.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            stop_tag: None,
            details: true,
            strict: false,
        }
    }
}

impl DecodeOptions {
    pub fn with_stop_tag(mut self, tag: impl Into<String>) -> Self {
        self.stop_tag = Some(tag.into());
        self
    }

    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether decoding should stop after the tag called `name`.
    #[inline]
    pub fn stops_at(&self, name: &str) -> bool {
        self.stop_tag.as_deref() == Some(name)
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// EXIF Decoder - dump EXIF metadata from TIFF and JPEG files.
///
/// Prints every decoded tag, including GPS, Interoperability and Canon
/// MakerNote data, and can save embedded thumbnails.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-decoder")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Files to decode.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    // =========================================================================
    // Decoding
    // =========================================================================
    /// Stop decoding each directory after this tag name (e.g. DateTimeOriginal).
    #[arg(short = 't', long, env = "EXIF_STOP_TAG")]
    pub stop_tag: Option<String>,

    /// Quick mode: skip MakerNote decoding and thumbnail extraction.
    #[arg(short, long, default_value_t = false, env = "EXIF_QUICK")]
    pub quick: bool,

    /// Fail on malformed entries instead of skipping them.
    #[arg(short, long, default_value_t = false, env = "EXIF_STRICT")]
    pub strict: bool,

    // =========================================================================
    // Output
    // =========================================================================
    /// Print one JSON document per file.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Directory to write extracted thumbnails to.
    #[arg(long)]
    pub thumbnail_dir: Option<PathBuf>,

    // =========================================================================
    // Reading
    // =========================================================================
    /// Block size in bytes for the read cache.
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE, env = "EXIF_BLOCK_SIZE")]
    pub block_size: usize,

    /// Maximum number of blocks to cache per file.
    #[arg(long, default_value_t = DEFAULT_CACHE_CAPACITY, env = "EXIF_CACHE_BLOCKS")]
    pub cache_blocks: usize,

    // =========================================================================
    // Logging
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("At least one file is required".to_string());
        }

        if self.stop_tag.as_deref().is_some_and(str::is_empty) {
            return Err("stop_tag must not be empty. Unset --stop-tag or EXIF_STOP_TAG".to_string());
        }

        // Thumbnails are only extracted with details on
        if self.quick && self.thumbnail_dir.is_some() {
            return Err("--thumbnail-dir cannot be combined with --quick".to_string());
        }

        if self.cache_blocks == 0 {
            return Err("cache_blocks must be greater than 0".to_string());
        }

        if self.block_size < MIN_BLOCK_SIZE || self.block_size > MAX_BLOCK_SIZE {
            return Err("block_size must be between 512B and 16MB".to_string());
        }

        Ok(())
    }

    /// Library options for this command line.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            stop_tag: self.stop_tag.clone(),
            details: !self.quick,
            strict: self.strict,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
