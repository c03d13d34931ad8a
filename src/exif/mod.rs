//! EXIF tag decoding.
//!
//! This module turns a recognized container into a flat map of decoded tags:
//!
//! - [`registry`] / [`tables`]: tag names and value labels per directory
//! - [`walker`]: IFD chain walking and entry decoding
//! - [`makernote`]: vendor MakerNote decoders
//! - [`thumbnail`]: embedded thumbnail extraction
//!
//! # Example
//!
//! ```no_run
//! use exif_decoder::{process_file, DecodeOptions};
//!
//! let data = process_file("photo.jpg", &DecodeOptions::default())?;
//! if let Some(tag) = data.get("EXIF DateTimeOriginal") {
//!     println!("taken {}", tag);
//! }
//! # Ok::<(), exif_decoder::ExifError>(())
//! ```

pub mod makernote;
pub mod registry;
pub mod tables;
pub mod tag;
pub mod thumbnail;
pub mod walker;


use std::fs::File;
use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::config::DecodeOptions;
use crate::error::{ExifError, IoError};
use crate::format::{sniff, ContainerInfo};
use crate::io::{
    BlockCache, RangeReader, SeekReader, SliceReader, DEFAULT_BLOCK_SIZE, DEFAULT_CACHE_CAPACITY,
};

pub use makernote::decode_maker_note;
pub use registry::{IfdKind, TagLabel, TagSpec, TagTable};
pub use tag::{DecodedTag, TagMap};
pub use thumbnail::{extract_thumbnail, Thumbnail, ThumbnailKind};
pub use walker::{DumpOutcome, IfdWalker};

/// Ordinal of the top-level IFD that describes the thumbnail.
const THUMBNAIL_IFD_ORDINAL: usize = 1;

// =============================================================================
// ExifData
// =============================================================================

/// Everything decoded from one file.
///
/// An unrecognized file, or one without metadata, gives empty data.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExifData {
    /// Where the metadata was found, `None` if the file was not recognized
    pub container: Option<ContainerInfo>,

    /// Decoded tags by key
    pub tags: TagMap,

    /// Embedded thumbnail, when details were on and one was found
    #[serde(skip)]
    pub thumbnail: Option<Thumbnail>,
}

impl ExifData {
    /// Look up a tag by its `"<IFD> <name>"` key.
    pub fn get(&self, key: &str) -> Option<&DecodedTag> {
        self.tags.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Decode metadata from an in-memory file.
pub fn process(data: impl Into<Bytes>, options: &DecodeOptions) -> Result<ExifData, ExifError> {
    process_reader(&SliceReader::new(data), options)
}

/// Decode metadata from any byte source.
///
/// # Errors
/// * `ExifError::Io` - the source could not be read while sniffing
/// * `ExifError::Tiff` - malformed structure, with `strict` set only
pub fn process_reader<R: RangeReader>(
    reader: &R,
    options: &DecodeOptions,
) -> Result<ExifData, ExifError> {
    let Some(container) = sniff(reader)? else {
        debug!(source = reader.identifier(), "no EXIF metadata found");
        return Ok(ExifData::default());
    };

    debug!(
        source = reader.identifier(),
        format = container.format.name(),
        header_offset = container.header_offset,
        byte_order = ?container.byte_order,
        "found TIFF header"
    );

    let mut walker = IfdWalker::new(
        reader,
        container.header_offset,
        container.byte_order,
        options,
    );
    let ifds = walker.walk()?;

    let mut thumbnail = None;
    if options.details {
        decode_maker_note(&mut walker)?;
        thumbnail = ifds
            .get(THUMBNAIL_IFD_ORDINAL)
            .and_then(|&offset| extract_thumbnail(&walker, offset));
    }

    let tags = walker.into_tags();
    debug!(
        ifds = ifds.len(),
        tags = tags.len(),
        thumbnail = thumbnail.is_some(),
        "decoded metadata"
    );

    Ok(ExifData {
        container: Some(container),
        tags,
        thumbnail,
    })
}

/// Decode metadata from a file on disk, with the default read cache.
pub fn process_file(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> Result<ExifData, ExifError> {
    let reader = open_file(path, DEFAULT_BLOCK_SIZE, DEFAULT_CACHE_CAPACITY)?;
    process_reader(&reader, options)
}

/// Open a file as a block-cached byte source.
pub fn open_file(
    path: impl AsRef<Path>,
    block_size: usize,
    capacity: usize,
) -> Result<BlockCache<SeekReader<File>>, IoError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = SeekReader::new(file, path.display().to_string())?;
    Ok(BlockCache::with_capacity(reader, block_size, capacity))
}

// =============================================================================
// Tests
// =============================================================================
