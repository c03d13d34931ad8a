//! Embedded thumbnail extraction.
//!
//! The second top-level IFD describes the thumbnail. Uncompressed thumbnails
//! are stored as TIFF strips, which are concatenated; JPEG thumbnails are a
//! single byte range given by `JpegIFOffset` / `JpegIFByteCount`. The bytes
//! are returned as stored, not decoded.

use bytes::{Bytes, BytesMut};
use serde::Serialize;
use tracing::{debug, warn};

use crate::format::tiff::{Compression, Ifd, TiffTag};

use super::walker::IfdWalker;

/// Encoding of the extracted thumbnail bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThumbnailKind {
    /// Raw uncompressed strip data
    Tiff,
    /// A complete JPEG stream
    Jpeg,
}

impl ThumbnailKind {
    /// File extension for saving the thumbnail.
    pub const fn extension(self) -> &'static str {
        match self {
            ThumbnailKind::Tiff => "tif",
            ThumbnailKind::Jpeg => "jpg",
        }
    }
}

/// Raw thumbnail bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub kind: ThumbnailKind,
    pub data: Bytes,
}

impl Thumbnail {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Extract the thumbnail described by the IFD at `thumb_ifd`.
///
/// Reads the directory entries directly, so a stop tag that cut the
/// `Thumbnail` tags short does not matter. Returns `None` when the needed
/// tags are missing, the compression is neither uncompressed nor JPEG, or
/// the ranges fall outside the data.
pub fn extract_thumbnail(walker: &IfdWalker<'_>, thumb_ifd: u32) -> Option<Thumbnail> {
    let ifd = match walker.values().read_ifd(thumb_ifd as u64) {
        Ok(ifd) => ifd,
        Err(err) => {
            warn!(offset = thumb_ifd, error = %err, "unreadable thumbnail IFD");
            return None;
        }
    };

    let compression = integers(walker, &ifd, TiffTag::Compression)
        .and_then(|values| values.first().copied())
        .and_then(|value| u16::try_from(value).ok());

    match compression {
        Some(code) => match Compression::from_u16(code) {
            Some(Compression::None) => extract_strips(walker, &ifd),
            Some(compression) if compression.is_jpeg() => extract_jpeg(walker, &ifd),
            Some(compression) => {
                debug!(compression = compression.name(), "unsupported thumbnail compression");
                None
            }
            None => {
                debug!(compression = code, "unknown thumbnail compression");
                None
            }
        },
        // Some writers omit Compression next to a JPEG pointer
        None => extract_jpeg(walker, &ifd),
    }
}

/// Integer values of a tag of the thumbnail IFD.
fn integers(walker: &IfdWalker<'_>, ifd: &Ifd, tag: TiffTag) -> Option<Vec<i64>> {
    let entry = ifd.get_entry_by_tag(tag.as_u16())?;
    let values = walker.values().read_values(entry).ok()?;
    values.as_integers().map(<[i64]>::to_vec)
}

fn extract_jpeg(walker: &IfdWalker<'_>, ifd: &Ifd) -> Option<Thumbnail> {
    let offset = integers(walker, ifd, TiffTag::JpegIfOffset)?.first().copied()?;
    let length = integers(walker, ifd, TiffTag::JpegIfByteCount)?.first().copied()?;

    let data = read_range(walker, offset, length)?;
    debug!(offset, length, "extracted JPEG thumbnail");

    Some(Thumbnail {
        kind: ThumbnailKind::Jpeg,
        data,
    })
}

fn extract_strips(walker: &IfdWalker<'_>, ifd: &Ifd) -> Option<Thumbnail> {
    let offsets = integers(walker, ifd, TiffTag::StripOffsets)?;
    let counts = integers(walker, ifd, TiffTag::StripByteCounts)?;

    if offsets.len() != counts.len() {
        warn!(
            offsets = offsets.len(),
            counts = counts.len(),
            "strip offsets and byte counts differ in length"
        );
        return None;
    }

    let mut data = BytesMut::new();
    for (&offset, &length) in offsets.iter().zip(&counts) {
        data.extend_from_slice(&read_range(walker, offset, length)?);
    }
    debug!(strips = offsets.len(), bytes = data.len(), "extracted TIFF thumbnail");

    Some(Thumbnail {
        kind: ThumbnailKind::Tiff,
        data: data.freeze(),
    })
}

/// Header-relative byte range, `None` if negative or out of bounds.
fn read_range(walker: &IfdWalker<'_>, offset: i64, length: i64) -> Option<Bytes> {
    let offset = u64::try_from(offset).ok()?;
    let length = usize::try_from(length).ok()?;

    match walker.values().read_bytes(offset, length) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!(offset, length, error = %err, "thumbnail data out of bounds");
            None
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
