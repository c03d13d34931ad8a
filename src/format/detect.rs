//! Container detection for image files carrying EXIF metadata.
//!
//! This module classifies a byte source by its magic bytes and locates the
//! TIFF header holding the metadata:
//!
//! - **TIFF**: the file itself is the TIFF stream, header at offset 0
//! - **JPEG**: the TIFF stream sits in the `Exif` APP1 segment, found by
//!   walking the segment table from the start of the file
//!
//! A file that is neither, or a JPEG without an EXIF segment, is "not
//! recognized". That is the normal outcome for many files and is reported
//! as `Ok(None)`, never as an error.

use serde::Serialize;
use tracing::debug;

use crate::error::IoError;
use crate::io::RangeReader;

use super::jpeg::{self, read_segment_header, SegmentHeader, EXIF_HEADER_OFFSET};
use super::tiff::ByteOrder;

// =============================================================================
// ContainerFormat
// =============================================================================

/// Detected container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ContainerFormat {
    /// Bare TIFF file
    Tiff,

    /// JPEG file with an EXIF APP1 segment
    Jpeg,
}

impl ContainerFormat {
    /// Get a human-readable name for the format.
    pub const fn name(&self) -> &'static str {
        match self {
            ContainerFormat::Tiff => "TIFF",
            ContainerFormat::Jpeg => "JPEG",
        }
    }
}

/// Where the metadata lives in a recognized file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    /// Container format
    pub format: ContainerFormat,

    /// Segment base: 0 for TIFF; for JPEG, two bytes before the EXIF APP1
    /// marker, so a single JFIF segment of length L gives `2 + L`
    pub base: u64,

    /// Absolute offset of the TIFF header; all tag offsets are relative to it
    pub header_offset: u64,

    /// Byte order declared by the TIFF header
    pub byte_order: ByteOrder,
}

// =============================================================================
// Detection
// =============================================================================

/// Bytes read up front to classify the file.
pub const SNIFF_LEN: usize = 12;

const TIFF_MAGIC_LE: &[u8; 4] = b"II*\0";
const TIFF_MAGIC_BE: &[u8; 4] = b"MM\0*";

/// Classify a byte source and locate its TIFF header.
///
/// # Returns
/// * `Ok(Some(info))` - TIFF or JPEG with EXIF
/// * `Ok(None)` - not recognized: too short, other format, no EXIF segment,
///   or a segment table that runs off the end of the file
/// * `Err(IoError)` - the source could not be read
pub fn sniff<R: RangeReader + ?Sized>(reader: &R) -> Result<Option<ContainerInfo>, IoError> {
    if reader.size() < SNIFF_LEN as u64 {
        debug!(source = reader.identifier(), "file too small for EXIF data");
        return Ok(None);
    }

    let head = reader.read_exact_at(0, SNIFF_LEN)?;

    if is_tiff_header(&head) {
        let byte_order = if head[0] == b'I' {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        };
        debug!(source = reader.identifier(), byte_order = byte_order.name(), "TIFF format recognized");
        return Ok(Some(ContainerInfo {
            format: ContainerFormat::Tiff,
            base: 0,
            header_offset: 0,
            byte_order,
        }));
    }

    if jpeg::is_jpeg(&head) {
        debug!(source = reader.identifier(), "JPEG format recognized");
        return locate_exif_segment(reader);
    }

    debug!(source = reader.identifier(), "file format not recognized");
    Ok(None)
}

/// Walk the JPEG segment table looking for the EXIF APP1 segment.
fn locate_exif_segment<R: RangeReader + ?Sized>(
    reader: &R,
) -> Result<Option<ContainerInfo>, IoError> {
    // Marker position of the segment right after SOI
    let mut base: u64 = 2;

    // Vendor segments that precede EXIF in files from some writers
    while let Some(segment) = read_segment_header(reader, base)? {
        if !segment.is_leading_vendor_segment() {
            break;
        }
        debug!(offset = base, length = segment.length, "skipping leading vendor segment");
        base = segment.next_offset();
    }

    let exif = loop {
        let Some(segment) = read_segment_header(reader, base)? else {
            debug!(offset = base, "segment table runs past end of file");
            return Ok(None);
        };

        if !segment.has_marker_prefix() {
            debug!(offset = base, "unexpected segment content, no EXIF data");
            return Ok(None);
        }

        if segment.is_exif() {
            break segment;
        }

        if segment.ends_metadata() {
            debug!(offset = base, kind = segment.kind(), "image data reached, no EXIF segment");
            return Ok(None);
        }

        log_skipped_segment(&segment);
        base = segment.next_offset();
    };

    let header_offset = exif.offset + EXIF_HEADER_OFFSET;
    let Some(byte_order) = read_byte_order(reader, header_offset)? else {
        debug!(offset = header_offset, "EXIF segment without a TIFF header");
        return Ok(None);
    };

    debug!(
        offset = exif.offset,
        header_offset,
        byte_order = byte_order.name(),
        "EXIF segment found"
    );

    Ok(Some(ContainerInfo {
        format: ContainerFormat::Jpeg,
        base: exif.offset - 2,
        header_offset,
        byte_order,
    }))
}

fn log_skipped_segment(segment: &SegmentHeader) {
    let code = String::from_utf8_lossy(&segment.code[..segment.code.len().min(4)]).into_owned();
    debug!(
        offset = segment.offset,
        kind = segment.kind(),
        length = segment.length,
        code = %code,
        "skipping segment"
    );
}

fn read_byte_order<R: RangeReader + ?Sized>(
    reader: &R,
    offset: u64,
) -> Result<Option<ByteOrder>, IoError> {
    if reader.size().saturating_sub(offset) < 2 {
        return Ok(None);
    }
    let bytes = reader.read_exact_at(offset, 2)?;
    Ok(ByteOrder::from_magic(&bytes))
}

/// Check if bytes start with a classic TIFF header (`II*\0` or `MM\0*`).
pub fn is_tiff_header(bytes: &[u8]) -> bool {
    bytes.len() >= 4 && (&bytes[0..4] == TIFF_MAGIC_LE || &bytes[0..4] == TIFF_MAGIC_BE)
}

// =============================================================================
// Tests
// =============================================================================
