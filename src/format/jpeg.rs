//! JPEG segment handling.
//!
//! EXIF data in a JPEG file lives in an APP1 segment whose payload starts
//! with `Exif\0\0` followed by a complete TIFF stream. Before it there may be
//! any number of other segments (JFIF, ICC profiles in APP2, Adobe APP14,
//! Ducky APP12), each announced by a marker and a big-endian length.
//!
//! # Segment Layout
//! ```text
//! Bytes 0-1: Marker (0xFF, type)
//! Bytes 2-3: Length, big-endian, counting itself but not the marker
//! Bytes 4-:  Payload, usually starting with an identifying code
//! ```

use crate::error::IoError;
use crate::io::{read_u16_be, RangeReader};

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Define Quantization Table marker; image data follows, metadata is over
pub const DQT: [u8; 2] = [0xFF, 0xDB];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 0 (JFIF/JFXX) marker
pub const APP0: [u8; 2] = [0xFF, 0xE0];

/// Application segment 1 (EXIF, XMP) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Application segment 2 (ICC profile, FlashPix) marker
pub const APP2: [u8; 2] = [0xFF, 0xE2];

/// Application segment 12 (Ducky, PictureInfo) marker
pub const APP12: [u8; 2] = [0xFF, 0xEC];

/// Application segment 14 (Adobe) marker
pub const APP14: [u8; 2] = [0xFF, 0xEE];

/// Payload code of the EXIF APP1 segment
pub const EXIF_CODE: &[u8; 4] = b"Exif";

/// Distance from an APP1 marker to the TIFF header it carries
/// (marker, length, `Exif\0\0`).
pub const EXIF_HEADER_OFFSET: u64 = 10;

/// Codes of vendor segments that commonly precede the EXIF segment.
pub const LEADING_VENDOR_CODES: [&[u8; 4]; 4] = [b"JFIF", b"JFXX", b"OLYM", b"Phot"];

/// Bytes read per segment header: marker, length and enough code for `Ducky`.
const SEGMENT_HEADER_LEN: usize = 9;

// =============================================================================
// Segment Headers
// =============================================================================

/// The marker, length and leading payload bytes of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentHeader {
    /// Absolute offset of the marker's 0xFF byte
    pub offset: u64,

    /// The two marker bytes
    pub marker: [u8; 2],

    /// Declared length (includes the two length bytes)
    pub length: u16,

    /// Up to five payload bytes following the length
    pub code: Vec<u8>,
}

impl SegmentHeader {
    /// Whether the segment starts with a marker prefix byte.
    #[inline]
    pub fn has_marker_prefix(&self) -> bool {
        self.marker[0] == 0xFF
    }

    /// Whether the payload starts with `code`.
    #[inline]
    pub fn code_is(&self, code: &[u8]) -> bool {
        self.code.starts_with(code)
    }

    /// Whether this is the EXIF APP1 segment.
    #[inline]
    pub fn is_exif(&self) -> bool {
        self.marker == APP1 && self.code_is(EXIF_CODE)
    }

    /// Whether this is a vendor segment known to precede EXIF.
    pub fn is_leading_vendor_segment(&self) -> bool {
        self.has_marker_prefix()
            && LEADING_VENDOR_CODES
                .iter()
                .any(|code| self.code_is(code.as_slice()))
    }

    /// Whether the metadata region ends at this marker.
    #[inline]
    pub fn ends_metadata(&self) -> bool {
        self.marker == DQT || self.marker == SOS || self.marker == EOI
    }

    /// Absolute offset of the marker following this segment.
    #[inline]
    pub fn next_offset(&self) -> u64 {
        self.offset + 2 + self.length as u64
    }

    /// Short name of the segment type, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self.marker {
            APP0 => "APP0",
            APP1 => "APP1",
            APP2 => "APP2",
            APP12 => "APP12",
            APP14 => "APP14",
            DQT => "DQT",
            SOS => "SOS",
            SOI => "SOI",
            EOI => "EOI",
            _ => "segment",
        }
    }
}

/// Read the header of the segment whose marker is at `offset`.
///
/// Returns `None` when fewer than four bytes (marker and length) remain.
pub fn read_segment_header<R: RangeReader + ?Sized>(
    reader: &R,
    offset: u64,
) -> Result<Option<SegmentHeader>, IoError> {
    let remaining = reader.size().saturating_sub(offset);
    if remaining < 4 {
        return Ok(None);
    }

    let len = (remaining as usize).min(SEGMENT_HEADER_LEN);
    let bytes = reader.read_exact_at(offset, len)?;

    Ok(Some(SegmentHeader {
        offset,
        marker: [bytes[0], bytes[1]],
        length: read_u16_be(&bytes[2..4]),
        code: bytes[4..].to_vec(),
    }))
}

/// Check if bytes start with the JPEG SOI marker.
pub fn is_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

// =============================================================================
// Tests
// =============================================================================
