//! TIFF tag value reading.
//!
//! This module provides functionality to read tag values from TIFF streams.
//! Values can be stored either inline in the IFD entry (when they fit in 4
//! bytes) or at an offset, which is always relative to the TIFF header.
//! For JPEG files the header sits inside the APP1 segment, so every read
//! goes through a [`ValueReader`] that knows that base.

use std::fmt;

use bytes::Bytes;
use serde::Serialize;

use crate::error::TiffError;
use crate::io::RangeReader;

use super::parser::{ByteOrder, Ifd, IfdEntry, IFD_COUNT_SIZE, IFD_ENTRY_SIZE};
use super::tags::FieldType;

// =============================================================================
// Ratio
// =============================================================================

/// A rational value. Both halves are kept exactly as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ratio {
    pub num: i64,
    pub den: i64,
}

impl Ratio {
    pub const fn new(num: i64, den: i64) -> Self {
        Self { num, den }
    }

    /// The ratio reduced to lowest terms.
    pub fn reduced(self) -> Self {
        let div = gcd(self.num.unsigned_abs(), self.den.unsigned_abs());
        if div > 1 {
            let div = div as i64;
            Self::new(self.num / div, self.den / div)
        } else {
            self
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reduced = self.reduced();
        if reduced.den == 1 {
            write!(f, "{}", reduced.num)
        } else {
            write!(f, "{}/{}", reduced.num, reduced.den)
        }
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

// =============================================================================
// TagValues
// =============================================================================

/// Lists longer than this are abbreviated in printable form.
const PRINTABLE_COUNT_LIMIT: usize = 50;

/// Number of values shown when a list is abbreviated.
const PRINTABLE_HEAD: usize = 20;

/// Decoded values of one entry, in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValues {
    /// ASCII text, truncated at the first NUL
    Ascii(String),

    /// Byte, Short, Long and their signed variants, plus Undefined bytes
    Integers(Vec<i64>),

    /// Rational and Signed Rational pairs
    Ratios(Vec<Ratio>),
}

impl TagValues {
    /// Number of values (characters for ASCII).
    pub fn len(&self) -> usize {
        match self {
            TagValues::Ascii(s) => s.len(),
            TagValues::Integers(v) => v.len(),
            TagValues::Ratios(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text of an ASCII value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValues::Ascii(s) => Some(s),
            _ => None,
        }
    }

    /// The integers of a non-rational numeric value.
    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            TagValues::Integers(v) => Some(v),
            _ => None,
        }
    }

    /// First integer, the usual way to read offsets and counts.
    pub fn first_integer(&self) -> Option<i64> {
        self.as_integers().and_then(|v| v.first().copied())
    }

    /// Integer values truncated to bytes, for Byte/Undefined blobs.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        self.as_integers()
            .map(|v| v.iter().map(|&value| value as u8).collect())
    }

    /// Render each value as a string.
    pub fn value_strings(&self) -> Vec<String> {
        match self {
            TagValues::Ascii(s) => vec![s.clone()],
            TagValues::Integers(v) => v.iter().map(|value| value.to_string()).collect(),
            TagValues::Ratios(v) => v.iter().map(|value| value.to_string()).collect(),
        }
    }

    /// Printable form of the raw values.
    ///
    /// A single value prints bare, text prints as-is, long lists keep the
    /// first twenty values.
    pub fn printable(&self) -> String {
        if let TagValues::Ascii(s) = self {
            return s.clone();
        }

        let values = self.value_strings();
        match values.len() {
            1 => values[0].clone(),
            n if n > PRINTABLE_COUNT_LIMIT => {
                format!("[{}, ... ]", values[..PRINTABLE_HEAD].join(", "))
            }
            _ => format!("[{}]", values.join(", ")),
        }
    }
}

// =============================================================================
// ValueReader
// =============================================================================

/// Reads TIFF structures and tag values relative to a TIFF header.
///
/// Combines a RangeReader with the header position and byte order; all
/// offsets passed in are relative to the header, as stored in the file.
pub struct ValueReader<'a, R: RangeReader + ?Sized> {
    reader: &'a R,
    base: u64,
    byte_order: ByteOrder,
}

impl<'a, R: RangeReader + ?Sized> ValueReader<'a, R> {
    /// Create a new ValueReader for a header at absolute offset `base`.
    pub fn new(reader: &'a R, base: u64, byte_order: ByteOrder) -> Self {
        Self {
            reader,
            base,
            byte_order,
        }
    }

    #[inline]
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Absolute offset of the TIFF header in the source.
    #[inline]
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Bytes available from `offset` (relative) to the end of the source.
    pub fn remaining_from(&self, offset: u64) -> u64 {
        self.reader
            .size()
            .saturating_sub(self.base.saturating_add(offset))
    }

    /// Read `len` bytes at a header-relative offset.
    pub fn read_bytes(&self, offset: u64, len: usize) -> Result<Bytes, TiffError> {
        let absolute = self
            .base
            .checked_add(offset)
            .ok_or(TiffError::InvalidIfdOffset(offset))?;
        Ok(self.reader.read_exact_at(absolute, len)?)
    }

    pub fn read_u16(&self, offset: u64) -> Result<u16, TiffError> {
        let bytes = self.read_bytes(offset, 2)?;
        Ok(self.byte_order.read_u16(&bytes))
    }

    pub fn read_u32(&self, offset: u64) -> Result<u32, TiffError> {
        let bytes = self.read_bytes(offset, 4)?;
        Ok(self.byte_order.read_u32(&bytes))
    }

    /// Read a whole directory at a header-relative offset.
    ///
    /// A directory cut off by the end of the source yields the entries that
    /// are complete.
    pub fn read_ifd(&self, offset: u64) -> Result<Ifd, TiffError> {
        let entry_count = self
            .read_u16(offset)
            .map_err(|_| TiffError::InvalidIfdOffset(offset))?;
        let wanted = Ifd::calculate_size(entry_count) as u64;
        let len = wanted.min(self.remaining_from(offset)).max(IFD_COUNT_SIZE as u64);
        let bytes = self.read_bytes(offset, len as usize)?;
        Ifd::parse(&bytes, self.byte_order)
    }

    /// Read one directory entry at a header-relative offset.
    pub fn read_entry(&self, offset: u64) -> Result<IfdEntry, TiffError> {
        let bytes = self.read_bytes(offset, IFD_ENTRY_SIZE)?;
        Ok(IfdEntry::parse(&bytes, self.byte_order))
    }

    /// Raw bytes of an entry's value, inline or dereferenced.
    pub fn read_value_bytes(&self, entry: &IfdEntry) -> Result<Bytes, TiffError> {
        let size = entry.value_byte_size().ok_or(TiffError::UnknownFieldType {
            tag: entry.tag,
            field_type: entry.field_type_raw,
        })?;

        if entry.is_inline() {
            return Ok(Bytes::copy_from_slice(
                &entry.value_offset_bytes[..size as usize],
            ));
        }

        let offset = entry.value_offset(self.byte_order) as u64;
        let out_of_bounds = || TiffError::ValueOutOfBounds {
            tag: entry.tag,
            offset,
            len: size,
        };
        if size > self.remaining_from(offset) {
            return Err(out_of_bounds());
        }
        let len = usize::try_from(size).map_err(|_| out_of_bounds())?;
        self.read_bytes(offset, len).map_err(|_| out_of_bounds())
    }

    /// Decode an entry's values according to its field type.
    pub fn read_values(&self, entry: &IfdEntry) -> Result<TagValues, TiffError> {
        let field_type = entry.field_type.ok_or(TiffError::UnknownFieldType {
            tag: entry.tag,
            field_type: entry.field_type_raw,
        })?;
        let bytes = self.read_value_bytes(entry)?;
        Ok(decode_values(&bytes, field_type, self.byte_order))
    }
}

/// Decode a run of values of `field_type` from raw bytes.
pub fn decode_values(bytes: &[u8], field_type: FieldType, byte_order: ByteOrder) -> TagValues {
    let width = field_type.size_in_bytes();

    match field_type {
        FieldType::Ascii => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            TagValues::Ascii(String::from_utf8_lossy(&bytes[..end]).into_owned())
        }
        FieldType::Rational | FieldType::SignedRational => TagValues::Ratios(
            bytes
                .chunks_exact(width)
                .map(|pair| {
                    Ratio::new(
                        byte_order.read_integer(field_type, &pair[0..4]),
                        byte_order.read_integer(field_type, &pair[4..8]),
                    )
                })
                .collect(),
        ),
        _ => TagValues::Integers(
            bytes
                .chunks_exact(width)
                .map(|chunk| byte_order.read_integer(field_type, chunk))
                .collect(),
        ),
    }
}

// =============================================================================
// Tests
// =============================================================================
