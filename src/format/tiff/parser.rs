//! TIFF header and directory structure parsing.
//!
//! This module handles the fixed-layout pieces of a TIFF stream, which is
//! the foundation for all subsequent tag decoding. EXIF blocks embedded in
//! JPEG files carry exactly the same structure, just starting at a non-zero
//! offset in the file.
//!
//! # TIFF Header Structure (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD, relative to the header start
//! ```
//!
//! # IFD Structure
//! ```text
//! Bytes 0-1:   Entry count N
//! N * 12:      Entries (tag u16, type u16, count u32, value-or-offset 4 bytes)
//! Last 4:      Offset of the next IFD (0 terminates the chain)
//! ```

use serde::Serialize;

use crate::error::TiffError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le};

use super::tags::FieldType;

// =============================================================================
// Constants
// =============================================================================

/// `II`
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// `MM`
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// The only version EXIF uses
pub const VERSION_TIFF: u16 = 42;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of one IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of the next IFD offset field at the end of an IFD
pub const IFD_NEXT_OFFSET_SIZE: usize = 4;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF stream.
///
/// Declared once by the first two bytes of the header; every multi-byte
/// value after that must be read respecting this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    /// `II`, least significant byte first
    LittleEndian,
    /// `MM`, most significant byte first
    BigEndian,
}

impl ByteOrder {
    /// Detect the byte order from the first two header bytes.
    ///
    /// Returns `None` unless the bytes are `II` or `MM`.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 2 {
            return None;
        }
        match u16::from_le_bytes([bytes[0], bytes[1]]) {
            BYTE_ORDER_LITTLE_ENDIAN => Some(ByteOrder::LittleEndian),
            BYTE_ORDER_BIG_ENDIAN => Some(ByteOrder::BigEndian),
            _ => None,
        }
    }

    /// Human-readable name, after the CPU families that popularized each order.
    pub const fn name(self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Intel",
            ByteOrder::BigEndian => "Motorola",
        }
    }

    /// Decode the first two bytes of `bytes`.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Decode the first four bytes of `bytes`.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read an i16 from a byte slice using this byte order.
    #[inline]
    pub fn read_i16(self, bytes: &[u8]) -> i16 {
        self.read_u16(bytes) as i16
    }

    /// Read an i32 from a byte slice using this byte order.
    #[inline]
    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.read_u32(bytes) as i32
    }

    /// Read one integer element of `field_type` and widen it to i64.
    ///
    /// Signed types are sign-extended. Rational types read their numerator
    /// only; use [`ByteOrder::read_u32`] twice for both halves.
    ///
    /// # Panics
    /// Panics if the slice is shorter than the type's width.
    pub fn read_integer(self, field_type: FieldType, bytes: &[u8]) -> i64 {
        match field_type {
            FieldType::Byte | FieldType::Ascii | FieldType::Undefined => bytes[0] as i64,
            FieldType::SignedByte => bytes[0] as i8 as i64,
            FieldType::Short => self.read_u16(bytes) as i64,
            FieldType::SignedShort => self.read_i16(bytes) as i64,
            FieldType::Long | FieldType::Rational => self.read_u32(bytes) as i64,
            FieldType::SignedLong | FieldType::SignedRational => self.read_i32(bytes) as i64,
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the stream
    pub byte_order: ByteOrder,

    /// Version field; 42 for conforming files, not enforced
    pub version: u16,

    /// Offset to the first IFD, relative to the header start
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse the 8-byte header at the start of `bytes`.
    ///
    /// The version is recorded but not validated: EXIF blocks written by
    /// some cameras carry odd values there while the directories are fine.
    ///
    /// # Errors
    /// - `FileTooSmall` for fewer than 8 bytes
    /// - `InvalidMagic` when the order mark is neither `II` nor `MM`
    pub fn parse(bytes: &[u8]) -> Result<Self, TiffError> {
        if bytes.len() < TIFF_HEADER_SIZE {
            return Err(TiffError::FileTooSmall {
                required: TIFF_HEADER_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let byte_order = ByteOrder::from_magic(bytes)
            .ok_or_else(|| TiffError::InvalidMagic(u16::from_le_bytes([bytes[0], bytes[1]])))?;

        Ok(TiffHeader {
            byte_order,
            version: byte_order.read_u16(&bytes[2..4]),
            first_ifd_offset: byte_order.read_u32(&bytes[4..8]),
        })
    }

    /// Whether the version field holds the standard TIFF value.
    #[inline]
    pub const fn is_standard_version(&self) -> bool {
        self.version == VERSION_TIFF
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A raw 12-byte IFD entry, before value resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag identifier
    pub tag: u16,

    /// Field type code as stored in the file
    pub field_type_raw: u16,

    /// Field type, `None` when the code is unknown
    pub field_type: Option<FieldType>,

    /// Number of values (not bytes)
    pub count: u32,

    /// The last 4 bytes of the entry: the value itself or an offset to it
    pub value_offset_bytes: [u8; 4],
}

impl IfdEntry {
    /// Parse an entry from exactly [`IFD_ENTRY_SIZE`] bytes.
    ///
    /// # Panics
    /// Panics if `bytes` is shorter than 12 bytes.
    pub fn parse(bytes: &[u8], byte_order: ByteOrder) -> Self {
        let field_type_raw = byte_order.read_u16(&bytes[2..4]);
        IfdEntry {
            tag: byte_order.read_u16(&bytes[0..2]),
            field_type_raw,
            field_type: FieldType::from_u16(field_type_raw),
            count: byte_order.read_u32(&bytes[4..8]),
            value_offset_bytes: [bytes[8], bytes[9], bytes[10], bytes[11]],
        }
    }

    /// Total size of the value in bytes, `None` for unknown types or overflow.
    #[inline]
    pub fn value_byte_size(&self) -> Option<u64> {
        let field_type = self.field_type?;
        (field_type.size_in_bytes() as u64).checked_mul(self.count as u64)
    }

    /// Whether the value is stored in the entry itself.
    #[inline]
    pub fn is_inline(&self) -> bool {
        self.field_type
            .is_some_and(|field_type| field_type.fits_inline(self.count))
    }

    /// Interpret the value field as an offset (relative to the TIFF header).
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.read_u32(&self.value_offset_bytes)
    }
}

// =============================================================================
// Ifd
// =============================================================================

/// A raw Image File Directory: its entries plus the chain pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ifd {
    /// Entries in file order
    pub entries: Vec<IfdEntry>,

    /// Offset of the next IFD, 0 if this is the last one
    pub next_ifd_offset: u32,
}

impl Ifd {
    /// Size in bytes of an IFD with `entry_count` entries, chain pointer included.
    #[inline]
    pub const fn calculate_size(entry_count: u16) -> usize {
        IFD_COUNT_SIZE + entry_count as usize * IFD_ENTRY_SIZE + IFD_NEXT_OFFSET_SIZE
    }

    /// Parse a directory from bytes starting at its entry count.
    ///
    /// Truncated directories are tolerated: only complete entries are kept,
    /// and a missing chain pointer reads as 0.
    pub fn parse(bytes: &[u8], byte_order: ByteOrder) -> Result<Self, TiffError> {
        if bytes.len() < IFD_COUNT_SIZE {
            return Err(TiffError::FileTooSmall {
                required: IFD_COUNT_SIZE as u64,
                actual: bytes.len() as u64,
            });
        }

        let declared = byte_order.read_u16(&bytes[0..2]) as usize;
        let available = (bytes.len() - IFD_COUNT_SIZE) / IFD_ENTRY_SIZE;

        let entries = bytes[IFD_COUNT_SIZE..]
            .chunks_exact(IFD_ENTRY_SIZE)
            .take(declared.min(available))
            .map(|chunk| IfdEntry::parse(chunk, byte_order))
            .collect();

        let next_start = IFD_COUNT_SIZE + declared * IFD_ENTRY_SIZE;
        let next_ifd_offset = bytes
            .get(next_start..next_start + IFD_NEXT_OFFSET_SIZE)
            .map(|b| byte_order.read_u32(b))
            .unwrap_or(0);

        Ok(Ifd {
            entries,
            next_ifd_offset,
        })
    }

    /// Find the first entry with the given tag.
    pub fn get_entry_by_tag(&self, tag: u16) -> Option<&IfdEntry> {
        self.entries.iter().find(|entry| entry.tag == tag)
    }
}

// =============================================================================
// Tests
// =============================================================================
