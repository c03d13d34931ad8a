//! TIFF field type and structural tag definitions.
//!
//! Shared vocabulary of the decoder:
//! - The field type registry (codes, element sizes, signedness)
//! - Tag IDs the decoder itself acts on (pointers, thumbnail layout)
//!
//! Human-readable names for every other tag live in the EXIF registry.

use serde::Serialize;

// =============================================================================
// TIFF Field Types
// =============================================================================

/// Field type registry entry.
///
/// The element size decides whether an entry's values sit inline in the
/// 4-byte value slot or behind an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum FieldType {
    /// `B`, unsigned byte
    Byte = 1,

    /// `A`, NUL-terminated text
    Ascii = 2,

    /// `S`, unsigned short
    Short = 3,

    /// `L`, unsigned long
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator (8 bytes)
    Rational = 5,

    /// Signed 8-bit integer (1 byte)
    SignedByte = 6,

    /// `U`, opaque bytes
    Undefined = 7,

    /// Signed 16-bit integer (2 bytes)
    SignedShort = 8,

    /// Signed 32-bit integer (4 bytes)
    SignedLong = 9,

    /// Two signed 32-bit integers: numerator, denominator (8 bytes)
    SignedRational = 10,
}

impl FieldType {
    /// Bytes per element.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Byte | FieldType::Ascii | FieldType::SignedByte | FieldType::Undefined => 1,
            FieldType::Short | FieldType::SignedShort => 2,
            FieldType::Long | FieldType::SignedLong => 4,
            FieldType::Rational | FieldType::SignedRational => 8,
        }
    }

    /// Look up a type code. Unknown codes give `None`.
    ///
    /// Returns `None` for unknown type values, including 0 and the
    /// float/double types, which EXIF writers do not emit.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(FieldType::Byte),
            2 => Some(FieldType::Ascii),
            3 => Some(FieldType::Short),
            4 => Some(FieldType::Long),
            5 => Some(FieldType::Rational),
            6 => Some(FieldType::SignedByte),
            7 => Some(FieldType::Undefined),
            8 => Some(FieldType::SignedShort),
            9 => Some(FieldType::SignedLong),
            10 => Some(FieldType::SignedRational),
            _ => None,
        }
    }

    /// Get the numeric type code.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether values of this type are two's complement.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            FieldType::SignedByte
                | FieldType::SignedShort
                | FieldType::SignedLong
                | FieldType::SignedRational
        )
    }

    /// Whether values of this type are numerator/denominator pairs.
    #[inline]
    pub const fn is_rational(self) -> bool {
        matches!(self, FieldType::Rational | FieldType::SignedRational)
    }

    /// Short abbreviation used in dumps.
    pub const fn abbreviation(self) -> &'static str {
        match self {
            FieldType::Byte => "B",
            FieldType::Ascii => "A",
            FieldType::Short => "S",
            FieldType::Long => "L",
            FieldType::Rational => "R",
            FieldType::SignedByte => "SB",
            FieldType::Undefined => "U",
            FieldType::SignedShort => "SS",
            FieldType::SignedLong => "SL",
            FieldType::SignedRational => "SR",
        }
    }

    /// Full human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            FieldType::Byte => "Byte",
            FieldType::Ascii => "ASCII",
            FieldType::Short => "Short",
            FieldType::Long => "Long",
            FieldType::Rational => "Ratio",
            FieldType::SignedByte => "Signed Byte",
            FieldType::Undefined => "Undefined",
            FieldType::SignedShort => "Signed Short",
            FieldType::SignedLong => "Signed Long",
            FieldType::SignedRational => "Signed Ratio",
        }
    }

    /// Maximum bytes that can be stored inline in an IFD entry.
    pub const INLINE_THRESHOLD: usize = 4;

    /// Check if a value with this type and count fits inline in an entry.
    ///
    /// Returns `false` if the total size overflows.
    #[inline]
    pub fn fits_inline(self, count: u32) -> bool {
        (self.size_in_bytes() as u64)
            .checked_mul(count as u64)
            .is_some_and(|total| total <= Self::INLINE_THRESHOLD as u64)
    }
}

// =============================================================================
// Structural Tags
// =============================================================================

/// Tag IDs the decoder acts on structurally.
///
/// Everything else is only named, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TiffTag {
    /// Compression scheme used (selects the thumbnail layout)
    Compression = 0x0103,

    /// Byte offsets of strips
    StripOffsets = 0x0111,

    /// Byte counts of strips
    StripByteCounts = 0x0117,

    /// Offset of an embedded JPEG stream
    JpegIfOffset = 0x0201,

    /// Length of the embedded JPEG stream
    JpegIfByteCount = 0x0202,

    /// Pointer to the EXIF SubIFD
    ExifOffset = 0x8769,

    /// Pointer to the GPS IFD
    GpsInfo = 0x8825,

    /// Vendor-private blob
    MakerNote = 0x927C,

    /// Free-form user comment with an 8-byte character code prefix
    UserComment = 0x9286,

    /// Pointer to the Interoperability IFD (inside the EXIF SubIFD)
    InteroperabilityOffset = 0xA005,
}

impl TiffTag {
    /// Tags skipped entirely when running without details.
    pub const IGNORED_WITHOUT_DETAILS: [TiffTag; 2] = [TiffTag::UserComment, TiffTag::MakerNote];

    /// Raw tag id.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether the tag is dropped when running without details.
    pub fn is_ignored_without_details(id: u16) -> bool {
        Self::IGNORED_WITHOUT_DETAILS
            .iter()
            .any(|tag| tag.as_u16() == id)
    }
}

// =============================================================================
// Compression Values
// =============================================================================

/// TIFF compression scheme identifiers relevant to thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Compression {
    /// No compression: strips hold raw samples
    None = 1,

    /// LZW compression
    Lzw = 5,

    /// "Old-style" JPEG, the usual EXIF thumbnail encoding
    OldJpeg = 6,

    /// JPEG compression
    Jpeg = 7,

    /// Deflate/zlib compression
    Deflate = 8,
}

impl Compression {
    /// Map a Compression tag value. Schemes outside this list give `None`.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(Compression::None),
            5 => Some(Compression::Lzw),
            6 => Some(Compression::OldJpeg),
            7 => Some(Compression::Jpeg),
            8 => Some(Compression::Deflate),
            _ => None,
        }
    }

    /// Whether the thumbnail is an embedded JPEG stream.
    #[inline]
    pub const fn is_jpeg(self) -> bool {
        matches!(self, Compression::OldJpeg | Compression::Jpeg)
    }

    /// Short scheme name.
    pub const fn name(self) -> &'static str {
        match self {
            Compression::None => "Uncompressed",
            Compression::Lzw => "LZW",
            Compression::OldJpeg => "JPEG (old-style)",
            Compression::Jpeg => "JPEG",
            Compression::Deflate => "Deflate",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
