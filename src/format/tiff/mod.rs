//! TIFF structure parsing for EXIF metadata.
//!
//! EXIF metadata is a TIFF stream, whether it is a whole `.tif` file or the
//! payload of a JPEG APP1 segment.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF streams declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **IFD (Image File Directory)**: a counted table of 12-byte entries
//!   followed by a pointer to the next directory.
//!
//! - **Inline vs offset values**: values of up to 4 bytes are stored inline in
//!   the entry, larger ones at an offset relative to the TIFF header.

mod parser;
mod tags;
mod values;

pub use parser::{
    ByteOrder, Ifd, IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, IFD_NEXT_OFFSET_SIZE,
    TIFF_HEADER_SIZE, VERSION_TIFF,
};
pub use tags::{Compression, FieldType, TiffTag};
pub use values::{decode_values, Ratio, TagValues, ValueReader};
