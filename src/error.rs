use thiserror::Error;

/// I/O errors that can occur when reading from the byte source
#[derive(Debug, Clone, Error)]
pub enum IoError {
    /// The underlying reader failed
    #[error("Read error: {0}")]
    Read(String),

    /// Requested range exceeds resource bounds
    #[error("Range out of bounds: requested {requested} bytes at offset {offset}, size is {size}")]
    RangeOutOfBounds {
        offset: u64,
        requested: u64,
        size: u64,
    },

    /// File could not be opened
    #[error("File not found: {0}")]
    NotFound(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IoError::NotFound(err.to_string()),
            _ => IoError::Read(err.to_string()),
        }
    }
}

/// Errors that can occur when walking TIFF/EXIF structures.
///
/// Most of these are absorbed by the walker and only surface in strict mode.
#[derive(Debug, Clone, Error)]
pub enum TiffError {
    /// I/O error while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Invalid TIFF magic bytes (not II or MM)
    #[error("Invalid TIFF magic bytes: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidMagic(u16),

    /// File is too small to contain a valid header
    #[error("File too small: need at least {required} bytes, got {actual}")]
    FileTooSmall { required: u64, actual: u64 },

    /// Invalid IFD offset (points outside file or to invalid location)
    #[error("Invalid IFD offset: {0}")]
    InvalidIfdOffset(u64),

    /// Unknown field type in IFD entry
    #[error("Unknown field type {field_type} in tag 0x{tag:04X}")]
    UnknownFieldType { tag: u16, field_type: u16 },

    /// Entry value points past the end of the data
    #[error("Value of tag 0x{tag:04X} out of bounds: {len} bytes at offset {offset}")]
    ValueOutOfBounds { tag: u16, offset: u64, len: u64 },
}

/// Top-level errors returned by the decoder.
///
/// An unrecognized container is not an error; it yields empty [`crate::ExifData`].
#[derive(Debug, Clone, Error)]
pub enum ExifError {
    /// The byte source could not be read at all
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Malformed structure, only surfaced in strict mode
    #[error("TIFF error: {0}")]
    Tiff(#[from] TiffError),
}
