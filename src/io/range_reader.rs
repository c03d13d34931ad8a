use std::io::{Read, Seek, SeekFrom};
use std::sync::Mutex;

use bytes::Bytes;

use crate::error::IoError;

/// Trait for reading byte ranges from an image source.
///
/// The decoder never streams: it seeks to header, directory and value
/// offsets and reads exactly what it needs. Implementations only have to
/// answer positional reads.
pub trait RangeReader: Send + Sync {
    /// Read exactly `len` bytes starting at `offset`.
    ///
    /// Returns an error if the range is out of bounds or if the read fails.
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError>;

    /// Get the total size of the resource in bytes.
    fn size(&self) -> u64;

    /// Get an identifier for this resource (for logging).
    fn identifier(&self) -> &str;
}

impl<R: RangeReader + ?Sized> RangeReader for &R {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        (**self).read_exact_at(offset, len)
    }

    fn size(&self) -> u64 {
        (**self).size()
    }

    fn identifier(&self) -> &str {
        (**self).identifier()
    }
}

/// Check that `offset..offset + len` lies within a resource of `size` bytes.
#[inline]
pub(crate) fn check_range(offset: u64, len: usize, size: u64) -> Result<(), IoError> {
    match offset.checked_add(len as u64) {
        Some(end) if end <= size => Ok(()),
        _ => Err(IoError::RangeOutOfBounds {
            offset,
            requested: len as u64,
            size,
        }),
    }
}

// =============================================================================
// SliceReader
// =============================================================================

/// In-memory reader over an already loaded image.
#[derive(Debug, Clone)]
pub struct SliceReader {
    data: Bytes,
    identifier: String,
}

impl SliceReader {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self::with_identifier(data, "memory")
    }

    pub fn with_identifier(data: impl Into<Bytes>, identifier: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            identifier: identifier.into(),
        }
    }
}

impl RangeReader for SliceReader {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        check_range(offset, len, self.data.len() as u64)?;
        let start = offset as usize;
        Ok(self.data.slice(start..start + len))
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// SeekReader
// =============================================================================

/// Reader over any seekable stream, typically an open file.
///
/// The stream is guarded by a mutex so positional reads can take `&self`.
pub struct SeekReader<S> {
    inner: Mutex<S>,
    size: u64,
    identifier: String,
}

impl<S: Read + Seek> SeekReader<S> {
    /// Wrap a stream, measuring its length by seeking to the end.
    pub fn new(mut inner: S, identifier: impl Into<String>) -> Result<Self, IoError> {
        let size = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(0))?;
        Ok(Self {
            inner: Mutex::new(inner),
            size,
            identifier: identifier.into(),
        })
    }
}

impl<S: Read + Seek + Send> RangeReader for SeekReader<S> {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        check_range(offset, len, self.size)?;
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| IoError::Read(format!("{}: reader lock poisoned", self.identifier)))?;
        inner.seek(SeekFrom::Start(offset))?;
        let mut buf = vec![0u8; len];
        inner.read_exact(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// TIFF and EXIF data can be either little-endian or big-endian, determined by
// the magic bytes of the TIFF header. JPEG segment lengths are always
// big-endian.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
