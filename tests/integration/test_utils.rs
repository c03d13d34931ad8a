//! Test utilities for integration tests.
//!
//! This module provides a request-tracking reader and builders for TIFF
//! streams and JPEG files carrying EXIF metadata.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use exif_decoder::error::IoError;
use exif_decoder::io::RangeReader;

// =============================================================================
// Mock Range Reader with Request Tracking
// =============================================================================

/// A mock range reader that tracks all read requests.
///
/// This is useful for verifying cache behavior and request patterns.
#[derive(Clone)]
pub struct TrackingMockReader {
    data: Bytes,
    identifier: String,
    request_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<(u64, usize)>>>,
}

impl TrackingMockReader {
    pub fn new(data: Vec<u8>, identifier: impl Into<String>) -> Self {
        Self {
            data: Bytes::from(data),
            identifier: identifier.into(),
            request_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn get_requests(&self) -> Vec<(u64, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

impl RangeReader for TrackingMockReader {
    fn read_exact_at(&self, offset: u64, len: usize) -> Result<Bytes, IoError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((offset, len));

        let start = offset as usize;
        let end = start + len;
        if end > self.data.len() {
            return Err(IoError::RangeOutOfBounds {
                offset,
                requested: len as u64,
                size: self.data.len() as u64,
            });
        }
        Ok(self.data.slice(start..end))
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

// =============================================================================
// Test JPEG Creation
// =============================================================================

/// Create a test RGB JPEG image.
pub fn create_test_rgb_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x % 256) as u8;
        let g = (y % 256) as u8;
        let b = ((x + y) % 256) as u8;
        Rgb([r, g, b])
    });

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Check if data starts with the JPEG SOI marker.
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8
}

// =============================================================================
// JPEG Wrapping
// =============================================================================

/// A JPEG segment with the given marker and payload.
pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// A 16-byte APP0 JFIF segment payload.
pub fn jfif_payload() -> Vec<u8> {
    let mut payload = b"JFIF\0".to_vec();
    payload.extend_from_slice(&[1, 1, 0, 0, 1, 0, 1, 0, 0]);
    payload
}

/// Wrap a TIFF stream in a JPEG: SOI, the given leading segments, the EXIF
/// APP1 segment, then a minimal scan.
pub fn wrap_in_jpeg(leading: &[Vec<u8>], tiff: &[u8]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    for seg in leading {
        data.extend_from_slice(seg);
    }

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    data.extend(segment(0xE1, &payload));

    data.extend(segment(0xDA, &[0; 8]));
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

// =============================================================================
// TIFF Builders
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    fn u16(self, value: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }

    fn u32(self, value: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => value.to_le_bytes(),
            ByteOrderType::BigEndian => value.to_be_bytes(),
        }
    }
}

/// Value of one directory entry.
#[derive(Clone)]
pub enum Value {
    Ascii(String),
    Undefined(Vec<u8>),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    Rationals(Vec<(u32, u32)>),
    /// Raw entry with an arbitrary type code, count and value field
    Raw { field_type: u16, count: u32, value: u32 },
    /// Pre-encoded values of any type, inline or out of line by length
    Typed { field_type: u16, count: u32, bytes: Vec<u8> },
    /// A nested IFD stored as the value's bytes (vendor MakerNotes)
    Ifd(IfdBuilder),
}

impl Value {
    fn field_type(&self) -> u16 {
        match self {
            Value::Ascii(_) => 2,
            Value::Undefined(_) | Value::Ifd(_) => 7,
            Value::Shorts(_) => 3,
            Value::Longs(_) => 4,
            Value::Rationals(_) => 5,
            Value::Raw { field_type, .. } | Value::Typed { field_type, .. } => *field_type,
        }
    }

    fn count(&self) -> u32 {
        match self {
            Value::Ascii(s) => s.len() as u32 + 1,
            Value::Undefined(b) => b.len() as u32,
            Value::Shorts(v) => v.len() as u32,
            Value::Longs(v) => v.len() as u32,
            Value::Rationals(v) => v.len() as u32,
            Value::Raw { count, .. } | Value::Typed { count, .. } => *count,
            Value::Ifd(ifd) => ifd.block_size() as u32,
        }
    }

    fn byte_len(&self) -> usize {
        match self {
            Value::Raw { .. } => 4,
            Value::Ifd(ifd) => ifd.block_size(),
            other => other.encode(ByteOrderType::LittleEndian, 0).len(),
        }
    }

    /// Encoded value bytes, for a value placed at `offset`.
    fn encode(&self, order: ByteOrderType, offset: u32) -> Vec<u8> {
        match self {
            Value::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                bytes
            }
            Value::Undefined(b) | Value::Typed { bytes: b, .. } => b.clone(),
            Value::Shorts(v) => v.iter().flat_map(|&x| order.u16(x)).collect(),
            Value::Longs(v) => v.iter().flat_map(|&x| order.u32(x)).collect(),
            Value::Rationals(v) => v
                .iter()
                .flat_map(|&(n, d)| [order.u32(n), order.u32(d)])
                .flatten()
                .collect(),
            Value::Raw { value, .. } => order.u32(*value).to_vec(),
            Value::Ifd(ifd) => ifd.encode(order, offset, 0),
        }
    }
}

/// Builder for one IFD with its values and sub-IFDs.
///
/// Layout of a built IFD: entry table, out-of-line values, then sub-IFDs.
#[derive(Clone, Default)]
pub struct IfdBuilder {
    entries: Vec<(u16, Value)>,
    sub_ifds: Vec<(u16, IfdBuilder)>,
}

impl IfdBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, tag: u16, value: Value) -> Self {
        self.entries.push((tag, value));
        self
    }

    pub fn ascii(self, tag: u16, text: &str) -> Self {
        self.entry(tag, Value::Ascii(text.to_string()))
    }

    pub fn short(self, tag: u16, value: u16) -> Self {
        self.entry(tag, Value::Shorts(vec![value]))
    }

    pub fn long(self, tag: u16, value: u32) -> Self {
        self.entry(tag, Value::Longs(vec![value]))
    }

    pub fn rational(self, tag: u16, num: u32, den: u32) -> Self {
        self.entry(tag, Value::Rationals(vec![(num, den)]))
    }

    /// Add a sub-IFD reached through the LONG pointer tag `tag`.
    pub fn sub_ifd(mut self, tag: u16, ifd: IfdBuilder) -> Self {
        self.sub_ifds.push((tag, ifd));
        self
    }

    fn entry_count(&self) -> usize {
        self.entries.len() + self.sub_ifds.len()
    }

    fn table_size(&self) -> usize {
        2 + 12 * self.entry_count() + 4
    }

    /// Entry table plus out-of-line values.
    fn block_size(&self) -> usize {
        let data: usize = self
            .entries
            .iter()
            .map(|(_, value)| value.byte_len())
            .filter(|&len| len > 4)
            .map(|len| len + len % 2)
            .sum();
        self.table_size() + data
    }

    /// Block plus every sub-IFD, recursively.
    fn total_size(&self) -> usize {
        self.block_size() + self.sub_ifds.iter().map(|(_, ifd)| ifd.total_size()).sum::<usize>()
    }

    /// Encode this IFD placed at `offset`, including its sub-IFDs.
    fn encode(&self, order: ByteOrderType, offset: u32, next: u32) -> Vec<u8> {
        let mut table: Vec<(u16, u16, u32, [u8; 4])> = Vec::new();
        let mut data = Vec::new();
        let data_start = offset as usize + self.table_size();

        for (tag, value) in &self.entries {
            let len = value.byte_len();
            let field = if len > 4 {
                let value_offset = (data_start + data.len()) as u32;
                data.extend(value.encode(order, value_offset));
                if data.len() % 2 == 1 {
                    data.push(0);
                }
                order.u32(value_offset)
            } else {
                let mut inline = [0u8; 4];
                let bytes = value.encode(order, 0);
                inline[..bytes.len()].copy_from_slice(&bytes);
                inline
            };
            table.push((*tag, value.field_type(), value.count(), field));
        }

        let mut children = Vec::new();
        let mut child_offset = (offset as usize + self.block_size()) as u32;
        for (tag, ifd) in &self.sub_ifds {
            table.push((*tag, 4, 1, order.u32(child_offset)));
            children.extend(ifd.encode(order, child_offset, 0));
            child_offset += ifd.total_size() as u32;
        }

        table.sort_by_key(|entry| entry.0);

        let mut out = Vec::with_capacity(self.total_size());
        out.extend(order.u16(table.len() as u16));
        for (tag, field_type, count, field) in table {
            out.extend(order.u16(tag));
            out.extend(order.u16(field_type));
            out.extend(order.u32(count));
            out.extend(field);
        }
        out.extend(order.u32(next));
        out.extend(data);
        out.extend(children);
        out
    }
}

/// Builder for a TIFF stream with a chain of top-level IFDs.
pub struct TiffBuilder {
    byte_order: ByteOrderType,
    ifds: Vec<IfdBuilder>,
    trailer: Vec<u8>,
}

impl TiffBuilder {
    pub fn new() -> Self {
        Self {
            byte_order: ByteOrderType::LittleEndian,
            ifds: Vec::new(),
            trailer: Vec::new(),
        }
    }

    pub fn with_byte_order(mut self, order: ByteOrderType) -> Self {
        self.byte_order = order;
        self
    }

    pub fn add_ifd(mut self, ifd: IfdBuilder) -> Self {
        self.ifds.push(ifd);
        self
    }

    /// Bytes appended after all IFDs, at [`TiffBuilder::trailer_offset`].
    pub fn with_trailer(mut self, trailer: Vec<u8>) -> Self {
        self.trailer = trailer;
        self
    }

    /// Header-relative offset of the trailer.
    pub fn trailer_offset(&self) -> u32 {
        (8 + self.ifds.iter().map(IfdBuilder::total_size).sum::<usize>()) as u32
    }

    /// Header-relative offsets of the top-level IFDs.
    pub fn ifd_offsets(&self) -> Vec<u32> {
        let mut offsets = Vec::new();
        let mut offset = 8;
        for ifd in &self.ifds {
            offsets.push(offset as u32);
            offset += ifd.total_size();
        }
        offsets
    }

    /// Build the TIFF stream data.
    pub fn build(&self) -> Vec<u8> {
        let order = self.byte_order;
        let mut data = match order {
            ByteOrderType::LittleEndian => b"II".to_vec(),
            ByteOrderType::BigEndian => b"MM".to_vec(),
        };
        data.extend(order.u16(42));

        let offsets = self.ifd_offsets();
        data.extend(order.u32(offsets.first().copied().unwrap_or(0)));

        for (idx, ifd) in self.ifds.iter().enumerate() {
            let next = offsets.get(idx + 1).copied().unwrap_or(0);
            data.extend(ifd.encode(order, offsets[idx], next));
        }

        data.extend_from_slice(&self.trailer);
        data
    }
}

impl Default for TiffBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Common Fixtures
// =============================================================================

/// Tag ids used across tests.
pub mod tags {
    pub const MAKE: u16 = 0x010F;
    pub const MODEL: u16 = 0x0110;
    pub const ORIENTATION: u16 = 0x0112;
    pub const X_RESOLUTION: u16 = 0x011A;
    pub const COMPRESSION: u16 = 0x0103;
    pub const STRIP_OFFSETS: u16 = 0x0111;
    pub const STRIP_BYTE_COUNTS: u16 = 0x0117;
    pub const JPEG_IF_OFFSET: u16 = 0x0201;
    pub const JPEG_IF_BYTE_COUNT: u16 = 0x0202;
    pub const EXIF_OFFSET: u16 = 0x8769;
    pub const GPS_INFO: u16 = 0x8825;
    pub const EXPOSURE_TIME: u16 = 0x829A;
    pub const DATE_TIME_ORIGINAL: u16 = 0x9003;
    pub const MAKER_NOTE: u16 = 0x927C;
    pub const USER_COMMENT: u16 = 0x9286;
    pub const INTEROP_OFFSET: u16 = 0xA005;
    pub const GPS_LATITUDE_REF: u16 = 0x0001;
    pub const INTEROP_INDEX: u16 = 0x0001;
}

/// A camera-like stream: primary IFD with EXIF, GPS and Interoperability
/// directories.
pub fn create_camera_tiff(order: ByteOrderType) -> Vec<u8> {
    let interop = IfdBuilder::new().ascii(tags::INTEROP_INDEX, "R98");
    let exif = IfdBuilder::new()
        .rational(tags::EXPOSURE_TIME, 1, 250)
        .ascii(tags::DATE_TIME_ORIGINAL, "2024:05:01 12:30:00")
        .sub_ifd(tags::INTEROP_OFFSET, interop);
    let gps = IfdBuilder::new().ascii(tags::GPS_LATITUDE_REF, "N");

    let primary = IfdBuilder::new()
        .ascii(tags::MAKE, "TestCam")
        .ascii(tags::MODEL, "Model One")
        .short(tags::ORIENTATION, 1)
        .rational(tags::X_RESOLUTION, 72, 1)
        .sub_ifd(tags::EXIF_OFFSET, exif)
        .sub_ifd(tags::GPS_INFO, gps);

    TiffBuilder::new()
        .with_byte_order(order)
        .add_ifd(primary)
        .build()
}
