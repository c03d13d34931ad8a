//! Thumbnail extraction integration tests.
//!
//! Tests verify:
//! - A JPEG thumbnail is returned byte-for-byte and decodes as an image
//! - Uncompressed strip thumbnails are concatenated
//! - Thumbnails inside JPEG containers are found relative to the TIFF header
//! - A stop tag does not prevent extraction

use exif_decoder::{process, DecodeOptions, ThumbnailKind};

use super::test_utils::{
    create_test_rgb_jpeg, is_valid_jpeg, jfif_payload, segment, tags, wrap_in_jpeg,
    ByteOrderType, IfdBuilder, TiffBuilder, Value,
};

fn primary() -> IfdBuilder {
    IfdBuilder::new()
        .ascii(tags::MAKE, "TestCam")
        .short(tags::ORIENTATION, 1)
}

fn jpeg_thumbnail_ifd(offset: u32, length: u32) -> IfdBuilder {
    IfdBuilder::new()
        .short(tags::COMPRESSION, 6)
        .long(tags::JPEG_IF_OFFSET, offset)
        .long(tags::JPEG_IF_BYTE_COUNT, length)
}

/// A stream whose second IFD points at `thumbnail`, stored after the IFDs.
fn stream_with_jpeg_thumbnail(order: ByteOrderType, thumbnail: &[u8]) -> Vec<u8> {
    let length = thumbnail.len() as u32;
    // IFD sizes do not depend on the offset value
    let offset = TiffBuilder::new()
        .add_ifd(primary())
        .add_ifd(jpeg_thumbnail_ifd(0, length))
        .trailer_offset();

    TiffBuilder::new()
        .with_byte_order(order)
        .add_ifd(primary())
        .add_ifd(jpeg_thumbnail_ifd(offset, length))
        .with_trailer(thumbnail.to_vec())
        .build()
}

// =============================================================================
// JPEG Thumbnail Tests
// =============================================================================

#[test]
fn test_jpeg_thumbnail() {
    let thumbnail = create_test_rgb_jpeg(16, 12, 80);
    let data = stream_with_jpeg_thumbnail(ByteOrderType::LittleEndian, &thumbnail);

    let exif = process(data, &DecodeOptions::default()).unwrap();
    let extracted = exif.thumbnail.as_ref().unwrap();

    assert_eq!(extracted.kind, ThumbnailKind::Jpeg);
    assert_eq!(&extracted.data[..], &thumbnail[..]);
    assert!(is_valid_jpeg(&extracted.data));

    let decoded = image::load_from_memory(&extracted.data).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (16, 12));

    assert_eq!(exif.get("Thumbnail Compression").unwrap().display(), "JPEG (old-style)");
}

#[test]
fn test_jpeg_thumbnail_big_endian_in_jpeg_container() {
    let thumbnail = create_test_rgb_jpeg(8, 8, 70);
    let tiff = stream_with_jpeg_thumbnail(ByteOrderType::BigEndian, &thumbnail);
    let data = wrap_in_jpeg(&[segment(0xE0, &jfif_payload())], &tiff);

    let exif = process(data, &DecodeOptions::default()).unwrap();
    assert_eq!(&exif.thumbnail.unwrap().data[..], &thumbnail[..]);
}

#[test]
fn test_stop_tag_does_not_block_thumbnail() {
    let thumbnail = create_test_rgb_jpeg(8, 8, 70);
    let data = stream_with_jpeg_thumbnail(ByteOrderType::LittleEndian, &thumbnail);

    let options = DecodeOptions::default().with_stop_tag("Compression");
    let exif = process(data, &options).unwrap();

    assert!(exif.get("Thumbnail JpegIFOffset").is_none());
    assert_eq!(exif.thumbnail.unwrap().len(), thumbnail.len());
}

#[test]
fn test_quick_mode_has_no_thumbnail() {
    let thumbnail = create_test_rgb_jpeg(8, 8, 70);
    let data = stream_with_jpeg_thumbnail(ByteOrderType::LittleEndian, &thumbnail);

    let exif = process(data, &DecodeOptions::default().with_details(false)).unwrap();
    assert!(exif.thumbnail.is_none());
    assert!(exif.get("Thumbnail JpegIFOffset").is_some());
}

#[test]
fn test_single_ifd_has_no_thumbnail() {
    let data = TiffBuilder::new().add_ifd(primary()).build();
    let exif = process(data, &DecodeOptions::default()).unwrap();
    assert!(exif.thumbnail.is_none());
}

// =============================================================================
// Strip Thumbnail Tests
// =============================================================================

#[test]
fn test_uncompressed_strips() {
    let strips: [&[u8]; 3] = [&[10, 11, 12, 13], &[20, 21], &[30, 31, 32]];
    let counts: Vec<u32> = strips.iter().map(|s| s.len() as u32).collect();

    let thumbnail_ifd = |offsets: Vec<u32>| {
        IfdBuilder::new()
            .short(tags::COMPRESSION, 1)
            .entry(tags::STRIP_OFFSETS, Value::Longs(offsets))
            .entry(tags::STRIP_BYTE_COUNTS, Value::Longs(counts.clone()))
    };

    let base = TiffBuilder::new()
        .add_ifd(primary())
        .add_ifd(thumbnail_ifd(vec![0; 3]))
        .trailer_offset();
    let offsets = vec![base, base + 4, base + 6];

    let data = TiffBuilder::new()
        .with_byte_order(ByteOrderType::BigEndian)
        .add_ifd(primary())
        .add_ifd(thumbnail_ifd(offsets))
        .with_trailer(strips.concat())
        .build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    let extracted = exif.thumbnail.unwrap();

    assert_eq!(extracted.kind, ThumbnailKind::Tiff);
    assert_eq!(&extracted.data[..], &strips.concat()[..]);
    assert_eq!(extracted.kind.extension(), "tif");
}

#[test]
fn test_strip_count_mismatch() {
    let data = TiffBuilder::new()
        .add_ifd(primary())
        .add_ifd(
            IfdBuilder::new()
                .short(tags::COMPRESSION, 1)
                .entry(tags::STRIP_OFFSETS, Value::Longs(vec![8, 16]))
                .entry(tags::STRIP_BYTE_COUNTS, Value::Longs(vec![4])),
        )
        .build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    assert!(exif.thumbnail.is_none());
    assert!(exif.get("Thumbnail StripOffsets").is_some());
}
