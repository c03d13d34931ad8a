//! TIFF stream integration tests.
//!
//! Tests verify:
//! - Both byte orders decode to the same tags
//! - Every directory kind gets its own key prefix
//! - Value rendering (rationals, inline shorts, raw bytes)
//! - Decoded values of every field type re-encode to the stored bytes
//! - Malformed and cyclic structures are survived
//! - Stop tag and quick mode
//! - Block cache reduces reads

use exif_decoder::io::BlockCache;
use exif_decoder::{
    process, process_reader, ContainerFormat, DecodeOptions, ExifError, FieldType, TagValues,
};

use super::test_utils::{
    create_camera_tiff, tags, ByteOrderType, IfdBuilder, TiffBuilder, TrackingMockReader, Value,
};

// =============================================================================
// Byte Order Tests
// =============================================================================

fn assert_camera_tags(data: Vec<u8>) {
    let exif = process(data, &DecodeOptions::default()).unwrap();

    assert_eq!(exif.container.unwrap().format, ContainerFormat::Tiff);
    assert_eq!(exif.get("Image Make").unwrap().display(), "TestCam");
    assert_eq!(exif.get("Image Model").unwrap().display(), "Model One");
    assert_eq!(exif.get("Image Orientation").unwrap().display(), "Horizontal (normal)");
    assert_eq!(exif.get("Image XResolution").unwrap().display(), "72");
    assert_eq!(exif.get("EXIF ExposureTime").unwrap().display(), "1/250");
    assert_eq!(
        exif.get("EXIF DateTimeOriginal").unwrap().display(),
        "2024:05:01 12:30:00"
    );
    assert_eq!(exif.get("GPS GPSLatitudeRef").unwrap().display(), "N");
    assert_eq!(
        exif.get("EXIF Interoperability InteroperabilityIndex")
            .unwrap()
            .display(),
        "R98"
    );
}

#[test]
fn test_little_endian_tiff() {
    let data = create_camera_tiff(ByteOrderType::LittleEndian);
    assert_eq!(&data[0..2], b"II");
    assert_camera_tags(data);
}

#[test]
fn test_big_endian_tiff() {
    let data = create_camera_tiff(ByteOrderType::BigEndian);
    assert_eq!(&data[0..2], b"MM");
    assert_camera_tags(data);
}

#[test]
fn test_byte_orders_agree() {
    let le = process(create_camera_tiff(ByteOrderType::LittleEndian), &DecodeOptions::default())
        .unwrap();
    let be = process(create_camera_tiff(ByteOrderType::BigEndian), &DecodeOptions::default())
        .unwrap();

    let le_keys: Vec<_> = le.tags.keys().collect();
    let be_keys: Vec<_> = be.tags.keys().collect();
    assert_eq!(le_keys, be_keys);

    for (key, tag) in &le.tags {
        assert_eq!(tag.values, be.tags[key].values, "values differ for {}", key);
    }
}

// =============================================================================
// Directory Naming Tests
// =============================================================================

#[test]
fn test_same_tag_id_in_different_ifds() {
    // 0x0001 is GPSLatitudeRef in GPS and InteroperabilityIndex in Interop
    let exif = process(create_camera_tiff(ByteOrderType::LittleEndian), &DecodeOptions::default())
        .unwrap();

    let ids: Vec<_> = exif
        .tags
        .values()
        .filter(|tag| tag.tag_id == Some(0x0001))
        .map(|tag| tag.key())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&"GPS GPSLatitudeRef".to_string()));
    assert!(ids.contains(&"EXIF Interoperability InteroperabilityIndex".to_string()));
}

#[test]
fn test_top_level_ifd_names() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().ascii(tags::MAKE, "First"))
        .add_ifd(IfdBuilder::new().ascii(tags::MAKE, "Second"))
        .add_ifd(IfdBuilder::new().ascii(tags::MAKE, "Third"))
        .build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    assert_eq!(exif.get("Image Make").unwrap().display(), "First");
    assert_eq!(exif.get("Thumbnail Make").unwrap().display(), "Second");
    assert_eq!(exif.get("IFD 2 Make").unwrap().display(), "Third");
}

#[test]
fn test_exif_subifd_decoded_once() {
    let first = IfdBuilder::new().sub_ifd(
        tags::EXIF_OFFSET,
        IfdBuilder::new().ascii(tags::DATE_TIME_ORIGINAL, "2020:01:01 00:00:00"),
    );
    let second = IfdBuilder::new().sub_ifd(
        tags::EXIF_OFFSET,
        IfdBuilder::new().rational(tags::EXPOSURE_TIME, 1, 60),
    );
    let data = TiffBuilder::new().add_ifd(first).add_ifd(second).build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    assert!(exif.get("EXIF DateTimeOriginal").is_some());
    assert!(exif.get("EXIF ExposureTime").is_none());
    assert!(exif.get("Thumbnail ExifOffset").is_some());
}

// =============================================================================
// Value Tests
// =============================================================================

#[test]
fn test_rational_is_reduced() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().rational(tags::X_RESOLUTION, 10, 5))
        .build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    let tag = exif.get("Image XResolution").unwrap();
    assert_eq!(tag.printable, "2");
    assert_eq!(tag.field_type, Some(FieldType::Rational));
}

#[test]
fn test_inline_short() {
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().short(tags::ORIENTATION, 5))
        .build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    let tag = exif.get("Image Orientation").unwrap();
    assert_eq!(tag.values, TagValues::Integers(vec![5]));
    // IFD at 8, count field, then the entry's value field at +8
    assert_eq!(tag.field_offset, 8 + 2 + 8);
    assert_eq!(tag.field_length, 2);
}

#[test]
fn test_raw_bytes_preserved() {
    let raw: Vec<u8> = (0u8..10).map(|i| i * 17).collect();
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().entry(0x1234, Value::Undefined(raw.clone())))
        .build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    let tag = exif.get("Image Tag 0x1234").unwrap();
    assert_eq!(tag.values.to_bytes(), Some(raw));
    assert_eq!(tag.field_length, 10);
}

/// `value` truncated to `width` bytes in `order`.
fn int_bytes(value: i64, width: usize, order: ByteOrderType) -> Vec<u8> {
    match order {
        ByteOrderType::LittleEndian => value.to_le_bytes()[..width].to_vec(),
        ByteOrderType::BigEndian => value.to_be_bytes()[8 - width..].to_vec(),
    }
}

fn encode_ints(values: &[i64], width: usize, order: ByteOrderType) -> Vec<u8> {
    values.iter().flat_map(|&v| int_bytes(v, width, order)).collect()
}

/// Encode decoded values back into their on-disk form.
fn reencode(values: &TagValues, field_type: FieldType, order: ByteOrderType) -> Vec<u8> {
    match values {
        TagValues::Ascii(text) => {
            let mut bytes = text.as_bytes().to_vec();
            bytes.push(0);
            bytes
        }
        TagValues::Integers(ints) => encode_ints(ints, field_type.size_in_bytes(), order),
        TagValues::Ratios(ratios) => ratios
            .iter()
            .flat_map(|ratio| encode_ints(&[ratio.num, ratio.den], 4, order))
            .collect(),
    }
}

/// One entry per field type, some inline and some behind an offset.
fn every_field_type(order: ByteOrderType) -> IfdBuilder {
    let typed = |field_type: u16, count: u32, bytes: Vec<u8>| Value::Typed {
        field_type,
        count,
        bytes,
    };

    IfdBuilder::new()
        .entry(0xC101, typed(1, 3, vec![1, 2, 255]))
        .entry(0xC102, Value::Ascii("Serial 0042".to_string()))
        .entry(0xC103, Value::Shorts(vec![1, 0xFFFE]))
        .entry(0xC104, Value::Shorts(vec![7, 8, 0x1234]))
        .entry(0xC105, Value::Longs(vec![0xDEAD_BEEF]))
        .entry(0xC106, Value::Longs(vec![1, 0x0102_0304]))
        .entry(0xC107, Value::Rationals(vec![(1, 250), (72, 1)]))
        .entry(0xC108, typed(6, 3, vec![0xFF, 5, 0x80]))
        .entry(0xC109, Value::Undefined(vec![9, 8, 7, 6, 5, 4, 3, 2, 1]))
        .entry(0xC10A, typed(8, 3, encode_ints(&[-2, 300, -300], 2, order)))
        .entry(0xC10B, typed(9, 1, encode_ints(&[-1], 4, order)))
        .entry(0xC10C, typed(10, 2, encode_ints(&[-3, 6, 5, -7], 4, order)))
}

fn assert_values_reencode(order: ByteOrderType) {
    let data = TiffBuilder::new()
        .with_byte_order(order)
        .add_ifd(every_field_type(order))
        .build();

    let exif = process(data.clone(), &DecodeOptions::default()).unwrap();

    let mut seen = Vec::new();
    for tag in exif.tags.values() {
        let field_type = tag.field_type.unwrap();
        let start = tag.field_offset as usize;
        let stored = &data[start..start + tag.field_length as usize];

        assert_eq!(
            reencode(&tag.values, field_type, order),
            stored,
            "{} ({:?})",
            tag.key(),
            field_type
        );
        seen.push(field_type);
    }

    seen.sort_by_key(|field_type| *field_type as u16);
    seen.dedup();
    assert_eq!(seen.len(), 10);
}

#[test]
fn test_values_reencode_big_endian() {
    assert_values_reencode(ByteOrderType::BigEndian);
}

#[test]
fn test_values_reencode_little_endian() {
    assert_values_reencode(ByteOrderType::LittleEndian);
}

// =============================================================================
// Malformed Data Tests
// =============================================================================

#[test]
fn test_self_referencing_ifd_terminates() {
    let mut data = b"II*\0\x08\0\0\0".to_vec();
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&tags::ORIENTATION.to_le_bytes());
    data.extend_from_slice(&3u16.to_le_bytes());
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(&[6, 0, 0, 0]);
    data.extend_from_slice(&8u32.to_le_bytes());

    let exif = process(data, &DecodeOptions::default()).unwrap();
    assert_eq!(exif.len(), 1);
    assert_eq!(exif.get("Image Orientation").unwrap().values.first_integer(), Some(6));
}

#[test]
fn test_unknown_field_type_skipped() {
    let data = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .ascii(tags::MAKE, "TestCam")
                .entry(
                    tags::MODEL,
                    Value::Raw {
                        field_type: 99,
                        count: 1,
                        value: 0,
                    },
                )
                .short(tags::ORIENTATION, 1),
        )
        .build();

    let exif = process(data.clone(), &DecodeOptions::default()).unwrap();
    assert!(exif.get("Image Make").is_some());
    assert!(exif.get("Image Model").is_none());
    assert!(exif.get("Image Orientation").is_some());

    let strict = DecodeOptions::default().with_strict(true);
    assert!(matches!(process(data, &strict), Err(ExifError::Tiff(_))));
}

#[test]
fn test_value_out_of_bounds_skipped() {
    let data = TiffBuilder::new()
        .add_ifd(
            IfdBuilder::new()
                .entry(
                    tags::MAKE,
                    Value::Raw {
                        field_type: 2,
                        count: 64,
                        value: 4000,
                    },
                )
                .short(tags::ORIENTATION, 3),
        )
        .build();

    let exif = process(data, &DecodeOptions::default()).unwrap();
    assert!(exif.get("Image Make").is_none());
    assert_eq!(exif.get("Image Orientation").unwrap().display(), "Rotated 180");
}

#[test]
fn test_short_file_has_no_metadata() {
    for len in 0..12 {
        let data = create_camera_tiff(ByteOrderType::LittleEndian)[..len].to_vec();
        let exif = process(data, &DecodeOptions::default()).unwrap();
        assert!(exif.is_empty());
        assert!(exif.container.is_none());
    }
}

// =============================================================================
// Option Tests
// =============================================================================

#[test]
fn test_stop_tag() {
    let options = DecodeOptions::default().with_stop_tag("Model");
    let exif = process(create_camera_tiff(ByteOrderType::LittleEndian), &options).unwrap();

    assert!(exif.get("Image Make").is_some());
    assert!(exif.get("Image Model").is_some());
    assert!(exif.get("Image Orientation").is_none());
    // The EXIF pointer comes after Model, so the SubIFD is never reached
    assert!(exif.get("EXIF ExposureTime").is_none());
}

#[test]
fn test_quick_mode_skips_detail_tags() {
    let mut comment = b"ASCII\0\0\0".to_vec();
    comment.extend_from_slice(b"Hello");
    let exif_ifd = IfdBuilder::new()
        .entry(tags::MAKER_NOTE, Value::Undefined(vec![0; 16]))
        .entry(tags::USER_COMMENT, Value::Undefined(comment))
        .rational(tags::EXPOSURE_TIME, 1, 30);
    let data = TiffBuilder::new()
        .add_ifd(IfdBuilder::new().sub_ifd(tags::EXIF_OFFSET, exif_ifd))
        .build();

    let full = process(data.clone(), &DecodeOptions::default()).unwrap();
    assert!(full.get("EXIF MakerNote").is_some());
    assert_eq!(full.get("EXIF UserComment").unwrap().display(), "Hello");

    let quick = process(data, &DecodeOptions::default().with_details(false)).unwrap();
    assert!(quick.get("EXIF MakerNote").is_none());
    assert!(quick.get("EXIF UserComment").is_none());
    assert!(quick.get("EXIF ExposureTime").is_some());
}

// =============================================================================
// Cache Tests
// =============================================================================

#[test]
fn test_block_cache_reduces_reads() {
    let data = create_camera_tiff(ByteOrderType::BigEndian);

    let direct = TrackingMockReader::new(data.clone(), "mock://direct.tif");
    let uncached = process_reader(&direct, &DecodeOptions::default()).unwrap();

    let tracked = TrackingMockReader::new(data, "mock://cached.tif");
    let cache = BlockCache::with_capacity(tracked.clone(), 4096, 4);
    let cached = process_reader(&cache, &DecodeOptions::default()).unwrap();

    assert_eq!(uncached.tags, cached.tags);
    assert!(tracked.request_count() < direct.request_count());
    assert!(tracked.request_count() >= 1);
    assert!(tracked.get_requests().iter().all(|&(offset, _)| offset % 4096 == 0));
}
