//! Canon MakerNote decoding.
//!
//! A Canon MakerNote is a plain IFD using the standard field types, with
//! offsets relative to the TIFF header. Several of its tags are arrays of
//! shorts where each element position has its own meaning; those are
//! expanded into one tag per element. The CameraInfo blob has a layout that
//! changes with the camera model, selected by matching the model string.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::error::TiffError;
use crate::exif::registry::{lookup_label, unknown_tag_name, IfdKind, TagLabel, TagSpec, TagTable};
use crate::exif::tag::DecodedTag;
use crate::exif::walker::IfdWalker;
use crate::format::tiff::{FieldType, TagValues};

use super::MODEL_KEY;

// =============================================================================
// MakerNote IFD
// =============================================================================

/// Tags of the Canon MakerNote IFD.
pub static TAGS: TagTable = TagTable::new(
    "Canon",
    &[
        TagSpec::plain(0x0006, "ImageType"),
        TagSpec::plain(0x0007, "FirmwareVersion"),
        TagSpec::plain(0x0008, "ImageNumber"),
        TagSpec::plain(0x0009, "OwnerName"),
        TagSpec::plain(0x000C, "SerialNumber"),
        TagSpec::plain(0x000E, "FileLength"),
        TagSpec::mapped(
            0x0015,
            "SerialNumberFormat",
            &[(0x9000_0000, "Format 1"), (0xA000_0000, "Format 2")],
        ),
        TagSpec::mapped(0x001A, "SuperMacro", &[(0, "Off"), (1, "On (1)"), (2, "On (2)")]),
        TagSpec::mapped(
            0x001C,
            "DateStampMode",
            &[(0, "Off"), (1, "Date"), (2, "Date & Time")],
        ),
        TagSpec::plain(0x001E, "FirmwareRevision"),
        TagSpec::plain(0x0028, "ImageUniqueID"),
        TagSpec::plain(0x0095, "LensModel"),
        TagSpec::plain(0x0096, "InternalSerialNumber"),
        TagSpec::plain(0x0097, "DustRemovalData"),
        TagSpec::plain(0x0098, "CropInfo"),
        TagSpec::plain(0x009A, "AspectInfo"),
        TagSpec::mapped(0x00B4, "ColorSpace", &[(1, "sRGB"), (2, "Adobe RGB")]),
    ],
);

// =============================================================================
// Short Arrays
// =============================================================================

/// Element tables are keyed by element index, not tag id.
pub static CAMERA_SETTINGS: TagTable = TagTable::new(
    "CameraSettings",
    &[
        TagSpec::mapped(1, "Macromode", &[(1, "Macro"), (2, "Normal")]),
        TagSpec::plain(2, "SelfTimer"),
        TagSpec::mapped(
            3,
            "Quality",
            &[(1, "Economy"), (2, "Normal"), (3, "Fine"), (5, "Superfine")],
        ),
        TagSpec::mapped(
            4,
            "FlashMode",
            &[
                (0, "Flash Not Fired"),
                (1, "Auto"),
                (2, "On"),
                (3, "Red-Eye Reduction"),
                (4, "Slow Synchro"),
                (5, "Auto + Red-Eye Reduction"),
                (6, "On + Red-Eye Reduction"),
                (16, "external flash"),
            ],
        ),
        TagSpec::mapped(
            5,
            "ContinuousDriveMode",
            &[(0, "Single Or Timer"), (1, "Continuous"), (2, "Movie")],
        ),
        TagSpec::mapped(
            7,
            "FocusMode",
            &[
                (0, "One-Shot"),
                (1, "AI Servo"),
                (2, "AI Focus"),
                (3, "MF"),
                (4, "Single"),
                (5, "Continuous"),
                (6, "MF"),
            ],
        ),
        TagSpec::mapped(
            9,
            "RecordMode",
            &[
                (1, "JPEG"),
                (2, "CRW+THM"),
                (3, "AVI+THM"),
                (4, "TIF"),
                (5, "TIF+JPEG"),
                (6, "CR2"),
                (7, "CR2+JPEG"),
                (9, "Video"),
            ],
        ),
        TagSpec::mapped(10, "ImageSize", &[(0, "Large"), (1, "Medium"), (2, "Small")]),
        TagSpec::mapped(
            11,
            "EasyShootingMode",
            &[
                (0, "Full Auto"),
                (1, "Manual"),
                (2, "Landscape"),
                (3, "Fast Shutter"),
                (4, "Slow Shutter"),
                (5, "Night"),
                (6, "B&W"),
                (7, "Sepia"),
                (8, "Portrait"),
                (9, "Sports"),
                (10, "Macro/Close-Up"),
                (11, "Pan Focus"),
            ],
        ),
        TagSpec::mapped(
            12,
            "DigitalZoom",
            &[(0, "None"), (1, "2x"), (2, "4x"), (3, "Other")],
        ),
        TagSpec::mapped(13, "Contrast", LOW_NORMAL_HIGH),
        TagSpec::mapped(14, "Saturation", LOW_NORMAL_HIGH),
        TagSpec::mapped(15, "Sharpness", LOW_NORMAL_HIGH),
        TagSpec::mapped(
            16,
            "ISO",
            &[
                (0, "See ISOSpeedRatings Tag"),
                (15, "Auto"),
                (16, "50"),
                (17, "100"),
                (18, "200"),
                (19, "400"),
            ],
        ),
        TagSpec::mapped(
            17,
            "MeteringMode",
            &[
                (0, "Default"),
                (1, "Spot"),
                (2, "Average"),
                (3, "Evaluative"),
                (4, "Partial"),
                (5, "Center-weighted"),
            ],
        ),
        TagSpec::mapped(
            18,
            "FocusType",
            &[
                (0, "Manual"),
                (1, "Auto"),
                (3, "Close-Up (Macro)"),
                (8, "Locked (Pan Mode)"),
            ],
        ),
        TagSpec::mapped(
            19,
            "AFPointSelected",
            &[
                (0x3000, "None (MF)"),
                (0x3001, "Auto-Selected"),
                (0x3002, "Right"),
                (0x3003, "Center"),
                (0x3004, "Left"),
            ],
        ),
        TagSpec::mapped(
            20,
            "ExposureMode",
            &[
                (0, "Easy Shooting"),
                (1, "Program"),
                (2, "Tv-priority"),
                (3, "Av-priority"),
                (4, "Manual"),
                (5, "A-DEP"),
            ],
        ),
        TagSpec::plain(22, "LensType"),
        TagSpec::plain(23, "LongFocalLengthOfLensInFocalUnits"),
        TagSpec::plain(24, "ShortFocalLengthOfLensInFocalUnits"),
        TagSpec::plain(25, "FocalUnitsPerMM"),
        TagSpec::mapped(28, "FlashActivity", &[(0, "Did Not Fire"), (1, "Fired")]),
        TagSpec::mapped(
            29,
            "FlashDetails",
            &[
                (0, "Manual"),
                (1, "TTL"),
                (2, "A-TTL"),
                (3, "E-TTL"),
                (4, "FP Sync Enabled"),
                (7, "2nd(\"Rear\")-Curtain Sync Used"),
                (11, "FP Sync Used"),
                (13, "Internal Flash"),
                (14, "External E-TTL"),
            ],
        ),
        TagSpec::mapped(
            32,
            "FocusMode",
            &[(0, "Single"), (1, "Continuous"), (8, "Manual")],
        ),
        TagSpec::mapped(
            33,
            "AESetting",
            &[
                (0, "Normal AE"),
                (1, "Exposure Compensation"),
                (2, "AE Lock"),
                (3, "AE Lock + Exposure Comp."),
                (4, "No AE"),
            ],
        ),
        TagSpec::mapped(
            34,
            "ImageStabilization",
            &[
                (0, "Off"),
                (1, "On"),
                (2, "Shoot Only"),
                (3, "Panning"),
                (4, "Dynamic"),
                (256, "Off"),
                (257, "On"),
                (258, "Shoot Only"),
                (259, "Panning"),
                (260, "Dynamic"),
            ],
        ),
        TagSpec::mapped(39, "SpotMeteringMode", &[(0, "Center"), (1, "AF Point")]),
        TagSpec::mapped(
            41,
            "ManualFlashOutput",
            &[
                (0x0, "n/a"),
                (0x500, "Full"),
                (0x502, "Medium"),
                (0x504, "Low"),
                (0x7FFF, "n/a"),
            ],
        ),
    ],
);

const LOW_NORMAL_HIGH: &[(i64, &str)] = &[(0xFFFF, "Low"), (0, "Normal"), (1, "High")];

pub static FOCAL_LENGTH: TagTable = TagTable::new(
    "FocalLength",
    &[
        TagSpec::mapped(1, "FocalType", &[(1, "Fixed"), (2, "Zoom")]),
        TagSpec::plain(2, "FocalLength"),
    ],
);

pub static SHOT_INFO: TagTable = TagTable::new(
    "ShotInfo",
    &[
        TagSpec::mapped(
            7,
            "WhiteBalance",
            &[
                (0, "Auto"),
                (1, "Sunny"),
                (2, "Cloudy"),
                (3, "Tungsten"),
                (4, "Fluorescent"),
                (5, "Flash"),
                (6, "Custom"),
            ],
        ),
        TagSpec::mapped(
            8,
            "SlowShutter",
            &[
                (-1, "n/a"),
                (0, "Off"),
                (1, "Night Scene"),
                (2, "On"),
                (3, "None"),
            ],
        ),
        TagSpec::plain(9, "SequenceNumber"),
        TagSpec::plain(14, "AFPointUsed"),
        TagSpec::mapped(
            15,
            "FlashBias",
            &[
                (0xFFC0, "-2 EV"),
                (0xFFCC, "-1.67 EV"),
                (0xFFD0, "-1.50 EV"),
                (0xFFD4, "-1.33 EV"),
                (0xFFE0, "-1 EV"),
                (0xFFEC, "-0.67 EV"),
                (0xFFF0, "-0.50 EV"),
                (0xFFF4, "-0.33 EV"),
                (0x0000, "0 EV"),
                (0x000C, "0.33 EV"),
                (0x0010, "0.50 EV"),
                (0x0014, "0.67 EV"),
                (0x0020, "1 EV"),
                (0x002C, "1.33 EV"),
                (0x0030, "1.50 EV"),
                (0x0034, "1.67 EV"),
                (0x0040, "2 EV"),
            ],
        ),
        TagSpec::plain(19, "SubjectDistance"),
    ],
);

pub static AF_INFO_2: TagTable = TagTable::new(
    "AFInfo2",
    &[
        TagSpec::mapped(
            2,
            "AFAreaMode",
            &[
                (0, "Off (Manual Focus)"),
                (2, "Single-point AF"),
                (4, "Multi-point AF or AI AF"),
                (5, "Face Detect AF"),
                (6, "Face + Tracking"),
                (7, "Zone AF"),
                (8, "AF Point Expansion"),
                (9, "Spot AF"),
                (11, "Flexizone Multi"),
                (13, "Flexizone Single"),
            ],
        ),
        TagSpec::plain(3, "NumAFPoints"),
        TagSpec::plain(4, "ValidAFPoints"),
        TagSpec::plain(5, "CanonImageWidth"),
    ],
);

pub static FILE_INFO: TagTable = TagTable::new(
    "FileInfo",
    &[
        TagSpec::plain(1, "FileNumber"),
        TagSpec::mapped(
            3,
            "BracketMode",
            &[(0, "Off"), (1, "AEB"), (2, "FEB"), (3, "ISO"), (4, "WB")],
        ),
        TagSpec::plain(4, "BracketValue"),
        TagSpec::plain(5, "BracketShotNumber"),
        TagSpec::mapped(
            6,
            "RawJpgQuality",
            &[
                (0xFFFF, "n/a"),
                (1, "Economy"),
                (2, "Normal"),
                (3, "Fine"),
                (4, "RAW"),
                (5, "Superfine"),
                (130, "Normal Movie"),
            ],
        ),
        TagSpec::mapped(
            7,
            "RawJpgSize",
            &[
                (0, "Large"),
                (1, "Medium"),
                (2, "Small"),
                (5, "Medium 1"),
                (6, "Medium 2"),
                (7, "Medium 3"),
                (8, "Postcard"),
                (9, "Widescreen"),
                (10, "Medium Widescreen"),
                (14, "Small 1"),
                (15, "Small 2"),
                (16, "Small 3"),
                (128, "640x480 Movie"),
                (129, "Medium Movie"),
                (130, "Small Movie"),
                (137, "1280x720 Movie"),
                (142, "1920x1080 Movie"),
            ],
        ),
        TagSpec::mapped(
            8,
            "LongExposureNoiseReduction2",
            &[(0, "Off"), (1, "On (1D)"), (2, "On"), (3, "Auto")],
        ),
        TagSpec::mapped(
            9,
            "WBBracketMode",
            &[(0, "Off"), (1, "On (shift AB)"), (2, "On (shift GM)")],
        ),
        TagSpec::plain(12, "WBBracketValueAB"),
        TagSpec::plain(13, "WBBracketValueGM"),
        TagSpec::mapped(
            14,
            "FilterEffect",
            &[
                (0, "None"),
                (1, "Yellow"),
                (2, "Orange"),
                (3, "Red"),
                (4, "Green"),
            ],
        ),
        TagSpec::mapped(
            15,
            "ToningEffect",
            &[
                (0, "None"),
                (1, "Sepia"),
                (2, "Blue"),
                (3, "Purple"),
                (4, "Green"),
            ],
        ),
        TagSpec::plain(16, "MacroMagnification"),
        TagSpec::mapped(19, "LiveViewShooting", &[(0, "Off"), (1, "On")]),
        TagSpec::mapped(25, "FlashExposureLock", &[(0, "Off"), (1, "On")]),
    ],
);

/// MakerNote tags holding short arrays, with their element tables.
static SHORT_ARRAYS: [(u16, &TagTable); 5] = [
    (0x0001, &CAMERA_SETTINGS),
    (0x0002, &FOCAL_LENGTH),
    (0x0004, &SHOT_INFO),
    (0x0026, &AF_INFO_2),
    (0x0093, &FILE_INFO),
];

/// MakerNote tag holding the CameraInfo blob.
pub const CAMERA_INFO_TAG: u16 = 0x000D;

// =============================================================================
// CameraInfo
// =============================================================================

/// Width of a little-endian CameraInfo field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    U8,
    U16,
    U32,
}

impl FieldWidth {
    pub const fn size(self) -> usize {
        match self {
            FieldWidth::U8 => 1,
            FieldWidth::U16 => 2,
            FieldWidth::U32 => 4,
        }
    }

    /// Read the field at `offset`, `None` past the end of the blob.
    pub fn read(self, blob: &[u8], offset: usize) -> Option<i64> {
        let bytes = blob.get(offset..offset.checked_add(self.size())?)?;
        Some(match self {
            FieldWidth::U8 => bytes[0] as i64,
            FieldWidth::U16 => u16::from_le_bytes([bytes[0], bytes[1]]) as i64,
            FieldWidth::U32 => u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as i64,
        })
    }
}

/// One field of a CameraInfo layout.
#[derive(Debug, Clone, Copy)]
pub struct CameraInfoField {
    pub offset: usize,
    pub name: &'static str,
    pub width: FieldWidth,
    pub transform: fn(i64) -> String,
}

impl CameraInfoField {
    const fn new(
        offset: usize,
        name: &'static str,
        width: FieldWidth,
        transform: fn(i64) -> String,
    ) -> Self {
        Self {
            offset,
            name,
            width,
            transform,
        }
    }
}

/// Temperature code to degrees Celsius.
fn convert_temp(value: i64) -> String {
    format!("{} C", value - 128)
}

/// Zero-based index to one-based.
fn add_one(value: i64) -> String {
    (value + 1).to_string()
}

fn subtract_one(value: i64) -> String {
    (value - 1).to_string()
}

const CAMERA_INFO_5D: &[CameraInfoField] = &[
    CameraInfoField::new(23, "CameraTemperature", FieldWidth::U8, convert_temp),
    CameraInfoField::new(204, "DirectoryIndex", FieldWidth::U32, subtract_one),
    CameraInfoField::new(208, "FileIndex", FieldWidth::U16, add_one),
];

const CAMERA_INFO_5D_MARK_II: &[CameraInfoField] = &[
    CameraInfoField::new(25, "CameraTemperature", FieldWidth::U8, convert_temp),
    CameraInfoField::new(443, "FileIndex", FieldWidth::U32, add_one),
    CameraInfoField::new(455, "DirectoryIndex", FieldWidth::U32, subtract_one),
];

const CAMERA_INFO_5D_MARK_III: &[CameraInfoField] = &[
    CameraInfoField::new(27, "CameraTemperature", FieldWidth::U8, convert_temp),
    CameraInfoField::new(652, "FileIndex", FieldWidth::U32, add_one),
    CameraInfoField::new(656, "FileIndex2", FieldWidth::U32, add_one),
    CameraInfoField::new(664, "DirectoryIndex", FieldWidth::U32, subtract_one),
    CameraInfoField::new(668, "DirectoryIndex2", FieldWidth::U32, subtract_one),
];

const CAMERA_INFO_600D: &[CameraInfoField] = &[
    CameraInfoField::new(25, "CameraTemperature", FieldWidth::U8, convert_temp),
    CameraInfoField::new(475, "FileIndex", FieldWidth::U32, add_one),
    CameraInfoField::new(487, "DirectoryIndex", FieldWidth::U32, subtract_one),
];

/// Model patterns and their layouts, in match order.
const CAMERA_INFO_MODELS: [(&str, &[CameraInfoField]); 4] = [
    (r"EOS 5D$", CAMERA_INFO_5D),
    (r"EOS 5D Mark II$", CAMERA_INFO_5D_MARK_II),
    (r"EOS 5D Mark III$", CAMERA_INFO_5D_MARK_III),
    (r"\b(600D|REBEL T3i|Kiss X5)\b", CAMERA_INFO_600D),
];

static CAMERA_INFO_PATTERNS: LazyLock<Vec<(Regex, &'static [CameraInfoField])>> =
    LazyLock::new(|| {
        CAMERA_INFO_MODELS
            .iter()
            .filter_map(|&(pattern, layout)| Regex::new(pattern).ok().map(|re| (re, layout)))
            .collect()
    });

/// CameraInfo layout for a camera model; the first matching pattern wins.
pub fn camera_info_layout(model: &str) -> Option<&'static [CameraInfoField]> {
    CAMERA_INFO_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(model))
        .map(|&(_, layout)| layout)
}

// =============================================================================
// Decoding
// =============================================================================

/// Whether a camera make is handled here.
pub fn matches_make(make: &str) -> bool {
    make.contains("Canon")
}

/// Decode a Canon MakerNote into `MakerNote <name>` tags.
pub fn decode(walker: &mut IfdWalker<'_>, note: &DecodedTag) -> Result<(), TiffError> {
    let offset = u32::try_from(note.field_offset)
        .map_err(|_| TiffError::InvalidIfdOffset(note.field_offset))?;
    walker.dump_ifd(offset, IfdKind::MakerNote, &TAGS)?;

    for &(tag_id, table) in SHORT_ARRAYS.iter() {
        let key = IfdKind::MakerNote.key(&unknown_tag_name(tag_id));
        if let Some(tag) = walker.remove_tag(&key) {
            match tag.values.as_integers() {
                Some(values) => expand_short_array(walker, values, table),
                None => debug!(table = table.name(), "Canon array tag is not numeric"),
            }
        }
    }

    let key = IfdKind::MakerNote.key(&unknown_tag_name(CAMERA_INFO_TAG));
    if let Some(tag) = walker.remove_tag(&key) {
        decode_camera_info(walker, &tag);
    }

    Ok(())
}

/// One tag per named element, starting at element 1 (element 0 is the
/// array's own byte length).
fn expand_short_array(walker: &mut IfdWalker<'_>, values: &[i64], table: &TagTable) {
    for (index, &value) in values.iter().enumerate().skip(1) {
        let Ok(index) = u16::try_from(index) else {
            break;
        };
        let Some(spec) = table.lookup(index) else {
            continue;
        };

        let label = match spec.label {
            TagLabel::Map(map) => Some(lookup_label(map, value).unwrap_or("Unknown").to_string()),
            _ => None,
        };

        walker.insert_tag(DecodedTag::synthesized(
            &IfdKind::MakerNote.name(),
            spec.name,
            TagValues::Integers(vec![value]),
            label,
        ));
    }
}

fn decode_camera_info(walker: &mut IfdWalker<'_>, tag: &DecodedTag) {
    let Some(model) = walker.tag(MODEL_KEY).map(|model| model.display().to_string()) else {
        return;
    };
    let Some(layout) = camera_info_layout(&model) else {
        debug!(model = %model, "no CameraInfo layout for model");
        return;
    };
    if !matches!(tag.field_type, Some(FieldType::Byte | FieldType::Undefined)) {
        debug!(field_type = ?tag.field_type, "CameraInfo is not a byte blob");
        return;
    }
    let Some(blob) = tag.values.to_bytes() else {
        return;
    };

    for field in layout {
        let Some(value) = field.width.read(&blob, field.offset) else {
            trace!(field = field.name, offset = field.offset, "CameraInfo field past end of data");
            continue;
        };

        walker.insert_tag(DecodedTag::synthesized(
            &IfdKind::MakerNote.name(),
            field.name,
            TagValues::Integers(vec![value]),
            Some((field.transform)(value)),
        ));
    }
}

// =============================================================================
// Tests
// =============================================================================
