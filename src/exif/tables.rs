//! Static tag tables for the standard directories.
//!
//! The TIFF/EXIF table covers the main IFD chain and the EXIF SubIFD, which
//! share one tag space. GPS and Interoperability directories reuse low tag
//! numbers with different meanings and get their own tables.

use super::registry::{make_string, make_string_uc, make_utf16_string, LabelMap, TagSpec, TagTable};

// =============================================================================
// Label Maps
// =============================================================================

const SUBFILE_TYPE: LabelMap = &[
    (0x0, "Full-resolution Image"),
    (0x1, "Reduced-resolution image"),
    (0x2, "Single page of multi-page image"),
    (0x3, "Single page of multi-page reduced-resolution image"),
    (0x4, "Transparency mask"),
    (0x5, "Transparency mask of reduced-resolution image"),
    (0x6, "Transparency mask of multi-page image"),
    (0x7, "Transparency mask of reduced-resolution multi-page image"),
];

const COMPRESSION: LabelMap = &[
    (1, "Uncompressed"),
    (2, "CCITT 1D"),
    (3, "T4/Group 3 Fax"),
    (4, "T6/Group 4 Fax"),
    (5, "LZW"),
    (6, "JPEG (old-style)"),
    (7, "JPEG"),
    (8, "Adobe Deflate"),
    (9, "JBIG B&W"),
    (10, "JBIG Color"),
    (32766, "Next"),
    (32769, "Epson ERF Compressed"),
    (32771, "CCIRLEW"),
    (32773, "PackBits"),
    (32809, "Thunderscan"),
    (32895, "IT8CTPAD"),
    (32896, "IT8LW"),
    (32897, "IT8MP"),
    (32898, "IT8BL"),
    (32908, "PixarFilm"),
    (32909, "PixarLog"),
    (32946, "Deflate"),
    (32947, "DCS"),
    (34661, "JBIG"),
    (34676, "SGILog"),
    (34677, "SGILog24"),
    (34712, "JPEG 2000"),
    (34713, "Nikon NEF Compressed"),
    (65000, "Kodak DCR Compressed"),
    (65535, "Pentax PEF Compressed"),
];

const PHOTOMETRIC_INTERPRETATION: LabelMap = &[
    (0, "WhiteIsZero"),
    (1, "BlackIsZero"),
    (2, "RGB"),
    (3, "RGB Palette"),
    (4, "Transparency Mask"),
    (5, "CMYK"),
    (6, "YCbCr"),
    (8, "CIELab"),
    (9, "ICCLab"),
    (10, "ITULab"),
    (32803, "Color Filter Array"),
    (32844, "Pixar LogL"),
    (32845, "Pixar LogLuv"),
    (34892, "Linear Raw"),
];

const FILL_ORDER: LabelMap = &[(1, "Normal"), (2, "Reversed")];

const ORIENTATION: LabelMap = &[
    (1, "Horizontal (normal)"),
    (2, "Mirrored horizontal"),
    (3, "Rotated 180"),
    (4, "Mirrored vertical"),
    (5, "Mirrored horizontal then rotated 90 CCW"),
    (6, "Rotated 90 CW"),
    (7, "Mirrored horizontal then rotated 90 CW"),
    (8, "Rotated 90 CCW"),
];

const PLANAR_CONFIGURATION: LabelMap = &[(1, "Chunky"), (2, "Planar")];

const RESOLUTION_UNIT: LabelMap = &[
    (1, "Not Absolute"),
    (2, "Pixels/Inch"),
    (3, "Pixels/Centimeter"),
];

const YCBCR_POSITIONING: LabelMap = &[(1, "Centered"), (2, "Co-sited")];

const EXPOSURE_PROGRAM: LabelMap = &[
    (0, "Unidentified"),
    (1, "Manual"),
    (2, "Program Normal"),
    (3, "Aperture Priority"),
    (4, "Shutter Priority"),
    (5, "Program Creative"),
    (6, "Program Action"),
    (7, "Portrait Mode"),
    (8, "Landscape Mode"),
];

const SENSITIVITY_TYPE: LabelMap = &[
    (0, "Unknown"),
    (1, "Standard Output Sensitivity"),
    (2, "Recommended Exposure Index"),
    (3, "ISO Speed"),
    (4, "Standard Output Sensitivity and Recommended Exposure Index"),
    (5, "Standard Output Sensitivity and ISO Speed"),
    (6, "Recommended Exposure Index and ISO Speed"),
    (7, "Standard Output Sensitivity, Recommended Exposure Index and ISO Speed"),
];

const COMPONENTS_CONFIGURATION: LabelMap = &[
    (0, ""),
    (1, "Y"),
    (2, "Cb"),
    (3, "Cr"),
    (4, "Red"),
    (5, "Green"),
    (6, "Blue"),
];

const METERING_MODE: LabelMap = &[
    (0, "Unidentified"),
    (1, "Average"),
    (2, "CenterWeightedAverage"),
    (3, "Spot"),
    (4, "MultiSpot"),
    (5, "Pattern"),
    (6, "Partial"),
    (255, "other"),
];

const LIGHT_SOURCE: LabelMap = &[
    (0, "Unknown"),
    (1, "Daylight"),
    (2, "Fluorescent"),
    (3, "Tungsten (incandescent light)"),
    (4, "Flash"),
    (9, "Fine Weather"),
    (10, "Cloudy Weather"),
    (11, "Shade"),
    (12, "Daylight Fluorescent"),
    (13, "Day White Fluorescent"),
    (14, "Cool White Fluorescent"),
    (15, "White Fluorescent"),
    (17, "Standard Light A"),
    (18, "Standard Light B"),
    (19, "Standard Light C"),
    (20, "D55"),
    (21, "D65"),
    (22, "D75"),
    (23, "D50"),
    (24, "ISO Studio Tungsten"),
    (255, "other"),
];

const FLASH: LabelMap = &[
    (0, "Flash did not fire"),
    (1, "Flash fired"),
    (5, "Strobe return light not detected"),
    (7, "Strobe return light detected"),
    (9, "Flash fired, compulsory flash mode"),
    (13, "Flash fired, compulsory flash mode, return light not detected"),
    (15, "Flash fired, compulsory flash mode, return light detected"),
    (16, "Flash did not fire, compulsory flash mode"),
    (24, "Flash did not fire, auto mode"),
    (25, "Flash fired, auto mode"),
    (29, "Flash fired, auto mode, return light not detected"),
    (31, "Flash fired, auto mode, return light detected"),
    (32, "No flash function"),
    (65, "Flash fired, red-eye reduction mode"),
    (69, "Flash fired, red-eye reduction mode, return light not detected"),
    (71, "Flash fired, red-eye reduction mode, return light detected"),
    (73, "Flash fired, compulsory flash mode, red-eye reduction mode"),
    (77, "Flash fired, compulsory flash mode, red-eye reduction mode, return light not detected"),
    (79, "Flash fired, compulsory flash mode, red-eye reduction mode, return light detected"),
    (89, "Flash fired, auto mode, red-eye reduction mode"),
    (93, "Flash fired, auto mode, return light not detected, red-eye reduction mode"),
    (95, "Flash fired, auto mode, return light detected, red-eye reduction mode"),
];

const COLOR_SPACE: LabelMap = &[(1, "sRGB"), (2, "Adobe RGB"), (65535, "Uncalibrated")];

const SENSING_METHOD: LabelMap = &[
    (1, "Not defined"),
    (2, "One-chip color area"),
    (3, "Two-chip color area"),
    (4, "Three-chip color area"),
    (5, "Color sequential area"),
    (7, "Trilinear"),
    (8, "Color sequential linear"),
];

const FILE_SOURCE: LabelMap = &[
    (1, "Film Scanner"),
    (2, "Reflection Print Scanner"),
    (3, "Digital Camera"),
];

const SCENE_TYPE: LabelMap = &[(1, "Directly Photographed")];

const CUSTOM_RENDERED: LabelMap = &[(0, "Normal"), (1, "Custom")];

const EXPOSURE_MODE: LabelMap = &[
    (0, "Auto Exposure"),
    (1, "Manual Exposure"),
    (2, "Auto Bracket"),
];

const WHITE_BALANCE: LabelMap = &[(0, "Auto"), (1, "Manual")];

const SCENE_CAPTURE_TYPE: LabelMap = &[
    (0, "Standard"),
    (1, "Landscape"),
    (2, "Portrait"),
    (3, "Night"),
];

const GAIN_CONTROL: LabelMap = &[
    (0, "None"),
    (1, "Low gain up"),
    (2, "High gain up"),
    (3, "Low gain down"),
    (4, "High gain down"),
];

const NORMAL_SOFT_HARD: LabelMap = &[(0, "Normal"), (1, "Soft"), (2, "Hard")];

const NORMAL_LOW_HIGH: LabelMap = &[(0, "Normal"), (1, "Low"), (2, "High")];

const SUBJECT_DISTANCE_RANGE: LabelMap = &[
    (0, "Unknown"),
    (1, "Macro"),
    (2, "Close View"),
    (3, "Distant View"),
];

const GPS_ALTITUDE_REF: LabelMap = &[(0, "Above sea level"), (1, "Below sea level")];

const GPS_DIFFERENTIAL: LabelMap = &[
    (0, "Measurement without differential correction"),
    (1, "Differential correction applied"),
];

// =============================================================================
// TIFF / EXIF
// =============================================================================

/// Tags of the main IFD chain and the EXIF SubIFD.
pub static EXIF_TAGS: TagTable = TagTable::new(
    "EXIF",
    &[
        TagSpec::mapped(0x00FE, "SubfileType", SUBFILE_TYPE),
        TagSpec::plain(0x00FF, "OldSubfileType"),
        TagSpec::plain(0x0100, "ImageWidth"),
        TagSpec::plain(0x0101, "ImageLength"),
        TagSpec::plain(0x0102, "BitsPerSample"),
        TagSpec::mapped(0x0103, "Compression", COMPRESSION),
        TagSpec::mapped(0x0106, "PhotometricInterpretation", PHOTOMETRIC_INTERPRETATION),
        TagSpec::plain(0x0107, "Thresholding"),
        TagSpec::mapped(0x010A, "FillOrder", FILL_ORDER),
        TagSpec::plain(0x010D, "DocumentName"),
        TagSpec::plain(0x010E, "ImageDescription"),
        TagSpec::plain(0x010F, "Make"),
        TagSpec::plain(0x0110, "Model"),
        TagSpec::plain(0x0111, "StripOffsets"),
        TagSpec::mapped(0x0112, "Orientation", ORIENTATION),
        TagSpec::plain(0x0115, "SamplesPerPixel"),
        TagSpec::plain(0x0116, "RowsPerStrip"),
        TagSpec::plain(0x0117, "StripByteCounts"),
        TagSpec::plain(0x0118, "MinSampleValue"),
        TagSpec::plain(0x0119, "MaxSampleValue"),
        TagSpec::plain(0x011A, "XResolution"),
        TagSpec::plain(0x011B, "YResolution"),
        TagSpec::mapped(0x011C, "PlanarConfiguration", PLANAR_CONFIGURATION),
        TagSpec::plain(0x011D, "PageName"),
        TagSpec::mapped(0x0128, "ResolutionUnit", RESOLUTION_UNIT),
        TagSpec::plain(0x012D, "TransferFunction"),
        TagSpec::plain(0x0131, "Software"),
        TagSpec::plain(0x0132, "DateTime"),
        TagSpec::plain(0x013B, "Artist"),
        TagSpec::plain(0x013E, "WhitePoint"),
        TagSpec::plain(0x013F, "PrimaryChromaticities"),
        TagSpec::plain(0x0142, "TileWidth"),
        TagSpec::plain(0x0143, "TileLength"),
        TagSpec::plain(0x0144, "TileOffsets"),
        TagSpec::plain(0x0145, "TileByteCounts"),
        TagSpec::plain(0x014A, "SubIFDs"),
        TagSpec::plain(0x0156, "TransferRange"),
        TagSpec::plain(0x0200, "JPEGProc"),
        TagSpec::plain(0x0201, "JpegIFOffset"),
        TagSpec::plain(0x0202, "JpegIFByteCount"),
        TagSpec::plain(0x0211, "YCbCrCoefficients"),
        TagSpec::plain(0x0212, "YCbCrSubSampling"),
        TagSpec::mapped(0x0213, "YCbCrPositioning", YCBCR_POSITIONING),
        TagSpec::plain(0x0214, "ReferenceBlackWhite"),
        TagSpec::plain(0x02BC, "ApplicationNotes"),
        TagSpec::plain(0x4746, "Rating"),
        TagSpec::plain(0x828D, "CFARepeatPatternDim"),
        TagSpec::plain(0x828E, "CFAPattern"),
        TagSpec::plain(0x828F, "BatteryLevel"),
        TagSpec::plain(0x8298, "Copyright"),
        TagSpec::plain(0x829A, "ExposureTime"),
        TagSpec::plain(0x829D, "FNumber"),
        TagSpec::plain(0x83BB, "IPTC/NAA"),
        TagSpec::plain(0x8769, "ExifOffset"),
        TagSpec::plain(0x8773, "InterColorProfile"),
        TagSpec::mapped(0x8822, "ExposureProgram", EXPOSURE_PROGRAM),
        TagSpec::plain(0x8824, "SpectralSensitivity"),
        TagSpec::plain(0x8825, "GPSInfo"),
        TagSpec::plain(0x8827, "ISOSpeedRatings"),
        TagSpec::plain(0x8828, "OECF"),
        TagSpec::mapped(0x8830, "SensitivityType", SENSITIVITY_TYPE),
        TagSpec::plain(0x8832, "RecommendedExposureIndex"),
        TagSpec::formatted(0x9000, "ExifVersion", make_string),
        TagSpec::plain(0x9003, "DateTimeOriginal"),
        TagSpec::plain(0x9004, "DateTimeDigitized"),
        TagSpec::plain(0x9010, "OffsetTime"),
        TagSpec::plain(0x9011, "OffsetTimeOriginal"),
        TagSpec::plain(0x9012, "OffsetTimeDigitized"),
        TagSpec::mapped(0x9101, "ComponentsConfiguration", COMPONENTS_CONFIGURATION),
        TagSpec::plain(0x9102, "CompressedBitsPerPixel"),
        TagSpec::plain(0x9201, "ShutterSpeedValue"),
        TagSpec::plain(0x9202, "ApertureValue"),
        TagSpec::plain(0x9203, "BrightnessValue"),
        TagSpec::plain(0x9204, "ExposureBiasValue"),
        TagSpec::plain(0x9205, "MaxApertureValue"),
        TagSpec::plain(0x9206, "SubjectDistance"),
        TagSpec::mapped(0x9207, "MeteringMode", METERING_MODE),
        TagSpec::mapped(0x9208, "LightSource", LIGHT_SOURCE),
        TagSpec::mapped(0x9209, "Flash", FLASH),
        TagSpec::plain(0x920A, "FocalLength"),
        TagSpec::plain(0x9214, "SubjectArea"),
        TagSpec::plain(0x927C, "MakerNote"),
        TagSpec::formatted(0x9286, "UserComment", make_string_uc),
        TagSpec::plain(0x9290, "SubSecTime"),
        TagSpec::plain(0x9291, "SubSecTimeOriginal"),
        TagSpec::plain(0x9292, "SubSecTimeDigitized"),
        TagSpec::formatted(0x9C9B, "XPTitle", make_utf16_string),
        TagSpec::formatted(0x9C9C, "XPComment", make_utf16_string),
        TagSpec::formatted(0x9C9D, "XPAuthor", make_utf16_string),
        TagSpec::formatted(0x9C9E, "XPKeywords", make_utf16_string),
        TagSpec::formatted(0x9C9F, "XPSubject", make_utf16_string),
        TagSpec::formatted(0xA000, "FlashPixVersion", make_string),
        TagSpec::mapped(0xA001, "ColorSpace", COLOR_SPACE),
        TagSpec::plain(0xA002, "ExifImageWidth"),
        TagSpec::plain(0xA003, "ExifImageLength"),
        TagSpec::plain(0xA004, "RelatedSoundFile"),
        TagSpec::plain(0xA005, "InteroperabilityOffset"),
        TagSpec::plain(0xA20B, "FlashEnergy"),
        TagSpec::plain(0xA20C, "SpatialFrequencyResponse"),
        TagSpec::plain(0xA20E, "FocalPlaneXResolution"),
        TagSpec::plain(0xA20F, "FocalPlaneYResolution"),
        TagSpec::mapped(0xA210, "FocalPlaneResolutionUnit", RESOLUTION_UNIT),
        TagSpec::plain(0xA214, "SubjectLocation"),
        TagSpec::plain(0xA215, "ExposureIndex"),
        TagSpec::mapped(0xA217, "SensingMethod", SENSING_METHOD),
        TagSpec::mapped(0xA300, "FileSource", FILE_SOURCE),
        TagSpec::mapped(0xA301, "SceneType", SCENE_TYPE),
        TagSpec::plain(0xA302, "CVAPattern"),
        TagSpec::mapped(0xA401, "CustomRendered", CUSTOM_RENDERED),
        TagSpec::mapped(0xA402, "ExposureMode", EXPOSURE_MODE),
        TagSpec::mapped(0xA403, "WhiteBalance", WHITE_BALANCE),
        TagSpec::plain(0xA404, "DigitalZoomRatio"),
        TagSpec::plain(0xA405, "FocalLengthIn35mmFilm"),
        TagSpec::mapped(0xA406, "SceneCaptureType", SCENE_CAPTURE_TYPE),
        TagSpec::mapped(0xA407, "GainControl", GAIN_CONTROL),
        TagSpec::mapped(0xA408, "Contrast", NORMAL_SOFT_HARD),
        TagSpec::mapped(0xA409, "Saturation", NORMAL_LOW_HIGH),
        TagSpec::mapped(0xA40A, "Sharpness", NORMAL_SOFT_HARD),
        TagSpec::plain(0xA40B, "DeviceSettingDescription"),
        TagSpec::mapped(0xA40C, "SubjectDistanceRange", SUBJECT_DISTANCE_RANGE),
        TagSpec::plain(0xA420, "ImageUniqueID"),
        TagSpec::plain(0xA430, "CameraOwnerName"),
        TagSpec::plain(0xA431, "BodySerialNumber"),
        TagSpec::plain(0xA432, "LensSpecification"),
        TagSpec::plain(0xA433, "LensMake"),
        TagSpec::plain(0xA434, "LensModel"),
        TagSpec::plain(0xA435, "LensSerialNumber"),
        TagSpec::plain(0xA500, "Gamma"),
        TagSpec::plain(0xC4A5, "PrintIM"),
        TagSpec::plain(0xEA1C, "Padding"),
        TagSpec::plain(0xEA1D, "OffsetSchema"),
    ],
);

// =============================================================================
// GPS
// =============================================================================

/// Tags of the GPS IFD.
pub static GPS_TAGS: TagTable = TagTable::new(
    "GPS",
    &[
        TagSpec::plain(0x0000, "GPSVersionID"),
        TagSpec::plain(0x0001, "GPSLatitudeRef"),
        TagSpec::plain(0x0002, "GPSLatitude"),
        TagSpec::plain(0x0003, "GPSLongitudeRef"),
        TagSpec::plain(0x0004, "GPSLongitude"),
        TagSpec::mapped(0x0005, "GPSAltitudeRef", GPS_ALTITUDE_REF),
        TagSpec::plain(0x0006, "GPSAltitude"),
        TagSpec::plain(0x0007, "GPSTimeStamp"),
        TagSpec::plain(0x0008, "GPSSatellites"),
        TagSpec::plain(0x0009, "GPSStatus"),
        TagSpec::plain(0x000A, "GPSMeasureMode"),
        TagSpec::plain(0x000B, "GPSDOP"),
        TagSpec::plain(0x000C, "GPSSpeedRef"),
        TagSpec::plain(0x000D, "GPSSpeed"),
        TagSpec::plain(0x000E, "GPSTrackRef"),
        TagSpec::plain(0x000F, "GPSTrack"),
        TagSpec::plain(0x0010, "GPSImgDirectionRef"),
        TagSpec::plain(0x0011, "GPSImgDirection"),
        TagSpec::plain(0x0012, "GPSMapDatum"),
        TagSpec::plain(0x0013, "GPSDestLatitudeRef"),
        TagSpec::plain(0x0014, "GPSDestLatitude"),
        TagSpec::plain(0x0015, "GPSDestLongitudeRef"),
        TagSpec::plain(0x0016, "GPSDestLongitude"),
        TagSpec::plain(0x0017, "GPSDestBearingRef"),
        TagSpec::plain(0x0018, "GPSDestBearing"),
        TagSpec::plain(0x0019, "GPSDestDistanceRef"),
        TagSpec::plain(0x001A, "GPSDestDistance"),
        TagSpec::formatted(0x001B, "GPSProcessingMethod", make_string_uc),
        TagSpec::formatted(0x001C, "GPSAreaInformation", make_string_uc),
        TagSpec::plain(0x001D, "GPSDate"),
        TagSpec::mapped(0x001E, "GPSDifferential", GPS_DIFFERENTIAL),
    ],
);

// =============================================================================
// Interoperability
// =============================================================================

/// Tags of the Interoperability IFD.
pub static INTEROP_TAGS: TagTable = TagTable::new(
    "Interoperability",
    &[
        TagSpec::plain(0x0001, "InteroperabilityIndex"),
        TagSpec::formatted(0x0002, "InteroperabilityVersion", make_string),
        TagSpec::plain(0x1000, "RelatedImageFileFormat"),
        TagSpec::plain(0x1001, "RelatedImageWidth"),
        TagSpec::plain(0x1002, "RelatedImageLength"),
    ],
);
