//! Tag name registry.
//!
//! Maps `(directory kind, tag id)` to a human-readable name and an optional
//! way of rendering the values: either a value→label table or a formatting
//! function. The tables themselves are static data in [`super::tables`] and
//! in the MakerNote vendor modules.

use std::borrow::Cow;
use std::fmt;

use crate::format::tiff::TagValues;

use super::tables::{EXIF_TAGS, GPS_TAGS, INTEROP_TAGS};

// =============================================================================
// IfdKind
// =============================================================================

/// The kind of directory being decoded. Determines the key prefix of every
/// tag it produces and the default tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IfdKind {
    /// First top-level IFD: the primary image
    Image,
    /// Second top-level IFD: the thumbnail
    Thumbnail,
    /// Further top-level IFDs, by ordinal (2, 3, ...)
    Ifd(usize),
    /// EXIF SubIFD
    Exif,
    /// GPS IFD
    Gps,
    /// Interoperability IFD inside the EXIF SubIFD
    Interoperability,
    /// Vendor MakerNote directory
    MakerNote,
}

impl IfdKind {
    /// Kind of the top-level IFD at position `ordinal` in the chain.
    pub const fn top_level(ordinal: usize) -> Self {
        match ordinal {
            0 => IfdKind::Image,
            1 => IfdKind::Thumbnail,
            n => IfdKind::Ifd(n),
        }
    }

    /// Name used as the key prefix.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            IfdKind::Image => Cow::Borrowed("Image"),
            IfdKind::Thumbnail => Cow::Borrowed("Thumbnail"),
            IfdKind::Ifd(n) => Cow::Owned(format!("IFD {n}")),
            IfdKind::Exif => Cow::Borrowed("EXIF"),
            IfdKind::Gps => Cow::Borrowed("GPS"),
            IfdKind::Interoperability => Cow::Borrowed("EXIF Interoperability"),
            IfdKind::MakerNote => Cow::Borrowed("MakerNote"),
        }
    }

    /// Default tag table for this kind of directory.
    ///
    /// MakerNote directories have no default; the vendor decoder supplies one.
    pub fn tag_table(&self) -> &'static TagTable {
        match self {
            IfdKind::Gps => &GPS_TAGS,
            IfdKind::Interoperability => &INTEROP_TAGS,
            _ => &EXIF_TAGS,
        }
    }

    /// Map key for a tag of this directory: `"<IFD name> <tag name>"`.
    pub fn key(&self, tag_name: &str) -> String {
        format!("{} {}", self.name(), tag_name)
    }
}

impl fmt::Display for IfdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

// =============================================================================
// TagLabel / TagSpec
// =============================================================================

/// Value→label table. Keys are compared against the raw value.
pub type LabelMap = &'static [(i64, &'static str)];

/// How a tag's values are rendered for display.
#[derive(Debug, Clone, Copy)]
pub enum TagLabel {
    /// Raw printable form only
    None,
    /// One label per value, looked up in a table
    Map(LabelMap),
    /// Custom rendering of the whole value list
    Format(fn(&TagValues) -> String),
}

/// Registry entry for one tag id.
#[derive(Debug, Clone, Copy)]
pub struct TagSpec {
    pub id: u16,
    pub name: &'static str,
    pub label: TagLabel,
}

impl TagSpec {
    pub const fn plain(id: u16, name: &'static str) -> Self {
        Self {
            id,
            name,
            label: TagLabel::None,
        }
    }

    pub const fn mapped(id: u16, name: &'static str, map: LabelMap) -> Self {
        Self {
            id,
            name,
            label: TagLabel::Map(map),
        }
    }

    pub const fn formatted(id: u16, name: &'static str, format: fn(&TagValues) -> String) -> Self {
        Self {
            id,
            name,
            label: TagLabel::Format(format),
        }
    }

    /// Display label for decoded values, `None` if the tag has no label rule.
    ///
    /// Mapped labels are concatenated, one per value; values missing from
    /// the table render as their number.
    pub fn label_for(&self, values: &TagValues) -> Option<String> {
        match self.label {
            TagLabel::None => None,
            TagLabel::Format(format) => Some(format(values)),
            TagLabel::Map(map) => {
                let integers = values.as_integers()?;
                Some(
                    integers
                        .iter()
                        .map(|&value| match lookup_label(map, value) {
                            Some(label) => Cow::Borrowed(label),
                            None => Cow::Owned(value.to_string()),
                        })
                        .collect(),
                )
            }
        }
    }
}

/// Find the label for `value`.
///
/// Tables written with negative keys describe signed 16-bit fields that are
/// stored as unsigned shorts, so a miss is retried with that reinterpretation.
pub fn lookup_label(map: LabelMap, value: i64) -> Option<&'static str> {
    let find = |wanted: i64| {
        map.iter()
            .find(|(key, _)| *key == wanted)
            .map(|(_, label)| *label)
    };

    find(value).or_else(|| {
        if (0x8000..=0xFFFF).contains(&value) {
            find(value as u16 as i16 as i64)
        } else {
            None
        }
    })
}

// =============================================================================
// TagTable
// =============================================================================

/// A static table of tag specs, sorted by id.
#[derive(Debug)]
pub struct TagTable {
    name: &'static str,
    specs: &'static [TagSpec],
}

impl TagTable {
    pub const fn new(name: &'static str, specs: &'static [TagSpec]) -> Self {
        Self { name, specs }
    }

    /// Name of the table, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn specs(&self) -> &'static [TagSpec] {
        self.specs
    }

    /// Look up a tag id.
    pub fn lookup(&self, id: u16) -> Option<&'static TagSpec> {
        self.specs
            .binary_search_by_key(&id, |spec| spec.id)
            .ok()
            .map(|index| &self.specs[index])
    }

    /// Name of a tag id, synthesized as `Tag 0xNNNN` when unknown.
    pub fn tag_name(&self, id: u16) -> Cow<'static, str> {
        match self.lookup(id) {
            Some(spec) => Cow::Borrowed(spec.name),
            None => Cow::Owned(unknown_tag_name(id)),
        }
    }
}

/// Name given to tags missing from the registry.
pub fn unknown_tag_name(id: u16) -> String {
    format!("Tag 0x{id:04X}")
}

// =============================================================================
// Label functions
// =============================================================================

/// Render byte values as text, keeping printable characters only.
///
/// Falls back to the raw printable form when nothing printable remains.
pub fn make_string(values: &TagValues) -> String {
    match values {
        TagValues::Ascii(s) => s.clone(),
        TagValues::Integers(bytes) => printable_chars(bytes).unwrap_or_else(|| values.printable()),
        TagValues::Ratios(_) => values.printable(),
    }
}

/// Render a UserComment: drop the 8-byte character code, keep printable text.
pub fn make_string_uc(values: &TagValues) -> String {
    match values {
        TagValues::Integers(bytes) => {
            let text = bytes.get(8..).unwrap_or(&[]);
            printable_chars(text).unwrap_or_default()
        }
        other => make_string(other),
    }
}

/// Render UTF-16LE byte values (Windows XP* tags) as text.
pub fn make_utf16_string(values: &TagValues) -> String {
    let Some(bytes) = values.as_integers() else {
        return make_string(values);
    };
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0] as u8, pair[1] as u8]))
        .take_while(|&unit| unit != 0)
        .collect();
    String::from_utf16_lossy(&units)
}

fn printable_chars(bytes: &[i64]) -> Option<String> {
    let text: String = bytes
        .iter()
        .filter(|&&b| (32..256).contains(&b))
        .map(|&b| char::from(b as u8))
        .collect();
    (!text.is_empty()).then_some(text)
}

// =============================================================================
// Tests
// =============================================================================
