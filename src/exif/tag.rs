//! Decoded tag records.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::format::tiff::{FieldType, TagValues};

/// Decoded tags, keyed by `"<IFD name> <tag name>"`.
pub type TagMap = BTreeMap<String, DecodedTag>;

/// One decoded tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedTag {
    /// Name of the directory the tag came from
    pub ifd: String,

    /// Tag id, `None` for values synthesized from a vendor sub-record
    pub tag_id: Option<u16>,

    /// Tag name from the registry, or `Tag 0xNNNN`
    pub name: String,

    /// Field type of the entry, `None` for synthesized values
    pub field_type: Option<FieldType>,

    /// Decoded values
    pub values: TagValues,

    /// Raw printable form of the values
    pub printable: String,

    /// Registry label, when the tag has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Header-relative offset of the value (or of the entry's value field
    /// for inline values)
    pub field_offset: u64,

    /// Length of the value in bytes
    pub field_length: u64,
}

impl DecodedTag {
    /// A tag whose value was produced by decoding another tag.
    pub fn synthesized(ifd: &str, name: &str, values: TagValues, label: Option<String>) -> Self {
        Self {
            ifd: ifd.to_string(),
            tag_id: None,
            name: name.to_string(),
            field_type: None,
            printable: values.printable(),
            values,
            label,
            field_offset: 0,
            field_length: 0,
        }
    }

    /// Map key of this tag.
    pub fn key(&self) -> String {
        format!("{} {}", self.ifd, self.name)
    }

    /// Text shown for the tag: the label when present, else the printable form.
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.printable)
    }

    /// Field type abbreviation for listings (`-` when synthesized).
    pub fn type_abbreviation(&self) -> &'static str {
        self.field_type.map_or("-", FieldType::abbreviation)
    }
}

impl fmt::Display for DecodedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}
