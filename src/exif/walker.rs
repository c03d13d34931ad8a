//! IFD walker and tag decoder.
//!
//! Walks the top-level IFD chain of a TIFF stream, decodes every entry into
//! a [`DecodedTag`], and follows the structural pointers to the EXIF SubIFD,
//! the GPS IFD and the Interoperability IFD.
//!
//! # Error Policy
//!
//! Malformed entries (unknown field type, value past the end of the data)
//! are skipped and the rest of the directory is decoded. An unreadable
//! directory ends that directory only. With `strict` set, the first such
//! problem is returned instead.

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::config::DecodeOptions;
use crate::error::TiffError;
use crate::format::tiff::{
    ByteOrder, TiffHeader, TiffTag, ValueReader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE,
};
use crate::io::RangeReader;

use super::registry::{unknown_tag_name, IfdKind, TagTable};
use super::tag::{DecodedTag, TagMap};

/// Pointer from a top-level IFD to the EXIF SubIFD.
const EXIF_POINTER: &str = "ExifOffset";

/// Pointer from a top-level IFD to the GPS IFD.
const GPS_POINTER: &str = "GPSInfo";

/// Pointer from the EXIF SubIFD to the Interoperability IFD.
const INTEROP_POINTER: &str = "InteroperabilityOffset";

/// Value field position within a 12-byte entry.
const ENTRY_VALUE_OFFSET: u64 = 8;

// =============================================================================
// DumpOutcome
// =============================================================================

/// Result of decoding one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpOutcome {
    /// Offset of the next IFD in the chain, 0 at the end
    pub next_ifd_offset: u32,

    /// Entries decoded into tags
    pub decoded: usize,

    /// Malformed entries skipped
    pub skipped: usize,

    /// Whether decoding stopped at the stop tag
    pub stopped: bool,
}

// =============================================================================
// IfdWalker
// =============================================================================

/// Decodes the directories of one TIFF stream into a [`TagMap`].
///
/// All offsets are relative to the TIFF header; the walker reads through a
/// [`ValueReader`] positioned at it.
pub struct IfdWalker<'a> {
    values: ValueReader<'a, dyn RangeReader + 'a>,
    options: &'a DecodeOptions,
    tags: TagMap,
}

impl<'a> IfdWalker<'a> {
    /// Create a walker for a TIFF header at absolute offset `header_offset`.
    pub fn new(
        reader: &'a dyn RangeReader,
        header_offset: u64,
        byte_order: ByteOrder,
        options: &'a DecodeOptions,
    ) -> Self {
        Self {
            values: ValueReader::new(reader, header_offset, byte_order),
            options,
            tags: TagMap::new(),
        }
    }

    /// Reader for header-relative values.
    pub fn values(&self) -> &ValueReader<'a, dyn RangeReader + 'a> {
        &self.values
    }

    pub fn options(&self) -> &DecodeOptions {
        self.options
    }

    /// Tags decoded so far.
    pub fn tags(&self) -> &TagMap {
        &self.tags
    }

    pub fn tag(&self, key: &str) -> Option<&DecodedTag> {
        self.tags.get(key)
    }

    /// Add a tag, replacing any tag with the same key.
    pub fn insert_tag(&mut self, tag: DecodedTag) {
        self.tags.insert(tag.key(), tag);
    }

    pub fn remove_tag(&mut self, key: &str) -> Option<DecodedTag> {
        self.tags.remove(key)
    }

    pub fn into_tags(self) -> TagMap {
        self.tags
    }

    // -------------------------------------------------------------------------
    // IFD chain
    // -------------------------------------------------------------------------

    /// Offset of the first IFD, from the TIFF header.
    pub fn first_ifd_offset(&self) -> Result<u32, TiffError> {
        let bytes = self.values.read_bytes(0, TIFF_HEADER_SIZE)?;
        let header = TiffHeader::parse(&bytes)?;

        if !header.is_standard_version() {
            debug!(version = header.version, "non-standard TIFF version");
        }

        Ok(header.first_ifd_offset)
    }

    /// Offsets of the top-level IFDs, in chain order.
    ///
    /// The chain ends at a zero pointer, at a directory that cannot be read,
    /// or at an offset that was already visited.
    pub fn list_ifds(&self) -> Result<Vec<u32>, TiffError> {
        let mut offset = match self.first_ifd_offset() {
            Ok(offset) => offset,
            Err(err) if self.options.strict => return Err(err),
            Err(err) => {
                warn!(error = %err, "unreadable TIFF header");
                return Ok(Vec::new());
            }
        };

        let mut offsets = Vec::new();
        let mut visited = HashSet::new();

        while offset != 0 {
            if !visited.insert(offset) {
                warn!(offset, "IFD chain loops back to a visited directory");
                break;
            }

            let next = match self.values.read_ifd(offset as u64) {
                Ok(ifd) => ifd.next_ifd_offset,
                Err(err) if self.options.strict => return Err(err),
                Err(err) => {
                    warn!(offset, error = %err, "unreadable IFD ends the chain");
                    break;
                }
            };

            offsets.push(offset);
            offset = next;
        }

        debug!(count = offsets.len(), "IFD chain listed");
        Ok(offsets)
    }

    // -------------------------------------------------------------------------
    // Directory decoding
    // -------------------------------------------------------------------------

    /// Decode the directory at `ifd_offset` as `kind`, naming tags from `table`.
    ///
    /// # Errors
    /// The directory itself cannot be read, or (strict mode only) an entry
    /// is malformed.
    pub fn dump_ifd(
        &mut self,
        ifd_offset: u32,
        kind: IfdKind,
        table: &TagTable,
    ) -> Result<DumpOutcome, TiffError> {
        let ifd = self.values.read_ifd(ifd_offset as u64)?;
        let ifd_name = kind.name();
        let byte_order = self.values.byte_order();

        debug!(
            ifd = %ifd_name,
            offset = ifd_offset,
            entries = ifd.entries.len(),
            table = table.name(),
            "decoding IFD"
        );

        let mut outcome = DumpOutcome {
            next_ifd_offset: ifd.next_ifd_offset,
            ..DumpOutcome::default()
        };

        for (index, entry) in ifd.entries.iter().enumerate() {
            if !self.options.details && TiffTag::is_ignored_without_details(entry.tag) {
                trace!(tag = entry.tag, "skipping detail tag");
                continue;
            }

            let spec = table.lookup(entry.tag);
            let name: Cow<'static, str> = match spec {
                Some(spec) => Cow::Borrowed(spec.name),
                None => Cow::Owned(unknown_tag_name(entry.tag)),
            };

            let values = match self.values.read_values(entry) {
                Ok(values) => values,
                Err(err) if self.options.strict => return Err(err),
                Err(err) => {
                    debug!(ifd = %ifd_name, tag = %name, error = %err, "skipping malformed entry");
                    outcome.skipped += 1;
                    continue;
                }
            };

            let entry_offset =
                ifd_offset as u64 + IFD_COUNT_SIZE as u64 + (index * IFD_ENTRY_SIZE) as u64;
            let field_offset = if entry.is_inline() {
                entry_offset + ENTRY_VALUE_OFFSET
            } else {
                entry.value_offset(byte_order) as u64
            };

            let tag = DecodedTag {
                ifd: ifd_name.to_string(),
                tag_id: Some(entry.tag),
                name: name.to_string(),
                field_type: entry.field_type,
                printable: values.printable(),
                label: spec.and_then(|spec| spec.label_for(&values)),
                values,
                field_offset,
                field_length: entry.value_byte_size().unwrap_or(0),
            };

            trace!(key = %tag.key(), value = tag.display(), "decoded tag");
            self.insert_tag(tag);
            outcome.decoded += 1;

            if self.options.stops_at(&name) {
                debug!(ifd = %ifd_name, tag = %name, "stop tag reached");
                outcome.stopped = true;
                break;
            }
        }

        Ok(outcome)
    }

    /// Like [`IfdWalker::dump_ifd`], but an unreadable directory is logged
    /// and yields `None` unless in strict mode.
    pub fn dump_ifd_lenient(
        &mut self,
        ifd_offset: u32,
        kind: IfdKind,
        table: &TagTable,
    ) -> Result<Option<DumpOutcome>, TiffError> {
        match self.dump_ifd(ifd_offset, kind, table) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) if self.options.strict => Err(err),
            Err(err) => {
                warn!(ifd = %kind, offset = ifd_offset, error = %err, "skipping unreadable IFD");
                Ok(None)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Full walk
    // -------------------------------------------------------------------------

    /// Decode the whole IFD chain plus the EXIF, GPS and Interoperability
    /// directories it points to. Returns the top-level IFD offsets.
    ///
    /// Each sub-directory kind is decoded once, from the first IFD that
    /// points to it.
    pub fn walk(&mut self) -> Result<Vec<u32>, TiffError> {
        let ifds = self.list_ifds()?;
        let mut followed = HashSet::new();

        for (ordinal, &offset) in ifds.iter().enumerate() {
            let kind = IfdKind::top_level(ordinal);
            self.dump_ifd_lenient(offset, kind, kind.tag_table())?;

            self.follow(kind, EXIF_POINTER, IfdKind::Exif, &mut followed)?;
            self.follow(kind, GPS_POINTER, IfdKind::Gps, &mut followed)?;
        }

        Ok(ifds)
    }

    fn follow(
        &mut self,
        parent: IfdKind,
        pointer: &str,
        kind: IfdKind,
        followed: &mut HashSet<IfdKind>,
    ) -> Result<(), TiffError> {
        let Some(offset) = self.pointer_offset(parent, pointer) else {
            return Ok(());
        };

        if !followed.insert(kind) {
            debug!(parent = %parent, ifd = %kind, "sub-IFD already decoded");
            return Ok(());
        }

        self.dump_ifd_lenient(offset, kind, kind.tag_table())?;

        if kind == IfdKind::Exif {
            self.follow(kind, INTEROP_POINTER, IfdKind::Interoperability, followed)?;
        }

        Ok(())
    }

    /// Non-zero offset stored in the pointer tag `name` of `parent`.
    fn pointer_offset(&self, parent: IfdKind, name: &str) -> Option<u32> {
        let tag = self.tags.get(&parent.key(name))?;
        let offset = tag.values.first_integer()?;
        u32::try_from(offset).ok().filter(|&offset| offset != 0)
    }
}

// =============================================================================
// Tests
// =============================================================================
