//! Vendor MakerNote dispatch.
//!
//! The MakerNote tag is a vendor-private blob. Decoders are registered per
//! camera make; a make with no decoder is left alone.
//!
//! # Supported Vendors
//!
//! - **Canon**: MakerNote IFD, short-array sub-records, CameraInfo by model

pub mod canon;

use tracing::{debug, trace, warn};

use crate::error::TiffError;

use super::tag::DecodedTag;
use super::walker::IfdWalker;

/// Key of the raw MakerNote tag.
pub const MAKER_NOTE_KEY: &str = "EXIF MakerNote";

/// Key of the camera make.
pub const MAKE_KEY: &str = "Image Make";

/// Key of the camera model.
pub const MODEL_KEY: &str = "Image Model";

/// A vendor decoder: adds tags to the walker from the raw MakerNote tag.
pub type DecodeFn = fn(&mut IfdWalker<'_>, &DecodedTag) -> Result<(), TiffError>;

/// A registered MakerNote vendor.
#[derive(Clone, Copy)]
pub struct Vendor {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub decode: DecodeFn,
}

/// Registered vendors, checked in order.
pub static VENDORS: &[Vendor] = &[Vendor {
    name: "Canon",
    matches: canon::matches_make,
    decode: canon::decode,
}];

/// Find the vendor decoder for a camera make.
pub fn find_vendor(make: &str) -> Option<&'static Vendor> {
    VENDORS.iter().find(|vendor| (vendor.matches)(make))
}

/// Decode the MakerNote of the walked stream, if its vendor is supported.
///
/// Needs the `EXIF MakerNote` and `Image Make` tags. Does nothing when
/// details are off. Vendor errors are logged and dropped unless strict.
pub fn decode_maker_note(walker: &mut IfdWalker<'_>) -> Result<(), TiffError> {
    if !walker.options().details {
        return Ok(());
    }

    let Some(note) = walker.tag(MAKER_NOTE_KEY).cloned() else {
        trace!("no MakerNote");
        return Ok(());
    };
    let Some(make) = walker.tag(MAKE_KEY).map(|tag| tag.display().to_string()) else {
        debug!("MakerNote without camera make");
        return Ok(());
    };
    let Some(vendor) = find_vendor(&make) else {
        debug!(make = %make, "unsupported MakerNote vendor");
        return Ok(());
    };

    debug!(vendor = vendor.name, offset = note.field_offset, "decoding MakerNote");

    match (vendor.decode)(walker, &note) {
        Ok(()) => Ok(()),
        Err(err) if walker.options().strict => Err(err),
        Err(err) => {
            warn!(vendor = vendor.name, error = %err, "MakerNote decoding failed");
            Ok(())
        }
    }
}
