//! # EXIF Decoder
//!
//! A metadata-tag decoder for TIFF and JPEG/EXIF images.
//!
//! This library reads the TIFF structure embedded in a file, decodes every
//! directory entry into a named, human-readable tag, and understands the
//! Canon MakerNote. Files are read through positional range reads with a
//! block cache, so only the bytes the directories point to are fetched.
//!
//! ## Features
//!
//! - **Container detection**: bare TIFF (`II`/`MM`) and JPEG with an `Exif` APP1 segment
//! - **Full IFD walk**: image and thumbnail IFDs, EXIF SubIFD, GPS and Interoperability
//! - **Tag registry**: names and value labels for standard EXIF, GPS and Interoperability tags
//! - **Canon MakerNote**: settings arrays and model-specific CameraInfo records
//! - **Thumbnails**: raw JPEG or uncompressed TIFF strip thumbnails
//!
//! ## Architecture
//!
//! - [`io`] - Range readers and block caching
//! - [`mod@format`] - Container sniffing, TIFF structures and value decoding
//! - [`exif`] - Tag registry, IFD walker, MakerNote decoders, thumbnails
//! - [`config`] - Decode options and CLI configuration
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_decoder::{process_file, DecodeOptions};
//!
//! let options = DecodeOptions::default().with_stop_tag("DateTimeOriginal");
//! let data = process_file("IMG_0001.JPG", &options)?;
//!
//! for (key, tag) in &data.tags {
//!     println!("{key} ({}): {tag}", tag.type_abbreviation());
//! }
//! # Ok::<(), exif_decoder::ExifError>(())
//! ```

pub mod config;
pub mod error;
pub mod exif;
pub mod format;
pub mod io;

// Re-export commonly used types
pub use config::{Config, DecodeOptions};
pub use error::{ExifError, IoError, TiffError};
pub use exif::{
    extract_thumbnail, open_file, process, process_file, process_reader, DecodedTag, ExifData,
    IfdKind, IfdWalker, TagMap, Thumbnail, ThumbnailKind,
};
pub use format::tiff::{ByteOrder, FieldType, Ratio, TagValues};
pub use format::{sniff, ContainerFormat, ContainerInfo};
pub use io::{BlockCache, RangeReader, SeekReader, SliceReader};
