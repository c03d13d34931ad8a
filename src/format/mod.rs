//! Container formats carrying EXIF metadata.
//!
//! This module provides the low-level structure parsers: TIFF headers and
//! directories, and the JPEG segment table that wraps EXIF in JPEG files.
//!
//! # Format Detection
//!
//! Use [`detect::sniff`] to classify a file and locate its TIFF header.
//! Currently supported containers:
//!
//! - **TIFF**: `II*\0` / `MM\0*` magic, metadata at offset 0
//! - **JPEG**: SOI magic, metadata in the `Exif` APP1 segment

pub mod detect;
pub mod jpeg;
pub mod tiff;

pub use detect::{is_tiff_header, sniff, ContainerFormat, ContainerInfo};
