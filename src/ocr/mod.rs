//! Recognizer-facing data contract.
//!
//! The recognizer itself lives outside this crate. This module defines the
//! records it hands over and an adapter for Tesseract's TSV output.

pub mod region;
pub mod tsv;

pub use region::{BoundingBox, Point, TextRegion};
pub use tsv::{parse_tsv_regions, read_tsv_regions};
