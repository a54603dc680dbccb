//! Markup document scanning for RimWorld definition files
//!
//! # Error Handling Strategy
//!
//! Extraction never fails. A document that cannot be read contributes zero pairs and is
//! logged at debug level; a document with no recognized definitions is not an anomaly at
//! all. Only two shallow patterns are recognized (a `<defName>` leaf and a `Name`
//! attribute on an opening tag), so malformed markup simply matches less.

pub mod defs;

pub use defs::{ExtractMode, extract_definitions, extract_definitions_with_mode, parse_def_file};
