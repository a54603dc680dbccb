//! Data models for RimWorld definition indexing.
//!
//! - [`DefTypeMapping`] / [`DEF_TYPES`] - the fixed table of recognized definition tags
//! - [`Identifier`] - a (type key, defName) pair pulled out of a markup document
//! - [`ScanTarget`] - one `Defs` directory to walk
//! - [`Suggestion`] - an autocomplete item handed back to the editor host

pub mod definition;
pub mod scan_target;
pub mod suggestion;

pub use definition::{DEF_TYPES, DefTypeMapping, Identifier, def_type_for_tag};
pub use scan_target::ScanTarget;
pub use suggestion::Suggestion;
