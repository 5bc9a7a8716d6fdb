//! vecdraw - vector drawing persistence
//!
//! Figure trees (circles, polygons, lines and nested containers) saved to and
//! loaded from a tab-indented text format, optionally passed through a chain
//! of byte transforms such as compression and encryption.

pub mod config;
pub mod demo;
pub mod format;
pub mod model;
pub mod pipeline;
pub mod render;
