//! Drawing persistence: figure registry, text codec and the document boundary.
//!
//! ## Text format
//!
//! Each node starts with a tag line; its fields follow one tab deeper as
//! `name: value` lines. A container writes its `coordinates` field, then an
//! `items:` marker, then each child one tab deeper than the marker:
//!
//! ```text
//! Container
//!     coordinates: 5 5
//!     items:
//!         Circle
//!             radius: 2
//! ```
//!
//! (Indentation is shown with spaces here; the format uses tabs only.)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vecdraw::format::{Document, FigureRegistry};
//! use vecdraw::pipeline::Pipeline;
//!
//! let registry = FigureRegistry::new();
//! let outcome = Document::load(path, &registry, &Pipeline::empty())?;
//! for warning in &outcome.warnings {
//!     log::warn!("{}", warning);
//! }
//! ```

mod deserializer;
mod document;
mod error;
mod registry;
mod serializer;
mod value;
mod warning;

#[cfg(test)]
mod tests;

pub use deserializer::{Deserializer, MAX_NESTING_LEVEL, decode};
pub use document::{Document, DocumentError, LoadOutcome};
pub use error::FormatError;
pub use registry::{FigureEntry, FigureFactory, FigureRegistry};
pub use serializer::{
    CONTAINER_TAG, COORDINATES_FIELD, ITEMS_MARKER, TextSerializer, serialize, serialize_container,
};
pub use value::{ValueError, parse_value, serialize_value};
pub use warning::{FormatWarning, WarningSeverity};
