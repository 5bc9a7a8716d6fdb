//! Geometry model: points, figures and the container tree.

mod container;
mod error;
mod fields;
mod figure;
pub mod figures;
mod point;

pub use container::{Container, Node};
pub use error::GeometryError;
pub use fields::{ArgMapping, FieldKind, FieldSchema, FieldSpec, FigureArgs, Value};
pub use figure::{DrawInfo, DrawMethod, Figure, FigureType};
pub use point::{IntPoint, Point};
