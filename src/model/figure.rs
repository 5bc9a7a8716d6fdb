//! The figure abstraction and its draw projection.

use std::fmt;

use super::error::GeometryError;
use super::fields::{FieldSchema, FigureArgs, Value};
use super::point::Point;

/// How a [`DrawInfo`] point sequence is meant to be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMethod {
    /// Each point is an individual pixel.
    Pixels,
    /// Points are polygon vertices; the last connects back to the first.
    PointsClosed,
    /// Points form an open polyline.
    PointsOpen,
}

/// Render-ready description of a single figure in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInfo {
    pub method: DrawMethod,
    pub points: Vec<Point>,
}

impl DrawInfo {
    pub fn new(method: DrawMethod, points: Vec<Point>) -> Self {
        Self { method, points }
    }

    /// Shift every point by `offset`.
    pub fn translated(mut self, offset: Point) -> Result<Self, GeometryError> {
        for point in &mut self.points {
            *point = point.translate(offset)?;
        }
        Ok(self)
    }
}

/// A single geometric shape.
///
/// Implementations are immutable values; editing a figure means building a
/// replacement from new field values (see `FigureRegistry::rebuild`).
pub trait Figure: fmt::Debug {
    /// Stable type name, also used as the serialized type tag.
    fn display_name(&self) -> &'static str;

    fn draw_method(&self) -> DrawMethod;

    /// Field values in the order the type's schema declares them.
    fn fields(&self) -> Vec<(&'static str, Value)>;

    /// Sampled pixels or vertices, relative to the owning container.
    fn draw_points(&self) -> Vec<Point>;

    /// Deep copy behind a box.
    fn clone_box(&self) -> Box<dyn Figure>;

    fn draw_info(&self) -> DrawInfo {
        DrawInfo::new(self.draw_method(), self.draw_points())
    }
}

impl Clone for Box<dyn Figure> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Two figures are equal when they have the same type name and field values.
impl PartialEq for dyn Figure {
    fn eq(&self, other: &Self) -> bool {
        self.display_name() == other.display_name() && self.fields() == other.fields()
    }
}

/// A figure type that can be registered and constructed from field values.
pub trait FigureType: Figure + Sized + 'static {
    /// Type name; must match [`Figure::display_name`].
    const NAME: &'static str;

    /// Declared fields and argument mapping.
    fn schema() -> FieldSchema;

    /// Build a figure from mapped constructor arguments.
    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError>;
}
