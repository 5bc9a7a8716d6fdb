//! Vertex-based figures: lines, triangles, rectangles and regular polygons.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal::prelude::ToPrimitive;

use crate::model::error::GeometryError;
use crate::model::fields::{ArgMapping, FieldKind, FieldSchema, FieldSpec, FigureArgs, Value};
use crate::model::figure::{DrawMethod, Figure, FigureType};
use crate::model::point::Point;

use super::{MAX_VERTICES, extent};

/// Straight segment between two points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

impl Figure for Line {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn draw_method(&self) -> DrawMethod {
        DrawMethod::PointsOpen
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("start", Value::Point(self.start)),
            ("end", Value::Point(self.end)),
        ]
    }

    fn draw_points(&self) -> Vec<Point> {
        vec![self.start, self.end]
    }

    fn clone_box(&self) -> Box<dyn Figure> {
        Box::new(self.clone())
    }
}

impl FigureType for Line {
    const NAME: &'static str = "Line";

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::new("start", FieldKind::Point),
            FieldSpec::new("end", FieldKind::Point),
        ])
    }

    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError> {
        Ok(Self::new(args.point("start")?, args.point("end")?))
    }
}

/// Field names of a triangle, in constructor order.
const TRIANGLE_VERTICES: &[&str] = &["a", "b", "c"];

/// Closed polygon through exactly three points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triangle {
    points: [Point; 3],
}

impl Triangle {
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        let found = points.len();
        let points: [Point; 3] = points
            .try_into()
            .map_err(|_| GeometryError::WrongPointCount {
                figure: Self::NAME,
                expected: 3,
                found,
            })?;
        Ok(Self { points })
    }
}

impl Figure for Triangle {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn draw_method(&self) -> DrawMethod {
        DrawMethod::PointsClosed
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        TRIANGLE_VERTICES
            .iter()
            .zip(self.points)
            .map(|(name, p)| (*name, Value::Point(p)))
            .collect()
    }

    fn draw_points(&self) -> Vec<Point> {
        self.points.to_vec()
    }

    fn clone_box(&self) -> Box<dyn Figure> {
        Box::new(self.clone())
    }
}

impl FigureType for Triangle {
    const NAME: &'static str = "Triangle";

    fn schema() -> FieldSchema {
        FieldSchema::new(
            TRIANGLE_VERTICES
                .iter()
                .map(|name| FieldSpec::new(*name, FieldKind::Point))
                .collect(),
        )
        .with_mapping(ArgMapping::Positional(TRIANGLE_VERTICES))
    }

    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError> {
        Self::new(args.points()?)
    }
}

/// Axis-aligned rectangle with its top-left corner at the container origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    side_length_1: Decimal,
    side_length_2: Decimal,
}

impl Rectangle {
    pub fn new(
        side_length_1: impl Into<Decimal>,
        side_length_2: impl Into<Decimal>,
    ) -> Result<Self, GeometryError> {
        let side_length_1 = extent("side_length_1", side_length_1.into())?;
        let side_length_2 = extent("side_length_2", side_length_2.into())?;
        Ok(Self {
            side_length_1,
            side_length_2,
        })
    }
}

impl Figure for Rectangle {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn draw_method(&self) -> DrawMethod {
        DrawMethod::PointsClosed
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("side_length_1", Value::Decimal(self.side_length_1)),
            ("side_length_2", Value::Decimal(self.side_length_2)),
        ]
    }

    fn draw_points(&self) -> Vec<Point> {
        box_corners(self.side_length_1, self.side_length_2)
    }

    fn clone_box(&self) -> Box<dyn Figure> {
        Box::new(self.clone())
    }
}

impl FigureType for Rectangle {
    const NAME: &'static str = "Rectangle";

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::new("side_length_1", FieldKind::Decimal).labeled("width"),
            FieldSpec::new("side_length_2", FieldKind::Decimal).labeled("height"),
        ])
    }

    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError> {
        Self::new(args.decimal("side_length_1")?, args.decimal("side_length_2")?)
    }
}

/// Rectangle with equal sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    side_length: Decimal,
}

impl Square {
    pub fn new(side_length: impl Into<Decimal>) -> Result<Self, GeometryError> {
        Ok(Self {
            side_length: extent("side_length", side_length.into())?,
        })
    }
}

impl Figure for Square {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn draw_method(&self) -> DrawMethod {
        DrawMethod::PointsClosed
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![("side_length", Value::Decimal(self.side_length))]
    }

    fn draw_points(&self) -> Vec<Point> {
        box_corners(self.side_length, self.side_length)
    }

    fn clone_box(&self) -> Box<dyn Figure> {
        Box::new(self.clone())
    }
}

impl FigureType for Square {
    const NAME: &'static str = "Square";

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![FieldSpec::new("side_length", FieldKind::Decimal)])
    }

    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError> {
        Self::new(args.decimal("side_length")?)
    }
}

/// Regular `n`-gon inscribed in a circle of `radius`, first vertex pointing up.
///
/// Serialized under the name `Polygon`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegularPolygon {
    n: u32,
    radius: Decimal,
}

impl RegularPolygon {
    pub fn new(n: u32, radius: impl Into<Decimal>) -> Result<Self, GeometryError> {
        if n == 0 {
            return Err(GeometryError::non_positive("n", n));
        }
        if n > MAX_VERTICES {
            return Err(GeometryError::TooLarge {
                field: "n",
                value: n.to_string(),
                max: MAX_VERTICES.to_string(),
            });
        }
        Ok(Self {
            n,
            radius: extent("radius", radius.into())?,
        })
    }
}

impl Figure for RegularPolygon {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn draw_method(&self) -> DrawMethod {
        DrawMethod::PointsClosed
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("n", Value::Decimal(Decimal::from(self.n))),
            ("radius", Value::Decimal(self.radius)),
        ]
    }

    fn draw_points(&self) -> Vec<Point> {
        let step = Decimal::TWO_PI / Decimal::from(self.n);
        (0..self.n)
            .map(|i| {
                let angle = step * Decimal::from(i) - Decimal::HALF_PI;
                Point::new(self.radius * angle.cos(), self.radius * angle.sin())
            })
            .collect()
    }

    fn clone_box(&self) -> Box<dyn Figure> {
        Box::new(self.clone())
    }
}

impl FigureType for RegularPolygon {
    const NAME: &'static str = "Polygon";

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::new("n", FieldKind::Integer).labeled("vertices"),
            FieldSpec::new("radius", FieldKind::Decimal),
        ])
    }

    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError> {
        let n = args.decimal("n")?;
        if !n.fract().is_zero() {
            return Err(GeometryError::NotInteger {
                field: "n",
                value: n.to_string(),
            });
        }
        if n <= Decimal::ZERO {
            return Err(GeometryError::non_positive("n", n));
        }
        let count = n.to_u32().ok_or_else(|| GeometryError::TooLarge {
            field: "n",
            value: n.to_string(),
            max: MAX_VERTICES.to_string(),
        })?;
        Self::new(count, args.decimal("radius")?)
    }
}

fn box_corners(width: Decimal, height: Decimal) -> Vec<Point> {
    vec![
        Point::ORIGIN,
        Point::new(width, Decimal::ZERO),
        Point::new(width, height),
        Point::new(Decimal::ZERO, height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::point::IntPoint;
    use std::collections::HashMap;

    #[test]
    fn test_triangle_requires_three_points() {
        let err = Triangle::new(vec![Point::ORIGIN, Point::new(1, 1)]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::WrongPointCount {
                figure: "Triangle",
                expected: 3,
                found: 2,
            }
        );
        assert!(Triangle::new(vec![Point::ORIGIN; 4]).is_err());
    }

    #[test]
    fn test_triangle_positional_args() {
        let mut values = HashMap::new();
        values.insert("b".to_string(), Value::Point(Point::new(30, 60)));
        values.insert("a".to_string(), Value::Point(Point::new(40, 20)));
        values.insert("c".to_string(), Value::Point(Point::new(50, 60)));

        let args = Triangle::schema().map_args(values).unwrap();
        let triangle = Triangle::from_args(&args).unwrap();
        assert_eq!(
            triangle.draw_points(),
            vec![Point::new(40, 20), Point::new(30, 60), Point::new(50, 60)]
        );
    }

    #[test]
    fn test_rectangle_vertices() {
        let rect = Rectangle::new(80, 10).unwrap();
        assert_eq!(
            rect.draw_points(),
            vec![
                Point::new(0, 0),
                Point::new(80, 0),
                Point::new(80, 10),
                Point::new(0, 10)
            ]
        );
        assert_eq!(rect.draw_method(), DrawMethod::PointsClosed);
    }

    #[test]
    fn test_rectangle_rejects_zero_side() {
        assert!(matches!(
            Rectangle::new(80, 0),
            Err(GeometryError::NonPositive { field: "side_length_2", .. })
        ));
        assert!(Square::new(-1).is_err());
    }

    #[test]
    fn test_line_is_open() {
        let line = Line::new(Point::new(0, 0), Point::new(30, 30));
        assert_eq!(line.draw_method(), DrawMethod::PointsOpen);
        assert_eq!(line.draw_points().len(), 2);
    }

    #[test]
    fn test_regular_polygon_vertices() {
        let square = RegularPolygon::new(4, 10).unwrap();
        let vertices: Vec<IntPoint> = square.draw_points().into_iter().map(|p| p.to_int()).collect();
        assert_eq!(
            vertices,
            vec![
                IntPoint::new(0, -10),
                IntPoint::new(10, 0),
                IntPoint::new(0, 10),
                IntPoint::new(-10, 0)
            ]
        );
    }

    #[test]
    fn test_regular_polygon_rejects_bad_count() {
        assert!(RegularPolygon::new(0, 5).is_err());

        let mut values = HashMap::new();
        values.insert("n".to_string(), Value::Decimal(Decimal::new(25, 1)));
        values.insert("radius".to_string(), Value::Decimal(Decimal::ONE));
        let args = FigureArgs::Named(values);
        assert!(matches!(
            RegularPolygon::from_args(&args),
            Err(GeometryError::NotInteger { .. })
        ));
    }

    #[test]
    fn test_oversized_sizes_are_rejected() {
        assert!(matches!(
            Square::new(Decimal::from(10_000_000)),
            Err(GeometryError::TooLarge { field: "side_length", .. })
        ));
        assert!(matches!(
            RegularPolygon::new(MAX_VERTICES + 1, 1),
            Err(GeometryError::TooLarge { field: "n", .. })
        ));
        assert!(RegularPolygon::new(MAX_VERTICES, 1).is_ok());

        let mut values = HashMap::new();
        values.insert("n".to_string(), Value::Decimal(Decimal::from(u64::MAX)));
        values.insert("radius".to_string(), Value::Decimal(Decimal::ONE));
        let args = RegularPolygon::schema().map_args(values).unwrap();
        assert!(matches!(
            RegularPolygon::from_args(&args),
            Err(GeometryError::TooLarge { field: "n", .. })
        ));
    }

    #[test]
    fn test_regular_polygon_display_name() {
        let polygon = RegularPolygon::new(6, 3).unwrap();
        assert_eq!(polygon.display_name(), "Polygon");
    }
}
