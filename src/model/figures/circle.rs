//! Circle and ellipse, both drawn as sampled pixels.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal::prelude::ToPrimitive;

use crate::model::error::GeometryError;
use crate::model::fields::{FieldKind, FieldSchema, FieldSpec, FigureArgs, Value};
use crate::model::figure::{DrawMethod, Figure, FigureType};
use crate::model::point::Point;

use super::extent;

/// Circle centred on its container's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circle {
    radius: Decimal,
}

impl Circle {
    pub fn new(radius: impl Into<Decimal>) -> Result<Self, GeometryError> {
        Ok(Self {
            radius: extent("radius", radius.into())?,
        })
    }

    pub fn radius(&self) -> Decimal {
        self.radius
    }
}

impl Figure for Circle {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn draw_method(&self) -> DrawMethod {
        DrawMethod::Pixels
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![("radius", Value::Decimal(self.radius))]
    }

    /// Walks one axis in whole steps and mirrors each sample into all
    /// eight octants.
    fn draw_points(&self) -> Vec<Point> {
        let r_squared = self.radius * self.radius;
        let mut pixels = Vec::new();
        for dx in axis_steps(self.radius) {
            let dy = (r_squared - dx * dx).sqrt().unwrap_or(Decimal::ZERO);
            mirror_quadrants(&mut pixels, dx, dy);
            mirror_quadrants(&mut pixels, dy, dx);
        }
        pixels
    }

    fn clone_box(&self) -> Box<dyn Figure> {
        Box::new(self.clone())
    }
}

impl FigureType for Circle {
    const NAME: &'static str = "Circle";

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![FieldSpec::new("radius", FieldKind::Decimal)])
    }

    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError> {
        Self::new(args.decimal("radius")?)
    }
}

/// Axis-aligned ellipse centred on its container's origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ellipse {
    radius_x: Decimal,
    radius_y: Decimal,
}

impl Ellipse {
    pub fn new(
        radius_x: impl Into<Decimal>,
        radius_y: impl Into<Decimal>,
    ) -> Result<Self, GeometryError> {
        Ok(Self {
            radius_x: extent("radius_x", radius_x.into())?,
            radius_y: extent("radius_y", radius_y.into())?,
        })
    }
}

impl Figure for Ellipse {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn draw_method(&self) -> DrawMethod {
        DrawMethod::Pixels
    }

    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("radius_x", Value::Decimal(self.radius_x)),
            ("radius_y", Value::Decimal(self.radius_y)),
        ]
    }

    /// Samples along both axes so steep and flat arcs are both covered,
    /// then mirrors into the four quadrants.
    fn draw_points(&self) -> Vec<Point> {
        let mut pixels = Vec::new();
        for dx in axis_steps(self.radius_x) {
            let dy = solve_ellipse(self.radius_y, dx, self.radius_x);
            mirror_quadrants(&mut pixels, dx, dy);
        }
        for dy in axis_steps(self.radius_y) {
            let dx = solve_ellipse(self.radius_x, dy, self.radius_y);
            mirror_quadrants(&mut pixels, dx, dy);
        }
        pixels
    }

    fn clone_box(&self) -> Box<dyn Figure> {
        Box::new(self.clone())
    }
}

impl FigureType for Ellipse {
    const NAME: &'static str = "Ellipse";

    fn schema() -> FieldSchema {
        FieldSchema::new(vec![
            FieldSpec::new("radius_x", FieldKind::Decimal).labeled("horizontal radius"),
            FieldSpec::new("radius_y", FieldKind::Decimal).labeled("vertical radius"),
        ])
    }

    fn from_args(args: &FigureArgs) -> Result<Self, GeometryError> {
        Self::new(args.decimal("radius_x")?, args.decimal("radius_y")?)
    }
}

/// `0, 1, .., floor(limit)` as decimals.
fn axis_steps(limit: Decimal) -> impl Iterator<Item = Decimal> {
    let last = limit.floor().to_u64().unwrap_or(0);
    (0..=last).map(Decimal::from)
}

/// Coordinate on the `coef` axis for a point at `other` on the `other_coef` axis.
fn solve_ellipse(coef: Decimal, other: Decimal, other_coef: Decimal) -> Decimal {
    let ratio = Decimal::ONE - (other * other) / (other_coef * other_coef);
    coef * ratio.max(Decimal::ZERO).sqrt().unwrap_or(Decimal::ZERO)
}

fn mirror_quadrants(out: &mut Vec<Point>, dx: Decimal, dy: Decimal) {
    out.push(Point::new(-dx, -dy));
    out.push(Point::new(dx, -dy));
    out.push(Point::new(-dx, dy));
    out.push(Point::new(dx, dy));
}
