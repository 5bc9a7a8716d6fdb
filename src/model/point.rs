//! Decimal point types.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::GeometryError;

/// A point with exact decimal coordinates (up to 28 significant digits).
///
/// Points are plain values: translation returns a new point and equality
/// compares the numeric value, so `2` and `2.0` are the same coordinate.
/// Translation is checked and fails instead of leaving the decimal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: Decimal,
    pub y: Decimal,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Point = Point {
        x: Decimal::ZERO,
        y: Decimal::ZERO,
    };

    /// Create a point from anything convertible to a decimal.
    pub fn new(x: impl Into<Decimal>, y: impl Into<Decimal>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Translate by `offset`, or `None` if a coordinate leaves the decimal range.
    pub fn checked_translate(self, offset: Point) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(offset.x)?,
            y: self.y.checked_add(offset.y)?,
        })
    }

    /// Translate by `offset`.
    pub fn translate(self, offset: Point) -> Result<Self, GeometryError> {
        self.checked_translate(offset)
            .ok_or_else(|| GeometryError::overflow(self, offset))
    }

    /// Round both coordinates to the nearest integer (ties to even).
    ///
    /// Coordinates outside the `i64` range saturate.
    pub fn to_int(self) -> IntPoint {
        IntPoint {
            x: round_saturating(self.x),
            y: round_saturating(self.y),
        }
    }
}

fn round_saturating(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Renders as the two coordinates separated by a single space (`"3 -1"`).
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

/// A point rounded to integer coordinates, used for pixel output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<IntPoint> for Point {
    fn from(p: IntPoint) -> Self {
        Point::new(p.x, p.y)
    }
}
