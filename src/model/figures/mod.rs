//! Built-in figure types.
//!
//! Radii and side lengths are limited to [`MAX_EXTENT`] so that pixel
//! sampling stays bounded and never leaves the decimal range.

mod circle;
mod polygon;

use rust_decimal::Decimal;

use crate::model::error::GeometryError;

pub use circle::{Circle, Ellipse};
pub use polygon::{Line, Rectangle, RegularPolygon, Square, Triangle};

/// Largest accepted radius or side length.
pub const MAX_EXTENT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest accepted vertex count of a [`RegularPolygon`].
pub const MAX_VERTICES: u32 = 100_000;

/// Check a size field: strictly positive and at most [`MAX_EXTENT`].
fn extent(field: &'static str, value: Decimal) -> Result<Decimal, GeometryError> {
    if value <= Decimal::ZERO {
        return Err(GeometryError::non_positive(field, value));
    }
    if value > MAX_EXTENT {
        return Err(GeometryError::TooLarge {
            field,
            value: value.to_string(),
            max: MAX_EXTENT.to_string(),
        });
    }
    Ok(value)
}
