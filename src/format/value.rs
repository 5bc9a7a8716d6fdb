//! Text form of field values.
//!
//! A raw value is classified by its shape: two decimal tokens separated by
//! whitespace form a point, a single decimal token is a scalar, anything else
//! is rejected.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::model::{Point, Value};

const DECIMAL: &str = r"[+-]?\d+(?:\.\d+)?";

static POINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^({DECIMAL})\s+({DECIMAL})$")).expect("point pattern is valid")
});

static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{DECIMAL}$")).expect("decimal pattern is valid"));

/// A raw value that could not be turned into a [`Value`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("value '{0}' is neither a point nor a decimal")]
    Shape(String),

    /// Well-formed, but not representable without rounding
    #[error("value '{0}' exceeds the supported decimal range or precision (28 digits)")]
    Precision(String),
}

/// Render a value the way the serializer writes it.
pub fn serialize_value(value: &Value) -> String {
    value.to_string()
}

/// Classify and parse a raw value string.
///
/// Numbers are parsed exactly: input that would need rounding to fit a
/// decimal is rejected rather than silently changed.
pub fn parse_value(raw: &str) -> Result<Value, ValueError> {
    let raw = raw.trim();
    if let Some(caps) = POINT_PATTERN.captures(raw) {
        let x = parse_decimal(&caps[1], raw)?;
        let y = parse_decimal(&caps[2], raw)?;
        return Ok(Value::Point(Point { x, y }));
    }
    if DECIMAL_PATTERN.is_match(raw) {
        return parse_decimal(raw, raw).map(Value::Decimal);
    }
    Err(ValueError::Shape(raw.to_string()))
}

fn parse_decimal(token: &str, raw: &str) -> Result<Decimal, ValueError> {
    Decimal::from_str_exact(token.strip_prefix('+').unwrap_or(token))
        .map_err(|_| ValueError::Precision(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(
            parse_value("67.3 -59.6"),
            Ok(Value::Point(Point::new(dec("67.3"), dec("-59.6"))))
        );
        assert_eq!(
            parse_value("+1\t\t2"),
            Ok(Value::Point(Point::new(1, 2)))
        );
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_value("5.5"), Ok(Value::Decimal(dec("5.5"))));
        assert_eq!(parse_value("-2"), Ok(Value::Decimal(dec("-2"))));
        assert_eq!(parse_value(" 42 "), Ok(Value::Decimal(dec("42"))));
    }

    #[test]
    fn test_rejects_other_shapes() {
        for raw in ["", "abc", "1 2 3", "1,5", "1e5", "--1"] {
            assert_eq!(parse_value(raw), Err(ValueError::Shape(raw.to_string())), "{raw:?}");
        }
    }

    #[test]
    fn test_rejects_values_that_would_be_rounded() {
        assert!(matches!(
            parse_value("0.123456789012345678901234567891"),
            Err(ValueError::Precision(_))
        ));
        assert!(matches!(
            parse_value("123456789012345678901234567890.5"),
            Err(ValueError::Precision(_))
        ));
        assert!(matches!(
            parse_value("1 99999999999999999999999999999999"),
            Err(ValueError::Precision(_))
        ));
        assert_eq!(
            parse_value("0.1234567890123456789012345678"),
            Ok(Value::Decimal(dec("0.1234567890123456789012345678")))
        );
    }

    #[test]
    fn test_serialize_value() {
        assert_eq!(serialize_value(&Value::Decimal(Decimal::ONE)), "1");
        assert_eq!(serialize_value(&Value::Point(Point::new(3, -1))), "3 -1");
        assert_eq!(
            serialize_value(&Value::Point(Point::new(dec("2.5"), dec("3.14")))),
            "2.5 3.14"
        );
    }
}
