//! Field values and declarative field schemas for figure types.
//!
//! Every figure type declares an ordered list of named, typed fields. The
//! schema drives both the text codec (emission order, decode validation) and
//! interactive editing. How the collected field values turn into constructor
//! arguments is described by the schema's [`ArgMapping`].

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;

use super::error::GeometryError;
use super::point::Point;

/// A single field value: either a scalar decimal or a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Decimal(Decimal),
    Point(Point),
}

impl Value {
    /// The kind this value naturally has.
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Decimal(_) => FieldKind::Decimal,
            Value::Point(_) => FieldKind::Point,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Point(_) => None,
        }
    }

    pub fn as_point(&self) -> Option<Point> {
        match self {
            Value::Point(p) => Some(*p),
            Value::Decimal(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Point(p) => write!(f, "{}", p),
        }
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point(p)
    }
}

/// Declared type of a figure field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any decimal.
    Decimal,
    /// A decimal with no fractional part (e.g. a vertex count).
    Integer,
    Point,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Decimal => "decimal",
            FieldKind::Integer => "integer",
            FieldKind::Point => "point",
        }
    }

    /// Check whether `value` is acceptable for a field of this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::Decimal, Value::Decimal(_)) => true,
            (FieldKind::Integer, Value::Decimal(d)) => d.fract().is_zero(),
            (FieldKind::Point, Value::Point(_)) => true,
            _ => false,
        }
    }
}

/// One named field of a figure type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Label shown by editing front-ends.
    pub label: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            label: name,
        }
    }

    pub const fn labeled(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }
}

/// How collected field values are mapped to constructor arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgMapping {
    /// Each field is passed under its own name.
    #[default]
    Named,
    /// Fields are passed positionally, in the listed order.
    Positional(&'static [&'static str]),
}

/// Ordered field declaration for a figure type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    fields: Vec<FieldSpec>,
    mapping: ArgMapping,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            mapping: ArgMapping::Named,
        }
    }

    /// Replace the default named mapping.
    pub fn with_mapping(mut self, mapping: ArgMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn mapping(&self) -> ArgMapping {
        self.mapping
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Turn a name→value mapping into constructor arguments.
    ///
    /// Every declared field must be present with a value of the declared
    /// kind, and no undeclared field may appear.
    pub fn map_args(&self, mut values: HashMap<String, Value>) -> Result<FigureArgs, GeometryError> {
        for spec in &self.fields {
            let value = values
                .get(spec.name)
                .ok_or_else(|| GeometryError::missing_argument(spec.name))?;
            if !spec.kind.accepts(value) {
                return Err(GeometryError::WrongArgumentKind {
                    name: spec.name.to_string(),
                    expected: spec.kind.name(),
                    found: value.to_string(),
                });
            }
        }
        if let Some(extra) = values.keys().find(|k| self.field(k).is_none()) {
            return Err(GeometryError::UnexpectedArgument {
                name: extra.clone(),
            });
        }

        match self.mapping {
            ArgMapping::Named => Ok(FigureArgs::Named(values)),
            ArgMapping::Positional(order) => {
                let mut positional = Vec::with_capacity(order.len());
                for name in order {
                    let value = values
                        .remove(*name)
                        .ok_or_else(|| GeometryError::missing_argument(*name))?;
                    positional.push(value);
                }
                Ok(FigureArgs::Positional(positional))
            }
        }
    }
}

/// Constructor arguments produced by [`FieldSchema::map_args`].
#[derive(Debug, Clone, PartialEq)]
pub enum FigureArgs {
    Named(HashMap<String, Value>),
    Positional(Vec<Value>),
}

impl FigureArgs {
    fn named(&self, name: &str) -> Result<&Value, GeometryError> {
        match self {
            FigureArgs::Named(map) => map
                .get(name)
                .ok_or_else(|| GeometryError::missing_argument(name)),
            FigureArgs::Positional(_) => Err(GeometryError::missing_argument(name)),
        }
    }

    /// Fetch a named decimal argument.
    pub fn decimal(&self, name: &str) -> Result<Decimal, GeometryError> {
        let value = self.named(name)?;
        value.as_decimal().ok_or_else(|| GeometryError::WrongArgumentKind {
            name: name.to_string(),
            expected: FieldKind::Decimal.name(),
            found: value.to_string(),
        })
    }

    /// Fetch a named point argument.
    pub fn point(&self, name: &str) -> Result<Point, GeometryError> {
        let value = self.named(name)?;
        value.as_point().ok_or_else(|| GeometryError::WrongArgumentKind {
            name: name.to_string(),
            expected: FieldKind::Point.name(),
            found: value.to_string(),
        })
    }

    /// All positional arguments as points.
    pub fn points(&self) -> Result<Vec<Point>, GeometryError> {
        match self {
            FigureArgs::Positional(values) => values
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    v.as_point().ok_or_else(|| GeometryError::WrongArgumentKind {
                        name: format!("#{}", i),
                        expected: FieldKind::Point.name(),
                        found: v.to_string(),
                    })
                })
                .collect(),
            FigureArgs::Named(_) => Err(GeometryError::missing_argument("positional points")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIANGLE_ORDER: &[&str] = &["a", "b", "c"];

    fn radius_schema() -> FieldSchema {
        FieldSchema::new(vec![FieldSpec::new("radius", FieldKind::Decimal)])
    }

    #[test]
    fn test_integer_kind_rejects_fraction() {
        assert!(FieldKind::Integer.accepts(&Value::Decimal(Decimal::new(50, 1))));
        assert!(!FieldKind::Integer.accepts(&Value::Decimal(Decimal::new(55, 1))));
        assert!(!FieldKind::Integer.accepts(&Value::Point(Point::ORIGIN)));
    }

    #[test]
    fn test_named_mapping() {
        let mut values = HashMap::new();
        values.insert("radius".to_string(), Value::Decimal(Decimal::TWO));

        let args = radius_schema().map_args(values).unwrap();
        assert_eq!(args.decimal("radius").unwrap(), Decimal::TWO);
    }

    #[test]
    fn test_positional_mapping_follows_declared_order() {
        let schema = FieldSchema::new(vec![
            FieldSpec::new("a", FieldKind::Point),
            FieldSpec::new("b", FieldKind::Point),
            FieldSpec::new("c", FieldKind::Point),
        ])
        .with_mapping(ArgMapping::Positional(TRIANGLE_ORDER));

        let mut values = HashMap::new();
        values.insert("c".to_string(), Value::Point(Point::new(3, 3)));
        values.insert("a".to_string(), Value::Point(Point::new(1, 1)));
        values.insert("b".to_string(), Value::Point(Point::new(2, 2)));

        let args = schema.map_args(values).unwrap();
        assert_eq!(
            args.points().unwrap(),
            vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]
        );
    }

    #[test]
    fn test_missing_field() {
        let err = radius_schema().map_args(HashMap::new()).unwrap_err();
        assert!(matches!(err, GeometryError::MissingArgument { ref name } if name == "radius"));
    }

    #[test]
    fn test_wrong_kind() {
        let mut values = HashMap::new();
        values.insert("radius".to_string(), Value::Point(Point::new(1, 1)));

        let err = radius_schema().map_args(values).unwrap_err();
        assert!(matches!(err, GeometryError::WrongArgumentKind { .. }));
    }

    #[test]
    fn test_unexpected_field() {
        let mut values = HashMap::new();
        values.insert("radius".to_string(), Value::Decimal(Decimal::ONE));
        values.insert("colour".to_string(), Value::Decimal(Decimal::ONE));

        let err = radius_schema().map_args(values).unwrap_err();
        assert!(matches!(err, GeometryError::UnexpectedArgument { ref name } if name == "colour"));
    }
}
