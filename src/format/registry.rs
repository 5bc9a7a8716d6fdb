//! Figure type registry for resolving serialized type names.

use std::collections::HashMap;

use crate::format::error::FormatError;
use crate::model::figures::{Circle, Ellipse, Line, Rectangle, RegularPolygon, Square, Triangle};
use crate::model::{FieldSchema, Figure, FigureArgs, FigureType, GeometryError, Value};

/// Constructor for a registered figure type.
pub type FigureFactory = fn(&FigureArgs) -> Result<Box<dyn Figure>, GeometryError>;

/// A registered figure type.
#[derive(Debug, Clone)]
pub struct FigureEntry {
    pub name: &'static str,
    pub factory: FigureFactory,
    pub schema: FieldSchema,
}

impl FigureEntry {
    /// Map collected field values through the schema and construct the figure.
    pub fn build(&self, values: HashMap<String, Value>) -> Result<Box<dyn Figure>, GeometryError> {
        let args = self.schema.map_args(values)?;
        (self.factory)(&args)
    }

    /// `(field name, display label)` pairs, in schema order.
    pub fn field_labels(&self) -> Vec<(&'static str, &'static str)> {
        self.schema
            .fields()
            .iter()
            .map(|spec| (spec.name, spec.label))
            .collect()
    }
}

/// Registry of constructible figure types.
///
/// Built once during start-up and then shared by reference with the codec and
/// any editing front-end. Registration order is kept for display purposes.
///
/// Type names are not checked for uniqueness: registering a name twice
/// replaces the earlier entry and logs a warning.
pub struct FigureRegistry {
    entries: HashMap<&'static str, FigureEntry>,
    order: Vec<&'static str>,
}

fn build_boxed<T: FigureType>(args: &FigureArgs) -> Result<Box<dyn Figure>, GeometryError> {
    Ok(Box::new(T::from_args(args)?))
}

impl FigureRegistry {
    /// Create a registry with all built-in figure types registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // Register all built-in figures
        registry.register_type::<Circle>();
        registry.register_type::<Ellipse>();
        registry.register_type::<Line>();
        registry.register_type::<Triangle>();
        registry.register_type::<Rectangle>();
        registry.register_type::<Square>();
        registry.register_type::<RegularPolygon>();

        registry
    }

    /// Create a registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register a figure type under `name`.
    pub fn register(&mut self, name: &'static str, factory: FigureFactory, schema: FieldSchema) {
        if self.entries.contains_key(name) {
            log::warn!("Figure type '{}' registered twice; the later entry wins", name);
        } else {
            self.order.push(name);
        }
        self.entries.insert(
            name,
            FigureEntry {
                name,
                factory,
                schema,
            },
        );
    }

    /// Register a type implementing [`FigureType`].
    pub fn register_type<T: FigureType>(&mut self) {
        self.register(T::NAME, build_boxed::<T>, T::schema());
    }

    /// Look up a type by name.
    pub fn resolve(&self, name: &str) -> Result<&FigureEntry, FormatError> {
        self.entries
            .get(name)
            .ok_or_else(|| FormatError::unknown_type(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// `(field name, display label)` pairs of type `name`, in schema order.
    pub fn field_labels(
        &self,
        name: &str,
    ) -> Result<Vec<(&'static str, &'static str)>, FormatError> {
        Ok(self.resolve(name)?.field_labels())
    }

    /// Registered type names, in registration order.
    pub fn names(&self) -> &[&'static str] {
        &self.order
    }

    /// Construct a figure of type `name` from field values.
    pub fn create(
        &self,
        name: &str,
        values: HashMap<String, Value>,
    ) -> Result<Box<dyn Figure>, FormatError> {
        Ok(self.resolve(name)?.build(values)?)
    }

    /// Build a replacement for `figure` with some fields changed.
    ///
    /// Unchanged fields keep their current values. The original figure is
    /// left as it is; callers swap the result in on success.
    pub fn rebuild(
        &self,
        figure: &dyn Figure,
        changes: impl IntoIterator<Item = (String, Value)>,
    ) -> Result<Box<dyn Figure>, FormatError> {
        let mut values: HashMap<String, Value> = figure
            .fields()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        values.extend(changes);
        self.create(figure.display_name(), values)
    }
}

impl Default for FigureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
