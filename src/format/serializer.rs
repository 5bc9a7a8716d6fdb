//! Tree → text.

use crate::format::value::serialize_value;
use crate::model::{Container, Figure, Node, Value};

/// Tag line that opens a container block.
pub const CONTAINER_TAG: &str = "Container";
/// Field holding a container's offset.
pub const COORDINATES_FIELD: &str = "coordinates";
/// Marker line preceding a container's children.
pub const ITEMS_MARKER: &str = "items:";

fn indentation(level: usize) -> String {
    "\t".repeat(level)
}

/// Writes the tab-indented text form of a figure tree.
///
/// Output is deterministic: fields appear in schema order and children in
/// draw order. Lines are separated by `\n` with no trailing newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSerializer;

impl TextSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a node whose first line sits at `level`.
    pub fn serialize(&self, node: &Node, level: usize) -> String {
        match node {
            Node::Container(container) => self.serialize_container(container, level),
            Node::Figure(figure) => self.serialize_figure(figure.as_ref(), level),
        }
    }

    pub fn serialize_container(&self, container: &Container, level: usize) -> String {
        let coordinates = [(COORDINATES_FIELD, Value::Point(container.coordinates))];
        format!(
            "{}{}\n{}\n{}",
            indentation(level),
            CONTAINER_TAG,
            self.serialize_data(&coordinates, level + 1),
            self.serialize_container_items(container.items(), level + 1)
        )
    }

    /// The `items:` marker at `level` followed by each child one level deeper.
    pub fn serialize_container_items(&self, items: &[Node], level: usize) -> String {
        let mut out = format!("{}{}", indentation(level), ITEMS_MARKER);
        for item in items {
            out.push('\n');
            out.push_str(&self.serialize(item, level + 1));
        }
        out
    }

    pub fn serialize_figure(&self, figure: &dyn Figure, level: usize) -> String {
        self.serialize_parsed_figure(figure.display_name(), &figure.fields(), level)
    }

    /// A type line followed by its field lines one level deeper.
    pub fn serialize_parsed_figure(
        &self,
        type_name: &str,
        fields: &[(&str, Value)],
        level: usize,
    ) -> String {
        let mut out = format!("{}{}", indentation(level), type_name);
        if !fields.is_empty() {
            out.push('\n');
            out.push_str(&self.serialize_data(fields, level + 1));
        }
        out
    }

    /// `name: value` lines, all at `level`.
    pub fn serialize_data(&self, fields: &[(&str, Value)], level: usize) -> String {
        let indent = indentation(level);
        fields
            .iter()
            .map(|(name, value)| format!("{}{}: {}", indent, name, serialize_value(value)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Indentation level of the deepest tag line `node` produces when written at
/// `level`. Children sit two levels below their container's tag line.
pub fn deepest_level(node: &Node, level: usize) -> usize {
    match node {
        Node::Figure(_) => level,
        Node::Container(container) => container_deepest_level(container, level),
    }
}

pub fn container_deepest_level(container: &Container, level: usize) -> usize {
    container
        .items()
        .iter()
        .map(|item| deepest_level(item, level + 2))
        .max()
        .unwrap_or(level)
}

/// Serialize a whole tree starting at level 0.
pub fn serialize(node: &Node) -> String {
    TextSerializer::new().serialize(node, 0)
}

/// Serialize a root container starting at level 0.
pub fn serialize_container(container: &Container) -> String {
    TextSerializer::new().serialize_container(container, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::model::figures::{Circle, Triangle};
    use rust_decimal::Decimal;

    #[test]
    fn test_serialize_data() {
        let fields = [
            ("hello", Value::Decimal(Decimal::ONE)),
            ("hi", Value::Decimal(Decimal::from(4))),
        ];
        assert_eq!(TextSerializer.serialize_data(&fields, 0), "hello: 1\nhi: 4");
    }

    #[test]
    fn test_serialize_parsed_figure() {
        let fields = [("field_1", Value::Decimal(Decimal::ONE))];
        assert_eq!(
            TextSerializer.serialize_parsed_figure("SomeFigure", &fields, 2),
            "\t\tSomeFigure\n\t\t\tfield_1: 1"
        );
    }

    #[test]
    fn test_serialize_lone_circle() {
        let node = Node::figure(Circle::new(2).unwrap());
        assert_eq!(serialize(&node), "Circle\n\tradius: 2");
    }

    #[test]
    fn test_serialize_container() {
        let container = Container::new(
            vec![Node::figure(Circle::new(2).unwrap())],
            Point::new(5, 5),
        );
        assert_eq!(
            serialize_container(&container),
            "Container\n\tcoordinates: 5 5\n\titems:\n\t\tCircle\n\t\t\tradius: 2"
        );
    }

    #[test]
    fn test_serialize_empty_container() {
        let container = Container::new(vec![], Point::new(3, Decimal::new(1415, 2)));
        assert_eq!(
            serialize_container(&container),
            "Container\n\tcoordinates: 3 14.15\n\titems:"
        );
    }

    #[test]
    fn test_serialize_triangle_field_order() {
        let triangle =
            Triangle::new(vec![Point::new(40, 20), Point::new(30, 60), Point::new(50, 60)])
                .unwrap();
        assert_eq!(
            serialize(&Node::figure(triangle)),
            "Triangle\n\ta: 40 20\n\tb: 30 60\n\tc: 50 60"
        );
    }

    #[test]
    fn test_deepest_level() {
        let circle = || Node::figure(Circle::new(1).unwrap());
        assert_eq!(deepest_level(&circle(), 3), 3);
        assert_eq!(container_deepest_level(&Container::default(), 0), 0);

        let inner = Container::single(circle());
        let outer = Container::new(vec![circle(), inner.into()], Point::ORIGIN);
        assert_eq!(container_deepest_level(&outer, 0), 4);
        assert_eq!(deepest_level(&outer.into(), 1), 5);
    }

    #[test]
    fn test_serialize_nested_levels() {
        let inner = Container::new(vec![Node::figure(Circle::new(1).unwrap())], Point::new(1, 2));
        let outer = Container::new(vec![inner.into()], Point::ORIGIN);
        assert_eq!(
            serialize_container(&outer),
            "Container\n\tcoordinates: 0 0\n\titems:\n\t\tContainer\n\t\t\tcoordinates: 1 2\n\t\t\titems:\n\t\t\t\tCircle\n\t\t\t\t\tradius: 1"
        );
    }
}
