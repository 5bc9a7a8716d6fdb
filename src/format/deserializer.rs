//! Text → tree.
//!
//! The text is read as a stream of `(level, content)` lines, where the level
//! is the number of leading tabs. Nesting has no closing tokens: each block
//! keeps reading lines at its own level until it meets a shallower line (which
//! is pushed back for the enclosing block) or the end of the input.

use std::collections::HashMap;
use std::str::Lines;

use crate::format::error::FormatError;
use crate::format::registry::FigureRegistry;
use crate::format::serializer::{CONTAINER_TAG, COORDINATES_FIELD, ITEMS_MARKER};
use crate::format::value::parse_value;
use crate::model::{Container, Node, Value};

/// Deepest nesting level accepted before decoding aborts.
pub const MAX_NESTING_LEVEL: usize = 256;

/// A tokenized input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    pub level: usize,
    pub content: &'a str,
}

/// Split a raw line into its tab level and content, dropping trailing whitespace.
pub fn tokenize(raw: &str) -> (usize, &str) {
    let content = raw.trim_start_matches('\t');
    let level = raw.len() - content.len();
    (level, content.trim_end())
}

/// Line source with one line of push-back.
#[derive(Debug)]
pub struct LineReader<'a, I: Iterator<Item = &'a str>> {
    raw: std::iter::Enumerate<I>,
    pushed_back: Option<Line<'a>>,
}

impl<'a, I: Iterator<Item = &'a str>> LineReader<'a, I> {
    pub fn new(raw: I) -> Self {
        Self {
            raw: raw.enumerate(),
            pushed_back: None,
        }
    }

    /// Return the next line if it belongs to the block at `expected_level`.
    ///
    /// A shallower line ends the block: it is pushed back and `Ok(None)` is
    /// returned. A deeper line is malformed indentation. Blank lines are
    /// skipped.
    pub fn next(&mut self, expected_level: usize) -> Result<Option<Line<'a>>, FormatError> {
        let Some(line) = self.pull()? else {
            return Ok(None);
        };

        if line.level < expected_level {
            log::trace!(
                "Line {} at level {} ends block at level {}",
                line.number,
                line.level,
                expected_level
            );
            self.push_back(line);
            return Ok(None);
        }
        if line.level > expected_level {
            return Err(FormatError::parse(
                line.number,
                format!(
                    "unexpected indentation: expected {} tab(s), found {}",
                    expected_level, line.level
                ),
            ));
        }
        Ok(Some(line))
    }

    /// Put a line back so the next call to [`next`](Self::next) sees it again.
    pub fn push_back(&mut self, line: Line<'a>) {
        debug_assert!(self.pushed_back.is_none(), "only one line of push-back");
        self.pushed_back = Some(line);
    }

    fn pull(&mut self) -> Result<Option<Line<'a>>, FormatError> {
        if let Some(line) = self.pushed_back.take() {
            return Ok(Some(line));
        }

        for (index, raw) in self.raw.by_ref() {
            let (level, content) = tokenize(raw);
            if content.is_empty() {
                continue;
            }
            let number = index + 1;
            if content.starts_with(char::is_whitespace) {
                return Err(FormatError::parse(
                    number,
                    "indentation must use tabs only",
                ));
            }
            return Ok(Some(Line {
                number,
                level,
                content,
            }));
        }
        Ok(None)
    }
}

/// Split a field line on its first colon and classify the value.
pub fn parse_field<'a>(line: &Line<'a>) -> Result<(&'a str, Value), FormatError> {
    let (key, raw) = line.content.split_once(':').ok_or_else(|| {
        FormatError::parse(
            line.number,
            format!("expected 'name: value', found '{}'", line.content),
        )
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(FormatError::parse(line.number, "field name is empty"));
    }
    let value = parse_value(raw).map_err(|err| {
        FormatError::parse(line.number, format!("{err} (field '{key}')"))
    })?;
    Ok((key, value))
}

/// Lazily decodes the top-level nodes of a text document.
///
/// Yields one item per level-0 node. After the first error the iterator is
/// exhausted.
pub struct Deserializer<'a, 'r> {
    reader: LineReader<'a, Lines<'a>>,
    registry: &'r FigureRegistry,
    failed: bool,
}

impl<'a, 'r> Deserializer<'a, 'r> {
    pub fn new(text: &'a str, registry: &'r FigureRegistry) -> Self {
        Self {
            reader: LineReader::new(text.lines()),
            registry,
            failed: false,
        }
    }

    /// Decode the next node at `level`, or `None` when the block is exhausted.
    fn decode(&mut self, level: usize) -> Result<Option<Node>, FormatError> {
        let Some(line) = self.reader.next(level)? else {
            return Ok(None);
        };
        if level > MAX_NESTING_LEVEL {
            return Err(FormatError::parse(
                line.number,
                format!("nesting deeper than {} levels", MAX_NESTING_LEVEL),
            ));
        }

        if line.content == CONTAINER_TAG {
            self.decode_container(&line, level + 1).map(|c| Some(c.into()))
        } else {
            self.decode_figure(&line, level + 1).map(Some)
        }
    }

    fn decode_container(&mut self, header: &Line<'a>, level: usize) -> Result<Container, FormatError> {
        let coordinates_line = self.reader.next(level)?.ok_or_else(|| {
            FormatError::parse(
                header.number,
                format!("container is missing its '{}:' field", COORDINATES_FIELD),
            )
        })?;
        let (key, value) = parse_field(&coordinates_line)?;
        if key != COORDINATES_FIELD {
            return Err(FormatError::parse(
                coordinates_line.number,
                format!("expected '{}:', found '{}'", COORDINATES_FIELD, key),
            ));
        }
        let coordinates = value.as_point().ok_or_else(|| {
            FormatError::parse(coordinates_line.number, "container coordinates must be a point")
        })?;

        match self.reader.next(level)? {
            Some(line) if line.content == ITEMS_MARKER => {}
            Some(line) => {
                return Err(FormatError::parse(
                    line.number,
                    format!("expected '{}', found '{}'", ITEMS_MARKER, line.content),
                ));
            }
            None => {
                return Err(FormatError::parse(
                    coordinates_line.number,
                    format!("container is missing its '{}' marker", ITEMS_MARKER),
                ));
            }
        }

        let mut items = Vec::new();
        while let Some(node) = self.decode(level + 1)? {
            items.push(node);
        }
        log::trace!(
            "Decoded container at line {} with {} items",
            header.number,
            items.len()
        );
        Ok(Container::new(items, coordinates))
    }

    fn decode_figure(&mut self, header: &Line<'a>, level: usize) -> Result<Node, FormatError> {
        let entry = self.registry.resolve(header.content).inspect_err(|_| {
            log::debug!("Unknown figure type '{}' on line {}", header.content, header.number);
        })?;

        let mut values: HashMap<String, Value> = HashMap::new();
        while let Some(line) = self.reader.next(level)? {
            let (key, value) = parse_field(&line)?;
            if values.insert(key.to_string(), value).is_some() {
                return Err(FormatError::parse(
                    line.number,
                    format!("field '{}' appears more than once", key),
                ));
            }
        }

        let figure = entry.build(values)?;
        Ok(Node::Figure(figure))
    }
}

impl Iterator for Deserializer<'_, '_> {
    type Item = Result<Node, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.decode(0) {
            Ok(node) => node.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode every top-level node of `text`.
pub fn decode(text: &str, registry: &FigureRegistry) -> Result<Vec<Node>, FormatError> {
    Deserializer::new(text, registry).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;
    use crate::model::figures::Circle;
    use rust_decimal::Decimal;

    #[test]
    fn test_tokenize() {
        assert_eq!(tokenize("\t\tfoo "), (2, "foo"));
        assert_eq!(tokenize("bar"), (0, "bar"));
        assert_eq!(tokenize("\tradius: 2\t \r"), (1, "radius: 2"));
        assert_eq!(tokenize("\t\t\t"), (3, ""));
    }

    #[test]
    fn test_reader_pushes_back_shallower_line() {
        let mut reader = LineReader::new(["\t\tdeep", "\tshallow", "top"].into_iter());

        assert_eq!(reader.next(2).unwrap().unwrap().content, "deep");
        assert_eq!(reader.next(2).unwrap(), None);
        // Still not consumed
        assert_eq!(reader.next(2).unwrap(), None);

        let line = reader.next(1).unwrap().unwrap();
        assert_eq!((line.number, line.level, line.content), (2, 1, "shallow"));

        assert_eq!(reader.next(1).unwrap(), None);
        assert_eq!(reader.next(0).unwrap().unwrap().content, "top");
        assert_eq!(reader.next(0).unwrap(), None);
    }

    #[test]
    fn test_reader_rejects_deeper_line() {
        let mut reader = LineReader::new(["\t\t\tradius: 2"].into_iter());
        let err = reader.next(1).unwrap_err();
        assert!(matches!(err, FormatError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_reader_rejects_space_indentation() {
        let mut reader = LineReader::new(["  Circle"].into_iter());
        assert!(matches!(reader.next(0), Err(FormatError::Parse { .. })));
    }

    #[test]
    fn test_reader_skips_blank_lines() {
        let mut reader = LineReader::new(["", "Circle", "\t", "\tradius: 1", ""].into_iter());
        assert_eq!(reader.next(0).unwrap().unwrap().number, 2);
        assert_eq!(reader.next(1).unwrap().unwrap().number, 4);
        assert_eq!(reader.next(1).unwrap(), None);
    }

    #[test]
    fn test_parse_field_splits_on_first_colon() {
        let line = Line {
            number: 1,
            level: 1,
            content: "coordinates: 67.3 -59.6",
        };
        let (key, value) = parse_field(&line).unwrap();
        assert_eq!(key, "coordinates");
        assert_eq!(
            value,
            Value::Point(Point::new(Decimal::new(673, 1), Decimal::new(-596, 1)))
        );

        let bad = Line {
            number: 3,
            level: 1,
            content: "radius: 1:2",
        };
        assert!(matches!(parse_field(&bad), Err(FormatError::Parse { line: 3, .. })));
    }

    #[test]
    fn test_decode_lone_figure() {
        let registry = FigureRegistry::new();
        let nodes = decode("Circle\n\tradius: 2", &registry).unwrap();
        assert_eq!(nodes, vec![Node::figure(Circle::new(2).unwrap())]);
    }

    #[test]
    fn test_decode_is_lazy() {
        let registry = FigureRegistry::new();
        let text = "Circle\n\tradius: 2\nHexagon\n\tsides: 6";
        let mut nodes = Deserializer::new(text, &registry);

        assert!(nodes.next().unwrap().is_ok());
        assert!(matches!(
            nodes.next(),
            Some(Err(FormatError::UnknownType { .. }))
        ));
        assert!(nodes.next().is_none());
    }

    #[test]
    fn test_decode_missing_items_marker() {
        let registry = FigureRegistry::new();
        let err = decode("Container\n\tcoordinates: 0 0\n\tstuff:", &registry).unwrap_err();
        assert!(matches!(err, FormatError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_decode_missing_coordinates() {
        let registry = FigureRegistry::new();
        let err = decode("Container\n\titems:", &registry).unwrap_err();
        assert!(matches!(err, FormatError::Parse { .. }));

        let err = decode("Container", &registry).unwrap_err();
        assert!(matches!(err, FormatError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_decode_duplicate_field() {
        let registry = FigureRegistry::new();
        let err = decode("Circle\n\tradius: 2\n\tradius: 3", &registry).unwrap_err();
        assert!(matches!(err, FormatError::Parse { line: 3, .. }));
    }
}
