//! Figure tree: containers and their child nodes.

use super::error::GeometryError;
use super::figure::{DrawInfo, Figure};
use super::point::Point;

/// A child of a [`Container`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Figure(Box<dyn Figure>),
    Container(Container),
}

impl Node {
    /// Wrap a concrete figure.
    pub fn figure(figure: impl Figure + 'static) -> Self {
        Node::Figure(Box::new(figure))
    }

    /// Flatten into absolute draw descriptions.
    pub fn draw_info(&self) -> Result<Vec<DrawInfo>, GeometryError> {
        match self {
            Node::Figure(figure) => Ok(vec![figure.draw_info()]),
            Node::Container(container) => container.draw_info(),
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match self {
            Node::Container(c) => Some(c),
            Node::Figure(_) => None,
        }
    }

    pub fn as_figure(&self) -> Option<&dyn Figure> {
        match self {
            Node::Figure(f) => Some(f.as_ref()),
            Node::Container(_) => None,
        }
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Node::Container(container)
    }
}

impl From<Box<dyn Figure>> for Node {
    fn from(figure: Box<dyn Figure>) -> Self {
        Node::Figure(figure)
    }
}

/// A group of nodes drawn relative to a shared offset.
///
/// Children are owned exclusively, so a container can never reach itself;
/// sharing a subtree means cloning it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Container {
    /// Offset applied to every child.
    pub coordinates: Point,
    items: Vec<Node>,
}

impl Container {
    pub fn new(items: Vec<Node>, coordinates: Point) -> Self {
        Self { coordinates, items }
    }

    /// Container at the origin holding a single node.
    pub fn single(item: impl Into<Node>) -> Self {
        Self::new(vec![item.into()], Point::ORIGIN)
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a child at the end of the draw order.
    pub fn push(&mut self, item: impl Into<Node>) {
        self.items.push(item.into());
    }

    /// Detach and return the child at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Swap the child at `index` for `item`, returning the old child.
    pub fn replace(&mut self, index: usize, item: impl Into<Node>) -> Option<Node> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, item.into()))
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index)
    }

    /// Shift the container by `offset`. On failure the container is unchanged.
    pub fn move_by(&mut self, offset: Point) -> Result<(), GeometryError> {
        self.coordinates = self.coordinates.translate(offset)?;
        Ok(())
    }

    /// Number of figures in the whole subtree.
    pub fn figure_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| match item {
                Node::Figure(_) => 1,
                Node::Container(c) => c.figure_count(),
            })
            .sum()
    }

    /// Children's draw descriptions, shifted by this container's offset.
    ///
    /// Fails if a shifted point leaves the decimal range.
    pub fn draw_info(&self) -> Result<Vec<DrawInfo>, GeometryError> {
        let mut infos = Vec::new();
        for item in &self.items {
            for info in item.draw_info()? {
                infos.push(info.translated(self.coordinates)?);
            }
        }
        Ok(infos)
    }
}
