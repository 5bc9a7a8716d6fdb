//! Save/load boundary: text codec plus transform pipeline plus the file system.

use std::path::Path;

use thiserror::Error;

use crate::format::deserializer::{MAX_NESTING_LEVEL, decode};
use crate::format::error::FormatError;
use crate::format::registry::FigureRegistry;
use crate::format::serializer::{container_deepest_level, serialize_container};
use crate::format::warning::FormatWarning;
use crate::model::{Container, Node, Point};
use crate::pipeline::{Pipeline, PipelineStopped};

/// Errors that can end a save or load.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A transform stopped the pipeline; the reason is user-facing
    #[error("{0}")]
    Pipeline(#[from] PipelineStopped),

    #[error(transparent)]
    Format(#[from] FormatError),

    /// Pipeline output was not valid UTF-8 text
    #[error("File is not valid text: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// A drawing: one root container holding the whole figure tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    root: Container,
}

/// A successfully loaded document plus anything worth telling the user.
#[derive(Debug)]
pub struct LoadOutcome {
    pub document: Document,
    pub warnings: Vec<FormatWarning>,
}

impl LoadOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl Document {
    pub fn new(root: Container) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Container {
        &mut self.root
    }

    pub fn into_root(self) -> Container {
        self.root
    }

    /// Serialize the tree and run it through the pipeline's `write` side.
    ///
    /// A tree the decoder would refuse is rejected before anything is written.
    pub fn to_bytes(&self, pipeline: &Pipeline) -> Result<Vec<u8>, DocumentError> {
        let level = container_deepest_level(&self.root, 0);
        if level > MAX_NESTING_LEVEL {
            return Err(FormatError::TooDeep {
                level,
                max: MAX_NESTING_LEVEL,
            }
            .into());
        }
        let text = serialize_container(&self.root);
        Ok(pipeline.write(text.into_bytes())?)
    }

    /// Run bytes through the pipeline's `read` side and decode the tree.
    pub fn from_bytes(
        bytes: Vec<u8>,
        registry: &FigureRegistry,
        pipeline: &Pipeline,
    ) -> Result<LoadOutcome, DocumentError> {
        let text = String::from_utf8(pipeline.read(bytes)?)?;
        let nodes = decode(&text, registry)?;
        Ok(Self::from_nodes(nodes))
    }

    /// Build a document from decoded top-level nodes.
    ///
    /// A single container becomes the root as is. Anything else is wrapped in
    /// a new root container at the origin, with a warning.
    pub fn from_nodes(nodes: Vec<Node>) -> LoadOutcome {
        let mut warnings = Vec::new();

        let root = match <[Node; 1]>::try_from(nodes) {
            Ok([Node::Container(root)]) => root,
            Ok([figure]) => {
                warnings.push(FormatWarning::warning(
                    "Top-level figure was wrapped in a new container",
                ));
                Container::single(figure)
            }
            Err(nodes) if nodes.is_empty() => {
                warnings.push(FormatWarning::info("File contains no figures"));
                Container::default()
            }
            Err(nodes) => {
                log::warn!(
                    "{} top-level nodes found; wrapping them in a new container",
                    nodes.len()
                );
                warnings.push(FormatWarning::warning(format!(
                    "{} top-level nodes were wrapped in a new container",
                    nodes.len()
                )));
                Container::new(nodes, Point::ORIGIN)
            }
        };

        LoadOutcome {
            document: Self::new(root),
            warnings,
        }
    }

    /// Write the document to `path` through `pipeline`.
    pub fn save(&self, path: &Path, pipeline: &Pipeline) -> Result<(), DocumentError> {
        let bytes = self.to_bytes(pipeline)?;
        std::fs::write(path, &bytes)?;
        log::info!(
            "Saved {} figures ({} bytes) to {:?}",
            self.root.figure_count(),
            bytes.len(),
            path
        );
        Ok(())
    }

    /// Read a document from `path` through `pipeline`.
    pub fn load(
        path: &Path,
        registry: &FigureRegistry,
        pipeline: &Pipeline,
    ) -> Result<LoadOutcome, DocumentError> {
        let bytes = std::fs::read(path)?;
        let size = bytes.len();
        let outcome = Self::from_bytes(bytes, registry, pipeline)?;
        log::info!(
            "Loaded {} figures ({} bytes) from {:?}",
            outcome.document.root.figure_count(),
            size,
            path
        );
        Ok(outcome)
    }

    /// Replace this document with the one stored at `path`.
    ///
    /// On failure the current tree is left untouched.
    pub fn reload_from(
        &mut self,
        path: &Path,
        registry: &FigureRegistry,
        pipeline: &Pipeline,
    ) -> Result<Vec<FormatWarning>, DocumentError> {
        let outcome = Self::load(path, registry, pipeline)?;
        *self = outcome.document;
        Ok(outcome.warnings)
    }
}

impl From<Container> for Document {
    fn from(root: Container) -> Self {
        Self::new(root)
    }
}
