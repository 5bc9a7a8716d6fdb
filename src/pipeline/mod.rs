//! Ordered byte-level transforms applied to serialized drawings.
//!
//! Saving runs every transform's `write` in list order; the last output is
//! what ends up on disk. Loading runs every transform's `read`. A transform
//! that fails stops the whole pipeline and the reason is handed back to the
//! caller as a [`PipelineStopped`].
//!
//! ## Read order
//!
//! By default `read` visits transforms in the same order as `write`. Each
//! transform recognizes its own tag and passes foreign input through, so this
//! is an exact inverse as long as at most one transform in the list rewrites
//! the bytes. Stacked rewriting transforms (e.g. `Zip` then `Encrypt`) need
//! [`ReadOrder::Reverse`].

mod registry;
mod transform;
pub mod transforms;

use serde::{Deserialize, Serialize};

pub use registry::{TransformEntry, TransformParams, TransformRegistry};
pub use transform::{BoxError, PipelineStopped, Transform, TransformError};

/// Order in which [`Pipeline::read`] visits the transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadOrder {
    /// Same order as writing.
    #[default]
    SameAsWrite,
    /// Last written, first read.
    Reverse,
}

/// An ordered list of transforms.
#[derive(Default)]
pub struct Pipeline {
    transforms: Vec<Box<dyn Transform>>,
    read_order: ReadOrder,
}

impl Pipeline {
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self {
            transforms,
            read_order: ReadOrder::default(),
        }
    }

    /// Pipeline that leaves bytes untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_read_order(mut self, order: ReadOrder) -> Self {
        self.read_order = order;
        self
    }

    pub fn read_order(&self) -> ReadOrder {
        self.read_order
    }

    /// Display names of the transforms, in write order.
    pub fn names(&self) -> Vec<&'static str> {
        self.transforms.iter().map(|t| t.display_name()).collect()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Apply every transform's `write` in list order.
    pub fn write(&self, data: Vec<u8>) -> Result<Vec<u8>, PipelineStopped> {
        self.transforms.iter().try_fold(data, |data, transform| {
            log::debug!("Pipeline write: {} ({} bytes in)", transform.display_name(), data.len());
            transform
                .write(data)
                .map_err(|e| stopped(transform.as_ref(), e))
        })
    }

    /// Apply every transform's `read`, in the configured [`ReadOrder`].
    pub fn read(&self, data: Vec<u8>) -> Result<Vec<u8>, PipelineStopped> {
        let mut transforms = self.transforms.iter();
        match self.read_order {
            ReadOrder::SameAsWrite => {
                transforms.try_fold(data, |data, t| read_one(t.as_ref(), data))
            }
            ReadOrder::Reverse => transforms
                .rev()
                .try_fold(data, |data, t| read_one(t.as_ref(), data)),
        }
    }
}

fn read_one(transform: &dyn Transform, data: Vec<u8>) -> Result<Vec<u8>, PipelineStopped> {
    log::debug!("Pipeline read: {} ({} bytes in)", transform.display_name(), data.len());
    transform.read(data).map_err(|e| stopped(transform, e))
}

fn stopped(transform: &dyn Transform, error: TransformError) -> PipelineStopped {
    let stopped = PipelineStopped::from_transform(transform.display_name(), error);
    log::warn!("Pipeline stopped in {}: {}", transform.display_name(), stopped.reason);
    stopped
}
