//! Passthrough transform that logs what flows through it.

use crate::pipeline::{PipelineStopped, Transform, TransformEntry, TransformError, TransformParams};

pub const ENTRY: TransformEntry = TransformEntry {
    name: DebugTransform::NAME,
    is_ready: ready,
    create,
};

fn ready() -> bool {
    true
}

fn create(_params: &TransformParams) -> Result<Box<dyn Transform>, PipelineStopped> {
    Ok(Box::new(DebugTransform))
}

/// Leaves the bytes untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct DebugTransform;

impl DebugTransform {
    pub const NAME: &'static str = "Debug";
}

impl Transform for DebugTransform {
    fn display_name(&self) -> &'static str {
        Self::NAME
    }

    fn write(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError> {
        log::debug!("Debug transform: writing {} bytes", data.len());
        Ok(data)
    }

    fn read(&self, data: Vec<u8>) -> Result<Vec<u8>, TransformError> {
        log::debug!("Debug transform: reading {} bytes", data.len());
        Ok(data)
    }
}
