//! Transform registry for building pipelines from configured names.

use crate::pipeline::transforms;
use crate::pipeline::{Pipeline, PipelineStopped, ReadOrder, Transform};

/// Constructor for a registered transform.
pub type TransformFactory = fn(&TransformParams) -> Result<Box<dyn Transform>, PipelineStopped>;

/// Values a transform may need at construction time.
#[derive(Debug, Clone, Default)]
pub struct TransformParams {
    /// Passphrase for the `Encrypt` transform.
    pub passphrase: Option<String>,
}

impl TransformParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }
}

/// A registered transform.
#[derive(Debug, Clone, Copy)]
pub struct TransformEntry {
    pub name: &'static str,
    /// Whether the transform can run in this build.
    pub is_ready: fn() -> bool,
    pub create: TransformFactory,
}

/// Registry of the transforms a pipeline can be built from.
pub struct TransformRegistry {
    entries: Vec<TransformEntry>,
}

impl TransformRegistry {
    /// Create a registry with the built-in transforms.
    pub fn new() -> Self {
        let mut registry = Self { entries: Vec::new() };

        registry.register(transforms::debug::ENTRY);
        registry.register(transforms::zip::ENTRY);
        registry.register(transforms::encrypt::ENTRY);

        registry
    }

    /// Register a transform, replacing any entry with the same name.
    pub fn register(&mut self, entry: TransformEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == entry.name) {
            log::warn!("Transform '{}' registered twice; the later entry wins", entry.name);
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
    }

    pub fn get(&self, name: &str) -> Option<&TransformEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Names of all registered transforms, ready or not.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Names of the transforms that can run in this build.
    pub fn available(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| (e.is_ready)())
            .map(|e| e.name)
            .collect()
    }

    /// Build a pipeline from transform names, in the given order.
    pub fn build<S: AsRef<str>>(
        &self,
        names: &[S],
        params: &TransformParams,
    ) -> Result<Pipeline, PipelineStopped> {
        let transforms = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                let entry = self
                    .get(name)
                    .ok_or_else(|| PipelineStopped::new(format!("Unknown transform '{}'", name)))?;
                if !(entry.is_ready)() {
                    return Err(PipelineStopped::new(format!(
                        "Transform '{}' is not available in this build",
                        name
                    )));
                }
                (entry.create)(params)
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("Built pipeline: {:?}", names.iter().map(AsRef::as_ref).collect::<Vec<_>>());
        Ok(Pipeline::new(transforms))
    }

    /// Like [`build`](Self::build), with an explicit read order.
    pub fn build_with_order<S: AsRef<str>>(
        &self,
        names: &[S],
        params: &TransformParams,
        order: ReadOrder,
    ) -> Result<Pipeline, PipelineStopped> {
        Ok(self.build(names, params)?.with_read_order(order))
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never_ready() -> bool {
        false
    }

    #[test]
    fn test_builtin_transforms() {
        let registry = TransformRegistry::new();
        assert_eq!(registry.names(), vec!["Debug", "Zip", "Encrypt"]);
        assert!(registry.available().contains(&"Debug"));
    }

    #[test]
    fn test_build_in_order() {
        let registry = TransformRegistry::new();
        let pipeline = registry.build(&["Debug", "Debug"], &TransformParams::new()).unwrap();
        assert_eq!(pipeline.names(), vec!["Debug", "Debug"]);
        assert_eq!(pipeline.read_order(), ReadOrder::SameAsWrite);
    }

    #[test]
    fn test_build_unknown_name() {
        let registry = TransformRegistry::new();
        let err = registry
            .build(&["Rot13"], &TransformParams::new())
            .err()
            .unwrap();
        assert_eq!(err.reason, "Unknown transform 'Rot13'");
    }

    #[test]
    fn test_unready_transform_is_hidden_and_refused() {
        let mut registry = TransformRegistry::new();
        registry.register(TransformEntry {
            is_ready: never_ready,
            ..transforms::debug::ENTRY
        });

        assert!(!registry.available().contains(&"Debug"));
        let err = registry
            .build(&["Debug"], &TransformParams::new())
            .err()
            .unwrap();
        assert!(err.reason.contains("not available"));
    }

    #[test]
    fn test_build_with_order() {
        let registry = TransformRegistry::new();
        let pipeline = registry
            .build_with_order(&["Debug"], &TransformParams::new(), ReadOrder::Reverse)
            .unwrap();
        assert_eq!(pipeline.read_order(), ReadOrder::Reverse);
    }
}
