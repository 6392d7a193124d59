//! Identification registry - ordered consultation of identification extensions.
//!
//! Extensions are kept sorted by descending priority (ties broken by type
//! name) and consulted in that order. The first extension to match, or to
//! fail fatally, ends the pass for a directory.

use crate::core::PackageMetadata;
use crate::identification::{
    CMakeIdentification, CargoIdentification, CargoRosIdentification, IdentifyError,
    PackageIdentification,
};

/// Registry of identification extensions.
pub struct IdentificationRegistry {
    extensions: Vec<Box<dyn PackageIdentification>>,
}

impl IdentificationRegistry {
    /// Create an empty registry.
    pub fn empty() -> Self {
        IdentificationRegistry {
            extensions: Vec::new(),
        }
    }

    /// Create a registry with all built-in extensions.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(CargoRosIdentification));
        registry.register(Box::new(CMakeIdentification));
        registry.register(Box::new(CargoIdentification));
        registry
    }

    /// Register an extension, replacing any with the same type name.
    pub fn register(&mut self, extension: Box<dyn PackageIdentification>) {
        self.extensions
            .retain(|e| e.type_name() != extension.type_name());
        self.extensions.push(extension);
        self.extensions.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.type_name().cmp(b.type_name()))
        });
    }

    /// Identify a package, returning the type of the matching extension.
    ///
    /// `Ok(None)` means no extension recognized the directory.
    pub fn identify(
        &self,
        metadata: &mut PackageMetadata,
    ) -> Result<Option<&'static str>, IdentifyError> {
        for extension in &self.extensions {
            if extension.identify(metadata)?.is_match() {
                return Ok(Some(extension.type_name()));
            }
        }

        tracing::trace!("{}: no identification matched", metadata.path().display());
        Ok(None)
    }

    /// Type names in consultation order.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.extensions.iter().map(|e| e.type_name())
    }

    /// Get an extension by type name.
    pub fn get(&self, type_name: &str) -> Option<&dyn PackageIdentification> {
        self.extensions
            .iter()
            .find(|e| e.type_name() == type_name)
            .map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl Default for IdentificationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
