//! Core data structures.
//!
//! - Manifest parsing and package information extraction
//! - Package metadata filled in by identification

pub mod manifest;
pub mod package;

pub use manifest::{extract, ExtractionResult, Manifest, ManifestError, MANIFEST_NAME};
pub use package::{DependencyClass, PackageMetadata};

/// ROS package descriptor, checked for presence only.
pub const PACKAGE_XML: &str = "package.xml";

/// CMake project file, checked for presence only.
pub const CMAKE_LISTS: &str = "CMakeLists.txt";
