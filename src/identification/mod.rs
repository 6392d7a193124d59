//! Package identification.
//!
//! Each identification extension inspects a candidate directory and, if it
//! recognizes the package kind, fills in the directory's [`PackageMetadata`].
//! Extensions are consulted in descending priority order by the
//! [`IdentificationRegistry`]; the first match or fatal error ends the pass.
//!
//! # Outcomes
//!
//! - `Ok(Identification::NoMatch)` - the directory is not this kind of
//!   package; the next extension gets a chance.
//! - `Ok(Identification::Matched)` - the metadata was updated.
//! - `Err(IdentifyError)` - the directory looks like this kind of package but
//!   cannot be processed; no other extension may claim it.

pub mod cargo;
pub mod cargo_ros;
pub mod cmake;
pub mod registry;

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::{ExtractionResult, ManifestError, PackageMetadata};

pub use cargo::CargoIdentification;
pub use cargo_ros::CargoRosIdentification;
pub use cmake::CMakeIdentification;
pub use registry::IdentificationRegistry;

/// Result of a single identification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identification {
    /// Not this kind of package, metadata untouched
    NoMatch,
    /// Metadata updated
    Matched,
}

impl Identification {
    pub fn is_match(&self) -> bool {
        matches!(self, Identification::Matched)
    }
}

/// Fatal identification failure.
#[derive(Debug, Error, Diagnostic)]
pub enum IdentifyError {
    #[error("failed to extract Rust package information from `{}`", path.display())]
    #[diagnostic(
        code(cargo_ros::identify::manifest),
        help("fix the manifest; the directory is not treated as any other package kind")
    )]
    Manifest {
        path: PathBuf,
        #[source]
        source: ManifestError,
    },
}

impl IdentifyError {
    /// Absolute path of the file responsible for the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            IdentifyError::Manifest { path, .. } => path,
        }
    }
}

impl From<ManifestError> for IdentifyError {
    fn from(source: ManifestError) -> Self {
        IdentifyError::Manifest {
            path: source.path().to_path_buf(),
            source,
        }
    }
}

/// A package identification extension.
pub trait PackageIdentification: Send + Sync {
    /// Package type assigned on a match.
    fn type_name(&self) -> &'static str;

    /// Precedence among extensions; higher is consulted first.
    fn priority(&self) -> i32;

    /// Try to identify the package at `metadata.path()`.
    ///
    /// Must leave `metadata` untouched unless it returns `Matched`.
    fn identify(&self, metadata: &mut PackageMetadata) -> Result<Identification, IdentifyError>;
}

/// True when the metadata carries a declared type owned by someone else.
pub(crate) fn claimed_by_other(metadata: &PackageMetadata, type_name: &str) -> bool {
    metadata
        .package_type()
        .is_some_and(|declared| declared != type_name)
}

/// Record an extraction in the metadata.
///
/// The name is only set if nothing has determined it yet, and dependencies
/// are unioned into the build and run classes.
pub(crate) fn commit(metadata: &mut PackageMetadata, type_name: &str, data: ExtractionResult) {
    use crate::core::DependencyClass;

    metadata.set_package_type(type_name);
    metadata.set_name_if_unset(data.name);
    metadata.add_dependencies(DependencyClass::Build, data.dependencies.iter().cloned());
    metadata.add_dependencies(DependencyClass::Run, data.dependencies);
}
