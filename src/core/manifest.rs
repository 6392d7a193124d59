//! Cargo.toml parsing and package information extraction.
//!
//! Only two pieces of the manifest matter for identification: the declared
//! package name and the names of the direct dependencies. Everything else in
//! the file is accepted but never inspected.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml::{Table, Value};

use crate::util::fs::absolute_path;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Cargo.toml";

/// Errors raised while loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decoding error when processing `{}`", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ManifestError {
    /// Absolute path of the manifest that failed.
    pub fn path(&self) -> &Path {
        match self {
            ManifestError::Read { path, .. } | ManifestError::Decode { path, .. } => path,
        }
    }
}

/// A parsed manifest.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    table: Table,
}

impl Manifest {
    /// Load and parse a manifest file.
    ///
    /// Failures are logged at error level with the absolute path of the file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let abs = absolute_path(path);

        let content = std::fs::read_to_string(path).map_err(|source| {
            tracing::error!("failed to read `{}`: {}", abs.display(), source);
            ManifestError::Read {
                path: abs.clone(),
                source,
            }
        })?;

        content.parse::<Table>().map(Manifest::from).map_err(|source| {
            tracing::error!("decoding error when processing `{}`", abs.display());
            ManifestError::Decode { path: abs, source }
        })
    }

    /// Parse manifest content.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        content.parse::<Table>().map(Manifest::from)
    }

    /// The `package.name` field, if declared.
    ///
    /// Non-string and empty values are treated as absent so that
    /// `name.workspace = true` falls back like an undeclared name.
    pub fn package_name(&self) -> Option<&str> {
        self.table
            .get("package")
            .and_then(Value::as_table)
            .and_then(|pkg| pkg.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Keys of the top-level `[dependencies]` table.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.table
            .get("dependencies")
            .and_then(Value::as_table)
            .map(|deps| deps.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl From<Table> for Manifest {
    fn from(table: Table) -> Self {
        Manifest { table }
    }
}

/// Package identity and dependencies pulled out of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Package name, never empty
    pub name: String,

    /// Direct dependency names, never containing `name`
    pub dependencies: BTreeSet<String>,
}

/// Extract the package name and dependencies from a manifest file.
///
/// `fallback_name` is used when the manifest declares no package name,
/// typically the name of the directory holding the manifest.
pub fn extract(path: &Path, fallback_name: &str) -> Result<ExtractionResult, ManifestError> {
    let manifest = Manifest::load(path)?;
    Ok(extract_from(&manifest, fallback_name))
}

/// Extract from an already parsed manifest.
pub fn extract_from(manifest: &Manifest, fallback_name: &str) -> ExtractionResult {
    let name = manifest.package_name().unwrap_or(fallback_name).to_string();

    // a top-level key equal to the package name would make it its own dependency
    let dependencies = manifest
        .dependency_names()
        .into_iter()
        .filter(|dep| *dep != name)
        .map(str::to_string)
        .collect();

    ExtractionResult { name, dependencies }
}
