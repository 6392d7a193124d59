//! Implementation of `cargo-ros identify`.
//!
//! Walks the given base paths breadth first and classifies every candidate
//! directory through the identification registry. Classification of a level
//! runs in parallel; a directory that was identified as a package is not
//! descended into. Symlinked directories are followed, and every directory
//! is visited at most once by its canonical path.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::PackageMetadata;
use crate::identification::{IdentificationRegistry, IdentifyError};
use crate::util::fs::is_hidden;

/// Marker file that excludes a directory and everything below it.
pub const IGNORE_MARKER: &str = "COLCON_IGNORE";

/// Output directories of a workspace, never searched for packages.
const SKIPPED_DIRS: &[&str] = &["build", "install", "log", "target"];

/// Options for the identify command.
#[derive(Debug, Clone, Default)]
pub struct IdentifyOptions {
    /// Number of parallel jobs
    pub jobs: Option<usize>,
}

/// Find and identify all packages below `base_paths`.
///
/// Packages are returned sorted by path. If any directory fails fatally the
/// whole sweep fails with the error of the first such directory by path,
/// after all candidates have been attempted.
pub fn discover_packages(
    base_paths: &[PathBuf],
    opts: &IdentifyOptions,
) -> Result<Vec<PackageMetadata>> {
    discover_packages_with(&IdentificationRegistry::new(), base_paths, opts)
}

/// Like [`discover_packages`] with a caller-provided registry.
pub fn discover_packages_with(
    registry: &IdentificationRegistry,
    base_paths: &[PathBuf],
    opts: &IdentifyOptions,
) -> Result<Vec<PackageMetadata>> {
    if let Some(j) = opts.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(j)
            .build_global()
            .ok(); // Ignore if already set
    }

    for base in base_paths {
        if !base.is_dir() {
            bail!("`{}` is not a directory", base.display());
        }
    }

    let mut frontier: Vec<PathBuf> = base_paths
        .iter()
        .filter(|base| !is_ignored(base))
        .cloned()
        .collect();

    let mut packages = BTreeMap::new();
    let mut errors: BTreeMap<PathBuf, IdentifyError> = BTreeMap::new();
    let mut visited = HashSet::new();

    loop {
        // overlapping base paths, aliases and link cycles
        frontier.retain(|dir| visited.insert(canonical(dir)));
        if frontier.is_empty() {
            break;
        }

        tracing::trace!("classifying {} directories", frontier.len());

        let results: Vec<(PathBuf, Result<Option<PackageMetadata>, IdentifyError>)> = frontier
            .par_iter()
            .map(|dir| (dir.clone(), classify(registry, dir)))
            .collect();

        let mut next = Vec::new();
        for (dir, result) in results {
            match result {
                Ok(Some(metadata)) => {
                    packages.insert(dir, metadata);
                }
                Ok(None) => next.extend(child_dirs(&dir)),
                Err(err) => {
                    errors.insert(dir, err);
                }
            }
        }

        next.sort();
        frontier = next;
    }

    if let Some((_, err)) = errors.into_iter().next() {
        return Err(err.into());
    }

    tracing::debug!("identified {} packages", packages.len());
    Ok(packages.into_values().collect())
}

/// Classify a single directory.
fn classify(
    registry: &IdentificationRegistry,
    dir: &Path,
) -> Result<Option<PackageMetadata>, IdentifyError> {
    let mut metadata = PackageMetadata::new(dir);
    match registry.identify(&mut metadata)? {
        Some(type_name) => {
            tracing::debug!("{}: {}", dir.display(), type_name);
            Ok(Some(metadata))
        }
        None => Ok(None),
    }
}

/// Immediate subdirectories of `dir` worth searching.
fn child_dirs(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .filter(|path| !is_skipped(path) && !is_ignored(path))
        .collect()
}

fn canonical(dir: &Path) -> PathBuf {
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

fn is_skipped(path: &Path) -> bool {
    is_hidden(path)
        || path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| SKIPPED_DIRS.contains(&n))
}

fn is_ignored(dir: &Path) -> bool {
    dir.join(IGNORE_MARKER).is_file()
}
