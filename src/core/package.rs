//! Package metadata shared between the orchestrator and identification.
//!
//! A `PackageMetadata` starts out holding only a directory. Identification
//! fills in the type, the name and the dependency sets.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

/// A named dependency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyClass {
    /// Needed to build the package
    Build,
    /// Needed to run the package
    Run,
    /// Needed to test the package
    Test,
}

impl DependencyClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyClass::Build => "build",
            DependencyClass::Run => "run",
            DependencyClass::Test => "test",
        }
    }
}

impl fmt::Display for DependencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(DependencyClass::Build),
            "run" => Ok(DependencyClass::Run),
            "test" => Ok(DependencyClass::Test),
            _ => Err(format!("unknown dependency class: {}", s)),
        }
    }
}

/// Metadata about a candidate package directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    /// Package directory
    path: PathBuf,

    /// Package type, set by whichever identification claimed the directory
    #[serde(rename = "type")]
    package_type: Option<String>,

    /// Package name
    name: Option<String>,

    /// Dependencies per class
    dependencies: BTreeMap<DependencyClass, BTreeSet<String>>,
}

impl PackageMetadata {
    /// Create metadata for a directory with nothing identified yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        PackageMetadata {
            path: path.into(),
            package_type: None,
            name: None,
            dependencies: BTreeMap::new(),
        }
    }

    /// Declare the package type up front.
    pub fn with_type(mut self, package_type: impl Into<String>) -> Self {
        self.package_type = Some(package_type.into());
        self
    }

    /// Declare the package name up front.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn package_type(&self) -> Option<&str> {
        self.package_type.as_deref()
    }

    pub fn set_package_type(&mut self, package_type: impl Into<String>) {
        self.package_type = Some(package_type.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name unless one has already been determined.
    pub fn set_name_if_unset(&mut self, name: impl Into<String>) {
        if self.name.is_none() {
            self.name = Some(name.into());
        }
    }

    /// Dependencies of a class (empty if none were recorded).
    pub fn dependencies(&self, class: DependencyClass) -> impl Iterator<Item = &str> {
        self.dependencies
            .get(&class)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Check whether a class contains a dependency.
    pub fn depends_on(&self, class: DependencyClass, name: &str) -> bool {
        self.dependencies
            .get(&class)
            .is_some_and(|deps| deps.contains(name))
    }

    /// Union dependencies into a class. Existing entries are kept.
    pub fn add_dependencies<I, S>(&mut self, class: DependencyClass, deps: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies
            .entry(class)
            .or_default()
            .extend(deps.into_iter().map(Into::into));
    }

    /// Base name of the package directory, used when nothing declares a name.
    ///
    /// Relative paths such as `.` are resolved against the working directory.
    pub fn dir_name(&self) -> String {
        if let Some(name) = self.path.file_name() {
            return name.to_string_lossy().into_owned();
        }

        std::path::absolute(&self.path)
            .ok()
            .and_then(|abs| {
                abs.components().rev().find_map(|c| match c {
                    Component::Normal(n) => Some(n.to_string_lossy().into_owned()),
                    _ => None,
                })
            })
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metadata_is_empty() {
        let metadata = PackageMetadata::new("/ws/src/talker");
        assert_eq!(metadata.package_type(), None);
        assert_eq!(metadata.name(), None);
        assert_eq!(metadata.dependencies(DependencyClass::Build).count(), 0);
    }

    #[test]
    fn test_name_is_not_overwritten() {
        let mut metadata = PackageMetadata::new("/ws/src/talker").with_name("chosen");
        metadata.set_name_if_unset("other");
        assert_eq!(metadata.name(), Some("chosen"));
    }

    #[test]
    fn test_add_dependencies_unions() {
        let mut metadata = PackageMetadata::new("/ws/src/talker");
        metadata.add_dependencies(DependencyClass::Build, ["rclcpp"]);
        metadata.add_dependencies(DependencyClass::Build, ["rclrs", "rclcpp"]);

        let deps: Vec<_> = metadata.dependencies(DependencyClass::Build).collect();
        assert_eq!(deps, vec!["rclcpp", "rclrs"]);
        assert!(!metadata.depends_on(DependencyClass::Run, "rclrs"));
    }

    #[test]
    fn test_dir_name() {
        assert_eq!(PackageMetadata::new("/ws/src/talker").dir_name(), "talker");
        assert_eq!(PackageMetadata::new("/ws/src/talker/").dir_name(), "talker");
    }

    #[test]
    fn test_dependency_class_parse() {
        assert_eq!("run".parse::<DependencyClass>(), Ok(DependencyClass::Run));
        assert!("link".parse::<DependencyClass>().is_err());
    }
}
