//! Identification of CMake projects.

use crate::core::{PackageMetadata, CMAKE_LISTS};
use crate::identification::{claimed_by_other, Identification, IdentifyError, PackageIdentification};

/// Package type assigned to CMake projects.
pub const CMAKE_TYPE: &str = "cmake";

pub const CMAKE_PRIORITY: i32 = 100;

/// Identifies any directory holding a `CMakeLists.txt`.
///
/// The project file is not parsed; the package is named after its directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct CMakeIdentification;

impl PackageIdentification for CMakeIdentification {
    fn type_name(&self) -> &'static str {
        CMAKE_TYPE
    }

    fn priority(&self) -> i32 {
        CMAKE_PRIORITY
    }

    fn identify(&self, metadata: &mut PackageMetadata) -> Result<Identification, IdentifyError> {
        if claimed_by_other(metadata, CMAKE_TYPE) {
            return Ok(Identification::NoMatch);
        }

        if !metadata.path().join(CMAKE_LISTS).is_file() {
            return Ok(Identification::NoMatch);
        }

        let name = metadata.dir_name();
        metadata.set_package_type(CMAKE_TYPE);
        metadata.set_name_if_unset(name);
        Ok(Identification::Matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_identifies_cmake_project() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("rclcpp_demo");
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join(CMAKE_LISTS), "cmake_minimum_required(VERSION 3.8)").unwrap();

        let mut metadata = PackageMetadata::new(&dir);
        let outcome = CMakeIdentification.identify(&mut metadata).unwrap();

        assert!(outcome.is_match());
        assert_eq!(metadata.package_type(), Some(CMAKE_TYPE));
        assert_eq!(metadata.name(), Some("rclcpp_demo"));
    }

    #[test]
    fn test_directory_named_cmakelists_ignored() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(CMAKE_LISTS)).unwrap();

        let mut metadata = PackageMetadata::new(tmp.path());
        let outcome = CMakeIdentification.identify(&mut metadata).unwrap();
        assert_eq!(outcome, Identification::NoMatch);
    }
}
