//! Identification of Cargo packages that are also ROS 2 packages.
//!
//! Such a package has both a `Cargo.toml` and a `package.xml` and no
//! `CMakeLists.txt`. Every directory matching here would also match the
//! plain Cargo and CMake-based ROS identifications, so this one has to be
//! consulted before them.

use crate::core::{manifest, PackageMetadata, CMAKE_LISTS, MANIFEST_NAME, PACKAGE_XML};
use crate::identification::{
    claimed_by_other, commit, Identification, IdentifyError, PackageIdentification,
};

/// Package type assigned to Rust ROS 2 packages.
pub const CARGO_ROS_TYPE: &str = "cargo_ros";

/// Higher than both the plain Cargo and the CMake identification.
pub const CARGO_ROS_PRIORITY: i32 = 160;

/// Identifies Rust ROS 2 packages.
#[derive(Debug, Default, Clone, Copy)]
pub struct CargoRosIdentification;

impl PackageIdentification for CargoRosIdentification {
    fn type_name(&self) -> &'static str {
        CARGO_ROS_TYPE
    }

    fn priority(&self) -> i32 {
        CARGO_ROS_PRIORITY
    }

    fn identify(&self, metadata: &mut PackageMetadata) -> Result<Identification, IdentifyError> {
        if claimed_by_other(metadata, CARGO_ROS_TYPE) {
            return Ok(Identification::NoMatch);
        }

        let dir = metadata.path();

        // owned by the CMake build even though it carries a Cargo.toml
        if dir.join(CMAKE_LISTS).is_file() {
            tracing::trace!("{}: skipping, contains {}", dir.display(), CMAKE_LISTS);
            return Ok(Identification::NoMatch);
        }

        let cargo_toml = dir.join(MANIFEST_NAME);
        if !cargo_toml.is_file() || !dir.join(PACKAGE_XML).is_file() {
            return Ok(Identification::NoMatch);
        }

        let data = manifest::extract(&cargo_toml, &metadata.dir_name())?;

        tracing::debug!(
            "{}: identified `{}` as {} with {} dependencies",
            dir.display(),
            data.name,
            CARGO_ROS_TYPE,
            data.dependencies.len()
        );

        commit(metadata, CARGO_ROS_TYPE, data);
        Ok(Identification::Matched)
    }
}
