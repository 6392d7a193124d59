//! Identification of plain Cargo packages.

use crate::core::{manifest, PackageMetadata, MANIFEST_NAME};
use crate::identification::{
    claimed_by_other, commit, Identification, IdentifyError, PackageIdentification,
};

/// Package type assigned to plain Cargo packages.
pub const CARGO_TYPE: &str = "cargo";

/// Below CMake so a `CMakeLists.txt` keeps ownership of mixed directories.
pub const CARGO_PRIORITY: i32 = 90;

/// Identifies any directory holding a `Cargo.toml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CargoIdentification;

impl PackageIdentification for CargoIdentification {
    fn type_name(&self) -> &'static str {
        CARGO_TYPE
    }

    fn priority(&self) -> i32 {
        CARGO_PRIORITY
    }

    fn identify(&self, metadata: &mut PackageMetadata) -> Result<Identification, IdentifyError> {
        if claimed_by_other(metadata, CARGO_TYPE) {
            return Ok(Identification::NoMatch);
        }

        let cargo_toml = metadata.path().join(MANIFEST_NAME);
        if !cargo_toml.is_file() {
            return Ok(Identification::NoMatch);
        }

        let data = manifest::extract(&cargo_toml, &metadata.dir_name())?;
        commit(metadata, CARGO_TYPE, data);
        Ok(Identification::Matched)
    }
}
