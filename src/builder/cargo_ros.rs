//! Build task for ROS packages written in Rust.
//!
//! Wraps [`CargoBuildTask`] and supplies native library search paths for the
//! ROS client libraries and local paths for the workspace's Rust bindings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::cargo::{BuildArgs, BuildEnv, BuildTask, CargoBuildTask};
use crate::util::config::BuildConfig;
use crate::util::process::ProcessBuilder;

/// Crates resolved from the local install space instead of crates.io.
const DEFAULT_LOCAL_CRATES: &[&str] = &["rclrs", "rclrs_common", "std_msgs"];

/// Native library paths and local dependency table added to a Cargo build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildAugmentation {
    /// Directories passed to rustc as `-Lnative=<dir>`
    pub native_lib_dirs: Vec<PathBuf>,

    /// Local source paths, keyed by crate name
    pub dependency_paths: BTreeMap<String, PathBuf>,
}

impl BuildAugmentation {
    /// The stock layout: a `ros2_rust_ws` overlay on a Foxy install, with
    /// the Rust bindings installed under `ros_ws`.
    ///
    /// Home-relative entries are left out when `home` is unknown.
    pub fn defaults(home: Option<&Path>) -> Self {
        let mut native_lib_dirs = Vec::new();
        if let Some(home) = home {
            native_lib_dirs.push(home.join("ros2_rust_ws/install/builtin_interfaces/lib"));
        }
        native_lib_dirs.push(PathBuf::from("/opt/ros/foxy/lib"));
        if let Some(home) = home {
            native_lib_dirs.push(home.join("ros2_rust_ws/install/std_msgs/lib"));
        }

        let dependency_paths: BTreeMap<String, PathBuf> = home
            .map(|home| {
                DEFAULT_LOCAL_CRATES
                    .iter()
                    .map(|name| {
                        let path = home
                            .join("ros_ws/install")
                            .join(name)
                            .join("share")
                            .join(name)
                            .join("rust");
                        (name.to_string(), path)
                    })
                    .collect()
            })
            .unwrap_or_default();

        BuildAugmentation {
            native_lib_dirs,
            dependency_paths,
        }
    }

    /// Configured values, with the stock layout filling whatever is not set.
    pub fn from_config(config: &BuildConfig, home: Option<&Path>) -> Self {
        let defaults = Self::defaults(home);

        BuildAugmentation {
            native_lib_dirs: config
                .native_lib_dirs
                .clone()
                .unwrap_or(defaults.native_lib_dirs),
            dependency_paths: config
                .dependency_paths
                .clone()
                .unwrap_or(defaults.dependency_paths),
        }
    }

    /// The `-Lnative=<dir>` rustc flags.
    pub fn native_flags(&self) -> Vec<String> {
        self.native_lib_dirs
            .iter()
            .map(|dir| format!("-Lnative={}", dir.display()))
            .collect()
    }
}

/// Builds `cargo_ros` packages.
#[derive(Debug, Clone)]
pub struct CargoRosBuildTask {
    base: CargoBuildTask,
    augmentation: BuildAugmentation,
}

impl CargoRosBuildTask {
    pub fn new(base: CargoBuildTask, augmentation: BuildAugmentation) -> Self {
        CargoRosBuildTask { base, augmentation }
    }
}

impl BuildTask for CargoRosBuildTask {
    fn command(&self, args: &BuildArgs, env: &BuildEnv) -> Result<ProcessBuilder> {
        tracing::debug!(
            "adding {} native lib dirs and {} local dependencies",
            self.augmentation.native_lib_dirs.len(),
            self.augmentation.dependency_paths.len()
        );

        self.base.command_with(
            args,
            env,
            &self.augmentation.native_flags(),
            &self.augmentation.dependency_paths,
        )
    }
}
