//! Package build tasks.
//!
//! A build task turns an identified package into a cargo invocation. Plain
//! Cargo packages use [`CargoBuildTask`]; ROS packages use
//! [`CargoRosBuildTask`], which adds native library search paths and local
//! dependency overrides before delegating to the base task.

pub mod cargo;
pub mod cargo_ros;

pub use cargo::{BuildArgs, BuildEnv, BuildTask, CargoBuildTask};
pub use cargo_ros::{BuildAugmentation, CargoRosBuildTask};
