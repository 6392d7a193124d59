//! High-level operations.
//!
//! This module contains the implementation of cargo-ros commands.

pub mod build;
pub mod identify;

pub use build::{build_package, BuildOptions, BuildResult};
pub use identify::{discover_packages, discover_packages_with, IdentifyOptions};
