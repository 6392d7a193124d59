//! cargo-ros - identify and build ROS 2 packages written in Rust
//!
//! This crate provides the library behind the `cargo-ros` command: manifest
//! inspection, package identification, and the cargo build tasks.

pub mod builder;
pub mod core;
pub mod identification;
pub mod ops;
pub mod util;

/// Test utilities for cargo-ros unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides package directory fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{DependencyClass, Manifest, PackageMetadata};
pub use identification::{IdentificationRegistry, IdentifyError, PackageIdentification};
pub use util::context::GlobalContext;
