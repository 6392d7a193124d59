//! Test utilities for unit tests.
//!
//! This module is only compiled for tests. It provides fixtures that lay out
//! candidate package directories on a real (temporary) filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::PackageFixture;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let dir = PackageFixture::cargo_ros("talker").write_to(tmp.path()).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::*;
