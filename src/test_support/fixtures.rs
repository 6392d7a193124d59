//! Test fixtures for package directories.

use std::path::{Path, PathBuf};

use crate::core::{CMAKE_LISTS, MANIFEST_NAME, PACKAGE_XML};

/// Fixture for a candidate package directory.
#[derive(Debug, Clone)]
pub struct PackageFixture {
    /// Directory name.
    pub name: String,
    /// Cargo.toml content, if the directory has one.
    pub manifest: Option<String>,
    /// Whether to write a package.xml.
    pub package_xml: bool,
    /// Whether to write a CMakeLists.txt.
    pub cmake: bool,
}

impl PackageFixture {
    /// Create a new empty package directory fixture.
    pub fn new(name: impl Into<String>) -> Self {
        PackageFixture {
            name: name.into(),
            manifest: None,
            package_xml: false,
            cmake: false,
        }
    }

    /// A plain Cargo package with a minimal manifest.
    pub fn cargo(name: impl Into<String>) -> Self {
        let name = name.into();
        let manifest = format!(
            r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2021"
"#
        );

        PackageFixture {
            manifest: Some(manifest),
            ..Self::new(name)
        }
    }

    /// A Cargo package that is also a ROS 2 package.
    pub fn cargo_ros(name: impl Into<String>) -> Self {
        PackageFixture {
            package_xml: true,
            ..Self::cargo(name)
        }
    }

    /// Set the manifest content.
    pub fn with_manifest(mut self, manifest: impl Into<String>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    /// Also write a CMakeLists.txt.
    pub fn with_cmake(mut self) -> Self {
        self.cmake = true;
        self
    }

    /// Write this fixture under `base_path`, returning the package directory.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        let dir = base_path.join(&self.name);
        std::fs::create_dir_all(dir.join("src"))?;

        if let Some(ref manifest) = self.manifest {
            std::fs::write(dir.join(MANIFEST_NAME), manifest)?;
            std::fs::write(dir.join("src/main.rs"), "fn main() {}\n")?;
        }

        if self.package_xml {
            std::fs::write(dir.join(PACKAGE_XML), package_xml(&self.name))?;
        }

        if self.cmake {
            std::fs::write(
                dir.join(CMAKE_LISTS),
                format!("cmake_minimum_required(VERSION 3.8)\nproject({})\n", self.name),
            )?;
        }

        Ok(dir)
    }
}

fn package_xml(name: &str) -> String {
    format!(
        r#"<?xml version="1.0"?>
<package format="3">
  <name>{name}</name>
  <version>0.1.0</version>
  <description>Test package</description>
  <maintainer email="dev@example.com">dev</maintainer>
  <license>Apache-2.0</license>
  <export>
    <build_type>cargo_ros</build_type>
  </export>
</package>
"#
    )
}
