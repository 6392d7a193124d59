//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.cargo-ros/config.toml` - User-wide defaults
//! - Project: `.cargo-ros/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration directory name, both in the home and project directory.
pub const CONFIG_DIR: &str = ".cargo-ros";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build settings
    pub build: BuildConfig,

    /// Package discovery settings
    pub discovery: DiscoveryConfig,
}

/// Build-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BuildConfig {
    /// Cargo executable (None = look up in PATH)
    pub cargo: Option<PathBuf>,

    /// Build in release mode by default (None = debug)
    pub release: Option<bool>,

    /// Native library directories passed as `-Lnative=<dir>`
    pub native_lib_dirs: Option<Vec<PathBuf>>,

    /// Local paths for workspace dependencies, keyed by crate name
    pub dependency_paths: Option<BTreeMap<String, PathBuf>>,
}

/// Discovery-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Number of parallel identification jobs (None = one per CPU)
    pub jobs: Option<usize>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.build.cargo.is_some() {
            self.build.cargo = other.build.cargo;
        }
        if other.build.release.is_some() {
            self.build.release = other.build.release;
        }
        // tables replace rather than extend
        if other.build.native_lib_dirs.is_some() {
            self.build.native_lib_dirs = other.build.native_lib_dirs;
        }
        if other.build.dependency_paths.is_some() {
            self.build.dependency_paths = other.build.dependency_paths;
        }

        if other.discovery.jobs.is_some() {
            self.discovery.jobs = other.discovery.jobs;
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.cargo-ros/config.toml)
/// 2. Global config (~/.cargo-ros/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        config.merge(Config::load_or_default(global_path));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the project config path (.cargo-ros/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.build.cargo.is_none());
        assert!(config.build.release.is_none());
        assert!(config.build.native_lib_dirs.is_none());
        assert!(config.build.dependency_paths.is_none());
        assert!(config.discovery.jobs.is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[build]
cargo = "/usr/local/bin/cargo"
native-lib-dirs = ["/opt/ros/humble/lib"]

[build.dependency-paths]
rclrs = "/ws/install/rclrs/share/rclrs/rust"

[discovery]
jobs = 4
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.build.cargo, Some(PathBuf::from("/usr/local/bin/cargo")));
        assert_eq!(
            config.build.native_lib_dirs,
            Some(vec![PathBuf::from("/opt/ros/humble/lib")])
        );
        assert_eq!(
            config.build.dependency_paths.unwrap()["rclrs"],
            PathBuf::from("/ws/install/rclrs/share/rclrs/rust")
        );
        assert_eq!(config.discovery.jobs, Some(4));
    }

    #[test]
    fn test_config_load_invalid_falls_back() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[build\n").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert!(config.build.cargo.is_none());
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.build.cargo = Some(PathBuf::from("/usr/bin/cargo"));
        base.build.native_lib_dirs = Some(vec![PathBuf::from("/opt/ros/foxy/lib")]);

        let mut override_cfg = Config::default();
        override_cfg.build.native_lib_dirs = Some(vec![PathBuf::from("/opt/ros/humble/lib")]);

        base.merge(override_cfg);

        assert_eq!(base.build.cargo, Some(PathBuf::from("/usr/bin/cargo")));
        assert_eq!(
            base.build.native_lib_dirs,
            Some(vec![PathBuf::from("/opt/ros/humble/lib")])
        );
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[build]
cargo = "/usr/bin/cargo"

[discovery]
jobs = 2
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[discovery]
jobs = 8
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);

        assert_eq!(config.build.cargo, Some(PathBuf::from("/usr/bin/cargo")));
        assert_eq!(config.discovery.jobs, Some(8));
    }

    #[test]
    fn test_project_release_false_overrides_global() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(&global_path, "[build]\nrelease = true\n").unwrap();
        std::fs::write(&project_path, "[build]\nrelease = false\n").unwrap();

        let config = load_config(Some(&global_path), &project_path);
        assert_eq!(config.build.release, Some(false));

        // a project file that says nothing keeps the global setting
        std::fs::write(&project_path, "[discovery]\njobs = 2\n").unwrap();
        let config = load_config(Some(&global_path), &project_path);
        assert_eq!(config.build.release, Some(true));
    }
}
