//! Global context for operations.
//!
//! Provides centralized access to the working directory, the user's home
//! directory and configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// User home directory, if one could be determined
    home: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = directories::BaseDirs::new().map(|b| b.home_dir().to_path_buf());

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Override the home directory.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the user home directory.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.home
            .as_ref()
            .map(|home| home.join(config::CONFIG_DIR).join("config.toml"))
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        config::project_config_path(&self.cwd)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        config::load_config(self.config_path().as_deref(), &self.project_config_path())
    }

    /// Resolve a possibly relative path against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.project_config_path().ends_with(".cargo-ros/config.toml"));
    }

    #[test]
    fn test_load_project_config() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().join(".cargo-ros");
        std::fs::create_dir(&config_dir).unwrap();
        std::fs::write(config_dir.join("config.toml"), "[discovery]\njobs = 3\n").unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(None);

        assert_eq!(ctx.config_path(), None);
        assert_eq!(ctx.load_config().discovery.jobs, Some(3));
    }

    #[test]
    fn test_resolve() {
        let ctx = GlobalContext::with_cwd(PathBuf::from("/ws")).unwrap();
        assert_eq!(ctx.resolve(Path::new("src/talker")), PathBuf::from("/ws/src/talker"));
        assert_eq!(ctx.resolve(Path::new("/opt/pkg")), PathBuf::from("/opt/pkg"));
    }
}
