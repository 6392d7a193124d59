//! Base Cargo build task.
//!
//! Builds and installs a Cargo package with `cargo install`. Extra rustc
//! flags are appended to `RUSTFLAGS` and local dependency paths become
//! `[patch.crates-io]` entries passed through `--config`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use anyhow::{anyhow, Result};

use crate::util::fs::ensure_dir;
use crate::util::process::{find_cargo, ProcessBuilder};

/// Environment passed to a build, on top of the inherited process environment.
pub type BuildEnv = BTreeMap<String, String>;

/// Arguments for building a single package.
#[derive(Debug, Clone)]
pub struct BuildArgs {
    /// Package source directory
    pub path: PathBuf,

    /// Build directory for this package (cargo's target dir)
    pub build_base: PathBuf,

    /// Install prefix for this package
    pub install_base: PathBuf,

    /// Build with optimizations
    pub release: bool,

    /// Extra arguments appended to the cargo invocation
    pub cargo_args: Vec<String>,
}

impl BuildArgs {
    /// Arguments with the conventional `build/<name>` and `install/<name>`
    /// directories under `workspace_root`.
    pub fn for_package(path: impl Into<PathBuf>, workspace_root: &Path, name: &str) -> Self {
        BuildArgs {
            path: path.into(),
            build_base: workspace_root.join("build").join(name),
            install_base: workspace_root.join("install").join(name),
            release: false,
            cargo_args: Vec::new(),
        }
    }
}

/// A build task for one package type.
pub trait BuildTask: Send + Sync {
    /// The command that builds the package.
    fn command(&self, args: &BuildArgs, env: &BuildEnv) -> Result<ProcessBuilder>;

    /// Run the build and return cargo's exit status.
    fn build(&self, args: &BuildArgs, env: &BuildEnv) -> Result<ExitStatus> {
        ensure_dir(&args.build_base)?;

        let cmd = self.command(args, env)?;
        tracing::info!("Building {}", args.path.display());
        tracing::debug!("running `{}`", cmd.display_command());

        let status = cmd.status()?;
        if !status.success() {
            tracing::error!(
                "`{}` failed with exit code {:?}",
                cmd.display_command(),
                status.code()
            );
        }

        Ok(status)
    }
}

/// Builds plain Cargo packages.
#[derive(Debug, Clone, Default)]
pub struct CargoBuildTask {
    cargo: Option<PathBuf>,
}

impl CargoBuildTask {
    /// Create a task that looks cargo up in PATH when it runs.
    pub fn new() -> Self {
        CargoBuildTask { cargo: None }
    }

    /// Use a specific cargo executable.
    pub fn with_cargo(cargo: impl Into<PathBuf>) -> Self {
        CargoBuildTask {
            cargo: Some(cargo.into()),
        }
    }

    fn cargo(&self) -> Result<PathBuf> {
        self.cargo.clone().or_else(find_cargo).ok_or_else(|| {
            anyhow!(
                "cargo not found\n\
                 \n\
                 Install a Rust toolchain and ensure `cargo` is in your PATH."
            )
        })
    }

    /// Build the cargo command with extra rustc flags and dependency paths.
    pub fn command_with(
        &self,
        args: &BuildArgs,
        env: &BuildEnv,
        extra_flags: &[String],
        deps: &BTreeMap<String, PathBuf>,
    ) -> Result<ProcessBuilder> {
        let mut cmd = ProcessBuilder::new(self.cargo()?)
            .arg("install")
            .arg("--force")
            .arg("--path")
            .arg(&args.path)
            .arg("--root")
            .arg(&args.install_base)
            .arg("--target-dir")
            .arg(&args.build_base);

        if !args.release {
            cmd = cmd.arg("--debug");
        }

        for (name, path) in deps {
            cmd = cmd.arg("--config").arg(patch_config(name, path));
        }

        cmd = cmd.args(&args.cargo_args).envs(env).cwd(&args.path);

        if let Some(rustflags) = rustflags(env, extra_flags) {
            cmd = cmd.env("RUSTFLAGS", rustflags);
        }

        Ok(cmd)
    }
}

impl BuildTask for CargoBuildTask {
    fn command(&self, args: &BuildArgs, env: &BuildEnv) -> Result<ProcessBuilder> {
        self.command_with(args, env, &[], &BTreeMap::new())
    }
}

/// `patch.crates-io.<name>.path="<path>"` with the path as a TOML string.
fn patch_config(name: &str, path: &Path) -> String {
    let value = toml::Value::String(path.display().to_string());
    format!("patch.crates-io.{}.path={}", name, value)
}

/// Inherited `RUSTFLAGS` followed by `extra_flags`, or None if both are empty.
fn rustflags(env: &BuildEnv, extra_flags: &[String]) -> Option<String> {
    let mut flags: Vec<&str> = env
        .get("RUSTFLAGS")
        .map(|s| s.split_whitespace().collect())
        .unwrap_or_default();
    flags.extend(extra_flags.iter().map(String::as_str));

    if flags.is_empty() {
        None
    } else {
        Some(flags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BuildArgs {
        BuildArgs::for_package("/ws/src/talker", Path::new("/ws"), "talker")
    }

    #[test]
    fn test_for_package_dirs() {
        let args = args();
        assert_eq!(args.build_base, PathBuf::from("/ws/build/talker"));
        assert_eq!(args.install_base, PathBuf::from("/ws/install/talker"));
        assert!(!args.release);
    }

    #[test]
    fn test_plain_command() {
        let task = CargoBuildTask::with_cargo("cargo");
        let cmd = task.command(&args(), &BuildEnv::new()).unwrap();

        assert_eq!(
            cmd.display_command(),
            "cargo install --force --path /ws/src/talker --root /ws/install/talker \
             --target-dir /ws/build/talker --debug"
        );
        assert_eq!(cmd.get_env("RUSTFLAGS"), None);
        assert_eq!(cmd.get_cwd(), Some(Path::new("/ws/src/talker")));
    }

    #[test]
    fn test_release_and_extra_args() {
        let mut args = args();
        args.release = true;
        args.cargo_args = vec!["--locked".to_string()];

        let task = CargoBuildTask::with_cargo("cargo");
        let cmd = task.command(&args, &BuildEnv::new()).unwrap();

        assert!(!cmd.get_args().contains(&"--debug".to_string()));
        assert_eq!(cmd.get_args().last().map(String::as_str), Some("--locked"));
    }

    #[test]
    fn test_extra_flags_extend_inherited_rustflags() {
        let mut env = BuildEnv::new();
        env.insert("RUSTFLAGS".to_string(), "-C debuginfo=1".to_string());
        env.insert("ROS_DISTRO".to_string(), "humble".to_string());

        let task = CargoBuildTask::with_cargo("cargo");
        let cmd = task
            .command_with(
                &args(),
                &env,
                &["-Lnative=/opt/ros/humble/lib".to_string()],
                &BTreeMap::new(),
            )
            .unwrap();

        assert_eq!(
            cmd.get_env("RUSTFLAGS"),
            Some("-C debuginfo=1 -Lnative=/opt/ros/humble/lib")
        );
        assert_eq!(cmd.get_env("ROS_DISTRO"), Some("humble"));
    }

    #[test]
    fn test_dependency_paths_become_patches() {
        let deps = BTreeMap::from([(
            "rclrs".to_string(),
            PathBuf::from("/ws/install/rclrs/share/rclrs/rust"),
        )]);

        let task = CargoBuildTask::with_cargo("cargo");
        let cmd = task
            .command_with(&args(), &BuildEnv::new(), &[], &deps)
            .unwrap();

        let args = cmd.get_args();
        let pos = args.iter().position(|a| a == "--config").unwrap();
        assert_eq!(
            args[pos + 1],
            r#"patch.crates-io.rclrs.path="/ws/install/rclrs/share/rclrs/rust""#
        );
    }
}
