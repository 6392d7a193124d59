//! Implementation of `cargo-ros build`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::builder::{
    BuildArgs, BuildAugmentation, BuildEnv, BuildTask, CargoBuildTask, CargoRosBuildTask,
};
use crate::core::PackageMetadata;
use crate::identification::cargo::CARGO_TYPE;
use crate::identification::cargo_ros::CARGO_ROS_TYPE;
use crate::identification::IdentificationRegistry;
use crate::util::config::Config;
use crate::util::GlobalContext;

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Build in release mode (None = use configuration, then debug)
    pub release: Option<bool>,

    /// Base directory for build output (default: `<cwd>/build`)
    pub build_base: Option<PathBuf>,

    /// Base directory for installation (default: `<cwd>/install`)
    pub install_base: Option<PathBuf>,

    /// Print the command instead of running it
    pub dry_run: bool,

    /// Extra arguments passed through to cargo
    pub cargo_args: Vec<String>,
}

/// Outcome of a build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// The identified package
    pub package: PackageMetadata,

    /// The cargo command line
    pub command: String,

    /// Whether the command was run
    pub executed: bool,
}

/// Identify the package at `path` and build it with the task for its type.
pub fn build_package(ctx: &GlobalContext, path: &Path, opts: &BuildOptions) -> Result<BuildResult> {
    let path = ctx.resolve(path);
    if !path.is_dir() {
        bail!("`{}` is not a directory", path.display());
    }

    let mut package = PackageMetadata::new(&path);
    let Some(package_type) = IdentificationRegistry::new().identify(&mut package)? else {
        bail!(
            "no package found in `{}`\n\
             hint: a Rust package needs a Cargo.toml",
            path.display()
        );
    };
    let name = package.name().unwrap_or_default().to_string();

    let config = ctx.load_config();
    let task = select_task(package_type, &config, ctx.home())?;

    let args = BuildArgs {
        path: path.clone(),
        build_base: ctx
            .resolve(opts.build_base.as_deref().unwrap_or(Path::new("build")))
            .join(&name),
        install_base: ctx
            .resolve(opts.install_base.as_deref().unwrap_or(Path::new("install")))
            .join(&name),
        release: opts.release.or(config.build.release).unwrap_or(false),
        cargo_args: opts.cargo_args.clone(),
    };
    let env = inherited_env();

    let command = task.command(&args, &env)?.display_command();

    if opts.dry_run {
        return Ok(BuildResult {
            package,
            command,
            executed: false,
        });
    }

    let status = task
        .build(&args, &env)
        .with_context(|| format!("failed to build package `{}`", name))?;
    if !status.success() {
        bail!("failed to build package `{}`", name);
    }

    Ok(BuildResult {
        package,
        command,
        executed: true,
    })
}

/// The build task for a package type.
fn select_task(
    package_type: &str,
    config: &Config,
    home: Option<&Path>,
) -> Result<Box<dyn BuildTask>> {
    let base = match config.build.cargo {
        Some(ref cargo) => CargoBuildTask::with_cargo(cargo),
        None => CargoBuildTask::new(),
    };

    match package_type {
        CARGO_ROS_TYPE => {
            let augmentation = BuildAugmentation::from_config(&config.build, home);
            Ok(Box::new(CargoRosBuildTask::new(base, augmentation)))
        }
        CARGO_TYPE => Ok(Box::new(base)),
        other => bail!("don't know how to build `{}` packages", other),
    }
}

/// Variables from the current environment forwarded to the build.
fn inherited_env() -> BuildEnv {
    let mut env = BuildEnv::new();
    if let Ok(rustflags) = std::env::var("RUSTFLAGS") {
        env.insert("RUSTFLAGS".to_string(), rustflags);
    }
    env
}
