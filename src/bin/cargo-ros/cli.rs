//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// cargo-ros - identify and build ROS 2 packages written in Rust
#[derive(Parser)]
#[command(name = "cargo-ros")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find and identify packages below the given paths
    Identify(IdentifyArgs),

    /// Build and install a single package
    Build(BuildArgs),
}

#[derive(Args)]
pub struct IdentifyArgs {
    /// Directories to search
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Print packages as JSON, including dependencies
    #[arg(long)]
    pub json: bool,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Package directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Build with optimizations
    #[arg(long, conflicts_with = "debug")]
    pub release: bool,

    /// Build without optimizations, overriding configuration
    #[arg(long)]
    pub debug: bool,

    /// Base directory for build output
    #[arg(long)]
    pub build_base: Option<PathBuf>,

    /// Base directory for installation
    #[arg(long)]
    pub install_base: Option<PathBuf>,

    /// Print the cargo command instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Extra arguments passed to cargo
    #[arg(last = true)]
    pub cargo_args: Vec<String>,
}
