//! cargo-ros CLI - identify and build ROS 2 packages written in Rust

use anyhow::Result;
use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

use cargo_ros::{GlobalContext, IdentifyError};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        report(&e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("cargo_ros=debug")
    } else {
        EnvFilter::new("cargo_ros=info")
    };

    // stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    let ctx = GlobalContext::new()?;

    match cli.command {
        Commands::Identify(args) => commands::identify::execute(args, &ctx),
        Commands::Build(args) => commands::build::execute(args, &ctx),
    }
}

/// Print an error, adding the diagnostic help for identification failures.
fn report(e: &anyhow::Error) {
    eprintln!("error: {:#}", e);

    if let Some(diagnostic) = e.downcast_ref::<IdentifyError>() {
        if let Some(help) = diagnostic.help() {
            eprintln!("help: {}", help);
        }
    }
}
