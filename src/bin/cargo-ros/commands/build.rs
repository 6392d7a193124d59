//! `cargo-ros build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use cargo_ros::ops::{build_package, BuildOptions};
use cargo_ros::util::GlobalContext;

pub fn execute(args: BuildArgs, ctx: &GlobalContext) -> Result<()> {
    // Profile: CLI > config > debug
    let release = match (args.release, args.debug) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    let opts = BuildOptions {
        release,
        build_base: args.build_base,
        install_base: args.install_base,
        dry_run: args.dry_run,
        cargo_args: args.cargo_args,
    };

    let result = build_package(ctx, &args.path, &opts)?;

    if !result.executed {
        println!("{}", result.command);
        return Ok(());
    }

    eprintln!(
        "    Finished `{}` -> {}",
        result.package.name().unwrap_or_default(),
        result.package.path().display()
    );

    Ok(())
}
