//! `cargo-ros identify` command

use anyhow::Result;

use crate::cli::IdentifyArgs;
use cargo_ros::ops::{discover_packages, IdentifyOptions};
use cargo_ros::util::GlobalContext;

pub fn execute(args: IdentifyArgs, ctx: &GlobalContext) -> Result<()> {
    let config = ctx.load_config();

    let paths: Vec<_> = args.paths.iter().map(|p| ctx.resolve(p)).collect();

    // Jobs: CLI > config > None (one per CPU)
    let opts = IdentifyOptions {
        jobs: args.jobs.or(config.discovery.jobs),
    };

    let packages = discover_packages(&paths, &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
        return Ok(());
    }

    if packages.is_empty() {
        eprintln!("No packages found");
        return Ok(());
    }

    let name_width = packages
        .iter()
        .filter_map(|p| p.name())
        .map(str::len)
        .max()
        .unwrap_or(0);
    let type_width = packages
        .iter()
        .filter_map(|p| p.package_type())
        .map(str::len)
        .max()
        .unwrap_or(0);

    for package in &packages {
        println!(
            "{:name_width$}  {:type_width$}  {}",
            package.name().unwrap_or("-"),
            package.package_type().unwrap_or("-"),
            package.path().display(),
        );
    }

    Ok(())
}
