//! The `group` subcommand

use crate::config::{Config, DEFAULT_GROUPING_FILE};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use log::info;
use sndevts::{grouping::GroupingMap, scan::Scanner};
use std::path::PathBuf;

/// Arguments for the `group` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Group sound files by directory and name, and write the groups to JSON",
    long_about = "Group walks a directory recursively and groups the files it finds by directory and name.\n\nNumbered variations of a sound share a group: rain1.wav, rain_2.wav and rain.wav all end up in the group \"rain\".\n\nThe outcome is written to a JSON file, which the generate subcommand turns into sound events."
)]
pub struct GroupArgs {
    /// The directory to scan for sounds
    root: Option<PathBuf>,

    /// The JSON file the groups are written to [default: grouped_sounds.json]
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Only group files with this extension (can be repeated)
    #[clap(short, long = "extension")]
    extensions: Vec<String>,

    /// A TOML file to read default options from [default: sndevts.toml, if present]
    #[clap(short, long)]
    config: Option<PathBuf>,
}

/// Group sound files by directory and name, and write the groups to JSON
pub fn group(args: GroupArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let root = args
        .root
        .or(config.root)
        .context("No directory to scan. Pass one, or set `root` in the config file")?;
    let output = args
        .output
        .or(config.grouping_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GROUPING_FILE));
    let extensions = if args.extensions.is_empty() {
        config.extensions
    } else {
        args.extensions
    };

    let files = Scanner::new()
        .extensions(&extensions)
        .scan(&root)
        .context("Could not scan for sounds")?;
    info!("Found {} file(s) in {}", files.len(), root.display());

    let grouping = GroupingMap::from_paths(&files);
    grouping
        .to_path(&output)
        .with_context(|| format!("Could not write the groups to {}", output.display()))?;

    println!(
        "Wrote {} directories ({} groups) to {}",
        grouping.len().to_string().green(),
        grouping.group_count().to_string().green(),
        output.display()
    );

    Ok(())
}
