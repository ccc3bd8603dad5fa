//! The `inspect` subcommand

use crate::config::{Config, DEFAULT_GROUPING_FILE};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sndevts::{
    event::BaseType,
    grouping::{GroupingMap, Groups},
};
use std::path::PathBuf;

/// Arguments for the `inspect` subcommand
#[derive(Args)]
#[clap(author, version, about = "Print the groups in a JSON file written by `group`", long_about = None)]
pub struct InspectArgs {
    /// The JSON file to inspect [default: grouped_sounds.json]
    path: Option<PathBuf>,

    /// List the files in every group
    #[clap(short, long)]
    files: bool,

    /// A TOML file to read default options from [default: sndevts.toml, if present]
    #[clap(short, long)]
    config: Option<PathBuf>,
}

/// Print the groups in a JSON file written by `group`
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let path = args
        .path
        .clone()
        .or(config.grouping_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GROUPING_FILE));

    let grouping = GroupingMap::from_path(&path)
        .with_context(|| format!("Could not read the groups from {}", path.display()))?;

    let directories: Vec<_> = grouping.iter().collect();
    if let Some((last, rest)) = directories.split_last() {
        for (directory, groups) in rest {
            print(directory, groups, args.files);
            println!();
        }

        print(last.0, last.1, args.files);
    }

    println!(
        "\n{} directories, {} groups",
        grouping.len().to_string().green(),
        grouping.group_count().to_string().green()
    );

    Ok(())
}

fn print(directory: &str, groups: &Groups, files: bool) {
    println!("{}", directory.bold());

    for (key, names) in groups {
        let kind = match BaseType::classify(key) {
            BaseType::Looping => "loop",
            BaseType::IntermittentRandom => "rand",
            BaseType::IntermittentAtPosition => "xyz ",
        };

        println!("  {} {:<32} {:>3}", kind.dimmed(), key.as_str(), names.len().to_string().blue());

        if files {
            for name in names {
                println!("         {}", name.dimmed());
            }
        }
    }
}
