//! The `generate` subcommand

use crate::config::{Config, DEFAULT_GROUPING_FILE, DEFAULT_OUTPUT_FILE};
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use sndevts::{
    duration::SymphoniaReader,
    event::DEFAULT_NAMESPACE,
    generate::{GenerateOptions, Generator, KeyStyle},
    grouping::GroupingMap,
};
use std::path::PathBuf;

/// Arguments for the `generate` subcommand
#[derive(Args)]
#[clap(
    author,
    version,
    about = "Generate a .vsndevts file from a JSON file of sound groups",
    long_about = None
)]
pub struct GenerateArgs {
    /// The JSON file written by `group` [default: grouped_sounds.json]
    #[clap(short, long)]
    input: Option<PathBuf>,

    /// The directory file references are made relative to
    #[clap(short, long)]
    sounds_root: Option<PathBuf>,

    /// The .vsndevts file to write [default: soundevents/soundevents_addon.vsndevts]
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// The prefix of every event name and tag [default: tf]
    #[clap(short, long)]
    namespace: Option<String>,

    /// Include the directory in event names, so same-named groups don't overwrite each other
    #[clap(short, long)]
    qualified_keys: bool,

    /// List every file without decoding it, and leave out durations
    #[clap(long)]
    no_durations: bool,

    /// A TOML file to read default options from [default: sndevts.toml, if present]
    #[clap(short, long)]
    config: Option<PathBuf>,
}

/// Generate a .vsndevts file from a JSON file of sound groups
pub fn generate(args: GenerateArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;

    let input = args
        .input
        .or(config.grouping_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GROUPING_FILE));
    let output = args
        .output
        .or(config.output_file)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));
    let sounds_root = args
        .sounds_root
        .or(config.sounds_root)
        .context("No sounds root. Pass --sounds-root, or set `sounds_root` in the config file")?;
    let namespace = args
        .namespace
        .or(config.namespace)
        .unwrap_or_else(|| DEFAULT_NAMESPACE.to_owned());
    let key_style = if args.qualified_keys || config.qualified_keys {
        KeyStyle::Qualified
    } else {
        KeyStyle::Flat
    };

    if namespace.is_empty() || namespace.contains(char::is_whitespace) {
        bail!("The namespace {namespace:?} is not a valid event name prefix");
    }
    if !sounds_root.is_dir() {
        bail!("The sounds root {} does not exist", sounds_root.display());
    }

    let grouping = GroupingMap::from_path(&input)
        .with_context(|| format!("Could not read the groups from {}", input.display()))?;

    let reader = SymphoniaReader;
    let mut generator = Generator::new(&sounds_root).options(GenerateOptions {
        namespace,
        key_style,
    });
    if !args.no_durations {
        generator = generator.durations(&reader);
    }

    println!("Scanning {}", sounds_root.display());
    let events = generator.generate(&grouping);

    events
        .to_path(&output)
        .with_context(|| format!("Could not write sound events to {}", output.display()))?;

    println!(
        "Generated {} with {} sound events",
        output.display(),
        events.len().to_string().green()
    );

    Ok(())
}
