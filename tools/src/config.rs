//! Options shared between runs, read from a TOML file
//!
//! Everything in here can also be passed on the command line, which always wins over the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// The config file picked up from the working directory when `--config` isn't given
pub const DEFAULT_CONFIG: &str = "sndevts.toml";

/// Where the grouping is written to and read from by default
pub const DEFAULT_GROUPING_FILE: &str = "grouped_sounds.json";

/// Where the sound events are written to by default
pub const DEFAULT_OUTPUT_FILE: &str = "soundevents/soundevents_addon.vsndevts";

/// The contents of a config file
///
/// ```toml
/// root = "C:/tf2-stuff/snd-gen/sounds"
/// sounds_root = "C:/tf2-stuff/snd-gen/sounds"
/// grouping_file = "grouped_sounds.json"
/// output_file = "soundevents/soundevents_addon.vsndevts"
/// namespace = "tf"
/// qualified_keys = false
/// extensions = ["wav", "mp3"]
/// ```
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The directory `group` scans
    pub root: Option<PathBuf>,

    /// The directory file references in sound events are relative to
    pub sounds_root: Option<PathBuf>,

    pub grouping_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub namespace: Option<String>,

    #[serde(default)]
    pub qualified_keys: bool,

    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Config {
    /// Load the config at `path`, or [`DEFAULT_CONFIG`] if that exists, or nothing at all
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::from_path(DEFAULT_CONFIG),
            None => Ok(Self::default()),
        }
    }

    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;

        contents
            .parse()
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

impl std::str::FromStr for Config {
    type Err = toml::de::Error;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        toml::from_str(contents)
    }
}
