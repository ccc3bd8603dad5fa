//! # Sound Event Tools
//!
//! Source 2 games describe their sounds in `.vsndevts` files: every sound event names a set of
//! audio files and a bunch of playback parameters. Writing these by hand for a folder with
//! hundreds of ambient sounds gets old fast. This crate provides a command-line utility that
//! does it in two steps: first group the files, then generate the events.
//!
//! Options can be passed on the command line, or put in a `sndevts.toml` next to where you
//! run the tool (or anywhere else, with `--config`). The command line always wins.
//!
//! Set `RUST_LOG=info` (or `debug`) to see what's going on, e.g. which files couldn't be decoded.
//!
//! ## Group
//!
//! ```console
//! sndevts-tools-group 0.1.0
//! Group sound files by directory and name, and write the groups to JSON
//!
//! USAGE:
//!     sndevts-tools group [OPTIONS] [ROOT]
//!
//! ARGS:
//!     <ROOT>    The directory to scan for sounds
//!
//! OPTIONS:
//!     -c, --config <CONFIG>          A TOML file to read default options from
//!     -e, --extension <EXTENSIONS>   Only group files with this extension (can be repeated)
//!     -h, --help                     Print help information
//!     -o, --output <OUTPUT>          The JSON file the groups are written to
//!     -V, --version                  Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! $ sndevts-tools group ~/addon/sounds -e wav -e mp3
//! Wrote 3 directories (11 groups) to grouped_sounds.json
//! ```
//!
//! ## Inspect
//!
//! ```console
//! $ sndevts-tools inspect
//! /home/me/addon/sounds/ambient
//!   xyz  bird                               4
//!   loop creek_loop                         1
//!   rand crickets_intermittent              6
//!
//! 1 directories, 3 groups
//! ```
//!
//! ## Generate
//!
//! ```console
//! sndevts-tools-generate 0.1.0
//! Generate a .vsndevts file from a JSON file of sound groups
//!
//! USAGE:
//!     sndevts-tools generate [OPTIONS]
//!
//! OPTIONS:
//!     -c, --config <CONFIG>              A TOML file to read default options from
//!     -h, --help                         Print help information
//!     -i, --input <INPUT>                The JSON file written by `group`
//!     -n, --namespace <NAMESPACE>        The prefix of every event name and tag
//!         --no-durations                 List every file without decoding it
//!     -o, --output <OUTPUT>              The .vsndevts file to write
//!     -q, --qualified-keys               Include the directory in event names
//!     -s, --sounds-root <SOUNDS_ROOT>    The directory file references are made relative to
//!     -V, --version                      Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! $ sndevts-tools generate -s ~/addon/sounds
//! Scanning /home/me/addon/sounds
//! Generated soundevents/soundevents_addon.vsndevts with 11 sound events
//! ```

pub mod config;
pub mod generate;
pub mod group;
pub mod inspect;
