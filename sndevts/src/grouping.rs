//! Grouping sound files by directory and [`GroupKey`]
//!
//! The grouping is the hand-off between the two stages: it's built from a directory scan,
//! persisted to JSON, (optionally) tweaked by hand, and then read back to generate sound
//! events from.

use crate::{
    key::GroupKey,
    write::{to_writer_pretty, write_atomically, WriteError},
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    collections::{btree_map, BTreeMap},
    fs::File,
    io::{self, BufReader, Read, Write},
    path::Path,
};
use thiserror::Error;

/// Directory segments matching this (case-insensitively) are folded to `sounds`
pub const SOUNDS_MARKER: &str = "sounds";

/// Files of one directory, grouped by key
pub type Groups = BTreeMap<GroupKey, Vec<String>>;

/// Normalized directory → group key → file names
///
/// Directories are stored in their normalized form (see [`normalize_directory()`]). Directories,
/// keys and file names are all kept in lexicographic order, so the same set of files always
/// produces the same grouping, no matter what order the filesystem listed them in.
///
/// ```no_run
/// # use sndevts::{grouping::GroupingMap, scan::Scanner};
/// let files = Scanner::new().scan("/snd")?;
/// let grouping = GroupingMap::from_paths(&files);
/// grouping.to_path("grouped_sounds.json")?;
///
/// let grouping = GroupingMap::from_path("grouped_sounds.json")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupingMap {
    directories: BTreeMap<String, Groups>,
}

impl GroupingMap {
    /// An empty grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a set of file paths by their (normalized) directory and key
    ///
    /// Paths without a usable file name are logged and skipped.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let mut grouping = Self::new();

        for path in paths {
            let path = path.as_ref();

            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                warn!("Skipping {}: the file name is not valid unicode", path.display());
                continue;
            };

            let key = match GroupKey::from_file_name(file_name) {
                Ok(key) => key,
                Err(err) => {
                    warn!("Skipping {}: {err}", path.display());
                    continue;
                }
            };

            let directory = path
                .parent()
                .map(|parent| normalize_directory(&parent.to_string_lossy()))
                .unwrap_or_default();

            grouping.insert(directory, key, file_name);
        }

        grouping
    }

    /// Add a single file to a group, keeping the group sorted
    pub fn insert<D, F>(&mut self, directory: D, key: GroupKey, file_name: F)
    where
        D: Into<String>,
        F: Into<String>,
    {
        let files = self
            .directories
            .entry(directory.into())
            .or_default()
            .entry(key)
            .or_default();

        let file_name = file_name.into();
        let index = files.partition_point(|existing| *existing < file_name);
        files.insert(index, file_name);
    }

    /// The groups found in a specific (normalized) directory
    pub fn groups(&self, directory: &str) -> Option<&Groups> {
        self.directories.get(directory)
    }

    /// Iterate over all directories and their groups, in lexicographic order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Groups> {
        self.directories.iter()
    }

    /// The number of directories
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// Are there _any_ directories?
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// The number of groups across all directories
    pub fn group_count(&self) -> usize {
        self.directories.values().map(BTreeMap::len).sum()
    }

    /// Deserialize a grouping from an arbitrary I/O reader
    pub fn from_reader<R>(reader: R) -> Result<Self, serde_json::Error>
    where
        R: Read,
    {
        serde_json::from_reader(reader)
    }

    /// Deserialize a grouping from a JSON file on disk
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        let grouping = Self::from_reader(BufReader::new(file))?;

        Ok(grouping)
    }

    /// Serialize the grouping to an arbitrary I/O writer
    pub fn to_writer<W>(&self, writer: W) -> Result<(), WriteError>
    where
        W: Write,
    {
        to_writer_pretty(writer, self)
    }

    /// Serialize the grouping to a JSON file on disk
    ///
    /// An existing file is replaced. When writing fails, no partial file is left behind.
    pub fn to_path<P>(&self, path: P) -> Result<(), WriteError>
    where
        P: AsRef<Path>,
    {
        write_atomically(path, |writer| self.to_writer(writer))
    }
}

impl<'a> IntoIterator for &'a GroupingMap {
    type Item = (&'a String, &'a Groups);
    type IntoIter = btree_map::Iter<'a, String, Groups>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<(String, Groups)> for GroupingMap {
    fn from_iter<T: IntoIterator<Item = (String, Groups)>>(iter: T) -> Self {
        Self {
            directories: iter.into_iter().collect(),
        }
    }
}

/// Normalize a directory to lower-case, forward-slash form
///
/// Backslashes become slashes, repeated and trailing slashes are dropped, `.` segments are
/// removed and `..` segments cancel the segment before them. Any segment that spells
/// [`SOUNDS_MARKER`] in whatever case is folded to `sounds`.
///
/// ```
/// # use sndevts::grouping::normalize_directory;
/// assert_eq!(normalize_directory(r"C:\Games\SOUNDS\Ambient"), "c:/games/sounds/ambient");
/// assert_eq!(normalize_directory("/snd//Ambient/"), "/snd/ambient");
/// assert_eq!(normalize_directory("./snd/x/../Ambient"), "snd/ambient");
/// ```
pub fn normalize_directory(directory: &str) -> String {
    let directory = directory.replace('\\', "/");
    let absolute = directory.starts_with('/');

    let mut segments: Vec<String> = Vec::new();
    for segment in directory.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if last != ".." => {
                    segments.pop();
                }
                // Nothing above the filesystem root
                _ if absolute => {}
                _ => segments.push("..".to_owned()),
            },
            segment if segment.eq_ignore_ascii_case(SOUNDS_MARKER) => {
                segments.push(SOUNDS_MARKER.to_owned())
            }
            segment => segments.push(segment.to_lowercase()),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Errors that might be returned from [`GroupingMap::from_path()`]
#[derive(Debug, Error)]
pub enum FromPathError {
    /// Opening the file itself failed
    #[error("Opening the grouping file failed")]
    FileOpen(#[from] io::Error),

    /// The file isn't a valid grouping
    #[error("Parsing the grouping file failed")]
    Parse(#[from] serde_json::Error),
}
