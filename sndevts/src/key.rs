//! Group keys shared by families of numbered sound files
use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    fmt,
    path::Path,
    str::FromStr,
};
use thiserror::Error;

/// The canonical name shared by a family of numbered/variant audio files
///
/// Sound designers usually export variations of a sound as `rain1.wav`, `rain_2.wav`,
/// `rain03.wav` and so on. All of these share the key `rain`, which is derived by:
///
/// 1. Dropping the extension (everything from the last `.`, unless it's the first character)
/// 2. Dropping a trailing run of ASCII digits
/// 3. Dropping a trailing run of underscores
///
/// A key is never empty. When stripping would remove everything (e.g. `___12.wav`), the
/// extension-less file name is used as-is.
///
/// Keys read back from JSON are taken verbatim, but an empty key is still rejected.
///
/// ```
/// # use sndevts::key::GroupKey;
/// assert_eq!(GroupKey::from_file_name("bird01.wav")?.as_str(), "bird");
/// assert_eq!(GroupKey::from_file_name("bird_02.wav")?.as_str(), "bird");
/// assert_eq!(GroupKey::from_file_name("wind_loop.mp3")?.as_str(), "wind_loop");
/// # Ok::<(), sndevts::key::FromFileNameError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupKey(String);

impl GroupKey {
    /// Derive the key from a bare file name (the final path segment)
    pub fn from_file_name(file_name: &str) -> Result<Self, FromFileNameError> {
        let stem = strip_extension(file_name);
        if stem.is_empty() {
            return Err(FromFileNameError::Empty);
        }

        let key = stem
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .trim_end_matches('_');

        if key.is_empty() {
            Ok(Self(stem.to_owned()))
        } else {
            Ok(Self(key.to_owned()))
        }
    }

    /// Derive the key from the file name of a path
    pub fn from_path(path: &Path) -> Result<Self, FromFileNameError> {
        let file_name = path.file_name().ok_or(FromFileNameError::Empty)?;
        let file_name = file_name.to_str().ok_or(FromFileNameError::NotUnicode)?;

        Self::from_file_name(file_name)
    }

    /// Convert to a [`prim@str`] slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Does the case-folded key contain `needle`?
    ///
    /// `needle` is expected to be lower-case already.
    pub fn contains_folded(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

/// Strip a single trailing extension, leaving dot-files (`.hidden`) intact
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(index) if index > 0 => &file_name[..index],
        _ => file_name,
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GroupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for GroupKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for GroupKey {
    type Err = FromFileNameError;

    #[inline]
    fn from_str(str: &str) -> Result<Self, Self::Err> {
        Self::from_file_name(str)
    }
}

impl TryFrom<String> for GroupKey {
    type Error = FromFileNameError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        if key.is_empty() {
            return Err(FromFileNameError::Empty);
        }

        Ok(Self(key))
    }
}

impl From<GroupKey> for String {
    fn from(key: GroupKey) -> Self {
        key.0
    }
}

/// Errors that can result from deriving a [`GroupKey`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FromFileNameError {
    /// The path has no file name, or the name consists of nothing but an extension
    #[error("The file name is empty")]
    Empty,

    /// Keys are written to JSON, so they need to be valid UTF-8
    #[error("The file name is not valid unicode")]
    NotUnicode,
}
