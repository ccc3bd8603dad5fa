//! Recursive discovery of sound files
use log::warn;
use std::{
    io,
    path::{absolute, Path, PathBuf},
};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Walks a root directory and lists the files beneath it
///
/// Symlinked directories are not followed, so ordinary filesystem layouts can't make the walk
/// loop forever. Symlinks pointing at regular files are listed like any other file.
///
/// ```no_run
/// # use sndevts::scan::Scanner;
/// let files = Scanner::new().extensions(["wav", "mp3"]).scan("sounds")?;
/// # Ok::<(), sndevts::scan::ScanError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Scanner {
    extensions: Vec<String>,
}

impl Scanner {
    /// A scanner that lists every file
    pub fn new() -> Self {
        Self::default()
    }

    /// Only list files with one of these (case-insensitive) extensions
    ///
    /// An empty set means every file is listed.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|extension| extension.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// List all files under `root`, at any depth, sorted by path
    ///
    /// The listed paths are absolute, even if `root` isn't, so they don't depend on the working
    /// directory the scan happened to run in.
    pub fn scan<P>(&self, root: P) -> Result<Vec<PathBuf>, ScanError>
    where
        P: AsRef<Path>,
    {
        let root = root.as_ref();

        if !root.exists() {
            return Err(ScanError::RootMissing(root.to_owned()));
        }
        if !root.is_dir() {
            return Err(ScanError::NotADirectory(root.to_owned()));
        }

        let root =
            absolute(root).map_err(|err| ScanError::RootUnresolvable(root.to_owned(), err))?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&root).follow_links(false) {
            match entry {
                Ok(entry) => {
                    if is_file(&entry) && self.accepts(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(err) if err.depth() == 0 => {
                    return Err(ScanError::RootUnreadable(root, err));
                }
                Err(err) => warn!("Skipping unreadable entry: {err}"),
            }
        }

        files.sort();
        Ok(files)
    }

    fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => self
                .extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
            None => false,
        }
    }
}

fn is_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Errors that might be returned from [`Scanner::scan()`]
#[derive(Debug, Error)]
pub enum ScanError {
    /// Nothing exists at the root path
    #[error("The root directory {} does not exist", .0.display())]
    RootMissing(PathBuf),

    /// Something exists at the root path, but it isn't a directory
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The root exists, but its contents can't be listed
    #[error("The root directory {} could not be read", .0.display())]
    RootUnreadable(PathBuf, #[source] walkdir::Error),

    /// The root could not be made absolute (e.g. the working directory is gone)
    #[error("Could not resolve the root directory {}", .0.display())]
    RootUnresolvable(PathBuf, #[source] io::Error),
}
