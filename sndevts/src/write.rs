//! Whole-file writes that never leave a half-written destination behind

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    fs::create_dir_all,
    io::{self, BufWriter, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Write a file by filling a temporary sibling and renaming it over `path`
///
/// Missing parent directories are created. If `fill` fails, or the rename does, the temporary
/// file is removed and whatever existed at `path` is left untouched.
pub(crate) fn write_atomically<P, F>(path: P, fill: F) -> Result<(), WriteError>
where
    P: AsRef<Path>,
    F: FnOnce(&mut dyn Write) -> Result<(), WriteError>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        fill(&mut writer)?;
        writer.flush()?;
    }

    temp.persist(path).map_err(|err| WriteError::Io(err.error))?;
    Ok(())
}

/// Serialize `value` as JSON indented by four spaces
pub(crate) fn to_writer_pretty<W, T>(writer: W, value: &T) -> Result<(), WriteError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    Ok(())
}

/// Errors that might occur writing a grouping or sound event file
#[derive(Debug, Error)]
pub enum WriteError {
    /// Creating, filling or moving the file into place failed
    #[error("Writing the file failed")]
    Io(#[from] io::Error),

    /// Serializing the contents failed
    #[error("Serializing to JSON failed")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.txt");

        write_atomically(&path, |w| Ok(w.write_all(b"first")?)).unwrap();
        write_atomically(&path, |w| Ok(w.write_all(b"second")?)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }

    #[test]
    fn failure_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "original").unwrap();

        let result = write_atomically(&path, |w| {
            w.write_all(b"partial")?;
            Err(io::Error::other("boom").into())
        });

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn four_space_indent() {
        let mut out = Vec::new();
        to_writer_pretty(&mut out, &serde_json::json!({"a": [1]})).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\n    \"a\": [\n        1\n    ]\n}");
    }
}
