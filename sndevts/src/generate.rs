//! Turning a [`GroupingMap`] into [`SoundEvents`]

use crate::{
    duration::DurationReader,
    event::{SoundEvent, SoundEvents, DEFAULT_NAMESPACE},
    grouping::{normalize_directory, GroupingMap},
    key::GroupKey,
};
use log::{debug, warn};
use std::{
    borrow::Cow,
    env, fs,
    path::{absolute, Path, PathBuf},
};

/// How event keys are built from a group
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// `<namespace>.<group key>`
    ///
    /// Same-named groups from different directories collapse into one event. The directory
    /// that sorts last wins, and every overwrite is logged.
    #[default]
    Flat,

    /// `<namespace>.<relative.directory>.<group key>`, which never collides
    Qualified,
}

/// Knobs for [`Generator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Prefix for event keys and tags
    pub namespace: String,
    pub key_style: KeyStyle,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_owned(),
            key_style: KeyStyle::default(),
        }
    }
}

/// Generates sound events for every group in a [`GroupingMap`]
///
/// Every directory in the grouping is expressed relative to the sounds root. File references in
/// the events look like `sounds/<relative directory>/<lower-cased file name>`. A relative sounds
/// root, and relative directories in the grouping, are taken relative to the working directory.
///
/// Without a [`DurationReader`], every file is listed and no durations are computed. With one,
/// files whose duration can't be read are left out of the event, and non-looping events get a
/// `vsnd_duration`: the sum of the durations that _could_ be read, divided by the number of
/// files in the group.
///
/// ```no_run
/// # use sndevts::{duration::SymphoniaReader, generate::Generator, grouping::GroupingMap};
/// let grouping = GroupingMap::from_path("grouped_sounds.json")?;
/// let events = Generator::new("/snd/sounds")
///     .durations(&SymphoniaReader)
///     .generate(&grouping);
///
/// events.to_path("soundevents/soundevents_addon.vsndevts")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Generator<'a> {
    sounds_root: PathBuf,
    normalized_root: String,
    working_directory: Option<String>,
    options: GenerateOptions,
    reader: Option<&'a dyn DurationReader>,
}

impl<'a> Generator<'a> {
    pub fn new<P>(sounds_root: P) -> Self
    where
        P: Into<PathBuf>,
    {
        let sounds_root = sounds_root.into();
        let sounds_root = absolute(&sounds_root).unwrap_or(sounds_root);
        let normalized_root = normalize_directory(&sounds_root.to_string_lossy());
        let working_directory = env::current_dir()
            .ok()
            .map(|cwd| normalize_directory(&cwd.to_string_lossy()));

        Self {
            sounds_root,
            normalized_root,
            working_directory,
            options: GenerateOptions::default(),
            reader: None,
        }
    }

    pub fn options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Read file durations with `reader`
    pub fn durations(mut self, reader: &'a dyn DurationReader) -> Self {
        self.reader = Some(reader);
        self
    }

    /// Generate one event per group
    ///
    /// Directories outside of the sounds root are logged and skipped.
    pub fn generate(&self, grouping: &GroupingMap) -> SoundEvents {
        let mut events = SoundEvents::new();

        for (directory, groups) in grouping {
            let anchored = self.anchor(directory);
            let Some(relative) = relative_directory(&anchored, &self.normalized_root) else {
                warn!(
                    "Skipping {directory}: it is not inside the sounds root {}",
                    self.normalized_root
                );
                continue;
            };

            let location = self
                .reader
                .map(|_| resolve_directory(&self.sounds_root, &relative));

            for (key, files) in groups {
                let event = self.event(&relative, location.as_deref(), key, files);
                let name = self.event_name(&relative, key);

                debug!("{name}: {} file(s)", event.vsnd_files_track_01.len());

                if events.insert(name.as_str(), event).is_some() {
                    warn!("{name} from {directory} replaces an earlier event with the same name");
                }
            }
        }

        events
    }

    /// Make a relative grouping directory absolute against the working directory
    fn anchor<'d>(&self, directory: &'d str) -> Cow<'d, str> {
        match &self.working_directory {
            Some(cwd) if !Path::new(directory).has_root() => {
                Cow::Owned(normalize_directory(&format!("{cwd}/{directory}")))
            }
            _ => Cow::Borrowed(directory),
        }
    }

    fn event(
        &self,
        relative: &str,
        location: Option<&Path>,
        key: &GroupKey,
        files: &[String],
    ) -> SoundEvent {
        let mut event = SoundEvent::new(key, &self.options.namespace);

        let mut total = 0.0;
        let mut read = 0usize;

        for file in files {
            if let (Some(reader), Some(location)) = (self.reader, location) {
                let path = location.join(file);
                match reader.duration(&path) {
                    Some(duration) => {
                        total += duration;
                        read += 1;
                    }
                    None => {
                        warn!("Could not read {}, leaving it out", path.display());
                        continue;
                    }
                }
            }

            event.vsnd_files_track_01.push(sound_path(relative, file));
        }

        // Divided by the full group size, unreadable files included
        if read > 0 && !event.base.is_looping() {
            event.vsnd_duration = Some(total / files.len() as f64);
        }

        event
    }

    fn event_name(&self, relative: &str, key: &GroupKey) -> String {
        let namespace = &self.options.namespace;

        match self.options.key_style {
            KeyStyle::Flat => format!("{namespace}.{key}"),
            KeyStyle::Qualified if relative.is_empty() => format!("{namespace}.{key}"),
            KeyStyle::Qualified => format!("{namespace}.{}.{key}", relative.replace('/', ".")),
        }
    }
}

/// Express a normalized directory relative to a normalized root
///
/// Returns `None` if `directory` doesn't live under `root`, and an empty string if it _is_ the
/// root.
pub fn relative_directory(directory: &str, root: &str) -> Option<String> {
    if directory == root {
        return Some(String::new());
    }

    let rest = directory.strip_prefix(root)?;
    if root.is_empty() || root.ends_with('/') {
        Some(rest.to_owned())
    } else {
        rest.strip_prefix('/').map(str::to_owned)
    }
}

/// The reference to a file as written into an event
fn sound_path(relative: &str, file: &str) -> String {
    if relative.is_empty() {
        format!("sounds/{}", file.to_lowercase())
    } else {
        format!("sounds/{relative}/{}", file.to_lowercase())
    }
}

/// Find the on-disk directory a lower-cased relative directory refers to
///
/// Groupings store lower-cased directories, which don't exist as such on case-sensitive
/// filesystems. Every segment is matched case-insensitively against the real entries.
fn resolve_directory(root: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(root.to_owned(), |path, segment| find_entry(&path, segment))
}

fn find_entry(directory: &Path, lowercase_name: &str) -> PathBuf {
    let exact = directory.join(lowercase_name);
    if exact.exists() {
        return exact;
    }

    fs::read_dir(directory)
        .ok()
        .and_then(|entries| {
            entries.filter_map(Result::ok).find(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.to_lowercase() == lowercase_name)
            })
        })
        .map(|entry| entry.path())
        .unwrap_or(exact)
}
