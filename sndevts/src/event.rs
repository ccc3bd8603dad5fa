//! Sound events and the `.vsndevts` file they are written to
//!
//! The field names and default values in here are read by the engine, so they are not
//! tunables. Change them and the generated files stop working.

use crate::{
    key::GroupKey,
    write::{to_writer_pretty, write_atomically, WriteError},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{btree_map, BTreeMap},
    io::Write,
    path::Path,
};

/// The first line of every generated file
pub const HEADER: &str = "<!-- kv3 encoding:text:version{e21c7f3c-8a33-41c5-9977-a76d3a32aa0d} format:generic:version{7412167c-06e9-4698-aff2-e63eb59037e7} -->";

/// The namespace event keys and tags are prefixed with, unless configured otherwise
pub const DEFAULT_NAMESPACE: &str = "tf";

/// A single point on a mapping curve
///
/// `(input, output, slope in, slope out, interpolation in, interpolation out)`
pub type CurvePoint = (u32, f64, f64, f64, f64, f64);

const DISTANCE_VOLUME_CURVE: [CurvePoint; 2] = [
    (0, 1.0, 0.0, 0.0, 2.0, 3.0),
    (500, 0.5, 0.0, 0.0, 2.0, 3.0),
];

const DISTANCE_STEREO_CURVE: [CurvePoint; 2] = [
    (0, 1.0, 0.0, 0.0, 2.0, 3.0),
    (500, 1.0, 0.0, 0.0, 2.0, 3.0),
];

const TIME_VOLUME_CURVE: [CurvePoint; 2] = [
    (0, 1.0, 0.0, 0.0, 2.0, 3.0),
    (1, 1.0, 0.0, 0.0, 2.0, 3.0),
];

/// The engine-side template a sound event derives from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BaseType {
    /// Plays continuously
    #[serde(rename = "amb.looping.stereo.base")]
    Looping,

    /// Retriggers at random intervals
    #[serde(rename = "amb.intermittent.random.base")]
    IntermittentRandom,

    /// Retriggers at a fixed position in the world
    #[serde(rename = "amb.intermittent.atXYZ.base")]
    IntermittentAtPosition,
}

impl BaseType {
    /// Classify a group by (case-folded) substrings of its key
    pub fn classify(key: &GroupKey) -> Self {
        if key.contains_folded("loop") {
            Self::Looping
        } else if key.contains_folded("intermittent") {
            Self::IntermittentRandom
        } else {
            Self::IntermittentAtPosition
        }
    }

    pub fn is_looping(self) -> bool {
        self == Self::Looping
    }
}

/// Build the single tag for a group, e.g. `tf.ambient`
pub fn tag(key: &GroupKey, namespace: &str) -> String {
    if key.contains_folded("ambient") {
        format!("{namespace}.ambient")
    } else {
        format!("{namespace}.other")
    }
}

/// One named, parameterized entry in a `.vsndevts` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundEvent {
    pub base: BaseType,
    pub volume: f64,
    pub pitch: f64,
    pub mixgroup: String,
    pub enable_trigger: bool,
    pub retrigger_interval_min: u32,
    pub retrigger_interval_max: u32,
    pub position: [i32; 3],
    pub distance_volume_mapping_curve: Vec<CurvePoint>,
    pub distance_unfiltered_stereo_mapping_curve: Vec<CurvePoint>,
    pub time_volume_mapping_curve: Vec<CurvePoint>,

    /// Paths relative to the game's content root, e.g. `sounds/ambient/bird01.mp3`
    pub vsnd_files_track_01: Vec<String>,
    pub tags: Vec<String>,

    /// Average length of the files in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vsnd_duration: Option<f64>,
}

impl SoundEvent {
    /// An event with the default parameters for a group, without any files
    pub fn new(key: &GroupKey, namespace: &str) -> Self {
        Self {
            base: BaseType::classify(key),
            volume: 1.0,
            pitch: 1.0,
            mixgroup: "Ambient".to_owned(),
            enable_trigger: true,
            retrigger_interval_min: 0,
            retrigger_interval_max: 3,
            position: [0, 0, 0],
            distance_volume_mapping_curve: DISTANCE_VOLUME_CURVE.to_vec(),
            distance_unfiltered_stereo_mapping_curve: DISTANCE_STEREO_CURVE.to_vec(),
            time_volume_mapping_curve: TIME_VOLUME_CURVE.to_vec(),
            vsnd_files_track_01: Vec::new(),
            tags: vec![tag(key, namespace)],
            vsnd_duration: None,
        }
    }
}

/// A collection of named sound events, as written to a `.vsndevts` file
///
/// Events are kept (and written) in lexicographic key order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SoundEvents {
    events: BTreeMap<String, SoundEvent>,
}

impl SoundEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event, returning the one it replaced (if any)
    pub fn insert<K>(&mut self, name: K, event: SoundEvent) -> Option<SoundEvent>
    where
        K: Into<String>,
    {
        self.events.insert(name.into(), event)
    }

    pub fn get(&self, name: &str) -> Option<&SoundEvent> {
        self.events.get(name)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, SoundEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Serialize the header line and events to an arbitrary I/O writer
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), WriteError>
    where
        W: Write,
    {
        writeln!(writer, "{HEADER}")?;
        to_writer_pretty(writer, &self.events)
    }

    /// Serialize the header line and events to a file on disk
    ///
    /// An existing file is replaced. When writing fails, no partial file is left behind.
    pub fn to_path<P>(&self, path: P) -> Result<(), WriteError>
    where
        P: AsRef<Path>,
    {
        write_atomically(path, |writer| self.to_writer(writer))
    }
}

impl<'a> IntoIterator for &'a SoundEvents {
    type Item = (&'a String, &'a SoundEvent);
    type IntoIter = btree_map::Iter<'a, String, SoundEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> GroupKey {
        GroupKey::from_file_name(name).unwrap()
    }

    #[test]
    fn classification() {
        assert_eq!(BaseType::classify(&key("wind_loop")), BaseType::Looping);
        assert_eq!(BaseType::classify(&key("Wind_LOOP")), BaseType::Looping);
        assert_eq!(
            BaseType::classify(&key("crickets_intermittent")),
            BaseType::IntermittentRandom
        );
        assert_eq!(
            BaseType::classify(&key("intermittent_loop")),
            BaseType::Looping
        );
        assert_eq!(
            BaseType::classify(&key("bird")),
            BaseType::IntermittentAtPosition
        );

        assert_eq!(tag(&key("Ambient_birds"), "tf"), "tf.ambient");
        assert_eq!(tag(&key("door"), "tf"), "tf.other");
    }

    #[test]
    fn field_layout() {
        let event = SoundEvent::new(&key("bird"), DEFAULT_NAMESPACE);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "base": "amb.intermittent.atXYZ.base",
                "volume": 1.0,
                "pitch": 1.0,
                "mixgroup": "Ambient",
                "enable_trigger": true,
                "retrigger_interval_min": 0,
                "retrigger_interval_max": 3,
                "position": [0, 0, 0],
                "distance_volume_mapping_curve": [
                    [0, 1.0, 0.0, 0.0, 2.0, 3.0],
                    [500, 0.5, 0.0, 0.0, 2.0, 3.0]
                ],
                "distance_unfiltered_stereo_mapping_curve": [
                    [0, 1.0, 0.0, 0.0, 2.0, 3.0],
                    [500, 1.0, 0.0, 0.0, 2.0, 3.0]
                ],
                "time_volume_mapping_curve": [
                    [0, 1.0, 0.0, 0.0, 2.0, 3.0],
                    [1, 1.0, 0.0, 0.0, 2.0, 3.0]
                ],
                "vsnd_files_track_01": [],
                "tags": ["tf.other"]
            })
        );
    }

    #[test]
    fn header_comes_first() {
        let mut events = SoundEvents::new();
        let mut event = SoundEvent::new(&key("bird"), DEFAULT_NAMESPACE);
        event.vsnd_duration = Some(2.5);
        events.insert("tf.bird", event);

        let mut out = Vec::new();
        events.to_writer(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        let (header, body) = out.split_once('\n').unwrap();
        assert_eq!(header, HEADER);
        assert!(body.starts_with("{\n    \"tf.bird\": {\n        \"base\""));

        let parsed: BTreeMap<String, SoundEvent> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed["tf.bird"].vsnd_duration, Some(2.5));
    }

    #[test]
    fn insert_reports_replacement() {
        let mut events = SoundEvents::new();
        assert!(events.insert("tf.a", SoundEvent::new(&key("a"), "tf")).is_none());
        assert!(events.insert("tf.a", SoundEvent::new(&key("a"), "tf")).is_some());
        assert_eq!(events.len(), 1);
    }
}
