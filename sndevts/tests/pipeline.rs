use anyhow::Result;
use sndevts::{
    event::{SoundEvent, HEADER},
    generate::Generator,
    grouping::{normalize_directory, GroupingMap},
    scan::Scanner,
};
use std::{collections::BTreeMap, fs, path::Path};

fn touch(path: &Path) -> Result<()> {
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(path, b"")?;
    Ok(())
}

#[test]
fn scan_group_generate() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("Sounds");
    touch(&root.join("ambient/bird01.mp3"))?;
    touch(&root.join("ambient/bird02.mp3"))?;
    touch(&root.join("ambient/Creek_Loop.wav"))?;
    touch(&root.join("Weather/thunder_intermittent_3.wav"))?;

    // Stage 1
    let files = Scanner::new().scan(&root)?;
    let grouping = GroupingMap::from_paths(&files);

    let ambient = normalize_directory(&root.join("ambient").to_string_lossy());
    let weather = normalize_directory(&root.join("Weather").to_string_lossy());
    assert!(ambient.ends_with("/sounds/ambient"));

    let expected = serde_json::json!({
        ambient: {
            "Creek_Loop": ["Creek_Loop.wav"],
            "bird": ["bird01.mp3", "bird02.mp3"],
        },
        weather: {
            "thunder_intermittent": ["thunder_intermittent_3.wav"],
        },
    });
    assert_eq!(serde_json::to_value(&grouping)?, expected);

    let grouping_path = dir.path().join("grouped_sounds.json");
    grouping.to_path(&grouping_path)?;

    // Stage 2
    let grouping = GroupingMap::from_path(&grouping_path)?;
    let reader = |path: &Path| match path.file_name()?.to_str()? {
        "bird01.mp3" => Some(1.0),
        "bird02.mp3" => Some(2.0),
        "Creek_Loop.wav" => Some(30.0),
        _ => None,
    };
    let events = Generator::new(&root).durations(&reader).generate(&grouping);

    let output = dir.path().join("soundevents/soundevents_addon.vsndevts");
    events.to_path(&output)?;

    let contents = fs::read_to_string(&output)?;
    let (header, body) = contents.split_once('\n').unwrap();
    assert_eq!(header, HEADER);

    let written: BTreeMap<String, SoundEvent> = serde_json::from_str(body)?;
    assert_eq!(
        written.keys().collect::<Vec<_>>(),
        vec!["tf.Creek_Loop", "tf.bird", "tf.thunder_intermittent"]
    );

    let bird = &written["tf.bird"];
    assert_eq!(
        bird.vsnd_files_track_01,
        vec!["sounds/ambient/bird01.mp3", "sounds/ambient/bird02.mp3"]
    );
    assert_eq!(bird.vsnd_duration, Some(1.5));

    let creek = &written["tf.Creek_Loop"];
    assert_eq!(creek.vsnd_files_track_01, vec!["sounds/ambient/creek_loop.wav"]);
    assert_eq!(creek.vsnd_duration, None);

    // Undecodable, so left out entirely
    let thunder = &written["tf.thunder_intermittent"];
    assert!(thunder.vsnd_files_track_01.is_empty());
    assert_eq!(thunder.vsnd_duration, None);

    let raw: serde_json::Value = serde_json::from_str(body)?;
    assert_eq!(raw["tf.thunder_intermittent"]["base"], "amb.intermittent.random.base");
    assert_eq!(raw["tf.bird"]["tags"][0], "tf.other");
    assert!(raw["tf.Creek_Loop"].get("vsnd_duration").is_none());

    Ok(())
}

#[test]
fn empty_root_gives_an_empty_grouping() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let files = Scanner::new().scan(dir.path())?;
    let grouping = GroupingMap::from_paths(&files);
    assert!(grouping.is_empty());

    let path = dir.path().join("grouped_sounds.json");
    grouping.to_path(&path)?;
    assert_eq!(fs::read_to_string(&path)?, "{}");

    Ok(())
}

#[test]
fn unwritable_destination_leaves_nothing_behind() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"a file, not a directory")?;

    let grouping = GroupingMap::from_paths(["/snd/a/door1.wav"]);
    assert!(grouping.to_path(blocker.join("grouped_sounds.json")).is_err());

    let events = Generator::new("/snd").generate(&grouping);
    assert!(events.to_path(blocker.join("out.vsndevts")).is_err());

    assert_eq!(fs::read_to_string(&blocker)?, "a file, not a directory");
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);

    Ok(())
}
