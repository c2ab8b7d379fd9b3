//! Configuration and serialized project tests

use ptmidi::prelude::*;

use crate::helpers::*;

const PROJECT_TOML: &str = r#"
unit_names = ["Lead"]
woice_names = ["M81 saw"]

[info]
title = "From TOML"
tempo_bpm = 140.0
beats_per_measure = 4
end_tick = 0

[[records]]
unit_index = 0
kind = "Key"
tick = 0
value = 22272

[[records]]
unit_index = 0
kind = "Velocity"
tick = 0
value = 96

[[records]]
unit_index = 0
kind = "NoteOn"
tick = 0
value = 960
"#;

#[test]
fn test_project_from_toml() {
    let project: Project = toml::from_str(PROJECT_TOML).unwrap();
    assert_eq!(project.unit_count(), 1);
    assert_eq!(project.records[0].kind, EventKind::Key);

    let song = convert(&project);
    assert_eq!(song.tracks[0].name, "From TOML");
    assert_eq!(note_ons(&song.tracks[1]), vec![(0, 0, 60, 96)]);
    assert_eq!(note_offs(&song.tracks[1]), vec![(960, 60)]);
    assert_eq!(programs(&song.tracks[1]), vec![(0, 81)]);
}

#[test]
fn test_config_from_toml_drives_converter() {
    let config = ConvertConfig::from_toml_str(
        r#"
        glide_step = 20
        max_bend_range = 48
        "#,
    )
    .unwrap();
    let converter = Converter::builder().config(config).build().unwrap();
    assert_eq!(converter.config().glide_step, 20);

    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 60, 100)
        .portamento(0, 0, 100)
        .key(0, 240, 62)
        .build();
    let song = converter.convert(&project).unwrap();
    // Tick 0, samples at 240..=320 every 20 ticks, completion at 340
    assert_eq!(bends(&song.tracks[1]).len(), 1 + 5 + 1);
}

#[test]
fn test_invalid_config_file_rejected() {
    let err = ConvertConfig::from_toml_str("ticks_per_quarter = 0").unwrap_err();
    assert!(matches!(err, ptmidi::core::Error::InvalidConfig(_)));
}
