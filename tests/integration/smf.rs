//! Standard MIDI File output tests

use midly::{Format, MetaMessage, Smf, Timing, TrackEventKind};
use ptmidi::prelude::*;

use crate::helpers::*;

fn glide_project() -> Project {
    ProjectFixture::new(2)
        .woice("M81 lead")
        .note(0, 0, 480, 60, 100)
        .portamento(0, 0, 120)
        .key(0, 240, 67)
        .note(1, 240, 240, 48, 70)
        .build()
}

#[test]
fn test_smf_header_and_track_count() {
    let song = convert(&glide_project());
    let bytes = song.to_bytes().unwrap();
    let smf = Smf::parse(&bytes).unwrap();

    assert_eq!(smf.header.format, Format::Parallel);
    assert!(matches!(smf.header.timing, Timing::Metrical(t) if t.as_int() == 480));
    assert_eq!(smf.tracks.len(), 3);
    for track in &smf.tracks {
        assert_eq!(
            track.last().map(|e| e.kind),
            Some(TrackEventKind::Meta(MetaMessage::EndOfTrack))
        );
    }
}

#[test]
fn test_delta_times_reconstruct_ticks() {
    let song = convert(&glide_project());
    let bytes = song.to_bytes().unwrap();
    let smf = Smf::parse(&bytes).unwrap();

    let total: u32 = smf.tracks[1].iter().map(|e| e.delta.as_int()).sum();
    assert_eq!(total, song.tracks[1].last_tick());
}

#[test]
fn test_parse_back_matches_song() {
    let song = convert(&glide_project());
    let parsed = MidiSong::parse(&song.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed, song);
}

#[test]
fn test_convert_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("glide.mid");

    let converter = Converter::builder().build().unwrap();
    let song = converter.convert_to_file(&glide_project(), &path).unwrap();

    let loaded = MidiSong::load(&path).unwrap();
    assert_eq!(loaded, song);
    assert_eq!(loaded.tracks[1].name, "unit0");
}

#[test]
fn test_failed_conversion_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.mid");

    let project = ProjectFixture::new(1).note(5, 0, 120, 60, 100).build();
    assert!(Converter::default()
        .convert_to_file(&project, &path)
        .is_err());
    assert!(!path.exists());
}

#[test]
fn test_finer_resolution_keeps_note_lengths() {
    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 60, 100)
        .note(0, 480, 240, 62, 100)
        .build();
    let song = Converter::builder()
        .ticks_per_quarter(960)
        .build()
        .unwrap()
        .convert(&project)
        .unwrap();

    assert_eq!(song.ticks_per_quarter, 960);
    let track = &song.tracks[1];
    assert_eq!(note_offs(track), vec![(960, 60), (1440, 62)]);
    let quarters = note_offs(track)[0].0 as f64 / f64::from(song.ticks_per_quarter);
    assert_eq!(quarters, 1.0);

    let parsed = MidiSong::parse(&song.to_bytes().unwrap()).unwrap();
    assert_eq!(parsed, song);
}

#[test]
fn test_glide_positions_follow_resolution() {
    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 60, 100)
        .portamento(0, 0, 100)
        .key(0, 240, 62)
        .build();
    let song = Converter::builder()
        .ticks_per_quarter(240)
        .build()
        .unwrap()
        .convert(&project)
        .unwrap();

    let bends = bends(&song.tracks[1]);
    assert_eq!(bends.first(), Some(&(0, 0)));
    assert_eq!(bends.last(), Some(&(170, 4096)));
    assert_eq!(note_offs(&song.tracks[1]), vec![(240, 60)]);
}

#[test]
fn test_unwritable_path_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("song.mid");

    let project = ProjectFixture::new(1).note(0, 0, 120, 60, 100).build();
    let result = Converter::default().convert_to_file(&project, &path);
    assert!(matches!(
        result,
        Err(Error::Midi(ptmidi::midi::Error::Io(_)))
    ));
}
