//! Glide, tuning and bend-range tests through the full converter

use approx::assert_relative_eq;
use ptmidi::midi::emitter::cc;
use ptmidi::pitch::lerp;
use ptmidi::prelude::*;
use ptmidi::build_timelines;

use crate::helpers::tolerances::{BEND_STEP, SEMITONE_EPSILON};
use crate::helpers::*;

#[test]
fn test_glide_produces_bend_ramp() {
    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 60, 100)
        .portamento(0, 0, 100)
        .key(0, 240, 62)
        .build();
    let song = convert(&project);
    let track = &song.tracks[1];

    assert_eq!(
        bends(track),
        vec![
            (0, 0),
            (240, 0),
            (250, 410),
            (260, 819),
            (270, 1229),
            (280, 1638),
            (290, 2048),
            (300, 2458),
            (310, 2867),
            (320, 3277),
            (330, 3686),
            (340, 4096),
        ]
    );
    assert!(controller(track, cc::DATA_ENTRY_MSB)
        .iter()
        .all(|&(_, range)| range == 4));
    // The note itself keeps its starting key.
    assert_eq!(note_ons(track), vec![(0, 0, 60, 100)]);
}

#[test]
fn test_long_glide_follows_lerp() {
    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 60, 100)
        .portamento(0, 0, 1000)
        .key(0, 100, 72)
        .build();
    let converter = Converter::default();
    let units = build_timelines(&project, converter.config()).unwrap();
    let curve = converter.pitch_curve(&units[0]).unwrap();

    for i in (0..380).step_by(10) {
        assert_relative_eq!(
            curve.at(100 + i).unwrap(),
            lerp(0.0, 12.0, i, 1000),
            epsilon = SEMITONE_EPSILON
        );
    }
    // Window ends before the glide does.
    assert_relative_eq!(curve.at(480).unwrap(), 4.56, epsilon = SEMITONE_EPSILON);
}

#[test]
fn test_instant_jump_widens_bend_range() {
    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 60, 100)
        .key(0, 240, 84)
        .build();
    let song = convert(&project);
    let track = &song.tracks[1];

    assert_eq!(
        controller(track, cc::DATA_ENTRY_MSB),
        vec![(0, 4), (240, 28)]
    );
    assert_eq!(bends(track), vec![(0, 0), (240, 7022)]);
}

#[test]
fn test_offset_beyond_max_range_is_clamped() {
    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 0, 100)
        .key(0, 240, 200)
        .build();
    let song = convert(&project);
    let track = &song.tracks[1];

    assert_eq!(
        controller(track, cc::DATA_ENTRY_MSB).last(),
        Some(&(240, 124))
    );
    assert_eq!(bends(track).last(), Some(&(240, 8191)));
}

#[test]
fn test_new_press_resets_offset() {
    let project = ProjectFixture::new(1)
        .note(0, 0, 240, 60, 100)
        .key(0, 120, 64)
        .note(0, 240, 240, 64, 100)
        .build();
    let song = convert(&project);
    let track = &song.tracks[1];

    assert_eq!(bends(track), vec![(0, 0), (120, 4096), (240, 0)]);
    assert_eq!(
        controller(track, cc::DATA_ENTRY_MSB),
        vec![(0, 4), (120, 8), (240, 4)]
    );
    assert_eq!(note_ons(track), vec![(0, 0, 60, 100), (240, 0, 64, 100)]);
}

#[test]
fn test_octave_tuning() {
    let project = ProjectFixture::new(1)
        .record(EventRecord::tuning(0, 0, 2.0))
        .note(0, 0, 480, 60, 100)
        .build();
    let song = convert(&project);
    let track = &song.tracks[1];

    assert_eq!(controller(track, cc::DATA_ENTRY_MSB), vec![(0, 16)]);
    assert_eq!(bends(track), vec![(0, 6144)]);
}

#[test]
fn test_tuning_change_mid_note() {
    let semitone = 2f32.powf(1.0 / 12.0);
    let project = ProjectFixture::new(1)
        .note(0, 0, 480, 60, 100)
        .record(EventRecord::tuning(0, 240, semitone))
        .build();
    let song = convert(&project);

    let bends = bends(&song.tracks[1]);
    assert_eq!(bends.len(), 2);
    assert_eq!(bends[0], (0, 0));
    assert_eq!(bends[1].0, 240);
    assert!((bends[1].1 - 2048).abs() <= BEND_STEP);
}

#[test]
fn test_tuning_rides_on_glide() {
    let project = ProjectFixture::new(1)
        .record(EventRecord::tuning(0, 0, 2.0))
        .note(0, 0, 480, 60, 100)
        .portamento(0, 0, 100)
        .key(0, 240, 62)
        .build();
    let converter = Converter::default();
    let units = build_timelines(&project, converter.config()).unwrap();
    let curve = converter.pitch_curve(&units[0]).unwrap();

    assert_relative_eq!(curve.at(0).unwrap(), 12.0, epsilon = SEMITONE_EPSILON);
    assert_relative_eq!(curve.at(290).unwrap(), 13.0, epsilon = SEMITONE_EPSILON);
    assert_relative_eq!(curve.at(400).unwrap(), 14.0, epsilon = SEMITONE_EPSILON);
}

#[test]
fn test_invalid_tuning_is_skipped() {
    let project = ProjectFixture::new(1)
        .record(EventRecord::tuning(0, 0, -1.0))
        .note(0, 0, 480, 60, 100)
        .build();
    let song = convert(&project);
    assert_eq!(bends(&song.tracks[1]), vec![(0, 0)]);
}
