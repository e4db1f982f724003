//! Playback session integration tests
//!
//! Real-world flows: picking a track from a mood section, scrubbing,
//! closing and reopening the player, late callbacks from the audio element.

mod common;

use common::{init_tracing, numbered_tracks, tracks};
use noire_playback::progress::{clamp_seek, format_time};
use noire_playback::{PlaybackEvent, PlaybackSession, SessionState};

#[test]
fn test_pick_track_from_section_starts_it() {
    init_tracing();
    let mut session = PlaybackSession::new();

    // User taps the third track of a section
    session.start(numbered_tracks(5), 2).unwrap();

    assert_eq!(session.state(), SessionState::Playing);
    assert_eq!(session.current_index(), Some(2));
    assert_eq!(session.current_track().unwrap().id.as_str(), "t2");
    assert_eq!(session.queue().len(), 5);
}

#[test]
fn test_start_replaces_previous_queue() {
    let mut session = PlaybackSession::new();
    session.start(tracks(&["a", "b", "c"]), 2).unwrap();
    session.report_progress(80.0, 200.0);
    session.toggle_playback();

    session.start(tracks(&["x", "y"]), 0).unwrap();

    assert_eq!(session.queue().len(), 2);
    assert_eq!(session.current_track().unwrap().id.as_str(), "x");
    assert!(session.is_playing());
    assert_eq!(session.transport().elapsed_secs, 0.0);
    assert_eq!(session.transport().total_duration_secs, 0.0);
}

#[test]
fn test_state_machine_round_trip() {
    let mut session = PlaybackSession::new();
    assert_eq!(session.state(), SessionState::Closed);

    session.start(tracks(&["a"]), 0).unwrap();
    assert_eq!(session.state(), SessionState::Playing);

    session.toggle_playback();
    assert_eq!(session.state(), SessionState::Paused);

    session.close();
    assert_eq!(session.state(), SessionState::Closed);

    // Reopening shows the paused track again
    assert!(session.reopen());
    assert_eq!(session.state(), SessionState::Paused);
}

#[test]
fn test_events_follow_commands() {
    let mut session = PlaybackSession::new();
    session.start(tracks(&["a", "b"]), 1).unwrap();

    let names: Vec<&str> = session.drain_events().iter().map(PlaybackEvent::name).collect();
    assert_eq!(names, ["trackChanged", "loadTrack", "playerOpened", "stateChanged"]);

    session.toggle_playback();
    session.close();
    let events = session.drain_events();
    assert_eq!(
        events,
        vec![
            PlaybackEvent::StateChanged {
                state: SessionState::Paused
            },
            PlaybackEvent::PlayerClosed,
            PlaybackEvent::StateChanged {
                state: SessionState::Closed
            },
        ]
    );
}

#[test]
fn test_seek_out_of_range_is_clamped_by_audio_surface() {
    let mut session = PlaybackSession::new();
    session.start(tracks(&["a"]), 0).unwrap();
    session.report_progress(10.0, 180.0);

    session.request_seek(-15.0);
    let requested = session.take_pending_seek().unwrap();
    assert_eq!(requested, -15.0);
    assert_eq!(clamp_seek(requested, session.transport().total_duration_secs), 0.0);

    session.request_seek(999.0);
    let requested = session.take_pending_seek().unwrap();
    assert_eq!(clamp_seek(requested, 180.0), 180.0);
}

#[test]
fn test_progress_display() {
    let mut session = PlaybackSession::new();
    session.start(tracks(&["a"]), 0).unwrap();

    session.report_progress(65.0, 245.0);

    let transport = session.transport();
    assert_eq!(format_time(transport.elapsed_secs), "1:05");
    assert_eq!(format_time(transport.total_duration_secs), "4:05");
    assert!((transport.progress_percent - 26.530_612).abs() < 1e-4);
}

#[test]
fn test_late_progress_for_same_slot_is_discarded() {
    let mut session = PlaybackSession::new();
    session.start(tracks(&["a", "b"]), 0).unwrap();
    let first_load = session.load_token().cloned().unwrap();

    // Same queue, same slot: a fresh load all the same
    session.start(tracks(&["a", "b"]), 0).unwrap();

    assert!(!session.report_progress_for(&first_load, 170.0, 180.0));
    assert_eq!(session.transport().progress_percent, 0.0);
}

#[test]
fn test_progress_without_track_is_ignored() {
    let mut session = PlaybackSession::new();
    session.report_progress(10.0, 100.0);
    assert_eq!(session.transport().elapsed_secs, 0.0);
}
