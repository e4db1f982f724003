//! Property-based tests for the playback core
//!
//! Uses proptest to verify invariants across many random inputs and
//! command sequences.

mod common;

use common::T0;
use noire_core::{ManualClock, PlanTier, Track};
use noire_playback::{
    PlaybackSession, PlayerConfig, RepeatMode, ShuffleMode, SkipDirection, SkipOutcome,
    TierGatedTransport,
};
use noire_storage::MemoryPolicyStore;
use proptest::prelude::*;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9]{1,10}",  // id
        "[A-Za-z ]{1,30}", // title
        "[A-Za-z ]{1,20}", // artist
        prop::sample::select(vec!["calm", "sad", "energetic", ""]),
    )
        .prop_map(|(id, title, artist, mood)| {
            let url = format!("https://cdn.test/{}.mp3", id);
            Track::new(id, title, artist, url, mood)
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..30)
}

fn arbitrary_plan() -> impl Strategy<Value = PlanTier> {
    prop::sample::select(PlanTier::ALL.to_vec())
}

#[derive(Debug, Clone)]
enum Command {
    Start(usize),
    Toggle,
    Seek(f64),
    Progress(f64, f64),
    Skip(SkipDirection),
    TrackEnded,
    Close,
    Reopen,
    Wait(u64),
    Shuffle(bool),
    Repeat(bool),
}

fn arbitrary_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (0usize..40).prop_map(Command::Start),
        Just(Command::Toggle),
        (-100.0f64..1_000.0).prop_map(Command::Seek),
        (0.0f64..600.0, 0.0f64..600.0).prop_map(|(e, t)| Command::Progress(e, t)),
        Just(Command::Skip(SkipDirection::Next)),
        Just(Command::Skip(SkipDirection::Previous)),
        Just(Command::TrackEnded),
        Just(Command::Close),
        Just(Command::Reopen),
        (0u64..120_000).prop_map(Command::Wait),
        any::<bool>().prop_map(Command::Shuffle),
        any::<bool>().prop_map(Command::Repeat),
    ]
}

fn transport(seed: u64) -> (TierGatedTransport, ManualClock) {
    let clock = ManualClock::new(T0);
    let config = PlayerConfig {
        shuffle_seed: Some(seed),
        ..PlayerConfig::default()
    };
    let transport =
        TierGatedTransport::new(config, MemoryPolicyStore::new(), clock.clone()).unwrap();
    (transport, clock)
}

// ===== Property Tests =====

proptest! {
    /// Property: start(Q, i) selects i and plays, whatever came before
    #[test]
    fn start_selects_index_and_plays(
        first in arbitrary_tracks(),
        tracks in arbitrary_tracks(),
        first_index in any::<prop::sample::Index>(),
        index in any::<prop::sample::Index>(),
        paused in any::<bool>(),
    ) {
        let mut session = PlaybackSession::new();
        session.start(first.clone(), first_index.index(first.len())).unwrap();
        if paused {
            session.toggle_playback();
            session.close();
        }

        let index = index.index(tracks.len());
        session.start(tracks, index).unwrap();

        prop_assert_eq!(session.current_index(), Some(index));
        prop_assert!(session.is_playing());
        prop_assert!(session.is_open());
        prop_assert_eq!(session.transport().elapsed_secs, 0.0);
    }

    /// Property: toggling twice restores play/pause
    #[test]
    fn toggle_twice_is_identity(
        tracks in arbitrary_tracks(),
        index in any::<prop::sample::Index>(),
        toggles_before in 0usize..5,
    ) {
        let mut session = PlaybackSession::new();
        session.start(tracks.clone(), index.index(tracks.len())).unwrap();
        for _ in 0..toggles_before {
            session.toggle_playback();
        }

        let before = session.is_playing();
        session.toggle_playback();
        session.toggle_playback();

        prop_assert_eq!(session.is_playing(), before);
    }

    /// Property: unknown duration never yields NaN or infinity
    #[test]
    fn zero_duration_progress_is_zero(elapsed in prop::num::f64::ANY) {
        let mut session = PlaybackSession::new();
        session.start(vec![Track::new("a", "A", "B", "https://cdn.test/a.mp3", "")], 0).unwrap();

        session.report_progress(elapsed, 0.0);

        prop_assert_eq!(session.transport().progress_percent, 0.0);
    }

    /// Property: progress is always a finite percentage
    #[test]
    fn progress_is_bounded(elapsed in prop::num::f64::ANY, total in prop::num::f64::ANY) {
        let mut session = PlaybackSession::new();
        session.start(vec![Track::new("a", "A", "B", "https://cdn.test/a.mp3", "")], 0).unwrap();

        session.report_progress(elapsed, total);

        let percent = session.transport().progress_percent;
        prop_assert!(percent.is_finite());
        prop_assert!((0.0..=100.0).contains(&percent));
    }

    /// Property: the current index stays inside the queue after any command
    /// sequence, and locked skips never touch the counter
    #[test]
    fn index_invariant_holds(
        tracks in arbitrary_tracks(),
        plan in arbitrary_plan(),
        seed in any::<u64>(),
        commands in prop::collection::vec(arbitrary_command(), 1..80),
    ) {
        let (mut transport, clock) = transport(seed);
        transport.set_plan(plan);

        for command in commands {
            let before = transport.policy_state();
            match command {
                Command::Start(i) => {
                    let index = i % tracks.len();
                    transport.start(tracks.clone(), index).unwrap();
                }
                Command::Toggle => {
                    transport.toggle_playback();
                }
                Command::Seek(s) => transport.request_seek(s),
                Command::Progress(e, t) => transport.report_progress(e, t),
                Command::Skip(direction) => {
                    if let SkipOutcome::Rejected { .. } = transport.skip(direction) {
                        prop_assert_eq!(transport.policy_state().skip_count, before.skip_count);
                    }
                }
                Command::TrackEnded => {
                    transport.on_track_ended();
                    prop_assert_eq!(transport.policy_state().skip_count, before.skip_count);
                }
                Command::Close => transport.close(),
                Command::Reopen => {
                    transport.reopen();
                }
                Command::Wait(ms) => {
                    clock.advance(ms);
                    transport.tick();
                }
                Command::Shuffle(on) => transport.set_shuffle(if on { ShuffleMode::Random } else { ShuffleMode::Off }),
                Command::Repeat(on) => transport.set_repeat(if on { RepeatMode::One } else { RepeatMode::Off }),
            }

            let snapshot = transport.snapshot();
            prop_assert!(snapshot.current_index >= -1);
            if snapshot.current_index != -1 {
                prop_assert!((snapshot.current_index as usize) < snapshot.queue.len());
            }
            prop_assert!(snapshot.transport.progress_percent.is_finite());
            if plan.is_paid() {
                prop_assert_eq!(snapshot.skip_count, 0);
            } else {
                prop_assert!(snapshot.skip_count <= 10);
            }
        }
    }
}
