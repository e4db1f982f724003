//! Shared helpers for playback integration tests

#![allow(dead_code)]

use noire_core::{ManualClock, PolicyStore, Track};
use noire_playback::{PlayerConfig, TierGatedTransport};
use noire_storage::MemoryPolicyStore;
use std::sync::Once;

/// Epoch ms used as "now" by the fixtures (2024-01-01T00:00:00Z)
pub const T0: u64 = 1_704_067_200_000;

pub const MINUTE_MS: u64 = 60_000;

static INIT: Once = Once::new();

/// Route tracing output through the test harness
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("noire_playback=debug")
            .init();
    });
}

pub fn track(id: &str) -> Track {
    Track::new(
        id,
        format!("Song {}", id),
        "Test Artist",
        format!("https://cdn.test/{}.mp3", id),
        "calm",
    )
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn numbered_tracks(n: usize) -> Vec<Track> {
    (0..n).map(|i| track(&format!("t{}", i))).collect()
}

pub fn seeded_config() -> PlayerConfig {
    PlayerConfig {
        shuffle_seed: Some(7),
        ..PlayerConfig::default()
    }
}

/// Transport over `store`, clock at `T0`
pub fn transport_with(
    store: impl PolicyStore + 'static,
    clock: &ManualClock,
) -> TierGatedTransport {
    init_tracing();
    TierGatedTransport::new(seeded_config(), store, clock.clone()).unwrap()
}

/// Free-tier transport with fresh in-memory storage
pub fn free_transport() -> (TierGatedTransport, MemoryPolicyStore, ManualClock) {
    let store = MemoryPolicyStore::new();
    let clock = ManualClock::new(T0);
    let transport = transport_with(store.clone(), &clock);
    (transport, store, clock)
}
