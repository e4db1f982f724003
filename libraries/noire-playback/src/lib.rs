//! Noire Player - Playback Core
//!
//! Platform-agnostic playback session and subscription gating.
//!
//! This crate provides:
//! - One playback session per app (queue, current track, play/pause, seek)
//! - Progress telemetry fed back by the audio surface
//! - Free-tier skip budget with a timed lockout, persisted across reloads
//! - Ad interstitials on a skip and track cadence
//! - Shuffle (Random) and repeat (One) navigation
//!
//! # Architecture
//!
//! `noire-playback` never touches audio or storage itself:
//! - The audio surface follows [`PlaybackEvent::LoadTrack`] and
//!   [`PlaybackEvent::SeekRequested`], and reports progress and track ends
//! - Skip budgets go through the [`noire_core::PolicyStore`] port
//! - Time comes from the [`noire_core::Clock`] port; the host drives ads and
//!   lockouts with [`TierGatedTransport::tick`]
//!
//! Browser bindings are available behind the `wasm` feature.
//!
//! # Example: Free-tier skipping
//!
//! ```rust
//! use noire_core::{ManualClock, Track};
//! use noire_playback::{PlayerConfig, SkipDirection, SkipOutcome, TierGatedTransport};
//! use noire_storage::MemoryPolicyStore;
//!
//! let clock = ManualClock::new(0);
//! let mut transport =
//!     TierGatedTransport::new(PlayerConfig::default(), MemoryPolicyStore::new(), clock.clone())
//!         .unwrap();
//!
//! let tracks = vec![
//!     Track::new("a", "Low Tide", "Ama", "https://cdn.example/a.mp3", "calm"),
//!     Track::new("b", "Ember", "Kojo", "https://cdn.example/b.mp3", "calm"),
//! ];
//! transport.start(tracks, 0).unwrap();
//!
//! let outcome = transport.skip(SkipDirection::Next);
//! assert_eq!(outcome, SkipOutcome::Advanced { index: 1, ad_started: false });
//! assert_eq!(transport.skips_remaining(), Some(9));
//! ```
//!
//! # Example: Driving ads
//!
//! ```rust
//! use noire_core::{ManualClock, Track};
//! use noire_playback::{PlayerConfig, TierGatedTransport};
//! use noire_storage::MemoryPolicyStore;
//!
//! let clock = ManualClock::new(0);
//! let mut transport =
//!     TierGatedTransport::new(PlayerConfig::default(), MemoryPolicyStore::new(), clock.clone())
//!         .unwrap();
//! transport
//!     .start(vec![Track::new("a", "Drift", "Ama", "https://cdn.example/a.mp3", "")], 0)
//!     .unwrap();
//!
//! transport.show_ad();
//! assert!(!transport.session().is_playing());
//!
//! clock.advance(5_000);
//! transport.tick();
//! assert!(transport.session().is_playing());
//! ```

mod ad;
mod config;
mod error;
mod events;
mod policy;
pub mod progress;
mod queue;
mod session;
mod shuffle;
mod transport;
pub mod types;

// WASM bindings (optional)
pub mod wasm;

// Public exports
pub use ad::{AdAudio, AdInterstitial, SilentAdAudio};
pub use config::{PlayerConfig, PolicyConfig};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use policy::{SkipDecision, SkipPolicy};
pub use queue::Queue;
pub use session::PlaybackSession;
pub use shuffle::random_index;
pub use transport::{SkipOutcome, TierGatedTransport, TrackEndOutcome};
pub use types::{
    LoadToken, PlayerSnapshot, RepeatMode, SessionState, ShuffleMode, SkipDirection,
    TransportState,
};
