//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! session and transport and drained by the host after each command:
//! - Surface visibility and play/pause changes
//! - Track changes, with a load request for the audio surface
//! - Seek requests
//! - Ad interstitial start/finish
//! - Skip lockout start/clear and rejected skips

use crate::types::{LoadToken, SessionState};
use noire_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Player surface shown
    PlayerOpened,

    /// Player surface hidden (queue kept)
    PlayerClosed,

    /// Closed / Playing / Paused changed
    StateChanged {
        /// The new state
        state: SessionState,
    },

    /// A different queue slot became current
    #[serde(rename_all = "camelCase")]
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// Queue index of the new track
        index: usize,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// The audio surface must load and start `audio_url`.
    ///
    /// Also emitted when the same track restarts (repeat), with a new token.
    #[serde(rename_all = "camelCase")]
    LoadTrack {
        /// Token to pass back with progress and end reports
        token: LoadToken,
        /// Locator of the audio bytes
        audio_url: String,
    },

    /// The UI asked to move the playback position
    #[serde(rename_all = "camelCase")]
    SeekRequested {
        /// Target in seconds (unclamped)
        position_secs: f64,
    },

    /// Ad interstitial shown, audio paused
    #[serde(rename_all = "camelCase")]
    AdStarted {
        /// When the ad ends (epoch ms)
        ends_at: u64,
    },

    /// Ad interstitial finished, audio resumed
    AdFinished,

    /// A free-tier skip was refused during a lockout
    #[serde(rename_all = "camelCase")]
    SkipRejected {
        /// When skips are restored (epoch ms)
        lockout_until: u64,
    },

    /// The skip budget ran out
    #[serde(rename_all = "camelCase")]
    LockoutStarted {
        /// When skips are restored (epoch ms)
        lockout_until: u64,
    },

    /// Lockout expired, skip budget restored
    LockoutCleared,
}

impl PlaybackEvent {
    /// Event name as seen by the UI layer
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackEvent::PlayerOpened => "playerOpened",
            PlaybackEvent::PlayerClosed => "playerClosed",
            PlaybackEvent::StateChanged { .. } => "stateChanged",
            PlaybackEvent::TrackChanged { .. } => "trackChanged",
            PlaybackEvent::LoadTrack { .. } => "loadTrack",
            PlaybackEvent::SeekRequested { .. } => "seekRequested",
            PlaybackEvent::AdStarted { .. } => "adStarted",
            PlaybackEvent::AdFinished => "adFinished",
            PlaybackEvent::SkipRejected { .. } => "skipRejected",
            PlaybackEvent::LockoutStarted { .. } => "lockoutStarted",
            PlaybackEvent::LockoutCleared => "lockoutCleared",
        }
    }
}
