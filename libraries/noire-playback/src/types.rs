//! Core types for playback management

use noire_core::{PlanTier, Track, TrackId};
use serde::{Deserialize, Serialize};

/// Direction of a transport skip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkipDirection {
    /// Following track (wraps to the first)
    Next,

    /// Preceding track (wraps to the last)
    #[serde(rename = "prev")]
    Previous,
}

/// Shuffle mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShuffleMode {
    /// Sequential navigation
    #[default]
    Off,

    /// "Next" draws a uniformly random index over the whole queue,
    /// the current one included
    Random,
}

/// Repeat mode
///
/// With `Off` the queue still wraps around; `One` replays the finished track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Advance when a track ends
    #[default]
    Off,

    /// Restart the current track when it ends
    One,
}

/// Visible state of the player surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    /// Player surface hidden (queue kept)
    Closed,

    /// Surface visible, audio playing
    Playing,

    /// Surface visible, audio paused
    Paused,
}

/// Identity of one load of one track.
///
/// A new token is issued every time a track becomes current, even when the
/// same queue slot or the same track is picked again, so callbacks from the
/// audio surface can be matched against the load that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadToken {
    /// Track being loaded
    pub track_id: TrackId,

    /// Monotonic load counter of the session
    pub generation: u64,
}

/// Transport telemetry and one-shot commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportState {
    /// Whether audio should be playing
    pub is_playing: bool,

    /// Elapsed time of the current track (seconds, >= 0)
    pub elapsed_secs: f64,

    /// Duration of the current track (seconds, 0 until metadata loads)
    pub total_duration_secs: f64,

    /// `elapsed / total * 100`, 0 while the duration is unknown
    pub progress_percent: f64,

    /// Seek requested by the UI, consumed by the audio surface
    pub pending_seek: Option<f64>,
}

impl Default for TransportState {
    fn default() -> Self {
        Self {
            is_playing: false,
            elapsed_secs: 0.0,
            total_duration_secs: 0.0,
            progress_percent: 0.0,
            pending_seek: None,
        }
    }
}

impl TransportState {
    /// State for a freshly loaded track: playing from zero, duration unknown
    pub(crate) fn fresh_track() -> Self {
        Self {
            is_playing: true,
            ..Self::default()
        }
    }
}

/// Observable snapshot of the whole player for the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    /// Loaded queue
    pub queue: Vec<Track>,

    /// Index of the current track, -1 when none
    pub current_index: i64,

    /// Whether the player surface is shown
    pub is_open: bool,

    /// Closed / Playing / Paused
    pub state: SessionState,

    /// Transport telemetry
    pub transport: TransportState,

    /// Plan driving the skip and ad rules
    pub plan: PlanTier,

    /// Whether the ad interstitial is on screen
    pub ad_showing: bool,

    /// Milliseconds until the ad ends
    pub ad_remaining_ms: u64,

    /// Skips consumed (free tier)
    pub skip_count: u32,

    /// Skips left before a lockout, `None` for paid plans or while locked
    pub skips_remaining: Option<u32>,

    /// Lockout deadline (epoch ms), 0 when none
    pub lockout_until: u64,

    /// Whole seconds until skips are restored, `None` when not locked
    pub lockout_remaining_secs: Option<u64>,

    /// Shuffle mode
    pub shuffle: ShuffleMode,

    /// Repeat mode
    pub repeat: RepeatMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_uses_ui_names() {
        assert_eq!(serde_json::to_string(&SkipDirection::Previous).unwrap(), "\"prev\"");
        let next: SkipDirection = serde_json::from_str("\"next\"").unwrap();
        assert_eq!(next, SkipDirection::Next);
    }

    #[test]
    fn fresh_track_plays_from_zero() {
        let state = TransportState::fresh_track();
        assert!(state.is_playing);
        assert_eq!(state.elapsed_secs, 0.0);
        assert_eq!(state.total_duration_secs, 0.0);
        assert_eq!(state.pending_seek, None);
    }

    #[test]
    fn modes_default_off() {
        assert_eq!(ShuffleMode::default(), ShuffleMode::Off);
        assert_eq!(RepeatMode::default(), RepeatMode::Off);
    }
}
