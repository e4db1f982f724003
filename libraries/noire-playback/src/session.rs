//! Playback session - what is playing and where
//!
//! Owns the queue, the transport telemetry and the visibility of the player
//! surface. The audio surface (an `<audio>` element, a native decoder) follows
//! the session through [`PlaybackEvent::LoadTrack`] and reports back through
//! [`PlaybackSession::report_progress_for`].
//!
//! State machine:
//!
//! ```text
//!            start                 toggle_playback
//!  Closed ─────────────► Playing ◄─────────────────► Paused
//!     ▲                     │                          │
//!     └──────── close ──────┴────────── close ─────────┘
//! ```
//!
//! There is no loading state: a track whose metadata has not arrived yet has a
//! total duration of 0.

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    progress::{fraction_to_position, progress_percent, sanitize_secs},
    queue::Queue,
    types::{LoadToken, SessionState, TransportState},
};
use noire_core::Track;
use tracing::{debug, error};

/// Single source of truth for the active queue and transport
#[derive(Debug, Default)]
pub struct PlaybackSession {
    queue: Queue,
    is_open: bool,
    transport: TransportState,

    // Load identity of the current track
    load_token: Option<LoadToken>,
    generation: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSession {
    /// Create an empty, closed session
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Commands =====

    /// Replace the queue and start playing `tracks[index]`.
    ///
    /// Opens the player surface and resets the transport (playing, elapsed 0).
    /// An empty queue or an out-of-range index is a caller bug: the call fails
    /// and the session is left untouched.
    pub fn start(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        if let Err(e) = self.queue.replace(tracks, index) {
            error!("Rejected start at index {}: {}", index, e);
            return Err(e);
        }

        let previous = self.load_token.as_ref().map(|t| t.track_id.clone());
        self.load_current(previous);

        if !self.is_open {
            self.is_open = true;
            self.pending_events.push(PlaybackEvent::PlayerOpened);
        }
        self.emit_state_changed();
        Ok(())
    }

    /// Flip play/pause. No-op when no track is current.
    pub fn toggle_playback(&mut self) {
        if self.queue.current_index().is_none() {
            return;
        }
        self.set_playing(!self.transport.is_playing);
    }

    /// Set play/pause explicitly. No-op when no track is current.
    pub fn set_playing(&mut self, playing: bool) {
        if self.queue.current_index().is_none() || self.transport.is_playing == playing {
            return;
        }
        self.transport.is_playing = playing;
        self.emit_state_changed();
    }

    /// Ask the audio surface to move to `seconds`.
    ///
    /// Stored as-is; clamping happens where the position is applied
    /// (see [`crate::progress::clamp_seek`]).
    pub fn request_seek(&mut self, seconds: f64) {
        self.transport.pending_seek = Some(seconds);
        self.pending_events.push(PlaybackEvent::SeekRequested {
            position_secs: seconds,
        });
    }

    /// Seek to a fraction of the track (scrub bar click).
    ///
    /// Ignored while the duration is unknown. Returns the requested position.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Option<f64> {
        let position = fraction_to_position(fraction, self.transport.total_duration_secs)?;
        self.request_seek(position);
        Some(position)
    }

    /// Consume the pending seek (called by the audio surface)
    pub fn take_pending_seek(&mut self) -> Option<f64> {
        self.transport.pending_seek.take()
    }

    /// Update telemetry for the current track.
    ///
    /// Prefer [`Self::report_progress_for`] when the audio surface can pass
    /// the load token back; this variant trusts the caller to report for the
    /// current load.
    pub fn report_progress(&mut self, elapsed_secs: f64, total_duration_secs: f64) {
        if self.queue.current_index().is_none() {
            return;
        }
        self.transport.elapsed_secs = sanitize_secs(elapsed_secs);
        self.transport.total_duration_secs = sanitize_secs(total_duration_secs);
        self.transport.progress_percent = progress_percent(
            self.transport.elapsed_secs,
            self.transport.total_duration_secs,
        );
    }

    /// Update telemetry if `token` identifies the current load.
    ///
    /// Reports from a previous load (a late callback after `start` or an
    /// advance) are discarded. Returns whether the report was applied.
    pub fn report_progress_for(
        &mut self,
        token: &LoadToken,
        elapsed_secs: f64,
        total_duration_secs: f64,
    ) -> bool {
        if !self.is_current(token) {
            debug!(
                "Discarding stale progress for {} (generation {})",
                token.track_id, token.generation
            );
            return false;
        }
        self.report_progress(elapsed_secs, total_duration_secs);
        true
    }

    /// Hide the player surface. Queue and transport are kept.
    pub fn close(&mut self) {
        if !self.is_open {
            return;
        }
        self.is_open = false;
        self.pending_events.push(PlaybackEvent::PlayerClosed);
        self.emit_state_changed();
    }

    /// Show the player surface again, resuming the kept state.
    ///
    /// Returns `false` when there is nothing to show.
    pub fn reopen(&mut self) -> bool {
        if self.queue.current_index().is_none() {
            return false;
        }
        if !self.is_open {
            self.is_open = true;
            self.pending_events.push(PlaybackEvent::PlayerOpened);
            self.emit_state_changed();
        }
        true
    }

    /// Make `index` current and start it from zero
    pub(crate) fn load_index(&mut self, index: usize) -> Result<()> {
        let previous = self.load_token.as_ref().map(|t| t.track_id.clone());
        self.queue.set_current(index)?;
        self.load_current(previous);
        self.emit_state_changed();
        Ok(())
    }

    /// Restart the current track from zero (repeat)
    pub(crate) fn restart_current(&mut self) -> Result<()> {
        if self.queue.current_index().is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.transport = TransportState::fresh_track();
        self.issue_load_token();
        self.emit_state_changed();
        Ok(())
    }

    pub(crate) fn push_event(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    // ===== State Queries =====

    /// Closed / Playing / Paused
    pub fn state(&self) -> SessionState {
        if !self.is_open {
            SessionState::Closed
        } else if self.transport.is_playing {
            SessionState::Playing
        } else {
            SessionState::Paused
        }
    }

    /// Whether the player surface is shown
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Whether audio should be playing
    pub fn is_playing(&self) -> bool {
        self.transport.is_playing
    }

    /// Loaded queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Current track
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Transport telemetry
    pub fn transport(&self) -> &TransportState {
        &self.transport
    }

    /// Token of the current load
    pub fn load_token(&self) -> Option<&LoadToken> {
        self.load_token.as_ref()
    }

    /// Whether `token` identifies the current load
    pub fn is_current(&self, token: &LoadToken) -> bool {
        self.load_token.as_ref() == Some(token)
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn load_current(&mut self, previous_track_id: Option<noire_core::TrackId>) {
        let Some(index) = self.queue.current_index() else {
            return;
        };
        self.transport = TransportState::fresh_track();

        if let Some(track) = self.queue.get(index) {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id: track.id.clone(),
                index,
                previous_track_id,
            });
        }
        self.issue_load_token();
    }

    fn issue_load_token(&mut self) {
        let Some(track) = self.queue.current() else {
            return;
        };
        self.generation += 1;
        let token = LoadToken {
            track_id: track.id.clone(),
            generation: self.generation,
        };
        let audio_url = track.audio_url.clone();

        debug!(
            "Loading {} (generation {}) from {}",
            token.track_id, token.generation, audio_url
        );
        self.load_token = Some(token.clone());
        self.pending_events
            .push(PlaybackEvent::LoadTrack { token, audio_url });
    }

    fn emit_state_changed(&mut self) {
        let state = self.state();
        self.pending_events
            .push(PlaybackEvent::StateChanged { state });
    }
}
