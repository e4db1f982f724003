//! Playback queue
//!
//! An ordered list of tracks plus a pointer to the active one. The list and
//! the pointer are only ever replaced together, so the pointer can never
//! transiently point past the end.

use crate::error::{PlaybackError, Result};
use noire_core::Track;

/// Tracks loaded for playback and the active position
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,

    /// Invariant: `Some(i)` implies `i < tracks.len()`
    current: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace tracks and position in one step.
    ///
    /// On error the queue is left untouched.
    pub fn replace(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if index >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: tracks.len(),
            });
        }

        self.tracks = tracks;
        self.current = Some(index);
        Ok(())
    }

    /// Move the pointer within the current tracks
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        if index >= self.tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        self.current = Some(index);
        Ok(())
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Get track at index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Active position
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Active track
    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|index| self.tracks.get(index))
    }

    /// Index following the current one, wrapping to 0
    pub fn next_index(&self) -> Option<usize> {
        self.current.map(|index| (index + 1) % self.tracks.len())
    }

    /// Index preceding the current one, wrapping to the last
    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        self.current.map(|index| (index + len - 1) % len)
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
