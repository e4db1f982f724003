use super::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mood tag attached to a track.
///
/// Moods are free text. Grouping compares the exact string (case-sensitive);
/// plan allow-lists compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mood(String);

impl Mood {
    /// Section name used for tracks without a mood
    pub const GENERAL: &'static str = "general";

    /// Create a mood tag
    pub fn new(mood: impl Into<String>) -> Self {
        Self(mood.into())
    }

    /// The catch-all mood
    pub fn general() -> Self {
        Self(Self::GENERAL.to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag is empty (untagged track)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive comparison against a plain name
    pub fn matches_ignore_case(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Mood {
    fn from(mood: &str) -> Self {
        Self::new(mood)
    }
}

/// A playable song as delivered by the catalog.
///
/// Immutable once loaded; the queue holds clones but never edits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Locator of the audio bytes (CDN or storage URL)
    pub audio_url: String,

    /// Mood tag
    #[serde(default)]
    pub mood: Mood,
}

impl Default for Mood {
    fn default() -> Self {
        Self(String::new())
    }
}

impl Track {
    /// Create a new track
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        audio_url: impl Into<String>,
        mood: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            audio_url: audio_url.into(),
            mood: Mood::new(mood),
        }
    }

    /// Mood used for dashboard sectioning (`general` when untagged)
    pub fn section_mood(&self) -> Mood {
        if self.mood.is_empty() {
            Mood::general()
        } else {
            self.mood.clone()
        }
    }
}
