//! Mood sectioning for dashboards
//!
//! The dashboard shows one section per mood tag. Plans decide which sections
//! are playable:
//! - `mini`: only `calm` and `sad` (case-insensitive)
//! - `free`: only the first section
//! - every other plan: all sections
//!
//! Free users may also commit to a single mood per 24 hours on the mood picker,
//! see [`MoodSelectionGate`].

use crate::types::{Mood, PlanTier, Track};
use serde::{Deserialize, Serialize};

/// Moods unlocked for the `mini` plan
const MINI_ALLOWED_MOODS: [&str; 2] = ["calm", "sad"];

/// Tracks grouped by exact mood tag, in first-appearance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodGroups {
    groups: Vec<(Mood, Vec<Track>)>,
}

/// One dashboard section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSection {
    /// Mood tag shared by all tracks of the section
    pub mood: Mood,

    /// Tracks in catalog order
    pub tracks: Vec<Track>,

    /// Whether the listener's plan blocks playback of this section
    pub is_locked: bool,
}

/// Group tracks by mood.
///
/// Grouping is case-sensitive (`Calm` and `calm` are distinct sections);
/// untagged tracks land in `general`.
pub fn group_by_mood(tracks: &[Track]) -> MoodGroups {
    let mut groups: Vec<(Mood, Vec<Track>)> = Vec::new();

    for track in tracks {
        let mood = track.section_mood();
        match groups.iter_mut().find(|(existing, _)| *existing == mood) {
            Some((_, members)) => members.push(track.clone()),
            None => groups.push((mood, vec![track.clone()])),
        }
    }

    MoodGroups { groups }
}

impl MoodGroups {
    /// Number of sections
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no sections
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Tracks of one mood (exact match)
    pub fn get(&self, mood: &Mood) -> Option<&[Track]> {
        self.groups
            .iter()
            .find(|(existing, _)| existing == mood)
            .map(|(_, tracks)| tracks.as_slice())
    }

    /// Mood tags in section order
    pub fn moods(&self) -> impl Iterator<Item = &Mood> {
        self.groups.iter().map(|(mood, _)| mood)
    }

    /// Resolve section locks for `plan`
    pub fn with_locks(self, plan: PlanTier) -> Vec<MoodSection> {
        self.groups
            .into_iter()
            .enumerate()
            .map(|(index, (mood, tracks))| {
                let is_locked = is_section_locked(plan, index, &mood);
                MoodSection {
                    mood,
                    tracks,
                    is_locked,
                }
            })
            .collect()
    }
}

fn is_section_locked(plan: PlanTier, index: usize, mood: &Mood) -> bool {
    match plan {
        PlanTier::Free => index > 0,
        PlanTier::Mini => !MINI_ALLOWED_MOODS
            .iter()
            .any(|allowed| mood.matches_ignore_case(allowed)),
        PlanTier::Basic | PlanTier::Pro | PlanTier::Premium | PlanTier::Elite => false,
    }
}

/// Free-tier limit on mood-picker selections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodSelectionGate {
    /// Minimum time between two selections for free users
    pub cooldown_ms: u64,
}

impl Default for MoodSelectionGate {
    fn default() -> Self {
        Self {
            cooldown_ms: 24 * 60 * 60 * 1000,
        }
    }
}

impl MoodSelectionGate {
    /// Earliest time (epoch ms) a new selection is accepted, `None` if it is
    /// accepted right now.
    pub fn blocked_until(
        &self,
        plan: PlanTier,
        last_selection_ms: Option<u64>,
        now_ms: u64,
    ) -> Option<u64> {
        if plan.is_paid() {
            return None;
        }

        let next = last_selection_ms?.saturating_add(self.cooldown_ms);
        (now_ms < next).then_some(next)
    }

    /// Whether `plan` may select a mood at `now_ms`
    pub fn allows(&self, plan: PlanTier, last_selection_ms: Option<u64>, now_ms: u64) -> bool {
        self.blocked_until(plan, last_selection_ms, now_ms).is_none()
    }

    /// Whether a selection must be recorded for later checks
    pub fn records_selection(&self, plan: PlanTier) -> bool {
        !plan.is_paid()
    }
}
