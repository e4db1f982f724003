/// Ports the playback core consumes from external collaborators
use crate::error::Result;
use crate::types::{Mood, PlanTier, SkipPolicyState, Track, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Query over the song catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFilter {
    /// Only tracks with exactly this mood tag
    pub mood: Option<Mood>,

    /// Maximum number of tracks returned
    pub limit: Option<usize>,

    /// Newest tracks first
    pub order_by_recency: bool,
}

impl TrackFilter {
    /// The most recent `limit` tracks of any mood
    pub fn recent(limit: usize) -> Self {
        Self {
            mood: None,
            limit: Some(limit),
            order_by_recency: true,
        }
    }

    /// Tracks tagged with `mood`
    pub fn mood(mood: impl Into<Mood>) -> Self {
        Self {
            mood: Some(mood.into()),
            ..Self::default()
        }
    }
}

/// Song catalog (document store in production)
///
/// Failures propagate to the calling page, which shows a notice.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List tracks matching `filter`
    async fn list_tracks(&self, filter: &TrackFilter) -> Result<Vec<Track>>;
}

/// User profile lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Subscription plan of `user`
    async fn get_plan(&self, user: &UserId) -> Result<PlanTier>;
}

/// Durable storage for the skip-policy blob.
///
/// One blob per device. Writes replace the whole value; there is a single
/// writer (the UI event loop), so no transactional protocol is needed.
/// Implementations report failures, the transport decides to carry on with
/// its in-memory state.
pub trait PolicyStore {
    /// Read the stored state, `None` when nothing was stored yet
    fn get(&self) -> Result<Option<SkipPolicyState>>;

    /// Replace the stored state
    fn set(&mut self, state: &SkipPolicyState) -> Result<()>;

    /// Remove the stored state
    fn clear(&mut self) -> Result<()>;
}

impl<S: PolicyStore + ?Sized> PolicyStore for Box<S> {
    fn get(&self) -> Result<Option<SkipPolicyState>> {
        (**self).get()
    }

    fn set(&mut self, state: &SkipPolicyState) -> Result<()> {
        (**self).set(state)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
