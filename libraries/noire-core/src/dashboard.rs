//! Dashboard loading
//!
//! Fetches the newest catalog tracks, resolves the listener's plan and builds
//! the mood sections. Fetch failures propagate; the page shows them.

use crate::error::Result;
use crate::moods::{group_by_mood, MoodSection};
use crate::traits::{Catalog, ProfileSource, TrackFilter};
use crate::types::{PlanTier, Track, UserId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Number of recent tracks shown on the dashboard
pub const DASHBOARD_TRACK_LIMIT: usize = 20;

/// Everything the dashboard page renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Plan used to resolve section locks
    pub plan: PlanTier,

    /// Recent tracks, newest first
    pub tracks: Vec<Track>,

    /// Mood sections with locks applied
    pub sections: Vec<MoodSection>,
}

/// Load the dashboard for `user` (signed-out listeners are treated as free).
pub async fn load_dashboard(
    catalog: &dyn Catalog,
    profiles: &dyn ProfileSource,
    user: Option<&UserId>,
) -> Result<DashboardView> {
    let plan = match user {
        Some(user) => profiles.get_plan(user).await?,
        None => PlanTier::Free,
    };

    let tracks = catalog
        .list_tracks(&TrackFilter::recent(DASHBOARD_TRACK_LIMIT))
        .await?;
    let sections = group_by_mood(&tracks).with_locks(plan);

    debug!(
        "Dashboard loaded: plan={}, tracks={}, sections={}",
        plan,
        tracks.len(),
        sections.len()
    );

    Ok(DashboardView {
        plan,
        tracks,
        sections,
    })
}
