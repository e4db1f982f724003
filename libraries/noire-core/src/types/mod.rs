//! Domain types for the Noire player

mod ids;
mod plan;
mod skip_policy;
mod track;

pub use ids::{TrackId, UserId};
pub use plan::PlanTier;
pub use skip_policy::SkipPolicyState;
pub use track::{Mood, Track};
