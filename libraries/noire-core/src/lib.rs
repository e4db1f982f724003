//! Noire Core
//!
//! Platform-agnostic core types, ports, and error handling for the Noire player.
//!
//! This crate provides the building blocks shared by the playback core and its
//! adapters (browser, file-backed, in-memory).
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Mood`, `PlanTier`, `SkipPolicyState`
//! - **Ports**: `Catalog`, `ProfileSource`, `PolicyStore`, `Clock`
//! - **Catalog helpers**: mood sectioning, plan-based section locks, dashboard loading
//! - **Error Handling**: Unified `NoireError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use noire_core::{group_by_mood, PlanTier, Track};
//!
//! let tracks = vec![
//!     Track::new("1", "Low Tide", "Ama", "https://cdn.example/1.mp3", "calm"),
//!     Track::new("2", "Ember", "Kojo", "https://cdn.example/2.mp3", "energetic"),
//!     Track::new("3", "Still", "Ama", "https://cdn.example/3.mp3", "calm"),
//! ];
//!
//! let sections = group_by_mood(&tracks).with_locks(PlanTier::Free);
//! assert_eq!(sections[0].mood.as_str(), "calm");
//! assert!(!sections[0].is_locked);
//! assert!(sections[1].is_locked);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod dashboard;
pub mod error;
pub mod moods;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use dashboard::{load_dashboard, DashboardView, DASHBOARD_TRACK_LIMIT};
pub use error::{NoireError, Result};
pub use moods::{group_by_mood, MoodGroups, MoodSection, MoodSelectionGate};
pub use traits::{Catalog, PolicyStore, ProfileSource, TrackFilter};
pub use types::{Mood, PlanTier, SkipPolicyState, Track, TrackId, UserId};
