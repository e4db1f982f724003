use crate::error::NoireError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subscription plan of the listening user.
///
/// Read from the user profile; the playback core never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Ad-supported tier with skip throttling
    #[default]
    Free,
    /// Entry paid tier (calm and sad mood sections only)
    Mini,
    Basic,
    Pro,
    Premium,
    Elite,
}

impl PlanTier {
    /// All plans, cheapest first
    pub const ALL: [PlanTier; 6] = [
        PlanTier::Free,
        PlanTier::Mini,
        PlanTier::Basic,
        PlanTier::Pro,
        PlanTier::Premium,
        PlanTier::Elite,
    ];

    /// Whether the plan is a paid tier (no throttling, no ads)
    pub fn is_paid(self) -> bool {
        self != PlanTier::Free
    }

    /// Plan as stored in the user profile
    pub fn as_str(self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Mini => "mini",
            PlanTier::Basic => "basic",
            PlanTier::Pro => "pro",
            PlanTier::Premium => "premium",
            PlanTier::Elite => "elite",
        }
    }

    /// Resolve the plan field of a profile document.
    ///
    /// A missing, empty or unrecognised field falls back to `Free`, so every
    /// throttle stays active when the profile is incomplete.
    pub fn from_profile_field(field: Option<&str>) -> Self {
        match field {
            Some(raw) if !raw.trim().is_empty() => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Unrecognised plan {:?}, treating as free", raw);
                PlanTier::Free
            }),
            _ => PlanTier::Free,
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = NoireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(PlanTier::Free),
            "mini" => Ok(PlanTier::Mini),
            "basic" => Ok(PlanTier::Basic),
            "pro" => Ok(PlanTier::Pro),
            "premium" => Ok(PlanTier::Premium),
            "elite" => Ok(PlanTier::Elite),
            _ => Err(NoireError::UnknownPlan(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_free_is_unpaid() {
        for plan in PlanTier::ALL {
            assert_eq!(plan.is_paid(), plan != PlanTier::Free, "{plan}");
        }
    }

    #[test]
    fn parses_profile_names() {
        assert_eq!("Premium".parse::<PlanTier>().unwrap(), PlanTier::Premium);
        assert_eq!(" mini ".parse::<PlanTier>().unwrap(), PlanTier::Mini);
        assert!("gold".parse::<PlanTier>().is_err());
    }

    #[test]
    fn incomplete_profile_is_free() {
        assert_eq!(PlanTier::from_profile_field(None), PlanTier::Free);
        assert_eq!(PlanTier::from_profile_field(Some("")), PlanTier::Free);
        assert_eq!(PlanTier::from_profile_field(Some("gold")), PlanTier::Free);
        assert_eq!(PlanTier::from_profile_field(Some("elite")), PlanTier::Elite);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&PlanTier::Basic).unwrap(), "\"basic\"");
        let plan: PlanTier = serde_json::from_str("\"pro\"").unwrap();
        assert_eq!(plan, PlanTier::Pro);
    }
}
