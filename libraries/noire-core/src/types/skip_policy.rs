use serde::{Deserialize, Serialize};

/// Persisted free-tier skip budget.
///
/// Stored per device as a single JSON blob
/// (`{"skipCount":n,"lockoutUntil":ms}`) and replaced whole on every write.
/// `lockout_until` is an epoch-millisecond timestamp, `0` when no lockout is
/// pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipPolicyState {
    /// Skips consumed since the last reset
    #[serde(default)]
    pub skip_count: u32,

    /// End of the current lockout (epoch ms), 0 when none
    #[serde(default)]
    pub lockout_until: u64,
}

impl SkipPolicyState {
    /// Fresh state: no skips consumed, no lockout
    pub const fn cleared() -> Self {
        Self {
            skip_count: 0,
            lockout_until: 0,
        }
    }

    /// Whether a lockout is recorded at all (active or expired)
    pub fn has_lockout(&self) -> bool {
        self.lockout_until > 0
    }

    /// Whether skips are rejected at `now_ms`
    pub fn is_locked(&self, now_ms: u64) -> bool {
        now_ms < self.lockout_until
    }

    /// Whether a recorded lockout has run out at `now_ms`
    pub fn lockout_expired(&self, now_ms: u64) -> bool {
        self.has_lockout() && now_ms >= self.lockout_until
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockout_window_is_half_open() {
        let state = SkipPolicyState {
            skip_count: 10,
            lockout_until: 5_000,
        };

        assert!(state.is_locked(4_999));
        assert!(!state.is_locked(5_000));
        assert!(!state.lockout_expired(4_999));
        assert!(state.lockout_expired(5_000));
    }

    #[test]
    fn cleared_state_never_locks() {
        let state = SkipPolicyState::cleared();
        assert!(!state.is_locked(0));
        assert!(!state.lockout_expired(u64::MAX));
    }

    #[test]
    fn blob_uses_camel_case_keys() {
        let state = SkipPolicyState {
            skip_count: 3,
            lockout_until: 0,
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"skipCount":3,"lockoutUntil":0}"#);

        let partial: SkipPolicyState = serde_json::from_str(r#"{"skipCount":7}"#).unwrap();
        assert_eq!(partial.skip_count, 7);
        assert_eq!(partial.lockout_until, 0);
    }
}
