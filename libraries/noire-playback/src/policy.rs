//! Free-tier skip policy
//!
//! Each explicit skip consumes one unit of the budget. When the budget runs
//! out a lockout starts; until it expires skips are refused. Once the lockout
//! has expired the next evaluation resets the budget to zero.

use crate::config::PolicyConfig;
use crate::progress::ceil_secs;
use noire_core::SkipPolicyState;

/// Outcome of registering a skip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDecision {
    /// Skip counted and allowed
    Allowed {
        /// Skip count after this skip
        skip_count: u32,
        /// An ad is due on this skip
        ad_due: bool,
        /// This skip exhausted the budget; lockout deadline (epoch ms)
        lockout_started: Option<u64>,
    },

    /// Lockout active, nothing counted
    Rejected {
        /// When skips are restored (epoch ms)
        lockout_until: u64,
    },
}

/// Skip budget state machine
#[derive(Debug, Clone)]
pub struct SkipPolicy {
    state: SkipPolicyState,
    config: PolicyConfig,
}

impl SkipPolicy {
    /// Resume from persisted `state`
    pub fn new(state: SkipPolicyState, config: PolicyConfig) -> Self {
        Self { state, config }
    }

    /// Current persisted form
    pub fn state(&self) -> SkipPolicyState {
        self.state
    }

    /// Rules in effect
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Reset the budget if the lockout has run out. Returns whether it did.
    pub fn refresh(&mut self, now_ms: u64) -> bool {
        if self.state.lockout_expired(now_ms) {
            self.state = SkipPolicyState::cleared();
            true
        } else {
            false
        }
    }

    /// Whether skips are refused at `now_ms`
    pub fn is_locked(&self, now_ms: u64) -> bool {
        self.state.is_locked(now_ms)
    }

    /// State as seen at `now_ms`, with an expired lockout already reset
    pub fn effective_state(&self, now_ms: u64) -> SkipPolicyState {
        if self.state.lockout_expired(now_ms) {
            SkipPolicyState::cleared()
        } else {
            self.state
        }
    }

    /// Count one skip
    pub fn register_skip(&mut self, now_ms: u64) -> SkipDecision {
        self.refresh(now_ms);
        if self.state.is_locked(now_ms) {
            return SkipDecision::Rejected {
                lockout_until: self.state.lockout_until,
            };
        }

        self.state.skip_count = self.state.skip_count.saturating_add(1);
        let skip_count = self.state.skip_count;

        let lockout_started = (skip_count >= self.config.skip_limit).then(|| {
            let until = now_ms.saturating_add(self.config.lockout_duration_ms);
            self.state.lockout_until = until;
            until
        });

        SkipDecision::Allowed {
            skip_count,
            ad_due: skip_count % self.config.ad_every_skips == 0,
            lockout_started,
        }
    }

    /// Skips left before the lockout, `None` while locked
    pub fn skips_remaining(&self, now_ms: u64) -> Option<u32> {
        if self.state.is_locked(now_ms) {
            return None;
        }
        let used = self.effective_state(now_ms).skip_count;
        Some(self.config.skip_limit.saturating_sub(used))
    }

    /// Whole seconds until skips are restored, `None` when not locked
    pub fn lockout_remaining_secs(&self, now_ms: u64) -> Option<u64> {
        self.state
            .is_locked(now_ms)
            .then(|| ceil_secs(self.state.lockout_until - now_ms))
    }
}
