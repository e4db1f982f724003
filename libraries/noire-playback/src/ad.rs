//! Ad interstitial
//!
//! A fixed-length, non-skippable interruption for free-tier listeners. The
//! interstitial is a deadline, not a blocking call: the host drives it by
//! calling the transport's `tick`.

use crate::error::Result;

/// Plays the optional ad sound.
///
/// Failing to play is cosmetic: the interstitial still runs for its full
/// length, silently.
pub trait AdAudio {
    /// Start playing `asset`
    fn play(&mut self, asset: &str) -> Result<()>;

    /// Stop the ad sound (interstitial over)
    fn stop(&mut self) {}
}

/// Ad audio that plays nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAdAudio;

impl AdAudio for SilentAdAudio {
    fn play(&mut self, _asset: &str) -> Result<()> {
        Ok(())
    }
}

/// Ephemeral interstitial state (never persisted)
#[derive(Debug, Clone, Default)]
pub struct AdInterstitial {
    ends_at: Option<u64>,
}

impl AdInterstitial {
    /// Create a hidden interstitial
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the interstitial until `now_ms + duration_ms`.
    ///
    /// Returns `false` if one is already showing; triggers are coalesced,
    /// never stacked or extended.
    pub fn begin(&mut self, now_ms: u64, duration_ms: u64) -> bool {
        if self.ends_at.is_some() {
            return false;
        }
        self.ends_at = Some(now_ms.saturating_add(duration_ms));
        true
    }

    /// Whether the interstitial is on screen
    pub fn is_showing(&self) -> bool {
        self.ends_at.is_some()
    }

    /// Deadline of the current interstitial
    pub fn ends_at(&self) -> Option<u64> {
        self.ends_at
    }

    /// Whether the current interstitial has run its course at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.ends_at.is_some_and(|ends_at| now_ms >= ends_at)
    }

    /// Milliseconds left, 0 when hidden
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.ends_at
            .map_or(0, |ends_at| ends_at.saturating_sub(now_ms))
    }

    /// Hide the interstitial
    pub fn finish(&mut self) {
        self.ends_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_for_its_duration() {
        let mut ad = AdInterstitial::new();
        assert!(ad.begin(1_000, 5_000));

        assert!(ad.is_showing());
        assert!(!ad.is_due(5_999));
        assert_eq!(ad.remaining_ms(3_000), 3_000);
        assert!(ad.is_due(6_000));

        ad.finish();
        assert!(!ad.is_showing());
        assert_eq!(ad.remaining_ms(6_000), 0);
    }

    #[test]
    fn concurrent_triggers_coalesce() {
        let mut ad = AdInterstitial::new();
        assert!(ad.begin(0, 5_000));
        assert!(!ad.begin(2_000, 5_000));
        assert_eq!(ad.ends_at(), Some(5_000));
    }

    #[test]
    fn silent_audio_always_succeeds() {
        let mut audio = SilentAdAudio;
        assert!(audio.play("/assets/audio/noire-ad.mp3").is_ok());
        audio.stop();
    }
}
