//! Tier-gated transport
//!
//! Wraps a [`PlaybackSession`] with the subscription rules:
//! - free listeners have a skip budget; exhausting it locks skipping for a
//!   while (the budget survives reloads through a [`PolicyStore`])
//! - free listeners see an ad interstitial on every third skip and after every
//!   third completed track
//! - paid listeners skip freely and never see ads
//!
//! Time never passes on its own here. The host calls [`TierGatedTransport::tick`]
//! periodically (once a second is plenty) to end ads and expire lockouts.

use crate::{
    ad::{AdAudio, AdInterstitial, SilentAdAudio},
    config::PlayerConfig,
    error::Result,
    events::PlaybackEvent,
    policy::{SkipDecision, SkipPolicy},
    session::PlaybackSession,
    shuffle::random_index,
    types::{LoadToken, PlayerSnapshot, RepeatMode, ShuffleMode, SkipDirection},
};
use noire_core::{Clock, PlanTier, PolicyStore, SkipPolicyState, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

/// Result of a skip request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SkipOutcome {
    /// Moved to `index`
    #[serde(rename_all = "camelCase")]
    Advanced {
        /// New current index
        index: usize,
        /// This skip triggered the ad interstitial
        ad_started: bool,
    },

    /// Lockout active; nothing changed
    #[serde(rename_all = "camelCase")]
    Rejected {
        /// When skips are restored (epoch ms)
        lockout_until: u64,
    },

    /// No track loaded
    NoTrack,
}

/// Result of a track-ended report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum TrackEndOutcome {
    /// Moved to `index`
    Advanced {
        /// New current index
        index: usize,
    },

    /// Same track restarted (repeat one)
    Restarted,

    /// Ad started; the advance happens when it finishes
    AdStarted,

    /// The report came from a previous load
    Stale,

    /// No track loaded, or an ad is on screen
    Ignored,
}

/// Playback session with free-tier skip limits and ads
pub struct TierGatedTransport {
    session: PlaybackSession,
    config: PlayerConfig,
    plan: PlanTier,

    // Skip budget and its durable copy
    policy: SkipPolicy,
    store: Box<dyn PolicyStore>,
    clock: Box<dyn Clock>,

    // Ad interstitial
    ad: AdInterstitial,
    ad_audio: Box<dyn AdAudio>,
    songs_played: u32,
    pending_advance: bool,

    // Navigation modes
    shuffle: ShuffleMode,
    repeat: RepeatMode,
    rng: StdRng,
}

impl TierGatedTransport {
    /// Create a transport for a free listener.
    ///
    /// The skip budget is read from `store`; an unreadable store starts from a
    /// fresh budget. A lockout that expired while the player was away is
    /// cleared right away.
    pub fn new(
        config: PlayerConfig,
        store: impl PolicyStore + 'static,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        config.validate()?;

        let state = match store.get() {
            Ok(Some(state)) => state,
            Ok(None) => SkipPolicyState::cleared(),
            Err(e) => {
                warn!("Failed to read skip policy, starting fresh: {}", e);
                SkipPolicyState::cleared()
            }
        };

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut transport = Self {
            session: PlaybackSession::new(),
            policy: SkipPolicy::new(state, config.policy.clone()),
            config,
            plan: PlanTier::Free,
            store: Box::new(store),
            clock: Box::new(clock),
            ad: AdInterstitial::new(),
            ad_audio: Box::new(SilentAdAudio),
            songs_played: 0,
            pending_advance: false,
            shuffle: ShuffleMode::Off,
            repeat: RepeatMode::Off,
            rng,
        };

        let now = transport.clock.now_ms();
        if transport.policy.refresh(now) {
            debug!("Stored skip lockout already expired, budget reset");
            transport.persist_policy();
        }

        Ok(transport)
    }

    /// Use `audio` for the ad sound
    #[must_use]
    pub fn with_ad_audio(mut self, audio: impl AdAudio + 'static) -> Self {
        self.set_ad_audio(audio);
        self
    }

    /// Replace the ad sound player
    pub fn set_ad_audio(&mut self, audio: impl AdAudio + 'static) {
        self.ad_audio = Box::new(audio);
    }

    // ===== Settings =====

    /// Set the listener's plan.
    ///
    /// An ad already on screen still runs to completion.
    pub fn set_plan(&mut self, plan: PlanTier) {
        if self.plan == plan {
            return;
        }
        info!("Plan changed: {} -> {}", self.plan, plan);
        self.plan = plan;
    }

    /// Listener's plan
    pub fn plan(&self) -> PlanTier {
        self.plan
    }

    /// Set shuffle mode
    pub fn set_shuffle(&mut self, mode: ShuffleMode) {
        self.shuffle = mode;
    }

    /// Shuffle mode
    pub fn shuffle(&self) -> ShuffleMode {
        self.shuffle
    }

    /// Set repeat mode
    pub fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    // ===== Session commands =====

    /// Replace the queue and play `tracks[index]`.
    ///
    /// Starting is never limited by the skip budget. If an ad is on screen the
    /// new track loads paused and resumes when the ad ends.
    pub fn start(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        self.session.start(tracks, index)?;
        self.pending_advance = false;
        if self.ad.is_showing() {
            self.session.set_playing(false);
        }
        Ok(())
    }

    /// Flip play/pause. Returns `false` when ignored (no track, or an ad is
    /// showing).
    pub fn toggle_playback(&mut self) -> bool {
        if self.ad.is_showing() {
            debug!("Ignoring play/pause during ad");
            return false;
        }
        if self.session.current_index().is_none() {
            return false;
        }
        self.session.toggle_playback();
        true
    }

    /// Ask the audio surface to move to `seconds`
    pub fn request_seek(&mut self, seconds: f64) {
        self.session.request_seek(seconds);
    }

    /// Seek to a fraction of the current track
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Option<f64> {
        self.session.seek_to_fraction(fraction)
    }

    /// Consume the pending seek
    pub fn take_pending_seek(&mut self) -> Option<f64> {
        self.session.take_pending_seek()
    }

    /// Update telemetry for the current track
    pub fn report_progress(&mut self, elapsed_secs: f64, total_duration_secs: f64) {
        self.session.report_progress(elapsed_secs, total_duration_secs);
    }

    /// Update telemetry if `token` identifies the current load
    pub fn report_progress_for(
        &mut self,
        token: &LoadToken,
        elapsed_secs: f64,
        total_duration_secs: f64,
    ) -> bool {
        self.session
            .report_progress_for(token, elapsed_secs, total_duration_secs)
    }

    /// Hide the player surface
    pub fn close(&mut self) {
        self.session.close();
    }

    /// Show the player surface again
    pub fn reopen(&mut self) -> bool {
        self.session.reopen()
    }

    // ===== Gated navigation =====

    /// Skip to the next or previous track.
    ///
    /// Free listeners spend one unit of the skip budget per call. The skip that
    /// exhausts the budget still goes through and starts the lockout; skips
    /// during the lockout are rejected without counting.
    pub fn skip(&mut self, direction: SkipDirection) -> SkipOutcome {
        let now = self.clock.now_ms();
        let Some(len) = self.session.current_index().map(|_| self.session.queue().len()) else {
            return SkipOutcome::NoTrack;
        };

        let mut ad_due = false;
        if !self.plan.is_paid() {
            self.refresh_lockout(now);
            match self.policy.register_skip(now) {
                SkipDecision::Rejected { lockout_until } => {
                    debug!("Skip rejected, locked until {}", lockout_until);
                    self.session
                        .push_event(PlaybackEvent::SkipRejected { lockout_until });
                    return SkipOutcome::Rejected { lockout_until };
                }
                SkipDecision::Allowed {
                    skip_count,
                    ad_due: due,
                    lockout_started,
                } => {
                    debug!("Skip {} of {}", skip_count, self.config.policy.skip_limit);
                    self.persist_policy();
                    if let Some(lockout_until) = lockout_started {
                        info!("Skip limit reached, locked until {}", lockout_until);
                        self.session
                            .push_event(PlaybackEvent::LockoutStarted { lockout_until });
                    }
                    ad_due = due;
                }
            }
        }

        let target = match direction {
            SkipDirection::Next => self.next_index(len),
            SkipDirection::Previous => self.session.queue().previous_index(),
        };
        let Some(index) = target else {
            return SkipOutcome::NoTrack;
        };

        self.pending_advance = false;
        if let Err(e) = self.session.load_index(index) {
            error!("Failed to load queue index {}: {}", index, e);
            return SkipOutcome::NoTrack;
        }

        let ad_started = ad_due && self.begin_ad(now);
        if self.ad.is_showing() {
            self.session.set_playing(false);
        }

        SkipOutcome::Advanced { index, ad_started }
    }

    /// The current track played to its end.
    ///
    /// Free listeners get an ad after every third completed track; the move to
    /// the next track waits for the ad to finish. Never counts as a skip.
    pub fn on_track_ended(&mut self) -> TrackEndOutcome {
        if self.session.current_index().is_none() || self.ad.is_showing() {
            return TrackEndOutcome::Ignored;
        }

        self.songs_played = self.songs_played.saturating_add(1);
        if !self.plan.is_paid() && self.songs_played % self.config.policy.ad_every_tracks == 0 {
            let now = self.clock.now_ms();
            if self.begin_ad(now) {
                self.pending_advance = true;
                return TrackEndOutcome::AdStarted;
            }
        }

        self.advance_after_track()
    }

    /// Like [`Self::on_track_ended`], ignoring reports from a previous load
    pub fn on_track_ended_for(&mut self, token: &LoadToken) -> TrackEndOutcome {
        if !self.session.is_current(token) {
            debug!(
                "Discarding stale track end for {} (generation {})",
                token.track_id, token.generation
            );
            return TrackEndOutcome::Stale;
        }
        self.on_track_ended()
    }

    /// Show the ad interstitial now (free listeners only).
    ///
    /// Returns `false` if the plan is paid or an ad is already showing.
    pub fn show_ad(&mut self) -> bool {
        let now = self.clock.now_ms();
        self.begin_ad(now)
    }

    /// Advance time-based state: end a finished ad, clear an expired lockout
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        self.refresh_lockout(now);

        if self.ad.is_due(now) {
            self.finish_ad();
        }
    }

    // ===== State Queries =====

    /// Underlying session
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Configuration in effect
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Persisted skip budget
    pub fn policy_state(&self) -> SkipPolicyState {
        self.policy.state()
    }

    /// Skips left before a lockout, `None` for paid plans or while locked
    pub fn skips_remaining(&self) -> Option<u32> {
        if self.plan.is_paid() {
            return None;
        }
        self.policy.skips_remaining(self.clock.now_ms())
    }

    /// Whole seconds until skips are restored, `None` when not locked
    pub fn lockout_remaining_secs(&self) -> Option<u64> {
        if self.plan.is_paid() {
            return None;
        }
        self.policy.lockout_remaining_secs(self.clock.now_ms())
    }

    /// Whether skips are currently refused
    pub fn is_skip_locked(&self) -> bool {
        !self.plan.is_paid() && self.policy.is_locked(self.clock.now_ms())
    }

    /// Tracks completed this session
    pub fn songs_played(&self) -> u32 {
        self.songs_played
    }

    /// Whether the ad interstitial is on screen
    pub fn is_ad_showing(&self) -> bool {
        self.ad.is_showing()
    }

    /// Everything the UI renders
    pub fn snapshot(&self) -> PlayerSnapshot {
        let now = self.clock.now_ms();
        let policy = self.policy.effective_state(now);

        PlayerSnapshot {
            queue: self.session.queue().tracks().to_vec(),
            current_index: self
                .session
                .current_index()
                .and_then(|index| i64::try_from(index).ok())
                .unwrap_or(-1),
            is_open: self.session.is_open(),
            state: self.session.state(),
            transport: self.session.transport().clone(),
            plan: self.plan,
            ad_showing: self.ad.is_showing(),
            ad_remaining_ms: self.ad.remaining_ms(now),
            skip_count: policy.skip_count,
            skips_remaining: self.skips_remaining(),
            lockout_until: policy.lockout_until,
            lockout_remaining_secs: self.lockout_remaining_secs(),
            shuffle: self.shuffle,
            repeat: self.repeat,
        }
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.session.drain_events()
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        self.session.has_pending_events()
    }

    // ===== Internal =====

    fn next_index(&mut self, len: usize) -> Option<usize> {
        match self.shuffle {
            ShuffleMode::Random => random_index(len, &mut self.rng),
            ShuffleMode::Off => self.session.queue().next_index(),
        }
    }

    fn advance_after_track(&mut self) -> TrackEndOutcome {
        if self.repeat == RepeatMode::One {
            return match self.session.restart_current() {
                Ok(()) => TrackEndOutcome::Restarted,
                Err(_) => TrackEndOutcome::Ignored,
            };
        }

        let len = self.session.queue().len();
        let Some(index) = self.next_index(len) else {
            return TrackEndOutcome::Ignored;
        };
        match self.session.load_index(index) {
            Ok(()) => TrackEndOutcome::Advanced { index },
            Err(e) => {
                error!("Failed to advance to queue index {}: {}", index, e);
                TrackEndOutcome::Ignored
            }
        }
    }

    fn begin_ad(&mut self, now: u64) -> bool {
        if self.plan.is_paid() {
            return false;
        }
        if !self.ad.begin(now, self.config.policy.ad_duration_ms) {
            debug!("Ad already showing, trigger coalesced");
            return false;
        }

        self.session.set_playing(false);
        if let Some(asset) = &self.config.policy.ad_asset {
            if let Err(e) = self.ad_audio.play(asset) {
                warn!("Ad audio unavailable, running silent: {}", e);
            }
        }

        let ends_at = self.ad.ends_at().unwrap_or(now);
        info!("Ad started, ends at {}", ends_at);
        self.session
            .push_event(PlaybackEvent::AdStarted { ends_at });
        true
    }

    fn finish_ad(&mut self) {
        self.ad.finish();
        self.ad_audio.stop();
        info!("Ad finished");
        self.session.push_event(PlaybackEvent::AdFinished);

        if std::mem::take(&mut self.pending_advance) {
            self.advance_after_track();
        } else {
            self.session.set_playing(true);
        }
    }

    fn refresh_lockout(&mut self, now: u64) {
        if self.policy.refresh(now) {
            info!("Skip lockout expired, budget restored");
            self.persist_policy();
            self.session.push_event(PlaybackEvent::LockoutCleared);
        }
    }

    fn persist_policy(&mut self) {
        if let Err(e) = self.store.set(&self.policy.state()) {
            warn!("Failed to persist skip policy: {}", e);
        }
    }
}

impl std::fmt::Debug for TierGatedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierGatedTransport")
            .field("session", &self.session)
            .field("plan", &self.plan)
            .field("policy", &self.policy)
            .field("ad", &self.ad)
            .field("songs_played", &self.songs_played)
            .field("shuffle", &self.shuffle)
            .field("repeat", &self.repeat)
            .finish_non_exhaustive()
    }
}
