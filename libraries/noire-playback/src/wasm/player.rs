//! WASM-compatible transport wrapper

use super::storage::LocalStoragePolicyStore;
use super::types::{from_js, parse_direction, parse_repeat, parse_shuffle, playback_error, to_js};
use crate::{AdAudio, LoadToken, PlaybackError, PlayerConfig, TierGatedTransport};
use js_sys::Function;
use noire_core::{Clock, PlanTier, Track};
use wasm_bindgen::prelude::*;

/// `Date.now()` clock
#[derive(Debug, Clone, Copy, Default)]
pub struct JsClock;

impl Clock for JsClock {
    fn now_ms(&self) -> u64 {
        let now = js_sys::Date::now();
        if now.is_finite() && now > 0.0 {
            now as u64
        } else {
            0
        }
    }
}

/// Ad sound played through JS callbacks
struct JsAdAudio {
    play: Function,
    stop: Option<Function>,
}

impl AdAudio for JsAdAudio {
    fn play(&mut self, asset: &str) -> crate::Result<()> {
        self.play
            .call1(&JsValue::NULL, &JsValue::from_str(asset))
            .map(|_| ())
            .map_err(|e| {
                PlaybackError::AdAudio(e.as_string().unwrap_or_else(|| "play failed".to_string()))
            })
    }

    fn stop(&mut self) {
        if let Some(ref stop) = self.stop {
            stop.call0(&JsValue::NULL).ok();
        }
    }
}

/// WASM-compatible player
///
/// Wraps the tier-gated transport with a JavaScript-friendly API. Every
/// command flushes the queued events to the `onEvent` callback.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: TierGatedTransport,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player. `config` is an optional `PlayerConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            from_js(config, "config")?
        };
        let store = LocalStoragePolicyStore::new(config.storage_key.clone());
        let inner = TierGatedTransport::new(config, store, JsClock)
            .map_err(|e| playback_error(&e))?;

        Ok(Self {
            inner,
            on_event: None,
        })
    }

    // ===== Session =====

    /// Replace the queue with `tracks` and play `tracks[index]`
    pub fn start(&mut self, tracks: JsValue, index: usize) -> Result<(), JsValue> {
        let tracks: Vec<Track> = from_js(tracks, "tracks")?;
        let result = self.inner.start(tracks, index);
        self.flush_events();
        result.map_err(|e| playback_error(&e))
    }

    /// Flip play/pause; `false` when ignored
    #[wasm_bindgen(js_name = togglePlayback)]
    pub fn toggle_playback(&mut self) -> bool {
        let applied = self.inner.toggle_playback();
        self.flush_events();
        applied
    }

    /// Request a seek to `seconds`
    #[wasm_bindgen(js_name = requestSeek)]
    pub fn request_seek(&mut self, seconds: f64) {
        self.inner.request_seek(seconds);
        self.flush_events();
    }

    /// Seek to a fraction (0.0 - 1.0) of the current track
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Option<f64> {
        let position = self.inner.seek_to_fraction(fraction);
        self.flush_events();
        position
    }

    /// Consume the pending seek
    #[wasm_bindgen(js_name = takePendingSeek)]
    pub fn take_pending_seek(&mut self) -> Option<f64> {
        self.inner.take_pending_seek()
    }

    /// Audio element `timeupdate`/`loadedmetadata`
    #[wasm_bindgen(js_name = reportProgress)]
    pub fn report_progress(&mut self, elapsed_secs: f64, total_duration_secs: f64) {
        self.inner.report_progress(elapsed_secs, total_duration_secs);
    }

    /// Progress report tagged with the `loadTrack` token
    #[wasm_bindgen(js_name = reportProgressFor)]
    pub fn report_progress_for(
        &mut self,
        token: JsValue,
        elapsed_secs: f64,
        total_duration_secs: f64,
    ) -> Result<bool, JsValue> {
        let token: LoadToken = from_js(token, "token")?;
        Ok(self
            .inner
            .report_progress_for(&token, elapsed_secs, total_duration_secs))
    }

    /// Audio element `ended`
    #[wasm_bindgen(js_name = trackEnded)]
    pub fn track_ended(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.inner.on_track_ended();
        self.flush_events();
        to_js(&outcome)
    }

    /// `ended` tagged with the `loadTrack` token
    #[wasm_bindgen(js_name = trackEndedFor)]
    pub fn track_ended_for(&mut self, token: JsValue) -> Result<JsValue, JsValue> {
        let token: LoadToken = from_js(token, "token")?;
        let outcome = self.inner.on_track_ended_for(&token);
        self.flush_events();
        to_js(&outcome)
    }

    /// Hide the player
    pub fn close(&mut self) {
        self.inner.close();
        self.flush_events();
    }

    /// Show the player again
    pub fn reopen(&mut self) -> bool {
        let shown = self.inner.reopen();
        self.flush_events();
        shown
    }

    // ===== Gated navigation =====

    /// Skip ("next" | "prev")
    pub fn skip(&mut self, direction: &str) -> Result<JsValue, JsValue> {
        let outcome = self.inner.skip(parse_direction(direction)?);
        self.flush_events();
        to_js(&outcome)
    }

    /// Drive ads and lockouts; call about once a second
    pub fn tick(&mut self) {
        self.inner.tick();
        self.flush_events();
    }

    // ===== Settings =====

    /// Set the listener's plan ("free" | "mini" | "basic" | "pro" | "premium" | "elite")
    #[wasm_bindgen(js_name = setPlan)]
    pub fn set_plan(&mut self, plan: &str) -> Result<(), JsValue> {
        let plan: PlanTier = plan
            .parse()
            .map_err(|e: noire_core::NoireError| JsValue::from_str(&e.to_string()))?;
        self.inner.set_plan(plan);
        self.flush_events();
        Ok(())
    }

    /// Set shuffle mode ("off" | "random")
    #[wasm_bindgen(js_name = setShuffle)]
    pub fn set_shuffle(&mut self, mode: &str) -> Result<(), JsValue> {
        self.inner.set_shuffle(parse_shuffle(mode)?);
        Ok(())
    }

    /// Set repeat mode ("off" | "one")
    #[wasm_bindgen(js_name = setRepeat)]
    pub fn set_repeat(&mut self, mode: &str) -> Result<(), JsValue> {
        self.inner.set_repeat(parse_repeat(mode)?);
        Ok(())
    }

    /// Play the ad sound through `play(asset)`, stopped with `stop()`
    #[wasm_bindgen(js_name = setAdAudio)]
    pub fn set_ad_audio(&mut self, play: Function, stop: Option<Function>) {
        self.inner.set_ad_audio(JsAdAudio { play, stop });
    }

    // ===== State Queries =====

    /// Full player state
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.snapshot())
    }

    /// Skips left before a lockout (undefined for paid plans or while locked)
    #[wasm_bindgen(js_name = skipsRemaining)]
    pub fn skips_remaining(&self) -> Option<u32> {
        self.inner.skips_remaining()
    }

    /// Whether the ad interstitial is showing
    #[wasm_bindgen(js_name = isAdShowing)]
    pub fn is_ad_showing(&self) -> bool {
        self.inner.is_ad_showing()
    }

    // ===== Event Listeners =====

    /// Register the event callback, called once per event object
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn flush_events(&mut self) {
        let events = self.inner.drain_events();
        let Some(ref cb) = self.on_event else {
            return;
        };
        for event in events {
            if let Ok(js_event) = to_js(&event) {
                cb.call1(&JsValue::NULL, &js_event).ok();
            }
        }
    }
}
