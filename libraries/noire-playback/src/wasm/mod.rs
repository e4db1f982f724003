//! WASM bindings for noire-playback
//!
//! Exposes the tier-gated transport to the browser. Skip budgets live in
//! `localStorage`, time comes from `Date.now()`.

#[cfg(feature = "wasm")]
pub mod types;

#[cfg(feature = "wasm")]
pub mod player;

#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
pub use player::WasmPlayer;

#[cfg(feature = "wasm")]
pub use storage::LocalStoragePolicyStore;
