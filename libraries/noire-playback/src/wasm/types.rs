//! Conversions between JS values and playback types

use crate::{PlaybackError, RepeatMode, ShuffleMode, SkipDirection};
use noire_core::NoireError;
use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

/// Parse a skip direction ("next" | "prev")
pub fn parse_direction(direction: &str) -> Result<SkipDirection, JsValue> {
    match direction {
        "next" => Ok(SkipDirection::Next),
        "prev" => Ok(SkipDirection::Previous),
        _ => Err(JsValue::from_str("Invalid direction. Use 'next' or 'prev'")),
    }
}

/// Parse a shuffle mode ("off" | "random")
pub fn parse_shuffle(mode: &str) -> Result<ShuffleMode, JsValue> {
    match mode {
        "off" => Ok(ShuffleMode::Off),
        "random" => Ok(ShuffleMode::Random),
        _ => Err(JsValue::from_str("Invalid shuffle mode. Use 'off' or 'random'")),
    }
}

/// Parse a repeat mode ("off" | "one")
pub fn parse_repeat(mode: &str) -> Result<RepeatMode, JsValue> {
    match mode {
        "off" => Ok(RepeatMode::Off),
        "one" => Ok(RepeatMode::One),
        _ => Err(JsValue::from_str("Invalid repeat mode. Use 'off' or 'one'")),
    }
}

pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse {}: {}", what, e)))
}

pub(crate) fn playback_error(error: &PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

pub(crate) fn storage_error(error: &JsValue) -> NoireError {
    NoireError::storage(
        error
            .as_string()
            .unwrap_or_else(|| "localStorage unavailable".to_string()),
    )
}
