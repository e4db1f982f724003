//! Progress and scrub-bar math

/// Percentage of the track played.
///
/// Yields 0 while the duration is unknown (0) or not a finite number, so the
/// scrub bar never receives NaN or infinity. Capped at 100.
pub fn progress_percent(elapsed_secs: f64, total_secs: f64) -> f64 {
    if !total_secs.is_finite() || total_secs <= 0.0 || !elapsed_secs.is_finite() {
        return 0.0;
    }
    (elapsed_secs.max(0.0) / total_secs * 100.0).min(100.0)
}

/// Sanitize a reported time: negative or non-finite values become 0
pub fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}

/// Clamp a seek target at the rendering boundary.
///
/// Targets are kept within `[0, duration]`; with an unknown duration only the
/// lower bound applies.
pub fn clamp_seek(target_secs: f64, duration_secs: f64) -> f64 {
    let target = sanitize_secs(target_secs);
    if duration_secs.is_finite() && duration_secs > 0.0 {
        target.min(duration_secs)
    } else {
        target
    }
}

/// Convert a scrub-bar fraction to a position in seconds.
///
/// The fraction is clamped to `[0, 1]`; returns `None` while the duration is
/// unknown.
pub fn fraction_to_position(fraction: f64, duration_secs: f64) -> Option<f64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return None;
    }
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    Some(fraction * duration_secs)
}

/// Format seconds as `m:ss`
pub fn format_time(secs: f64) -> String {
    let total = sanitize_secs(secs).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Whole seconds covering `ms`, rounded up
pub fn ceil_secs(ms: u64) -> u64 {
    ms.div_ceil(1000)
}
