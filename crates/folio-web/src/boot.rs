#![forbid(unsafe_code)]

//! Startup plumbing shared by the browser entry point and native tests.

use std::time::Duration;

use folio_core::FolioConfig;

/// Id of the optional `<script type="application/json">` config element.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Resolve the page configuration from the config element's text.
///
/// Absent or blank means defaults. Malformed or invalid JSON also falls back
/// to defaults, with a warning: a broken config must not break the page.
#[must_use]
pub fn resolve_config(raw: Option<&str>) -> FolioConfig {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        tracing::debug!("no page config, using defaults");
        return FolioConfig::default();
    };
    match FolioConfig::from_json_str(raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(%err, "page config rejected, using defaults");
            FolioConfig::default()
        }
    }
}

/// Host time since initialization from two `performance.now()` readings.
///
/// Non-finite or backwards readings clamp to zero; the core clock is
/// monotonic anyway.
#[must_use]
pub fn elapsed(origin_ms: f64, now_ms: f64) -> Duration {
    let delta = now_ms - origin_ms;
    if delta.is_finite() && delta > 0.0 {
        Duration::from_secs_f64(delta / 1000.0)
    } else {
        Duration::ZERO
    }
}

/// Delay to hand `setTimeout` for a deadline, in whole milliseconds.
#[must_use]
pub fn timeout_ms(deadline: Duration, now: Duration) -> i32 {
    let wait = deadline.saturating_sub(now);
    // Round up so the timer never fires before the deadline is due.
    let ms = wait.as_micros().div_ceil(1000);
    i32::try_from(ms).unwrap_or(i32::MAX)
}

/// Fold two `Math.random()` draws into a shuffle seed.
#[must_use]
pub fn seed_from(a: f64, b: f64) -> u64 {
    const SCALE: f64 = (1u64 << 32) as f64;
    let hi = (a.clamp(0.0, 1.0) * SCALE) as u64;
    let lo = (b.clamp(0.0, 1.0) * SCALE) as u64;
    (hi << 32) ^ lo
}
