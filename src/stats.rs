//! Search difficulty and duration estimation.
//!
//! Pure projections of a [`KeySpec`] and an assumed or observed search
//! speed; nothing here carries state.

use crate::spec::KeySpec;

/// Seconds in a Julian year.
const YEAR_SECS: f64 = 365.25 * 24.0 * 3600.0;

/// Speed assumed before any throughput has been observed.
pub const DEFAULT_ASSUMED_SPEED: f64 = 1000.0;

/// A point-in-time projection of how hard a pattern is to hit.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyEstimate {
    /// Expected number of attempts for a 1-in-N chance of matching
    pub difficulty: f64,
    /// Attempts needed for a 50% cumulative success probability
    pub attempts_for_p50: u64,
    /// Human-readable estimate of the time to 50% at the given speed
    pub estimated_duration: String,
}

/// Expected attempts for a single match of the pattern.
///
/// Each hex digit narrows the space by 16. Checksum-sensitive matching
/// additionally fixes the casing of every letter, doubling the difficulty
/// per letter; decimal digits have no case and contribute nothing extra.
///
/// Computed in floating point: a full 38-digit pattern reaches 16^38,
/// beyond any fixed-width integer.
pub fn difficulty(spec: &KeySpec) -> f64 {
    let mut difficulty = 16f64.powi(spec.pattern_len() as i32);
    if spec.checksum_sensitive() {
        difficulty *= 2f64.powi(spec.letter_count() as i32);
    }
    difficulty
}

/// Attempts needed to reach a 50% cumulative probability of success:
/// `floor(ln 0.5 / ln(1 - 1/difficulty))`.
///
/// Difficulty at or below 1 means every attempt succeeds; the answer is 0
/// rather than a negative-infinity artifact of the logarithm.
pub fn attempts_for_p50(difficulty: f64) -> u64 {
    if difficulty <= 1.0 {
        return 0;
    }
    // ln_1p keeps precision once 1/difficulty falls below f64 epsilon
    let per_attempt_miss = (-1.0 / difficulty).ln_1p();
    (0.5f64.ln() / per_attempt_miss).floor() as u64
}

/// Formats a duration in seconds as a short banded label.
///
/// Bands: beyond 200 years the exact figure stops being useful and the
/// output degenerates to a fixed string; otherwise the largest fitting unit
/// wins, rounded.
pub fn format_duration(seconds: f64) -> String {
    if seconds > 200.0 * YEAR_SECS {
        "damn yeaarrss".into()
    } else if seconds > YEAR_SECS {
        format!("{} y", (seconds / YEAR_SECS).round())
    } else if seconds > 24.0 * 3600.0 {
        format!("{} d", (seconds / (24.0 * 3600.0)).round())
    } else if seconds > 3600.0 {
        format!("{} h", (seconds / 3600.0).round())
    } else if seconds > 60.0 {
        format!("{} m", (seconds / 60.0).round())
    } else {
        format!("{} s", seconds.round())
    }
}

/// Bundles difficulty, 50%-probability attempts, and the formatted duration
/// for a pattern at a given speed (attempts per second).
///
/// A non-positive speed means no throughput has been observed yet; the
/// duration falls back to [`DEFAULT_ASSUMED_SPEED`] rather than reporting a
/// hard pattern as instantaneous.
pub fn estimate(spec: &KeySpec, speed: f64) -> DifficultyEstimate {
    let difficulty = difficulty(spec);
    let attempts = attempts_for_p50(difficulty);
    let speed = if speed > 0.0 {
        speed
    } else {
        DEFAULT_ASSUMED_SPEED
    };
    let seconds = attempts as f64 / speed;

    DifficultyEstimate {
        difficulty,
        attempts_for_p50: attempts,
        estimated_duration: format_duration(seconds),
    }
}

/// Formats a large count compactly ("65.54K", "1.05M").
pub fn format_count(n: f64) -> String {
    if n >= 1e12 {
        format!("{:.2}T", n / 1e12)
    } else if n >= 1e9 {
        format!("{:.2}B", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.2}M", n / 1e6)
    } else if n >= 1e3 {
        format!("{:.2}K", n / 1e3)
    } else {
        format!("{n:.0}")
    }
}
