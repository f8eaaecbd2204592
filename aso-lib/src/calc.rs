//! Normalization and aggregation primitives
//!
//! Every scorer turns raw statistics (install counts, ranks, days since an update, ...) into
//! comparable values on a closed 1..=10 scale. The mapping functions in this module clamp the
//! raw value into a known range and project it linearly onto that scale, either directly
//! ([`score`], [`z_score`]) or inverted ([`i_score`], [`iz_score`]) for statistics where a
//! smaller raw value is better.
//!
//! [`aggregate`] combines several weighted sub-scores into a single value on the same scale
//! by treating the weighted sum as a score bounded by its theoretical minimum (every input at
//! 1) and maximum (every input at 10).
//!
//! All public outputs are rounded to two decimals, half away from zero.

const SCALE_MIN: f64 = 1.0;
const SCALE_MAX: f64 = 10.0;

/// Round to two decimals, half away from zero.
#[must_use]
pub fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map `value` linearly from `[min, max]` onto `[1, 10]`, clamping first.
///
/// `min` must be strictly less than `max`.
#[must_use]
pub fn score(min: f64, max: f64, value: f64) -> f64 {
    let value = value.max(min).min(max);
    round(SCALE_MIN + (SCALE_MAX - SCALE_MIN) * (value - min) / (max - min))
}

/// Zero-based score, `score(0, max, value)`.
#[must_use]
pub fn z_score(max: f64, value: f64) -> f64 {
    score(0.0, max, value)
}

/// Inverted score: `min` maps to 10 and `max` maps to 1.
///
/// `min` must be strictly less than `max`.
#[must_use]
pub fn i_score(min: f64, max: f64, value: f64) -> f64 {
    let value = value.max(min).min(max);
    round(SCALE_MIN + (SCALE_MAX - SCALE_MIN) * (max - value) / (max - min))
}

/// Inverted, zero-based score, `i_score(0, max, value)`.
#[must_use]
pub fn iz_score(max: f64, value: f64) -> f64 {
    i_score(0.0, max, value)
}

/// Combine weighted sub-scores into a single score on the 1..=10 scale.
///
/// `weights` and `values` are parallel; weights must be positive and values are expected to
/// already be scores. The weighted sum is rescaled between `Σw·1` and `Σw·10`.
#[must_use]
pub fn aggregate(weights: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(weights.len(), values.len(), "weights and values must be parallel");

    let total_weight: f64 = weights.iter().sum();
    let sum: f64 = weights.iter().zip(values).map(|(weight, value)| weight * value).sum();

    score(total_weight * SCALE_MIN, total_weight * SCALE_MAX, sum)
}
