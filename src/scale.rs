//! Value → coordinate normalization shared by every layout family.
//!
//! Every helper here guards its denominator: a degenerate range maps to the
//! midpoint, and implied maxima are floored at 1, so callers never divide by zero.

use serde::{Deserialize, Serialize};

/// Ratio of `value` within `[min, max]`, clamped to `[0, 1]`.
///
/// A degenerate range (`min == max`) returns the midpoint `0.5`.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.abs() < f64::EPSILON || !span.is_finite() {
        return 0.5;
    }
    ((finite_or_zero(value) - min) / span).clamp(0.0, 1.0)
}

/// Largest value, floored at 1. Empty and all-zero inputs yield 1.
pub fn max_floor<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .map(finite_or_zero)
        .fold(1.0, f64::max)
}

/// Share of `value` in `total`; zero when the total is not positive.
#[inline]
pub fn share(value: f64, total: f64) -> f64 {
    if total > 0.0 {
        finite_or_zero(value) / total
    } else {
        0.0
    }
}

/// NaN and infinities count as zero.
#[inline]
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Negative and non-finite values count as zero.
#[inline]
pub fn clamp_non_negative(v: f64) -> f64 {
    finite_or_zero(v).max(0.0)
}

/// Shares of each value in the clamped total, with an equal-share fallback
/// when the total is not positive. Empty input yields an empty vector.
pub fn proportions(values: &[f64]) -> Vec<f64> {
    let clamped: Vec<f64> = values.iter().copied().map(clamp_non_negative).collect();
    let total: f64 = clamped.iter().sum();
    if clamped.is_empty() {
        return Vec::new();
    }
    if total > 0.0 {
        clamped.iter().map(|v| v / total).collect()
    } else {
        vec![1.0 / clamped.len() as f64; clamped.len()]
    }
}

/// A closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Tight range over the values; empty input yields `[0, 1]`.
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in values.into_iter().map(finite_or_zero) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo > hi {
            return Self::new(0.0, 1.0);
        }
        Self::new(lo, hi)
    }

    /// Range over the values that always contains zero; a degenerate
    /// result is widened to a span of 1.
    pub fn including_zero<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let tight = Self::of(values);
        let lo = tight.min.min(0.0);
        let mut hi = tight.max.max(0.0);
        if (hi - lo).abs() < f64::EPSILON {
            hi = lo + 1.0;
        }
        Self::new(lo, hi)
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn normalize(&self, v: f64) -> f64 {
        normalize(v, self.min, self.max)
    }
}

/// Maps a value domain linearly onto an output interval.
///
/// The output interval may be reversed (`start > end`), which is how
/// y axes grow upward on a y-down canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: ValueRange,
    pub start: f64,
    pub end: f64,
}

impl LinearScale {
    pub fn new(domain: ValueRange, start: f64, end: f64) -> Self {
        Self { domain, start, end }
    }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        self.start + self.domain.normalize(v) * (self.end - self.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_range_is_midpoint() {
        assert_eq!(normalize(3.0, 3.0, 3.0), 0.5);
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(20.0, 0.0, 10.0), 1.0);
    }

    #[test]
    fn max_floor_guards_all_zero() {
        assert_eq!(max_floor([0.0, 0.0]), 1.0);
        assert_eq!(max_floor(Vec::<f64>::new()), 1.0);
        assert_eq!(max_floor([0.5, 20.0]), 20.0);
    }

    #[test]
    fn proportions_fall_back_to_equal_share() {
        assert_eq!(proportions(&[0.0, -3.0]), vec![0.5, 0.5]);
        assert_eq!(proportions(&[1.0, 3.0]), vec![0.25, 0.75]);
        assert!(proportions(&[]).is_empty());
    }
}
