//! # chartkit
//!
//! Core chart primitives: scales, zoom transform, domain rounding, tick
//! formatting. Implements Strategy pattern for scale behaviors.

use tandem_core::{FixedDecimalFormatter, format_axis_date};

// ============================================================================
// STRATEGY PATTERN: Scale Trait
// ============================================================================

/// Strategy trait for scales (maps domain values to range values)
pub trait Scale: Send + Sync {
    /// Scale a value from domain to range
    fn scale(&self, value: f64) -> f64;
}

// ============================================================================
// LINEAR SCALE
// ============================================================================

/// Linear scale (D3-style continuous scale)
#[derive(Debug, Clone, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: f64, max: f64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Get domain bounds
    pub fn domain_bounds(&self) -> (f64, f64) {
        self.domain
    }

    /// Get range bounds
    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Step between "nice" ticks (1, 2 or 5 times a power of ten)
    pub fn nice_step(&self, count: usize) -> Option<f64> {
        let (min, max) = self.domain;
        let span = max - min;

        if span <= 0.0 || !span.is_finite() || count == 0 {
            return None;
        }

        let rough_step = span / count as f64;
        let magnitude = 10.0_f64.powf(rough_step.log10().floor());
        let residual = rough_step / magnitude;

        let step = if residual <= 1.0 {
            magnitude
        } else if residual <= 2.0 {
            2.0 * magnitude
        } else if residual <= 5.0 {
            5.0 * magnitude
        } else {
            10.0 * magnitude
        };

        Some(step)
    }

    /// Generate "nice" tick values (rounded to clean numbers)
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        let (min, max) = self.domain;
        let Some(step) = self.nice_step(count) else {
            return vec![min];
        };

        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;

        (first..=last).map(|i| i as f64 * step).collect()
    }

    /// Decimal places needed to print ticks spaced `step` apart
    pub fn tick_decimals(step: f64) -> usize {
        if step <= 0.0 || !step.is_finite() || step >= 1.0 {
            0
        } else {
            (-step.log10().floor()).max(0.0) as usize
        }
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (d_max - d_min).abs() < f64::EPSILON {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (value - d_min) / (d_max - d_min);
        r_min + normalized * (r_max - r_min)
    }
}

// ============================================================================
// TIME SCALE
// ============================================================================

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Candidate tick intervals, finest first
const TIME_STEPS_MS: [i64; 12] = [
    HOUR_MS,
    3 * HOUR_MS,
    6 * HOUR_MS,
    12 * HOUR_MS,
    DAY_MS,
    2 * DAY_MS,
    7 * DAY_MS,
    14 * DAY_MS,
    30 * DAY_MS,
    91 * DAY_MS,
    182 * DAY_MS,
    365 * DAY_MS,
];

/// Time scale (maps timestamps to pixel positions)
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    domain: (i64, i64), // Unix timestamps in milliseconds
    range: (f64, f64),
}

impl TimeScale {
    pub fn new() -> Self {
        Self {
            domain: (0, 1),
            range: (0.0, 1.0),
        }
    }

    pub fn domain(mut self, min: i64, max: i64) -> Self {
        self.domain = (min, max);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    pub fn domain_bounds(&self) -> (i64, i64) {
        self.domain
    }

    pub fn range_bounds(&self) -> (f64, f64) {
        self.range
    }

    /// Scale timestamp to pixel position
    pub fn scale(&self, timestamp: i64) -> f64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if d_max == d_min {
            return (r_min + r_max) / 2.0;
        }

        let normalized = (timestamp - d_min) as f64 / (d_max - d_min) as f64;
        r_min + normalized * (r_max - r_min)
    }

    /// Inverse scale (pixel to timestamp)
    pub fn invert(&self, value: f64) -> i64 {
        let (d_min, d_max) = self.domain;
        let (r_min, r_max) = self.range;

        if (r_max - r_min).abs() < f64::EPSILON {
            return (d_min + d_max) / 2;
        }

        let normalized = (value - r_min) / (r_max - r_min);
        (d_min as f64 + normalized * (d_max - d_min) as f64).round() as i64
    }

    /// Same range, domain narrowed to what `transform` shows
    pub fn rescale(&self, transform: &ZoomTransform) -> Self {
        if transform.is_identity() {
            return self.clone();
        }
        let (r_min, r_max) = self.range;
        Self {
            domain: (
                self.invert(transform.invert_x(r_min)),
                self.invert(transform.invert_x(r_max)),
            ),
            range: self.range,
        }
    }

    /// Roughly `count` ticks on calendar-friendly boundaries (UTC)
    pub fn ticks(&self, count: usize) -> Vec<i64> {
        let (min, max) = self.domain;
        if max <= min || count == 0 {
            return vec![min];
        }

        let target = (max - min) / count as i64;
        let step = TIME_STEPS_MS
            .iter()
            .copied()
            .find(|&s| s >= target)
            .unwrap_or(TIME_STEPS_MS[TIME_STEPS_MS.len() - 1]);

        let first = min.div_euclid(step) * step + if min.rem_euclid(step) == 0 { 0 } else { step };
        (0..)
            .map(|i| first + i * step)
            .take_while(|&t| t <= max)
            .collect()
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// ZOOM TRANSFORM
// ============================================================================

/// Zoom limits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Width of the zoomable area; translation never reveals outside `[0, width]`
    pub width: f64,
}

impl ZoomConfig {
    pub fn new(width: f64) -> Self {
        Self {
            min_scale: 1.0,
            max_scale: 15.0,
            width,
        }
    }
}

/// Horizontal zoom: `screen = k * x + tx`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub k: f64,
    pub tx: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: Self = Self { k: 1.0, tx: 0.0 };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply_x(&self, x: f64) -> f64 {
        x * self.k + self.tx
    }

    pub fn invert_x(&self, x: f64) -> f64 {
        (x - self.tx) / self.k
    }

    /// Scale by `factor` keeping the point under `anchor` fixed
    pub fn zoom_at(&self, anchor: f64, factor: f64, config: &ZoomConfig) -> Self {
        let k = (self.k * factor).clamp(config.min_scale, config.max_scale);
        let focus = self.invert_x(anchor);
        Self {
            k,
            tx: anchor - focus * k,
        }
        .constrain(config)
    }

    /// Shift by `dx` pixels
    pub fn pan(&self, dx: f64, config: &ZoomConfig) -> Self {
        Self {
            k: self.k,
            tx: self.tx + dx,
        }
        .constrain(config)
    }

    /// Scale factor for one wheel event (`delta_mode`: 0 pixels, 1 lines, 2 pages)
    pub fn wheel_factor(delta_y: f64, delta_mode: u32) -> f64 {
        let per_unit = match delta_mode {
            0 => 0.002,
            1 => 0.05,
            _ => 1.0,
        };
        2.0_f64.powf(-delta_y * per_unit)
    }

    fn constrain(self, config: &ZoomConfig) -> Self {
        let lowest = config.width * (1.0 - self.k);
        Self {
            k: self.k,
            tx: self.tx.clamp(lowest.min(0.0), 0.0),
        }
    }
}

// ============================================================================
// DOMAIN ROUNDING
// ============================================================================

/// Power of ten at or below `max_abs` (1 when `max_abs` is zero)
pub fn significance(max_abs: f64) -> f64 {
    let max_abs = max_abs.abs();
    if max_abs == 0.0 || !max_abs.is_finite() {
        return 1.0;
    }
    10.0_f64.powf(max_abs.log10().floor())
}

/// Round away from zero to a multiple of `significance`.
///
/// `|round_outward(v)| >= |v|` and the sign is preserved.
pub fn round_outward(value: f64, significance: f64) -> f64 {
    if !value.is_finite() || !(significance > 0.0) {
        return value;
    }
    if value >= 0.0 {
        round_up(value, significance)
    } else {
        round_down(value, significance)
    }
}

fn round_up(value: f64, step: f64) -> f64 {
    let rounded = (value / step).ceil() * step;
    if rounded < value { rounded + step } else { rounded }
}

fn round_down(value: f64, step: f64) -> f64 {
    let rounded = (value / step).floor() * step;
    if rounded > value { rounded - step } else { rounded }
}

/// Expand `[min, max]` to significance multiples so no value is clipped.
///
/// Each bound moves away from the interior of the domain: the upper bound
/// rounds up and the lower bound rounds down. For the usual case of a
/// positive maximum and a negative minimum this is [`round_outward`] on both.
pub fn rounded_domain(min: f64, max: f64) -> (f64, f64) {
    let step = significance(min.abs().max(max.abs()));
    (round_down(min, step), round_up(max, step))
}

// ============================================================================
// FORMATTERS
// ============================================================================

/// Decimal places for an auto-formatted axis whose upper bound is `upper`
pub fn auto_decimals(upper: f64) -> usize {
    if upper >= 1.0 {
        2
    } else if upper > 0.0 && upper.is_finite() {
        ((-upper.log10()).ceil() + 2.0).max(2.0) as usize
    } else {
        2
    }
}

/// Formatter for a scale's tick labels
pub fn auto_format(scale: &LinearScale) -> FixedDecimalFormatter {
    FixedDecimalFormatter::new(auto_decimals(scale.domain_bounds().1))
}

/// Format timestamp for chart axes
pub fn format_time(timestamp_ms: i64) -> String {
    format_axis_date(timestamp_ms)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::ValueFormatter;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new().domain(0.0, 100.0).range(0.0, 500.0);

        assert_eq!(scale.scale(0.0), 0.0);
        assert_eq!(scale.scale(50.0), 250.0);
        assert_eq!(scale.scale(100.0), 500.0);
    }

    #[test]
    fn test_degenerate_domain_maps_to_middle() {
        let scale = LinearScale::new().domain(0.0, 0.0).range(0.0, 200.0);
        assert_eq!(scale.scale(0.0), 100.0);
        assert_eq!(scale.nice_ticks(5), vec![0.0]);
    }

    #[test]
    fn test_nice_ticks() {
        let scale = LinearScale::new().domain(0.0, 7.0);
        assert_eq!(scale.nice_ticks(5), vec![0.0, 2.0, 4.0, 6.0]);

        let small = LinearScale::new().domain(-0.3, 0.3);
        let ticks = small.nice_ticks(5);
        assert_eq!(ticks.len(), 3);
        assert!(ticks.iter().all(|t| (-0.3 - 1e-9..=0.3 + 1e-9).contains(t)));
    }

    #[test]
    fn test_tick_decimals() {
        assert_eq!(LinearScale::tick_decimals(2.0), 0);
        assert_eq!(LinearScale::tick_decimals(0.1), 1);
        assert_eq!(LinearScale::tick_decimals(0.05), 2);
    }

    #[test]
    fn test_time_scale_and_degenerate_domain() {
        let scale = TimeScale::new().domain(0, 1_000).range(0.0, 100.0);
        assert_eq!(scale.scale(500), 50.0);
        assert_eq!(scale.invert(25.0), 250);

        let point = TimeScale::new().domain(42, 42).range(0.0, 100.0);
        assert_eq!(point.scale(42), 50.0);
    }

    #[test]
    fn test_time_ticks_are_day_aligned() {
        let scale = TimeScale::new().domain(0, 30 * DAY_MS).range(0.0, 600.0);
        let ticks = scale.ticks(10);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|t| t % DAY_MS == 0));
        assert!(ticks.len() <= 30);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let config = ZoomConfig::new(400.0);
        let zoomed = ZoomTransform::IDENTITY.zoom_at(200.0, 2.0, &config);
        assert_eq!(zoomed.k, 2.0);
        assert!((zoomed.apply_x(200.0) - 200.0).abs() < 1e-9);
        assert!((zoomed.invert_x(200.0) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_is_limited_and_constrained() {
        let config = ZoomConfig::new(400.0);
        let zoomed = ZoomTransform::IDENTITY.zoom_at(0.0, 100.0, &config);
        assert_eq!(zoomed.k, 15.0);

        let out = zoomed.zoom_at(0.0, 0.01, &config);
        assert!(out.is_identity());

        let panned = ZoomTransform::IDENTITY
            .zoom_at(200.0, 2.0, &config)
            .pan(10_000.0, &config);
        assert_eq!(panned.tx, 0.0);
    }

    #[test]
    fn test_wheel_factor() {
        assert_eq!(ZoomTransform::wheel_factor(0.0, 0), 1.0);
        assert!(ZoomTransform::wheel_factor(-100.0, 0) > 1.0);
        assert!(ZoomTransform::wheel_factor(100.0, 0) < 1.0);
        assert_eq!(ZoomTransform::wheel_factor(-1.0, 2), 2.0);
    }

    #[test]
    fn test_rescale_narrows_domain() {
        let scale = TimeScale::new().domain(0, 1_000).range(0.0, 100.0);
        let zoom = ZoomTransform { k: 2.0, tx: 0.0 };
        let rescaled = scale.rescale(&zoom);
        assert_eq!(rescaled.domain_bounds(), (0, 500));
        assert_eq!(rescaled.scale(500), 100.0);
    }

    #[test]
    fn test_significance() {
        assert_eq!(significance(0.0), 1.0);
        assert_eq!(significance(950.0), 100.0);
        assert_eq!(significance(1000.0), 1000.0);
        assert!((significance(0.012) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_round_outward_moves_away_from_zero() {
        let cases = [
            (3.2, 1.0, 4.0),
            (-3.2, 1.0, -4.0),
            (950.0, 100.0, 1000.0),
            (-0.013, 0.01, -0.02),
            (5.0, 1.0, 5.0),
            (0.0, 1.0, 0.0),
        ];
        for (value, sig, expected) in cases {
            let rounded = round_outward(value, sig);
            assert!((rounded - expected).abs() < 1e-12, "{value} -> {rounded}");
        }
    }

    #[test]
    fn test_round_outward_magnitude_and_sign() {
        let values = [0.3, 0.7, -0.7, 123.456, -98765.4, 1e-7, -2.5e-3, 42.0];
        for v in values {
            let sig = significance(v);
            let r = round_outward(v, sig);
            assert!(r.abs() >= v.abs(), "{v} -> {r}");
            assert_eq!(r.signum(), v.signum(), "{v} -> {r}");
        }
    }

    #[test]
    fn test_rounded_domain_contains_extremes() {
        let samples = [(3.5, 7.2), (-12.0, 48.0), (-0.042, -0.011), (0.3, 0.7), (950.0, 1020.0)];
        for (min, max) in samples {
            let (lo, hi) = rounded_domain(min, max);
            assert!(lo <= min && hi >= max, "[{min}, {max}] -> [{lo}, {hi}]");
        }
        assert_eq!(rounded_domain(-12.0, 48.0), (-20.0, 50.0));
        assert_eq!(rounded_domain(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_auto_decimals() {
        assert_eq!(auto_decimals(50.0), 2);
        assert_eq!(auto_decimals(1.0), 2);
        assert_eq!(auto_decimals(0.5), 3);
        assert_eq!(auto_decimals(0.02), 4);
        assert_eq!(auto_decimals(0.0), 2);
        assert_eq!(auto_decimals(-3.0), 2);
    }

    #[test]
    fn test_auto_format() {
        let scale = LinearScale::new().domain(0.0, 0.02);
        assert_eq!(auto_format(&scale).format(0.015), "0.0150");
    }
}
