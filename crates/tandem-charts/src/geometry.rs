//! Chart Renderer geometry: bar rectangles and scatter dots
//!
//! Pure mapping from points and scales to drawable shapes. Jitter only moves
//! the drawn `cy`; the point's value is carried through untouched.

use crate::{LinearScale, Scale, TimeScale};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tandem_core::{DataPoint, Dataset, TemporalKey};

/// Scatter dot radius at rest and on hover
pub const DOT_RADIUS: f64 = 5.0;
pub const DOT_HOVER_RADIUS: f64 = 7.0;
pub const DOT_HOVER_STROKE: f64 = 2.0;

/// Bar outline drawn on hover
pub const BAR_HOVER_STROKE: f64 = 15.0;

/// Full vertical jitter span (px); offsets fall in `±amplitude / 2`
pub const JITTER_AMPLITUDE: f64 = 5.0;

// ============================================================================
// STRATEGY PATTERN: Jitter
// ============================================================================

/// Strategy trait for vertical de-overlap offsets
pub trait Jitter {
    fn offset(&mut self) -> f64;
}

/// Draw dots exactly at their value
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn offset(&mut self) -> f64 {
        0.0
    }
}

/// Uniform offset in `[-amplitude / 2, amplitude / 2)`
#[derive(Debug, Clone)]
pub struct RandomJitter<R: Rng> {
    pub amplitude: f64,
    rng: R,
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(amplitude: f64, rng: R) -> Self {
        Self { amplitude, rng }
    }
}

impl RandomJitter<StdRng> {
    /// Reproducible jitter
    pub fn seeded(amplitude: f64, seed: u64) -> Self {
        Self::new(amplitude, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Jitter for RandomJitter<R> {
    fn offset(&mut self) -> f64 {
        if self.amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-0.5..0.5) * self.amplitude
    }
}

/// Jitter settings of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JitterConfig {
    pub amplitude: f64,
    /// Fixed seed for reproducible layouts; entropy-seeded otherwise
    pub seed: Option<u64>,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            amplitude: JITTER_AMPLITUDE,
            seed: None,
        }
    }
}

impl JitterConfig {
    pub fn disabled() -> Self {
        Self {
            amplitude: 0.0,
            seed: None,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn strategy(&self) -> RandomJitter<StdRng> {
        match self.seed {
            Some(seed) => RandomJitter::seeded(self.amplitude, seed),
            None => RandomJitter::new(self.amplitude, StdRng::from_entropy()),
        }
    }
}

// ============================================================================
// BARS
// ============================================================================

/// One bar, hanging from the top of the bar panel
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub index: usize,
    pub key: TemporalKey,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Per-point pixel budget, never thinner than one pixel
pub fn bar_width(panel_width: f64, count: usize) -> f64 {
    if count == 0 {
        return 1.0;
    }
    (panel_width / count as f64).max(1.0)
}

pub fn layout_bars(data: &Dataset, x: &TimeScale, y: &LinearScale, panel_width: f64) -> Vec<BarRect> {
    let width = bar_width(panel_width, data.len());

    data.iter()
        .enumerate()
        .map(|(index, point)| {
            let height = y.scale(point.bar);
            BarRect {
                index,
                key: point.key,
                x: x.scale(point.key.timestamp_millis()),
                y: 0.0,
                width,
                height: if height.is_finite() { height.max(0.0) } else { 0.0 },
            }
        })
        .collect()
}

// ============================================================================
// SCATTER DOTS
// ============================================================================

/// One scatter dot
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterDot {
    /// Position in the filtered scatter dataset
    pub index: usize,
    pub key: TemporalKey,
    /// Plotted value (nulls read as zero)
    pub value: f64,
    pub cx: f64,
    /// Unjittered position of `value`
    pub base_cy: f64,
    pub cy: f64,
}

pub fn layout_dots(
    scatter: &Dataset,
    x: &TimeScale,
    y: &LinearScale,
    jitter: &mut impl Jitter,
) -> Vec<ScatterDot> {
    scatter
        .iter()
        .enumerate()
        .map(|(index, point): (usize, &DataPoint)| {
            let value = point.primary_value();
            let base_cy = y.scale(value);
            ScatterDot {
                index,
                key: point.key,
                value,
                cx: x.scale(point.key.timestamp_millis()),
                base_cy,
                cy: base_cy + jitter.offset(),
            }
        })
        .collect()
}

/// Dot closest to `(px, py)` in panel coordinates
pub fn nearest_dot(dots: &[ScatterDot], px: f64, py: f64) -> Option<usize> {
    dots.iter()
        .map(|d| (d.index, (d.cx - px).hypot(d.cy - py)))
        .filter(|(_, dist)| dist.is_finite())
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}
