//! # tandem-charts
//!
//! D3.js-style SVG rendering of a bar chart stacked over a scatter chart that
//! share one time axis.
//!
//! ## Architecture
//!
//! Uses Strategy pattern for:
//! - Scale computation (linear, time)
//! - Scatter jitter (random, none)
//!
//! ## Modules
//!
//! - `chartkit` - Core primitives: scales, zoom, domain rounding, formatters
//! - `scales` - Shared x-scale and per-panel y-scales for one render cycle
//! - `geometry` - Bar rectangles and scatter dots
//! - `tooltip` - Tooltip text, placement and per-cycle state
//! - `frame` - Everything one render cycle draws
//! - `dual` - Leptos SVG components

pub mod chartkit;
pub mod dual;
pub mod frame;
pub mod geometry;
pub mod scales;
pub mod tooltip;

pub use chartkit::*;
pub use dual::*;
pub use frame::*;
pub use geometry::*;
pub use scales::*;
pub use tooltip::*;

// Re-export colors from tandem-core for convenience
pub use tandem_core::colors;

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Room for rotated axis titles on the left and date labels below
    pub const fn dual() -> Self {
        Self::new(30.0, 30.0, 40.0, 80.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::dual()
    }
}

/// Host-reported size of the visualization frame (px)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Plotting rectangle of one panel, relative to the SVG origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PanelRect {
    /// SVG transform for the panel group
    pub fn transform(&self) -> String {
        format!("translate({}, {})", self.left, self.top)
    }
}

/// Fraction of the viewport kept free to avoid host scrollbars
const SECURITY_HEIGHT: f64 = 0.03;
const SECURITY_WIDTH: f64 = 0.01;

/// Share of the plotting height given to the bar panel
const BAR_SHARE: f64 = 0.35;
const SCATTER_SHARE: f64 = 0.65;

/// Layout of the stacked panels, recomputed every render cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DualLayout {
    pub margin: ChartMargin,
    pub spacing: f64,
    /// Plotting width shared by both panels
    pub width: f64,
    /// Plotting height split between the panels
    pub height: f64,
    pub bar: PanelRect,
    pub scatter: PanelRect,
}

impl DualLayout {
    pub fn compute(viewport: Viewport, spacing: f64) -> Self {
        let margin = ChartMargin::dual();
        let spacing = if spacing.is_finite() { spacing } else { 0.0 };

        let height = (viewport.height
            - margin.top
            - margin.bottom
            - viewport.height * SECURITY_HEIGHT)
            .max(0.0);
        let width = (viewport.width
            - margin.left
            - margin.right
            - viewport.width * SECURITY_WIDTH)
            .max(0.0);

        let bar_height = (height * BAR_SHARE - spacing).max(0.0);
        let scatter_height = (height * SCATTER_SHARE - spacing).max(0.0);

        Self {
            margin,
            spacing,
            width,
            height,
            bar: PanelRect {
                left: margin.left,
                top: margin.top,
                width,
                height: bar_height,
            },
            scatter: PanelRect {
                left: margin.left,
                top: margin.top + bar_height + spacing * 2.0,
                width,
                height: scatter_height,
            },
        }
    }

    pub fn svg_width(&self) -> f64 {
        self.width + self.margin.left + self.margin.right
    }

    pub fn svg_height(&self) -> f64 {
        self.height + self.margin.top + self.margin.bottom
    }

    /// ViewBox string for SVG
    pub fn viewbox(&self) -> String {
        format!("0 0 {} {}", self.svg_width(), self.svg_height())
    }
}
