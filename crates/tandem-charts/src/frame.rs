//! Everything one render cycle draws
//!
//! A `ChartFrame` is built once per host message and handed to the SVG
//! components. Nothing in it is mutated afterwards; zoom produces rescaled
//! copies of the x-scale instead.

use crate::{
    BarRect, DualLayout, Jitter, JitterConfig, LinearScale, ScalePair, ScatterDot, TimeScale,
    Viewport, ZoomConfig, ZoomTransform, auto_format, layout_bars, layout_dots,
};
use tandem_core::{Dataset, Fields, FixedDecimalFormatter, VizStyle};

/// x-axis tick count at rest and once zoomed in
pub const X_TICKS: usize = 20;
pub const X_TICKS_ZOOMED: usize = 10;

/// Scatter y-axis tick count
pub const Y_TICKS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub layout: DualLayout,
    pub style: VizStyle,
    pub fields: Fields,
    /// All points, in host order; drives the bars and the shared x-domain
    pub points: Dataset,
    /// Points surviving the scatter filter
    pub scatter: Dataset,
    pub scales: ScalePair,
    pub jitter: JitterConfig,
}

impl ChartFrame {
    pub fn new(
        points: Dataset,
        scatter: Dataset,
        style: VizStyle,
        fields: Fields,
        viewport: Viewport,
    ) -> Self {
        let layout = DualLayout::compute(viewport, style.spacing);
        let scales = ScalePair::build(&points, &scatter, &layout);

        tracing::debug!(
            points = points.len(),
            scatter = scatter.len(),
            bar_domain = ?scales.y_bar.domain_bounds(),
            scatter_domain = ?scales.y_scatter.domain_bounds(),
            width = layout.width,
            height = layout.height,
            "chart frame built"
        );

        Self {
            layout,
            style,
            fields,
            points,
            scatter,
            scales,
            jitter: JitterConfig::default(),
        }
    }

    pub fn with_jitter(mut self, jitter: JitterConfig) -> Self {
        self.jitter = jitter;
        self
    }

    /// Shared x-scale as seen through `zoom`
    pub fn x_scale(&self, zoom: &ZoomTransform) -> TimeScale {
        self.scales.x.rescale(zoom)
    }

    pub fn x_ticks(&self, zoom: &ZoomTransform) -> Vec<i64> {
        let count = if zoom.is_identity() { X_TICKS } else { X_TICKS_ZOOMED };
        self.x_scale(zoom).ticks(count)
    }

    pub fn bars(&self, x: &TimeScale) -> Vec<BarRect> {
        layout_bars(&self.points, x, &self.scales.y_bar, self.layout.width)
    }

    /// Dots with the frame's configured jitter
    pub fn dots(&self, x: &TimeScale) -> Vec<ScatterDot> {
        self.dots_with(x, &mut self.jitter.strategy())
    }

    pub fn dots_with(&self, x: &TimeScale, jitter: &mut impl Jitter) -> Vec<ScatterDot> {
        layout_dots(&self.scatter, x, &self.scales.y_scatter, jitter)
    }

    pub fn zoom_config(&self) -> ZoomConfig {
        ZoomConfig::new(self.layout.width)
    }

    pub fn scatter_formatter(&self) -> FixedDecimalFormatter {
        auto_format(&self.scales.y_scatter)
    }

    /// Just enough decimals for the bar axis tick step
    pub fn bar_formatter(&self) -> FixedDecimalFormatter {
        let decimals = self
            .scales
            .y_bar
            .nice_step(Y_TICKS)
            .map(LinearScale::tick_decimals)
            .unwrap_or(0);
        FixedDecimalFormatter::new(decimals)
    }

    // ===== Axis titles: style override, else host field name =====

    pub fn bar_y_title(&self) -> String {
        title(&self.style.bar_y_label, self.fields.bar_label())
    }

    pub fn scatter_x_title(&self) -> String {
        title(&self.style.scatter_x_label, self.fields.temporal_label())
    }

    pub fn scatter_y_title(&self) -> String {
        title(&self.style.scatter_y_label, self.fields.primary_label())
    }

    pub fn summary(&self) -> FrameSummary {
        FrameSummary {
            bars: self.points.len(),
            dots: self.scatter.len(),
            bar_domain: self.scales.y_bar.domain_bounds(),
            scatter_domain: self.scales.y_scatter.domain_bounds(),
            plot_size: (self.layout.width, self.layout.height),
        }
    }
}

fn title(custom: &Option<String>, fallback: &str) -> String {
    custom
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Shape counts and domains of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub bars: usize,
    pub dots: usize,
    pub bar_domain: (f64, f64),
    pub scatter_domain: (f64, f64),
    pub plot_size: (f64, f64),
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bars over [{}, {}], {} dots over [{}, {}], plot {}x{}",
            self.bars,
            self.bar_domain.0,
            self.bar_domain.1,
            self.dots,
            self.scatter_domain.0,
            self.scatter_domain.1,
            self.plot_size.0,
            self.plot_size.1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoJitter;
    use tandem_core::{DataPoint, TemporalKey, sample::sample_fields};

    fn frame(style: VizStyle) -> ChartFrame {
        let points: Dataset = ["20240101", "20240102", "20240103"]
            .iter()
            .enumerate()
            .map(|(i, k)| {
                DataPoint::new(TemporalKey::parse(k).unwrap(), i as f64 + 1.0)
                    .with_primary(Some(i as f64 * 10.0))
            })
            .collect();
        let scatter = Dataset::new(points.points[1..].to_vec());
        ChartFrame::new(points, scatter, style, sample_fields(), Viewport::new(800.0, 500.0))
    }

    #[test]
    fn test_frame_shapes() {
        let f = frame(VizStyle::default());
        let x = f.x_scale(&ZoomTransform::IDENTITY);

        assert_eq!(f.bars(&x).len(), 3);
        let dots = f.dots_with(&x, &mut NoJitter);
        assert_eq!(dots.len(), 2);
        assert_eq!(dots[0].key, f.scatter.points[0].key);

        let summary = f.summary();
        assert_eq!(summary.bars, 3);
        assert_eq!(summary.dots, 2);
        assert_eq!(summary.bar_domain, (0.0, 3.0));
        assert_eq!(summary.scatter_domain, (10.0, 20.0));
        assert_eq!(f.bar_formatter().decimals, 0);
        assert_eq!(f.scatter_formatter().decimals, 2);
    }

    #[test]
    fn test_titles_fall_back_to_field_names() {
        let f = frame(VizStyle::default());
        assert_eq!(f.bar_y_title(), "Rainfall (mm)");
        assert_eq!(f.scatter_x_title(), "Date");
        assert_eq!(f.scatter_y_title(), "River level (m)");

        let styled = frame(VizStyle {
            scatter_y_label: Some("Level".into()),
            bar_y_label: Some("  ".into()),
            ..VizStyle::default()
        });
        assert_eq!(styled.scatter_y_title(), "Level");
        assert_eq!(styled.bar_y_title(), "Rainfall (mm)");
    }

    #[test]
    fn test_zoom_uses_fewer_ticks() {
        let f = frame(VizStyle::default());
        let zoomed = ZoomTransform { k: 2.0, tx: 0.0 };
        assert!(f.x_ticks(&zoomed).len() <= f.x_ticks(&ZoomTransform::IDENTITY).len());
        assert_eq!(f.zoom_config().width, f.layout.width);
    }

    #[test]
    fn test_empty_frame_draws_nothing() {
        let f = ChartFrame::new(
            Dataset::default(),
            Dataset::default(),
            VizStyle::default(),
            Fields::default(),
            Viewport::new(800.0, 500.0),
        );
        let x = f.x_scale(&ZoomTransform::IDENTITY);
        assert!(f.bars(&x).is_empty());
        assert!(f.dots(&x).is_empty());
        assert_eq!(f.bar_y_title(), "");
    }
}
