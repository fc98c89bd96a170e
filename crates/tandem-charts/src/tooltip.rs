//! Tooltip text, placement and per-cycle state

use tandem_core::{DataPoint, Fields, colors};

/// Panel a hovered shape belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Scatter,
}

/// Shown in place of a missing metric
pub const MISSING_VALUE: &str = "n/a";

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipLine {
    pub label: String,
    pub value: String,
}

impl TooltipLine {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// Labelled lines describing one hovered point
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipContent {
    pub lines: Vec<TooltipLine>,
}

impl TooltipContent {
    /// Date line, then the panel's metric; scatter adds the secondary metric
    pub fn for_point(point: &DataPoint, fields: &Fields, kind: ChartKind) -> Self {
        let mut lines = vec![TooltipLine::new(fields.temporal_label(), point.key.label())];

        match kind {
            ChartKind::Bar => {
                lines.push(TooltipLine::new(fields.bar_label(), point.bar.to_string()));
            }
            ChartKind::Scatter => {
                let primary = point
                    .primary
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| MISSING_VALUE.to_string());
                let secondary = point
                    .secondary
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| MISSING_VALUE.to_string());
                lines.push(TooltipLine::new(fields.primary_label(), primary));
                lines.push(TooltipLine::new(fields.secondary_label(), secondary));
            }
        }

        Self { lines }
    }
}

// ============================================================================
// PLACEMENT
// ============================================================================

/// Gap between cursor and tooltip (px)
pub const TOOLTIP_OFFSET: f64 = 10.0;

/// Page-coordinate placement of the tooltip box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
}

impl TooltipPlacement {
    /// Right of and above the cursor, flipped at the page's right and bottom edges
    pub fn compute(
        cursor: (f64, f64),
        tooltip_size: (f64, f64),
        page_size: (f64, f64),
    ) -> Self {
        let (x, y) = cursor;
        let (tw, th) = tooltip_size;
        let (pw, ph) = page_size;

        let left = if x + tw + TOOLTIP_OFFSET > pw {
            x - tw - TOOLTIP_OFFSET
        } else {
            x + TOOLTIP_OFFSET
        };
        let top = if y + th - TOOLTIP_OFFSET > ph {
            y - th - TOOLTIP_OFFSET
        } else {
            y - TOOLTIP_OFFSET
        };

        Self { left, top }
    }
}

// ============================================================================
// STATE
// ============================================================================

/// Tooltip owned by one render cycle; hidden until something is hovered
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub visible: bool,
    pub content: TooltipContent,
    pub placement: Option<TooltipPlacement>,
}

impl TooltipState {
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn show(&mut self, content: TooltipContent, placement: TooltipPlacement) {
        self.visible = true;
        self.content = content;
        self.placement = Some(placement);
    }

    pub fn move_to(&mut self, placement: TooltipPlacement) {
        if self.visible {
            self.placement = Some(placement);
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn opacity(&self) -> f64 {
        if self.visible { 1.0 } else { 0.0 }
    }

    /// Inline style of the tooltip box
    pub fn css(&self) -> String {
        let (left, top) = self
            .placement
            .map(|p| (p.left, p.top))
            .unwrap_or((0.0, 0.0));
        format!(
            "position: absolute; left: {}px; top: {}px; opacity: {}; \
             background-color: {}; border: 1px solid {}; border-radius: 4px; \
             padding: 8px; font-size: 12px; pointer-events: none; box-shadow: {};",
            left,
            top,
            self.opacity(),
            colors::TOOLTIP_BG,
            colors::TOOLTIP_BORDER,
            colors::TOOLTIP_SHADOW,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::{MetricValue, TemporalKey, sample::sample_fields};

    fn point() -> DataPoint {
        DataPoint::new(TemporalKey::parse("20240305").unwrap(), 12.5)
            .with_primary(Some(3.25))
            .with_secondary(Some(MetricValue::Text("north".into())))
    }

    #[test]
    fn test_bar_tooltip_lines() {
        let content = TooltipContent::for_point(&point(), &sample_fields(), ChartKind::Bar);
        assert_eq!(
            content.lines,
            vec![
                TooltipLine::new("Date", "05/03/2024"),
                TooltipLine::new("Rainfall (mm)", "12.5"),
            ]
        );
    }

    #[test]
    fn test_hourly_keys_show_the_day() {
        let hourly = DataPoint::new(TemporalKey::parse("2024030514").unwrap(), 1.0);
        let content = TooltipContent::for_point(&hourly, &sample_fields(), ChartKind::Bar);
        assert_eq!(content.lines[0].value, "05/03/2024");
    }

    #[test]
    fn test_scatter_tooltip_adds_secondary() {
        let content = TooltipContent::for_point(&point(), &sample_fields(), ChartKind::Scatter);
        assert_eq!(content.lines.len(), 3);
        assert_eq!(content.lines[1].value, "3.25");
        assert_eq!(content.lines[2], TooltipLine::new("Station", "north"));
    }

    #[test]
    fn test_missing_values_are_marked() {
        let bare = DataPoint::new(TemporalKey::parse("20240305").unwrap(), 0.0);
        let content = TooltipContent::for_point(&bare, &sample_fields(), ChartKind::Scatter);
        assert_eq!(content.lines[1].value, MISSING_VALUE);
        assert_eq!(content.lines[2].value, MISSING_VALUE);
    }

    #[test]
    fn test_placement_defaults_right_and_above() {
        let p = TooltipPlacement::compute((100.0, 100.0), (80.0, 40.0), (800.0, 600.0));
        assert_eq!(p, TooltipPlacement { left: 110.0, top: 90.0 });
    }

    #[test]
    fn test_placement_flips_at_page_edges() {
        let p = TooltipPlacement::compute((760.0, 590.0), (80.0, 40.0), (800.0, 600.0));
        assert_eq!(p.left, 760.0 - 80.0 - 10.0);
        assert_eq!(p.top, 590.0 - 40.0 - 10.0);
    }

    #[test]
    fn test_state_lifecycle() {
        let mut state = TooltipState::hidden();
        assert_eq!(state.opacity(), 0.0);

        state.move_to(TooltipPlacement { left: 1.0, top: 1.0 });
        assert_eq!(state.placement, None);

        let content = TooltipContent::for_point(&point(), &sample_fields(), ChartKind::Bar);
        state.show(content, TooltipPlacement { left: 5.0, top: 5.0 });
        assert!(state.visible);
        state.move_to(TooltipPlacement { left: 6.0, top: 7.0 });
        assert_eq!(state.placement, Some(TooltipPlacement { left: 6.0, top: 7.0 }));

        state.hide();
        assert_eq!(state.opacity(), 0.0);
        assert!(state.css().contains("left: 6px; top: 7px; opacity: 0;"));
    }
}
