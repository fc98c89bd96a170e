//! Scale Builder: one shared time axis, one y-scale per panel

use crate::{DualLayout, LinearScale, TimeScale, rounded_domain};
use tandem_core::Dataset;

/// Scales of one render cycle; rebuilt, never mutated
#[derive(Debug, Clone, PartialEq)]
pub struct ScalePair {
    pub x: TimeScale,
    /// Grows downward: bars hang from the top edge of their panel
    pub y_bar: LinearScale,
    pub y_scatter: LinearScale,
}

impl ScalePair {
    /// `all` drives the shared x-domain and the bar domain so both panels stay
    /// aligned; `scatter` is the filtered scatter set.
    pub fn build(all: &Dataset, scatter: &Dataset, layout: &DualLayout) -> Self {
        let (t_min, t_max) = all.time_range().unwrap_or((0, 0));
        let x = TimeScale::new().domain(t_min, t_max).range(0.0, layout.width);

        let bar_max = all.bar_max().unwrap_or(0.0);
        let y_bar = LinearScale::new()
            .domain(0.0, bar_max)
            .range(0.0, layout.bar.height);

        let (s_min, s_max) = scatter
            .primary_range()
            .map(|(min, max)| rounded_domain(min, max))
            .unwrap_or((0.0, 0.0));
        let y_scatter = LinearScale::new()
            .domain(s_min, s_max)
            .range(layout.scatter.height, 0.0);

        Self { x, y_bar, y_scatter }
    }
}
