//! One render cycle, up to the point of mounting

use tandem_charts::{ChartFrame, Viewport};
use tandem_core::{CLICK_ACTION, HostMessage, Result};
use tandem_state::{SelectionSet, apply_filters};

/// Everything a mounted chart needs from one host message
#[derive(Debug, Clone)]
pub struct PreparedCycle {
    pub frame: ChartFrame,
    /// Host's applied click filter, if any
    pub selection: Option<SelectionSet>,
    /// Temporal dimension field ids sent with interactions
    pub concepts: Vec<String>,
}

/// Decode, filter and lay out `message` for a `(width, height)` frame
pub fn prepare_cycle(message: &HostMessage, viewport: (f64, f64)) -> Result<PreparedCycle> {
    let points = message.dataset()?;
    let style = message.viz_style();
    let scatter = apply_filters(&points, &style.bounds);

    let selection = message
        .active_selection(CLICK_ACTION)?
        .map(|keys| keys.into_iter().collect::<SelectionSet>());

    let (width, height) = viewport;
    let frame = ChartFrame::new(
        points,
        scatter,
        style,
        message.fields.clone(),
        Viewport::new(width, height),
    );

    Ok(PreparedCycle {
        frame,
        selection,
        concepts: message.fields.temporal_concepts(),
    })
}
