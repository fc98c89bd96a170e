//! Scatter range and null filters

use tandem_core::{DataPoint, Dataset, FilterBounds};

/// Whether `point` survives both scatter filters.
///
/// A null primary metric is tested against the range as zero, then dropped
/// unless nulls are shown.
pub fn keeps(point: &DataPoint, bounds: &FilterBounds) -> bool {
    bounds.contains(point.primary_value()) && (bounds.include_nulls || point.primary.is_some())
}

/// Points of `data` plotted on the scatter panel, in their original order
pub fn apply_filters(data: &Dataset, bounds: &FilterBounds) -> Dataset {
    if bounds.is_inverted() {
        tracing::warn!(
            lower = bounds.lower,
            upper = bounds.upper,
            "scatter bounds inverted, nothing will be plotted"
        );
    }

    let filtered: Dataset = data.iter().filter(|p| keeps(p, bounds)).cloned().collect();

    tracing::debug!(
        total = data.len(),
        kept = filtered.len(),
        include_nulls = bounds.include_nulls,
        "scatter filtered"
    );
    filtered
}
