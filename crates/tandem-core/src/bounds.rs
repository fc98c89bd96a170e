//! Scatter filter bounds

/// Inclusive range on the primary scatter metric plus null visibility.
///
/// `lower > upper` is accepted as configured and simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterBounds {
    pub upper: f64,
    pub lower: f64,
    pub include_nulls: bool,
}

impl Default for FilterBounds {
    fn default() -> Self {
        Self {
            upper: f64::INFINITY,
            lower: f64::NEG_INFINITY,
            include_nulls: false,
        }
    }
}

impl FilterBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            upper,
            lower,
            ..Default::default()
        }
    }

    pub fn include_nulls(mut self, include: bool) -> Self {
        self.include_nulls = include;
        self
    }

    /// `lower <= value <= upper`
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn is_inverted(&self) -> bool {
        self.lower > self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_everything_finite() {
        let bounds = FilterBounds::default();
        assert!(bounds.contains(-1e300));
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(1e300));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = FilterBounds::new(5.0, 10.0);
        assert!(bounds.contains(5.0));
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(10.01));
    }

    #[test]
    fn test_inverted_bounds_match_nothing() {
        let bounds = FilterBounds::new(10.0, 5.0);
        assert!(bounds.is_inverted());
        assert!(!bounds.contains(7.0));
        assert!(!bounds.contains(10.0));
        assert!(!bounds.contains(5.0));
    }
}
