//! # tandem-core
//!
//! Core domain types for the Tandem dual time-series chart.
//! Implements Strategy pattern for value formatting.

pub mod bounds;
pub mod error;
pub mod key;
pub mod message;
pub mod point;
pub mod sample;
pub mod style;

pub use bounds::*;
pub use error::*;
pub use key::*;
pub use message::*;
pub use point::*;
pub use style::*;

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for axis and tooltip value formatting
pub trait ValueFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Fixed number of decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDecimalFormatter {
    pub decimals: usize,
}

impl FixedDecimalFormatter {
    pub const fn new(decimals: usize) -> Self {
        Self { decimals }
    }
}

impl Default for FixedDecimalFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl ValueFormatter for FixedDecimalFormatter {
    fn format(&self, value: f64) -> String {
        format!("{:.prec$}", value, prec = self.decimals)
    }
}

// ============================================================================
// COLOR CONSTANTS
// ============================================================================

pub mod colors {
    pub const AXIS: &str = "#000000";
    pub const HOVER_STROKE: &str = "#000";
    pub const TOOLTIP_BG: &str = "white";
    pub const TOOLTIP_BORDER: &str = "#ddd";
    pub const TOOLTIP_SHADOW: &str = "0 2px 4px rgba(0,0,0,0.1)";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_decimal_formatter() {
        assert_eq!(FixedDecimalFormatter::new(2).format(3.14159), "3.14");
        assert_eq!(FixedDecimalFormatter::new(4).format(0.00123), "0.0012");
        assert_eq!(FixedDecimalFormatter::default().format(7.0), "7.00");
    }
}
