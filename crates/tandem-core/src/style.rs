//! Host style configuration
//!
//! The host sends `style` as a map from style id to `{ value?, defaultValue? }`,
//! where either side is a scalar or a `{ color }` object. Every lookup goes
//! through [`StyleEntry::resolve`], which prefers the user value and falls
//! back to the declared default.

use crate::FilterBounds;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Style ids declared by the visualization config
pub mod ids {
    pub const BAR_COLOR: &str = "barColor";
    pub const SCATTER_COLOR: &str = "scatterColor";
    pub const UPPER_BOUND: &str = "scatterFilter1";
    pub const LOWER_BOUND: &str = "scatterFilter2";
    pub const INCLUDE_NULLS: &str = "scatterFilter3";
    pub const SPACING: &str = "spacing";
    pub const ZOOM: &str = "zoom";
    pub const MARK_SEPARATORS: &str = "markCurrency";
    pub const LABEL_BAR_Y: &str = "labelBarY";
    pub const LABEL_SCATTER_X: &str = "labelScatterX";
    pub const LABEL_SCATTER_Y: &str = "labelScatterY";
}

/// Scalar style payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    Text(String),
}

/// Colour object (`{ "color": "#1a73e8", "opacity": 1 }`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColorValue {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub opacity: Option<f64>,
}

/// Either side of a style entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Color(ColorValue),
    Scalar(Scalar),
}

/// Typed extraction from a [`StyleValue`]
pub trait FromStyle: Sized {
    fn from_style(value: &StyleValue) -> Option<Self>;
}

impl FromStyle for f64 {
    fn from_style(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Scalar(Scalar::Number(n)) => Some(*n),
            StyleValue::Scalar(Scalar::Text(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl FromStyle for bool {
    fn from_style(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Scalar(Scalar::Bool(b)) => Some(*b),
            StyleValue::Scalar(Scalar::Text(s)) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            StyleValue::Scalar(Scalar::Number(n)) => Some(*n != 0.0),
            StyleValue::Color(_) => None,
        }
    }
}

impl FromStyle for String {
    fn from_style(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Scalar(Scalar::Text(s)) if !s.is_empty() => Some(s.clone()),
            StyleValue::Scalar(Scalar::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// CSS colour string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(pub String);

impl Color {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStyle for Color {
    fn from_style(value: &StyleValue) -> Option<Self> {
        match value {
            StyleValue::Color(c) => c.color.clone().map(Color),
            StyleValue::Scalar(Scalar::Text(s)) if !s.is_empty() => Some(Color(s.clone())),
            _ => None,
        }
    }
}

/// `{ value?, defaultValue? }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry {
    #[serde(default)]
    pub value: Option<StyleValue>,
    #[serde(default)]
    pub default_value: Option<StyleValue>,
}

impl StyleEntry {
    pub fn with_default(default_value: StyleValue) -> Self {
        Self {
            value: None,
            default_value: Some(default_value),
        }
    }

    /// User value if it has the requested shape, else the default
    pub fn resolve<T: FromStyle>(&self) -> Option<T> {
        self.value
            .as_ref()
            .and_then(T::from_style)
            .or_else(|| self.default_value.as_ref().and_then(T::from_style))
    }
}

/// Style id → entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleConfig(pub HashMap<String, StyleEntry>);

impl StyleConfig {
    pub fn get<T: FromStyle>(&self, id: &str) -> Option<T> {
        self.0.get(id).and_then(StyleEntry::resolve)
    }

    /// User value only; the declared default is ignored
    pub fn get_value<T: FromStyle>(&self, id: &str) -> Option<T> {
        self.0
            .get(id)
            .and_then(|entry| entry.value.as_ref())
            .and_then(T::from_style)
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: StyleEntry) {
        self.0.insert(id.into(), entry);
    }
}

// ============================================================================
// TYPED VISUALIZATION STYLE
// ============================================================================

/// Resolved style for one render cycle
#[derive(Debug, Clone, PartialEq)]
pub struct VizStyle {
    /// Unset when neither value nor default is configured
    pub bar_color: Option<Color>,
    pub scatter_color: Option<Color>,
    pub bounds: FilterBounds,
    /// Vertical gap between the panels (px)
    pub spacing: f64,
    pub zoom: bool,
    /// Horizontal marks at the panel seam
    pub mark_separators: bool,
    pub bar_y_label: Option<String>,
    pub scatter_x_label: Option<String>,
    pub scatter_y_label: Option<String>,
}

impl Default for VizStyle {
    fn default() -> Self {
        Self {
            bar_color: None,
            scatter_color: None,
            bounds: FilterBounds::default(),
            spacing: 0.0,
            zoom: false,
            mark_separators: false,
            bar_y_label: None,
            scatter_x_label: None,
            scatter_y_label: None,
        }
    }
}

impl VizStyle {
    pub fn from_config(config: &StyleConfig) -> Self {
        let defaults = Self::default();

        let bar_color = config.get::<Color>(ids::BAR_COLOR);
        if bar_color.is_none() {
            tracing::warn!(style = ids::BAR_COLOR, "no colour configured, bars drawn without fill");
        }
        let scatter_color = config.get::<Color>(ids::SCATTER_COLOR);
        if scatter_color.is_none() {
            tracing::warn!(style = ids::SCATTER_COLOR, "no colour configured, dots drawn without fill");
        }

        let bounds = FilterBounds {
            upper: config
                .get::<f64>(ids::UPPER_BOUND)
                .unwrap_or(defaults.bounds.upper),
            lower: config
                .get::<f64>(ids::LOWER_BOUND)
                .unwrap_or(defaults.bounds.lower),
            include_nulls: config
                .get::<bool>(ids::INCLUDE_NULLS)
                .unwrap_or(defaults.bounds.include_nulls),
        };

        Self {
            bar_color,
            scatter_color,
            bounds,
            spacing: config
                .get::<f64>(ids::SPACING)
                .filter(|s| s.is_finite())
                .unwrap_or(defaults.spacing),
            zoom: config.get(ids::ZOOM).unwrap_or(defaults.zoom),
            mark_separators: config
                .get(ids::MARK_SEPARATORS)
                .unwrap_or(defaults.mark_separators),
            // Blank titles fall through to the host field name, not the default
            bar_y_label: config.get_value(ids::LABEL_BAR_Y),
            scatter_x_label: config.get_value(ids::LABEL_SCATTER_X),
            scatter_y_label: config.get_value(ids::LABEL_SCATTER_Y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> StyleConfig {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_value_wins_over_default() {
        let cfg = config(r#"{ "spacing": { "value": 12, "defaultValue": 4 } }"#);
        assert_eq!(cfg.get::<f64>(ids::SPACING), Some(12.0));
    }

    #[test]
    fn test_default_used_when_value_absent() {
        let cfg = config(r#"{ "spacing": { "defaultValue": "4" } }"#);
        assert_eq!(cfg.get::<f64>(ids::SPACING), Some(4.0));
    }

    #[test]
    fn test_color_object_falls_back_to_default_color() {
        let cfg = config(
            r##"{ "barColor": { "value": { "opacity": 0.5 }, "defaultValue": { "color": "#4285f4" } } }"##,
        );
        assert_eq!(cfg.get::<Color>(ids::BAR_COLOR), Some(Color("#4285f4".into())));
    }

    #[test]
    fn test_boolean_accepts_string_form() {
        let cfg = config(r#"{ "scatterFilter3": { "defaultValue": "true" }, "zoom": { "value": false, "defaultValue": true } }"#);
        assert_eq!(cfg.get::<bool>(ids::INCLUDE_NULLS), Some(true));
        assert_eq!(cfg.get::<bool>(ids::ZOOM), Some(false));
    }

    #[test]
    fn test_missing_entry_is_none() {
        let cfg = StyleConfig::default();
        assert_eq!(cfg.get::<f64>(ids::SPACING), None);
        assert_eq!(cfg.get::<Color>(ids::BAR_COLOR), None);
    }

    #[test]
    fn test_viz_style_defaults() {
        let style = VizStyle::from_config(&StyleConfig::default());
        assert_eq!(style.bounds.lower, f64::NEG_INFINITY);
        assert_eq!(style.bounds.upper, f64::INFINITY);
        assert!(!style.bounds.include_nulls);
        assert_eq!(style.spacing, 0.0);
        assert!(style.bar_color.is_none());
    }

    #[test]
    fn test_viz_style_resolves_bounds_and_labels() {
        let cfg = config(
            r#"{
                "scatterFilter1": { "value": "50" },
                "scatterFilter2": { "defaultValue": -5 },
                "labelScatterX": { "value": "Day" },
                "labelScatterY": { "value": "", "defaultValue": "Level (m)" },
                "labelBarY": { "defaultValue": "Rain" },
                "markCurrency": { "defaultValue": true }
            }"#,
        );
        let style = VizStyle::from_config(&cfg);
        assert_eq!(style.bounds.upper, 50.0);
        assert_eq!(style.bounds.lower, -5.0);
        assert_eq!(style.scatter_x_label.as_deref(), Some("Day"));
        assert_eq!(style.scatter_y_label, None);
        assert_eq!(style.bar_y_label, None);
        assert!(style.mark_separators);
    }
}
