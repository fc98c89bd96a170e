//! Sample host messages for local development and tests

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    ids, ColorValue, FieldMeta, Fields, HostMessage, MetricValue, Row, Scalar, StyleConfig,
    StyleEntry, StyleValue, DEFAULT_TABLE,
};

/// Shape of the generated series
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub start: NaiveDate,
    pub days: u64,
    pub seed: u64,
    /// Probability that a row has no scatter reading
    pub null_ratio: f64,
    /// Probability that a day has no rain
    pub dry_ratio: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            days: 90,
            seed: 7,
            null_ratio: 0.05,
            dry_ratio: 0.4,
        }
    }
}

struct MockGauge {
    rng: StdRng,
    level: f64,
    trend: f64,
}

impl MockGauge {
    fn new(seed: u64, initial_level: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            level: initial_level,
            trend: 0.0,
        }
    }

    fn rain(&mut self, dry_ratio: f64) -> f64 {
        if self.rng.gen_bool(dry_ratio.clamp(0.0, 1.0)) {
            0.0
        } else {
            let depth: f64 = self.rng.gen_range(0.0..1.0);
            (depth * depth * 60.0 * 10.0).round() / 10.0
        }
    }

    /// River level responds to rain with some inertia
    fn level(&mut self, rain: f64) -> f64 {
        if self.rng.gen_bool(0.05) {
            self.trend = self.rng.gen_range(-0.5..0.5);
        }
        let noise = self.rng.gen_range(-0.05..0.05);
        self.level = (self.level * 0.97 + rain * 0.02 + self.trend * 0.1 + noise).max(0.1);
        (self.level * 100.0).round() / 100.0
    }
}

/// Build a complete message (rows, fields, style) from `config`
pub fn sample_message(config: &SampleConfig) -> HostMessage {
    let mut gauge = MockGauge::new(config.seed, 2.5);
    let stations = ["north", "south", "east"];

    let rows = (0..config.days)
        .filter_map(|offset| config.start.checked_add_days(Days::new(offset)))
        .enumerate()
        .map(|(i, date)| {
            let rain = gauge.rain(config.dry_ratio);
            let level = gauge.level(rain);
            let missing = gauge.rng.gen_bool(config.null_ratio.clamp(0.0, 1.0));
            Row {
                temporal_dimension: vec![date.format("%Y%m%d").to_string()],
                metric: vec![Some(rain)],
                metric1: vec![(!missing).then_some(level)],
                metric2: vec![Some(MetricValue::Text(stations[i % stations.len()].to_string()))],
            }
        })
        .collect();

    let mut message = HostMessage {
        fields: sample_fields(),
        style: sample_style(),
        ..Default::default()
    };
    message.tables.insert(DEFAULT_TABLE.to_string(), rows);
    message
}

pub fn sample_fields() -> Fields {
    Fields {
        temporal_dimension: vec![FieldMeta::new("qt_date", "Date")],
        metric: vec![FieldMeta::new("qt_rain", "Rainfall (mm)")],
        metric1: vec![FieldMeta::new("qt_level", "River level (m)")],
        metric2: vec![FieldMeta::new("qt_station", "Station")],
    }
}

/// Defaults mirroring the visualization's declared style config
pub fn sample_style() -> StyleConfig {
    let color = |hex: &str| {
        StyleEntry::with_default(StyleValue::Color(ColorValue {
            color: Some(hex.to_string()),
            opacity: Some(1.0),
        }))
    };
    let scalar = |s: Scalar| StyleEntry::with_default(StyleValue::Scalar(s));

    let mut style = StyleConfig::default();
    style.insert(ids::BAR_COLOR, color("#4285f4"));
    style.insert(ids::SCATTER_COLOR, color("#db4437"));
    style.insert(ids::INCLUDE_NULLS, scalar(Scalar::Text("false".into())));
    style.insert(ids::SPACING, scalar(Scalar::Number(10.0)));
    style.insert(ids::ZOOM, scalar(Scalar::Bool(true)));
    style.insert(ids::MARK_SEPARATORS, scalar(Scalar::Bool(false)));
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_sample_message_is_decodable() {
        let message = sample_message(&SampleConfig::default());
        let data = message.dataset().unwrap();
        assert_eq!(data.len(), 90);
        assert!(data.points.windows(2).all(|w| w[0].key < w[1].key));
        assert!(data.iter().all(|p| p.bar >= 0.0));
    }

    #[test]
    fn test_sample_is_reproducible() {
        let config = SampleConfig::default();
        let a = sample_message(&config).dataset().unwrap();
        let b = sample_message(&config).dataset().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_style_resolves() {
        let style = sample_message(&SampleConfig::default()).viz_style();
        assert_eq!(style.bar_color, Some(Color("#4285f4".into())));
        assert_eq!(style.spacing, 10.0);
        assert!(style.zoom);
    }
}
