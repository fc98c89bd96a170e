//! Data points and the per-cycle dataset

use crate::TemporalKey;
use serde::{Deserialize, Serialize};

/// Secondary scatter metric: the host may send numbers or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub key: TemporalKey,
    /// Bar panel metric
    pub bar: f64,
    /// Scatter panel y value
    pub primary: Option<f64>,
    /// Scatter tooltip value
    pub secondary: Option<MetricValue>,
}

impl DataPoint {
    pub fn new(key: TemporalKey, bar: f64) -> Self {
        Self {
            key,
            bar,
            primary: None,
            secondary: None,
        }
    }

    pub fn with_primary(mut self, primary: Option<f64>) -> Self {
        self.primary = primary;
        self
    }

    pub fn with_secondary(mut self, secondary: Option<MetricValue>) -> Self {
        self.secondary = secondary;
        self
    }

    /// Primary metric as the host coerces it: null reads as zero
    pub fn primary_value(&self) -> f64 {
        self.primary.unwrap_or(0.0)
    }
}

/// Points of one render cycle, in host order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub points: Vec<DataPoint>,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    /// Earliest and latest key timestamps (ms)
    pub fn time_range(&self) -> Option<(i64, i64)> {
        extent(self.points.iter().map(|p| p.key.timestamp_millis()))
    }

    /// Largest finite bar metric
    pub fn bar_max(&self) -> Option<f64> {
        finite_extent(self.points.iter().map(|p| p.bar)).map(|(_, max)| max)
    }

    /// Min and max of the primary metric (nulls read as zero)
    pub fn primary_range(&self) -> Option<(f64, f64)> {
        finite_extent(self.points.iter().map(DataPoint::primary_value))
    }
}

impl FromIterator<DataPoint> for Dataset {
    fn from_iter<I: IntoIterator<Item = DataPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn extent<I: Iterator<Item = i64>>(values: I) -> Option<(i64, i64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}

/// Min/max over finite values only
pub fn finite_extent<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values.filter(|v| v.is_finite()).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}
