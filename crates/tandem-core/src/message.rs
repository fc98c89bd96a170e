//! Host data message (object-transformed table, fields, style, interactions)

use crate::{DataPoint, Dataset, MetricValue, Result, StyleConfig, TandemError, TemporalKey, VizStyle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the table carrying the chart rows
pub const DEFAULT_TABLE: &str = "DEFAULT";

/// Interaction id registered for point clicks
pub const CLICK_ACTION: &str = "onClick";

/// One message per data/style update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostMessage {
    #[serde(default)]
    pub tables: HashMap<String, Vec<Row>>,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default)]
    pub style: StyleConfig,
    #[serde(default)]
    pub interactions: HashMap<String, Interaction>,
}

impl HostMessage {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn rows(&self) -> Result<&[Row]> {
        self.tables
            .get(DEFAULT_TABLE)
            .map(Vec::as_slice)
            .ok_or_else(|| TandemError::MissingTable(DEFAULT_TABLE.to_string()))
    }

    /// Decode every row; the first malformed row aborts the cycle
    pub fn dataset(&self) -> Result<Dataset> {
        self.rows()?
            .iter()
            .enumerate()
            .map(|(i, row)| row.to_point(i))
            .collect::<Result<Vec<_>>>()
            .map(Dataset::new)
    }

    pub fn viz_style(&self) -> VizStyle {
        VizStyle::from_config(&self.style)
    }

    /// Keys of the filter currently applied by `action_id`, if any.
    ///
    /// `None` means no filter has been applied yet (distinct from an applied
    /// filter that happens to be empty).
    pub fn active_selection(&self, action_id: &str) -> Result<Option<Vec<TemporalKey>>> {
        let Some(data) = self
            .interactions
            .get(action_id)
            .and_then(|i| i.value.as_ref())
            .and_then(|v| v.data.as_ref())
        else {
            return Ok(None);
        };

        data.values
            .iter()
            .filter_map(|row| row.first())
            .map(|value| match value {
                serde_json::Value::String(s) => TemporalKey::parse(s),
                other => TemporalKey::parse(&other.to_string()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

// ============================================================================
// TABLE ROWS
// ============================================================================

/// Row as delivered by the object transform: every group is an array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub temporal_dimension: Vec<String>,
    #[serde(default)]
    pub metric: Vec<Option<f64>>,
    #[serde(default)]
    pub metric1: Vec<Option<f64>>,
    #[serde(default)]
    pub metric2: Vec<Option<MetricValue>>,
}

impl Row {
    /// Convert to a point. A null bar metric reads as zero; missing scatter
    /// metrics read as null.
    pub fn to_point(&self, index: usize) -> Result<DataPoint> {
        let raw_key = self
            .temporal_dimension
            .first()
            .ok_or(TandemError::MissingField {
                row: index,
                field: "temporalDimension",
            })?;
        let key = TemporalKey::parse(raw_key)?;

        let bar = self
            .metric
            .first()
            .copied()
            .ok_or(TandemError::MissingField {
                row: index,
                field: "metric",
            })?
            .unwrap_or(0.0);

        Ok(DataPoint::new(key, bar)
            .with_primary(self.metric1.first().copied().flatten())
            .with_secondary(self.metric2.first().cloned().flatten()))
    }
}

// ============================================================================
// FIELD METADATA
// ============================================================================

/// Field descriptor (`{ id, name }`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMeta {
    pub id: String,
    pub name: String,
}

impl FieldMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Field descriptors per config group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fields {
    #[serde(default)]
    pub temporal_dimension: Vec<FieldMeta>,
    #[serde(default)]
    pub metric: Vec<FieldMeta>,
    #[serde(default)]
    pub metric1: Vec<FieldMeta>,
    #[serde(default)]
    pub metric2: Vec<FieldMeta>,
}

fn first_name(fields: &[FieldMeta]) -> &str {
    fields.first().map(|f| f.name.as_str()).unwrap_or("")
}

impl Fields {
    pub fn temporal_label(&self) -> &str {
        first_name(&self.temporal_dimension)
    }

    pub fn bar_label(&self) -> &str {
        first_name(&self.metric)
    }

    pub fn primary_label(&self) -> &str {
        first_name(&self.metric1)
    }

    pub fn secondary_label(&self) -> &str {
        first_name(&self.metric2)
    }

    /// Concept ids sent with filter interactions
    pub fn temporal_concepts(&self) -> Vec<String> {
        self.temporal_dimension.iter().map(|f| f.id.clone()).collect()
    }
}

// ============================================================================
// INTERACTION STATE
// ============================================================================

/// Entry of the `interactions` map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(default)]
    pub value: Option<InteractionValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionValue {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<InteractionData>,
}

/// Applied filter: one value row per selected member, aligned with `concepts`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub concepts: Vec<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MESSAGE: &str = r#"{
        "tables": { "DEFAULT": [
            { "temporalDimension": ["20240101"], "metric": [3], "metric1": [12.5], "metric2": ["north"] },
            { "temporalDimension": ["20240102"], "metric": [null], "metric1": [null], "metric2": [4] }
        ] },
        "fields": {
            "temporalDimension": [{ "id": "qt_date", "name": "Date" }],
            "metric": [{ "id": "qt_rain", "name": "Rainfall" }],
            "metric1": [{ "id": "qt_level", "name": "Level" }],
            "metric2": [{ "id": "qt_station", "name": "Station" }]
        },
        "style": {},
        "interactions": {
            "onClick": { "value": { "type": "FILTER", "data": { "concepts": ["qt_date"], "values": [["20240305"], ["20240306"]] } } }
        }
    }"#;

    #[test]
    fn test_decode_dataset() {
        let message = HostMessage::from_json(MESSAGE).unwrap();
        let data = message.dataset().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.points[0].bar, 3.0);
        assert_eq!(data.points[0].primary, Some(12.5));
        assert_eq!(data.points[0].secondary, Some(MetricValue::Text("north".into())));
        assert_eq!(data.points[1].bar, 0.0);
        assert_eq!(data.points[1].primary, None);
        assert_eq!(data.points[1].secondary, Some(MetricValue::Number(4.0)));
    }

    #[test]
    fn test_field_labels_and_concepts() {
        let message = HostMessage::from_json(MESSAGE).unwrap();
        assert_eq!(message.fields.temporal_label(), "Date");
        assert_eq!(message.fields.secondary_label(), "Station");
        assert_eq!(message.fields.temporal_concepts(), vec!["qt_date".to_string()]);
    }

    #[test]
    fn test_active_selection() {
        let message = HostMessage::from_json(MESSAGE).unwrap();
        let keys = message.active_selection(CLICK_ACTION).unwrap().unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].canonical(), "20240305");
    }

    #[test]
    fn test_no_interaction_data_means_no_selection() {
        let message = HostMessage::from_json(
            r#"{ "tables": { "DEFAULT": [] }, "interactions": { "onClick": { "value": { "type": "FILTER" } } } }"#,
        )
        .unwrap();
        assert!(message.active_selection(CLICK_ACTION).unwrap().is_none());
        assert!(message.active_selection("other").unwrap().is_none());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let message = HostMessage::default();
        assert!(matches!(message.dataset(), Err(TandemError::MissingTable(_))));
    }

    #[test]
    fn test_malformed_key_propagates() {
        let message = HostMessage::from_json(
            r#"{ "tables": { "DEFAULT": [ { "temporalDimension": ["2024-13-45"], "metric": [1] } ] } }"#,
        )
        .unwrap();
        assert!(matches!(
            message.dataset(),
            Err(TandemError::InvalidTemporalKey { .. })
        ));
    }

    #[test]
    fn test_missing_bar_metric_reports_row() {
        let message = HostMessage::from_json(
            r#"{ "tables": { "DEFAULT": [ { "temporalDimension": ["20240101"], "metric": [1] }, { "temporalDimension": ["20240102"] } ] } }"#,
        )
        .unwrap();
        match message.dataset() {
            Err(TandemError::MissingField { row, field }) => {
                assert_eq!(row, 1);
                assert_eq!(field, "metric");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
