//! Chart-configuration preparation for the rendering sink.
//!
//! The rendering layer is an external collaborator that accepts prepared
//! `{labels, datasets}` objects. Builders here produce exactly that shape;
//! missing samples are `None` entries, which the sink renders as gaps, never
//! as zeros.
//!
//! Live chart instances are tracked in a [`ChartSession`] owned by the
//! rendering layer and passed explicitly into rendering calls. The scoring
//! core holds no chart state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Errors from chart preparation.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("series '{label}' has {points} points but the chart has {labels} labels")]
    LengthMismatch {
        label: String,
        points: usize,
        labels: usize,
    },
    #[error("chart requires at least one series")]
    NoSeries,
}

/// One named series of nullable samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Option<f64>>,
}

impl Series {
    pub fn new(label: impl Into<String>, points: Vec<Option<f64>>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

/// Styling hints forwarded to the rendering sink unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    pub fill: bool,
    /// Axis id for dual-axis charts ("y" left, "y1" right).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_id: Option<String>,
    /// Stack group for stacked bars.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// One dataset in the sink's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
    #[serde(flatten)]
    pub style: ChartStyle,
}

/// The prepared chart object handed to the rendering sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

// Default palette cycled by the category charts.
const PALETTE: [&str; 6] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948",
];

fn check_len(labels: &[String], series: &Series) -> Result<(), ChartError> {
    if series.points.len() != labels.len() {
        return Err(ChartError::LengthMismatch {
            label: series.label.clone(),
            points: series.points.len(),
            labels: labels.len(),
        });
    }
    Ok(())
}

fn dataset(series: Series, style: ChartStyle) -> ChartDataset {
    ChartDataset {
        label: series.label,
        data: series.points,
        style,
    }
}

/// Dual-axis line chart: one series per axis (e.g. systolic pressure on the
/// left, pulse on the right).
pub fn dual_axis(
    labels: Vec<String>,
    left: Series,
    right: Series,
) -> Result<ChartData, ChartError> {
    check_len(&labels, &left)?;
    check_len(&labels, &right)?;
    let datasets = vec![
        dataset(
            left,
            ChartStyle {
                border_color: Some(PALETTE[0].into()),
                y_axis_id: Some("y".into()),
                ..Default::default()
            },
        ),
        dataset(
            right,
            ChartStyle {
                border_color: Some(PALETTE[1].into()),
                y_axis_id: Some("y1".into()),
                ..Default::default()
            },
        ),
    ];
    Ok(ChartData { labels, datasets })
}

/// Filled area chart over one series.
pub fn area(labels: Vec<String>, series: Series) -> Result<ChartData, ChartError> {
    check_len(&labels, &series)?;
    let datasets = vec![dataset(
        series,
        ChartStyle {
            border_color: Some(PALETTE[3].into()),
            background_color: Some(format!("{}33", PALETTE[3])),
            fill: true,
            ..Default::default()
        },
    )];
    Ok(ChartData { labels, datasets })
}

/// Plain bar chart over one series.
pub fn bar(labels: Vec<String>, series: Series) -> Result<ChartData, ChartError> {
    check_len(&labels, &series)?;
    let datasets = vec![dataset(
        series,
        ChartStyle {
            background_color: Some(PALETTE[0].into()),
            ..Default::default()
        },
    )];
    Ok(ChartData { labels, datasets })
}

/// Heatmap rendered through the scatter shape: one dataset per row of the
/// matrix, aligned to the column labels. Cell intensity stays in the data
/// values; absent cells stay `None`.
pub fn heatmap(
    column_labels: Vec<String>,
    rows: Vec<Series>,
) -> Result<ChartData, ChartError> {
    if rows.is_empty() {
        return Err(ChartError::NoSeries);
    }
    for row in &rows {
        check_len(&column_labels, row)?;
    }
    let datasets = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            dataset(
                row,
                ChartStyle {
                    background_color: Some(PALETTE[i % PALETTE.len()].into()),
                    ..Default::default()
                },
            )
        })
        .collect();
    Ok(ChartData {
        labels: column_labels,
        datasets,
    })
}

/// Stacked bar chart: every segment shares one stack group.
pub fn stacked_bar(labels: Vec<String>, segments: Vec<Series>) -> Result<ChartData, ChartError> {
    if segments.is_empty() {
        return Err(ChartError::NoSeries);
    }
    for segment in &segments {
        check_len(&labels, segment)?;
    }
    let datasets = segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| {
            dataset(
                segment,
                ChartStyle {
                    background_color: Some(PALETTE[i % PALETTE.len()].into()),
                    stack: Some("total".into()),
                    ..Default::default()
                },
            )
        })
        .collect();
    Ok(ChartData { labels, datasets })
}

/// Doughnut chart: one value per category label.
pub fn doughnut(labels: Vec<String>, series: Series) -> Result<ChartData, ChartError> {
    check_len(&labels, &series)?;
    let datasets = vec![dataset(
        series,
        ChartStyle {
            background_color: Some(PALETTE[0].into()),
            ..Default::default()
        },
    )];
    Ok(ChartData { labels, datasets })
}

/// Explicit registry of prepared charts for one dashboard view.
///
/// Owned by the rendering layer and passed by reference into rendering
/// calls; replaces the module-level mutable chart map the dashboard
/// previously kept.
#[derive(Debug, Default)]
pub struct ChartSession {
    charts: BTreeMap<String, ChartData>,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a prepared chart, returning the one it replaced, if any.
    pub fn register(&mut self, id: impl Into<String>, chart: ChartData) -> Option<ChartData> {
        self.charts.insert(id.into(), chart)
    }

    pub fn get(&self, id: &str) -> Option<&ChartData> {
        self.charts.get(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<ChartData> {
        self.charts.remove(id)
    }

    /// Registered chart ids, in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.charts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("day {i}")).collect()
    }

    #[test]
    fn test_dual_axis_assigns_axes() {
        let chart = dual_axis(
            labels(3),
            Series::new("systolic", vec![Some(120.0), None, Some(125.0)]),
            Series::new("pulse", vec![Some(70.0), Some(72.0), None]),
        )
        .unwrap();
        assert_eq!(chart.datasets[0].style.y_axis_id.as_deref(), Some("y"));
        assert_eq!(chart.datasets[1].style.y_axis_id.as_deref(), Some("y1"));
    }

    #[test]
    fn test_missing_samples_stay_null() {
        let chart = area(
            labels(3),
            Series::new("SpO2", vec![Some(98.0), None, Some(97.0)]),
        )
        .unwrap();
        assert_eq!(chart.datasets[0].data[1], None);

        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["datasets"][0]["data"][1], serde_json::Value::Null);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = bar(labels(3), Series::new("temp", vec![Some(36.5)]))
            .expect_err("should reject short series");
        assert!(matches!(err, ChartError::LengthMismatch { points: 1, labels: 3, .. }));
    }

    #[test]
    fn test_stacked_bar_shares_one_stack() {
        let chart = stacked_bar(
            labels(2),
            vec![
                Series::new("deep sleep", vec![Some(2.0), Some(1.5)]),
                Series::new("light sleep", vec![Some(5.0), Some(6.0)]),
            ],
        )
        .unwrap();
        assert!(chart
            .datasets
            .iter()
            .all(|d| d.style.stack.as_deref() == Some("total")));
    }

    #[test]
    fn test_heatmap_requires_rows() {
        let err = heatmap(labels(2), vec![]).expect_err("should reject empty heatmap");
        assert!(matches!(err, ChartError::NoSeries));
    }

    #[test]
    fn test_doughnut_aligns_labels_and_values() {
        let chart = doughnut(
            vec!["low".into(), "moderate".into(), "high".into()],
            Series::new("readings", vec![Some(12.0), Some(4.0), Some(1.0)]),
        )
        .unwrap();
        assert_eq!(chart.labels.len(), chart.datasets[0].data.len());
    }

    #[test]
    fn test_session_registry_round_trip() {
        let mut session = ChartSession::new();
        assert!(session.is_empty());

        let chart = bar(labels(1), Series::new("pulse", vec![Some(70.0)])).unwrap();
        assert!(session.register("pulse-trend", chart.clone()).is_none());
        assert_eq!(session.len(), 1);
        assert_eq!(session.get("pulse-trend"), Some(&chart));

        let replaced = session.register("pulse-trend", chart.clone());
        assert_eq!(replaced, Some(chart));

        assert!(session.remove("pulse-trend").is_some());
        assert!(session.is_empty());
    }
}
