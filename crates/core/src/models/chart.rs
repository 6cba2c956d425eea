use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which value of a series point is plotted on the y-axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueAxis {
    /// Raw signature counts
    #[default]
    Count,
    /// Percentage of the threshold
    Percentage,
}

/// Whether datasets show the cumulative series or its day-over-day changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesMode {
    #[default]
    Cumulative,
    DailyChange,
}

/// Identifies one dataset across recomputations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetKey {
    /// The synthesized EU aggregate
    EuTotal,
    /// A single country, by code
    Country(String),
}

/// Visible x-range of the chart. Zooming never drops points from datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

/// All user-controlled display state.
///
/// Action handlers mutate this and then recompute the chart view from the
/// already-fetched series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub value_axis: ValueAxis,
    pub series_mode: SeriesMode,
    pub showing_eu_only: bool,
    pub hidden: HashSet<DatasetKey>,
    pub zoom: Option<TimeWindow>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            value_axis: ValueAxis::default(),
            series_mode: SeriesMode::default(),
            showing_eu_only: false,
            // EU aggregate starts hidden
            hidden: HashSet::from([DatasetKey::EuTotal]),
            zoom: None,
        }
    }
}

impl ViewState {
    pub fn is_hidden(&self, key: &DatasetKey) -> bool {
        self.hidden.contains(key)
    }

    /// Title of the y-axis for the current axis/mode combination.
    pub fn y_axis_title(&self) -> &'static str {
        match (self.series_mode, self.value_axis) {
            (SeriesMode::Cumulative, ValueAxis::Count) => "Total Count",
            (SeriesMode::Cumulative, ValueAxis::Percentage) => "Percentage",
            (SeriesMode::DailyChange, ValueAxis::Count) => "Daily Signature Change",
            (SeriesMode::DailyChange, ValueAxis::Percentage) => "Daily Percentage Change",
        }
    }
}

/// A single `(x, y)` pair handed to the chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
}

/// One line of the chart.
///
/// Field names follow the line-chart widget's dataset schema so the view can
/// be serialized straight into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    #[serde(skip)]
    pub key: Option<DatasetKey>,
    pub label: String,
    pub data: Vec<ChartPoint>,
    pub fill: bool,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<u32>,
    pub hidden: bool,
    pub tension: f64,
}

/// Everything needed to (re)draw the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    /// EU total first, then countries in first-seen order
    pub datasets: Vec<ChartDataset>,
    pub y_axis_title: String,
    pub zoom: Option<TimeWindow>,
}

impl ChartView {
    /// Dataset for a given key.
    pub fn dataset(&self, key: &DatasetKey) -> Option<&ChartDataset> {
        self.datasets.iter().find(|d| d.key.as_ref() == Some(key))
    }

    /// Labels of all datasets currently shown.
    pub fn visible_labels(&self) -> Vec<&str> {
        self.datasets
            .iter()
            .filter(|d| !d.hidden)
            .map(|d| d.label.as_str())
            .collect()
    }
}
