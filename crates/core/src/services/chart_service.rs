use chrono::{DateTime, Duration, Utc};

use crate::countries;
use crate::models::chart::{
    ChartDataset, ChartPoint, ChartView, DatasetKey, SeriesMode, TimeWindow, ValueAxis, ViewState,
};
use crate::models::palette::{ColorPalette, EU_COLOR, PALETTE};
use crate::models::series::{HistorySeries, SeriesPoint};
use crate::services::delta_service::daily_changes;

pub const EU_LABEL: &str = "EU Total";

const LINE_TENSION: f64 = 0.4;

/// Turns the built series into chart datasets and applies the chart's UI actions.
///
/// The core computes every number; the frontend only draws what
/// `recompute_view` returns. Actions only mutate a `ViewState`; none of them
/// touch the series or trigger a fetch.
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Build the full chart view for the given state.
    ///
    /// Datasets: EU total first, then one per country in first-seen order.
    /// Each dataset has exactly one point per source point (or per delta in
    /// daily-change mode); days a country is missing are left out, never
    /// filled.
    pub fn recompute_view(
        &self,
        series: &HistorySeries,
        state: &ViewState,
        palette: &ColorPalette,
    ) -> ChartView {
        let mut datasets = Vec::with_capacity(series.countries.len() + 1);

        let eu_key = DatasetKey::EuTotal;
        datasets.push(ChartDataset {
            label: EU_LABEL.to_string(),
            data: Self::points(&series.eu_totals, state),
            fill: false,
            border_color: EU_COLOR.to_string(),
            background_color: EU_COLOR.to_string(),
            border_width: 3,
            point_radius: Some(3),
            point_hover_radius: Some(5),
            hidden: state.is_hidden(&eu_key),
            tension: LINE_TENSION,
            key: Some(eu_key),
        });

        for (code, points) in series.countries.iter() {
            let key = DatasetKey::Country(code.to_string());
            let color = palette.color_of(code).unwrap_or(PALETTE[0]).to_string();
            datasets.push(ChartDataset {
                label: countries::display_name(code),
                data: Self::points(points, state),
                fill: false,
                background_color: color.clone(),
                border_color: color,
                border_width: 1,
                point_radius: None,
                point_hover_radius: None,
                hidden: state.is_hidden(&key),
                tension: LINE_TENSION,
                key: Some(key),
            });
        }

        ChartView {
            datasets,
            y_axis_title: state.y_axis_title().to_string(),
            zoom: state.zoom,
        }
    }

    fn points(points: &[SeriesPoint], state: &ViewState) -> Vec<ChartPoint> {
        match state.series_mode {
            SeriesMode::Cumulative => points
                .iter()
                .map(|p| ChartPoint {
                    x: p.timestamp,
                    y: match state.value_axis {
                        ValueAxis::Count => p.total_count as f64,
                        ValueAxis::Percentage => p.percentage,
                    },
                })
                .collect(),
            SeriesMode::DailyChange => daily_changes(points)
                .into_iter()
                .map(|d| ChartPoint {
                    x: d.timestamp,
                    y: match state.value_axis {
                        ValueAxis::Count => d.total_count as f64,
                        ValueAxis::Percentage => d.percentage,
                    },
                })
                .collect(),
        }
    }

    // ── UI actions ──────────────────────────────────────────────────

    /// Show the whole time range.
    pub fn reset_zoom(&self, state: &mut ViewState) {
        state.zoom = None;
    }

    /// Zoom the x-axis to the `days` days ending at `now`.
    pub fn zoom_to_recent(&self, state: &mut ViewState, now: DateTime<Utc>, days: u32) {
        state.zoom = Some(TimeWindow {
            min: now - Duration::days(i64::from(days)),
            max: now,
        });
    }

    /// Make every dataset visible.
    pub fn select_all(&self, state: &mut ViewState) {
        state.hidden.clear();
    }

    /// Hide every dataset.
    pub fn deselect_all(&self, state: &mut ViewState, series: &HistorySeries) {
        state.hidden = Self::all_keys(series).collect();
    }

    /// Switch between "EU total only" and "all countries without EU total".
    pub fn toggle_eu_only(&self, state: &mut ViewState, series: &HistorySeries) {
        if state.showing_eu_only {
            state.hidden.clear();
            state.hidden.insert(DatasetKey::EuTotal);
            state.showing_eu_only = false;
        } else {
            state.hidden = Self::all_keys(series)
                .filter(|k| *k != DatasetKey::EuTotal)
                .collect();
            state.showing_eu_only = true;
        }
    }

    /// Switch the y-axis between counts and percentages.
    pub fn toggle_value_axis(&self, state: &mut ViewState) {
        state.value_axis = match state.value_axis {
            ValueAxis::Count => ValueAxis::Percentage,
            ValueAxis::Percentage => ValueAxis::Count,
        };
    }

    /// Switch between cumulative totals and day-over-day changes.
    pub fn toggle_daily_change(&self, state: &mut ViewState) {
        state.series_mode = match state.series_mode {
            SeriesMode::Cumulative => SeriesMode::DailyChange,
            SeriesMode::DailyChange => SeriesMode::Cumulative,
        };
    }

    fn all_keys(series: &HistorySeries) -> impl Iterator<Item = DatasetKey> + '_ {
        std::iter::once(DatasetKey::EuTotal).chain(
            series
                .countries
                .codes()
                .map(|code| DatasetKey::Country(code.clone())),
        )
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
