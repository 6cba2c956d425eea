pub mod countries;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, Utc};
use models::{
    chart::{ChartView, ViewState},
    comparison::ComparisonReport,
    history::HistoryRecord,
    palette::ColorPalette,
    series::{DeltaPoint, HistorySeries},
    settings::Settings,
};
use providers::traits::HistoryProvider;
use services::{
    chart_service::ChartService, comparison_service::ComparisonService,
    delta_service::daily_changes, report_service::render_country_list,
    series_service::SeriesService,
};
use tracing::{error, info};

use errors::TrackerError;

/// Main entry point for the petition-tracker core library.
///
/// Holds the series built from one fetch, the chart's view state and the
/// color assignments. Every derived view (chart datasets, deltas,
/// comparisons) is recomputed from the series on request.
#[must_use]
pub struct PetitionTracker {
    series: HistorySeries,
    view: ViewState,
    palette: ColorPalette,
    settings: Settings,
    series_service: SeriesService,
    chart_service: ChartService,
    comparison_service: ComparisonService,
}

impl std::fmt::Debug for PetitionTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetitionTracker")
            .field("records", &self.series.record_count())
            .field("countries", &self.series.countries.len())
            .field("view", &self.view)
            .field("settings", &self.settings)
            .finish()
    }
}

impl PetitionTracker {
    /// Build a tracker from already-fetched records (any order).
    pub fn from_records(
        records: Vec<HistoryRecord>,
        settings: Settings,
    ) -> Result<Self, TrackerError> {
        settings.validate()?;
        let offset = settings.calendar_offset().ok_or_else(|| {
            TrackerError::ValidationError("Calendar offset out of range".into())
        })?;

        let mut tracker = Self {
            series: HistorySeries::default(),
            view: ViewState::default(),
            palette: ColorPalette::new(),
            settings,
            series_service: SeriesService::new(),
            chart_service: ChartService::new(),
            comparison_service: ComparisonService::with_offset(offset),
        };
        tracker.reload(records)?;
        Ok(tracker)
    }

    /// Fetch the full history from `provider` and build the tracker.
    pub async fn fetch(
        provider: &dyn HistoryProvider,
        settings: Settings,
    ) -> Result<Self, TrackerError> {
        let records = provider.fetch_history().await?;
        info!(
            source = provider.name(),
            records = records.len(),
            "fetched signature history"
        );
        Self::from_records(records, settings)
    }

    /// Fetch and process, logging any failure instead of returning it.
    ///
    /// Network, parse and shape errors all end up here alike; `None` means
    /// nothing should be rendered.
    pub async fn fetch_or_log(provider: &dyn HistoryProvider, settings: Settings) -> Option<Self> {
        let result = match Self::fetch(provider, settings).await {
            Ok(tracker) => tracker.comparison().map(|_| tracker),
            Err(e) => Err(e),
        };
        match result {
            Ok(tracker) => Some(tracker),
            Err(e) => {
                error!(error = %e, "Error fetching or processing data");
                None
            }
        }
    }

    /// Replace the series with ones built from `records`.
    ///
    /// View state and color assignments survive; nothing derived from the
    /// previous series does. On error the current series is left untouched.
    pub fn reload(&mut self, records: Vec<HistoryRecord>) -> Result<(), TrackerError> {
        self.series = self.series_service.build_from_unsorted(records)?;
        self.palette.assign_all(self.series.countries.codes());
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn series(&self) -> &HistorySeries {
        &self.series
    }

    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Chart datasets for the current view state.
    #[must_use]
    pub fn chart_view(&self) -> ChartView {
        self.chart_service
            .recompute_view(&self.series, &self.view, &self.palette)
    }

    /// Chart view for the current view state as pretty-printed JSON.
    pub fn chart_json(&self) -> Result<String, TrackerError> {
        serde_json::to_string_pretty(&self.chart_view())
            .map_err(|e| TrackerError::Serialization(e.to_string()))
    }

    /// Day/week comparisons against the most recent record.
    pub fn comparison(&self) -> Result<ComparisonReport, TrackerError> {
        self.comparison_service.compare(&self.series)
    }

    /// The ranked country list as an HTML fragment.
    pub fn render_country_list(&self) -> Result<String, TrackerError> {
        Ok(render_country_list(&self.comparison()?))
    }

    /// Day-over-day changes of one country, if it appears in the feed.
    #[must_use]
    pub fn daily_changes(&self, country_code: &str) -> Option<Vec<DeltaPoint>> {
        self.series.countries.get(country_code).map(daily_changes)
    }

    /// Day-over-day changes of the EU aggregate.
    #[must_use]
    pub fn eu_daily_changes(&self) -> Vec<DeltaPoint> {
        daily_changes(&self.series.eu_totals)
    }

    // ── UI actions ──────────────────────────────────────────────────

    pub fn reset_zoom(&mut self) -> ChartView {
        self.chart_service.reset_zoom(&mut self.view);
        self.chart_view()
    }

    /// Zoom to the configured recent window ending at `now`.
    pub fn zoom_to_recent(&mut self, now: DateTime<Utc>) -> ChartView {
        let days = self.settings.recent_window_days;
        self.chart_service.zoom_to_recent(&mut self.view, now, days);
        self.chart_view()
    }

    /// Zoom to the configured recent window ending now.
    pub fn zoom_to_recent_now(&mut self) -> ChartView {
        self.zoom_to_recent(Utc::now())
    }

    pub fn select_all(&mut self) -> ChartView {
        self.chart_service.select_all(&mut self.view);
        self.chart_view()
    }

    pub fn deselect_all(&mut self) -> ChartView {
        self.chart_service.deselect_all(&mut self.view, &self.series);
        self.chart_view()
    }

    pub fn toggle_eu_only(&mut self) -> ChartView {
        self.chart_service.toggle_eu_only(&mut self.view, &self.series);
        self.chart_view()
    }

    pub fn toggle_value_axis(&mut self) -> ChartView {
        self.chart_service.toggle_value_axis(&mut self.view);
        self.chart_view()
    }

    pub fn toggle_daily_change(&mut self) -> ChartView {
        self.chart_service.toggle_daily_change(&mut self.view);
        self.chart_view()
    }
}
