use chrono::{Days, FixedOffset, NaiveDate, Offset, Utc};

use crate::countries;
use crate::errors::TrackerError;
use crate::models::comparison::{
    ComparisonDates, ComparisonReport, ComparisonTotals, IntervalComparison,
};
use crate::models::series::{HistorySeries, SeriesPoint};
use crate::services::delta_service::count_difference;

/// Compares the latest snapshot of every country against earlier calendar days.
///
/// Points are matched by calendar date in `offset`, not by counting records:
/// a country with no point on a given day simply has nothing to compare.
pub struct ComparisonService {
    offset: FixedOffset,
}

impl ComparisonService {
    /// Calendar days are taken in UTC.
    pub fn new() -> Self {
        Self::with_offset(Utc.fix())
    }

    /// Calendar days are taken in the given fixed offset.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar day a timestamp falls on.
    pub fn calendar_date(&self, point: &SeriesPoint) -> NaiveDate {
        point.timestamp.with_timezone(&self.offset).date_naive()
    }

    /// Resolve today/yesterday/day-before/last-week/week-before-last.
    pub fn comparison_dates(&self, today: NaiveDate) -> Result<ComparisonDates, TrackerError> {
        let back = |days: u64| {
            today.checked_sub_days(Days::new(days)).ok_or_else(|| {
                TrackerError::ValidationError(format!("Cannot go back {days} days from {today}"))
            })
        };

        Ok(ComparisonDates {
            today,
            yesterday: back(1)?,
            day_before_yesterday: back(2)?,
            last_week: back(7)?,
            week_before_last: back(14)?,
        })
    }

    /// Build the full report with "today" = day of the most recent record.
    ///
    /// Rows are sorted by `increase_from_yesterday` descending; ties keep
    /// first-seen country order.
    pub fn compare(&self, series: &HistorySeries) -> Result<ComparisonReport, TrackerError> {
        let latest = series.eu_totals.last().ok_or(TrackerError::EmptyHistory)?;
        let dates = self.comparison_dates(self.calendar_date(latest))?;

        let mut rows: Vec<IntervalComparison> = series
            .countries
            .iter()
            .map(|(code, points)| self.compare_country(code, points, &dates))
            .collect();

        // sort_by is stable
        rows.sort_by(|a, b| b.increase_from_yesterday.cmp(&a.increase_from_yesterday));

        let totals = Self::totals(&rows);

        Ok(ComparisonReport {
            dates,
            rows,
            totals,
        })
    }

    /// Statistics for a single country's series.
    pub fn compare_country(
        &self,
        code: &str,
        points: &[SeriesPoint],
        dates: &ComparisonDates,
    ) -> IntervalComparison {
        let today = self.point_on(points, dates.today);
        let yesterday = self.point_on(points, dates.yesterday);
        let day_before_yesterday = self.point_on(points, dates.day_before_yesterday);
        let last_week = self.point_on(points, dates.last_week);
        let week_before_last = self.point_on(points, dates.week_before_last);

        let increase_from_yesterday = count_increase(today, yesterday);
        let increase_from_last_week = count_increase(today, last_week);
        let previous_day_increase = count_increase(yesterday, day_before_yesterday);
        let previous_week_increase = count_increase(last_week, week_before_last);

        IntervalComparison {
            country_code: code.to_string(),
            country_name: countries::display_name(code),
            increase_from_yesterday,
            increase_from_last_week,
            percentage_increase_from_yesterday: percentage_increase(today, yesterday),
            percentage_increase_from_last_week: percentage_increase(today, last_week),
            previous_day_increase,
            previous_week_increase,
            rate_change_from_yesterday: rate_change(increase_from_yesterday, previous_day_increase),
            rate_change_from_last_week: rate_change(increase_from_last_week, previous_week_increase),
        }
    }

    /// First point of the series whose calendar date is `date`.
    pub fn point_on<'a>(&self, points: &'a [SeriesPoint], date: NaiveDate) -> Option<&'a SeriesPoint> {
        points.iter().find(|p| self.calendar_date(p) == date)
    }

    fn totals(rows: &[IntervalComparison]) -> ComparisonTotals {
        let increase_from_yesterday: i64 = rows.iter().map(|r| r.increase_from_yesterday).sum();
        let increase_from_last_week: i64 = rows.iter().map(|r| r.increase_from_last_week).sum();
        let previous_day_increase: i64 = rows.iter().map(|r| r.previous_day_increase).sum();
        let previous_week_increase: i64 = rows.iter().map(|r| r.previous_week_increase).sum();

        ComparisonTotals {
            increase_from_yesterday,
            increase_from_last_week,
            previous_day_increase,
            previous_week_increase,
            rate_change_from_yesterday: rate_change(increase_from_yesterday, previous_day_increase),
            rate_change_from_last_week: rate_change(increase_from_last_week, previous_week_increase),
        }
    }
}

impl Default for ComparisonService {
    fn default() -> Self {
        Self::new()
    }
}

/// `later.total_count − earlier.total_count`, or 0 if either point is missing.
fn count_increase(later: Option<&SeriesPoint>, earlier: Option<&SeriesPoint>) -> i64 {
    match (later, earlier) {
        (Some(l), Some(e)) => count_difference(l.total_count, e.total_count),
        _ => 0,
    }
}

/// `later.percentage − earlier.percentage`, or 0 if either point is missing.
fn percentage_increase(later: Option<&SeriesPoint>, earlier: Option<&SeriesPoint>) -> f64 {
    match (later, earlier) {
        (Some(l), Some(e)) => l.percentage - e.percentage,
        _ => 0.0,
    }
}

/// Percent change of `increase` relative to `previous_increase`.
///
/// A zero previous increase yields 0, which also covers "no prior data":
/// the two cases are indistinguishable in the output.
pub fn rate_change(increase: i64, previous_increase: i64) -> f64 {
    if previous_increase == 0 {
        return 0.0;
    }
    (increase.saturating_sub(previous_increase) as f64 / previous_increase as f64) * 100.0
}
