use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Day-over-day and week-over-week statistics for one country.
///
/// Any increase whose endpoints are missing from the series is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalComparison {
    /// Two-letter country code
    pub country_code: String,

    /// Display name (falls back to the code for unknown countries)
    pub country_name: String,

    /// today.total_count − yesterday.total_count
    pub increase_from_yesterday: i64,

    /// today.total_count − last_week.total_count
    pub increase_from_last_week: i64,

    /// today.percentage − yesterday.percentage
    pub percentage_increase_from_yesterday: f64,

    /// today.percentage − last_week.percentage
    pub percentage_increase_from_last_week: f64,

    /// yesterday.total_count − day_before_yesterday.total_count
    pub previous_day_increase: i64,

    /// last_week.total_count − week_before_last.total_count
    pub previous_week_increase: i64,

    /// Percent change of `increase_from_yesterday` relative to `previous_day_increase`
    /// (0 when `previous_day_increase` is 0)
    pub rate_change_from_yesterday: f64,

    /// Percent change of `increase_from_last_week` relative to `previous_week_increase`
    /// (0 when `previous_week_increase` is 0)
    pub rate_change_from_last_week: f64,
}

/// Sums over every row of a `ComparisonReport`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTotals {
    pub increase_from_yesterday: i64,
    pub increase_from_last_week: i64,
    pub previous_day_increase: i64,
    pub previous_week_increase: i64,
    pub rate_change_from_yesterday: f64,
    pub rate_change_from_last_week: f64,
}

/// The five calendar days a comparison looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDates {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    pub day_before_yesterday: NaiveDate,
    pub last_week: NaiveDate,
    pub week_before_last: NaiveDate,
}

/// Result of comparing the latest snapshot against earlier calendar days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    /// Calendar days that were looked up
    pub dates: ComparisonDates,

    /// One row per country, sorted by `increase_from_yesterday` descending
    pub rows: Vec<IntervalComparison>,

    /// Sums of the per-country rows
    pub totals: ComparisonTotals,
}

impl ComparisonReport {
    /// The calendar day of the most recent record.
    pub fn reference_date(&self) -> NaiveDate {
        self.dates.today
    }

    /// Row for one country, if present.
    pub fn row(&self, code: &str) -> Option<&IntervalComparison> {
        self.rows.iter().find(|r| r.country_code == code)
    }
}
