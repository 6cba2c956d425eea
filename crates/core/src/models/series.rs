use chrono::{DateTime, Utc};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One observation of a single entity (a country or the EU aggregate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub total_count: u64,
    pub percentage: f64,
}

/// Difference between two consecutive `SeriesPoint`s, stamped with the later one.
///
/// Counts are signed: a feed correction can make a cumulative total shrink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaPoint {
    pub timestamp: DateTime<Utc>,
    pub total_count: i64,
    pub percentage: f64,
}

/// Per-country time series keyed by country code.
///
/// Keys are kept in first-seen order, which drives dataset order in charts and
/// tie-breaking in comparisons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountrySeries {
    series: IndexMap<String, Vec<SeriesPoint>>,
}

impl CountrySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point to `code`'s series, creating it on first sight.
    /// Returns `true` if the code was new.
    pub fn push(&mut self, code: &str, point: SeriesPoint) -> bool {
        match self.series.entry(code.to_string()) {
            Entry::Occupied(mut e) => {
                e.get_mut().push(point);
                false
            }
            Entry::Vacant(e) => {
                e.insert(vec![point]);
                true
            }
        }
    }

    /// Series for one country, if it ever appeared in the feed.
    pub fn get(&self, code: &str) -> Option<&[SeriesPoint]> {
        self.series.get(code).map(Vec::as_slice)
    }

    /// Country codes in first-seen order.
    pub fn codes(&self) -> impl ExactSizeIterator<Item = &String> + '_ {
        self.series.keys()
    }

    /// `(code, series)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SeriesPoint])> {
        self.series
            .iter()
            .map(|(code, points)| (code.as_str(), points.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Total number of points across all countries.
    pub fn total_points(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }
}

/// Everything the series builder derives from one fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySeries {
    /// Per-country series
    pub countries: CountrySeries,

    /// One point per record: summed counts over a fixed one-million denominator
    pub eu_totals: Vec<SeriesPoint>,
}

impl HistorySeries {
    /// Timestamp of the most recent record, the reference "today" for comparisons.
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.eu_totals.last().map(|p| p.timestamp)
    }

    /// Timestamp of the oldest record.
    pub fn earliest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.eu_totals.first().map(|p| p.timestamp)
    }

    /// Number of records the series were built from.
    pub fn record_count(&self) -> usize {
        self.eu_totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eu_totals.is_empty()
    }
}
