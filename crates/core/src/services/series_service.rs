use std::collections::HashSet;

use tracing::{debug, warn};

use crate::errors::TrackerError;
use crate::models::history::HistoryRecord;
use crate::models::series::{CountrySeries, HistorySeries, SeriesPoint};

/// Denominator of the EU aggregate percentage: one million signatures.
pub const EU_SIGNATURE_GOAL: f64 = 1_000_000.0;

/// Reshapes raw history records into per-country and EU-aggregate series.
///
/// The EU percentage is computed from the summed counts, never from the
/// feed's per-country percentages.
pub struct SeriesService;

impl SeriesService {
    pub fn new() -> Self {
        Self
    }

    /// Sort records ascending by timestamp (stable) and build the series.
    ///
    /// The feed does not guarantee order, so this is the entry point used on
    /// freshly fetched data.
    pub fn build_from_unsorted(
        &self,
        mut records: Vec<HistoryRecord>,
    ) -> Result<HistorySeries, TrackerError> {
        records.sort_by_key(|r| r.timestamp);
        self.build(&records)
    }

    /// Build series from records that are already time-ascending.
    ///
    /// Each country series keeps the input order; nothing is re-sorted,
    /// interpolated or zero-filled. Fails if a record's summed count
    /// overflows `u64`.
    pub fn build(&self, records: &[HistoryRecord]) -> Result<HistorySeries, TrackerError> {
        let mut countries = CountrySeries::new();
        let mut eu_totals = Vec::with_capacity(records.len());

        for record in records {
            let eu_total_count = record.total_count()?;
            let mut seen = HashSet::with_capacity(record.entries.len());

            for entry in &record.entries {
                if !seen.insert(entry.country_code.as_str()) {
                    warn!(
                        country = %entry.country_code,
                        timestamp = %record.timestamp,
                        "country reported twice in one record"
                    );
                }

                countries.push(
                    &entry.country_code,
                    SeriesPoint {
                        timestamp: record.timestamp,
                        total_count: entry.total_count,
                        percentage: entry.percentage,
                    },
                );
            }

            eu_totals.push(SeriesPoint {
                timestamp: record.timestamp,
                total_count: eu_total_count,
                percentage: eu_percentage(eu_total_count),
            });
        }

        debug!(
            records = records.len(),
            countries = countries.len(),
            points = countries.total_points(),
            "built history series"
        );

        Ok(HistorySeries {
            countries,
            eu_totals,
        })
    }
}

impl Default for SeriesService {
    fn default() -> Self {
        Self::new()
    }
}

/// Share of the one-million goal reached by `total_count`, in percent.
pub fn eu_percentage(total_count: u64) -> f64 {
    (total_count as f64 / EU_SIGNATURE_GOAL) * 100.0
}
