use crate::models::series::{DeltaPoint, SeriesPoint};

/// Consecutive differences of a series.
///
/// Element `i` is `points[i + 1] − points[i]` on both count and percentage,
/// carrying `points[i + 1]`'s timestamp. Series shorter than two points yield
/// an empty result.
pub fn daily_changes(points: &[SeriesPoint]) -> Vec<DeltaPoint> {
    points
        .windows(2)
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            DeltaPoint {
                timestamp: current.timestamp,
                total_count: count_difference(current.total_count, previous.total_count),
                percentage: current.percentage - previous.percentage,
            }
        })
        .collect()
}

/// `later − earlier` as a signed count.
pub fn count_difference(later: u64, earlier: u64) -> i64 {
    // saturates at the i64 bounds
    let later = i64::try_from(later).unwrap_or(i64::MAX);
    let earlier = i64::try_from(earlier).unwrap_or(i64::MAX);
    later.saturating_sub(earlier)
}
