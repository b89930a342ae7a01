use crate::error::{InsightsError, Result};
use crate::model::CommitActivity;
use chrono::{DateTime, Duration, Utc};

pub const FIVE_YEARS_DAYS: i64 = 5 * 365;
pub const ONE_YEAR_DAYS: i64 = 365;
pub const QUARTER_DAYS: i64 = 91;
pub const MONTH_DAYS: i64 = 31;

fn within(dates: &[DateTime<Utc>], now: DateTime<Utc>, days: i64) -> usize {
    let cutoff = now - Duration::days(days);
    dates.iter().filter(|d| **d >= cutoff).count()
}

/// Overlapping recency buckets relative to `now`.
///
/// Fails with [`InsightsError::EmptyHistory`] when there is no commit to
/// report as the most recent one.
pub fn bucket_commits(
    repository: &str,
    dates: &[DateTime<Utc>],
    now: DateTime<Utc>,
) -> Result<CommitActivity> {
    let last_commit = dates
        .iter()
        .max()
        .copied()
        .ok_or_else(|| InsightsError::EmptyHistory(repository.to_string()))?;

    Ok(CommitActivity {
        total_commits: dates.len(),
        last_commit,
        last_5_years: within(dates, now, FIVE_YEARS_DAYS),
        last_year: within(dates, now, ONE_YEAR_DAYS),
        last_91_days: within(dates, now, QUARTER_DAYS),
        last_31_days: within(dates, now, MONTH_DAYS),
    })
}
