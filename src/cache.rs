//! Local cache of the reading-data API response and how it gets refreshed.
//!
//! A cache younger than the TTL is used as-is. An older one only has the
//! current and previous calendar month re-fetched and merged in; a missing
//! one triggers a full download.

use crate::errors::ClientError;
use crate::models::{CachedReading, MonthlyStats, ReadingData, ReadingDataResponse};
use crate::stats::comparison::previous_month;
use crate::stats::normalize::{parse_month, parse_year};
use chrono::{DateTime, Datelike, Duration, Local, Utc};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPlan {
    Fresh,
    Full,
    Partial { current: YearMonth, previous: YearMonth },
}

/// Where fresh reading data comes from.
pub trait ReadingSource {
    fn fetch_full_range(&self) -> impl Future<Output = Result<ReadingDataResponse, ClientError>> + Send;

    fn fetch_month(
        &self,
        year: i32,
        month: u32,
    ) -> impl Future<Output = Result<ReadingDataResponse, ClientError>> + Send;
}

pub fn refresh_plan(cache: Option<&CachedReading>, now: DateTime<Local>, ttl: Duration) -> RefreshPlan {
    let Some(cache) = cache else {
        return RefreshPlan::Full;
    };

    if now.with_timezone(&Utc) - cache.last_fetch < ttl {
        return RefreshPlan::Fresh;
    }

    let today = now.date_naive();
    let previous = previous_month(today);
    RefreshPlan::Partial {
        current: YearMonth {
            year: today.year(),
            month: today.month(),
        },
        previous: YearMonth {
            year: previous.year(),
            month: previous.month(),
        },
    }
}

/// Returns a copy of `data` with `year`/`month` replaced by `stats`.
///
/// An existing entry is matched by numeric value, so `"03"` and `"3"` are the
/// same month.
pub fn merge_month(data: &ReadingData, year: i32, month: u32, stats: MonthlyStats) -> ReadingData {
    let mut merged = data.clone();

    let year_key = merged
        .keys()
        .find(|key| parse_year(key).is_ok_and(|y| y == year))
        .cloned()
        .unwrap_or_else(|| year.to_string());
    let months = merged.entry(year_key).or_default();

    let month_key = months
        .keys()
        .find(|key| parse_month(year, key).is_ok_and(|m| m == month))
        .cloned()
        .unwrap_or_else(|| month.to_string());
    months.insert(month_key, stats);

    merged
}

fn find_month(data: &ReadingData, target: YearMonth) -> Option<&MonthlyStats> {
    data.iter()
        .filter(|(key, _)| parse_year(key).is_ok_and(|y| y == target.year))
        .flat_map(|(_, months)| months.iter())
        .find(|(key, _)| parse_month(target.year, key).is_ok_and(|m| m == target.month))
        .map(|(_, stats)| stats)
}

/// Folds one month fetch into the cached response. A fetch that has no entry
/// for the requested month leaves the cache unchanged.
pub fn apply_month_update(
    cached: &ReadingDataResponse,
    update: &ReadingDataResponse,
    target: YearMonth,
) -> ReadingDataResponse {
    match find_month(&update.data, target) {
        Some(stats) => ReadingDataResponse {
            data: merge_month(&cached.data, target.year, target.month, stats.clone()),
            fetched_at: update.fetched_at.clone().or_else(|| cached.fetched_at.clone()),
            cache_info: cached.cache_info.clone(),
        },
        None => {
            debug!(year = target.year, month = target.month, "month fetch returned no data");
            cached.clone()
        }
    }
}

/// Brings the cache up to date. `Ok(None)` means the existing cache is still fresh.
pub async fn refresh<S: ReadingSource>(
    source: &S,
    cache: Option<&CachedReading>,
    now: DateTime<Local>,
    ttl: Duration,
) -> Result<Option<CachedReading>, ClientError> {
    let response = match (refresh_plan(cache, now, ttl), cache) {
        (RefreshPlan::Fresh, _) => {
            info!("using recent cache, no fetch needed");
            return Ok(None);
        }
        (RefreshPlan::Partial { current, previous }, Some(cache)) => {
            info!(
                "cache is stale, refreshing {}-{:02} and {}-{:02}",
                current.year, current.month, previous.year, previous.month
            );
            let (current_data, previous_data) = tokio::try_join!(
                source.fetch_month(current.year, current.month),
                source.fetch_month(previous.year, previous.month),
            )?;
            let merged = apply_month_update(&cache.response, &current_data, current);
            apply_month_update(&merged, &previous_data, previous)
        }
        _ => {
            info!("no cache found, fetching full range");
            source.fetch_full_range().await?
        }
    };

    Ok(Some(CachedReading {
        response,
        last_fetch: now.with_timezone(&Utc),
    }))
}
