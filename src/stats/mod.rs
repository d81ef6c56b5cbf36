//! Derived reading statistics.
//!
//! Everything here is a pure function of the raw reading data and the date
//! the caller treats as today. [`build_stats_at`] runs the whole pipeline;
//! [`build_stats`] is the same thing anchored to the local clock.

pub mod achievements;
pub mod aggregate;
pub mod comparison;
pub mod goal;
pub mod insights;
pub mod level;
pub mod normalize;
pub mod report;
pub mod streak;

use crate::errors::StatsError;
use crate::models::ReadingData;
use achievements::{
    ACHIEVEMENT_CATEGORIES, AchievementDefinition, AchievementProgress, Metrics,
    evaluate_achievements, most_notable,
};
use aggregate::{CumulativeTotals, YearlyRecord, aggregate};
use chrono::{Local, NaiveDate};
use comparison::{Comparison, build_comparison};
use insights::{PersonalInsights, build_insights};
use level::{LevelState, level_for_exp};
use normalize::{CalendarMap, MonthlyRecord, normalize};
use report::{MonthPoint, WeekdayTotal, recent_months, weekday_totals};
use serde::Serialize;
use streak::{Streaks, lag_cutoff, streaks_at};

/// Days the reading-data API trails real time by.
pub const DEFAULT_LAG_DAYS: u32 = 3;

const RECENT_MONTHS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsConfig {
    pub lag_days: u32,
    /// Drop days inside the lag window before aggregating.
    pub apply_lag_cutoff: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            lag_days: DEFAULT_LAG_DAYS,
            apply_lag_cutoff: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    pub today: NaiveDate,
    pub monthly: Vec<MonthlyRecord>,
    pub yearly: Vec<YearlyRecord>,
    pub cumulative: CumulativeTotals,
    pub calendar: CalendarMap,
    pub streaks: Streaks,
    pub level: LevelState,
    pub metrics: Metrics,
    pub achievements: Vec<AchievementProgress>,
    pub most_notable: Option<AchievementDefinition>,
    pub comparison: Comparison,
    pub insights: PersonalInsights,
    pub recent_months: Vec<MonthPoint>,
    pub weekday_totals: Vec<WeekdayTotal>,
}

pub fn build_stats(data: &ReadingData, config: &StatsConfig) -> Result<DerivedViews, StatsError> {
    build_stats_at(Local::now().date_naive(), data, config)
}

pub fn build_stats_at(
    today: NaiveDate,
    data: &ReadingData,
    config: &StatsConfig,
) -> Result<DerivedViews, StatsError> {
    let cutoff = config
        .apply_lag_cutoff
        .then(|| lag_cutoff(today, config.lag_days));
    let normalized = normalize(data, cutoff)?;
    let (cumulative, yearly) = aggregate(&normalized.records);
    let streaks = streaks_at(&normalized.calendar, today, config.lag_days);

    let metrics = Metrics {
        total_words: cumulative.word_count,
        longest_streak: u64::from(streaks.longest),
        max_monthly_words: normalized
            .records
            .iter()
            .map(|r| r.word_count)
            .max()
            .unwrap_or(0),
        total_books: cumulative.book_count,
    };
    let achievements = evaluate_achievements(ACHIEVEMENT_CATEGORIES, &metrics);
    let most_notable = most_notable(&achievements);

    let comparison = build_comparison(&normalized.records, &yearly, &normalized.calendar, today);
    let insights = build_insights(&normalized.records, &yearly, &normalized.calendar, &cumulative);

    Ok(DerivedViews {
        today,
        recent_months: recent_months(&normalized.records, RECENT_MONTHS),
        weekday_totals: weekday_totals(&normalized.calendar),
        level: level_for_exp(cumulative.word_count),
        monthly: normalized.records,
        yearly,
        cumulative,
        calendar: normalized.calendar,
        streaks,
        metrics,
        achievements,
        most_notable,
        comparison,
        insights,
    })
}
