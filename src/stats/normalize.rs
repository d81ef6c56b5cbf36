use crate::errors::StatsError;
use crate::models::{MonthlyStats, ReadingData};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Words read per active day. Only days with a non-zero word count are present.
pub type CalendarMap = BTreeMap<NaiveDate, u64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DailyCount {
    pub book_count: u64,
    pub chapter_count: u64,
    pub word_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRecord {
    pub year: i32,
    pub month: u32,
    pub book_count: u64,
    pub chapter_count: u64,
    pub word_count: u64,
    pub daily_data: BTreeMap<u32, DailyCount>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Normalized {
    /// Most recent month first.
    pub records: Vec<MonthlyRecord>,
    pub calendar: CalendarMap,
}

/// Flattens `year -> month -> day` into month records and a calendar map.
///
/// With a `cutoff`, days after it are dropped and the month totals are
/// re-summed from the days that remain. Without one the declared month
/// totals are kept as-is.
pub fn normalize(data: &ReadingData, cutoff: Option<NaiveDate>) -> Result<Normalized, StatsError> {
    let mut records = Vec::new();
    let mut calendar = CalendarMap::new();

    for (year_key, months) in data {
        let year = parse_year(year_key)?;
        for (month_key, stats) in months {
            let month = parse_month(year, month_key)?;
            let record = month_record(year, month, stats, cutoff)?;

            for (day, counts) in &record.daily_data {
                if counts.word_count == 0 {
                    continue;
                }
                // month_record only keeps days that form a valid date
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, *day) {
                    calendar.insert(date, counts.word_count);
                }
            }

            if record.word_count > 0 {
                records.push(record);
            }
        }
    }

    records.sort_by(|a, b| b.year.cmp(&a.year).then(b.month.cmp(&a.month)));

    Ok(Normalized { records, calendar })
}

fn month_record(
    year: i32,
    month: u32,
    stats: &MonthlyStats,
    cutoff: Option<NaiveDate>,
) -> Result<MonthlyRecord, StatsError> {
    let mut daily_data = BTreeMap::new();
    for (day_key, daily) in &stats.daily_data {
        let invalid = || StatsError::InvalidDay {
            year,
            month,
            day: day_key.clone(),
        };
        let day: u32 = day_key.trim().parse().map_err(|_| invalid())?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;

        if cutoff.is_some_and(|limit| date > limit) {
            continue;
        }

        daily_data.insert(
            day,
            DailyCount {
                book_count: daily.daily_book_count,
                chapter_count: daily.daily_chapter_count,
                word_count: daily.daily_word_count,
            },
        );
    }

    let (book_count, chapter_count, word_count) = if cutoff.is_some() {
        daily_data.values().fold((0u64, 0u64, 0u64), |(books, chapters, words), day| {
            (
                books.saturating_add(day.book_count),
                chapters.saturating_add(day.chapter_count),
                words.saturating_add(day.word_count),
            )
        })
    } else {
        (stats.book_count, stats.chapter_count, stats.word_count)
    };

    Ok(MonthlyRecord {
        year,
        month,
        book_count,
        chapter_count,
        word_count,
        daily_data,
    })
}

pub(crate) fn parse_year(key: &str) -> Result<i32, StatsError> {
    key.trim()
        .parse()
        .map_err(|_| StatsError::InvalidYear(key.to_string()))
}

pub(crate) fn parse_month(year: i32, key: &str) -> Result<u32, StatsError> {
    key.trim()
        .parse()
        .ok()
        .filter(|month| (1..=12).contains(month))
        .ok_or_else(|| StatsError::InvalidMonth {
            year,
            month: key.to_string(),
        })
}
