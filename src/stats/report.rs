use crate::stats::aggregate::YearlyRecord;
use crate::stats::insights::rounded_ratio;
use crate::stats::normalize::{CalendarMap, MonthlyRecord};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

const HEATMAP_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthPoint {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub word_count: u64,
    pub book_count: u64,
    pub chapter_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekdayTotal {
    pub weekday: Weekday,
    pub words: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub words: u64,
    pub intensity: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyReport {
    pub year: i32,
    pub book_count: u64,
    pub chapter_count: u64,
    pub word_count: u64,
    /// January first; months without reading are zero.
    pub monthly_words: [u64; 12],
    pub peak_month: Option<u32>,
    pub avg_words_per_day: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBreakdown {
    pub month: u32,
    pub word_count: u64,
    pub book_count: u64,
    pub chapter_count: u64,
    pub avg_words_per_day: u64,
    pub is_best: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearBreakdown {
    pub year: i32,
    pub word_count: u64,
    pub book_count: u64,
    pub chapter_count: u64,
    pub avg_words_per_day: u64,
    pub bar_pct: f64,
    pub max_monthly_words: u64,
    pub months: Vec<MonthBreakdown>,
}

/// The `count` most recent months, oldest first, for charting.
pub fn recent_months(records: &[MonthlyRecord], count: usize) -> Vec<MonthPoint> {
    records
        .iter()
        .take(count)
        .rev()
        .map(|r| MonthPoint {
            label: format!("{}/{}", r.year, r.month),
            year: r.year,
            month: r.month,
            word_count: r.word_count,
            book_count: r.book_count,
            chapter_count: r.chapter_count,
        })
        .collect()
}

/// Words per weekday, Sunday first.
pub fn weekday_totals(calendar: &CalendarMap) -> Vec<WeekdayTotal> {
    let mut sums = [0u64; 7];
    for (date, words) in calendar {
        let slot = date.weekday().num_days_from_sunday() as usize;
        sums[slot] = sums[slot].saturating_add(*words);
    }

    let mut weekday = Weekday::Sun;
    sums.iter()
        .map(|words| {
            let total = WeekdayTotal {
                weekday,
                words: *words,
            };
            weekday = weekday.succ();
            total
        })
        .collect()
}

/// One year of days ending today, starting on a Sunday, with a 0–4 intensity.
pub fn activity_heatmap(calendar: &CalendarMap, today: NaiveDate) -> Vec<HeatmapDay> {
    let year_ago = today - Duration::days(HEATMAP_DAYS);
    let start = year_ago - Duration::days(i64::from(year_ago.weekday().num_days_from_sunday()));
    let max_words = calendar.values().copied().max().unwrap_or(0);

    start
        .iter_days()
        .take_while(|date| *date <= today)
        .map(|date| {
            let words = calendar.get(&date).copied().unwrap_or(0);
            HeatmapDay {
                date,
                words,
                intensity: intensity(words, max_words),
            }
        })
        .collect()
}

fn intensity(words: u64, max_words: u64) -> u8 {
    if words == 0 || max_words == 0 {
        return 0;
    }
    let ratio = (words as f64 / (max_words as f64 * 0.75)).min(1.0);
    match ratio {
        r if r < 0.25 => 1,
        r if r < 0.5 => 2,
        r if r < 0.75 => 3,
        _ => 4,
    }
}

pub fn yearly_report(year: &YearlyRecord) -> YearlyReport {
    let mut monthly_words = [0u64; 12];
    let mut peak: Option<(u32, u64)> = None;
    for record in &year.months {
        if let Some(slot) = monthly_words.get_mut(record.month as usize - 1) {
            *slot = record.word_count;
        }
        if record.word_count > peak.map_or(0, |(_, words)| words) {
            peak = Some((record.month, record.word_count));
        }
    }

    YearlyReport {
        year: year.year,
        book_count: year.book_count,
        chapter_count: year.chapter_count,
        word_count: year.word_count,
        monthly_words,
        peak_month: peak.map(|(month, _)| month),
        avg_words_per_day: rounded_ratio(year.word_count, days_in_year(year.year)),
    }
}

/// Per-year and per-month daily averages, each year scaled against the best one.
pub fn year_breakdown(yearly: &[YearlyRecord]) -> Vec<YearBreakdown> {
    let max_yearly_words = yearly.iter().map(|y| y.word_count).max().unwrap_or(0);

    yearly
        .iter()
        .map(|year| {
            let max_monthly_words = year.months.iter().map(|m| m.word_count).max().unwrap_or(0);
            let months = year
                .months
                .iter()
                .map(|m| MonthBreakdown {
                    month: m.month,
                    word_count: m.word_count,
                    book_count: m.book_count,
                    chapter_count: m.chapter_count,
                    avg_words_per_day: rounded_ratio(m.word_count, days_in_month(m.year, m.month)),
                    is_best: m.word_count > 0 && m.word_count == max_monthly_words,
                })
                .collect();

            YearBreakdown {
                year: year.year,
                word_count: year.word_count,
                book_count: year.book_count,
                chapter_count: year.chapter_count,
                avg_words_per_day: rounded_ratio(year.word_count, days_in_year(year.year)),
                bar_pct: if max_yearly_words == 0 {
                    0.0
                } else {
                    year.word_count as f64 / max_yearly_words as f64 * 100.0
                },
                max_monthly_words,
                months,
            }
        })
        .collect()
}

fn days_in_year(year: i32) -> u64 {
    if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
        366
    } else {
        365
    }
}

fn days_in_month(year: i32, month: u32) -> u64 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|next| next.pred_opt())
        .map_or(30, |last| u64::from(last.day()))
}
