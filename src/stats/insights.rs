use crate::stats::aggregate::{CumulativeTotals, YearlyRecord};
use crate::stats::normalize::{CalendarMap, MonthlyRecord};
use crate::stats::report::weekday_totals;
use chrono::Weekday;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthHighlight {
    pub year: i32,
    pub month: u32,
    pub words: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearHighlight {
    pub year: i32,
    pub words: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalInsights {
    pub best_weekday: Option<Weekday>,
    pub best_month: Option<MonthHighlight>,
    pub best_year: Option<YearHighlight>,
    pub daily_average: u64,
    pub avg_books_per_month: f64,
    pub avg_words_per_book: u64,
}

pub fn build_insights(
    records: &[MonthlyRecord],
    yearly: &[YearlyRecord],
    calendar: &CalendarMap,
    totals: &CumulativeTotals,
) -> PersonalInsights {
    // strict comparison keeps the earliest weekday (Sunday first) on a tie
    let best_weekday = weekday_totals(calendar)
        .into_iter()
        .fold(None, |best: Option<(Weekday, u64)>, day| match best {
            Some((_, words)) if words >= day.words => best,
            _ => Some((day.weekday, day.words)),
        })
        .filter(|(_, words)| *words > 0)
        .map(|(weekday, _)| weekday);

    let best_month = records
        .iter()
        .max_by_key(|r| r.word_count)
        .map(|r| MonthHighlight {
            year: r.year,
            month: r.month,
            words: r.word_count,
        });

    let best_year = yearly
        .iter()
        .max_by_key(|y| y.word_count)
        .map(|y| YearHighlight {
            year: y.year,
            words: y.word_count,
        });

    let active_days = calendar.len() as u64;
    let active_months = records.len() as u64;

    PersonalInsights {
        best_weekday,
        best_month,
        best_year,
        daily_average: rounded_ratio(totals.word_count, active_days),
        avg_books_per_month: if active_months == 0 {
            0.0
        } else {
            (totals.book_count as f64 / active_months as f64 * 10.0).round() / 10.0
        },
        avg_words_per_book: rounded_ratio(totals.word_count, totals.book_count),
    }
}

pub(crate) fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (numerator as f64 / denominator as f64).round() as u64
}
