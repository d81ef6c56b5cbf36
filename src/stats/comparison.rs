use crate::stats::aggregate::YearlyRecord;
use crate::stats::normalize::{CalendarMap, MonthlyRecord};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Same,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonWindow {
    pub current: u64,
    pub previous: u64,
    pub percentage: u64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub monthly: ComparisonWindow,
    pub yearly: ComparisonWindow,
    pub last_30_days: ComparisonWindow,
}

pub fn compare(current: u64, previous: u64) -> ComparisonWindow {
    let (percentage, direction) = if previous == 0 {
        if current > 0 {
            (100, Direction::Up)
        } else {
            (0, Direction::Same)
        }
    } else {
        let change = current.abs_diff(previous) as f64 / previous as f64 * 100.0;
        let direction = match current.cmp(&previous) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Same,
        };
        (change.round() as u64, direction)
    };

    ComparisonWindow {
        current,
        previous,
        percentage,
        direction,
    }
}

/// This month, this year and the trailing 30 days against the period before each.
pub fn build_comparison(
    records: &[MonthlyRecord],
    yearly: &[YearlyRecord],
    calendar: &CalendarMap,
    today: NaiveDate,
) -> Comparison {
    let previous_month = previous_month(today);
    let month_words = |year: i32, month: u32| {
        records
            .iter()
            .find(|r| r.year == year && r.month == month)
            .map_or(0, |r| r.word_count)
    };
    let year_words = |year: i32| {
        yearly
            .iter()
            .find(|y| y.year == year)
            .map_or(0, |y| y.word_count)
    };

    let thirty_days_ago = today - Duration::days(30);
    let sixty_days_ago = today - Duration::days(60);
    let window_words = |after: NaiveDate, until: NaiveDate| -> u64 {
        calendar
            .iter()
            .filter(|(date, _)| **date > after && **date <= until)
            .map(|(_, words)| *words)
            .sum()
    };

    Comparison {
        monthly: compare(
            month_words(today.year(), today.month()),
            month_words(previous_month.year(), previous_month.month()),
        ),
        yearly: compare(year_words(today.year()), year_words(today.year() - 1)),
        last_30_days: compare(
            window_words(thirty_days_ago, today),
            window_words(sixty_days_ago, thirty_days_ago),
        ),
    }
}

/// Any date in the calendar month before `date`.
pub(crate) fn previous_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first - Duration::days(1)
}
