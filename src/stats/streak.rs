use crate::stats::normalize::CalendarMap;
use chrono::{Days, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Streaks {
    pub longest: u32,
    pub current: u32,
}

/// Longest run of consecutive reading days.
pub fn longest_streak(calendar: &CalendarMap) -> u32 {
    let dates: Vec<NaiveDate> = calendar.keys().copied().collect();
    if dates.is_empty() {
        return 0;
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in dates.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

/// Last day the data source is assumed to have reported. Saturates at the
/// earliest representable date.
pub(crate) fn lag_cutoff(today: NaiveDate, lag_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(lag_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Longest and current streaks, treating the last `lag_days` as not yet reported.
///
/// The current streak is live when the latest reading day is on, after, or one
/// day before `today - lag_days`; it is then the run ending at that day.
pub fn streaks_at(calendar: &CalendarMap, today: NaiveDate, lag_days: u32) -> Streaks {
    let dates: Vec<NaiveDate> = calendar.keys().copied().collect();
    let Some(&latest) = dates.last() else {
        return Streaks::default();
    };

    let data_cutoff = lag_cutoff(today, lag_days);
    let current = if (data_cutoff - latest).num_days() <= 1 {
        let mut run = 1u32;
        for pair in dates.windows(2).rev() {
            if (pair[1] - pair[0]).num_days() == 1 {
                run += 1;
            } else {
                break;
            }
        }
        run
    } else {
        0
    };

    Streaks {
        longest: longest_streak(calendar),
        current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendar(dates: &[NaiveDate]) -> CalendarMap {
        dates.iter().map(|d| (*d, 1_000)).collect()
    }

    fn run(start: NaiveDate, days: i64) -> Vec<NaiveDate> {
        (0..days).map(|offset| start + Duration::days(offset)).collect()
    }

    #[test]
    fn longest_streak_spans_gap() {
        let mut dates = run(date(2024, 1, 1), 5);
        dates.push(date(2024, 1, 10));
        assert_eq!(longest_streak(&calendar(&dates)), 5);
    }

    #[test]
    fn longest_streak_crosses_month_and_year_boundaries() {
        let dates = run(date(2023, 12, 30), 4);
        assert_eq!(longest_streak(&calendar(&dates)), 4);

        let leap = run(date(2024, 2, 28), 3);
        assert_eq!(longest_streak(&calendar(&leap)), 3);
    }

    #[test]
    fn empty_calendar_has_no_streaks() {
        assert_eq!(longest_streak(&CalendarMap::new()), 0);
        assert_eq!(
            streaks_at(&CalendarMap::new(), date(2024, 1, 1), 3),
            Streaks::default()
        );
    }

    #[test]
    fn current_streak_live_on_cutoff_day() {
        let today = date(2024, 3, 20);
        // cutoff is 2024-03-17
        let dates = run(date(2024, 3, 10), 8);
        let streaks = streaks_at(&calendar(&dates), today, 3);
        assert_eq!(streaks.current, 8);
        assert_eq!(streaks.longest, 8);
    }

    #[test]
    fn current_streak_live_one_day_before_cutoff() {
        let today = date(2024, 3, 20);
        let dates = run(date(2024, 3, 14), 3);
        let streaks = streaks_at(&calendar(&dates), today, 3);
        assert_eq!(streaks.current, 3);
    }

    #[test]
    fn current_streak_broken_two_days_before_cutoff() {
        let today = date(2024, 3, 20);
        let dates = run(date(2024, 3, 13), 3);
        let streaks = streaks_at(&calendar(&dates), today, 3);
        assert_eq!(streaks.current, 0);
        assert_eq!(streaks.longest, 3);
    }

    #[test]
    fn current_streak_counts_only_trailing_run() {
        let today = date(2024, 3, 20);
        let mut dates = run(date(2024, 2, 1), 10);
        dates.extend(run(date(2024, 3, 15), 3));
        let streaks = streaks_at(&calendar(&dates), today, 3);
        assert_eq!(streaks.current, 3);
        assert_eq!(streaks.longest, 10);
        assert!(streaks.current <= streaks.longest);
    }

    #[test]
    fn lag_beyond_the_calendar_saturates() {
        let today = date(2024, 3, 20);
        assert_eq!(lag_cutoff(today, u32::MAX), NaiveDate::MIN);
        let streaks = streaks_at(&calendar(&run(date(2024, 3, 1), 2)), today, u32::MAX);
        assert_eq!(streaks.current, 2);
    }

    #[test]
    fn reading_after_cutoff_still_counts_as_live() {
        let today = date(2024, 3, 20);
        let dates = run(date(2024, 3, 17), 4);
        let streaks = streaks_at(&calendar(&dates), today, 3);
        assert_eq!(streaks.current, 4);
    }
}
