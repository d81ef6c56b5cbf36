use crate::models::ReadingGoal;
use crate::stats::normalize::MonthlyRecord;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub month: String,
    pub target: u64,
    pub current: u64,
    pub remaining: u64,
    pub progress_pct: f64,
}

pub fn month_key(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}

/// The goal, if it was set for the month containing `today`.
pub fn goal_for_month(goal: Option<&ReadingGoal>, today: NaiveDate) -> Option<&ReadingGoal> {
    let key = month_key(today);
    goal.filter(|goal| goal.month == key)
}

pub fn goal_progress(goal: &ReadingGoal, records: &[MonthlyRecord]) -> GoalProgress {
    let current = records
        .iter()
        .find(|r| format!("{}-{:02}", r.year, r.month) == goal.month)
        .map_or(0, |r| r.word_count);
    let progress_pct = if goal.value == 0 {
        0.0
    } else {
        (current as f64 / goal.value as f64 * 100.0).min(100.0)
    };

    GoalProgress {
        month: goal.month.clone(),
        target: goal.value,
        current,
        remaining: goal.value.saturating_sub(current),
        progress_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::normalize::normalize;
    use crate::stats::normalize::tests::{month, reading_data};

    fn goal(value: u64, month: &str) -> ReadingGoal {
        ReadingGoal {
            value,
            month: month.to_string(),
        }
    }

    #[test]
    fn stale_goal_is_ignored() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();
        let april = goal(1_000, "2024-04");
        let may = goal(1_000, "2024-05");
        assert_eq!(goal_for_month(Some(&april), today), None);
        assert_eq!(goal_for_month(Some(&may), today), Some(&may));
        assert_eq!(goal_for_month(None, today), None);
    }

    #[test]
    fn progress_against_current_month() {
        let data = reading_data(&[
            (2024, 4, month(&[(1, 9_000)])),
            (2024, 5, month(&[(1, 250), (2, 250)])),
        ]);
        let normalized = normalize(&data, None).unwrap();

        let progress = goal_progress(&goal(2_000, "2024-05"), &normalized.records);
        assert_eq!(progress.current, 500);
        assert_eq!(progress.remaining, 1_500);
        assert_eq!(progress.progress_pct, 25.0);

        let exceeded = goal_progress(&goal(100, "2024-04"), &normalized.records);
        assert_eq!(exceeded.progress_pct, 100.0);
        assert_eq!(exceeded.remaining, 0);
    }

    #[test]
    fn month_without_reading_is_zero_progress() {
        let progress = goal_progress(&goal(2_000, "2024-07"), &[]);
        assert_eq!(progress.current, 0);
        assert_eq!(progress.progress_pct, 0.0);
    }
}
