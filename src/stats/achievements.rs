//! Tiered achievements evaluated against a snapshot of four reading metrics.
//!
//! Nothing is persisted: each evaluation recomputes the unlocked set from the
//! current metric values.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    TotalWords,
    LongestStreak,
    MaxMonthlyWords,
    TotalBooks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub tier: Tier,
    pub threshold: u64,
}

/// Achievements driven by one metric, thresholds ascending.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AchievementCategory {
    pub name: &'static str,
    pub metric: MetricKey,
    pub achievements: &'static [AchievementDefinition],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct Metrics {
    pub total_words: u64,
    pub longest_streak: u64,
    pub max_monthly_words: u64,
    pub total_books: u64,
}

impl Metrics {
    pub fn value(&self, key: MetricKey) -> u64 {
        match key {
            MetricKey::TotalWords => self.total_words,
            MetricKey::LongestStreak => self.longest_streak,
            MetricKey::MaxMonthlyWords => self.max_monthly_words,
            MetricKey::TotalBooks => self.total_books,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AchievementProgress {
    pub category: &'static str,
    pub metric: MetricKey,
    pub achievements: &'static [AchievementDefinition],
    pub current_value: u64,
    pub unlocked_count: usize,
    pub total_count: usize,
    pub latest_unlocked: Option<AchievementDefinition>,
    pub next_target: Option<AchievementDefinition>,
    pub next_progress_pct: f64,
}

const fn achievement(
    name: &'static str,
    description: &'static str,
    tier: Tier,
    threshold: u64,
) -> AchievementDefinition {
    AchievementDefinition {
        name,
        description,
        tier,
        threshold,
    }
}

pub static ACHIEVEMENT_CATEGORIES: &[AchievementCategory] = &[
    AchievementCategory {
        name: "Total words read",
        metric: MetricKey::TotalWords,
        achievements: &[
            achievement("Reading Debut", "Read 100,000 words in total", Tier::Bronze, 100_000),
            achievement("Bookworm", "Read 1,000,000 words in total", Tier::Silver, 1_000_000),
            achievement("Reading Royalty", "Read 10,000,000 words in total", Tier::Gold, 10_000_000),
            achievement("Master Reader", "Read 25,000,000 words in total", Tier::Gold, 25_000_000),
            achievement("Seeker of Books", "Read 50,000,000 words in total", Tier::Platinum, 50_000_000),
            achievement("Sailor of the Printed Sea", "Read 100,000,000 words in total", Tier::Platinum, 100_000_000),
            achievement("Keeper of the Library", "Read 200,000,000 words in total", Tier::Diamond, 200_000_000),
            achievement("Galactic Reader", "Read 500,000,000 words in total", Tier::Special, 500_000_000),
        ],
    },
    AchievementCategory {
        name: "Consecutive reading days",
        metric: MetricKey::LongestStreak,
        achievements: &[
            achievement("Weekly Reader", "Read 7 days in a row", Tier::Bronze, 7),
            achievement("Perfect Attendance", "Read 30 days in a row", Tier::Silver, 30),
            achievement("Hard Worker", "Read 100 days in a row", Tier::Gold, 100),
            achievement("Year-Round Reader", "Read 365 days in a row", Tier::Platinum, 365),
            achievement("Lifelong Companion", "Read 730 days in a row", Tier::Diamond, 730),
        ],
    },
    AchievementCategory {
        name: "Words read in a month",
        metric: MetricKey::MaxMonthlyWords,
        achievements: &[
            achievement("Rocket Start", "Read 100,000 words in one month", Tier::Bronze, 100_000),
            achievement("Boost Dash", "Read 500,000 words in one month", Tier::Silver, 500_000),
            achievement("Monthly Million", "Read 1,000,000 words in one month", Tier::Gold, 1_000_000),
            achievement("Supersonic Reading", "Read 2,500,000 words in one month", Tier::Gold, 2_500_000),
            achievement("Warp Drive", "Read 5,000,000 words in one month", Tier::Platinum, 5_000_000),
            achievement("Hyperspace", "Read 10,000,000 words in one month", Tier::Diamond, 10_000_000),
            achievement("Another Dimension", "Read 20,000,000 words in one month", Tier::Special, 20_000_000),
        ],
    },
    AchievementCategory {
        name: "Works read",
        metric: MetricKey::TotalBooks,
        achievements: &[
            achievement("Collector", "Read 50 works", Tier::Bronze, 50),
            achievement("Librarian", "Read 100 works", Tier::Silver, 100),
            achievement("Archive Keeper", "Read 250 works", Tier::Gold, 250),
            achievement("Reading Sommelier", "Read 500 works", Tier::Platinum, 500),
            achievement("A Thousand Tales", "Read 1,000 works", Tier::Diamond, 1_000),
        ],
    },
];

pub fn evaluate_category(category: &AchievementCategory, current_value: u64) -> AchievementProgress {
    let unlocked: Vec<&AchievementDefinition> = category
        .achievements
        .iter()
        .filter(|a| current_value >= a.threshold)
        .collect();
    let latest_unlocked = unlocked.last().map(|a| **a);
    let next_target = category
        .achievements
        .iter()
        .find(|a| current_value < a.threshold)
        .copied();

    let next_progress_pct = match next_target {
        None => 100.0,
        Some(next) => {
            let floor = latest_unlocked.map_or(0, |a| a.threshold);
            let span = next.threshold.saturating_sub(floor);
            if span == 0 {
                100.0
            } else {
                let gained = current_value.saturating_sub(floor) as f64;
                (gained / span as f64 * 100.0).clamp(0.0, 100.0)
            }
        }
    };

    AchievementProgress {
        category: category.name,
        metric: category.metric,
        achievements: category.achievements,
        current_value,
        unlocked_count: unlocked.len(),
        total_count: category.achievements.len(),
        latest_unlocked,
        next_target,
        next_progress_pct,
    }
}

pub fn evaluate_achievements(
    categories: &[AchievementCategory],
    metrics: &Metrics,
) -> Vec<AchievementProgress> {
    categories
        .iter()
        .map(|category| evaluate_category(category, metrics.value(category.metric)))
        .collect()
}

/// Highest-tier latest unlock across categories; the earlier category wins a tie.
pub fn most_notable(progress: &[AchievementProgress]) -> Option<AchievementDefinition> {
    progress
        .iter()
        .filter_map(|p| p.latest_unlocked)
        .fold(None, |best: Option<AchievementDefinition>, candidate| match best {
            Some(current) if current.tier >= candidate.tier => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LADDER: &[AchievementDefinition] = &[
        achievement("one", "", Tier::Bronze, 100),
        achievement("two", "", Tier::Silver, 1_000),
        achievement("three", "", Tier::Gold, 10_000),
    ];

    const CATEGORY: AchievementCategory = AchievementCategory {
        name: "ladder",
        metric: MetricKey::TotalWords,
        achievements: LADDER,
    };

    #[test]
    fn partial_progress_between_thresholds() {
        let progress = evaluate_category(&CATEGORY, 500);
        assert_eq!(progress.unlocked_count, 1);
        assert_eq!(progress.total_count, 3);
        assert_eq!(progress.latest_unlocked.map(|a| a.threshold), Some(100));
        assert_eq!(progress.next_target.map(|a| a.threshold), Some(1_000));
        assert!((progress.next_progress_pct - 44.444).abs() < 0.01);
    }

    #[test]
    fn nothing_unlocked_interpolates_from_zero() {
        let progress = evaluate_category(&CATEGORY, 25);
        assert_eq!(progress.unlocked_count, 0);
        assert_eq!(progress.latest_unlocked, None);
        assert!((progress.next_progress_pct - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn threshold_is_inclusive() {
        let progress = evaluate_category(&CATEGORY, 1_000);
        assert_eq!(progress.unlocked_count, 2);
        assert_eq!(progress.next_progress_pct, 0.0);
    }

    #[test]
    fn everything_unlocked_is_complete() {
        let progress = evaluate_category(&CATEGORY, 50_000);
        assert_eq!(progress.unlocked_count, 3);
        assert_eq!(progress.next_target, None);
        assert_eq!(progress.next_progress_pct, 100.0);
    }

    #[test]
    fn unlocked_count_never_decreases_as_value_grows() {
        for category in ACHIEVEMENT_CATEGORIES {
            let mut previous = 0;
            for value in (0..600_000_000u64).step_by(3_000_017) {
                let count = evaluate_category(category, value).unlocked_count;
                assert!(count >= previous);
                previous = count;
            }
        }
    }

    #[test]
    fn definitions_are_ascending() {
        for category in ACHIEVEMENT_CATEGORIES {
            assert!(
                category
                    .achievements
                    .windows(2)
                    .all(|pair| pair[0].threshold < pair[1].threshold && pair[0].tier <= pair[1].tier),
                "{} out of order",
                category.name
            );
        }
    }

    #[test]
    fn empty_metrics_unlock_nothing() {
        let progress = evaluate_achievements(ACHIEVEMENT_CATEGORIES, &Metrics::default());
        assert_eq!(progress.len(), 4);
        assert!(progress.iter().all(|p| p.unlocked_count == 0));
        assert_eq!(most_notable(&progress), None);
    }

    #[test]
    fn most_notable_prefers_higher_tier_then_earlier_category() {
        let metrics = Metrics {
            total_words: 1_500_000,
            longest_streak: 40,
            max_monthly_words: 120_000,
            total_books: 260,
        };
        let progress = evaluate_achievements(ACHIEVEMENT_CATEGORIES, &metrics);
        assert_eq!(most_notable(&progress).map(|a| a.name), Some("Archive Keeper"));

        let tied = Metrics {
            total_books: 100,
            ..metrics
        };
        let progress = evaluate_achievements(ACHIEVEMENT_CATEGORIES, &tied);
        assert_eq!(most_notable(&progress).map(|a| a.name), Some("Bookworm"));
    }
}
