use serde::Serialize;

/// Quadratic term of the level curve.
pub const LEVEL_CURVE_FACTOR: u64 = 1503;
/// EXP needed to get from level 1 to level 2.
pub const LEVEL_BASE_EXP: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelState {
    pub level: u32,
    pub progress_pct: f64,
    pub exp_into_level: u64,
    pub exp_required_for_level: u64,
    pub cumulative_exp_for_level: u64,
    pub total_exp_for_next_level: u64,
}

/// EXP needed to advance from `level` to `level + 1`.
pub fn exp_to_advance(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    LEVEL_CURVE_FACTOR
        .saturating_mul(steps.saturating_mul(steps))
        .saturating_add(LEVEL_BASE_EXP)
}

/// Maps total EXP (words read) onto the level curve.
pub fn level_for_exp(total_exp: u64) -> LevelState {
    let mut level = 1u32;
    let mut cumulative_exp_for_level = 0u64;
    let mut total_exp_for_next_level = exp_to_advance(level);

    while total_exp >= total_exp_for_next_level {
        // the curve tops out once the next threshold no longer fits in u64
        let Some(next) = total_exp_for_next_level.checked_add(exp_to_advance(level + 1)) else {
            break;
        };
        level += 1;
        cumulative_exp_for_level = total_exp_for_next_level;
        total_exp_for_next_level = next;
    }

    let exp_required_for_level = total_exp_for_next_level - cumulative_exp_for_level;
    let exp_into_level = total_exp - cumulative_exp_for_level;
    let progress_pct = if exp_required_for_level > 0 {
        (exp_into_level as f64 / exp_required_for_level as f64 * 100.0).min(100.0)
    } else {
        100.0
    };

    LevelState {
        level,
        progress_pct,
        exp_into_level,
        exp_required_for_level,
        cumulative_exp_for_level,
        total_exp_for_next_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exp_is_level_one() {
        let state = level_for_exp(0);
        assert_eq!(state.level, 1);
        assert_eq!(state.progress_pct, 0.0);
        assert_eq!(state.exp_required_for_level, LEVEL_BASE_EXP);
    }

    #[test]
    fn base_exp_reaches_level_two() {
        assert_eq!(level_for_exp(999).level, 1);
        let state = level_for_exp(1_000);
        assert_eq!(state.level, 2);
        assert_eq!(state.exp_into_level, 0);
        assert_eq!(state.exp_required_for_level, 2_503);
    }

    #[test]
    fn hundred_thousand_words() {
        let state = level_for_exp(100_000);
        assert_eq!(state.level, 7);
        assert_eq!(state.cumulative_exp_for_level, 88_665);
        assert_eq!(state.total_exp_for_next_level, 143_773);
        assert_eq!(state.exp_into_level, 11_335);
        assert_eq!(state.exp_required_for_level, 55_108);
        assert!((state.progress_pct - 20.568).abs() < 0.01);
    }

    #[test]
    fn thresholds_grow_quadratically() {
        assert_eq!(exp_to_advance(1), 1_000);
        assert_eq!(exp_to_advance(2), 2_503);
        assert_eq!(exp_to_advance(3), 7_012);
        assert_eq!(exp_to_advance(6), 38_575);
    }

    #[test]
    fn level_is_monotonic_in_exp() {
        let mut previous = level_for_exp(0);
        for exp in (0..2_000_000u64).step_by(7_919) {
            let state = level_for_exp(exp);
            assert!(state.level >= previous.level);
            assert!((0.0..=100.0).contains(&state.progress_pct));
            assert!(state.exp_required_for_level > 0);
            previous = state;
        }
        assert!(level_for_exp(100_000_000).level > level_for_exp(1_000_000).level);
    }

    #[test]
    fn saturated_exp_stops_at_the_top_of_the_curve() {
        let state = level_for_exp(u64::MAX);
        assert!(state.level > 1);
        assert_eq!(state.progress_pct, 100.0);
        assert!(state.total_exp_for_next_level > state.cumulative_exp_for_level);
        assert_eq!(level_for_exp(u64::MAX - 1).level, state.level);
    }

    #[test]
    fn hundred_million_is_around_level_sixty() {
        let level = level_for_exp(100_000_000).level;
        assert!((55..=65).contains(&level), "level {level}");
    }
}
