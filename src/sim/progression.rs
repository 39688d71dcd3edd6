//! Level progression curve
//!
//! Base difficulty as a function of level index alone; mode multipliers
//! are applied on top by the spawner.

/// Baseline difficulty numbers for a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelParams {
    /// Hard cap on live enemies for spawn-on-timer modes
    pub enemy_count_cap: u32,
    /// HP of a freshly spawned normal enemy before mode multipliers
    pub base_enemy_hp: u32,
}

/// Upper bound on the live-enemy cap regardless of level.
pub const ENEMY_CAP_LIMIT: u32 = 500;

/// Compute the baseline parameters for a level (level_index >= 1).
pub fn current_params(level_index: u32) -> LevelParams {
    LevelParams {
        enemy_count_cap: (10 + (level_index as f64 * 0.15) as u32).min(ENEMY_CAP_LIMIT),
        base_enemy_hp: 10 + (level_index as f64 * 0.75) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_baseline() {
        let p = current_params(1);
        assert_eq!(p.enemy_count_cap, 10);
        assert_eq!(p.base_enemy_hp, 10);
    }

    #[test]
    fn test_cap_saturates() {
        assert_eq!(current_params(4_000_000).enemy_count_cap, ENEMY_CAP_LIMIT);
    }

    proptest! {
        #[test]
        fn prop_cap_bounded(level in 1u32..5_000_000) {
            prop_assert!(current_params(level).enemy_count_cap <= ENEMY_CAP_LIMIT);
        }

        #[test]
        fn prop_curves_non_decreasing(level in 1u32..1_000_000) {
            let a = current_params(level);
            let b = current_params(level + 1);
            prop_assert!(b.enemy_count_cap >= a.enemy_count_cap);
            prop_assert!(b.base_enemy_hp >= a.base_enemy_hp);
        }
    }
}
