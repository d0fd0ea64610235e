//! Score-driven difficulty ramp
//!
//! Pure functions of the live score. Each value is clamped independently so
//! one curve reaching its limit does not affect the others.

use crate::tuning::Tuning;

/// Obstacle scroll speed for a score, in `[base_speed, max_speed]`
pub fn pipe_speed(tuning: &Tuning, score: u64) -> f32 {
    let raw = tuning.base_speed + score as f32 * tuning.speed_per_point;
    raw.clamp(tuning.base_speed, tuning.max_speed)
}

/// Gap height for a score, in `[min_gap, base_gap]`
pub fn pipe_gap(tuning: &Tuning, score: u64) -> f32 {
    let raw = tuning.base_gap - score as f32 * tuning.gap_shrink_per_point;
    raw.clamp(tuning.min_gap, tuning.base_gap)
}

/// Seconds between spawns for a score, in `[min_spawn_every, base_spawn_every]`
pub fn spawn_interval(tuning: &Tuning, score: u64) -> f32 {
    let raw = tuning.base_spawn_every - score as f32 * tuning.spawn_accel_per_point;
    raw.clamp(tuning.min_spawn_every, tuning.base_spawn_every)
}

/// All three difficulty values at one score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyLevel {
    pub speed: f32,
    pub gap: f32,
    pub spawn_interval: f32,
}

impl DifficultyLevel {
    pub fn at(tuning: &Tuning, score: u64) -> Self {
        Self {
            speed: pipe_speed(tuning, score),
            gap: pipe_gap(tuning, score),
            spawn_interval: spawn_interval(tuning, score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_base_values_at_zero() {
        let t = Tuning::default();
        assert_eq!(pipe_speed(&t, 0), 220.0);
        assert_eq!(pipe_gap(&t, 0), 170.0);
        assert_eq!(spawn_interval(&t, 0), 1.35);
    }

    #[test]
    fn test_limits_reached_at_high_score() {
        let t = Tuning::default();
        let level = DifficultyLevel::at(&t, 10_000);
        assert_eq!(level.speed, t.max_speed);
        assert_eq!(level.gap, t.min_gap);
        assert_eq!(level.spawn_interval, t.min_spawn_every);
    }

    #[test]
    fn test_ramp_moves_each_curve() {
        let t = Tuning::default();
        let level = DifficultyLevel::at(&t, 5);
        assert!((level.speed - 250.0).abs() < 1e-3);
        assert!((level.gap - 157.5).abs() < 1e-3);
        assert!((level.spawn_interval - 1.25).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_values_stay_in_range(score in 0u64..1_000_000) {
            let t = Tuning::default();
            let level = DifficultyLevel::at(&t, score);
            prop_assert!(level.speed >= t.base_speed && level.speed <= t.max_speed);
            prop_assert!(level.gap >= t.min_gap && level.gap <= t.base_gap);
            prop_assert!(
                level.spawn_interval >= t.min_spawn_every
                    && level.spawn_interval <= t.base_spawn_every
            );
        }

        #[test]
        fn prop_ramp_is_monotonic(score in 0u64..100_000, step in 1u64..50) {
            let t = Tuning::default();
            let a = DifficultyLevel::at(&t, score);
            let b = DifficultyLevel::at(&t, score + step);
            prop_assert!(b.speed >= a.speed);
            prop_assert!(b.gap <= a.gap);
            prop_assert!(b.spawn_interval <= a.spawn_interval);
        }
    }
}
