//! Data-driven game balance
//!
//! Physics and difficulty-ramp parameters. Defaults are the shipped balance;
//! a JSON object can override any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a tuning override is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be finite")]
    NotFinite { field: &'static str },
    #[error("`{field}` must be positive")]
    NotPositive { field: &'static str },
    #[error("range for `{field}` is inverted")]
    InvertedRange { field: &'static str },
}

/// Physics and difficulty parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = upward)
    pub flap_velocity: f32,
    /// Avatar collision circle radius
    pub avatar_radius: f32,

    /// Obstacle scroll speed at score 0 (units/s)
    pub base_speed: f32,
    pub speed_per_point: f32,
    pub max_speed: f32,

    /// Gap height at score 0
    pub base_gap: f32,
    pub gap_shrink_per_point: f32,
    pub min_gap: f32,

    /// Seconds between spawns at score 0
    pub base_spawn_every: f32,
    pub spawn_accel_per_point: f32,
    pub min_spawn_every: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 1800.0,
            flap_velocity: -550.0,
            avatar_radius: 14.0,

            base_speed: 220.0,
            speed_per_point: 6.0,
            max_speed: 380.0,

            base_gap: 170.0,
            gap_shrink_per_point: 2.5,
            min_gap: 120.0,

            base_spawn_every: 1.35,
            spawn_accel_per_point: 0.02,
            min_spawn_every: 0.9,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse an override, falling back to defaults when it is unusable
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    /// Check that every value is finite and every clamp range is well-formed
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("avatar_radius", self.avatar_radius),
            ("base_speed", self.base_speed),
            ("speed_per_point", self.speed_per_point),
            ("max_speed", self.max_speed),
            ("base_gap", self.base_gap),
            ("gap_shrink_per_point", self.gap_shrink_per_point),
            ("min_gap", self.min_gap),
            ("base_spawn_every", self.base_spawn_every),
            ("spawn_accel_per_point", self.spawn_accel_per_point),
            ("min_spawn_every", self.min_spawn_every),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field });
            }
        }

        for (field, value) in [
            ("avatar_radius", self.avatar_radius),
            ("base_speed", self.base_speed),
            ("min_gap", self.min_gap),
            ("min_spawn_every", self.min_spawn_every),
        ] {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field });
            }
        }

        if self.max_speed < self.base_speed {
            return Err(TuningError::InvertedRange { field: "speed" });
        }
        if self.min_gap > self.base_gap {
            return Err(TuningError::InvertedRange { field: "gap" });
        }
        if self.min_spawn_every > self.base_spawn_every {
            return Err(TuningError::InvertedRange { field: "spawn_every" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1500.0 }"#).unwrap();
        assert_eq!(tuning.gravity, 1500.0);
        assert_eq!(tuning.base_speed, Tuning::default().base_speed);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = Tuning::from_json(r#"{ "min_gap": 300.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvertedRange { field: "gap" }));
    }

    #[test]
    fn test_bad_json_falls_back() {
        let tuning = Tuning::from_json_or_default("{ not json");
        assert_eq!(tuning, Tuning::default());
    }
}
