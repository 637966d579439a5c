//! Tuning for the two-sided line tracker.
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// Tracker configuration, fixed for the lifetime of a tracking session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerParams {
    /// Largest accepted change of the left line's angle between frames (degrees).
    pub angle_jump_limit_left_deg: f32,
    /// Largest accepted change of the right line's angle between frames (degrees).
    pub angle_jump_limit_right_deg: f32,
    /// A side snaps back to its default once its consecutive-miss count
    /// exceeds this value.
    pub reset_trigger: u32,
}

impl Default for TrackerParams {
    fn default() -> Self {
        Self {
            angle_jump_limit_left_deg: 10.0,
            angle_jump_limit_right_deg: 10.0,
            reset_trigger: 10,
        }
    }
}

impl TrackerParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, v) in [
            ("angle_jump_limit_left_deg", self.angle_jump_limit_left_deg),
            ("angle_jump_limit_right_deg", self.angle_jump_limit_right_deg),
        ] {
            if !v.is_finite() || v <= 0.0 || v >= 90.0 {
                return Err(ConfigurationError::InvalidParameter {
                    name,
                    reason: format!("expected a value in (0, 90) degrees, got {v}"),
                });
            }
        }
        Ok(())
    }
}
