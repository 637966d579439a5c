//! Angle utilities shared by the line representation and the tracker.

use std::f32::consts::{FRAC_PI_2, PI};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_turn(angle: f32) -> f32 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Number of half turns that `angle` has to be shifted by to land in [0, π).
///
/// Odd counts flip the sign of a polar line's ρ.
#[inline]
pub fn half_turns(angle: f32) -> i64 {
    let turns = (angle / PI).floor() as i64;
    let rest = angle - turns as f32 * PI;
    if rest >= PI - 1e-6 {
        turns + 1
    } else {
        turns
    }
}

/// Computes the smallest unsigned angular difference between two line
/// angles, treating antipodal directions as equivalent (π apart → 0).
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}
