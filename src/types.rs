use crate::angle::{half_turns, normalize_half_turn};
use crate::error::ConfigurationError;
use serde::{Deserialize, Serialize};

/// A line in polar form: `x·cos θ + y·sin θ = ρ`.
///
/// θ is kept in [0, π) and ρ is signed, so every line has exactly one
/// representation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolarLine {
    pub rho: f32,
    pub theta: f32,
}

impl PolarLine {
    /// Builds a normalized polar line from arbitrary (ρ, θ).
    pub fn new(rho: f32, theta: f32) -> Self {
        let flip = half_turns(theta).rem_euclid(2) == 1;
        Self {
            rho: if flip { -rho } else { rho },
            theta: normalize_half_turn(theta),
        }
    }

    pub fn theta_deg(&self) -> f32 {
        self.theta.to_degrees()
    }

    /// Unit normal `(cos θ, sin θ)`.
    pub fn normal(&self) -> [f32; 2] {
        [self.theta.cos(), self.theta.sin()]
    }

    /// Signed distance of `p` from the line.
    pub fn signed_distance(&self, p: [f32; 2]) -> f32 {
        let n = self.normal();
        p[0] * n[0] + p[1] * n[1] - self.rho
    }
}

/// The same line given by two points on it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineCartesian {
    pub a: [f32; 2],
    pub b: [f32; 2],
}

/// A point on the ground plane in the vehicle frame (metres).
///
/// `x` points forward, `y` to the left; `z = 0` is implied.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    pub x: f32,
    pub y: f32,
}

/// Crop rectangle in original-image pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoiCorners", into = "RoiCorners")]
pub struct Roi {
    top_left: [f32; 2],
    bottom_right: [f32; 2],
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct RoiCorners {
    top_left: [f32; 2],
    bottom_right: [f32; 2],
}

impl TryFrom<RoiCorners> for Roi {
    type Error = ConfigurationError;

    fn try_from(c: RoiCorners) -> Result<Self, Self::Error> {
        Roi::new(c.top_left, c.bottom_right)
    }
}

impl From<Roi> for RoiCorners {
    fn from(r: Roi) -> Self {
        Self {
            top_left: r.top_left,
            bottom_right: r.bottom_right,
        }
    }
}

impl Roi {
    /// Validates and builds an ROI. Corners are snapped to whole pixels.
    pub fn new(top_left: [f32; 2], bottom_right: [f32; 2]) -> Result<Self, ConfigurationError> {
        let finite = top_left.iter().chain(bottom_right.iter()).all(|v| v.is_finite());
        if !finite
            || top_left[0] < 0.0
            || top_left[1] < 0.0
            || top_left[0] >= bottom_right[0]
            || top_left[1] >= bottom_right[1]
        {
            return Err(ConfigurationError::MalformedRoi {
                top_left,
                bottom_right,
            });
        }
        let tl = [top_left[0].floor(), top_left[1].floor()];
        let br = [bottom_right[0].ceil(), bottom_right[1].ceil()];
        Ok(Self {
            top_left: tl,
            bottom_right: br,
        })
    }

    pub fn top_left(&self) -> [f32; 2] {
        self.top_left
    }

    pub fn bottom_right(&self) -> [f32; 2] {
        self.bottom_right
    }

    pub fn width(&self) -> f32 {
        self.bottom_right[0] - self.top_left[0]
    }

    pub fn height(&self) -> f32 {
        self.bottom_right[1] - self.top_left[1]
    }

    /// `[x0, y0, x1, y1]`
    pub fn as_array(&self) -> [f32; 4] {
        [
            self.top_left[0],
            self.top_left[1],
            self.bottom_right[0],
            self.bottom_right[1],
        ]
    }

    /// Integer pixel bounds `(x0, y0, x1, y1)`, exclusive at the far edge.
    pub fn pixel_bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.top_left[0] as usize,
            self.top_left[1] as usize,
            self.bottom_right[0] as usize,
            self.bottom_right[1] as usize,
        )
    }

    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.bottom_right[0] <= width as f32 && self.bottom_right[1] <= height as f32
    }
}

/// Which of the two tracked boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// The four points where the tracked lines cross the bottom and top rows of
/// the ROI, in original-image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineCoordinates {
    pub left_bottom: [f32; 2],
    pub left_top: [f32; 2],
    pub right_bottom: [f32; 2],
    pub right_top: [f32; 2],
}

impl LineCoordinates {
    /// Points in the order left-bottom, left-top, right-bottom, right-top.
    pub fn to_array(&self) -> [[f32; 2]; 4] {
        [
            self.left_bottom,
            self.left_top,
            self.right_bottom,
            self.right_top,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn polar_line_normalizes_negative_theta() {
        let l = PolarLine::new(10.0, -PI / 4.0);
        assert!((l.theta - 3.0 * PI / 4.0).abs() < 1e-5);
        assert!((l.rho + 10.0).abs() < 1e-5);
        // Any point on the original line stays on the normalized one.
        let p = [10.0 * (PI / 4.0).cos(), -10.0 * (PI / 4.0).sin()];
        assert!(l.signed_distance(p).abs() < 1e-4);
    }

    #[test]
    fn roi_rejects_inverted_corners() {
        assert!(Roi::new([10.0, 10.0], [5.0, 20.0]).is_err());
        assert!(Roi::new([10.0, 10.0], [20.0, 10.0]).is_err());
        assert!(Roi::new([-1.0, 0.0], [20.0, 10.0]).is_err());
        let roi = Roi::new([0.0, 60.0], [320.0, 240.0]).unwrap();
        assert_eq!(roi.width(), 320.0);
        assert_eq!(roi.height(), 180.0);
    }

    #[test]
    fn roi_deserialization_validates() {
        let ok: Result<Roi, _> =
            serde_json::from_str(r#"{"top_left":[0,10],"bottom_right":[50,40]}"#);
        assert!(ok.is_ok());
        let bad: Result<Roi, _> =
            serde_json::from_str(r#"{"top_left":[50,10],"bottom_right":[0,40]}"#);
        assert!(bad.is_err());
    }
}
