//! Closed-form pinhole model with a pitched camera over a flat ground plane.
//!
//! Pixel coordinates are first centred on the principal point with `u` to the
//! right and `v` up. With pitch `α` (0° looks straight down), focal length `f`
//! and camera height `h`:
//!
//! ```text
//! λ = h / (f·cos α − v·sin α)
//! x = λ·(v·cos α + f·sin α)     // forward
//! y = −λ·u                      // left
//! ```
//!
//! The denominator reaches zero on the horizon row and turns negative above
//! it; those pixels have no ground intersection in front of the camera.
use crate::error::{ConfigurationError, ProjectionError};
use crate::types::GroundPoint;
use serde::{Deserialize, Serialize};

/// Relative guard on the projection denominator (multiplied by `f`).
const HORIZON_EPS: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraModel {
    /// Height of the optical centre above the ground (metres).
    pub camera_height_m: f32,
    /// Tilt of the optical axis away from straight down (degrees).
    pub pitch_angle_deg: f32,
    /// Focal length in pixels.
    pub focal_length_px: f32,
    pub image_width_px: u32,
    pub image_height_px: u32,
}

impl CameraModel {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = |name: &'static str, reason: String| {
            Err(ConfigurationError::InvalidParameter { name, reason })
        };
        if !(self.camera_height_m.is_finite() && self.camera_height_m > 0.0) {
            return invalid("camera_height_m", format!("must be > 0, got {}", self.camera_height_m));
        }
        if !(self.focal_length_px.is_finite() && self.focal_length_px > 0.0) {
            return invalid("focal_length_px", format!("must be > 0, got {}", self.focal_length_px));
        }
        if !(self.pitch_angle_deg.is_finite() && self.pitch_angle_deg.abs() < 90.0) {
            return invalid(
                "pitch_angle_deg",
                format!("must be in (-90, 90), got {}", self.pitch_angle_deg),
            );
        }
        if self.image_width_px == 0 || self.image_height_px == 0 {
            return invalid(
                "image_size",
                format!("{}x{} has no pixels", self.image_width_px, self.image_height_px),
            );
        }
        Ok(())
    }

    /// Centred coordinates `(u, v)`: `u` right-positive, `v` up-positive.
    pub fn centered(&self, pixel: [f32; 2]) -> (f64, f64) {
        let u = pixel[0] as f64 - self.image_width_px as f64 / 2.0;
        let v = -(pixel[1] as f64 - self.image_height_px as f64 / 2.0);
        (u, v)
    }

    /// Image row of the horizon, if the camera is pitched.
    pub fn horizon_row(&self) -> Option<f32> {
        let alpha = (self.pitch_angle_deg as f64).to_radians();
        if alpha.sin().abs() < HORIZON_EPS {
            return None;
        }
        let v = self.focal_length_px as f64 * alpha.cos() / alpha.sin();
        Some((self.image_height_px as f64 / 2.0 - v) as f32)
    }

    /// Projects a pixel onto the ground plane in the vehicle frame.
    pub fn image_to_ground(&self, pixel: [f32; 2]) -> Result<GroundPoint, ProjectionError> {
        let (u, v) = self.centered(pixel);
        let alpha = (self.pitch_angle_deg as f64).to_radians();
        let (sin, cos) = alpha.sin_cos();
        let f = self.focal_length_px as f64;

        let denominator = f * cos - v * sin;
        if denominator <= HORIZON_EPS * f {
            return Err(ProjectionError::Horizon {
                pixel,
                denominator: denominator as f32,
            });
        }
        let lambda = self.camera_height_m as f64 / denominator;
        let x = lambda * (v * cos + f * sin);
        let y = -lambda * u;
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::Horizon {
                pixel,
                denominator: denominator as f32,
            });
        }
        Ok(GroundPoint {
            x: x as f32,
            y: y as f32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(pitch_deg: f32, height: f32) -> CameraModel {
        CameraModel {
            camera_height_m: height,
            pitch_angle_deg: pitch_deg,
            focal_length_px: 500.0,
            image_width_px: 640,
            image_height_px: 480,
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn image_centre_of_level_camera_projects_to_origin() {
        let g = camera(0.0, 1.0).image_to_ground([320.0, 240.0]).unwrap();
        assert!(approx(g.x, 0.0) && approx(g.y, 0.0), "{g:?}");
    }

    #[test]
    fn zero_pitch_scales_by_height_over_focal() {
        // u = 100, v = 100 → λ = 1/500.
        let g = camera(0.0, 1.0).image_to_ground([420.0, 140.0]).unwrap();
        assert!(approx(g.x, 0.2) && approx(g.y, -0.2), "{g:?}");
    }

    #[test]
    fn pitched_centre_ray_hits_ground_at_height_times_tan() {
        let g = camera(45.0, 1.5).image_to_ground([320.0, 240.0]).unwrap();
        assert!(approx(g.x, 1.5) && approx(g.y, 0.0), "{g:?}");
    }

    #[test]
    fn pixel_on_horizon_is_rejected() {
        // α = 45° → denominator vanishes at v = f.
        let cam = camera(45.0, 1.0);
        let err = cam.image_to_ground([320.0, 240.0 - 500.0]).unwrap_err();
        assert!(matches!(err, ProjectionError::Horizon { .. }));
        let above = cam.image_to_ground([320.0, 240.0 - 600.0]).unwrap_err();
        assert!(matches!(above, ProjectionError::Horizon { .. }));
        assert!(approx(cam.horizon_row().unwrap(), -260.0));
    }

    #[test]
    fn level_camera_has_no_horizon() {
        let cam = camera(0.0, 1.0);
        assert!(cam.horizon_row().is_none());
        let g = cam.image_to_ground([320.0, 240.0 - 500.0]).unwrap();
        assert!(g.x.is_finite() && approx(g.x, 1.0));
    }

    #[test]
    fn horizon_error_is_local_to_the_point() {
        let cam = camera(45.0, 1.0);
        assert!(cam.image_to_ground([10.0, -300.0]).is_err());
        assert!(cam.image_to_ground([320.0, 400.0]).is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(camera(0.0, 1.0).validate().is_ok());
        assert!(camera(0.0, 0.0).validate().is_err());
        assert!(camera(95.0, 1.0).validate().is_err());
        let mut c = camera(10.0, 1.0);
        c.image_width_px = 0;
        assert!(c.validate().is_err());
    }
}
