//! The persisted per-session record: ROI, default lines, tracker limits and
//! camera geometry.
//!
//! ```json
//! {
//!   "roi": { "top_left": [0, 200], "bottom_right": [640, 480] },
//!   "default_line_points": [[120, 479], [280, 220], [520, 479], [360, 220]],
//!   "angle_jump_limits_deg": [10, 10],
//!   "reset_trigger": 10,
//!   "camera_height_m": 1.4,
//!   "pitch_angle_deg": 62,
//!   "focal_length_px": 520
//! }
//! ```
//!
//! Default lines are given either as polar lines in crop coordinates
//! (`default_left_line`, `default_right_line`) or as four original-image
//! points (`default_line_points`, which wins when both are present).
use super::load_json;
use crate::detector::{DetectorParams, LineDetector};
use crate::error::ConfigurationError;
use crate::extract::ExtractorParams;
use crate::ipm::CameraModel;
use crate::tracker::TrackerParams;
use crate::types::{PolarLine, Roi};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub roi: Roi,
    #[serde(default)]
    pub default_left_line: Option<PolarLine>,
    #[serde(default)]
    pub default_right_line: Option<PolarLine>,
    /// Left-bottom, left-top, right-bottom, right-top (original image).
    #[serde(default)]
    pub default_line_points: Option<[[f32; 2]; 4]>,
    /// Left and right jump limits (degrees).
    #[serde(default = "default_jump_limits")]
    pub angle_jump_limits_deg: [f32; 2],
    #[serde(default = "default_reset_trigger")]
    pub reset_trigger: u32,
    pub camera_height_m: f32,
    pub pitch_angle_deg: f32,
    pub focal_length_px: f32,
    #[serde(default)]
    pub extractor: ExtractorParams,
}

fn default_jump_limits() -> [f32; 2] {
    let t = TrackerParams::default();
    [t.angle_jump_limit_left_deg, t.angle_jump_limit_right_deg]
}

fn default_reset_trigger() -> u32 {
    TrackerParams::default().reset_trigger
}

pub fn load_config(path: &Path) -> Result<SessionConfig, String> {
    load_json(path)
}

impl SessionConfig {
    pub fn roi(&self) -> Roi {
        self.roi
    }

    pub fn tracker_params(&self) -> TrackerParams {
        TrackerParams {
            angle_jump_limit_left_deg: self.angle_jump_limits_deg[0],
            angle_jump_limit_right_deg: self.angle_jump_limits_deg[1],
            reset_trigger: self.reset_trigger,
        }
    }

    pub fn detector_params(&self) -> Result<DetectorParams, ConfigurationError> {
        let tracker = self.tracker_params();
        tracker.validate()?;
        Ok(DetectorParams {
            tracker,
            extractor: self.extractor,
        })
    }

    /// Camera geometry for frames of the given size.
    pub fn camera(&self, width: u32, height: u32) -> Result<CameraModel, ConfigurationError> {
        let camera = CameraModel {
            camera_height_m: self.camera_height_m,
            pitch_angle_deg: self.pitch_angle_deg,
            focal_length_px: self.focal_length_px,
            image_width_px: width,
            image_height_px: height,
        };
        camera.validate()?;
        Ok(camera)
    }

    /// A detector with ROI and default lines applied.
    pub fn build_detector(&self) -> Result<LineDetector, ConfigurationError> {
        let mut detector = LineDetector::new(self.detector_params()?)?;
        let tl = self.roi.top_left();
        let br = self.roi.bottom_right();
        detector.set_roi(tl, br)?;
        match (self.default_line_points, self.default_left_line, self.default_right_line) {
            (Some(points), _, _) => detector.set_default_lines_from_points(points)?,
            (None, Some(left), Some(right)) => detector.set_default_lines(left, right),
            _ => return Err(ConfigurationError::MissingDefaultLines),
        }
        Ok(detector)
    }
}
