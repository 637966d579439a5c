#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod ipm;
pub mod types;

// Building blocks used by the strategies and the tracker. Public for tools
// and tests, but considered unstable internals.
pub mod angle;
pub mod edges;
pub mod extract;
pub mod filters;
pub mod geometry;
pub mod hough;
pub mod tracker;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector, projector and their results.
pub use crate::detector::{DetectorParams, LineDetector};
pub use crate::diagnostics::{FrameReport, TrackedLine};
pub use crate::image::Frame;
pub use crate::ipm::{CalibrationModel, CameraModel, GroundProjector};
pub use crate::types::{GroundPoint, LineCartesian, LineCoordinates, PolarLine, Roi, Side};

pub use crate::error::{CalibrationError, ConfigurationError, DetectionError, ProjectionError};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lane_ipm::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let frame = Frame::filled(640, 480, [90, 90, 90]);
///
/// let mut det = LineDetector::new(DetectorParams::default())?;
/// det.set_roi([0.0, 200.0], [640.0, 480.0])?;
/// det.set_default_lines_from_points([
///     [120.0, 479.0], [280.0, 220.0],
///     [520.0, 479.0], [360.0, 220.0],
/// ])?;
/// let report = det.process(&frame)?;
///
/// let projector = GroundProjector::new(CameraModel {
///     camera_height_m: 1.4,
///     pitch_angle_deg: 62.0,
///     focal_length_px: 520.0,
///     image_width_px: 640,
///     image_height_px: 480,
/// })?;
/// if let Some(coords) = det.line_coordinates() {
///     let ground = projector.image_to_ground(coords.left_bottom)?;
///     println!("left={:?} at {:.2} m", report.left.event, ground.x);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        CameraModel, DetectorParams, Frame, FrameReport, GroundPoint, GroundProjector,
        LineDetector, PolarLine,
    };
}
