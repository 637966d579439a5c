//! Typical usage:
//! ```no_run
//! use lane_ipm::{DetectorParams, Frame, LineDetector};
//!
//! # fn example(frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
//! let mut detector = LineDetector::new(DetectorParams::default())?;
//! detector.set_roi([0.0, 200.0], [640.0, 480.0])?;
//! detector.set_default_lines_from_points([
//!     [120.0, 479.0], [280.0, 220.0],
//!     [520.0, 479.0], [360.0, 220.0],
//! ])?;
//! let report = detector.process(frame)?;
//! println!("left theta: {:.1}", report.left.original.theta_deg());
//! # Ok(())
//! # }
//! ```

use super::params::DetectorParams;
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{FrameReport, Stage, TimingBreakdown, TrackedLine};
use crate::error::{ConfigurationError, DetectionError};
use crate::extract::{CandidateExtractor, CandidatePool};
use crate::geometry::{
    cartesian_to_polar, crop_to_original, intersect_row, line_crop_to_original, original_to_crop,
    polar_endpoints,
};
use crate::image::Frame;
use crate::tracker::LineTracker;
use crate::types::{LineCoordinates, PolarLine, Roi, Side};
use log::{debug, warn};
use std::time::Instant;

/// Two-line boundary detector with temporal tracking.
pub struct LineDetector {
    params: DetectorParams,
    extractor: CandidateExtractor,
    tracker: LineTracker,
    roi: Option<Roi>,
    frame_index: u64,
    last_pool: Option<CandidatePool>,
    last_report: Option<FrameReport>,
}

impl LineDetector {
    /// Detector with the strategies enabled in `params.extractor`.
    pub fn new(params: DetectorParams) -> Result<Self, ConfigurationError> {
        let extractor = CandidateExtractor::from_params(&params.extractor);
        Self::with_extractor(params, extractor)
    }

    /// Detector with a caller-assembled strategy set.
    pub fn with_extractor(
        params: DetectorParams,
        extractor: CandidateExtractor,
    ) -> Result<Self, ConfigurationError> {
        let tracker = LineTracker::new(params.tracker)?;
        Ok(Self {
            params,
            extractor,
            tracker,
            roi: None,
            frame_index: 0,
            last_pool: None,
            last_report: None,
        })
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    pub fn roi(&self) -> Option<Roi> {
        self.roi
    }

    pub fn tracker(&self) -> &LineTracker {
        &self.tracker
    }

    /// Candidate pool of the most recent frame.
    pub fn candidates(&self) -> Option<&CandidatePool> {
        self.last_pool.as_ref()
    }

    pub fn last_report(&self) -> Option<&FrameReport> {
        self.last_report.as_ref()
    }

    /// Sets the crop rectangle. A malformed rectangle leaves the previous
    /// one in place.
    ///
    /// Default lines are stored in crop coordinates; set the ROI first.
    pub fn set_roi(&mut self, top_left: [f32; 2], bottom_right: [f32; 2]) -> Result<(), ConfigurationError> {
        let roi = Roi::new(top_left, bottom_right)?;
        debug!("roi set to {:?}", roi.as_array());
        self.roi = Some(roi);
        Ok(())
    }

    /// Seeds both sides with default lines given in crop coordinates.
    pub fn set_default_lines(&mut self, left: PolarLine, right: PolarLine) {
        self.tracker.seed(left, right);
    }

    /// Seeds both sides from two points per line, given in original-image
    /// coordinates in the order left-bottom, left-top, right-bottom,
    /// right-top.
    pub fn set_default_lines_from_points(&mut self, points: [[f32; 2]; 4]) -> Result<(), ConfigurationError> {
        let roi = self.roi.ok_or(ConfigurationError::MissingRoi)?;
        for (pair, name) in [(0, "left"), (2, "right")] {
            let (a, b) = (points[pair], points[pair + 1]);
            if a == b || a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
                return Err(ConfigurationError::InvalidParameter {
                    name: "default_line_points",
                    reason: format!("{} line needs two distinct finite points, got {:?} and {:?}", name, a, b),
                });
            }
        }
        let [lb, lt, rb, rt] = points.map(|p| original_to_crop(p, &roi));
        self.set_default_lines(cartesian_to_polar(lb, lt), cartesian_to_polar(rb, rt));
        Ok(())
    }

    /// Runs extraction and tracking on one frame.
    pub fn process(&mut self, frame: &Frame) -> Result<FrameReport, DetectionError> {
        let total_start = Instant::now();
        let roi = self.roi.ok_or(ConfigurationError::MissingRoi)?;
        if !self.tracker.is_seeded() {
            return Err(ConfigurationError::MissingDefaultLines.into());
        }
        if !roi.fits(frame.width(), frame.height()) {
            warn!(
                "roi {:?} exceeds frame {}x{}",
                roi.as_array(),
                frame.width(),
                frame.height()
            );
            return Err(ConfigurationError::RoiOutsideFrame {
                roi: roi.as_array(),
                frame_width: frame.width(),
                frame_height: frame.height(),
            }
            .into());
        }

        let mut timing = TimingBreakdown::default();

        let crop = timing.time(Stage::Crop, || frame.crop(&roi));
        if crop.width() == 0 || crop.height() == 0 {
            return Err(DetectionError::EmptyRoi);
        }
        let pool = timing.time(Stage::Extract, || self.extractor.extract(&crop));
        let tracker = &mut self.tracker;
        let updates = timing.time(Stage::Track, || tracker.update(&pool.lines()))?;

        let [left, right] =
            updates.map(|u| TrackedLine::from_update(&u, line_crop_to_original(&u.line, &roi)));
        timing.total_ms = elapsed_ms(total_start);

        let report = FrameReport {
            frame_index: self.frame_index,
            left,
            right,
            candidates: pool.candidates.len(),
            runs: pool.runs.clone(),
            timing,
        };
        debug!(
            "frame {}: {} candidates, left {:?}, right {:?}, {:.2} ms",
            report.frame_index,
            report.candidates,
            report.left.event,
            report.right.event,
            report.timing.total_ms
        );

        self.frame_index += 1;
        self.last_pool = Some(pool);
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Where the current lines cross the bottom and top rows of the ROI, in
    /// original-image coordinates. `None` before the ROI and default lines
    /// are set.
    pub fn line_coordinates(&self) -> Option<LineCoordinates> {
        let roi = self.roi?;
        let left = self.tracker.state(Side::Left)?.line();
        let right = self.tracker.state(Side::Right)?.line();
        let ends = |line: &PolarLine| -> ([f32; 2], [f32; 2]) {
            match (intersect_row(line, roi.height()), intersect_row(line, 0.0)) {
                (Some(bottom), Some(top)) => (bottom, top),
                _ => {
                    // Horizontal line: it never crosses the rows.
                    let seg = polar_endpoints(line);
                    (seg.a, seg.b)
                }
            }
        };
        let (lb, lt) = ends(&left);
        let (rb, rt) = ends(&right);
        Some(LineCoordinates {
            left_bottom: crop_to_original(lb, &roi),
            left_top: crop_to_original(lt, &roi),
            right_bottom: crop_to_original(rb, &roi),
            right_top: crop_to_original(rt, &roi),
        })
    }

    /// Snaps both sides back to their defaults.
    pub fn reset_to_default(&mut self) {
        self.tracker.reset_to_default();
    }

    /// Drops per-frame state and resets both sides. ROI and default lines
    /// are kept.
    pub fn clear_up(&mut self) {
        self.last_pool = None;
        self.last_report = None;
        self.frame_index = 0;
        self.tracker.reset_to_default();
    }
}
