//! Error types for configuration, calibration, projection and per-frame
//! detection.
//!
//! Only conditions the caller must act on are errors. A frame without any
//! detectable structure is not one: the tracker simply counts a miss.

use std::fmt;

// ── Configuration ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// Top-left corner is not strictly above and left of bottom-right.
    MalformedRoi {
        top_left: [f32; 2],
        bottom_right: [f32; 2],
    },
    /// A tuning value is out of its valid range.
    InvalidParameter { name: &'static str, reason: String },
    /// A frame was processed before `set_roi`.
    MissingRoi,
    /// A frame was processed before the default lines were seeded.
    MissingDefaultLines,
    /// The ROI does not fit inside the supplied frame.
    RoiOutsideFrame {
        roi: [f32; 4],
        frame_width: usize,
        frame_height: usize,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRoi {
                top_left,
                bottom_right,
            } => write!(
                f,
                "malformed ROI: top-left ({}, {}) must be above and left of bottom-right ({}, {})",
                top_left[0], top_left[1], bottom_right[0], bottom_right[1]
            ),
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{}`: {}", name, reason)
            }
            Self::MissingRoi => write!(f, "no ROI configured"),
            Self::MissingDefaultLines => write!(f, "default lines have not been set"),
            Self::RoiOutsideFrame {
                roi,
                frame_width,
                frame_height,
            } => write!(
                f,
                "ROI [{}, {}, {}, {}] exceeds frame {}x{}",
                roi[0], roi[1], roi[2], roi[3], frame_width, frame_height
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}

// ── Projection ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// The pixel lies at or above the horizon; its viewing ray never meets
    /// the ground plane in front of the camera.
    Horizon { pixel: [f32; 2], denominator: f32 },
    /// A homography-based operation was requested before calibration.
    NotCalibrated,
    /// The homography maps the point to infinity.
    NonInvertible,
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizon { pixel, denominator } => write!(
                f,
                "pixel ({}, {}) has no ground intersection (denominator {:.3e})",
                pixel[0], pixel[1], denominator
            ),
            Self::NotCalibrated => write!(f, "projector has not been calibrated"),
            Self::NonInvertible => write!(f, "point maps to infinity under the homography"),
        }
    }
}

impl std::error::Error for ProjectionError {}

// ── Calibration ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Three of the four source points are (nearly) collinear.
    DegenerateSource { indices: [usize; 3] },
    /// Three of the four destination points are (nearly) collinear.
    DegenerateDestination { indices: [usize; 3] },
    /// The linear system for the homography could not be solved.
    Singular,
    /// A source point could not be projected onto the ground plane.
    Projection(ProjectionError),
    /// The camera geometry for a geometric calibration is out of range.
    InvalidCamera(ConfigurationError),
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateSource { indices } => write!(
                f,
                "source points {:?} are collinear; re-supply calibration points",
                indices
            ),
            Self::DegenerateDestination { indices } => {
                write!(f, "destination points {:?} are collinear", indices)
            }
            Self::Singular => write!(f, "perspective transform is singular"),
            Self::Projection(err) => write!(f, "calibration point projection failed: {}", err),
            Self::InvalidCamera(err) => write!(f, "invalid camera geometry: {}", err),
        }
    }
}

impl std::error::Error for CalibrationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Projection(err) => Some(err),
            Self::InvalidCamera(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProjectionError> for CalibrationError {
    fn from(err: ProjectionError) -> Self {
        Self::Projection(err)
    }
}

// ── Detection ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    Configuration(ConfigurationError),
    /// The ROI crop of the frame has zero area.
    EmptyRoi,
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(err) => write!(f, "{}", err),
            Self::EmptyRoi => write!(f, "ROI crop is empty"),
        }
    }
}

impl std::error::Error for DetectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            Self::EmptyRoi => None,
        }
    }
}

impl From<ConfigurationError> for DetectionError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}
