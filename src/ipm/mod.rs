//! Ground-plane projection: the closed-form camera model plus a four-point
//! perspective calibration for bird's-eye warping.
//!
//! A [`GroundProjector`] owns the current [`CalibrationModel`] behind an
//! `Arc`. Recalibration builds a complete new model and swaps it in, so a
//! snapshot obtained through [`GroundProjector::calibration`] never changes
//! underneath its holder.

pub mod camera;
pub mod homography;
pub mod warp;

pub use camera::CameraModel;
pub use homography::{
    apply_homography, apply_homography_points, degenerate_triple, perspective_transform,
};
pub use warp::warp_perspective;

use crate::error::{CalibrationError, ConfigurationError, ProjectionError};
use crate::image::Frame;
use crate::types::GroundPoint;
use log::{debug, info, warn};
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How projected ground points are laid out in the bird's-eye image by
/// [`GroundProjector::calibrate_from_geometry`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryLayout {
    /// Fraction of each output dimension covered by the ground bounding box.
    pub fill: f32,
}

impl Default for GeometryLayout {
    fn default() -> Self {
        Self { fill: 0.5 }
    }
}

/// A solved calibration. Immutable once built.
#[derive(Clone, Debug, Serialize)]
pub struct CalibrationModel {
    /// Camera geometry the destination points were derived from, if any.
    pub camera: Option<CameraModel>,
    pub source: [[f32; 2]; 4],
    pub destination: [[f32; 2]; 4],
    /// Source pixel → bird's-eye pixel.
    pub perspective: Matrix3<f32>,
    #[serde(skip)]
    inverse: Matrix3<f32>,
}

impl CalibrationModel {
    fn solve(
        camera: Option<CameraModel>,
        source: [[f32; 2]; 4],
        destination: [[f32; 2]; 4],
    ) -> Result<Self, CalibrationError> {
        let perspective = perspective_transform(&source, &destination)?;
        let inverse = perspective.try_inverse().ok_or(CalibrationError::Singular)?;
        Ok(Self {
            camera,
            source,
            destination,
            perspective,
            inverse,
        })
    }

    /// Bird's-eye pixel → source pixel.
    pub fn inverse(&self) -> &Matrix3<f32> {
        &self.inverse
    }
}

/// Four destination corners from two diagonal ones:
/// `[a, (b.x, a.y), (a.x, b.y), b]`.
pub fn rectangle_from_diagonal(a: [f32; 2], b: [f32; 2]) -> [[f32; 2]; 4] {
    [a, [b[0], a[1]], [a[0], b[1]], b]
}

/// Derives integer destination pixels for `source` from the camera model.
///
/// The metric bounding box of the projected points covers `layout.fill` of
/// the image in each direction. The vehicle axis (`y = 0`) lands on the
/// centre column and the nearest projected point on the bottom row; forward
/// is up.
pub fn geometric_destination(
    camera: &CameraModel,
    source: &[[f32; 2]; 4],
    layout: &GeometryLayout,
) -> Result<[[f32; 2]; 4], CalibrationError> {
    let mut ground = [GroundPoint { x: 0.0, y: 0.0 }; 4];
    for (g, &p) in ground.iter_mut().zip(source.iter()) {
        *g = camera.image_to_ground(p)?;
    }

    let (mut x_min, mut x_max) = (f32::INFINITY, f32::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f32::INFINITY, f32::NEG_INFINITY);
    for g in &ground {
        x_min = x_min.min(g.x);
        x_max = x_max.max(g.x);
        y_min = y_min.min(g.y);
        y_max = y_max.max(g.y);
    }
    let (dx, dy) = (x_max - x_min, y_max - y_min);
    if !(dx > 0.0 && dy > 0.0) {
        return Err(match degenerate_triple(source) {
            Some(indices) => CalibrationError::DegenerateSource { indices },
            None => CalibrationError::Singular,
        });
    }

    let width = camera.image_width_px as f32;
    let height = camera.image_height_px as f32;
    let x_res = layout.fill * height / dx;
    let y_res = layout.fill * width / dy;
    debug!(
        "geometric layout: x [{:.3}, {:.3}] m, y [{:.3}, {:.3}] m, {:.1} px/m fwd, {:.1} px/m lat",
        x_min, x_max, y_min, y_max, x_res, y_res
    );

    let mut destination = [[0.0f32; 2]; 4];
    for (d, g) in destination.iter_mut().zip(ground.iter()) {
        let col = width / 2.0 - g.y * y_res;
        let row = height - (g.x - x_min) * x_res;
        *d = [col.trunc(), row.trunc()];
    }
    Ok(destination)
}

#[derive(Clone, Debug)]
pub struct GroundProjector {
    camera: CameraModel,
    layout: GeometryLayout,
    model: Option<Arc<CalibrationModel>>,
}

impl GroundProjector {
    pub fn new(camera: CameraModel) -> Result<Self, ConfigurationError> {
        camera.validate()?;
        Ok(Self {
            camera,
            layout: GeometryLayout::default(),
            model: None,
        })
    }

    pub fn with_layout(mut self, layout: GeometryLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn camera(&self) -> &CameraModel {
        &self.camera
    }

    /// Current calibration, if any. The snapshot stays valid across later
    /// recalibrations.
    pub fn calibration(&self) -> Option<Arc<CalibrationModel>> {
        self.model.clone()
    }

    pub fn is_calibrated(&self) -> bool {
        self.model.is_some()
    }

    /// Solves the transform mapping `source` onto `destination`. A failed
    /// calibration leaves the previous one in place.
    pub fn calibrate(
        &mut self,
        source: [[f32; 2]; 4],
        destination: [[f32; 2]; 4],
    ) -> Result<Arc<CalibrationModel>, CalibrationError> {
        self.install(None, source, destination)
    }

    /// Calibrates with destination points derived from `camera`. The camera
    /// replaces the current one only when the calibration succeeds.
    pub fn calibrate_from_geometry(
        &mut self,
        camera: CameraModel,
        source: [[f32; 2]; 4],
    ) -> Result<Arc<CalibrationModel>, CalibrationError> {
        camera.validate().map_err(CalibrationError::InvalidCamera)?;
        let destination = match geometric_destination(&camera, &source, &self.layout) {
            Ok(d) => d,
            Err(err) => {
                warn!("geometric calibration rejected: {}", err);
                return Err(err);
            }
        };
        self.install(Some(camera), source, destination)
    }

    fn install(
        &mut self,
        camera: Option<CameraModel>,
        source: [[f32; 2]; 4],
        destination: [[f32; 2]; 4],
    ) -> Result<Arc<CalibrationModel>, CalibrationError> {
        match CalibrationModel::solve(camera, source, destination) {
            Ok(model) => {
                info!(
                    "calibrated perspective transform: {:?} -> {:?}",
                    model.source, model.destination
                );
                if let Some(camera) = model.camera {
                    self.camera = camera;
                }
                let model = Arc::new(model);
                self.model = Some(model.clone());
                Ok(model)
            }
            Err(err) => {
                warn!("calibration rejected: {}", err);
                Err(err)
            }
        }
    }

    /// Metric ground position of a pixel. Needs only the camera geometry;
    /// a pixel at or above the horizon fails on its own.
    pub fn image_to_ground(&self, pixel: [f32; 2]) -> Result<GroundPoint, ProjectionError> {
        self.camera.image_to_ground(pixel)
    }

    /// Projects each pixel independently; one pixel above the horizon does
    /// not affect the others.
    pub fn project_points(&self, pixels: &[[f32; 2]]) -> Vec<Result<GroundPoint, ProjectionError>> {
        pixels.iter().map(|&p| self.image_to_ground(p)).collect()
    }

    /// Maps a source pixel into the bird's-eye image.
    pub fn warp_point(&self, pixel: [f32; 2]) -> Result<[f32; 2], ProjectionError> {
        let model = self.model.as_ref().ok_or(ProjectionError::NotCalibrated)?;
        apply_homography(&model.perspective, pixel).ok_or(ProjectionError::NonInvertible)
    }

    /// Warps a whole frame into the bird's-eye view (same size as the input).
    pub fn inv_perspective_mapping(&self, frame: &Frame) -> Result<Frame, ProjectionError> {
        let model = self.model.as_ref().ok_or(ProjectionError::NotCalibrated)?;
        Ok(warp_perspective(
            frame,
            model.inverse(),
            frame.width(),
            frame.height(),
        ))
    }
}
