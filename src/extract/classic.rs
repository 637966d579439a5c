//! Edge-based strategy for well-lit, high-contrast boundaries:
//! luma → Gaussian blur → Canny → Hough.
use super::LineStrategy;
use crate::edges::{canny, CannyParams};
use crate::filters::{blur, to_luma_f32, GAUSSIAN_5TAP};
use crate::hough::{hough_lines, HoughLine, HoughParams};
use crate::image::Frame;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassicParams {
    pub enabled: bool,
    pub canny: CannyParams,
    pub hough: HoughParams,
}

impl Default for ClassicParams {
    fn default() -> Self {
        Self {
            enabled: true,
            canny: CannyParams::default(),
            hough: HoughParams::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClassicStrategy {
    params: ClassicParams,
}

impl ClassicStrategy {
    pub fn new(params: ClassicParams) -> Self {
        Self { params }
    }
}

impl LineStrategy for ClassicStrategy {
    fn name(&self) -> &'static str {
        "classic"
    }

    fn extract(&self, crop: &Frame) -> Vec<HoughLine> {
        let gray = blur(&to_luma_f32(crop), &GAUSSIAN_5TAP);
        let edges = canny(&gray, self.params.canny);
        hough_lines(&edges, &self.params.hough)
    }
}
