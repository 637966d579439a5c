//! Road-colour segmentation strategy for shadowed or low-contrast
//! boundaries.
//!
//! Pixels that look like asphalt (low colour saturation, luma inside a band)
//! form a mask; the mask outline is edge-detected and fed to the Hough
//! transform. Painted markings and verges fall outside the band, so the
//! outline follows the roadway edges even when their gradient is weak.
use super::LineStrategy;
use crate::edges::{canny, CannyParams};
use crate::filters::{luma, mask_to_f32};
use crate::hough::{hough_lines, HoughLine, HoughParams};
use crate::image::{Frame, Mask};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrightnessParams {
    pub enabled: bool,
    /// Lower luma bound of road pixels (0–255).
    pub luma_min: f32,
    /// Upper luma bound of road pixels (0–255).
    pub luma_max: f32,
    /// Maximum `max(r,g,b) - min(r,g,b)` of road pixels.
    pub max_saturation: u8,
    pub canny: CannyParams,
    pub hough: HoughParams,
}

impl Default for BrightnessParams {
    fn default() -> Self {
        Self {
            enabled: true,
            luma_min: 40.0,
            luma_max: 170.0,
            max_saturation: 30,
            canny: CannyParams::default(),
            hough: HoughParams::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BrightnessStrategy {
    params: BrightnessParams,
}

impl BrightnessStrategy {
    pub fn new(params: BrightnessParams) -> Self {
        Self { params }
    }

    /// Binary road mask of the crop.
    pub fn road_mask(&self, crop: &Frame) -> Mask {
        let p = &self.params;
        let mut mask = Mask::new(crop.width(), crop.height());
        for y in 0..crop.height() {
            for (x, px) in crop.row(y).chunks_exact(3).enumerate() {
                let rgb = [px[0], px[1], px[2]];
                let hi = rgb.iter().copied().max().unwrap_or(0);
                let lo = rgb.iter().copied().min().unwrap_or(0);
                let l = luma(rgb);
                if hi - lo <= p.max_saturation && l >= p.luma_min && l <= p.luma_max {
                    mask.set(x, y);
                }
            }
        }
        mask
    }
}

impl LineStrategy for BrightnessStrategy {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn extract(&self, crop: &Frame) -> Vec<HoughLine> {
        let road = self.road_mask(crop);
        let outline = canny(&mask_to_f32(&road), self.params.canny);
        hough_lines(&outline, &self.params.hough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn road_mask_excludes_bright_and_colored_pixels() {
        let mut f = Frame::filled(4, 1, [90, 90, 90]);
        f.put_pixel(1, 0, [240, 240, 240]);
        f.put_pixel(2, 0, [30, 140, 40]);
        f.put_pixel(3, 0, [10, 10, 10]);
        let mask = BrightnessStrategy::default().road_mask(&f);
        assert!(mask.is_set(0, 0));
        assert!(!mask.is_set(1, 0));
        assert!(!mask.is_set(2, 0));
        assert!(!mask.is_set(3, 0));
    }
}
