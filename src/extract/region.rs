//! Region-comparison strategy, robust to partial occlusion.
//!
//! For every pixel the mean luma of a window to its left is compared with a
//! window to its right. Pixels where the two differ by more than
//! `min_difference` are marked; the outline of the marked band is
//! edge-detected and passed to the Hough transform. Window sums come from a
//! summed-area table, so the cost per pixel is constant.
use super::LineStrategy;
use crate::edges::{canny, CannyParams};
use crate::filters::{luma, mask_to_f32};
use crate::hough::{hough_lines, HoughLine, HoughParams};
use crate::image::{Frame, Mask};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionCompareParams {
    pub enabled: bool,
    /// Width of each of the two windows (pixels).
    pub window_width: usize,
    /// Height of the windows (pixels).
    pub window_height: usize,
    /// Minimum mean-luma difference (0–255) to mark a boundary pixel.
    pub min_difference: f32,
    pub canny: CannyParams,
    pub hough: HoughParams,
}

impl Default for RegionCompareParams {
    fn default() -> Self {
        Self {
            enabled: true,
            window_width: 8,
            window_height: 8,
            min_difference: 35.0,
            canny: CannyParams::default(),
            hough: HoughParams::default(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegionCompareStrategy {
    params: RegionCompareParams,
}

struct SummedArea {
    w: usize,
    sums: Vec<f64>,
}

impl SummedArea {
    fn from_frame(frame: &Frame) -> Self {
        let (w, h) = (frame.width(), frame.height());
        let stride = w + 1;
        let mut sums = vec![0.0f64; stride * (h + 1)];
        for y in 0..h {
            let mut row_sum = 0.0f64;
            for (x, px) in frame.row(y).chunks_exact(3).enumerate() {
                row_sum += luma([px[0], px[1], px[2]]) as f64;
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + row_sum;
            }
        }
        Self { w, sums }
    }

    /// Mean over `[x0, x1) × [y0, y1)`.
    fn mean(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        let s = self.w + 1;
        let total = self.sums[y1 * s + x1] - self.sums[y0 * s + x1] - self.sums[y1 * s + x0]
            + self.sums[y0 * s + x0];
        let area = ((x1 - x0) * (y1 - y0)).max(1) as f64;
        total / area
    }
}

impl RegionCompareStrategy {
    pub fn new(params: RegionCompareParams) -> Self {
        Self { params }
    }

    /// Mask of pixels whose left and right windows differ in mean luma.
    pub fn boundary_mask(&self, crop: &Frame) -> Mask {
        let (w, h) = (crop.width(), crop.height());
        let ww = self.params.window_width.max(1);
        let wh = self.params.window_height.max(1);
        let mut mask = Mask::new(w, h);
        if w < 2 * ww || h == 0 {
            return mask;
        }
        let table = SummedArea::from_frame(crop);
        let half = wh / 2;
        let threshold = self.params.min_difference as f64;
        for y in 0..h {
            let y0 = y.saturating_sub(half);
            let y1 = (y0 + wh).min(h);
            for x in ww..=w - ww {
                let left = table.mean(x - ww, y0, x, y1);
                let right = table.mean(x, y0, x + ww, y1);
                if (left - right).abs() > threshold {
                    mask.set(x, y);
                }
            }
        }
        mask
    }
}

impl LineStrategy for RegionCompareStrategy {
    fn name(&self) -> &'static str {
        "region_compare"
    }

    fn extract(&self, crop: &Frame) -> Vec<HoughLine> {
        let band = self.boundary_mask(crop);
        let outline = canny(&mask_to_f32(&band), self.params.canny);
        hough_lines(&outline, &self.params.hough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_band_straddles_vertical_step() {
        let mut f = Frame::filled(40, 10, [60, 60, 60]);
        for y in 0..10 {
            for x in 20..40 {
                f.put_pixel(x, y, [200, 200, 200]);
            }
        }
        let s = RegionCompareStrategy::new(RegionCompareParams {
            window_width: 4,
            window_height: 3,
            min_difference: 50.0,
            ..Default::default()
        });
        let mask = s.boundary_mask(&f);
        assert!(mask.is_set(20, 5));
        assert!(!mask.is_set(8, 5));
        assert!(!mask.is_set(32, 5));
    }

    #[test]
    fn uniform_frame_has_empty_mask() {
        let f = Frame::filled(30, 12, [100, 100, 100]);
        assert_eq!(RegionCompareStrategy::default().boundary_mask(&f).count(), 0);
    }
}
