//! Canny edge detector: Sobel → NMS → double-threshold hysteresis.
use super::grad::sobel_gradients;
use super::nms::run_nms;
use crate::image::{ImageF32, Mask};
use serde::{Deserialize, Serialize};

/// Hysteresis thresholds on Sobel magnitude (unit step → 4.0).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyParams {
    /// Weak edges above this survive when connected to a strong edge.
    pub low: f32,
    /// Edges above this seed the hysteresis.
    pub high: f32,
}

impl Default for CannyParams {
    fn default() -> Self {
        Self {
            low: 0.25,
            high: 0.6,
        }
    }
}

const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Runs the detector and returns a binary edge mask of the input size.
pub fn canny(img: &ImageF32, params: CannyParams) -> Mask {
    let (w, h) = (img.w, img.h);
    let mut mask = Mask::new(w, h);
    let grad = sobel_gradients(img);
    let edges = run_nms(&grad, params.low);
    if edges.is_empty() {
        return mask;
    }

    let mut class = vec![0u8; w * h];
    let mut stack = Vec::new();
    for e in &edges {
        let idx = e.y as usize * w + e.x as usize;
        if e.magnitude >= params.high {
            class[idx] = STRONG;
            stack.push((e.x as usize, e.y as usize));
        } else {
            class[idx] = WEAK;
        }
    }

    while let Some((x, y)) = stack.pop() {
        mask.set(x, y);
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let nidx = ny as usize * w + nx as usize;
                if class[nidx] == WEAK {
                    class[nidx] = STRONG;
                    stack.push((nx as usize, ny as usize));
                }
            }
        }
    }
    mask
}
