//! Preprocessing shared by the extraction strategies: luma conversion and
//! separable smoothing with clamped borders.

use crate::image::{Frame, ImageF32, ImageView, ImageViewMut, Mask};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order).
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_5TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Rec. 601 luma in [0, 255].
#[inline]
pub fn luma(rgb: [u8; 3]) -> f32 {
    0.299 * rgb[0] as f32 + 0.587 * rgb[1] as f32 + 0.114 * rgb[2] as f32
}

/// Converts a frame to a single-channel float image in [0, 1].
pub fn to_luma_f32(frame: &Frame) -> ImageF32 {
    let mut out = ImageF32::new(frame.width(), frame.height());
    for y in 0..frame.height() {
        let src = frame.row(y);
        let dst = out.row_mut(y);
        for (x, px) in src.chunks_exact(3).enumerate() {
            dst[x] = luma([px[0], px[1], px[2]]) / 255.0;
        }
    }
    out
}

/// Converts a binary mask to a float image (foreground → 1.0).
pub fn mask_to_f32(mask: &Mask) -> ImageF32 {
    let mut out = ImageF32::new(mask.w, mask.h);
    for y in 0..mask.h {
        let src = mask.row(y);
        let dst = out.row_mut(y);
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = if s != 0 { 1.0 } else { 0.0 };
        }
    }
    out
}

/// Applies a separable filter horizontally then vertically.
pub fn blur(src: &ImageF32, filter: &dyn SeparableFilter) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        let out = horiz.row_mut(y);
        for (x, o) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let xx = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += row[xx] * t;
            }
            *o = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst = out.row_mut(y);
        for (k, &t) in taps.iter().enumerate() {
            let yy = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
            let src_row = horiz.row(yy);
            for (d, &s) in dst.iter_mut().zip(src_row) {
                *d += s * t;
            }
        }
    }
    out
}
