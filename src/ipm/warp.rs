//! Bird's-eye warp of a full frame.
use super::homography::apply_homography;
use crate::image::Frame;
use nalgebra::Matrix3;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Resamples `frame` through `inverse` (output pixel → input pixel) with
/// bilinear interpolation. Output pixels sampling outside the input are black.
pub fn warp_perspective(frame: &Frame, inverse: &Matrix3<f32>, width: usize, height: usize) -> Frame {
    let render_row = |y: usize| -> Vec<u8> {
        let mut row = vec![0u8; width * 3];
        for x in 0..width {
            if let Some(p) = apply_homography(inverse, [x as f32, y as f32]) {
                if let Some(rgb) = sample_bilinear(frame, p) {
                    row[x * 3..x * 3 + 3].copy_from_slice(&rgb);
                }
            }
        }
        row
    };

    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<u8>> = (0..height).into_par_iter().map(render_row).collect();
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<u8>> = (0..height).map(render_row).collect();

    let data = rows.concat();
    Frame::from_rgb(width, height, data).unwrap_or_else(|| Frame::filled(width, height, [0, 0, 0]))
}

fn sample_bilinear(frame: &Frame, p: [f32; 2]) -> Option<[u8; 3]> {
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 {
        return None;
    }
    // Half a pixel of slack around the border, then clamp onto the grid.
    if p[0] < -0.5 || p[1] < -0.5 || p[0] > w as f32 - 0.5 || p[1] > h as f32 - 0.5 {
        return None;
    }
    let x = p[0].clamp(0.0, (w - 1) as f32);
    let y = p[1].clamp(0.0, (h - 1) as f32);
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = frame.pixel(x0, y0);
    let p10 = frame.pixel(x1, y0);
    let p01 = frame.pixel(x0, y1);
    let p11 = frame.pixel(x1, y1);
    let mut out = [0u8; 3];
    for c in 0..3 {
        let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
        let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_warp_copies_frame() {
        let mut frame = Frame::filled(6, 4, [10, 20, 30]);
        frame.put_pixel(2, 1, [200, 100, 50]);
        frame.put_pixel(5, 3, [1, 2, 3]);
        let out = warp_perspective(&frame, &Matrix3::identity(), 6, 4);
        assert_eq!(out, frame);
    }

    #[test]
    fn samples_outside_input_are_black() {
        let frame = Frame::filled(4, 4, [255, 255, 255]);
        let shift = Matrix3::new(1.0, 0.0, 10.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let out = warp_perspective(&frame, &shift, 4, 4);
        assert!(out.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn half_pixel_offset_interpolates() {
        let mut frame = Frame::filled(2, 1, [0, 0, 0]);
        frame.put_pixel(1, 0, [100, 100, 100]);
        let shift = Matrix3::new(1.0, 0.0, 0.5, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        let out = warp_perspective(&frame, &shift, 1, 1);
        assert_eq!(out.pixel(0, 0), [50, 50, 50]);
    }
}
