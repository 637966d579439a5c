//! Rendering helpers for debug output. Drawing always happens on a copy.
use super::Frame;
use crate::types::PolarLine;

/// Returns a copy of `frame` with `line` drawn in `color`.
pub fn draw_polar_line(frame: &Frame, line: &PolarLine, color: [u8; 3]) -> Frame {
    draw_polar_lines(frame, std::slice::from_ref(line), color)
}

/// Returns a copy of `frame` with each line drawn in `color`.
pub fn draw_polar_lines(frame: &Frame, lines: &[PolarLine], color: [u8; 3]) -> Frame {
    let mut out = frame.clone();
    for line in lines {
        draw_polar_line_mut(&mut out, line, color);
    }
    out
}

fn draw_polar_line_mut(frame: &mut Frame, line: &PolarLine, color: [u8; 3]) {
    let (w, h) = (frame.width(), frame.height());
    if w == 0 || h == 0 {
        return;
    }
    let (sin, cos) = line.theta.sin_cos();
    if cos.abs() >= sin.abs() {
        // Steep: one pixel per row.
        for y in 0..h {
            let x = ((line.rho - y as f32 * sin) / cos).round();
            if x >= 0.0 && (x as usize) < w {
                frame.put_pixel(x as usize, y, color);
            }
        }
    } else {
        for x in 0..w {
            let y = ((line.rho - x as f32 * cos) / sin).round();
            if y >= 0.0 && (y as usize) < h {
                frame.put_pixel(x, y as usize, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_vertical_line_on_copy() {
        let src = Frame::filled(10, 5, [0, 0, 0]);
        let out = draw_polar_lines(&src, &[PolarLine::new(4.0, 0.0)], [255, 0, 0]);
        for y in 0..5 {
            assert_eq!(out.pixel(4, y), [255, 0, 0]);
            assert_eq!(src.pixel(4, y), [0, 0, 0]);
        }
    }
}
