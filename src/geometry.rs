//! Coordinate bookkeeping between the original frame, the ROI crop and the
//! polar/cartesian line forms.
//!
//! Everything here is a pure function. The crop frame is a translation of the
//! original frame by the ROI's top-left corner, so lines move between the two
//! frames by adjusting ρ only.

use crate::types::{LineCartesian, PolarLine, Roi};

/// Half-length used when turning a polar line into a drawable segment.
pub const ENDPOINT_EXTENT: f32 = 1000.0;

const VERTICAL_EPS: f32 = 1e-6;

/// Converts two points on a line into its normalized polar form.
pub fn cartesian_to_polar(a: [f32; 2], b: [f32; 2]) -> PolarLine {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    if dx.abs() < VERTICAL_EPS {
        // Vertical: the normal is the x axis.
        return PolarLine::new(a[0], 0.0);
    }
    let theta = (dy / dx).atan() + std::f32::consts::FRAC_PI_2;
    let rho = a[0] * theta.cos() + a[1] * theta.sin();
    PolarLine::new(rho, theta)
}

pub fn cartesian_to_polar_line(line: &LineCartesian) -> PolarLine {
    cartesian_to_polar(line.a, line.b)
}

/// Two far-apart points on the line (`±ENDPOINT_EXTENT` from the foot of
/// the normal).
pub fn polar_endpoints(line: &PolarLine) -> LineCartesian {
    polar_endpoints_with_extent(line, ENDPOINT_EXTENT)
}

pub fn polar_endpoints_with_extent(line: &PolarLine, t: f32) -> LineCartesian {
    let (sin, cos) = line.theta.sin_cos();
    let x0 = line.rho * cos;
    let y0 = line.rho * sin;
    LineCartesian {
        a: [x0 - t * sin, y0 + t * cos],
        b: [x0 + t * sin, y0 - t * cos],
    }
}

#[inline]
pub fn crop_to_original(p: [f32; 2], roi: &Roi) -> [f32; 2] {
    let o = roi.top_left();
    [p[0] + o[0], p[1] + o[1]]
}

#[inline]
pub fn original_to_crop(p: [f32; 2], roi: &Roi) -> [f32; 2] {
    let o = roi.top_left();
    [p[0] - o[0], p[1] - o[1]]
}

/// Expresses a crop-frame line in original-image coordinates.
pub fn line_crop_to_original(line: &PolarLine, roi: &Roi) -> PolarLine {
    translate_line(line, roi.top_left())
}

/// Expresses an original-image line in crop-frame coordinates.
pub fn line_original_to_crop(line: &PolarLine, roi: &Roi) -> PolarLine {
    let o = roi.top_left();
    translate_line(line, [-o[0], -o[1]])
}

fn translate_line(line: &PolarLine, offset: [f32; 2]) -> PolarLine {
    let n = line.normal();
    PolarLine::new(line.rho + offset[0] * n[0] + offset[1] * n[1], line.theta)
}

/// Point where the line crosses the horizontal row `y`, or `None` for
/// (near) horizontal lines.
pub fn intersect_row(line: &PolarLine, y: f32) -> Option<[f32; 2]> {
    let (sin, cos) = line.theta.sin_cos();
    if cos.abs() < VERTICAL_EPS {
        return None;
    }
    Some([(line.rho - y * sin) / cos, y])
}

/// Intersection of two lines, `None` when parallel.
pub fn intersect_lines(l1: &PolarLine, l2: &PolarLine) -> Option<[f32; 2]> {
    let (s1, c1) = l1.theta.sin_cos();
    let (s2, c2) = l2.theta.sin_cos();
    let det = c1 * s2 - s1 * c2;
    if det.abs() < VERTICAL_EPS {
        return None;
    }
    Some([
        (l1.rho * s2 - l2.rho * s1) / det,
        (c1 * l2.rho - c2 * l1.rho) / det,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::angular_difference;

    fn approx(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    fn roi() -> Roi {
        Roi::new([37.0, 112.0], [600.0, 470.0]).unwrap()
    }

    #[test]
    fn crop_round_trip_is_exact() {
        let r = roi();
        for p in [[0.0, 0.0], [12.5, 300.25], [-40.0, 7.0], [1000.0, -3.0]] {
            let back = crop_to_original(original_to_crop(p, &r), &r);
            assert_eq!(back, p);
        }
    }

    #[test]
    fn vertical_line_takes_dedicated_branch() {
        let l = cartesian_to_polar([42.0, 0.0], [42.0, 100.0]);
        assert!(approx(l.theta, 0.0, 1e-6));
        assert!(approx(l.rho, 42.0, 1e-4));
    }

    #[test]
    fn horizontal_line_has_quarter_turn_normal() {
        let l = cartesian_to_polar([0.0, 5.0], [10.0, 5.0]);
        assert!(approx(l.theta, std::f32::consts::FRAC_PI_2, 1e-5));
        assert!(approx(l.rho, 5.0, 1e-4));
    }

    #[test]
    fn polar_round_trip_through_endpoints() {
        let cases = [
            ([80.0, 239.0], [150.0, 60.0]),
            ([240.0, 239.0], [170.0, 60.0]),
            ([0.0, 0.0], [10.0, 3.0]),
            ([-5.0, 20.0], [30.0, -12.0]),
        ];
        for (a, b) in cases {
            let first = cartesian_to_polar(a, b);
            let ends = polar_endpoints(&first);
            let second = cartesian_to_polar(ends.a, ends.b);
            assert!(
                angular_difference(first.theta, second.theta) < 1e-4,
                "theta {} vs {}",
                first.theta,
                second.theta
            );
            assert!(approx(first.rho, second.rho, 1e-2), "rho {} vs {}", first.rho, second.rho);
        }
    }

    #[test]
    fn both_input_points_lie_on_polar_line() {
        let a = [80.0, 239.0];
        let b = [150.0, 60.0];
        let l = cartesian_to_polar(a, b);
        assert!(l.signed_distance(a).abs() < 1e-3);
        assert!(l.signed_distance(b).abs() < 1e-3);
    }

    #[test]
    fn line_translation_matches_point_translation() {
        let r = roi();
        let a = [100.0, 150.0];
        let b = [180.0, 400.0];
        let orig = cartesian_to_polar(a, b);
        let crop = line_original_to_crop(&orig, &r);
        assert!(crop.signed_distance(original_to_crop(a, &r)).abs() < 1e-3);
        assert!(crop.signed_distance(original_to_crop(b, &r)).abs() < 1e-3);
        let back = line_crop_to_original(&crop, &r);
        assert!(approx(back.rho, orig.rho, 1e-3));
        assert!(approx(back.theta, orig.theta, 1e-6));
    }

    #[test]
    fn row_intersection() {
        let l = cartesian_to_polar([0.0, 0.0], [10.0, 10.0]);
        let p = intersect_row(&l, 7.0).unwrap();
        assert!(approx(p[0], 7.0, 1e-4));
        let horizontal = PolarLine::new(3.0, std::f32::consts::FRAC_PI_2);
        assert!(intersect_row(&horizontal, 1.0).is_none());
    }

    #[test]
    fn lines_intersect_at_common_point() {
        let l1 = cartesian_to_polar([0.0, 0.0], [10.0, 10.0]);
        let l2 = cartesian_to_polar([0.0, 10.0], [10.0, 0.0]);
        let p = intersect_lines(&l1, &l2).unwrap();
        assert!(approx(p[0], 5.0, 1e-3) && approx(p[1], 5.0, 1e-3));
    }
}
