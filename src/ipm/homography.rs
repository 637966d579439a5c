//! Four-point perspective transform and point mapping.
use crate::error::CalibrationError;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f32 = 1e-9;

/// Twice the triangle area below which three points count as collinear,
/// relative to the squared extent of the point set.
const COLLINEAR_REL_AREA: f64 = 1e-4;

/// Which point triples of a quadrilateral to test for collinearity.
const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// Returns the first nearly-collinear triple of `pts`, if any.
pub fn degenerate_triple(pts: &[[f32; 2]; 4]) -> Option<[usize; 3]> {
    let p: Vec<[f64; 2]> = pts.iter().map(|q| [q[0] as f64, q[1] as f64]).collect();
    let mut extent = 0.0f64;
    for i in 0..4 {
        for j in i + 1..4 {
            let d = (p[i][0] - p[j][0]).powi(2) + (p[i][1] - p[j][1]).powi(2);
            extent = extent.max(d);
        }
    }
    if !extent.is_finite() || extent == 0.0 {
        return Some(TRIPLES[0]);
    }
    TRIPLES.into_iter().find(|&[a, b, c]| {
        let cross = (p[b][0] - p[a][0]) * (p[c][1] - p[a][1])
            - (p[b][1] - p[a][1]) * (p[c][0] - p[a][0]);
        cross.abs() <= COLLINEAR_REL_AREA * extent
    })
}

/// Solves the homography `H` with `H·src[i] ~ dst[i]` and `H[2,2] = 1`.
///
/// The 8×8 linear system is assembled and solved in `f64`; the result is
/// returned in `f32` like every other matrix in the crate.
pub fn perspective_transform(
    src: &[[f32; 2]; 4],
    dst: &[[f32; 2]; 4],
) -> Result<Matrix3<f32>, CalibrationError> {
    if let Some(indices) = degenerate_triple(src) {
        return Err(CalibrationError::DegenerateSource { indices });
    }
    if let Some(indices) = degenerate_triple(dst) {
        return Err(CalibrationError::DegenerateDestination { indices });
    }

    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let (x, y) = (src[i][0] as f64, src[i][1] as f64);
        let (u, v) = (dst[i][0] as f64, dst[i][1] as f64);
        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -x * u;
        a[(r, 7)] = -y * u;
        b[r] = u;
        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -x * v;
        a[(r + 1, 7)] = -y * v;
        b[r + 1] = v;
    }
    let h = a.lu().solve(&b).ok_or(CalibrationError::Singular)?;
    if h.iter().any(|v| !v.is_finite()) {
        return Err(CalibrationError::Singular);
    }
    let m = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
    Ok(m.cast::<f32>())
}

/// Maps one point; `None` when it lands at infinity.
#[inline]
pub fn apply_homography(h: &Matrix3<f32>, p: [f32; 2]) -> Option<[f32; 2]> {
    let v = h * Vector3::new(p[0], p[1], 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some([v[0] / w, v[1] / w])
}

/// Maps all points, failing if any of them lands at infinity.
pub fn apply_homography_points(h: &Matrix3<f32>, pts: &[[f32; 2]]) -> Option<Vec<[f32; 2]>> {
    pts.iter().map(|&p| apply_homography(h, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 2], b: [f32; 2], tol: f32) -> bool {
        (a[0] - b[0]).abs() < tol && (a[1] - b[1]).abs() < tol
    }

    #[test]
    fn solves_pure_scaling() {
        let src = [[0.0, 0.0], [100.0, 0.0], [0.0, 100.0], [100.0, 100.0]];
        let dst = [[0.0, 0.0], [200.0, 0.0], [0.0, 200.0], [200.0, 200.0]];
        let h = perspective_transform(&src, &dst).unwrap();
        let p = apply_homography(&h, [50.0, 25.0]).unwrap();
        assert!(close(p, [100.0, 50.0], 1e-3), "{p:?}");
    }

    #[test]
    fn maps_trapezoid_corners_exactly() {
        let src = [[200.0, 400.0], [440.0, 400.0], [280.0, 300.0], [360.0, 300.0]];
        let dst = [[220.0, 480.0], [420.0, 480.0], [220.0, 0.0], [420.0, 0.0]];
        let h = perspective_transform(&src, &dst).unwrap();
        let mapped = apply_homography_points(&h, &src).unwrap();
        for (m, d) in mapped.iter().zip(dst.iter()) {
            assert!(close(*m, *d, 1e-2), "{m:?} vs {d:?}");
        }
    }

    #[test]
    fn rejects_collinear_source() {
        let line = [[0.0, 0.0], [10.0, 10.0], [20.0, 20.0], [30.0, 30.0]];
        let sq = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];
        assert!(matches!(
            perspective_transform(&line, &sq),
            Err(CalibrationError::DegenerateSource { .. })
        ));
        let three = [[0.0, 0.0], [10.0, 0.0], [20.0, 0.0], [5.0, 50.0]];
        assert_eq!(degenerate_triple(&three), Some([0, 1, 2]));
        assert!(matches!(
            perspective_transform(&sq, &three),
            Err(CalibrationError::DegenerateDestination { .. })
        ));
    }

    /// `[0, 1, 2]` bends away from a straight line by `offset` pixels; the
    /// other triples are well spread.
    fn bent_quad(offset: f32) -> [[f32; 2]; 4] {
        [[0.0, 0.0], [100.0, 0.0], [200.0, offset], [100.0, 100.0]]
    }

    #[test]
    fn nearly_collinear_source_is_rejected() {
        // Twice the area is 100·offset against a limit of about 4.
        let src = bent_quad(0.03);
        assert_eq!(degenerate_triple(&src), Some([0, 1, 2]));
        let dst = src.map(|p| [p[0] * 2.0, p[1] * 2.0]);
        assert!(matches!(
            perspective_transform(&src, &dst),
            Err(CalibrationError::DegenerateSource { indices: [0, 1, 2] })
        ));
    }

    #[test]
    fn slightly_bent_source_still_calibrates() {
        let src = bent_quad(0.05);
        assert_eq!(degenerate_triple(&src), None);
        let dst = src.map(|p| [p[0] * 2.0, p[1] * 2.0]);
        let h = perspective_transform(&src, &dst).unwrap();
        let p = apply_homography(&h, [50.0, 50.0]).unwrap();
        assert!(close(p, [100.0, 100.0], 1e-2), "{p:?}");
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let same = [[3.0, 3.0]; 4];
        assert!(degenerate_triple(&same).is_some());
    }
}
