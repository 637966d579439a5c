//! Standard Hough line transform on a binary mask.
//!
//! Every foreground pixel votes for all `(ρ, θ)` bins it lies on, with θ
//! sampled over [0, π) and ρ over `[-diag, diag]`. Bins above the vote
//! threshold that are local maxima within `suppression_radius` become lines.
//! Results are ordered by votes (descending), then θ, then ρ.

use crate::image::ImageView;
use crate::types::PolarLine;
use serde::{Deserialize, Serialize};

/// Options for Hough line detection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Number of votes required to be detected as a line.
    pub vote_threshold: u32,
    /// Angular bin width (degrees).
    pub theta_step_deg: f32,
    /// Distance bin width (pixels).
    pub rho_step: f32,
    /// Only bins with the greatest vote in the `(2r+1)²` block centred on
    /// them are returned. `0` disables suppression.
    pub suppression_radius: u32,
    /// Upper bound on the number of lines returned.
    pub max_lines: usize,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            vote_threshold: 60,
            theta_step_deg: 1.0,
            rho_step: 1.0,
            suppression_radius: 2,
            max_lines: 16,
        }
    }
}

/// A detected line with its accumulator support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HoughLine {
    pub line: PolarLine,
    pub votes: u32,
}

pub fn hough_lines<I>(mask: &I, params: &HoughParams) -> Vec<HoughLine>
where
    I: ImageView<Pixel = u8>,
{
    let (w, h) = (mask.width(), mask.height());
    if w == 0 || h == 0 || params.theta_step_deg <= 0.0 || params.rho_step <= 0.0 {
        return Vec::new();
    }

    let n_theta = ((180.0 / params.theta_step_deg).round() as usize).max(1);
    let theta_step = std::f32::consts::PI / n_theta as f32;
    let rmax = ((w * w + h * h) as f32).sqrt().ceil();
    let n_rho = (2.0 * rmax / params.rho_step).ceil() as usize + 1;

    let (sin_lut, cos_lut): (Vec<f32>, Vec<f32>) = (0..n_theta)
        .map(|t| (t as f32 * theta_step).sin_cos())
        .unzip();

    let mut acc = vec![0u32; n_theta * n_rho];
    for y in 0..h {
        let row = mask.row(y);
        let fy = y as f32;
        for (x, &p) in row.iter().enumerate() {
            if p == 0 {
                continue;
            }
            let fx = x as f32;
            for t in 0..n_theta {
                let r = fx * cos_lut[t] + fy * sin_lut[t];
                let ri = ((r + rmax) / params.rho_step).round();
                if ri >= 0.0 && (ri as usize) < n_rho {
                    acc[t * n_rho + ri as usize] += 1;
                }
            }
        }
    }

    let radius = params.suppression_radius as isize;
    let mut lines = Vec::new();
    for t in 0..n_theta {
        for r in 0..n_rho {
            let votes = acc[t * n_rho + r];
            if votes < params.vote_threshold || votes == 0 {
                continue;
            }
            if radius > 0 && !is_local_max(&acc, n_theta, n_rho, t, r, radius) {
                continue;
            }
            lines.push(HoughLine {
                line: PolarLine::new(r as f32 * params.rho_step - rmax, t as f32 * theta_step),
                votes,
            });
        }
    }

    lines.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then(a.line.theta.total_cmp(&b.line.theta))
            .then(a.line.rho.total_cmp(&b.line.rho))
    });
    lines.truncate(params.max_lines);
    lines
}

/// Strict maximum over later bins, non-strict over earlier ones, so equal
/// neighbouring peaks yield exactly one line.
fn is_local_max(
    acc: &[u32],
    n_theta: usize,
    n_rho: usize,
    t: usize,
    r: usize,
    radius: isize,
) -> bool {
    let votes = acc[t * n_rho + r];
    let here = t * n_rho + r;
    for dt in -radius..=radius {
        let tt = t as isize + dt;
        if tt < 0 || tt >= n_theta as isize {
            continue;
        }
        for dr in -radius..=radius {
            let rr = r as isize + dr;
            if rr < 0 || rr >= n_rho as isize || (dt == 0 && dr == 0) {
                continue;
            }
            let idx = tt as usize * n_rho + rr as usize;
            let other = acc[idx];
            if other > votes || (other == votes && idx < here) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Mask;

    fn params(threshold: u32) -> HoughParams {
        HoughParams {
            vote_threshold: threshold,
            ..Default::default()
        }
    }

    #[test]
    fn finds_single_vertical_line() {
        let mut mask = Mask::new(50, 50);
        for y in 0..50 {
            mask.set(10, y);
        }
        let lines = hough_lines(&mask, &params(40));
        assert_eq!(lines.len(), 1, "{lines:?}");
        assert_eq!(lines[0].votes, 50);
        assert!(lines[0].line.theta.abs() < 1e-6);
        assert!((lines[0].line.rho - 10.0).abs() < 0.5);
    }

    #[test]
    fn orders_lines_by_votes_then_angle() {
        let mut mask = Mask::new(50, 50);
        for y in 0..50 {
            mask.set(10, y);
        }
        for x in 0..50 {
            mask.set(x, 20);
        }
        let lines = hough_lines(&mask, &params(40));
        assert_eq!(lines.len(), 2, "{lines:?}");
        assert!(lines[0].line.theta.abs() < 1e-6);
        let quarter = std::f32::consts::FRAC_PI_2;
        assert!((lines[1].line.theta - quarter).abs() < 1e-4);
        assert!((lines[1].line.rho - 20.0).abs() < 0.5);
    }

    #[test]
    fn empty_mask_yields_nothing() {
        let mask = Mask::new(20, 20);
        assert!(hough_lines(&mask, &params(1)).is_empty());
    }

    #[test]
    fn max_lines_caps_output() {
        let mut mask = Mask::new(60, 60);
        for x in [5usize, 25, 45] {
            for y in 0..60 {
                mask.set(x, y);
            }
        }
        let capped = HoughParams {
            vote_threshold: 50,
            max_lines: 2,
            ..Default::default()
        };
        assert_eq!(hough_lines(&mask, &capped).len(), 2);
    }
}
