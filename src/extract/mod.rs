//! Candidate line extraction on the ROI crop.
//!
//! The extractor owns a list of [`LineStrategy`] implementations. Each one
//! turns a cropped colour frame into polar lines in crop coordinates; the
//! extractor concatenates their outputs in strategy order and drops
//! duplicates. There is no voting across strategies: choosing between
//! candidates is the tracker's job.
//!
//! Strategies share no mutable state, so with the `parallel` feature they
//! run on the rayon pool and are joined before the result is returned. The
//! output is the same either way.

pub mod brightness;
pub mod classic;
pub mod region;

pub use brightness::{BrightnessParams, BrightnessStrategy};
pub use classic::{ClassicParams, ClassicStrategy};
pub use region::{RegionCompareParams, RegionCompareStrategy};

use crate::angle::angular_difference;
use crate::hough::HoughLine;
use crate::image::Frame;
use crate::types::PolarLine;
use log::debug;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Capability shared by all extraction strategies.
pub trait LineStrategy: Send + Sync {
    /// Short identifier used in reports and logs.
    fn name(&self) -> &'static str;
    /// Produce candidate lines (crop coordinates) from a cropped frame.
    fn extract(&self, crop: &Frame) -> Vec<HoughLine>;
}

/// A candidate line together with the strategy that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Candidate {
    pub line: PolarLine,
    pub votes: u32,
    pub strategy: &'static str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRun {
    pub strategy: &'static str,
    pub lines: usize,
    pub elapsed_ms: f64,
}

/// Deduplicated candidates plus per-strategy bookkeeping.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePool {
    pub candidates: Vec<Candidate>,
    pub runs: Vec<StrategyRun>,
}

impl CandidatePool {
    pub fn lines(&self) -> Vec<PolarLine> {
        self.candidates.iter().map(|c| c.line).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Tolerances under which two candidates count as the same line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupParams {
    pub rho_tol_px: f32,
    pub theta_tol_deg: f32,
}

impl Default for DedupParams {
    fn default() -> Self {
        Self {
            rho_tol_px: 2.0,
            theta_tol_deg: 1.0,
        }
    }
}

/// Parameters of the default strategy set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorParams {
    pub classic: ClassicParams,
    pub brightness: BrightnessParams,
    pub region: RegionCompareParams,
    pub dedup: DedupParams,
}

pub struct CandidateExtractor {
    strategies: Vec<Box<dyn LineStrategy>>,
    dedup: DedupParams,
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::from_params(&ExtractorParams::default())
    }
}

impl CandidateExtractor {
    /// An extractor without strategies.
    pub fn empty(dedup: DedupParams) -> Self {
        Self {
            strategies: Vec::new(),
            dedup,
        }
    }

    /// The classic, brightness and region-comparison strategies, minus any
    /// disabled in `params`.
    pub fn from_params(params: &ExtractorParams) -> Self {
        let mut ex = Self::empty(params.dedup);
        if params.classic.enabled {
            ex.push(Box::new(ClassicStrategy::new(params.classic)));
        }
        if params.brightness.enabled {
            ex.push(Box::new(BrightnessStrategy::new(params.brightness)));
        }
        if params.region.enabled {
            ex.push(Box::new(RegionCompareStrategy::new(params.region)));
        }
        ex
    }

    pub fn push(&mut self, strategy: Box<dyn LineStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn with_strategy(mut self, strategy: impl LineStrategy + 'static) -> Self {
        self.push(Box::new(strategy));
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Run every strategy on the crop and merge the results.
    pub fn extract(&self, crop: &Frame) -> CandidatePool {
        let run = |s: &Box<dyn LineStrategy>| {
            let start = Instant::now();
            let lines = s.extract(crop);
            (s.name(), lines, start.elapsed().as_secs_f64() * 1000.0)
        };

        #[cfg(feature = "parallel")]
        let outputs: Vec<_> = self.strategies.par_iter().map(run).collect();
        #[cfg(not(feature = "parallel"))]
        let outputs: Vec<_> = self.strategies.iter().map(run).collect();

        let mut pool = CandidatePool::default();
        for (strategy, lines, elapsed_ms) in outputs {
            debug!("strategy {} produced {} lines in {:.2} ms", strategy, lines.len(), elapsed_ms);
            pool.runs.push(StrategyRun {
                strategy,
                lines: lines.len(),
                elapsed_ms,
            });
            for hl in lines {
                let duplicate = pool
                    .candidates
                    .iter()
                    .any(|c| same_line(&c.line, &hl.line, &self.dedup));
                if !duplicate {
                    pool.candidates.push(Candidate {
                        line: hl.line,
                        votes: hl.votes,
                        strategy,
                    });
                }
            }
        }
        pool
    }
}

/// True when two lines agree within the dedup tolerances. Lines on either
/// side of the θ = 0 / π seam carry opposite ρ signs.
pub fn same_line(a: &PolarLine, b: &PolarLine, tol: &DedupParams) -> bool {
    if angular_difference(a.theta, b.theta) > tol.theta_tol_deg.to_radians() {
        return false;
    }
    let b_rho = if (a.theta - b.theta).abs() > FRAC_PI_2 {
        -b.rho
    } else {
        b.rho
    };
    (a.rho - b_rho).abs() <= tol.rho_tol_px
}
