//! Two-sided line tracker with hysteresis.
//!
//! Each side (left, right) moves through the same states independently:
//!
//! - **Uninitialized** until [`LineTracker::seed`] supplies the default lines.
//! - **Tracking**: every frame, each candidate is compared against both
//!   sides' current angles. A candidate inside a side's jump limit competes
//!   for that side; the smallest angular deviation wins. A candidate that
//!   fits both windows goes to the side it deviates less from (left on a
//!   tie), and one that fits neither is discarded.
//! - **Miss**: a side without an accepted candidate keeps its last line and
//!   increments its miss counter.
//! - **Reset**: once the counter exceeds `reset_trigger` the side snaps back
//!   to its default line and angle, the counter returns to 0 and the draw
//!   flag is cleared for that frame.
//!
//! [`LineTracker::update`] completes all of this for a frame before it
//! returns, so the next frame always sees the post-reset state.

mod params;
mod state;
#[cfg(test)]
mod tests;

pub use params::TrackerParams;
pub use state::{TrackEvent, TrackState};

use crate::error::ConfigurationError;
use crate::types::{PolarLine, Side};
use log::{debug, info};
use serde::Serialize;

/// Result of one frame for one side.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideUpdate {
    pub side: Side,
    pub event: TrackEvent,
    /// Current line in crop coordinates.
    pub line: PolarLine,
    /// Deviation of the accepted candidate (radians), if any.
    pub deviation: Option<f32>,
    pub misses: u32,
    pub draw: bool,
}

#[derive(Clone, Debug)]
pub struct LineTracker {
    params: TrackerParams,
    sides: Option<[TrackState; 2]>,
}

impl LineTracker {
    pub fn new(params: TrackerParams) -> Result<Self, ConfigurationError> {
        params.validate()?;
        Ok(Self {
            params,
            sides: None,
        })
    }

    pub fn params(&self) -> &TrackerParams {
        &self.params
    }

    /// Seeds (or re-seeds) both sides with their default lines in crop
    /// coordinates.
    pub fn seed(&mut self, left: PolarLine, right: PolarLine) {
        self.sides = Some([
            TrackState::seeded(
                Side::Left,
                left,
                self.params.angle_jump_limit_left_deg,
                self.params.reset_trigger,
            ),
            TrackState::seeded(
                Side::Right,
                right,
                self.params.angle_jump_limit_right_deg,
                self.params.reset_trigger,
            ),
        ]);
    }

    pub fn is_seeded(&self) -> bool {
        self.sides.is_some()
    }

    pub fn state(&self, side: Side) -> Option<&TrackState> {
        self.sides.as_ref().map(|s| &s[side.index()])
    }

    /// Snaps both sides back to their defaults.
    pub fn reset_to_default(&mut self) {
        if let Some(sides) = self.sides.as_mut() {
            for s in sides.iter_mut() {
                s.reset_to_default();
            }
        }
    }

    /// Consumes one frame's candidate pool and advances both sides.
    pub fn update(&mut self, candidates: &[PolarLine]) -> Result<[SideUpdate; 2], ConfigurationError> {
        let sides = self
            .sides
            .as_mut()
            .ok_or(ConfigurationError::MissingDefaultLines)?;

        let best = select_candidates(sides, candidates);

        let mut out = [Side::Left, Side::Right].map(|side| SideUpdate {
            side,
            event: TrackEvent::Missed,
            line: sides[side.index()].line(),
            deviation: None,
            misses: 0,
            draw: true,
        });

        for side in Side::BOTH {
            let state = &mut sides[side.index()];
            let update = &mut out[side.index()];
            match best[side.index()] {
                Some((idx, dev)) => {
                    state.accept(candidates[idx]);
                    update.event = TrackEvent::Updated;
                    update.deviation = Some(dev);
                    debug!(
                        "{:?} line updated: theta={:.2}deg rho={:.1} (deviation {:.2}deg)",
                        side,
                        candidates[idx].theta_deg(),
                        candidates[idx].rho,
                        dev.to_degrees()
                    );
                }
                None => {
                    let misses_before = state.misses() + 1;
                    update.event = state.miss();
                    if update.event == TrackEvent::Reset {
                        info!(
                            "{:?} line reset to default after {} consecutive misses",
                            side, misses_before
                        );
                    }
                }
            }
            update.line = state.line();
            update.misses = state.misses();
            update.draw = state.draw();
        }
        Ok(out)
    }
}

/// Best `(candidate index, deviation)` per side.
fn select_candidates(sides: &[TrackState; 2], candidates: &[PolarLine]) -> [Option<(usize, f32)>; 2] {
    let mut best: [Option<(usize, f32)>; 2] = [None, None];
    for (i, c) in candidates.iter().enumerate() {
        let dl = sides[0].deviation(c);
        let dr = sides[1].deviation(c);
        let (side, dev) = match (sides[0].accepts(c), sides[1].accepts(c)) {
            (true, true) if dl <= dr => (Side::Left, dl),
            (true, true) => (Side::Right, dr),
            (true, false) => (Side::Left, dl),
            (false, true) => (Side::Right, dr),
            (false, false) => continue,
        };
        let slot = &mut best[side.index()];
        if slot.map_or(true, |(_, d)| dev < d) {
            *slot = Some((i, dev));
        }
    }
    best
}
