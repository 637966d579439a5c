use super::TimingBreakdown;
use crate::extract::StrategyRun;
use crate::tracker::{SideUpdate, TrackEvent};
use crate::types::{PolarLine, Side};
use serde::Serialize;

/// One side's line after a frame, in both coordinate frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedLine {
    pub side: Side,
    /// Relative to the ROI's top-left corner.
    pub cropped: PolarLine,
    /// Relative to the full frame.
    pub original: PolarLine,
    pub event: TrackEvent,
    /// Angular distance of the accepted candidate (radians).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviation: Option<f32>,
    pub misses: u32,
    pub draw: bool,
}

impl TrackedLine {
    pub(crate) fn from_update(update: &SideUpdate, original: PolarLine) -> Self {
        Self {
            side: update.side,
            cropped: update.line,
            original,
            event: update.event,
            deviation: update.deviation,
            misses: update.misses,
            draw: update.draw,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub frame_index: u64,
    pub left: TrackedLine,
    pub right: TrackedLine,
    /// Size of the deduplicated candidate pool.
    pub candidates: usize,
    pub runs: Vec<StrategyRun>,
    pub timing: TimingBreakdown,
}

impl FrameReport {
    pub fn side(&self, side: Side) -> &TrackedLine {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// True when either side was snapped back to its default this frame.
    pub fn any_reset(&self) -> bool {
        self.left.event == TrackEvent::Reset || self.right.event == TrackEvent::Reset
    }
}
