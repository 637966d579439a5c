//! Per-side tracking state.
use crate::angle::angular_difference;
use crate::types::{PolarLine, Side};
use serde::Serialize;

/// What happened to a side on the last frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackEvent {
    /// A candidate was accepted; the miss counter is back to 0.
    Updated,
    /// No candidate was accepted; the last line is kept.
    Missed,
    /// Too many consecutive misses; the side snapped back to its default.
    Reset,
}

/// Persistent state of one tracked line. All lines are in crop coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackState {
    side: Side,
    line: PolarLine,
    default_line: PolarLine,
    /// Current angle (θ of `line`, radians).
    angle: f32,
    default_angle: f32,
    jump_limit: f32,
    misses: u32,
    reset_trigger: u32,
    draw: bool,
}

impl TrackState {
    pub fn seeded(side: Side, default_line: PolarLine, jump_limit_deg: f32, reset_trigger: u32) -> Self {
        Self {
            side,
            line: default_line,
            default_line,
            angle: default_line.theta,
            default_angle: default_line.theta,
            jump_limit: jump_limit_deg.to_radians(),
            misses: 0,
            reset_trigger,
            draw: true,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn line(&self) -> PolarLine {
        self.line
    }

    pub fn default_line(&self) -> PolarLine {
        self.default_line
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn default_angle(&self) -> f32 {
        self.default_angle
    }

    pub fn jump_limit(&self) -> f32 {
        self.jump_limit
    }

    pub fn misses(&self) -> u32 {
        self.misses
    }

    pub fn reset_trigger(&self) -> u32 {
        self.reset_trigger
    }

    pub fn draw(&self) -> bool {
        self.draw
    }

    /// Angular distance of `candidate` from the current angle.
    pub fn deviation(&self, candidate: &PolarLine) -> f32 {
        angular_difference(candidate.theta, self.angle)
    }

    pub fn accepts(&self, candidate: &PolarLine) -> bool {
        self.deviation(candidate) <= self.jump_limit
    }

    pub(crate) fn accept(&mut self, line: PolarLine) {
        self.line = line;
        self.angle = line.theta;
        self.misses = 0;
        self.draw = true;
    }

    pub(crate) fn miss(&mut self) -> TrackEvent {
        self.misses += 1;
        if self.misses > self.reset_trigger {
            self.reset_to_default();
            TrackEvent::Reset
        } else {
            self.draw = true;
            TrackEvent::Missed
        }
    }

    pub(crate) fn reset_to_default(&mut self) {
        self.line = self.default_line;
        self.angle = self.default_angle;
        self.misses = 0;
        self.draw = false;
    }
}
