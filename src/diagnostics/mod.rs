//! Per-frame reporting for the line detector.
//!
//! [`FrameReport`] is what [`LineDetector::process`](crate::LineDetector::process)
//! returns: both tracked lines in crop and original coordinates, the tracker
//! event per side, the candidate pool summary and stage timings.

pub mod frame;
pub mod timing;

pub use frame::{FrameReport, TrackedLine};
pub use timing::{Stage, StageTiming, TimingBreakdown};
