use crate::extract::ExtractorParams;
use crate::tracker::TrackerParams;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Jump limits and reset trigger for the two tracked sides.
    pub tracker: TrackerParams,
    /// Which strategies run and how each one is tuned.
    pub extractor: ExtractorParams,
}
