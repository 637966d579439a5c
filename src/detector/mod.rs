//! Line detector facade tying the extraction strategies to the tracker.
//!
//! Per frame:
//! - Crop the configured ROI out of the frame (a copy; the frame itself is
//!   never touched).
//! - Run every extraction strategy on the crop and merge their candidates.
//! - Advance the two-sided tracker with the pooled candidates.
//! - Report both lines in crop and original coordinates.
//!
//! Modules
//! - [`params`] – tuning for the tracker and the extractor.
//! - `pipeline` – the [`LineDetector`] implementation.

pub mod params;
mod pipeline;

pub use params::DetectorParams;
pub use pipeline::LineDetector;
