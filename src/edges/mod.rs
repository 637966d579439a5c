//! Edge extraction: Sobel gradients, direction-aligned non-maximum
//! suppression and Canny-style hysteresis producing a binary [`Mask`].
//!
//! Border handling clamps indices in the gradient pass and ignores the
//! outermost one-pixel frame in NMS, so the crop border never produces edges.
//!
//! [`Mask`]: crate::image::Mask

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{canny, CannyParams};
pub use grad::{sobel_gradients, Grad};
pub use nms::{run_nms, EdgeElement};
