//! Image containers used by the pipeline.
//!
//! - [`Frame`]: owned 3-channel RGB frame handed in by the caller.
//! - [`ImageF32`]: single-channel float buffer for numeric stages.
//! - [`Mask`]: owned binary image (0 / 255) produced by the segmentation and
//!   edge stages and consumed by the Hough transform.
pub mod draw;
pub mod f32;
pub mod frame;
pub mod io;
pub mod mask;
pub mod traits;

pub use self::f32::ImageF32;
pub use self::frame::Frame;
pub use self::mask::Mask;
pub use self::traits::{ImageView, ImageViewMut};
