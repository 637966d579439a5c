//! Owned interleaved RGB frame.
//!
//! A frame is never mutated by the pipeline. Cropping copies the ROI into a
//! new frame so each extraction strategy can work on its own buffer.
use crate::types::Roi;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Frame {
    /// Wraps raw RGB bytes. Returns `None` when `data` does not hold exactly
    /// `width * height * 3` bytes.
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height * 3).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// A frame filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&rgb);
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = (y * self.width + x) * 3;
        self.data[i..i + 3].copy_from_slice(&rgb);
    }

    /// RGB row `y` as a flat byte slice.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width * 3;
        &self.data[start..start + self.width * 3]
    }

    /// Copies the ROI out of the frame. The caller checks that the ROI fits.
    pub fn crop(&self, roi: &Roi) -> Frame {
        let (x0, y0, x1, y1) = roi.pixel_bounds();
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        let w = x1.saturating_sub(x0);
        let h = y1.saturating_sub(y0);
        let mut data = Vec::with_capacity(w * h * 3);
        for y in y0..y0 + h {
            let row = self.row(y);
            data.extend_from_slice(&row[x0 * 3..x1 * 3]);
        }
        Frame {
            width: w,
            height: h,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_copies_the_roi() {
        let mut f = Frame::filled(8, 6, [0, 0, 0]);
        f.put_pixel(3, 2, [1, 2, 3]);
        let roi = Roi::new([2.0, 1.0], [6.0, 5.0]).unwrap();
        let c = f.crop(&roi);
        assert_eq!((c.width(), c.height()), (4, 4));
        assert_eq!(c.pixel(1, 1), [1, 2, 3]);
        // The source is untouched by cropping.
        assert_eq!(f.pixel(3, 2), [1, 2, 3]);
    }

    #[test]
    fn from_rgb_checks_length() {
        assert!(Frame::from_rgb(2, 2, vec![0; 12]).is_some());
        assert!(Frame::from_rgb(2, 2, vec![0; 11]).is_none());
    }
}
