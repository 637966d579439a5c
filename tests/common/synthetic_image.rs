use lane_ipm::Frame;

pub const ROAD: [u8; 3] = [90, 90, 90];
pub const PAINT: [u8; 3] = [230, 230, 230];

pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;

/// ROI used with [`road_frame`]: everything below the far end of the lines.
pub const ROI: ([f32; 2], [f32; 2]) = ([0.0, 60.0], [320.0, 240.0]);

/// A painted boundary from `bottom` to `top` (original image coordinates).
#[derive(Clone, Copy, Debug)]
pub struct Boundary {
    pub bottom: [f32; 2],
    pub top: [f32; 2],
}

impl Boundary {
    pub const fn new(bottom: [f32; 2], top: [f32; 2]) -> Self {
        Self { bottom, top }
    }

    /// Same bottom end, far end shifted horizontally by `dx`.
    pub fn lean(self, dx: f32) -> Self {
        Self {
            bottom: self.bottom,
            top: [self.top[0] + dx, self.top[1]],
        }
    }
}

pub const LEFT: Boundary = Boundary::new([80.0, 239.0], [150.0, 60.0]);
pub const RIGHT: Boundary = Boundary::new([240.0, 239.0], [170.0, 60.0]);

/// Control points in the order left-bottom, left-top, right-bottom, right-top.
pub fn control_points(left: Boundary, right: Boundary) -> [[f32; 2]; 4] {
    [left.bottom, left.top, right.bottom, right.top]
}

/// Flat gray road with two thick bright boundaries.
pub fn road_frame(left: Boundary, right: Boundary) -> Frame {
    let mut frame = Frame::filled(WIDTH, HEIGHT, ROAD);
    for b in [left, right] {
        paint_segment(&mut frame, b.bottom, b.top, 2.5);
    }
    frame
}

/// The road without any markings.
pub fn blank_road() -> Frame {
    Frame::filled(WIDTH, HEIGHT, ROAD)
}

fn paint_segment(frame: &mut Frame, a: [f32; 2], b: [f32; 2], half_width: f32) {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len2 = dx * dx + dy * dy;
    assert!(len2 > 0.0, "segment must have non-zero length");
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let (px, py) = (x as f32 - a[0], y as f32 - a[1]);
            let t = ((px * dx + py * dy) / len2).clamp(0.0, 1.0);
            let (ex, ey) = (px - t * dx, py - t * dy);
            if ex * ex + ey * ey <= half_width * half_width {
                frame.put_pixel(x, y, PAINT);
            }
        }
    }
}
