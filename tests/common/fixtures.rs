use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

use laserspot::LaserPosition;

/// Frame size used by most tests
pub const FRAME_WIDTH: u32 = 200;
pub const FRAME_HEIGHT: u32 = 150;

/// Colour constants for tests
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const PURE_RED: Rgb<u8> = Rgb([255, 0, 0]);
/// Red with a little blue, hue just below 360 degrees (upper red sub-range)
pub const MAGENTA_RED: Rgb<u8> = Rgb([255, 0, 40]);
pub const LASER_GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const DIM_GRAY: Rgb<u8> = Rgb([60, 60, 60]);

/// All-black frame
pub fn dark_frame() -> RgbImage {
    RgbImage::new(FRAME_WIDTH, FRAME_HEIGHT)
}

/// Draws a filled disk onto an existing frame
pub fn draw_disk(frame: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    draw_filled_circle_mut(frame, (cx, cy), radius, color);
}

/// Dark frame with a single disk
pub fn frame_with_disk(cx: i32, cy: i32, radius: i32, color: Rgb<u8>) -> RgbImage {
    let mut frame = dark_frame();
    draw_disk(&mut frame, cx, cy, radius, color);
    frame
}

/// Asserts a position lies within `tolerance` pixels of (x, y)
pub fn assert_near(pos: LaserPosition, x: u32, y: u32, tolerance: f32) {
    let expected = LaserPosition::new(x, y);
    let distance = pos.distance_to(&expected);
    assert!(
        distance <= tolerance,
        "expected ({}, {}) within {}px, got ({}, {}) at {:.2}px",
        x, y, tolerance, pos.x, pos.y, distance
    );
}
