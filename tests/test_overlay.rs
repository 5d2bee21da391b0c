//! Tests for trail bookkeeping and overlay drawing.

mod common;

use common::*;
use image::Rgb;
use laserspot::overlay::{
    draw_marker, draw_trail, status_line, trail_segment_color, Trail, MAX_TRAIL_LENGTH,
};

#[test]
fn test_trail_keeps_most_recent_points() {
    let mut trail = Trail::default();
    for i in 0..60 {
        trail.push(LaserPosition::new(i, i));
    }

    assert_eq!(trail.len(), MAX_TRAIL_LENGTH);
    assert_eq!(trail.points().next(), Some(&LaserPosition::new(10, 10)));
    assert_eq!(trail.points().last(), Some(&LaserPosition::new(59, 59)));

    trail.clear();
    assert!(trail.is_empty());
}

#[test]
fn test_trail_fades_towards_oldest_segment() {
    assert_eq!(trail_segment_color(50, 50), Rgb([0, 255, 0]));
    assert_eq!(trail_segment_color(25, 50), Rgb([0, 127, 0]));
    assert_eq!(trail_segment_color(1, 50), Rgb([0, 5, 0]));
}

#[test]
fn test_marker_drawn_at_position() {
    let mut frame = dark_frame();
    draw_marker(&mut frame, LaserPosition::new(100, 75));

    assert_eq!(*frame.get_pixel(100, 75), Rgb([0, 255, 0]));
    assert_eq!(*frame.get_pixel(110, 75), Rgb([0, 255, 0]));
    // Gap between dot and ring stays untouched
    assert_eq!(*frame.get_pixel(106, 75), Rgb([0, 0, 0]));
    assert_eq!(*frame.get_pixel(10, 10), Rgb([0, 0, 0]));
}

#[test]
fn test_trail_draws_segments() {
    let mut frame = dark_frame();
    let mut trail = Trail::default();
    trail.push(LaserPosition::new(20, 20));
    trail.push(LaserPosition::new(80, 20));

    draw_trail(&mut frame, &trail);

    // One segment out of two points: half intensity
    assert_eq!(*frame.get_pixel(50, 20), Rgb([0, 127, 0]));
    assert_eq!(*frame.get_pixel(50, 21), Rgb([0, 127, 0]));
    assert_eq!(*frame.get_pixel(50, 60), Rgb([0, 0, 0]));
}

#[test]
fn test_single_point_trail_draws_nothing() {
    let mut frame = dark_frame();
    let mut trail = Trail::default();
    trail.push(LaserPosition::new(20, 20));

    draw_trail(&mut frame, &trail);

    assert!(frame.pixels().all(|p| *p == Rgb([0, 0, 0])));
}

#[test]
fn test_status_line() {
    assert_eq!(
        status_line(DetectionMethod::Brightness, 200, LaserColor::Red),
        "Method: brightness | Threshold: 200"
    );
    assert_eq!(
        status_line(DetectionMethod::Hsv, 180, LaserColor::Green),
        "Method: hsv | Threshold: 180 | Color: green"
    );
}
