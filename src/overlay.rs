use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use std::collections::VecDeque;

use crate::models::{DetectionMethod, LaserColor, LaserPosition};

pub const MAX_TRAIL_LENGTH: usize = 50;

const MARKER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const MARKER_RADIUS: i32 = 10;
const MARKER_DOT_RADIUS: i32 = 3;

/// Recent laser positions, oldest first
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<LaserPosition>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, position: LaserPosition) {
        self.points.push_back(position);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> impl Iterator<Item = &LaserPosition> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(MAX_TRAIL_LENGTH)
    }
}

/// Ring plus centre dot around the detected position
pub fn draw_marker(frame: &mut RgbImage, position: LaserPosition) {
    let center = (position.x as i32, position.y as i32);

    // 2px ring
    draw_hollow_circle_mut(frame, center, MARKER_RADIUS, MARKER_COLOR);
    draw_hollow_circle_mut(frame, center, MARKER_RADIUS - 1, MARKER_COLOR);
    draw_filled_circle_mut(frame, center, MARKER_DOT_RADIUS, MARKER_COLOR);
}

/// Green intensity of the i-th segment (1-based); older segments are darker
pub fn trail_segment_color(index: usize, len: usize) -> Rgb<u8> {
    let alpha = index as f32 / len as f32;
    Rgb([0, (255.0 * alpha) as u8, 0])
}

/// Connect consecutive trail points, fading towards the oldest
pub fn draw_trail(frame: &mut RgbImage, trail: &Trail) {
    let points: Vec<&LaserPosition> = trail.points().collect();
    let len = points.len();

    for i in 1..len {
        let color = trail_segment_color(i, len);
        let (a, b) = (points[i - 1], points[i]);
        let start = (a.x as f32, a.y as f32);
        let end = (b.x as f32, b.y as f32);

        draw_line_segment_mut(frame, start, end, color);
        // Second pass offset by one pixel for a 2px line
        let dx = (b.x as f32 - a.x as f32).abs();
        let dy = (b.y as f32 - a.y as f32).abs();
        let (ox, oy) = if dx >= dy { (0.0, 1.0) } else { (1.0, 0.0) };
        draw_line_segment_mut(
            frame,
            (start.0 + ox, start.1 + oy),
            (end.0 + ox, end.1 + oy),
            color,
        );
    }
}

/// Summary of the active detection settings
pub fn status_line(method: DetectionMethod, threshold: u8, color: LaserColor) -> String {
    let mut line = format!("Method: {} | Threshold: {}", method.name(), threshold);
    if method == DetectionMethod::Hsv {
        line.push_str(&format!(" | Color: {}", color.name()));
    }
    line
}
