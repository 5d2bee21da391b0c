use anyhow::{Context, Result};
use image::RgbImage;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::capture::FrameSource;
use crate::detection::LaserDetector;
use crate::display::{KeyAction, Preview};
use crate::models::{DetectionMethod, LaserColor, LaserPosition};
use crate::overlay::{self, Trail};

pub const SAVED_FRAME_FILENAME: &str = "laser_detection_frame.jpg";

/// Live tracking state: detector, chosen method and the visual trail
pub struct TrackingSession {
    detector: LaserDetector,
    method: DetectionMethod,
    color: LaserColor,
    trail: Trail,
    save_path: PathBuf,
}

impl TrackingSession {
    pub fn new(detector: LaserDetector, method: DetectionMethod, color: LaserColor) -> Self {
        Self {
            detector,
            method,
            color,
            trail: Trail::default(),
            save_path: PathBuf::from(SAVED_FRAME_FILENAME),
        }
    }

    /// Where the `s` key writes the current frame
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn status_line(&self) -> String {
        overlay::status_line(
            self.method,
            self.detector.config().brightness_threshold,
            self.color,
        )
    }

    /// Detect the laser and draw the marker and trail onto the frame
    pub fn process_frame(&mut self, frame: &mut RgbImage) -> Option<LaserPosition> {
        let position = self.detector.detect(frame, self.method, self.color);

        if let Some(pos) = position {
            self.trail.push(pos);
            overlay::draw_marker(frame, pos);
            tracing::debug!("Laser: ({}, {})", pos.x, pos.y);
        }

        overlay::draw_trail(frame, &self.trail);
        position
    }

    pub fn handle(&mut self, action: KeyAction, frame: &RgbImage) -> Result<ControlFlow<()>> {
        match action {
            KeyAction::Quit => return Ok(ControlFlow::Break(())),
            KeyAction::SaveFrame => match save_frame(frame, &self.save_path) {
                Ok(()) => info!("Frame saved as '{}'", self.save_path.display()),
                Err(e) => error!("{e:#}"),
            },
            KeyAction::ClearTrail => {
                self.trail.clear();
                info!("Trail cleared");
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Capture, annotate and display frames until the user quits or capture fails
    pub fn run<S: FrameSource, P: Preview>(&mut self, source: &mut S, preview: &mut P) -> Result<()> {
        info!("Laser pointer detection started on {}", source.describe());
        info!("Press 'q' to quit, 's' to save current frame, 'c' to clear trail");
        preview.set_status(&self.status_line());

        while preview.is_open() {
            let mut frame = match source.next_frame() {
                Ok(frame) => frame,
                Err(e) => {
                    error!("Could not read frame: {e:#}");
                    break;
                }
            };

            self.process_frame(&mut frame);
            preview.show(&frame)?;

            for action in preview.actions() {
                if self.handle(action, &frame)?.is_break() {
                    return Ok(());
                }
            }
        }

        Ok(())
    }
}

/// Write a frame to disk; the format follows the file extension
pub fn save_frame(frame: &RgbImage, path: &Path) -> Result<()> {
    frame
        .save(path)
        .with_context(|| format!("Failed to save frame to {}", path.display()))
}
