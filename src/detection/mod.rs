pub mod preprocessing;
pub mod contours;
pub mod smoothing;

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::debug::DebugSink;
use crate::models::{Blob, Detection, DetectionMethod, LaserColor, LaserPosition};
use smoothing::PositionSmoother;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("minimum area {min} is larger than maximum area {max}")]
    AreaRange { min: f64, max: f64 },
    #[error("blob areas must not be negative (got {0})")]
    NegativeArea(f64),
    #[error("blob areas must be finite numbers (got {0})")]
    NotFinite(f64),
}

/// Blob filtering parameters shared by both detection methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    pub min_area: f64,
    pub max_area: f64,
    pub brightness_threshold: u8,
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for area in [self.min_area, self.max_area] {
            if !area.is_finite() {
                return Err(ConfigError::NotFinite(area));
            }
            if area < 0.0 {
                return Err(ConfigError::NegativeArea(area));
            }
        }
        if self.min_area > self.max_area {
            return Err(ConfigError::AreaRange {
                min: self.min_area,
                max: self.max_area,
            });
        }
        Ok(())
    }

    pub fn accepts_area(&self, area: f64) -> bool {
        area >= self.min_area && area <= self.max_area
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_area: 10.0,
            max_area: 500.0,
            brightness_threshold: 200,
        }
    }
}

/// Locates a laser dot in camera frames
pub struct LaserDetector {
    config: DetectorConfig,
    smoother: PositionSmoother,
    debug: Option<DebugSink>,
}

impl LaserDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            config,
            smoother: PositionSmoother::default(),
            debug: None,
        }
    }

    /// Save intermediate images of every detection into the sink
    pub fn with_debug(mut self, sink: DebugSink) -> Self {
        self.debug = Some(sink);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Last smoothed position from the brightness detector
    pub fn previous_position(&self) -> Option<LaserPosition> {
        self.smoother.previous()
    }

    pub fn reset(&mut self) {
        self.smoother.reset();
    }

    /// Run the selected detection method on a frame
    pub fn detect(
        &mut self,
        frame: &RgbImage,
        method: DetectionMethod,
        color: LaserColor,
    ) -> Option<LaserPosition> {
        self.locate(frame, method, color).map(|d| d.position)
    }

    /// Like `detect`, but also reports the area and brightness of the chosen blob
    pub fn locate(
        &mut self,
        frame: &RgbImage,
        method: DetectionMethod,
        color: LaserColor,
    ) -> Option<Detection> {
        match method {
            DetectionMethod::Brightness => self.locate_bright(frame),
            DetectionMethod::Hsv => self.locate_hsv(frame, color),
        }
    }

    /// Find the brightest blob in the frame and return its smoothed centroid
    pub fn detect_laser(&mut self, frame: &RgbImage) -> Option<LaserPosition> {
        self.locate_bright(frame).map(|d| d.position)
    }

    /// Find the largest blob of the given laser colour and return its centroid
    pub fn detect_laser_hsv(&mut self, frame: &RgbImage, color: LaserColor) -> Option<LaserPosition> {
        self.locate_hsv(frame, color).map(|d| d.position)
    }

    fn locate_bright(&mut self, frame: &RgbImage) -> Option<Detection> {
        let gray = preprocessing::to_grayscale(frame);
        let blurred = preprocessing::apply_blur(&gray);
        let thresh = preprocessing::threshold_bright(&blurred, self.config.brightness_threshold);

        self.save_debug(1, "grayscale", &gray);
        self.save_debug(2, "gaussian blur", &blurred);
        self.save_debug(3, "threshold", &thresh);

        let blobs = contours::find_external_blobs(&thresh);
        debug!("found {} bright contours", blobs.len());

        let candidates = blobs.into_iter().filter_map(|blob| {
            let area = blob.area();
            if !self.config.accepts_area(area) {
                return None;
            }
            let brightness = blob.average_brightness(&gray);
            Some((blob, area, brightness))
        });
        let (blob, area, brightness) = first_max_by_key(candidates, |c| c.2)?;

        let centroid = match blob.centroid() {
            Some(c) => c,
            None => {
                debug!("brightest contour is degenerate, skipping");
                return None;
            }
        };

        Some(Detection {
            position: self.smoother.smooth(centroid),
            area,
            brightness,
        })
    }

    fn locate_hsv(&mut self, frame: &RgbImage, color: LaserColor) -> Option<Detection> {
        let raw_mask = preprocessing::hsv_mask(frame, color.hsv_ranges());
        let mask = preprocessing::denoise_mask(&raw_mask);

        self.save_debug(1, &format!("{} mask", color.name()), &raw_mask);
        self.save_debug(2, "denoised mask", &mask);

        let largest: Blob = first_max_by_key(contours::find_external_blobs(&mask), Blob::area)?;

        let area = largest.area();
        if !self.config.accepts_area(area) {
            debug!("largest {} contour has area {:.1}, outside range", color.name(), area);
            return None;
        }

        let position = largest.centroid()?;

        Some(Detection {
            position,
            area,
            brightness: preprocessing::bbox_brightness(frame, &largest),
        })
    }

    fn save_debug(&self, step_index: usize, step_name: &str, image: &GrayImage) {
        if let Some(sink) = &self.debug {
            if let Err(e) = sink.save(step_index, step_name, image) {
                warn!("could not write debug output: {e:#}");
            }
        }
    }
}

/// Item with the greatest key; on ties the earliest one wins
fn first_max_by_key<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Option<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
{
    items
        .into_iter()
        .fold(None, |best: Option<(T, K)>, item| {
            let k = key(&item);
            match best {
                Some((b, bk)) if bk >= k => Some((b, bk)),
                _ => Some((item, k)),
            }
        })
        .map(|(item, _)| item)
}

impl Default for LaserDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}
