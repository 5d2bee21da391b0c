pub mod capture;
pub mod debug;
pub mod detection;
pub mod display;
pub mod models;
pub mod overlay;
pub mod spell;
pub mod tracker;

pub use models::{Blob, Detection, DetectionMethod, LaserColor, LaserPosition, Moments};
pub use detection::{ConfigError, DetectorConfig, LaserDetector};
pub use tracker::TrackingSession;
