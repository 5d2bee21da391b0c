mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from laserspot for tests
pub use laserspot::{
    DetectionMethod, DetectorConfig, LaserColor, LaserDetector, LaserPosition,
};
