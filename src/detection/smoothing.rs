use crate::models::LaserPosition;

/// Weight given to the newest detection when blending with the previous one
pub const CURRENT_WEIGHT: f64 = 0.7;
/// Weight given to the previous position
pub const PREVIOUS_WEIGHT: f64 = 0.3;

/// Single-step exponential smoother for the laser position
#[derive(Debug, Clone)]
pub struct PositionSmoother {
    previous: Option<LaserPosition>,
    current_weight: f64,
    previous_weight: f64,
}

impl PositionSmoother {
    /// Create a smoother
    ///
    /// # Arguments
    /// * `current_weight` - Share of the current position in the blend
    /// * `previous_weight` - Share of the previous position in the blend
    pub fn new(current_weight: f64, previous_weight: f64) -> Self {
        Self {
            previous: None,
            current_weight,
            previous_weight,
        }
    }

    /// Blend the current position with the previous output and remember the result
    pub fn smooth(&mut self, current: LaserPosition) -> LaserPosition {
        let smoothed = match self.previous {
            Some(prev) => LaserPosition::new(
                self.blend(current.x, prev.x),
                self.blend(current.y, prev.y),
            ),
            None => current,
        };

        self.previous = Some(smoothed);
        smoothed
    }

    fn blend(&self, current: u32, previous: u32) -> u32 {
        (self.current_weight * current as f64 + self.previous_weight * previous as f64) as u32
    }

    pub fn previous(&self) -> Option<LaserPosition> {
        self.previous
    }

    /// Forget the previous position (e.g. when tracking restarts)
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

impl Default for PositionSmoother {
    fn default() -> Self {
        Self::new(CURRENT_WEIGHT, PREVIOUS_WEIGHT)
    }
}
