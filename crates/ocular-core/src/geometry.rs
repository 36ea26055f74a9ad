//! Screen geometry and movement vectors

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Size of the monitor a recording was collected on, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    /// Create a screen size, rejecting non-positive dimensions
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Identity scale, for positions that are already in signal units
    pub fn unit() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
        }
    }

    /// Check both dimensions are positive and finite
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::non_positive("screen width", self.width));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::non_positive("screen height", self.height));
        }
        Ok(())
    }

    /// Scale a displacement given in normalised screen coordinates
    pub fn scale(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx * self.width, dy * self.height)
    }
}

impl From<(f64, f64)> for ScreenSize {
    fn from((width, height): (f64, f64)) -> Self {
        Self { width, height }
    }
}

/// Euclidean length of a displacement
pub fn movement_magnitude(dx: f64, dy: f64) -> f64 {
    dx.hypot(dy)
}

/// Direction of a displacement in degrees, within `[0, 360)`
///
/// Screen coordinates grow downwards, so the vertical component is negated:
/// a movement to the right is 0°, upwards is 90°, to the left is 180°.
pub fn movement_direction(dx: f64, dy: f64) -> f64 {
    let degrees = (-dy.atan2(dx)).to_degrees();
    (degrees + 360.0) % 360.0
}
