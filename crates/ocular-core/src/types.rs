//! Types used for ocular event detection

use crate::error::{Error, Result};
use crate::geometry::{movement_direction, movement_magnitude, ScreenSize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of an annotated eye-tracker stream
///
/// Fixation and blink ids are assigned by the tracker's internal filter;
/// a blink id of 0 means the sample is not part of a blink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazeSample {
    /// Sample timestamp in seconds
    pub time: f64,
    /// Point of gaze, horizontal, normalised to the screen when valid
    pub pog_x: f64,
    /// Point of gaze, vertical, normalised to the screen when valid
    pub pog_y: f64,
    /// Whether the tracker marked the point of gaze as valid
    pub pog_valid: bool,
    /// Accumulated duration of the current fixation in seconds
    pub fixation_duration: f64,
    /// Fixation group id, non-decreasing over the stream
    pub fixation_id: u64,
    /// Blink group id, 0 outside blinks
    pub blink_id: u64,
    /// Duration of the last blink, populated on the row after it ends
    pub blink_duration: f64,
}

/// Borrowed two-channel EOG recording
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EogSignals<'a> {
    vertical: &'a [f64],
    horizontal: &'a [f64],
}

impl<'a> EogSignals<'a> {
    /// Pair a vertical and a horizontal channel of equal length
    pub fn new(vertical: &'a [f64], horizontal: &'a [f64]) -> Result<Self> {
        if vertical.len() != horizontal.len() {
            return Err(Error::size_mismatch(
                vertical.len(),
                horizontal.len(),
                "horizontal EOG channel",
            ));
        }
        Ok(Self {
            vertical,
            horizontal,
        })
    }

    pub fn vertical(&self) -> &'a [f64] {
        self.vertical
    }

    pub fn horizontal(&self) -> &'a [f64] {
        self.horizontal
    }

    /// Number of samples per channel
    pub fn len(&self) -> usize {
        self.vertical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertical.is_empty()
    }
}

/// A period where gaze stays on one point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fixation {
    /// Horizontal position (screen fraction or horizontal channel units)
    pub x: f64,
    /// Vertical position (screen fraction or vertical channel units)
    pub y: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Start time in seconds since the start of the recording
    pub start_time: f64,
}

impl Fixation {
    pub fn new(x: f64, y: f64, duration: f64, start_time: f64) -> Self {
        Self {
            x,
            y,
            duration,
            start_time,
        }
    }

    /// Time at which the fixation ends
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Check if the position lies on the unit screen square
    pub fn is_on_screen(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// `[x, y, duration, start_time]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.duration, self.start_time]
    }
}

impl fmt::Display for Fixation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fixation {{ at: ({:.3}, {:.3}), duration: {:.3}s, start: {:.3}s }}",
            self.x, self.y, self.duration, self.start_time
        )
    }
}

/// A rapid movement between two gaze positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Saccade {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Start time in seconds since the start of the recording
    pub start_time: f64,
    /// Length of the movement (pixels or channel units)
    pub magnitude: f64,
    /// Direction of the movement in degrees, `[0, 360)`
    pub direction: f64,
}

impl Saccade {
    /// Build a saccade between two positions
    ///
    /// The displacement is scaled by `scale` before magnitude and direction
    /// are computed. Positions are stored unscaled.
    pub fn between(
        start: (f64, f64),
        end: (f64, f64),
        duration: f64,
        start_time: f64,
        scale: ScreenSize,
    ) -> Self {
        let (dx, dy) = scale.scale(end.0 - start.0, end.1 - start.1);
        Self {
            start_x: start.0,
            start_y: start.1,
            end_x: end.0,
            end_y: end.1,
            duration,
            start_time,
            magnitude: movement_magnitude(dx, dy),
            direction: movement_direction(dx, dy),
        }
    }

    /// Check if the movement goes against the reading direction
    /// (strictly between 90° and 270°)
    pub fn is_regression(&self) -> bool {
        90.0 < self.direction && self.direction < 270.0
    }

    /// `[start_x, start_y, end_x, end_y, duration, start_time, magnitude, direction]`
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.start_x,
            self.start_y,
            self.end_x,
            self.end_y,
            self.duration,
            self.start_time,
            self.magnitude,
            self.direction,
        ]
    }
}

impl fmt::Display for Saccade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Saccade {{ from: ({:.3}, {:.3}), to: ({:.3}, {:.3}), duration: {:.3}s, start: {:.3}s, magnitude: {:.3}, direction: {:.1}° }}",
            self.start_x,
            self.start_y,
            self.end_x,
            self.end_y,
            self.duration,
            self.start_time,
            self.magnitude,
            self.direction
        )
    }
}

/// A period of signal loss caused by eyelid closure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blink {
    /// Duration in seconds
    pub duration: f64,
    /// Start time in seconds since the start of the recording
    pub start_time: f64,
}

impl Blink {
    pub fn new(duration: f64, start_time: f64) -> Self {
        Self {
            duration,
            start_time,
        }
    }

    /// `[duration, start_time]`
    pub fn to_array(&self) -> [f64; 2] {
        [self.duration, self.start_time]
    }
}

impl fmt::Display for Blink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Blink {{ duration: {:.3}s, start: {:.3}s }}",
            self.duration, self.start_time
        )
    }
}

/// Events found in one recording, each list in chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcularEvents {
    pub fixations: Vec<Fixation>,
    pub saccades: Vec<Saccade>,
    pub blinks: Vec<Blink>,
}

impl OcularEvents {
    pub fn new(fixations: Vec<Fixation>, saccades: Vec<Saccade>, blinks: Vec<Blink>) -> Self {
        Self {
            fixations,
            saccades,
            blinks,
        }
    }

    /// Check if no event of any kind was found
    pub fn is_empty(&self) -> bool {
        self.fixations.is_empty() && self.saccades.is_empty() && self.blinks.is_empty()
    }
}

impl fmt::Display for OcularEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ocular events:")?;
        writeln!(f, "  Fixations: {}", self.fixations.len())?;
        writeln!(f, "  Saccades: {}", self.saccades.len())?;
        writeln!(f, "  Blinks: {}", self.blinks.len())
    }
}
