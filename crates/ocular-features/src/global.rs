//! Recording-level features
//!
//! Per-event arrays (durations, distances, velocities) are kept whole so
//! callers can summarise them however they like. Empty event lists are
//! replaced by one neutral event first, so every array has at least one
//! entry; the raw fixation and blink counts are taken before that.

use ocular_core::{Blink, Error, Fixation, OcularEvents, Result, Saccade, ScreenSize};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stand-in for a recording without fixations
const NEUTRAL_FIXATION: Fixation = Fixation {
    x: 0.0,
    y: 0.0,
    duration: 1.0,
    start_time: 0.0,
};

/// Stand-in for a recording without saccades
const NEUTRAL_SACCADE: Saccade = Saccade {
    start_x: 0.0,
    start_y: 0.0,
    end_x: 0.0,
    end_y: 0.0,
    duration: 1.0,
    start_time: 0.0,
    magnitude: 0.0,
    direction: 0.0,
};

/// Stand-in for a recording without blinks
const NEUTRAL_BLINK: Blink = Blink {
    duration: 0.0,
    start_time: 0.0,
};

/// Event counts divided by a normalisation value such as reading time
/// or word count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCounts {
    pub fixations: f64,
    pub blinks: f64,
    pub regressions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalFeatures {
    /// Number of detected fixations
    pub fixation_count: usize,
    /// Number of detected blinks
    pub blink_count: usize,
    pub fixation_durations: Vec<f64>,
    pub saccade_durations: Vec<f64>,
    pub blink_durations: Vec<f64>,
    /// Saccade directions in degrees
    pub saccade_directions: Vec<f64>,
    /// Saccade magnitudes
    pub distances: Vec<f64>,
    /// Absolute horizontal displacement of each saccade, screen-scaled
    pub horizontal_distances: Vec<f64>,
    /// Absolute vertical displacement of each saccade, screen-scaled
    pub vertical_distances: Vec<f64>,
    pub velocities: Vec<f64>,
    pub horizontal_velocities: Vec<f64>,
    pub vertical_velocities: Vec<f64>,
    /// Indices of saccades moving against the reading direction
    pub regression_indices: Vec<usize>,
    pub regression_count: usize,
    /// Regressions per fixation
    pub regression_rate: f64,
    pub normalized: Option<NormalizedCounts>,
}

impl GlobalFeatures {
    /// Compute features for one recording
    ///
    /// # Errors
    /// Returns `Error::InvalidParameter` for an invalid `screen_size` or a
    /// `norm_value` that is not strictly positive.
    pub fn generate(
        events: &OcularEvents,
        screen_size: ScreenSize,
        norm_value: Option<f64>,
    ) -> Result<Self> {
        screen_size.validate()?;
        if let Some(norm) = norm_value {
            if !(norm.is_finite() && norm > 0.0) {
                return Err(Error::non_positive("norm_value", norm));
            }
        }

        let fixation_count = events.fixations.len();
        let blink_count = events.blinks.len();

        let fixations = or_neutral(&events.fixations, NEUTRAL_FIXATION);
        let saccades = or_neutral(&events.saccades, NEUTRAL_SACCADE);
        let blinks = or_neutral(&events.blinks, NEUTRAL_BLINK);

        let distances: Vec<f64> = saccades.iter().map(|s| s.magnitude).collect();
        let (horizontal_distances, vertical_distances): (Vec<f64>, Vec<f64>) = saccades
            .iter()
            .map(|s| {
                let (dx, dy) = screen_size.scale(s.end_x - s.start_x, s.end_y - s.start_y);
                (dx.abs(), dy.abs())
            })
            .unzip();
        let durations: Vec<f64> = saccades.iter().map(|s| s.duration).collect();

        let regression_indices: Vec<usize> = saccades
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_regression())
            .map(|(i, _)| i)
            .collect();
        let regression_count = regression_indices.len();

        debug!(
            fixation_count,
            blink_count,
            saccades = events.saccades.len(),
            regression_count,
            "generated global features"
        );

        Ok(Self {
            fixation_count,
            blink_count,
            fixation_durations: fixations.iter().map(|f| f.duration).collect(),
            saccade_directions: saccades.iter().map(|s| s.direction).collect(),
            blink_durations: blinks.iter().map(|b| b.duration).collect(),
            velocities: per_duration(&distances, &durations),
            horizontal_velocities: per_duration(&horizontal_distances, &durations),
            vertical_velocities: per_duration(&vertical_distances, &durations),
            saccade_durations: durations,
            distances,
            horizontal_distances,
            vertical_distances,
            regression_indices,
            regression_count,
            regression_rate: regression_count as f64 / fixations.len() as f64,
            normalized: norm_value.map(|norm| NormalizedCounts {
                fixations: fixation_count as f64 / norm,
                blinks: blink_count as f64 / norm,
                regressions: regression_count as f64 / norm,
            }),
        })
    }
}

fn or_neutral<T: Copy>(events: &[T], neutral: T) -> Vec<T> {
    if events.is_empty() {
        vec![neutral]
    } else {
        events.to_vec()
    }
}

/// Element-wise `distance / duration`, 0 where the duration is 0
fn per_duration(distances: &[f64], durations: &[f64]) -> Vec<f64> {
    distances
        .iter()
        .zip(durations)
        .map(|(&d, &t)| if t == 0.0 { 0.0 } else { d / t })
        .collect()
}
