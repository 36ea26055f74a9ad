//! Event extraction from tracker-annotated gaze streams
//!
//! Eye trackers such as the Gazepoint GP3 run their own fixation and blink
//! filters and stamp every row with a fixation id and a blink id. This
//! detector turns those ids into [`Fixation`], [`Saccade`] and [`Blink`]
//! events, filtering out implausible fixations along the way.

use crate::traits::{DetectorProperties, OcularEventDetector};
use ocular_core::{
    Blink, Error, Fixation, GazeSample, OcularEvents, Result, Saccade, ScreenSize, ThresholdRange,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Optional filters applied by [`AnnotationFilterDetector`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationThresholds {
    /// Fixations lasting this many milliseconds or less are rejected
    pub min_fixation_duration_ms: Option<f64>,
    /// Accepted blink durations in seconds
    pub blink_duration: Option<ThresholdRange>,
}

impl AnnotationThresholds {
    pub fn validate(&self) -> Result<()> {
        if let Some(ms) = self.min_fixation_duration_ms {
            if !ms.is_finite() || ms < 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "min_fixation_duration_ms must be a non-negative number, got {ms}"
                )));
            }
        }
        if let Some(range) = &self.blink_duration {
            range.validate()?;
        }
        Ok(())
    }
}

/// Detector for streams that already carry fixation and blink ids
///
/// # Example
///
/// ```rust
/// use ocular_core::{GazeSample, ScreenSize};
/// use ocular_detect::AnnotationFilterDetector;
///
/// let sample = |time: f64, id: u64, fpogd: f64| GazeSample {
///     time,
///     pog_x: 0.5,
///     pog_y: 0.5,
///     pog_valid: true,
///     fixation_duration: fpogd,
///     fixation_id: id,
///     blink_id: 0,
///     blink_duration: 0.0,
/// };
/// let samples = vec![sample(0.0, 1, 0.0), sample(0.1, 1, 0.3)];
///
/// let detector = AnnotationFilterDetector::new(ScreenSize::new(1920.0, 1080.0).unwrap()).unwrap();
/// let events = detector.detect_events(&samples);
/// assert_eq!(events.fixations.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationFilterDetector {
    screen_size: ScreenSize,
    thresholds: AnnotationThresholds,
}

impl AnnotationFilterDetector {
    /// Create a detector without duration filters
    pub fn new(screen_size: ScreenSize) -> Result<Self> {
        Self::with_thresholds(screen_size, AnnotationThresholds::default())
    }

    pub fn with_thresholds(screen_size: ScreenSize, thresholds: AnnotationThresholds) -> Result<Self> {
        screen_size.validate()?;
        thresholds.validate()?;
        Ok(Self {
            screen_size,
            thresholds,
        })
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen_size
    }

    pub fn thresholds(&self) -> &AnnotationThresholds {
        &self.thresholds
    }

    /// Run all three extraction steps
    ///
    /// Blinks are extracted even when no fixation survives filtering.
    #[instrument(skip_all, fields(samples = samples.len()))]
    pub fn detect_events(&self, samples: &[GazeSample]) -> OcularEvents {
        let fixations = self.detect_fixations(samples);
        let saccades = self.detect_saccades(&fixations);
        let blinks = self.detect_blinks(samples);

        debug!(
            fixations = fixations.len(),
            saccades = saccades.len(),
            blinks = blinks.len(),
            "annotation filter finished"
        );
        OcularEvents::new(fixations, saccades, blinks)
    }

    /// Collapse each fixation-id group into one fixation
    pub fn detect_fixations(&self, samples: &[GazeSample]) -> Vec<Fixation> {
        let Some(session_start) = samples.first().map(|s| s.time) else {
            return Vec::new();
        };

        samples
            .chunk_by(|a, b| a.fixation_id == b.fixation_id)
            .filter_map(|group| self.fixation_from_group(group, session_start))
            .collect()
    }

    fn fixation_from_group(&self, group: &[GazeSample], session_start: f64) -> Option<Fixation> {
        let valid: Vec<&GazeSample> = group.iter().filter(|s| s.pog_valid).collect();
        let (first, last) = (valid.first()?, valid.last()?);

        let count = valid.len() as f64;
        let x = valid.iter().map(|s| s.pog_x).sum::<f64>() / count;
        let y = valid.iter().map(|s| s.pog_y).sum::<f64>() / count;
        let duration = last.fixation_duration - first.fixation_duration;
        let fixation = Fixation::new(x, y, duration, first.time - session_start);

        if let Some(ms) = self.thresholds.min_fixation_duration_ms {
            if duration * 1000.0 <= ms {
                trace!(id = first.fixation_id, duration, "fixation too short");
                return None;
            }
        }
        if !fixation.is_on_screen() {
            trace!(id = first.fixation_id, x, y, "fixation off screen");
            return None;
        }
        Some(fixation)
    }

    /// Connect consecutive fixations with saccades
    pub fn detect_saccades(&self, fixations: &[Fixation]) -> Vec<Saccade> {
        saccades_between(fixations, self.screen_size)
    }

    /// Turn each nonzero blink-id group into a blink
    ///
    /// The tracker reports a blink's duration on the row after it ends, so a
    /// group that runs to the end of the stream is dropped.
    pub fn detect_blinks(&self, samples: &[GazeSample]) -> Vec<Blink> {
        let Some(session_start) = samples.first().map(|s| s.time) else {
            return Vec::new();
        };

        let mut blinks = Vec::new();
        let mut offset = 0;
        for group in samples.chunk_by(|a, b| a.blink_id == b.blink_id) {
            let next = offset + group.len();
            let first = &group[0];
            offset = next;

            if first.blink_id == 0 {
                continue;
            }
            let Some(following) = samples.get(next) else {
                trace!(id = first.blink_id, "blink at end of stream");
                continue;
            };

            let duration = following.blink_duration;
            if duration == 0.0 {
                continue;
            }
            if let Some(range) = &self.thresholds.blink_duration {
                if !range.contains(duration) {
                    trace!(id = first.blink_id, duration, "blink outside duration range");
                    continue;
                }
            }
            blinks.push(Blink::new(duration, first.time - session_start));
        }
        blinks
    }
}

/// Saccades between each consecutive pair of fixations
///
/// The displacement is scaled by `screen_size` before magnitude and
/// direction are computed, so they come out in pixels.
pub fn saccades_between(fixations: &[Fixation], screen_size: ScreenSize) -> Vec<Saccade> {
    fixations
        .windows(2)
        .map(|pair| {
            let (prior, next) = (&pair[0], &pair[1]);
            Saccade::between(
                (prior.x, prior.y),
                (next.x, next.y),
                next.start_time - prior.end_time(),
                prior.end_time(),
                screen_size,
            )
        })
        .collect()
}

impl DetectorProperties for AnnotationFilterDetector {
    fn algorithm_name(&self) -> &'static str {
        "AnnotationFilter"
    }
}

impl OcularEventDetector<[GazeSample]> for AnnotationFilterDetector {
    type Output = OcularEvents;

    fn detect(&self, input: &[GazeSample]) -> Result<OcularEvents> {
        Ok(self.detect_events(input))
    }
}
