//! Event detection on raw two-channel EOG
//!
//! The detector runs a Haar continuous wavelet transform over both channels
//! and labels every sample with one [`OcularEventKind`]. Three stages run in
//! a fixed order, each claiming samples the previous ones left unlabeled:
//!
//! 1. **Blinks** on the vertical channel: a positive coefficient peak
//!    followed closely by a second peak (eyelid down, eyelid up)
//! 2. **Saccades** on the vertical, then the horizontal channel: runs of
//!    large coefficients whose length is plausible for a saccade
//! 3. **Fixations** in the remaining gaps: the longest low-dispersion window
//!    a dispersion-threshold search can grow in each gap
//!
//! All thresholds are in samples and wavelet-coefficient units; only the
//! reported durations and start times are converted to seconds.

use crate::traits::{DetectorProperties, OcularEventDetector};
use ocular_core::{
    find_segments, find_segments_by, Blink, EogSignals, Error, EventMask, Fixation,
    OcularEventKind, OcularEvents, Result, Saccade, ScreenSize, Segment,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use wavelet_tf::{ConvolutionMethod, WaveletTransform};

/// Thresholds for [`WaveletTransformDetector`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveletParameters {
    /// Sampling rate of both channels in Hz
    pub sampling_rate: f64,
    /// Minimum coefficient magnitude of a saccade sample
    pub saccade_magnitude: f64,
    /// Shortest accepted saccade in samples
    pub saccade_min_samples: usize,
    /// Longest accepted saccade in samples
    pub saccade_max_samples: usize,
    /// Minimum coefficient magnitude of a blink peak
    pub blink_magnitude: f64,
    /// Largest gap in samples between the two peaks of one blink
    pub blink_merge_gap: usize,
    /// Shortest accepted fixation in samples
    pub fixation_min_samples: usize,
    /// Largest summed channel range within a fixation
    pub fixation_dispersion: f64,
    /// Haar wavelet scale
    pub scale: usize,
}

impl Default for WaveletParameters {
    fn default() -> Self {
        Self {
            sampling_rate: 1000.0,
            saccade_magnitude: 0.1,
            saccade_min_samples: 20,
            saccade_max_samples: 200,
            blink_magnitude: 0.3,
            blink_merge_gap: 390,
            fixation_min_samples: 200,
            fixation_dispersion: 1.0,
            scale: 20,
        }
    }
}

impl WaveletParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.sampling_rate.is_finite() && self.sampling_rate > 0.0) {
            return Err(Error::non_positive("sampling_rate", self.sampling_rate));
        }
        if !(self.saccade_magnitude.is_finite() && self.saccade_magnitude > 0.0) {
            return Err(Error::non_positive("saccade_magnitude", self.saccade_magnitude));
        }
        if !(self.blink_magnitude.is_finite() && self.blink_magnitude > 0.0) {
            return Err(Error::non_positive("blink_magnitude", self.blink_magnitude));
        }
        if !(self.fixation_dispersion.is_finite() && self.fixation_dispersion >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "fixation_dispersion must be non-negative, got {}",
                self.fixation_dispersion
            )));
        }
        if self.saccade_min_samples == 0 || self.saccade_min_samples > self.saccade_max_samples {
            return Err(Error::InvalidParameter(format!(
                "saccade duration bounds must satisfy 0 < lower <= upper, got [{}, {}]",
                self.saccade_min_samples, self.saccade_max_samples
            )));
        }
        if self.fixation_min_samples == 0 {
            return Err(Error::InvalidParameter(
                "fixation_min_samples must be at least 1".to_string(),
            ));
        }
        if self.scale == 0 {
            return Err(Error::InvalidParameter(
                "wavelet scale must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Events and the per-sample mask they were read from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveletDetection {
    pub events: OcularEvents,
    pub mask: EventMask,
}

/// Wavelet-based detector for two-channel EOG recordings
///
/// # Example
///
/// ```rust
/// use ocular_core::EogSignals;
/// use ocular_detect::{WaveletParameters, WaveletTransformDetector};
///
/// let vertical = vec![0.0; 1000];
/// let horizontal = vec![0.0; 1000];
/// let signals = EogSignals::new(&vertical, &horizontal).unwrap();
///
/// let detector = WaveletTransformDetector::new(WaveletParameters::default()).unwrap();
/// let detection = detector.detect_events(signals).unwrap();
///
/// // A flat recording is one long fixation
/// assert_eq!(detection.events.fixations.len(), 1);
/// assert!(detection.events.saccades.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct WaveletTransformDetector {
    params: WaveletParameters,
    transform: WaveletTransform,
}

impl WaveletTransformDetector {
    pub fn new(params: WaveletParameters) -> Result<Self> {
        params.validate()?;
        let transform = WaveletTransform::new(params.scale)
            .map_err(|e| Error::InvalidParameter(e.to_string()))?;
        Ok(Self { params, transform })
    }

    /// Select the convolution back-end used for the transform
    pub fn with_method(mut self, method: ConvolutionMethod) -> Self {
        self.transform = self.transform.with_method(method);
        self
    }

    pub fn params(&self) -> &WaveletParameters {
        &self.params
    }

    /// Label every sample without collecting the event lists
    pub fn detect_mask(&self, signals: EogSignals<'_>) -> Result<EventMask> {
        Ok(self.detect_events(signals)?.mask)
    }

    /// Run all three stages and return the events with their mask
    #[instrument(skip_all, fields(samples = signals.len(), scale = self.params.scale))]
    pub fn detect_events(&self, signals: EogSignals<'_>) -> Result<WaveletDetection> {
        if signals.is_empty() {
            return Ok(WaveletDetection::default());
        }

        let vertical = self.coefficients(signals.vertical())?;
        let horizontal = self.coefficients(signals.horizontal())?;

        let mut context = DetectionContext::new(signals, &self.params);
        let blinks = context.detect_blinks(&vertical);
        let saccades = context.detect_saccades(&vertical, &horizontal);
        let fixations = context.detect_fixations();

        debug!(
            fixations = fixations.len(),
            saccades = saccades.len(),
            blinks = blinks.len(),
            "wavelet detection finished"
        );
        Ok(WaveletDetection {
            events: OcularEvents::new(fixations, saccades, blinks),
            mask: context.into_mask(),
        })
    }

    fn coefficients(&self, channel: &[f64]) -> Result<Vec<f64>> {
        self.transform
            .transform(channel)
            .map_err(|e| Error::Computation(e.to_string()))
    }
}

impl DetectorProperties for WaveletTransformDetector {
    fn algorithm_name(&self) -> &'static str {
        "HaarWavelet"
    }
}

impl<'a> OcularEventDetector<EogSignals<'a>> for WaveletTransformDetector {
    type Output = WaveletDetection;

    fn detect(&self, input: &EogSignals<'a>) -> Result<WaveletDetection> {
        self.detect_events(*input)
    }
}

/// State of one detection call: the recording, its thresholds and the mask
/// the stages write into
struct DetectionContext<'a> {
    signals: EogSignals<'a>,
    params: &'a WaveletParameters,
    mask: EventMask,
}

impl<'a> DetectionContext<'a> {
    fn new(signals: EogSignals<'a>, params: &'a WaveletParameters) -> Self {
        Self {
            signals,
            params,
            mask: EventMask::new(signals.len()),
        }
    }

    fn into_mask(self) -> EventMask {
        self.mask
    }

    fn seconds(&self, samples: usize) -> f64 {
        samples as f64 / self.params.sampling_rate
    }

    fn detect_blinks(&mut self, coefficients: &[f64]) -> Vec<Blink> {
        let ranges = blink_ranges(
            coefficients,
            self.params.blink_magnitude,
            self.params.saccade_magnitude,
            self.params.blink_merge_gap,
        );
        self.mask.paint(&ranges, OcularEventKind::Blink);

        debug!(count = ranges.len(), "blink stage");
        ranges
            .iter()
            .map(|range| Blink::new(self.seconds(range.len()), self.seconds(range.start)))
            .collect()
    }

    fn detect_saccades(&mut self, vertical: &[f64], horizontal: &[f64]) -> Vec<Saccade> {
        let accepted = self.params.saccade_min_samples..=self.params.saccade_max_samples;
        let threshold = self.params.saccade_magnitude;

        for coefficients in [vertical, horizontal] {
            let active: Vec<bool> = coefficients
                .iter()
                .enumerate()
                .map(|(i, c)| c.abs() >= threshold && self.mask.is_unlabeled(i))
                .collect();
            let runs: Vec<Segment> = find_segments(&active)
                .into_iter()
                .filter(|run| accepted.contains(&run.len()))
                .collect();
            self.mask.paint(&runs, OcularEventKind::Saccade);
        }

        let (v, h) = (self.signals.vertical(), self.signals.horizontal());
        let saccades: Vec<Saccade> = self
            .mask
            .segments_of(OcularEventKind::Saccade)
            .iter()
            .map(|run| {
                Saccade::between(
                    (h[run.start], v[run.start]),
                    (h[run.end], v[run.end]),
                    self.seconds(run.len()),
                    self.seconds(run.start),
                    ScreenSize::unit(),
                )
            })
            .collect();
        debug!(count = saccades.len(), "saccade stage");
        saccades
    }

    fn detect_fixations(&mut self) -> Vec<Fixation> {
        let (v, h) = (self.signals.vertical(), self.signals.horizontal());
        let windows: Vec<Segment> = self
            .mask
            .segments_of(OcularEventKind::NoEvent)
            .into_iter()
            .filter(|run| run.len() >= self.params.fixation_min_samples)
            .filter_map(|run| {
                find_fixation_window(
                    v,
                    h,
                    run,
                    self.params.fixation_min_samples,
                    self.params.fixation_dispersion,
                )
            })
            .collect();
        self.mask.paint(&windows, OcularEventKind::Fixation);

        debug!(count = windows.len(), "fixation stage");
        windows
            .iter()
            .map(|window| {
                let n = window.len() as f64;
                let x = h[window.indices()].iter().sum::<f64>() / n;
                let y = v[window.indices()].iter().sum::<f64>() / n;
                Fixation::new(x, y, self.seconds(window.len()), self.seconds(window.start))
            })
            .collect()
    }
}

/// Find the sample ranges of blinks in vertical-channel coefficients
///
/// A blink starts at a positive peak (`|c| >= blink_magnitude`) whose gap
/// to the next peak, counted from the peak's last sample to the next peak's
/// first sample inclusive, is at most `merge_gap` samples. The range covers
/// both peaks and is widened while neighbouring coefficients stay at or
/// above `edge_magnitude`. Every such candidate is reported, so ranges of
/// consecutive blinks may overlap.
pub fn blink_ranges(
    coefficients: &[f64],
    blink_magnitude: f64,
    edge_magnitude: f64,
    merge_gap: usize,
) -> Vec<Segment> {
    let peaks = find_segments_by(coefficients, |c| c.abs() >= blink_magnitude);
    let mut ranges: Vec<Segment> = Vec::new();

    for (peak, next) in peaks.iter().zip(peaks.iter().skip(1)) {
        if coefficients[peak.start] <= 0.0 || next.start - peak.end + 1 > merge_gap {
            continue;
        }

        // Edges end on the last sample still at the threshold
        let mut start = peak.start;
        while start > 0 && coefficients[start - 1].abs() >= edge_magnitude {
            start -= 1;
        }
        let mut end = next.end;
        while end + 1 < coefficients.len() && coefficients[end + 1].abs() >= edge_magnitude {
            end += 1;
        }
        ranges.push(Segment::new(start, end));
    }
    ranges
}

/// Running bounds of both channels over a window
#[derive(Debug, Clone, Copy)]
struct Extent {
    v_min: f64,
    v_max: f64,
    h_min: f64,
    h_max: f64,
}

impl Extent {
    fn over(vertical: &[f64], horizontal: &[f64], start: usize, end: usize) -> Self {
        let mut extent = Self {
            v_min: f64::INFINITY,
            v_max: f64::NEG_INFINITY,
            h_min: f64::INFINITY,
            h_max: f64::NEG_INFINITY,
        };
        for i in start..=end {
            extent.include(vertical[i], horizontal[i]);
        }
        extent
    }

    fn include(&mut self, v: f64, h: f64) {
        self.v_min = self.v_min.min(v);
        self.v_max = self.v_max.max(v);
        self.h_min = self.h_min.min(h);
        self.h_max = self.h_max.max(h);
    }

    fn dispersion(&self) -> f64 {
        (self.v_max - self.v_min) + (self.h_max - self.h_min)
    }
}

/// Dispersion-threshold search for one fixation inside `run`
///
/// A window of `min_samples` slides forward one sample at a time until its
/// dispersion is at most `max_dispersion`. The first such window then grows
/// one sample at a time; it closes at the last stable length, or at the end
/// of `run`. Returns `None` when no window of `min_samples` is stable.
pub fn find_fixation_window(
    vertical: &[f64],
    horizontal: &[f64],
    run: Segment,
    min_samples: usize,
    max_dispersion: f64,
) -> Option<Segment> {
    if min_samples == 0 || run.len() < min_samples {
        return None;
    }

    let mut start = run.start;
    let mut end = start + min_samples - 1;
    let mut extent = Extent::over(vertical, horizontal, start, end);
    let mut found = false;

    loop {
        if extent.dispersion() > max_dispersion {
            if found {
                return Some(Segment::new(start, end - 1));
            }
            start += 1;
            end = start + min_samples - 1;
            if end > run.end {
                return None;
            }
            extent = Extent::over(vertical, horizontal, start, end);
            continue;
        }

        found = true;
        if end == run.end {
            return Some(Segment::new(start, end));
        }
        end += 1;
        extent.include(vertical[end], horizontal[end]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_parameters() {
        let params = WaveletParameters::default();
        assert_eq!(params.sampling_rate, 1000.0);
        assert_eq!(params.saccade_min_samples, 20);
        assert_eq!(params.saccade_max_samples, 200);
        assert_eq!(params.blink_merge_gap, 390);
        assert_eq!(params.fixation_min_samples, 200);
        assert_eq!(params.scale, 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_parameter_validation() {
        let invalid = [
            WaveletParameters {
                sampling_rate: 0.0,
                ..Default::default()
            },
            WaveletParameters {
                saccade_min_samples: 300,
                ..Default::default()
            },
            WaveletParameters {
                blink_magnitude: -0.3,
                ..Default::default()
            },
            WaveletParameters {
                fixation_dispersion: f64::NAN,
                ..Default::default()
            },
            WaveletParameters {
                scale: 0,
                ..Default::default()
            },
        ];
        for params in invalid {
            assert!(WaveletTransformDetector::new(params).is_err());
        }
    }

    #[test]
    fn test_window_covers_flat_run() {
        let v = vec![0.0; 50];
        let h = vec![0.0; 50];
        let window = find_fixation_window(&v, &h, Segment::new(5, 44), 10, 1.0);
        assert_eq!(window, Some(Segment::new(5, 44)));
    }

    #[test]
    fn test_window_slides_past_unstable_start() {
        // Large excursion over the first samples of the run
        let mut v = vec![0.0; 40];
        v[0] = 5.0;
        v[1] = -5.0;
        let h = vec![0.0; 40];

        let window = find_fixation_window(&v, &h, Segment::new(0, 39), 10, 1.0);
        assert_eq!(window, Some(Segment::new(2, 39)));
    }

    #[test]
    fn test_window_closes_at_last_stable_length() {
        let mut h = vec![0.0; 40];
        for value in h.iter_mut().skip(25) {
            *value = 3.0;
        }
        let v = vec![0.0; 40];

        let window = find_fixation_window(&v, &h, Segment::new(0, 39), 10, 1.0);
        assert_eq!(window, Some(Segment::new(0, 24)));
    }

    #[test]
    fn test_window_never_stable() {
        let v: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let h = vec![0.0; 30];
        assert_eq!(find_fixation_window(&v, &h, Segment::new(0, 29), 10, 1.0), None);
    }

    #[test]
    fn test_window_run_shorter_than_minimum() {
        let v = vec![0.0; 30];
        assert_eq!(find_fixation_window(&v, &v, Segment::new(0, 8), 10, 1.0), None);
    }

    #[test]
    fn test_blink_needs_positive_leading_peak() {
        let mut coefficients = vec![0.0; 100];
        for c in &mut coefficients[10..15] {
            *c = -0.5;
        }
        for c in &mut coefficients[30..35] {
            *c = 0.5;
        }
        assert!(blink_ranges(&coefficients, 0.3, 0.1, 390).is_empty());

        for c in &mut coefficients[60..65] {
            *c = -0.5;
        }
        let ranges = blink_ranges(&coefficients, 0.3, 0.1, 390);
        assert_eq!(ranges, vec![Segment::new(30, 64)]);
    }

    #[test]
    fn test_blink_gap_limit_and_edge_expansion() {
        let mut coefficients = vec![0.0; 200];
        coefficients[9] = 0.15;
        for c in &mut coefficients[10..15] {
            *c = 0.5;
        }
        for c in &mut coefficients[40..45] {
            *c = -0.5;
        }
        coefficients[45] = -0.2;

        assert_eq!(
            blink_ranges(&coefficients, 0.3, 0.1, 390),
            vec![Segment::new(9, 45)]
        );
        // Samples 14 through 40 make a gap of 27
        assert_eq!(
            blink_ranges(&coefficients, 0.3, 0.1, 27),
            vec![Segment::new(9, 45)]
        );
        assert!(blink_ranges(&coefficients, 0.3, 0.1, 26).is_empty());
    }

    #[test]
    fn test_touching_blinks_are_both_reported() {
        let mut coefficients = vec![0.0; 100];
        for c in &mut coefficients[10..15] {
            *c = 0.5;
        }
        for c in &mut coefficients[30..35] {
            *c = -0.5;
        }
        for c in &mut coefficients[35..50] {
            *c = 0.2;
        }
        for c in &mut coefficients[50..55] {
            *c = 0.5;
        }
        for c in &mut coefficients[70..75] {
            *c = -0.5;
        }

        let ranges = blink_ranges(&coefficients, 0.3, 0.1, 390);
        assert_eq!(ranges, vec![Segment::new(10, 54), Segment::new(30, 74)]);

        let mut mask = EventMask::new(coefficients.len());
        mask.paint(&ranges, OcularEventKind::Blink);
        assert_eq!(mask.segments_of(OcularEventKind::Blink), vec![Segment::new(10, 74)]);
    }

    #[test]
    fn test_consecutive_positive_peaks_each_start_a_blink() {
        let mut coefficients = vec![0.0; 100];
        for c in &mut coefficients[10..15] {
            *c = 0.5;
        }
        for c in &mut coefficients[40..45] {
            *c = 0.5;
        }
        for c in &mut coefficients[70..75] {
            *c = -0.5;
        }

        assert_eq!(
            blink_ranges(&coefficients, 0.3, 0.1, 390),
            vec![Segment::new(10, 44), Segment::new(40, 74)]
        );
    }

    #[test]
    fn test_empty_signal_gives_empty_detection() {
        let signals = EogSignals::new(&[], &[]).unwrap();
        let detector = WaveletTransformDetector::new(WaveletParameters::default()).unwrap();
        let detection = detector.detect_events(signals).unwrap();
        assert!(detection.events.is_empty());
        assert!(detection.mask.is_empty());
    }

    #[test]
    fn test_flat_signal_is_one_fixation() {
        let v = vec![0.2; 600];
        let h = vec![-0.4; 600];
        let signals = EogSignals::new(&v, &h).unwrap();
        let detector = WaveletTransformDetector::new(WaveletParameters::default()).unwrap();

        let detection = detector.detect_events(signals).unwrap();
        assert_eq!(detection.events.fixations.len(), 1);
        let fixation = detection.events.fixations[0];
        assert_relative_eq!(fixation.x, -0.4, epsilon = 1e-12);
        assert_relative_eq!(fixation.y, 0.2, epsilon = 1e-12);
        assert_relative_eq!(fixation.duration, 0.6);
        assert_relative_eq!(fixation.start_time, 0.0);
        assert_eq!(detection.mask.count(OcularEventKind::Fixation), 600);
    }
}
