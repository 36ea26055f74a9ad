//! Single entry point over both detection paths

use crate::annotation::{AnnotationFilterDetector, AnnotationThresholds};
use crate::wavelet::{WaveletDetection, WaveletParameters, WaveletTransformDetector};
use ocular_core::{EogSignals, Error, EventMask, GazeSample, OcularEvents, Result, ScreenSize};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Which detector a request is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMethod {
    /// Tracker-annotated gaze stream
    #[default]
    Gazepoint,
    /// Raw two-channel EOG
    Wavelet,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Gazepoint => write!(f, "gazepoint"),
            DetectionMethod::Wavelet => write!(f, "wavelet"),
        }
    }
}

/// Inputs and options of one detection call
///
/// Only the inputs of the selected method are required; anything else is
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct DetectionRequest<'a> {
    method: DetectionMethod,
    samples: Option<&'a [GazeSample]>,
    signals: Option<EogSignals<'a>>,
    screen_size: Option<ScreenSize>,
    annotation: AnnotationThresholds,
    sampling_rate: Option<f64>,
    wavelet: Option<WaveletParameters>,
    mask_only: bool,
}

impl<'a> DetectionRequest<'a> {
    pub fn new(method: DetectionMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Request for an annotated gaze stream
    pub fn gazepoint(samples: &'a [GazeSample], screen_size: ScreenSize) -> Self {
        Self::new(DetectionMethod::Gazepoint)
            .samples(samples)
            .screen_size(screen_size)
    }

    /// Request for a two-channel EOG recording
    pub fn wavelet(signals: EogSignals<'a>, sampling_rate: f64) -> Self {
        Self::new(DetectionMethod::Wavelet)
            .signals(signals)
            .sampling_rate(sampling_rate)
    }

    pub fn method(&self) -> DetectionMethod {
        self.method
    }

    pub fn samples(mut self, samples: &'a [GazeSample]) -> Self {
        self.samples = Some(samples);
        self
    }

    pub fn signals(mut self, signals: EogSignals<'a>) -> Self {
        self.signals = Some(signals);
        self
    }

    pub fn screen_size(mut self, screen_size: ScreenSize) -> Self {
        self.screen_size = Some(screen_size);
        self
    }

    pub fn annotation_thresholds(mut self, thresholds: AnnotationThresholds) -> Self {
        self.annotation = thresholds;
        self
    }

    pub fn sampling_rate(mut self, sampling_rate: f64) -> Self {
        self.sampling_rate = Some(sampling_rate);
        self
    }

    /// Override the wavelet thresholds; the sampling rate set on the request
    /// still takes precedence
    pub fn wavelet_parameters(mut self, params: WaveletParameters) -> Self {
        self.wavelet = Some(params);
        self
    }

    /// Return only the per-sample mask (wavelet path)
    pub fn mask_only(mut self, mask_only: bool) -> Self {
        self.mask_only = mask_only;
        self
    }
}

/// Result of [`detect`], shaped by the request
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutput {
    /// Events from the annotation filter
    Events(OcularEvents),
    /// Events and mask from the wavelet detector
    Full(WaveletDetection),
    /// Mask alone from the wavelet detector
    Mask(EventMask),
}

impl DetectionOutput {
    /// Detected events, if the output carries any
    pub fn events(&self) -> Option<&OcularEvents> {
        match self {
            DetectionOutput::Events(events) => Some(events),
            DetectionOutput::Full(detection) => Some(&detection.events),
            DetectionOutput::Mask(_) => None,
        }
    }

    /// Per-sample mask, if the output carries one
    pub fn mask(&self) -> Option<&EventMask> {
        match self {
            DetectionOutput::Events(_) => None,
            DetectionOutput::Full(detection) => Some(&detection.mask),
            DetectionOutput::Mask(mask) => Some(mask),
        }
    }

    pub fn into_events(self) -> Option<OcularEvents> {
        match self {
            DetectionOutput::Events(events) => Some(events),
            DetectionOutput::Full(detection) => Some(detection.events),
            DetectionOutput::Mask(_) => None,
        }
    }
}

/// Route a request to the matching detector
///
/// # Errors
/// Returns [`Error::MissingInput`] when an input the method needs is absent,
/// and the detector's own error for invalid thresholds. No partial result is
/// produced on error.
pub fn detect(request: &DetectionRequest<'_>) -> Result<DetectionOutput> {
    debug!(method = %request.method, mask_only = request.mask_only, "dispatching detection");
    match request.method {
        DetectionMethod::Gazepoint => {
            let samples = request
                .samples
                .ok_or_else(|| Error::missing("sample stream", "gazepoint"))?;
            let screen_size = request
                .screen_size
                .ok_or_else(|| Error::missing("screen size", "gazepoint"))?;
            if request.mask_only {
                return Err(Error::InvalidParameter(
                    "mask output is only available for wavelet detection".to_string(),
                ));
            }

            let detector =
                AnnotationFilterDetector::with_thresholds(screen_size, request.annotation.clone())?;
            Ok(DetectionOutput::Events(detector.detect_events(samples)))
        }
        DetectionMethod::Wavelet => {
            let signals = request
                .signals
                .ok_or_else(|| Error::missing("EOG signals", "wavelet"))?;
            let sampling_rate = request
                .sampling_rate
                .ok_or_else(|| Error::missing("sampling rate", "wavelet"))?;

            let params = WaveletParameters {
                sampling_rate,
                ..request.wavelet.clone().unwrap_or_default()
            };
            let detector = WaveletTransformDetector::new(params)?;
            if request.mask_only {
                Ok(DetectionOutput::Mask(detector.detect_mask(signals)?))
            } else {
                Ok(DetectionOutput::Full(detector.detect_events(signals)?))
            }
        }
    }
}
