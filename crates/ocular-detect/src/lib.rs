//! Ocular event detection
//!
//! Two detectors turn a recording into fixations, saccades and blinks:
//!
//! - [`AnnotationFilterDetector`] reads the fixation and blink ids an eye
//!   tracker already assigned to each row, and filters the result
//! - [`WaveletTransformDetector`] works on raw two-channel EOG, labelling
//!   every sample from Haar wavelet coefficients
//!
//! [`detect`] routes a [`DetectionRequest`] to the right one, and
//! [`DetectionConfig`] builds requests from JSON.
//!
//! # Example
//!
//! ```rust
//! use ocular_core::EogSignals;
//! use ocular_detect::{detect, DetectionRequest};
//!
//! // Rightward eye movement over 30 samples on the horizontal channel
//! let vertical = vec![0.0; 3000];
//! let horizontal: Vec<f64> = (0..3000)
//!     .map(|i| ((i as f64 - 1500.0) / 15.0).clamp(0.0, 2.0))
//!     .collect();
//! let signals = EogSignals::new(&vertical, &horizontal).unwrap();
//!
//! let output = detect(&DetectionRequest::wavelet(signals, 1000.0)).unwrap();
//! let events = output.events().unwrap();
//! assert_eq!(events.fixations.len(), 2);
//! assert_eq!(events.saccades.len(), 1);
//! ```

pub mod annotation;
pub mod config;
pub mod facade;
pub mod traits;
pub mod wavelet;

pub use annotation::{saccades_between, AnnotationFilterDetector, AnnotationThresholds};
pub use config::DetectionConfig;
pub use facade::{detect, DetectionMethod, DetectionOutput, DetectionRequest};
pub use traits::{DetectorProperties, OcularEventDetector};
pub use wavelet::{
    blink_ranges, find_fixation_window, WaveletDetection, WaveletParameters,
    WaveletTransformDetector,
};

#[cfg(feature = "parallel")]
pub use traits::detect_batch_parallel;

// Re-export the transform back-end selector
pub use wavelet_tf::ConvolutionMethod;
