//! Ocular event detection toolkit
//!
//! Umbrella crate over the workspace:
//!
//! - [`core`]: event types, masks and segment utilities
//! - [`wavelet`]: Haar continuous wavelet transform
//! - [`detect`]: annotation-filter and wavelet detectors, facade and config
//! - [`io`]: Gazepoint and EOG loaders
//! - [`features`]: recording-level eye-movement features
//!
//! # Example
//!
//! ```rust
//! use ocular_kit::prelude::*;
//!
//! let log = "TIME\tFPOGX\tFPOGY\tFPOGV\tFPOGD\tFPOGID\tBKID\tBKDUR\n\
//!            0.00\t0.2\t0.5\t1\t0.00\t1\t0\t0.0\n\
//!            0.30\t0.2\t0.5\t1\t0.30\t1\t0\t0.0\n\
//!            0.35\t0.7\t0.5\t1\t0.00\t2\t0\t0.0\n\
//!            0.70\t0.7\t0.5\t1\t0.35\t2\t0\t0.0\n";
//! let session = ocular_kit::io::read_rows(log.as_bytes(), b'\t').unwrap();
//! let samples = session.samples();
//!
//! let screen = ScreenSize::new(1920.0, 1080.0).unwrap();
//! let output = detect(&DetectionRequest::gazepoint(&samples, screen)).unwrap();
//! let events = output.into_events().unwrap();
//! assert_eq!(events.fixations.len(), 2);
//! assert_eq!(events.saccades.len(), 1);
//!
//! let features = GlobalFeatures::generate(&events, screen, None).unwrap();
//! assert_eq!(features.regression_count, 0);
//! ```

pub use ocular_core as core;
pub use ocular_detect as detect;
pub use ocular_features as features;
pub use ocular_io as io;
pub use wavelet_tf as wavelet;

pub use ocular_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use ocular_core::prelude::*;
    pub use ocular_detect::{
        detect, AnnotationFilterDetector, AnnotationThresholds, DetectionConfig, DetectionMethod,
        DetectionOutput, DetectionRequest, OcularEventDetector, WaveletDetection,
        WaveletParameters, WaveletTransformDetector,
    };
    pub use ocular_features::GlobalFeatures;
    pub use ocular_io::{EogRecording, GazepointSession};
}
