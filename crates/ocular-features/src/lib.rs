//! Eye-movement features from detected ocular events
//!
//! [`GlobalFeatures`] summarises one recording: event counts, per-event
//! durations, saccade distances and velocities, and regressions (saccades
//! against the reading direction).
//!
//! # Example
//!
//! ```rust
//! use ocular_core::{Fixation, OcularEvents, Saccade, ScreenSize};
//! use ocular_features::GlobalFeatures;
//!
//! let screen = ScreenSize::new(1920.0, 1080.0).unwrap();
//! let fixations = vec![
//!     Fixation::new(0.2, 0.5, 0.25, 0.0),
//!     Fixation::new(0.6, 0.5, 0.30, 0.3),
//!     Fixation::new(0.1, 0.5, 0.20, 0.7),
//! ];
//! let saccades: Vec<Saccade> = fixations
//!     .windows(2)
//!     .map(|pair| {
//!         let (a, b) = (pair[0], pair[1]);
//!         Saccade::between((a.x, a.y), (b.x, b.y), b.start_time - a.end_time(), a.end_time(), screen)
//!     })
//!     .collect();
//! let events = OcularEvents::new(fixations, saccades, vec![]);
//!
//! let features = GlobalFeatures::generate(&events, screen, None).unwrap();
//! assert_eq!(features.fixation_count, 3);
//! assert_eq!(features.regression_count, 1);
//! ```

pub mod global;

pub use global::{GlobalFeatures, NormalizedCounts};
