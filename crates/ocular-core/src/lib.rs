//! Core types for ocular event detection
//!
//! This crate holds the pieces shared by every detector in the workspace:
//!
//! - **Event types**: [`Fixation`], [`Saccade`], [`Blink`] and the
//!   [`OcularEvents`] collection a detector returns
//! - **Inputs**: annotated tracker rows ([`GazeSample`]) and two-channel EOG
//!   recordings ([`EogSignals`])
//! - **Segments**: [`find_segments`] turns a per-sample condition into
//!   inclusive index runs
//! - **Event masks**: [`EventMask`] labels every sample of a recording with
//!   exactly one [`OcularEventKind`]
//!
//! # Example
//!
//! ```rust
//! use ocular_core::{find_segments, EventMask, OcularEventKind};
//!
//! let active = [false, true, true, false, true];
//! let runs = find_segments(&active);
//!
//! let mut mask = EventMask::new(active.len());
//! mask.paint(&runs, OcularEventKind::Saccade);
//! assert_eq!(mask.codes(), vec![0, 2, 2, 0, 2]);
//! ```

pub mod error;
pub mod geometry;
pub mod mask;
pub mod segments;
pub mod threshold;
pub mod types;

// Re-export core types
pub use error::{Error, Result};
pub use geometry::{movement_direction, movement_magnitude, ScreenSize};
pub use mask::{EventMask, OcularEventKind};
pub use segments::{find_segments, find_segments_by, Segment};
pub use threshold::ThresholdRange;
pub use types::{Blink, EogSignals, Fixation, GazeSample, OcularEvents, Saccade};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Blink, EogSignals, Error, EventMask, Fixation, GazeSample, OcularEventKind, OcularEvents,
        Result, Saccade, ScreenSize, Segment, ThresholdRange,
    };
}
