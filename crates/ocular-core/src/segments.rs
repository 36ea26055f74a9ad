//! Contiguous run detection over boolean conditions
//!
//! Both detectors reduce their thresholding steps to "where does this
//! condition hold", so this is the shared primitive for turning a per-sample
//! condition into inclusive index ranges.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive index range `[start, end]` over a sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Segment {
    /// First index of the run
    pub start: usize,
    /// Last index of the run (inclusive)
    pub end: usize,
}

impl Segment {
    /// Create a new segment. `end` must not be before `start`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "segment end {end} before start {start}");
        Self { start, end }
    }

    /// Number of samples covered by the segment
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A segment always covers at least one sample
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if an index falls inside the segment
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Iterate over all indices of the segment
    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Find the maximal runs where `condition` is true
///
/// Transitions are located from the sign changes between neighbouring
/// samples. A run that is open at index 0 or still open at the last sample
/// is closed at the array boundary. The returned segments are sorted by
/// start and never overlap.
///
/// ```rust
/// use ocular_core::{find_segments, Segment};
///
/// let runs = find_segments(&[false, true, true, false, true]);
/// assert_eq!(runs, vec![Segment::new(1, 2), Segment::new(4, 4)]);
/// ```
pub fn find_segments(condition: &[bool]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let Some(&first) = condition.first() else {
        return segments;
    };

    let mut open = if first { Some(0) } else { None };
    for (i, pair) in condition.windows(2).enumerate() {
        match (pair[0], pair[1]) {
            (false, true) => open = Some(i + 1),
            (true, false) => {
                if let Some(start) = open.take() {
                    segments.push(Segment::new(start, i));
                }
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        segments.push(Segment::new(start, condition.len() - 1));
    }
    segments
}

/// Find the maximal runs of samples satisfying `predicate`
pub fn find_segments_by<T, F>(values: &[T], predicate: F) -> Vec<Segment>
where
    F: FnMut(&T) -> bool,
{
    let condition: Vec<bool> = values.iter().map(predicate).collect();
    find_segments(&condition)
}
