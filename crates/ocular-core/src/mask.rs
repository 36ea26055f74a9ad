//! Per-sample ocular event labels

use crate::segments::{find_segments_by, Segment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label assigned to a single sample of a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum OcularEventKind {
    /// Not claimed by any detector
    #[default]
    NoEvent = 0,
    Blink = 1,
    Saccade = 2,
    Fixation = 3,
}

impl OcularEventKind {
    /// All labels in code order
    pub const ALL: [OcularEventKind; 4] = [
        OcularEventKind::NoEvent,
        OcularEventKind::Blink,
        OcularEventKind::Saccade,
        OcularEventKind::Fixation,
    ];

    /// Integer code of the label (0 = NoEvent, 1 = Blink, 2 = Saccade, 3 = Fixation)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parse an integer code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl fmt::Display for OcularEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcularEventKind::NoEvent => write!(f, "No Event"),
            OcularEventKind::Blink => write!(f, "Blink"),
            OcularEventKind::Saccade => write!(f, "Saccade"),
            OcularEventKind::Fixation => write!(f, "Fixation"),
        }
    }
}

/// One label per sample of a signal recording
///
/// Labels are mutually exclusive. Painting never checks for overlap: a later
/// paint overwrites whatever an earlier one wrote, so callers paint in
/// priority order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMask {
    labels: Vec<OcularEventKind>,
}

impl EventMask {
    /// Create a mask of `len` samples, all labelled `NoEvent`
    pub fn new(len: usize) -> Self {
        Self {
            labels: vec![OcularEventKind::NoEvent; len],
        }
    }

    /// Number of samples covered by the mask
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the mask covers no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of the sample at `index`
    pub fn get(&self, index: usize) -> Option<OcularEventKind> {
        self.labels.get(index).copied()
    }

    /// All labels in sample order
    pub fn labels(&self) -> &[OcularEventKind] {
        &self.labels
    }

    /// Check if the sample at `index` has not been claimed yet
    pub fn is_unlabeled(&self, index: usize) -> bool {
        self.get(index) == Some(OcularEventKind::NoEvent)
    }

    /// Set every index of each inclusive range to `kind`
    ///
    /// Ranges reaching past the end of the mask are clipped.
    pub fn paint(&mut self, ranges: &[Segment], kind: OcularEventKind) -> &mut Self {
        for range in ranges {
            if range.start >= self.labels.len() {
                continue;
            }
            let end = range.end.min(self.labels.len() - 1);
            self.labels[range.start..=end].fill(kind);
        }
        self
    }

    /// Maximal runs of samples carrying `kind`
    pub fn segments_of(&self, kind: OcularEventKind) -> Vec<Segment> {
        find_segments_by(&self.labels, |&label| label == kind)
    }

    /// Number of samples carrying `kind`
    pub fn count(&self, kind: OcularEventKind) -> usize {
        self.labels.iter().filter(|&&label| label == kind).count()
    }

    /// Integer codes of all labels
    pub fn codes(&self) -> Vec<u8> {
        self.labels.iter().map(|label| label.code()).collect()
    }
}

impl From<Vec<OcularEventKind>> for EventMask {
    fn from(labels: Vec<OcularEventKind>) -> Self {
        Self { labels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mask_is_unlabeled() {
        let mask = EventMask::new(10);
        assert_eq!(mask.len(), 10);
        assert_eq!(mask.count(OcularEventKind::NoEvent), 10);
        assert!(mask.codes().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_paint_chains_and_overwrites() {
        let mut mask = EventMask::new(10);
        mask.paint(&[Segment::new(2, 5)], OcularEventKind::Blink)
            .paint(&[Segment::new(4, 7)], OcularEventKind::Saccade);

        assert_eq!(mask.codes(), vec![0, 0, 1, 1, 2, 2, 2, 2, 0, 0]);
        assert_eq!(mask.segments_of(OcularEventKind::Blink), vec![Segment::new(2, 3)]);
        assert_eq!(mask.segments_of(OcularEventKind::Saccade), vec![Segment::new(4, 7)]);
    }

    #[test]
    fn test_paint_clips_to_mask() {
        let mut mask = EventMask::new(4);
        mask.paint(&[Segment::new(2, 9), Segment::new(6, 8)], OcularEventKind::Fixation);
        assert_eq!(mask.codes(), vec![0, 0, 3, 3]);
    }

    #[test]
    fn test_codes_round_trip_through_kind() {
        for kind in OcularEventKind::ALL {
            assert_eq!(OcularEventKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(OcularEventKind::from_code(4), None);
    }

    #[test]
    fn test_counts_partition_the_mask() {
        let mut mask = EventMask::new(12);
        mask.paint(&[Segment::new(0, 1)], OcularEventKind::Blink)
            .paint(&[Segment::new(3, 4)], OcularEventKind::Saccade)
            .paint(&[Segment::new(6, 11)], OcularEventKind::Fixation);

        let total: usize = OcularEventKind::ALL.iter().map(|&k| mask.count(k)).sum();
        assert_eq!(total, mask.len());
        assert!(mask.is_unlabeled(2));
        assert!(!mask.is_unlabeled(3));
    }
}
