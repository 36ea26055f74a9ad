//! Core traits for ocular event detection
//!
//! Every detector consumes one recording per call and keeps no state between
//! calls, so batch processing is a plain map over recordings.

use ocular_core::Result;

/// Properties of a detector that don't depend on the input
pub trait DetectorProperties {
    /// Get the name of the detection algorithm
    fn algorithm_name(&self) -> &'static str;
}

/// Detect ocular events in one recording of type `I`
pub trait OcularEventDetector<I: ?Sized>: DetectorProperties {
    /// What a single detection call produces
    type Output;

    /// Detect events in the given recording
    fn detect(&self, input: &I) -> Result<Self::Output>;

    /// Process several recordings with the same detector
    ///
    /// Default implementation processes sequentially and stops at the first
    /// failing recording.
    fn detect_batch(&self, inputs: &[&I]) -> Result<Vec<Self::Output>> {
        inputs.iter().map(|input| self.detect(input)).collect()
    }
}

/// Process several recordings in parallel
///
/// Recordings share no state, so each one is dispatched to the rayon pool
/// independently. Results keep the order of `inputs`.
#[cfg(feature = "parallel")]
pub fn detect_batch_parallel<D, I>(detector: &D, inputs: &[&I]) -> Result<Vec<D::Output>>
where
    D: OcularEventDetector<I> + Sync,
    D::Output: Send,
    I: Sync + ?Sized,
{
    use rayon::prelude::*;

    inputs
        .par_iter()
        .map(|input| detector.detect(input))
        .collect()
}
