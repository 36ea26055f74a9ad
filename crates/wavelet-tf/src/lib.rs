//! # Wavelet Transform Library
//!
//! A single-scale continuous wavelet transform (CWT) using the Haar wavelet,
//! built for locating abrupt level changes in physiological signals such as
//! electrooculography (EOG).
//!
//! A step in the input produces a localised triangular peak in the
//! coefficients, with the sign of the peak following the direction of the
//! step. Thresholding the coefficient magnitude therefore finds movement
//! onsets and offsets without any further filtering.
//!
//! ## Mathematical Background
//!
//! The transform follows the integrate-then-differentiate formulation:
//!
//! 1. The Haar wavelet ψ is integrated, giving a triangle Ψ on `[0, 1]`
//!    that peaks at `t = 0.5`
//! 2. Ψ is sampled at `k / scale` for `k = 0..=scale` and reversed
//! 3. The signal is convolved (full mode) with the sampled Ψ
//! 4. The first difference of the convolution is scaled by `-sqrt(scale)`
//! 5. The result is centre-trimmed back to the input length
//!
//! Steps 2–4 are folded into a single differentiated kernel, so the
//! transform is one convolution.
//!
//! ## Basic Usage
//!
//! ```rust
//! use wavelet_tf::WaveletTransform;
//!
//! // A step from 0 to 1 at sample 100
//! let signal: Vec<f64> = (0..200).map(|i| if i < 100 { 0.0 } else { 1.0 }).collect();
//!
//! let transformer = WaveletTransform::new(20).unwrap();
//! let magnitude = transformer.magnitude(&signal).unwrap();
//!
//! // The response peaks at the step
//! let peak = magnitude
//!     .iter()
//!     .enumerate()
//!     .fold((0, 0.0), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
//! assert!((peak.0 as i64 - 100).abs() <= 1);
//! ```

use num_complex::Complex;
use rustfft::FftPlanner;
use thiserror::Error;

/// Error types for wavelet transform operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WaveletError {
    /// Scale must cover at least one sample
    #[error("Invalid scale: {scale} (must be at least 1)")]
    InvalidScale { scale: usize },

    /// Signal is too short for meaningful analysis
    #[error("Signal too short for analysis: {length} samples")]
    SignalTooShort { length: usize },

    /// Numerical computation failed
    #[error("Computation error: {0}")]
    ComputationError(String),
}

/// Result type for wavelet transform operations
pub type WaveletResult<T> = Result<T, WaveletError>;

/// How the convolution with the wavelet kernel is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConvolutionMethod {
    /// Direct summation, `O(N * scale)`
    #[default]
    Direct,
    /// Zero-padded FFT convolution, `O(N log N)`
    Fft,
}

/// Integral of the Haar wavelet from 0 to `t`
///
/// The Haar wavelet is +1 on `[0, 0.5)` and -1 on `[0.5, 1)`, so its integral
/// rises linearly to 0.5 and falls back to zero at `t = 1`.
pub fn integrated_haar(t: f64) -> f64 {
    if !(0.0..=1.0).contains(&t) {
        0.0
    } else if t < 0.5 {
        t
    } else {
        1.0 - t
    }
}

/// Haar continuous wavelet transform at one scale
///
/// The differentiated kernel is computed once in the constructor, so a
/// transformer can be reused across signals of any length.
#[derive(Debug, Clone)]
pub struct WaveletTransform {
    /// Wavelet scale in samples
    scale: usize,
    /// Differentiated, scaled wavelet kernel (`scale + 2` taps)
    kernel: Vec<f64>,
    /// Offset of the first kept coefficient in the full convolution
    offset: usize,
    method: ConvolutionMethod,
}

impl WaveletTransform {
    /// Create a transformer for a given scale
    ///
    /// # Arguments
    /// * `scale` - Wavelet scale in samples (the support of the wavelet)
    ///
    /// # Errors
    /// Returns `WaveletError::InvalidScale` if `scale` is zero.
    ///
    /// # Mathematical Details
    ///
    /// With `h[k]` the reversed samples of the integrated wavelet and
    /// `h[-1] = h[scale + 1] = 0`, the kernel is
    /// `g[j] = -sqrt(scale) * (h[j] - h[j - 1])` for `j = 0..=scale + 1`.
    /// Convolving with `g` equals differencing the convolution with `h`.
    pub fn new(scale: usize) -> WaveletResult<Self> {
        if scale == 0 {
            return Err(WaveletError::InvalidScale { scale });
        }

        let step = scale as f64;
        let sampled: Vec<f64> = (0..=scale)
            .rev()
            .map(|k| integrated_haar(k as f64 / step))
            .collect();

        let gain = -step.sqrt();
        let kernel: Vec<f64> = (0..=scale + 1)
            .map(|j| {
                let current = sampled.get(j).copied().unwrap_or(0.0);
                let previous = if j == 0 { 0.0 } else { sampled[j - 1] };
                gain * (current - previous)
            })
            .collect();

        // The differenced full convolution is (scale - 1) samples longer than
        // the input; keep the centre, dropping the floor of half the excess
        // at the front.
        let offset = 1 + (scale - 1) / 2;

        Ok(Self {
            scale,
            kernel,
            offset,
            method: ConvolutionMethod::Direct,
        })
    }

    /// Select the convolution back-end
    pub fn with_method(mut self, method: ConvolutionMethod) -> Self {
        self.method = method;
        self
    }

    /// Get the wavelet scale
    pub fn scale(&self) -> usize {
        self.scale
    }

    /// Get the selected convolution back-end
    pub fn method(&self) -> ConvolutionMethod {
        self.method
    }

    /// Differentiated kernel the signal is convolved with
    pub fn kernel(&self) -> &[f64] {
        &self.kernel
    }

    /// Compute the wavelet coefficients of a real-valued signal
    ///
    /// The output has the same length as the input. Samples beyond the
    /// signal boundaries are treated as zero, so a signal with a non-zero
    /// level at its ends shows edge responses there.
    ///
    /// # Errors
    /// Returns `WaveletError::SignalTooShort` for an empty signal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wavelet_tf::WaveletTransform;
    ///
    /// let transformer = WaveletTransform::new(4).unwrap();
    /// let coefficients = transformer.transform(&[0.0; 16]).unwrap();
    /// assert!(coefficients.iter().all(|&c| c == 0.0));
    /// ```
    pub fn transform(&self, signal: &[f64]) -> WaveletResult<Vec<f64>> {
        if signal.is_empty() {
            return Err(WaveletError::SignalTooShort { length: 0 });
        }

        match self.method {
            ConvolutionMethod::Direct => Ok(self.transform_direct(signal)),
            ConvolutionMethod::Fft => self.transform_fft(signal),
        }
    }

    /// Absolute value of the wavelet coefficients
    pub fn magnitude(&self, signal: &[f64]) -> WaveletResult<Vec<f64>> {
        Ok(self.transform(signal)?.iter().map(|c| c.abs()).collect())
    }

    fn transform_direct(&self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        (0..n)
            .map(|i| {
                let position = i + self.offset;
                self.kernel
                    .iter()
                    .enumerate()
                    .filter_map(|(j, &g)| {
                        position
                            .checked_sub(j)
                            .filter(|&m| m < n)
                            .map(|m| g * signal[m])
                    })
                    .sum()
            })
            .collect()
    }

    fn transform_fft(&self, signal: &[f64]) -> WaveletResult<Vec<f64>> {
        let n = signal.len();
        let full_length = n + self.kernel.len() - 1;

        let mut padded_signal: Vec<Complex<f64>> = signal
            .iter()
            .map(|&x| Complex::new(x, 0.0))
            .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
            .take(full_length)
            .collect();
        let mut padded_kernel: Vec<Complex<f64>> = self
            .kernel
            .iter()
            .map(|&g| Complex::new(g, 0.0))
            .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
            .take(full_length)
            .collect();

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(full_length);
        fft.process(&mut padded_signal);
        fft.process(&mut padded_kernel);

        for (s, k) in padded_signal.iter_mut().zip(padded_kernel.iter()) {
            *s *= *k;
        }

        let ifft = planner.plan_fft_inverse(full_length);
        ifft.process(&mut padded_signal);

        // RustFFT leaves the inverse unnormalised
        let norm_factor = 1.0 / full_length as f64;
        let coefficients: Vec<f64> = padded_signal
            .iter()
            .skip(self.offset)
            .take(n)
            .map(|c| c.re * norm_factor)
            .collect();

        if coefficients.len() != n {
            return Err(WaveletError::ComputationError(format!(
                "convolution produced {} coefficients for {} samples",
                coefficients.len(),
                n
            )));
        }
        Ok(coefficients)
    }
}

/// Convenience function for one-off transforms
///
/// # Examples
///
/// ```rust
/// use wavelet_tf::haar_cwt;
///
/// let coefficients = haar_cwt(&[0.0, 0.0, 1.0, 1.0, 0.0, 0.0], 2).unwrap();
/// assert_eq!(coefficients.len(), 6);
/// ```
pub fn haar_cwt(signal: &[f64], scale: usize) -> WaveletResult<Vec<f64>> {
    WaveletTransform::new(scale)?.transform(signal)
}

/// Convenience function for one-off magnitude computation
pub fn haar_cwt_magnitude(signal: &[f64], scale: usize) -> WaveletResult<Vec<f64>> {
    WaveletTransform::new(scale)?.magnitude(signal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn step(n: usize, at: usize, height: f64) -> Vec<f64> {
        (0..n).map(|i| if i < at { 0.0 } else { height }).collect()
    }

    #[test]
    fn test_integrated_haar_shape() {
        assert_relative_eq!(integrated_haar(0.0), 0.0);
        assert_relative_eq!(integrated_haar(0.25), 0.25);
        assert_relative_eq!(integrated_haar(0.5), 0.5);
        assert_relative_eq!(integrated_haar(0.75), 0.25);
        assert_relative_eq!(integrated_haar(1.0), 0.0);
        assert_relative_eq!(integrated_haar(1.5), 0.0);
    }

    #[test]
    fn test_kernel_sums_to_zero() {
        for scale in [1, 2, 5, 20, 33] {
            let transformer = WaveletTransform::new(scale).unwrap();
            assert_eq!(transformer.kernel().len(), scale + 2);
            let sum: f64 = transformer.kernel().iter().sum();
            assert!(sum.abs() < 1e-12, "kernel for scale {scale} sums to {sum}");
        }
    }

    #[test]
    fn test_step_response_is_triangle() {
        let scale = 20;
        let transformer = WaveletTransform::new(scale).unwrap();
        let coefficients = transformer.transform(&step(300, 100, 1.0)).unwrap();

        // A rising step produces a negative triangle starting 10 samples early
        let gain = (scale as f64).sqrt();
        for k in 0..=scale {
            let expected = -gain * integrated_haar(k as f64 / scale as f64);
            assert_relative_eq!(coefficients[90 + k], expected, epsilon = 1e-12);
        }
        assert!(coefficients[..90].iter().all(|c| c.abs() < 1e-12));
        assert!(coefficients[111..].iter().all(|c| c.abs() < 1e-12));
    }

    #[test]
    fn test_falling_step_flips_sign() {
        let transformer = WaveletTransform::new(20).unwrap();
        let rising = transformer.transform(&step(200, 100, 1.0)).unwrap();
        let falling = transformer.transform(&step(200, 100, -1.0)).unwrap();
        for (r, f) in rising.iter().zip(&falling) {
            assert_relative_eq!(*r, -*f, epsilon = 1e-12);
        }
        assert!(falling[100] > 0.0);
    }

    #[test]
    fn test_fft_matches_direct() {
        let signal: Vec<f64> = (0..257)
            .map(|i| (i as f64 * 0.07).sin() + if i > 120 { 0.8 } else { 0.0 })
            .collect();

        for scale in [1, 4, 20] {
            let direct = WaveletTransform::new(scale).unwrap();
            let fft = WaveletTransform::new(scale)
                .unwrap()
                .with_method(ConvolutionMethod::Fft);

            let a = direct.transform(&signal).unwrap();
            let b = fft.transform(&signal).unwrap();
            assert_eq!(a.len(), signal.len());
            assert_eq!(b.len(), signal.len());
            for (x, y) in a.iter().zip(&b) {
                assert_relative_eq!(*x, *y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_signal_shorter_than_scale() {
        let coefficients = haar_cwt(&[1.0, 2.0, 3.0], 20).unwrap();
        assert_eq!(coefficients.len(), 3);
        assert!(coefficients.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            WaveletTransform::new(0).unwrap_err(),
            WaveletError::InvalidScale { scale: 0 }
        );
        let transformer = WaveletTransform::new(20).unwrap();
        assert_eq!(
            transformer.transform(&[]).unwrap_err(),
            WaveletError::SignalTooShort { length: 0 }
        );
        assert_eq!(
            WaveletError::SignalTooShort { length: 0 }.to_string(),
            "Signal too short for analysis: 0 samples"
        );
    }

    #[test]
    fn test_magnitude_is_absolute_value() {
        let signal = step(100, 50, -2.0);
        let transformer = WaveletTransform::new(10).unwrap();
        let coefficients = transformer.transform(&signal).unwrap();
        let magnitude = transformer.magnitude(&signal).unwrap();
        for (c, m) in coefficients.iter().zip(&magnitude) {
            assert_relative_eq!(c.abs(), *m);
        }
    }
}
