//! JSON detection configuration
//!
//! ```json
//! {
//!   "method": "wavelet",
//!   "screen_size": { "width": 1920, "height": 1080 },
//!   "annotation": { "min_fixation_duration_ms": 200 },
//!   "wavelet": { "sampling_rate": 1000, "saccade_magnitude": 0.1 }
//! }
//! ```
//!
//! Every field is optional and falls back to its default.

use crate::annotation::AnnotationThresholds;
use crate::facade::{DetectionMethod, DetectionRequest};
use crate::wavelet::WaveletParameters;
use ocular_core::{EogSignals, GazeSample, Result, ScreenSize};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub method: DetectionMethod,
    pub screen_size: Option<ScreenSize>,
    pub annotation: AnnotationThresholds,
    pub wavelet: WaveletParameters,
    pub mask_only: bool,
}

impl DetectionConfig {
    /// Parse and validate a configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading detection config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every threshold, including those of the unselected method
    pub fn validate(&self) -> Result<()> {
        if let Some(screen_size) = &self.screen_size {
            screen_size.validate()?;
        }
        self.annotation.validate()?;
        self.wavelet.validate()
    }

    /// Build a facade request from this configuration and the given inputs
    pub fn request<'a>(
        &self,
        samples: Option<&'a [GazeSample]>,
        signals: Option<EogSignals<'a>>,
    ) -> DetectionRequest<'a> {
        let mut request = DetectionRequest::new(self.method)
            .annotation_thresholds(self.annotation.clone())
            .wavelet_parameters(self.wavelet.clone())
            .sampling_rate(self.wavelet.sampling_rate)
            .mask_only(self.mask_only);
        if let Some(samples) = samples {
            request = request.samples(samples);
        }
        if let Some(signals) = signals {
            request = request.signals(signals);
        }
        if let Some(screen_size) = self.screen_size {
            request = request.screen_size(screen_size);
        }
        request
    }
}
