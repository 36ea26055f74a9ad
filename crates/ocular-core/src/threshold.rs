//! Optional-bound threshold ranges

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Inclusive range with optional lower and upper bounds
///
/// An open bound is not checked. At least one bound must be present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    #[serde(default)]
    pub lower: Option<f64>,
    #[serde(default)]
    pub upper: Option<f64>,
}

impl ThresholdRange {
    /// Create a validated range
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Result<Self> {
        let range = Self { lower, upper };
        range.validate()?;
        Ok(range)
    }

    /// Range bounded on both sides
    pub fn between(lower: f64, upper: f64) -> Result<Self> {
        Self::new(Some(lower), Some(upper))
    }

    /// Range with only a lower bound
    pub fn at_least(lower: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }

    /// Range with only an upper bound
    pub fn at_most(upper: f64) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }

    /// Check the range is well formed
    pub fn validate(&self) -> Result<()> {
        if self.lower.is_some_and(f64::is_nan) || self.upper.is_some_and(f64::is_nan) {
            return Err(Error::InvalidParameter(
                "threshold bounds must not be NaN".to_string(),
            ));
        }
        match (self.lower, self.upper) {
            (None, None) => Err(Error::InvalidParameter(
                "threshold range needs a lower or an upper bound".to_string(),
            )),
            (Some(lower), Some(upper)) if lower > upper => Err(Error::InvalidParameter(format!(
                "threshold lower bound {lower} exceeds upper bound {upper}"
            ))),
            _ => Ok(()),
        }
    }

    /// Check if `value` satisfies every present bound
    pub fn contains(&self, value: f64) -> bool {
        self.lower.map_or(true, |lower| value >= lower)
            && self.upper.map_or(true, |upper| value <= upper)
    }
}
