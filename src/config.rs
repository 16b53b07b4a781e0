//! Tracker configuration
//!
//! The tracker is controlled by four parameters: the spatial and temporal
//! bandwidths of the association kernel, the score threshold above which an
//! event joins a particle, and the minimum mass a quiet particle needs to
//! survive retirement. All four depend on the sensor and the stream's time
//! units and must always be supplied, by constructor argument or builder
//! setter; none has a default.

use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;

/// Complete tracker parameters.
///
/// # Example
///
/// ```
/// use particle_tracking_rs::TrackerParams;
///
/// let params = TrackerParams::builder()
///     .sigma_space(6.0)
///     .sigma_time(10_000.0)
///     .gaussian_threshold(0.8)
///     .mass_threshold(500)
///     .build()
///     .unwrap();
/// assert_eq!(params.gaussian_threshold, 0.8);
/// assert_eq!(params.mass_threshold, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerParams {
    /// Spatial bandwidth of the association kernel, in pixels.
    pub sigma_space: f64,
    /// Temporal bandwidth of the association kernel, in stream time units.
    pub sigma_time: f64,
    /// Score threshold in (0, 1] above which an event joins a particle.
    pub gaussian_threshold: f64,
    /// A quiet particle survives retirement only if its mass exceeds this.
    pub mass_threshold: usize,
}

impl TrackerParams {
    /// Create validated tracker parameters.
    pub fn new(
        sigma_space: f64,
        sigma_time: f64,
        gaussian_threshold: f64,
        mass_threshold: usize,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            sigma_space,
            sigma_time,
            gaussian_threshold,
            mass_threshold,
        };
        params.validate()?;
        Ok(params)
    }

    /// Create with builder pattern.
    pub fn builder() -> TrackerParamsBuilder {
        TrackerParamsBuilder::new()
    }

    /// Check all parameters against their valid ranges.
    ///
    /// Both bandwidths must be finite and positive, and the score threshold
    /// must lie in (0, 1]. NaN fails every check.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.sigma_space.is_finite() && self.sigma_space > 0.0) {
            return Err(ParameterError::NonPositiveSigmaSpace {
                value: self.sigma_space,
            });
        }
        if !(self.sigma_time.is_finite() && self.sigma_time > 0.0) {
            return Err(ParameterError::NonPositiveSigmaTime {
                value: self.sigma_time,
            });
        }
        if !(self.gaussian_threshold > 0.0 && self.gaussian_threshold <= 1.0) {
            return Err(ParameterError::ThresholdOutOfRange {
                value: self.gaussian_threshold,
            });
        }
        Ok(())
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Serialize to pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Builder for TrackerParams.
#[derive(Debug, Default)]
pub struct TrackerParamsBuilder {
    sigma_space: Option<f64>,
    sigma_time: Option<f64>,
    gaussian_threshold: Option<f64>,
    mass_threshold: Option<usize>,
}

impl TrackerParamsBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial bandwidth (required).
    pub fn sigma_space(mut self, sigma: f64) -> Self {
        self.sigma_space = Some(sigma);
        self
    }

    /// Set the temporal bandwidth (required).
    pub fn sigma_time(mut self, sigma: f64) -> Self {
        self.sigma_time = Some(sigma);
        self
    }

    /// Set the association score threshold (required).
    pub fn gaussian_threshold(mut self, threshold: f64) -> Self {
        self.gaussian_threshold = Some(threshold);
        self
    }

    /// Set the retirement mass threshold (required).
    pub fn mass_threshold(mut self, mass: usize) -> Self {
        self.mass_threshold = Some(mass);
        self
    }

    /// Build and validate the parameters.
    pub fn build(self) -> Result<TrackerParams, ParameterError> {
        let params = TrackerParams {
            sigma_space: self
                .sigma_space
                .ok_or(ParameterError::MissingParameter { name: "sigma_space" })?,
            sigma_time: self
                .sigma_time
                .ok_or(ParameterError::MissingParameter { name: "sigma_time" })?,
            gaussian_threshold: self.gaussian_threshold.ok_or(
                ParameterError::MissingParameter {
                    name: "gaussian_threshold",
                },
            )?,
            mass_threshold: self
                .mass_threshold
                .ok_or(ParameterError::MissingParameter {
                    name: "mass_threshold",
                })?,
        };
        params.validate()?;
        Ok(params)
    }
}
