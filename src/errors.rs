//! Error types for tracker construction and input validation
//!
//! This module provides proper error handling instead of panics.

use std::fmt;

/// Errors raised when tracker parameters fail validation
#[derive(Debug, Clone)]
pub enum ParameterError {
    /// Spatial bandwidth is zero, negative, or non-finite
    NonPositiveSigmaSpace {
        /// The rejected value
        value: f64,
    },

    /// Temporal bandwidth is zero, negative, or non-finite
    NonPositiveSigmaTime {
        /// The rejected value
        value: f64,
    },

    /// Association threshold is outside (0, 1]
    ThresholdOutOfRange {
        /// The rejected value
        value: f64,
    },

    /// A builder was finalized without a required parameter
    MissingParameter {
        /// Name of the missing parameter
        name: &'static str,
    },
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::NonPositiveSigmaSpace { value } => {
                write!(f, "sigma_space must be finite and positive, got {}", value)
            }
            ParameterError::NonPositiveSigmaTime { value } => {
                write!(f, "sigma_time must be finite and positive, got {}", value)
            }
            ParameterError::ThresholdOutOfRange { value } => {
                write!(
                    f,
                    "gaussian_threshold must lie in (0, 1], got {}",
                    value
                )
            }
            ParameterError::MissingParameter { name } => {
                write!(f, "missing required parameter: {}", name)
            }
        }
    }
}

impl std::error::Error for ParameterError {}

/// Errors raised when an event stream fails validation
#[derive(Debug, Clone)]
pub enum InputError {
    /// An event carries a NaN or infinite timestamp
    NonFiniteTimestamp {
        /// Position of the offending event in the input slice
        index: usize,
        /// The rejected timestamp
        value: f64,
    },

    /// An event timestamp is earlier than its predecessor
    DecreasingTimestamp {
        /// Position of the offending event in the input slice
        index: usize,
        /// Timestamp of the preceding event
        previous: f64,
        /// The out-of-order timestamp
        current: f64,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NonFiniteTimestamp { index, value } => {
                write!(f, "event {} has non-finite timestamp {}", index, value)
            }
            InputError::DecreasingTimestamp {
                index,
                previous,
                current,
            } => {
                write!(
                    f,
                    "event {} has timestamp {} earlier than predecessor {}",
                    index, current, previous
                )
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Errors that can occur while running the tracker
#[derive(Debug, Clone)]
pub enum TrackError {
    /// Tracker parameters failed validation
    Parameter(ParameterError),

    /// The event stream failed validation
    Input(InputError),
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::Parameter(e) => write!(f, "Invalid parameters: {}", e),
            TrackError::Input(e) => write!(f, "Invalid input: {}", e),
        }
    }
}

impl std::error::Error for TrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackError::Parameter(e) => Some(e),
            TrackError::Input(e) => Some(e),
        }
    }
}

impl From<ParameterError> for TrackError {
    fn from(e: ParameterError) -> Self {
        TrackError::Parameter(e)
    }
}

impl From<InputError> for TrackError {
    fn from(e: InputError) -> Self {
        TrackError::Input(e)
    }
}
