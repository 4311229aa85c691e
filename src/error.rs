//! Error types for the RLC transient solver.
//!
//! This module provides a unified error type [`TransientError`] that covers
//! all error conditions that can occur during parameter validation,
//! integration, polynomial fitting, maximization and report output.

use thiserror::Error;

/// Result type alias using [`TransientError`].
pub type Result<T> = std::result::Result<T, TransientError>;

/// Unified error type for all solver operations.
#[derive(Error, Debug)]
pub enum TransientError {
    // ============ Parameter Errors ============
    /// Invalid circuit parameter (negative or non-finite)
    #[error("Invalid parameter '{param}' = {value}: {message}")]
    InvalidParameter {
        param: &'static str,
        value: f64,
        message: String,
    },

    /// A parameter used as a divisor in the circuit model is zero
    #[error("Division by zero: parameter '{param}' must be non-zero")]
    DivisionByZero { param: &'static str },

    /// Invalid solver configuration (time window, step, tolerance)
    #[error("Invalid solver configuration: {message}")]
    InvalidConfig { message: String },

    // ============ Numerical Errors ============
    /// Numerical overflow detected during integration
    #[error("Numerical overflow at t = {time:.3e} s (value: {value:.2e})")]
    NumericalOverflow { time: f64, value: f64 },

    /// The polynomial fit is not well posed for the given data
    #[error("Invalid fit configuration (degree {degree}, {samples} samples): {message}")]
    InvalidFitConfiguration {
        degree: usize,
        samples: usize,
        message: String,
    },

    /// The maximum of the fitted polynomial lies on the search boundary
    #[error("No interior maximum in [{t0:.3e}, {t1:.3e}] s")]
    NoInteriorMaximum { t0: f64, t1: f64 },

    // ============ I/O Errors ============
    /// Error writing a report file
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TransientError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            value,
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid fit configuration error
    pub fn invalid_fit(degree: usize, samples: usize, message: impl Into<String>) -> Self {
        Self::InvalidFitConfiguration {
            degree,
            samples,
            message: message.into(),
        }
    }

    /// True for errors caused by the circuit parameters themselves.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameter { .. } | Self::DivisionByZero { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_grouping() {
        assert!(TransientError::DivisionByZero { param: "L" }.is_parameter_error());
        assert!(TransientError::invalid_parameter("R", -1.0, "negative").is_parameter_error());
        assert!(!TransientError::invalid_config("bad step").is_parameter_error());
        assert!(!TransientError::NoInteriorMaximum { t0: 0.0, t1: 1.0 }.is_parameter_error());
    }

    #[test]
    fn test_messages() {
        let err = TransientError::invalid_fit(5, 3, "degree must be below the sample count");
        assert_eq!(
            err.to_string(),
            "Invalid fit configuration (degree 5, 3 samples): degree must be below the sample count"
        );
        let err = TransientError::DivisionByZero { param: "L" };
        assert_eq!(err.to_string(), "Division by zero: parameter 'L' must be non-zero");
    }
}
