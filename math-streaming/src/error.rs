//! Error types for the streaming pipeline.
//!
//! Every failure in this crate is a deterministic domain error: the
//! pipeline is purely numeric, so nothing is retried and a failing
//! evaluation returns no partial result.

use thiserror::Error;

/// Errors that can occur while building or evaluating a streaming solution.
#[derive(Debug, Error)]
pub enum StreamingError {
    /// A sample array is empty or too short for the requested operation.
    #[error("not enough samples: got {got}, need at least {need}")]
    EmptySamples {
        /// Number of samples supplied
        got: usize,
        /// Minimum number of samples required
        need: usize,
    },

    /// Two arrays that must be aligned have different lengths.
    #[error("length mismatch: {left} samples vs {right} samples")]
    LengthMismatch {
        /// Length of the first array
        left: usize,
        /// Length of the second array
        right: usize,
    },

    /// Sample abscissas are not strictly monotonic.
    #[error("samples must be strictly monotonic (violated at index {index})")]
    NonMonotonic {
        /// Index of the first offending sample
        index: usize,
    },

    /// A radial sample is zero.
    #[error("radial sample {index} is zero")]
    ZeroRadius {
        /// Index of the zero sample
        index: usize,
    },

    /// A radial sample is negative or not finite.
    #[error("radial sample {index} = {r} is not a finite positive radius")]
    NonPositiveRadius {
        /// Index of the offending sample
        index: usize,
        /// The offending radius
        r: f64,
    },

    /// A radial sample lies inside the cylinder or is not finite.
    #[error("radial sample {index} = {r} is not a finite radius >= 1")]
    RadiusBelowSurface {
        /// Index of the offending sample
        index: usize,
        /// The offending radius
        r: f64,
    },

    /// Radial samples do not start on the cylinder surface r = 1.
    #[error("radial samples must start at the cylinder surface r = 1, got {first}")]
    SurfaceMismatch {
        /// The first radial sample
        first: f64,
    },

    /// The scaled Reynolds number does not describe a physical configuration.
    #[error("degenerate Reynolds number: {reynolds} (must be finite and > 0)")]
    DegenerateReynolds {
        /// The rejected Reynolds number
        reynolds: f64,
    },

    /// The expansion amplitude is not finite.
    #[error("invalid amplitude epsilon: {epsilon} (must be finite)")]
    InvalidAmplitude {
        /// The rejected amplitude
        epsilon: f64,
    },

    /// An interpolation query falls outside the sampled range.
    #[error("interpolation at {x} is outside the sampled range [{min}, {max}]")]
    OutOfRange {
        /// Query abscissa
        x: f64,
        /// Smallest sampled abscissa
        min: f64,
        /// Largest sampled abscissa
        max: f64,
    },

    /// The polar angle is undefined (grid point at the origin).
    #[error("polar angle undefined at grid point {index} (x = y = 0)")]
    UndefinedAngle {
        /// Flat index of the grid point
        index: usize,
    },

    /// Array shapes that must agree do not.
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Shape of the left operand
        left: Vec<usize>,
        /// Shape of the right operand
        right: Vec<usize>,
    },

    /// A computation produced NaN or infinity.
    #[error("non-finite value produced in {stage}")]
    NonFinite {
        /// Pipeline stage that produced the value
        stage: &'static str,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialisation failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for streaming operations.
pub type Result<T> = std::result::Result<T, StreamingError>;

impl StreamingError {
    /// Returns `true` if the error comes from a malformed sample array.
    pub fn is_sample_error(&self) -> bool {
        matches!(
            self,
            StreamingError::EmptySamples { .. }
                | StreamingError::LengthMismatch { .. }
                | StreamingError::NonMonotonic { .. }
        )
    }

    /// Returns `true` if the error comes from an invalid radius or angle.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            StreamingError::ZeroRadius { .. }
                | StreamingError::NonPositiveRadius { .. }
                | StreamingError::RadiusBelowSurface { .. }
                | StreamingError::SurfaceMismatch { .. }
                | StreamingError::UndefinedAngle { .. }
                | StreamingError::OutOfRange { .. }
        )
    }

    /// Returns `true` if the error comes from the physical parameters.
    pub fn is_parameter_error(&self) -> bool {
        matches!(
            self,
            StreamingError::DegenerateReynolds { .. } | StreamingError::InvalidAmplitude { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamingError::DegenerateReynolds { reynolds: -1.0 };
        assert_eq!(
            err.to_string(),
            "degenerate Reynolds number: -1 (must be finite and > 0)"
        );
    }

    #[test]
    fn test_out_of_range_display() {
        let err = StreamingError::OutOfRange {
            x: 0.5,
            min: 1.0,
            max: 20.0,
        };
        assert!(err.to_string().contains("0.5"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_categories() {
        let zero = StreamingError::ZeroRadius { index: 3 };
        let len = StreamingError::LengthMismatch { left: 2, right: 3 };
        let re = StreamingError::DegenerateReynolds { reynolds: 0.0 };

        assert!(zero.is_domain_error());
        assert!(!zero.is_sample_error());
        assert!(len.is_sample_error());
        assert!(re.is_parameter_error());
        assert!(!re.is_domain_error());
    }
}
