//! Error types for the phase unwrapping pipeline
//!
//! Invalid inputs and invalid configurations fail before any array work is
//! done; numerical degeneracy (zero-magnitude pixels) is handled inside the
//! algorithms and never surfaces as an error.

/// Error type for phase unwrapping operations.
#[derive(Debug, Clone, PartialEq)]
pub enum UnwrapError {
    /// Image length does not match the given dimensions
    ShapeMismatch { expected: usize, actual: usize },
    /// Weight map length does not match the image
    WeightMapShape { expected: usize, actual: usize },
    /// Fourier-shift step must be positive and finite
    InvalidShiftStep(f64),
    /// Unrecognized gradient method name
    UnknownGradientMethod(String),
    /// Unrecognized integration method name
    UnknownIntegrationMethod(String),
}

impl std::fmt::Display for UnwrapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnwrapError::ShapeMismatch { expected, actual } => {
                write!(f, "image length {} does not match dimensions ({} expected)", actual, expected)
            }
            UnwrapError::WeightMapShape { expected, actual } => {
                write!(f, "weight map length {} does not match image ({} expected)", actual, expected)
            }
            UnwrapError::InvalidShiftStep(step) => {
                write!(f, "fourier shift step must be positive, got {}", step)
            }
            UnwrapError::UnknownGradientMethod(name) => {
                write!(f, "unknown gradient method: {}", name)
            }
            UnwrapError::UnknownIntegrationMethod(name) => {
                write!(f, "unknown integration method: {}", name)
            }
        }
    }
}

impl std::error::Error for UnwrapError {}
