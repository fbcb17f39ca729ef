//! Error types for beatmap processing.

use glissade_geometry::CurveError;
use std::fmt;

/// Errors raised while processing the sliders of a beatmap.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// A slider curve could not be built or modified.
    Curve {
        /// Index of the slider in the beatmap.
        index: usize,
        source: CurveError,
    },

    /// A slider velocity that is not a positive finite number.
    InvalidVelocity { index: usize, velocity: f32 },

    /// No slider at this index.
    UnknownSlider { index: usize },

    /// A processing task panicked.
    TaskPanicked {
        /// Index of the chunk the task was processing.
        chunk: usize,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Curve { index, source } => {
                write!(f, "Slider {}: {}", index, source)
            }
            ProcessError::InvalidVelocity { index, velocity } => {
                write!(f, "Slider {} has invalid velocity {}", index, velocity)
            }
            ProcessError::UnknownSlider { index } => write!(f, "No slider at index {}", index),
            ProcessError::TaskPanicked { chunk } => {
                write!(f, "Processing task for chunk {} panicked", chunk)
            }
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::Curve { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for processing operations.
pub type ProcessResult<T> = Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_curve_error_is_chained() {
        let err = ProcessError::Curve {
            index: 3,
            source: CurveError::EmptySection { section: 1 },
        };

        assert_eq!(err.to_string(), "Slider 3: Control section 1 has no points");
        assert!(err.source().is_some());
        assert!(ProcessError::UnknownSlider { index: 0 }.source().is_none());
    }
}
