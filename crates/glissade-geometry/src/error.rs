//! Error types for curve construction.

use std::fmt;

/// Errors raised while building or mutating a slider path.
///
/// Degenerate shapes (collinear arcs, coincident points, zero lengths) are not
/// errors; they fall back to simpler curves. These variants only cover input
/// that a well-formed beatmap can never produce.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A control section without any points.
    EmptySection {
        /// Index of the offending section.
        section: usize,
    },

    /// A control point with a NaN or infinite coordinate.
    NonFiniteControlPoint {
        /// Index of the section containing the point.
        section: usize,
        /// Index of the point inside its section.
        index: usize,
    },

    /// The stacking translation was already applied to this path.
    StackOffsetAlreadyApplied,
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveError::EmptySection { section } => {
                write!(f, "Control section {} has no points", section)
            }
            CurveError::NonFiniteControlPoint { section, index } => write!(
                f,
                "Control point {} of section {} is not finite",
                index, section
            ),
            CurveError::StackOffsetAlreadyApplied => {
                write!(f, "Stack offset was already applied to this path")
            }
        }
    }
}

impl std::error::Error for CurveError {}

/// Result type alias for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;
