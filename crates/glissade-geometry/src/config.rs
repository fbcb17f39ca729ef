//! Tuning constants for curve construction.

/// Maximum deviation allowed when flattening Bezier curves, in playfield units.
pub const BEZIER_TOLERANCE: f32 = 0.25;

/// Target distance between consecutive samples of a circular arc.
pub const CIRCULAR_ARC_SPACING: f32 = 10.0;

/// Samples emitted per Catmull-Rom window.
pub const CATMULL_DETAIL: usize = 50;

/// Sampling parameters shared by the curve builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveConfig {
    /// Flatness tolerance for Bezier subdivision
    pub bezier_tolerance: f32,
    /// Spacing between circular arc samples
    pub arc_spacing: f32,
    /// Samples per Catmull-Rom window
    pub catmull_detail: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            bezier_tolerance: BEZIER_TOLERANCE,
            arc_spacing: CIRCULAR_ARC_SPACING,
            catmull_detail: CATMULL_DETAIL,
        }
    }
}

impl CurveConfig {
    /// Set the Bezier flatness tolerance.
    pub fn with_bezier_tolerance(mut self, tolerance: f32) -> Self {
        self.bezier_tolerance = tolerance.max(1e-3);
        self
    }

    /// Set the circular arc sample spacing.
    pub fn with_arc_spacing(mut self, spacing: f32) -> Self {
        self.arc_spacing = spacing.max(0.5);
        self
    }

    /// Set the number of samples per Catmull-Rom window.
    pub fn with_catmull_detail(mut self, detail: usize) -> Self {
        self.catmull_detail = detail.max(1);
        self
    }
}
