//! Curve builders.
//!
//! Each builder turns the control points of one [`CurveKind`] into a dense
//! polyline. The polyline is later fitted to the declared length by
//! [`reparameterize`](crate::reparameterize).

pub mod bezier;
pub mod catmull;
pub mod circular;
pub mod linear;

use crate::config::CurveConfig;
use crate::curve::{CurveKind, CurveSpec};
use crate::error::CurveResult;
use crate::flatten::FlattenScratch;
use glam::Vec2;

/// Dense polyline produced by a curve builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurvePolyline {
    /// Sampled points, not necessarily equidistant
    pub points: Vec<Vec2>,
    /// Sum of the distances between consecutive points
    pub length: f32,
    /// A tangential extension was appended to reach the declared length
    pub extended: bool,
}

impl CurvePolyline {
    /// Wrap sampled points, measuring their length.
    pub fn new(points: Vec<Vec2>) -> Self {
        let length = polyline_length(&points);
        Self {
            points,
            length,
            extended: false,
        }
    }

    /// Get the number of sampled points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if nothing was sampled.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sum of Euclidean distances between consecutive points.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Build the raw polyline for `spec` with the builder matching its kind.
pub fn build_polyline(
    spec: &CurveSpec,
    config: &CurveConfig,
    scratch: &mut FlattenScratch,
) -> CurveResult<CurvePolyline> {
    match spec.kind {
        CurveKind::Linear => Ok(linear::build(spec)),
        CurveKind::Circular => circular::build(spec, config, scratch),
        CurveKind::Polynomial => bezier::build(&spec.sections, config, scratch),
        CurveKind::CatmullRom => Ok(catmull::build(spec, config)),
    }
}

/// Append `points` to `out`, skipping a first point equal to the last one already present.
pub(crate) fn append_joined(out: &mut Vec<Vec2>, points: &[Vec2]) {
    let skip = match (out.last(), points.first()) {
        (Some(last), Some(first)) if last == first => 1,
        _ => 0,
    };
    out.extend_from_slice(&points[skip..]);
}
