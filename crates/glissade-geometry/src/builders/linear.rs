//! Straight-line curves.

use super::{CurvePolyline, append_joined};
use crate::curve::CurveSpec;

/// Connect every control point with a straight piece.
///
/// The common two-point case yields a two-point polyline; fitting it to the
/// declared length moves the end point along the same direction.
pub fn build(spec: &CurveSpec) -> CurvePolyline {
    let mut points = Vec::with_capacity(spec.control_point_count());
    for section in &spec.sections {
        append_joined(&mut points, section.points());
    }

    CurvePolyline::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{ControlSection, CurveKind};
    use glam::Vec2;

    #[test]
    fn test_two_points() {
        let spec = CurveSpec::from_points(
            CurveKind::Linear,
            vec![Vec2::ZERO, Vec2::new(30.0, 40.0)],
            0.0,
        );

        let polyline = build(&spec);

        assert_eq!(polyline.points.len(), 2);
        assert!((polyline.length - 50.0).abs() < 1e-5);
    }

    #[test]
    fn test_sections_are_joined() {
        let spec = CurveSpec::new(
            CurveKind::Linear,
            vec![
                ControlSection::new(vec![Vec2::ZERO, Vec2::new(10.0, 0.0)]),
                ControlSection::new(vec![Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)]),
            ],
            0.0,
        );

        let polyline = build(&spec);

        assert_eq!(polyline.points.len(), 3);
        assert!((polyline.length - 20.0).abs() < 1e-5);
    }
}
