//! Uniform Catmull-Rom splines.

use super::CurvePolyline;
use crate::config::CurveConfig;
use crate::curve::CurveSpec;
use glam::Vec2;

/// Sample a Catmull-Rom spline through every control point.
///
/// Missing neighbours at either end are extrapolated linearly, so a two-point
/// spline degenerates to the straight segment between them.
pub fn build(spec: &CurveSpec, config: &CurveConfig) -> CurvePolyline {
    let control: Vec<Vec2> = spec.control_points().collect();
    if control.len() < 2 {
        return CurvePolyline::new(control);
    }

    let detail = config.catmull_detail.max(1);
    let mut points = Vec::with_capacity((control.len() - 1) * detail + 1);

    for i in 0..control.len() - 1 {
        let v2 = control[i];
        let v3 = control[i + 1];
        let v1 = if i > 0 { control[i - 1] } else { v2 * 2.0 - v3 };
        let v4 = if i + 2 < control.len() {
            control[i + 2]
        } else {
            v3 * 2.0 - v2
        };

        for k in 0..detail {
            points.push(catmull_rom(v1, v2, v3, v4, k as f32 / detail as f32));
        }
    }

    // The last window stops short of t = 1, so the real end point is appended
    points.push(control[control.len() - 1]);

    CurvePolyline::new(points)
}

/// Evaluate the uniform Catmull-Rom segment between `v2` and `v3`.
pub fn catmull_rom(v1: Vec2, v2: Vec2, v3: Vec2, v4: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;

    (v2 * 2.0
        + (v3 - v1) * t
        + (v1 * 2.0 - v2 * 5.0 + v3 * 4.0 - v4) * t2
        + (v2 * 3.0 - v1 - v3 * 3.0 + v4) * t3)
        * 0.5
}
