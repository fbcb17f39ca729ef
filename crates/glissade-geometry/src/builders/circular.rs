//! Circular arcs through three points ("perfect" curves).

use super::{CurvePolyline, bezier, polyline_length};
use crate::config::CurveConfig;
use crate::curve::{ControlSection, CurveSpec};
use crate::error::CurveResult;
use crate::flatten::FlattenScratch;
use glam::{DVec2, Vec2};
use glissade_core::math::direction_of;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Below this cross product the three points are considered collinear.
const COLLINEAR_EPSILON: f64 = 1e-3;

/// Arcs with a larger radius are built as straight pieces.
pub const MAX_ARC_RADIUS: f32 = 1e5;

/// A circle through three control points, with the arc running from the
/// first point through the second to the third.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Vec2,
    pub radius: f32,
    /// Angle of the first point around the center
    pub start_angle: f32,
    /// Unsigned angle covered from the first to the third point
    pub span: f32,
    /// `1.0` for counter-clockwise (increasing angle), `-1.0` otherwise
    pub direction: f32,
}

impl CircularArc {
    /// Fit the circle through `a`, `b` and `c`.
    ///
    /// Returns `None` when no usable circle exists: `a` and `c` coincide, the
    /// points are collinear, or the radius is not finite or exceeds
    /// [`MAX_ARC_RADIUS`].
    pub fn through(a: Vec2, b: Vec2, c: Vec2) -> Option<Self> {
        if a.distance_squared(c) <= f32::EPSILON {
            return None;
        }

        // Solved in f64 relative to `a`; nearly straight triples put the
        // center very far away
        let origin = a.as_dvec2();
        let b = b.as_dvec2() - origin;
        let c = c.as_dvec2() - origin;

        let cross = b.perp_dot(c - b);
        if cross.abs() <= COLLINEAR_EPSILON {
            return None;
        }

        let (b_sq, c_sq) = (b.length_squared(), c.length_squared());
        let offset = DVec2::new(c.y * b_sq - b.y * c_sq, b.x * c_sq - c.x * b_sq) / (2.0 * cross);

        let radius = offset.length();
        if !radius.is_finite() || radius <= f32::EPSILON as f64 || radius > MAX_ARC_RADIUS as f64 {
            return None;
        }

        let direction = if cross > 0.0 { 1.0 } else { -1.0 };
        let start_angle = (-offset).y.atan2(-offset.x);
        let end_angle = (c - offset).y.atan2((c - offset).x);
        let span = ((end_angle - start_angle) * direction).rem_euclid(std::f64::consts::TAU);

        Some(Self {
            center: (origin + offset).as_vec2(),
            radius: radius as f32,
            start_angle: start_angle as f32,
            span: (span as f32).min(TAU),
            direction: direction as f32,
        })
    }

    /// Length of the arc from the first to the third point.
    pub fn natural_length(&self) -> f32 {
        self.span * self.radius
    }

    /// Point at `angle` radians travelled along the arc.
    pub fn point_at(&self, angle: f32) -> Vec2 {
        let theta = self.start_angle as f64 + angle as f64 * self.direction as f64;
        let (sin, cos) = theta.sin_cos();
        (self.center.as_dvec2() + DVec2::new(cos, sin) * self.radius as f64).as_vec2()
    }

    /// Unit tangent (direction of travel) at `angle` radians along the arc.
    pub fn tangent_at(&self, angle: f32) -> Vec2 {
        direction_of(self.start_angle + angle * self.direction + FRAC_PI_2 * self.direction)
    }

    /// Sample the arc so it covers `length` units.
    ///
    /// Shorter lengths cut the arc early. Longer lengths sample the whole arc
    /// and then continue along the end tangent with a single extra point; the
    /// result is only approximately arc-length uniform and relies on
    /// reparameterization to land exactly on `length`.
    pub fn sample(&self, length: f32, spacing: f32) -> CurvePolyline {
        let natural = self.natural_length();
        let target = if length > 0.0 { length } else { natural };
        let angle = if target < natural {
            target / self.radius
        } else {
            self.span
        };

        let count = ((angle * self.radius / spacing).ceil() as usize).max(1);
        let step = angle / count as f32;

        let mut points: Vec<Vec2> = (0..=count).map(|i| self.point_at(step * i as f32)).collect();

        let extension = target - natural;
        let extended = extension > 0.0;
        if extended {
            let end = self.point_at(self.span);
            points.push(end + self.tangent_at(self.span) * extension);
        }

        let length = polyline_length(&points);
        CurvePolyline {
            points,
            length,
            extended,
        }
    }
}

/// Build a circular arc curve.
///
/// Anything that is not exactly three well-placed points falls back to a
/// polynomial curve. Degenerate triples are treated as two straight pieces.
pub fn build(
    spec: &CurveSpec,
    config: &CurveConfig,
    scratch: &mut FlattenScratch,
) -> CurveResult<CurvePolyline> {
    let control: Vec<Vec2> = spec.control_points().collect();
    let [a, b, c] = control[..] else {
        tracing::debug!(
            "Circular curve with {} control points, building it as a polynomial curve",
            control.len()
        );
        return bezier::build(&spec.sections, config, scratch);
    };

    match CircularArc::through(a, b, c) {
        Some(arc) => {
            let polyline = arc.sample(spec.length, config.arc_spacing);
            if polyline.extended {
                tracing::trace!(
                    "Circular arc extended past its natural length {:.2} to {:.2}",
                    arc.natural_length(),
                    spec.length
                );
            }
            Ok(polyline)
        }
        None => {
            tracing::debug!("Degenerate circular arc {:?}, {:?}, {:?}", a, b, c);
            bezier::build(&degenerate_sections(a, b, c), config, scratch)
        }
    }
}

/// Two straight sections `a -> b -> c` replacing a degenerate arc.
pub fn degenerate_sections(a: Vec2, b: Vec2, c: Vec2) -> Vec<ControlSection> {
    vec![
        ControlSection::new(vec![a, b]),
        ControlSection::new(vec![b, c]),
    ]
}
