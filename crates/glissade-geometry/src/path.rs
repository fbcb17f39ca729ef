//! Slider paths.
//!
//! A [`SliderPath`] is the arc-length parameterized polyline of one slider,
//! built once when the beatmap is loaded and queried every frame for the ball
//! position, the body mesh and gameplay events.

use crate::builders::build_polyline;
use crate::config::CurveConfig;
use crate::curve::{CurveKind, CurveSpec};
use crate::error::{CurveError, CurveResult};
use crate::flatten::FlattenScratch;
use crate::reparam::{Parameterized, reparameterize};
use glam::Vec2;
use glissade_core::math::{LENGTH_EPSILON, angle_of};
use glissade_core::profiling::profile_function;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounding box of `points`, or a zero box at the origin when empty.
    pub fn from_points(points: &[Vec2]) -> Self {
        let Some(&first) = points.first() else {
            return Self {
                min: Vec2::ZERO,
                max: Vec2::ZERO,
            };
        };

        points.iter().fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, &p| Self {
                min: bounds.min.min(p),
                max: bounds.max.max(p),
            },
        )
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Check if `point` lies inside the box, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(amount),
            max: self.max + Vec2::splat(amount),
        }
    }

    /// Move the box by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Geometry of the segment between two consecutive path points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentInfo {
    /// Euclidean length
    pub length: f32,
    /// Direction of travel in radians
    pub angle: f32,
    /// Unit direction of travel
    pub direction: Vec2,
    /// Unit vector to the left of the direction of travel
    pub normal: Vec2,
    /// Shorter than [`LENGTH_EPSILON`]; angle and normal are inherited from a neighbour
    pub degenerate: bool,
}

/// Arc-length parameterized path of one slider.
///
/// Completions are strictly increasing from `0.0` to exactly `1.0` and
/// `completions[i] * length` is the distance travelled when reaching
/// `points[i]`. Paths with zero or one point are valid and answer every
/// query with that point.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderPath {
    kind: CurveKind,
    points: Vec<Vec2>,
    completions: Vec<f32>,
    segments: Vec<SegmentInfo>,
    length: f32,
    bounds: Bounds,
    stacked: bool,
}

impl SliderPath {
    /// Build the path described by `spec` with the default [`CurveConfig`].
    ///
    /// `scratch` is working memory for Bezier flattening and can be reused
    /// across paths built on the same thread.
    pub fn new(spec: &CurveSpec, scratch: &mut FlattenScratch) -> CurveResult<Self> {
        Self::with_config(spec, &CurveConfig::default(), scratch)
    }

    /// Build the path described by `spec` with custom sampling parameters.
    pub fn with_config(
        spec: &CurveSpec,
        config: &CurveConfig,
        scratch: &mut FlattenScratch,
    ) -> CurveResult<Self> {
        profile_function!();

        spec.validate()?;

        if spec.control_point_count() == 0 {
            tracing::debug!("{:?} curve without control points", spec.kind);
            let mut path = Self::point(Vec2::ZERO);
            path.kind = spec.kind;
            return Ok(path);
        }

        let polyline = build_polyline(spec, config, scratch)?;
        let fitted = reparameterize(&polyline.points, spec.length);

        tracing::trace!(
            "Built {:?} path: {} control points, {} samples, {:.2} sampled, {:.2} fitted",
            spec.kind,
            spec.control_point_count(),
            fitted.points.len(),
            polyline.length,
            fitted.length
        );

        Ok(Self::from_parameterized(spec.kind, fitted))
    }

    /// Fit an already sampled polyline to `length` (`0.0` keeps its natural length).
    pub fn from_polyline(kind: CurveKind, polyline: &[Vec2], length: f32) -> Self {
        Self::from_parameterized(kind, reparameterize(polyline, length))
    }

    /// A zero-length path sitting at `position`.
    pub fn point(position: Vec2) -> Self {
        Self::from_parameterized(
            CurveKind::Linear,
            Parameterized {
                points: vec![position],
                completions: vec![0.0],
                length: 0.0,
            },
        )
    }

    fn from_parameterized(kind: CurveKind, fitted: Parameterized) -> Self {
        let segments = segment_infos(&fitted.points);
        let bounds = Bounds::from_points(&fitted.points);

        Self {
            kind,
            points: fitted.points,
            completions: fitted.completions,
            segments,
            length: fitted.length,
            bounds,
            stacked: false,
        }
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    /// Get the sampled points.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Get the completion of every sampled point.
    pub fn completions(&self) -> &[f32] {
        &self.completions
    }

    /// Get the segments between consecutive points.
    pub fn segments(&self) -> &[SegmentInfo] {
        &self.segments
    }

    /// Total length in playfield units.
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Check if the stacking offset was applied.
    pub fn is_stacked(&self) -> bool {
        self.stacked
    }

    /// Position at completion `1.0`.
    pub fn end_position(&self) -> Vec2 {
        self.points.last().copied().unwrap_or(Vec2::ZERO)
    }

    /// Position at `completion`, clamped to `[0, 1]`.
    ///
    /// A completion that hits a sample exactly returns that sample unchanged.
    pub fn position_at(&self, completion: f32) -> Vec2 {
        match self.points.as_slice() {
            [] => return Vec2::ZERO,
            [single] => return *single,
            _ => {}
        }

        let completion = clamp_completion(completion);
        let upper = self
            .completions
            .partition_point(|&c| c < completion)
            .min(self.points.len() - 1);

        if upper == 0 || self.completions[upper] == completion {
            return self.points[upper];
        }

        let lower = upper - 1;
        let span = self.completions[upper] - self.completions[lower];
        if span <= 0.0 {
            return self.points[upper];
        }

        let t = (completion - self.completions[lower]) / span;
        self.points[lower].lerp(self.points[upper], t)
    }

    /// Index of the segment bracketing `completion`.
    ///
    /// At an exact sample this is the segment departing from it; at `1.0` it
    /// is the last segment. Returns `0` for paths without segments.
    pub fn index_at(&self, completion: f32) -> usize {
        let completion = clamp_completion(completion);
        self.completions
            .partition_point(|&c| c <= completion)
            .saturating_sub(1)
            .min(self.segments.len().saturating_sub(1))
    }

    /// Direction of travel in radians at `completion`.
    pub fn angle_at(&self, completion: f32) -> f32 {
        self.segment_at(completion).map_or(0.0, |s| s.angle)
    }

    /// Unit direction of travel at `completion`.
    pub fn tangent_at(&self, completion: f32) -> Vec2 {
        self.segment_at(completion).map_or(Vec2::X, |s| s.direction)
    }

    /// Unit vector to the left of the direction of travel at `completion`.
    pub fn normal_at(&self, completion: f32) -> Vec2 {
        self.segment_at(completion).map_or(Vec2::Y, |s| s.normal)
    }

    fn segment_at(&self, completion: f32) -> Option<&SegmentInfo> {
        self.segments.get(self.index_at(completion))
    }

    /// Translate the whole path by the stacking `offset`.
    ///
    /// Stacking is applied at most once per path; later calls are rejected and
    /// leave the path untouched.
    pub fn apply_stack_offset(&mut self, offset: Vec2) -> CurveResult<()> {
        if self.stacked {
            tracing::warn!("Stack offset {:?} rejected, path is already stacked", offset);
            return Err(CurveError::StackOffsetAlreadyApplied);
        }

        for point in &mut self.points {
            *point += offset;
        }
        self.bounds = self.bounds.translate(offset);
        self.stacked = true;
        Ok(())
    }
}

fn clamp_completion(completion: f32) -> f32 {
    if completion.is_nan() {
        0.0
    } else {
        completion.clamp(0.0, 1.0)
    }
}

/// Compute segment geometry, giving degenerate segments the angle of the
/// previous valid segment (or the first valid one for a leading run).
fn segment_infos(points: &[Vec2]) -> Vec<SegmentInfo> {
    let mut segments: Vec<SegmentInfo> = points
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            let length = delta.length();
            let degenerate = length < LENGTH_EPSILON;
            let direction = if degenerate { Vec2::X } else { delta / length };
            SegmentInfo {
                length,
                angle: angle_of(direction),
                direction,
                normal: direction.perp(),
                degenerate,
            }
        })
        .collect();

    let first_valid = segments.iter().find(|s| !s.degenerate).copied();
    let mut previous = first_valid;

    for segment in &mut segments {
        if !segment.degenerate {
            previous = Some(*segment);
            continue;
        }

        match previous {
            Some(valid) => {
                segment.angle = valid.angle;
                segment.direction = valid.direction;
                segment.normal = valid.normal;
            }
            None => {
                segment.angle = 0.0;
                segment.direction = Vec2::X;
                segment.normal = Vec2::Y;
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn l_shape() -> SliderPath {
        SliderPath::from_polyline(
            CurveKind::Linear,
            &[Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)],
            0.0,
        )
    }

    #[test]
    fn test_position_at_samples_and_between() {
        let path = l_shape();

        assert_eq!(path.position_at(0.0), Vec2::ZERO);
        assert_eq!(path.position_at(0.5), Vec2::new(100.0, 0.0));
        assert_eq!(path.position_at(1.0), Vec2::new(100.0, 100.0));
        assert!(path.position_at(0.25).distance(Vec2::new(50.0, 0.0)) < 1e-4);
        assert!(path.position_at(0.75).distance(Vec2::new(100.0, 50.0)) < 1e-4);
    }

    #[test]
    fn test_position_at_clamps() {
        let path = l_shape();

        assert_eq!(path.position_at(-1.0), Vec2::ZERO);
        assert_eq!(path.position_at(f32::NAN), Vec2::ZERO);
        assert_eq!(path.position_at(3.0), Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_angle_is_stepwise() {
        let path = l_shape();

        assert_eq!(path.angle_at(0.0), 0.0);
        assert_eq!(path.angle_at(0.49), 0.0);
        // At an exact sample the departing segment wins
        assert!((path.angle_at(0.5) - FRAC_PI_2).abs() < 1e-6);
        assert!((path.angle_at(1.0) - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(path.index_at(1.0), 1);
    }

    #[test]
    fn test_tangent_and_normal() {
        let path = l_shape();

        assert!(path.tangent_at(0.1).distance(Vec2::X) < 1e-6);
        assert!(path.normal_at(0.1).distance(Vec2::Y) < 1e-6);
        assert!(path.tangent_at(0.9).distance(Vec2::Y) < 1e-6);
        assert!(path.normal_at(0.9).distance(Vec2::NEG_X) < 1e-6);
    }

    #[test]
    fn test_single_point_path() {
        let path = SliderPath::point(Vec2::new(7.0, 8.0));

        assert_eq!(path.position_at(0.0), Vec2::new(7.0, 8.0));
        assert_eq!(path.position_at(1.0), Vec2::new(7.0, 8.0));
        assert_eq!(path.angle_at(0.5), 0.0);
        assert_eq!(path.length(), 0.0);
        assert!(path.segments().is_empty());
    }

    #[test]
    fn test_no_control_points() {
        let spec = CurveSpec::new(CurveKind::Polynomial, Vec::new(), 100.0);
        let path = SliderPath::new(&spec, &mut FlattenScratch::new()).expect("valid spec");

        assert_eq!(path.points(), &[Vec2::ZERO]);
        assert_eq!(path.kind(), CurveKind::Polynomial);
    }

    #[test]
    fn test_degenerate_segments_inherit_angle() {
        let points = [
            Vec2::ZERO,
            Vec2::new(0.0, 10.0),
            Vec2::new(0.0, 10.00001),
            Vec2::new(10.0, 10.0),
        ];
        let segments = segment_infos(&points);

        assert!(!segments[0].degenerate);
        assert!(segments[1].degenerate);
        assert_eq!(segments[1].angle, segments[0].angle);
        assert_eq!(segments[1].normal, segments[0].normal);
    }

    #[test]
    fn test_leading_degenerate_uses_first_valid() {
        let points = [Vec2::ZERO, Vec2::new(0.00001, 0.0), Vec2::new(0.0, 10.0)];
        let segments = segment_infos(&points);

        assert!(segments[0].degenerate);
        assert_eq!(segments[0].angle, segments[1].angle);
    }

    #[test]
    fn test_stack_offset_applies_once() {
        let mut path = l_shape();
        let offset = Vec2::new(-6.4, -6.4);

        assert!(path.apply_stack_offset(offset).is_ok());
        assert!(path.is_stacked());
        assert_eq!(path.position_at(0.0), offset);
        assert_eq!(path.bounds().min, offset);

        assert_eq!(
            path.apply_stack_offset(offset),
            Err(CurveError::StackOffsetAlreadyApplied)
        );
        assert_eq!(path.position_at(0.0), offset);
    }

    #[test]
    fn test_bounds() {
        let bounds = l_shape().bounds();

        assert_eq!(bounds.min, Vec2::ZERO);
        assert_eq!(bounds.max, Vec2::new(100.0, 100.0));
        assert!(bounds.contains(Vec2::new(50.0, 50.0)));
        assert!(!bounds.inflate(1.0).contains(Vec2::new(102.0, 0.0)));
        assert_eq!(bounds.center(), Vec2::new(50.0, 50.0));
    }
}
