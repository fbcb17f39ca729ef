//! Slider body meshes.
//!
//! The body of a slider is a ribbon of constant radius around its path: a
//! rectangle per segment, a round fan on the outer side of every turn and a
//! semicircle cap at each end. Vertices form a plain triangle list in a fixed
//! order, which lets a snaking slider grow its mesh by appending instead of
//! rebuilding:
//!
//! 1. start cap at the first point,
//! 2. per fully revealed segment, the joint with the previous segment and then
//!    the segment body,
//! 3. the partially revealed segment up to the current completion, with its
//!    joint,
//! 4. end cap at the current position.
//!
//! Parts 1 and 2 never change once emitted and form the committed prefix.

use crate::dirty_ranges::DirtyRanges;
use crate::path::{SegmentInfo, SliderPath};
use crate::vertex::RibbonVertex;
use glam::Vec2;
use glissade_core::math::{LENGTH_EPSILON, direction_of, normalize_angle};
use glissade_core::profiling::profile_function;
use std::f32::consts::{FRAC_PI_2, PI};
use std::ops::Range;

/// Body radius of a circle size 4 hit object, in playfield units.
pub const DEFAULT_RIBBON_RADIUS: f32 = 36.48;

/// Maximum distance between the rim of a fan and the true circle.
pub const RIBBON_TOLERANCE: f32 = 0.25;

const MIN_ARC_STEP: f32 = 0.01;

/// Angle between consecutive fan spokes keeping a circle of `radius` within
/// `tolerance` of its polygon.
pub fn flattening_step(radius: f32, tolerance: f32) -> f32 {
    let radius = radius.abs();
    if radius <= tolerance {
        return FRAC_PI_2;
    }

    (2.0 * (1.0 - tolerance / radius).acos()).clamp(MIN_ARC_STEP, FRAC_PI_2)
}

/// Shape parameters of a ribbon mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonOptions {
    /// Distance from the centerline to the rim
    pub radius: f32,
    /// Maximum angle covered by one fan triangle
    pub arc_step: f32,
}

impl Default for RibbonOptions {
    fn default() -> Self {
        Self::with_radius(DEFAULT_RIBBON_RADIUS)
    }
}

impl RibbonOptions {
    /// Options for `radius`, with the arc step derived from [`RIBBON_TOLERANCE`].
    pub fn with_radius(radius: f32) -> Self {
        let radius = radius.abs();
        Self {
            radius,
            arc_step: flattening_step(radius, RIBBON_TOLERANCE),
        }
    }

    /// Override the fan angle step.
    pub fn with_arc_step(mut self, arc_step: f32) -> Self {
        self.arc_step = arc_step.clamp(MIN_ARC_STEP, FRAC_PI_2);
        self
    }

    /// Number of triangles in a fan sweeping `angle` radians.
    pub fn fan_steps(&self, angle: f32) -> usize {
        ((angle.abs() / self.arc_step).ceil() as usize).max(1)
    }
}

/// Incremental ribbon mesh of one slider.
///
/// [`update`](Self::update) only does work when the completion grows, and
/// then only rebuilds the part past the committed prefix. Going backwards
/// requires [`reset`](Self::reset) (or [`rebuild`](Self::rebuild)), as does
/// switching to a different or modified path.
#[derive(Debug, Clone, Default)]
pub struct RibbonMeshBuilder {
    options: RibbonOptions,
    vertices: Vec<RibbonVertex>,
    committed_len: usize,
    committed_segments: usize,
    /// Last non-degenerate segment of the committed prefix
    previous: Option<usize>,
    completion: Option<f32>,
    dirty: DirtyRanges,
}

impl RibbonMeshBuilder {
    pub fn new(options: RibbonOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RibbonOptions {
        &self.options
    }

    /// Forget the mesh; the next update starts from scratch.
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.committed_len = 0;
        self.committed_segments = 0;
        self.previous = None;
        self.completion = None;
        self.dirty.clear();
    }

    /// Mesh of `path` revealed up to `completion`.
    ///
    /// Returns the cached mesh without any work when `completion` is not past
    /// the one of the previous call.
    pub fn update(&mut self, path: &SliderPath, completion: f32) -> &[RibbonVertex] {
        let completion = if completion.is_nan() {
            0.0
        } else {
            completion.clamp(0.0, 1.0)
        };

        if self.completion.is_some_and(|cached| completion <= cached) {
            return &self.vertices;
        }

        profile_function!();

        let rebuilt_from = if self.completion.is_none() {
            self.start(path);
            0
        } else {
            self.committed_len
        };

        let target = path.index_at(completion).min(path.segments().len());

        self.vertices.truncate(self.committed_len);
        for index in self.committed_segments..target {
            self.push_segment(path, index);
        }
        self.committed_segments = self.committed_segments.max(target);
        self.committed_len = self.vertices.len();

        self.push_trailing(path, target, completion);

        self.dirty.truncate(self.vertices.len());
        self.dirty.mark_dirty(rebuilt_from, self.vertices.len());
        self.completion = Some(completion);

        tracing::trace!(
            "Ribbon at {:.3}: {} vertices, {} committed",
            completion,
            self.vertices.len(),
            self.committed_len
        );

        &self.vertices
    }

    /// Regenerate the mesh from scratch, for seeking backwards.
    pub fn rebuild(&mut self, path: &SliderPath, completion: f32) -> &[RibbonVertex] {
        self.reset();
        self.update(path, completion)
    }

    /// Length of the prefix that later updates never modify.
    pub fn committed_len(&self) -> usize {
        self.committed_len
    }

    /// Completion of the current mesh, `None` before the first update.
    pub fn completion(&self) -> Option<f32> {
        self.completion
    }

    pub fn vertices(&self) -> &[RibbonVertex] {
        &self.vertices
    }

    /// Vertex data as packed floats, ready for upload.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Vertex ranges changed since the last call.
    pub fn take_dirty_ranges(&mut self) -> Vec<Range<usize>> {
        self.dirty.take()
    }

    fn start(&mut self, path: &SliderPath) {
        self.reset();

        let start = path.points().first().copied().unwrap_or(Vec2::ZERO);
        let angle = path.segments().first().map_or(0.0, |s| s.angle);
        push_fan(
            &mut self.vertices,
            start,
            self.options.radius,
            angle + FRAC_PI_2,
            PI,
            &self.options,
        );
        self.committed_len = self.vertices.len();
    }

    fn push_segment(&mut self, path: &SliderPath, index: usize) {
        let segments = path.segments();
        let segment = &segments[index];
        if segment.degenerate {
            return;
        }

        let points = path.points();
        self.push_joint(points[index], segments, segment);
        push_body(
            &mut self.vertices,
            points[index],
            points[index + 1],
            segment.normal,
            self.options.radius,
        );
        self.previous = Some(index);
    }

    fn push_trailing(&mut self, path: &SliderPath, target: usize, completion: f32) {
        let segments = path.segments();
        let end = path.position_at(completion);
        let mut trailing = None;

        if let Some(segment) = segments.get(target) {
            let start = path.points()[target];
            if !segment.degenerate && start.distance(end) > LENGTH_EPSILON {
                self.push_joint(start, segments, segment);
                push_body(
                    &mut self.vertices,
                    start,
                    end,
                    segment.normal,
                    self.options.radius,
                );
                trailing = Some(segment);
            }
        }

        // An empty trailing piece leaves the cap on the last revealed segment
        let angle = trailing
            .or_else(|| self.previous.map(|i| &segments[i]))
            .or_else(|| segments.get(target))
            .map_or(0.0, |s| s.angle);
        push_fan(
            &mut self.vertices,
            end,
            self.options.radius,
            angle - FRAC_PI_2,
            PI,
            &self.options,
        );
    }

    fn push_joint(&mut self, at: Vec2, segments: &[SegmentInfo], next: &SegmentInfo) {
        let Some(previous) = self.previous.map(|i| &segments[i]) else {
            return;
        };

        let turn = normalize_angle(next.angle - previous.angle);
        // The gap opens on the side opposite to the turn
        let from = if turn > 0.0 {
            previous.angle - FRAC_PI_2
        } else {
            previous.angle + FRAC_PI_2
        };
        push_fan(
            &mut self.vertices,
            at,
            self.options.radius,
            from,
            turn,
            &self.options,
        );
    }
}

/// Mesh of `path` revealed up to `completion`, built in one go.
pub fn ribbon_mesh(path: &SliderPath, completion: f32, options: RibbonOptions) -> Vec<RibbonVertex> {
    let mut builder = RibbonMeshBuilder::new(options);
    builder.update(path, completion).to_vec()
}

/// Triangle fan around `center` from angle `from` sweeping `sweep` radians.
fn push_fan(
    out: &mut Vec<RibbonVertex>,
    center: Vec2,
    radius: f32,
    from: f32,
    sweep: f32,
    options: &RibbonOptions,
) {
    let steps = options.fan_steps(sweep);
    let step = sweep / steps as f32;

    for k in 0..steps {
        let a0 = from + step * k as f32;
        let a1 = from + step * (k + 1) as f32;
        out.push(RibbonVertex::center(center));
        out.push(RibbonVertex::rim(center + direction_of(a0) * radius));
        out.push(RibbonVertex::rim(center + direction_of(a1) * radius));
    }
}

/// Two quads from the centerline `a -> b` out to each rim.
fn push_body(out: &mut Vec<RibbonVertex>, a: Vec2, b: Vec2, normal: Vec2, radius: f32) {
    for side in [normal * radius, -normal * radius] {
        out.push(RibbonVertex::center(a));
        out.push(RibbonVertex::center(b));
        out.push(RibbonVertex::rim(b + side));

        out.push(RibbonVertex::center(a));
        out.push(RibbonVertex::rim(b + side));
        out.push(RibbonVertex::rim(a + side));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKind;

    fn straight() -> SliderPath {
        SliderPath::from_polyline(CurveKind::Linear, &[Vec2::ZERO, Vec2::new(100.0, 0.0)], 0.0)
    }

    fn l_shape() -> SliderPath {
        SliderPath::from_polyline(
            CurveKind::Linear,
            &[Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)],
            0.0,
        )
    }

    fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
        let ab = b - a;
        let t = ((p - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0);
        p.distance(a + ab * t)
    }

    #[test]
    fn test_flattening_step() {
        let step = flattening_step(DEFAULT_RIBBON_RADIUS, RIBBON_TOLERANCE);
        assert!(step > 0.2 && step < 0.3, "step {step}");

        assert_eq!(flattening_step(0.1, RIBBON_TOLERANCE), FRAC_PI_2);
        assert_eq!(flattening_step(1e9, RIBBON_TOLERANCE), MIN_ARC_STEP);
    }

    #[test]
    fn test_straight_ribbon_is_a_capsule() {
        let options = RibbonOptions::default();
        let path = straight();
        let mesh = ribbon_mesh(&path, 1.0, options);

        let cap = options.fan_steps(PI) * 3;
        assert_eq!(mesh.len(), cap + 12 + cap);

        for vertex in &mesh {
            let p = Vec2::from(vertex.position);
            let distance = distance_to_segment(p, Vec2::ZERO, Vec2::new(100.0, 0.0));
            if vertex.edge == 0.0 {
                assert!(distance < 1e-4, "centerline vertex off path: {p:?}");
            } else {
                assert!((distance - options.radius).abs() < 1e-3, "rim vertex {p:?}");
            }
        }
    }

    #[test]
    fn test_caps_face_away_from_body() {
        let options = RibbonOptions::default();
        let mesh = ribbon_mesh(&straight(), 1.0, options);
        let cap = options.fan_steps(PI) * 3;

        assert!(mesh[..cap].iter().all(|v| v.position[0] <= 1e-3));
        assert!(mesh[mesh.len() - cap..].iter().all(|v| v.position[0] >= 100.0 - 1e-3));
    }

    #[test]
    fn test_joint_fan_on_outer_side() {
        let options = RibbonOptions::default();
        let mesh = ribbon_mesh(&l_shape(), 1.0, options);
        let cap = options.fan_steps(PI) * 3;
        let joint = options.fan_steps(FRAC_PI_2) * 3;

        assert_eq!(mesh.len(), cap + 12 + joint + 12 + cap);

        // Turning left, so the joint fills the gap on the right (below/right of the corner)
        let corner = Vec2::new(100.0, 0.0);
        for vertex in &mesh[cap + 12..cap + 12 + joint] {
            let offset = Vec2::from(vertex.position) - corner;
            assert!(offset.x >= -1e-3 && offset.y <= 1e-3, "{offset:?}");
        }
    }

    #[test]
    fn test_small_turn_uses_one_triangle() {
        let options = RibbonOptions::default();
        let path = SliderPath::from_polyline(
            CurveKind::Linear,
            &[Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(200.0, 1.0)],
            0.0,
        );
        let mesh = ribbon_mesh(&path, 1.0, options);
        let cap = options.fan_steps(PI) * 3;

        assert_eq!(mesh.len(), cap + 12 + 3 + 12 + cap);
    }

    #[test]
    fn test_end_cap_on_a_sample_follows_revealed_segment() {
        let options = RibbonOptions::default();
        let mesh = ribbon_mesh(&l_shape(), 0.5, options);
        let cap = options.fan_steps(PI) * 3;

        // Completion 0.5 is exactly the corner; nothing of the upward leg is revealed
        assert_eq!(mesh.len(), cap + 12 + cap);
        for vertex in &mesh[mesh.len() - cap..] {
            let p = Vec2::from(vertex.position);
            assert!(p.x >= 100.0 - 1e-3, "end cap vertex behind the corner: {p:?}");
        }
    }

    #[test]
    fn test_single_point_is_a_disc() {
        let options = RibbonOptions::default();
        let mesh = ribbon_mesh(&SliderPath::point(Vec2::new(5.0, 5.0)), 1.0, options);

        assert_eq!(mesh.len(), options.fan_steps(PI) * 6);
        for vertex in mesh.iter().filter(|v| v.edge == 1.0) {
            let distance = Vec2::from(vertex.position).distance(Vec2::new(5.0, 5.0));
            assert!((distance - options.radius).abs() < 1e-3);
        }
    }

    #[test]
    fn test_progressive_matches_direct() {
        let path = l_shape();
        let mut progressive = RibbonMeshBuilder::new(RibbonOptions::default());
        for completion in [0.1, 0.3, 0.5, 0.6, 0.9, 1.0] {
            progressive.update(&path, completion);
        }

        let direct = ribbon_mesh(&path, 1.0, RibbonOptions::default());
        assert_eq!(progressive.vertices(), direct.as_slice());
    }

    #[test]
    fn test_committed_prefix_is_stable() {
        let path = l_shape();
        let mut early = RibbonMeshBuilder::new(RibbonOptions::default());
        early.update(&path, 0.7);
        let prefix = early.committed_len();
        assert!(prefix > 0);

        let late = ribbon_mesh(&path, 1.0, RibbonOptions::default());
        assert_eq!(&late[..prefix], &early.vertices()[..prefix]);
    }

    #[test]
    fn test_lower_completion_returns_cache() {
        let path = l_shape();
        let mut builder = RibbonMeshBuilder::new(RibbonOptions::default());
        let before = builder.update(&path, 0.8).to_vec();
        builder.take_dirty_ranges();

        let after = builder.update(&path, 0.2).to_vec();

        assert_eq!(before, after);
        assert!(builder.take_dirty_ranges().is_empty());
        assert_eq!(builder.completion(), Some(0.8));

        builder.rebuild(&path, 0.2);
        assert_eq!(builder.vertices(), ribbon_mesh(&path, 0.2, RibbonOptions::default()));
    }

    #[test]
    fn test_dirty_ranges_cover_rebuilt_suffix() {
        let path = l_shape();
        let mut builder = RibbonMeshBuilder::new(RibbonOptions::default());

        builder.update(&path, 0.25);
        assert_eq!(builder.take_dirty_ranges(), vec![0..builder.vertices().len()]);

        let committed = builder.committed_len();
        builder.update(&path, 0.75);
        assert_eq!(
            builder.take_dirty_ranges(),
            vec![committed..builder.vertices().len()]
        );
    }

    #[test]
    fn test_as_floats() {
        let mut builder = RibbonMeshBuilder::new(RibbonOptions::default());
        builder.update(&straight(), 0.5);

        assert_eq!(
            builder.as_floats().len(),
            builder.vertices().len() * RibbonVertex::FLOATS
        );
        assert_eq!(builder.triangle_count() * 3, builder.vertices().len());
    }
}
