//! Bezier flattening by midpoint subdivision.
//!
//! Curves of any degree are split in half with De Casteljau's algorithm until
//! every piece is flat enough, then each flat piece is sampled. Pending pieces
//! live in one contiguous scratch buffer addressed by an explicit stack of
//! offsets, so there is no native recursion and no allocation per curve once
//! the scratch has warmed up.

use glam::Vec2;
use glissade_core::profiling::profile_function;

/// Smallest scratch buffer allocated on first use.
const MIN_SCRATCH_POINTS: usize = 64;

/// Pieces this many halvings deep are sampled whether flat or not. Huge
/// coordinates can stall f32 midpoints above any tolerance.
pub const MAX_SUBDIVISION_DEPTH: u32 = 16;

/// Reusable working memory for [`flatten_bezier`].
///
/// A scratch is owned by whoever drives curve construction (one per thread or
/// per processing task) and can be reused across any number of curves.
#[derive(Debug, Default, Clone)]
pub struct FlattenScratch {
    /// Control points of every pending subdivision, packed back to back
    buffer: Vec<Vec2>,
    /// Offsets into `buffer` and depths of the pieces still to visit
    stack: Vec<(usize, u32)>,
    /// De Casteljau working row
    midpoints: Vec<Vec2>,
    /// Left half, extended with the right half when sampling a flat piece
    left: Vec<Vec2>,
    /// Right half
    right: Vec<Vec2>,
}

impl FlattenScratch {
    /// Create an empty scratch. Memory is allocated on first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scratch able to hold `points` pending control points before growing.
    pub fn with_capacity(points: usize) -> Self {
        Self {
            buffer: vec![Vec2::ZERO; points],
            ..Self::default()
        }
    }

    /// Number of control points the scratch buffer holds before it grows.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    fn prepare(&mut self, degree_points: usize) {
        self.stack.clear();
        self.midpoints.resize(degree_points, Vec2::ZERO);
        self.left.resize(degree_points * 2 - 1, Vec2::ZERO);
        self.right.resize(degree_points, Vec2::ZERO);
    }

    /// Make sure `buffer[..end]` is addressable, doubling the buffer if not.
    fn reserve_slots(&mut self, end: usize) {
        if self.buffer.len() >= end {
            return;
        }

        let grown = (self.buffer.len() * 2).max(end).max(MIN_SCRATCH_POINTS);
        tracing::trace!(
            "Growing flatten scratch from {} to {} points",
            self.buffer.len(),
            grown
        );
        self.buffer.resize(grown, Vec2::ZERO);
    }
}

/// Flatten a Bezier curve given by `control_points` into `out`.
///
/// Appends the flattened polyline, both end points included. Curves with
/// fewer than three control points are copied through unchanged. Pieces are
/// never split more than [`MAX_SUBDIVISION_DEPTH`] times.
pub fn flatten_bezier(
    control_points: &[Vec2],
    tolerance: f32,
    scratch: &mut FlattenScratch,
    out: &mut Vec<Vec2>,
) {
    profile_function!();

    let count = control_points.len();
    if count < 3 {
        out.extend_from_slice(control_points);
        return;
    }

    let threshold = tolerance * tolerance * 4.0;

    scratch.prepare(count);
    scratch.reserve_slots(count);
    scratch.buffer[..count].copy_from_slice(control_points);
    scratch.stack.push((0, 0));

    // Pieces are visited in LIFO order, so the popped piece always sits at the
    // top of the buffer and its children can overwrite it in place.
    while let Some((offset, depth)) = scratch.stack.pop() {
        scratch.reserve_slots(offset + count * 2);

        let FlattenScratch {
            buffer,
            stack,
            midpoints,
            left,
            right,
        } = &mut *scratch;

        let piece = &buffer[offset..offset + count];
        if depth >= MAX_SUBDIVISION_DEPTH || is_flat_enough(piece, threshold) {
            sample_flat_piece(piece, midpoints, left, right, out);
            continue;
        }

        subdivide(piece, midpoints, left, right);
        buffer[offset..offset + count].copy_from_slice(&right[..count]);
        buffer[offset + count..offset + count * 2].copy_from_slice(&left[..count]);

        stack.push((offset, depth + 1));
        stack.push((offset + count, depth + 1));
    }

    out.push(control_points[count - 1]);
}

/// Evaluate a Bezier curve of any degree at `t`.
pub fn evaluate_bezier(control_points: &[Vec2], t: f32, work: &mut Vec<Vec2>) -> Vec2 {
    work.clear();
    work.extend_from_slice(control_points);

    let count = work.len();
    for level in 1..count {
        for i in 0..count - level {
            work[i] = work[i].lerp(work[i + 1], t);
        }
    }

    work.first().copied().unwrap_or(Vec2::ZERO)
}

/// Every interior control point is close to the midpoint of its neighbours.
fn is_flat_enough(points: &[Vec2], threshold: f32) -> bool {
    points
        .windows(3)
        .all(|w| (w[0] - w[1] * 2.0 + w[2]).length_squared() <= threshold)
}

/// Split `points` at t = 0.5 into `left` and `right`.
fn subdivide(points: &[Vec2], midpoints: &mut [Vec2], left: &mut [Vec2], right: &mut [Vec2]) {
    let count = points.len();
    midpoints[..count].copy_from_slice(points);

    for i in 0..count {
        left[i] = midpoints[0];
        right[count - i - 1] = midpoints[count - i - 1];

        for j in 0..count - i - 1 {
            midpoints[j] = (midpoints[j] + midpoints[j + 1]) * 0.5;
        }
    }
}

/// Emit the start point of a flat piece followed by its smoothed interior samples.
fn sample_flat_piece(
    points: &[Vec2],
    midpoints: &mut [Vec2],
    left: &mut [Vec2],
    right: &mut [Vec2],
    out: &mut Vec<Vec2>,
) {
    let count = points.len();
    subdivide(points, midpoints, left, right);

    // Join both halves into one 2n-1 point control polygon
    for i in 0..count - 1 {
        left[count + i] = right[i + 1];
    }

    out.push(points[0]);
    for i in 1..count - 1 {
        let index = 2 * i;
        out.push((left[index - 1] + left[index] * 2.0 + left[index + 1]) * 0.25);
    }
}
