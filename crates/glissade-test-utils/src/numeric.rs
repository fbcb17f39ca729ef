//! Numeric reference values and float assertions.

use glam::Vec2;

/// Sum of distances between consecutive points.
pub fn polyline_length(points: &[Vec2]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Point on the cubic Bezier `p0..p3` at `t`.
pub fn cubic_bezier_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Derivative of the cubic Bezier `p0..p3` at `t`.
pub fn cubic_bezier_derivative(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    (p1 - p0) * (3.0 * u * u) + (p2 - p1) * (6.0 * u * t) + (p3 - p2) * (3.0 * t * t)
}

/// Arc length of a cubic Bezier by composite Simpson integration of the speed.
///
/// `intervals` is rounded up to an even number.
pub fn cubic_bezier_length(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, intervals: usize) -> f32 {
    let n = (intervals.max(2) + 1) & !1;
    let h = 1.0 / n as f64;
    let speed = |i: usize| {
        cubic_bezier_derivative(p0, p1, p2, p3, (i as f64 * h) as f32).length() as f64
    };

    let mut sum = speed(0) + speed(n);
    for i in 1..n {
        sum += speed(i) * if i % 2 == 1 { 4.0 } else { 2.0 };
    }

    (sum * h / 3.0) as f32
}

/// Smallest distance from `point` to any segment of `polyline`.
pub fn distance_to_polyline(point: Vec2, polyline: &[Vec2]) -> f32 {
    match polyline {
        [] => f32::INFINITY,
        [single] => point.distance(*single),
        _ => polyline
            .windows(2)
            .map(|w| {
                let ab = w[1] - w[0];
                let len_sq = ab.length_squared();
                if len_sq == 0.0 {
                    return point.distance(w[0]);
                }
                let t = ((point - w[0]).dot(ab) / len_sq).clamp(0.0, 1.0);
                point.distance(w[0] + ab * t)
            })
            .fold(f32::INFINITY, f32::min),
    }
}

/// Panic unless `actual` is within `epsilon` of `expected`.
#[track_caller]
pub fn assert_near(actual: f32, expected: f32, epsilon: f32) {
    assert!(
        (actual - expected).abs() <= epsilon,
        "expected {expected} +/- {epsilon}, got {actual}"
    );
}

/// Panic unless `actual` is within `epsilon` of `expected`, by Euclidean distance.
#[track_caller]
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, epsilon: f32) {
    assert!(
        actual.distance(expected) <= epsilon,
        "expected {expected:?} +/- {epsilon}, got {actual:?}"
    );
}

/// Panic unless `values` never decreases.
#[track_caller]
pub fn assert_non_decreasing(values: &[f32]) {
    for (i, w) in values.windows(2).enumerate() {
        assert!(w[0] <= w[1], "value {} ({}) > value {} ({})", i, w[0], i + 1, w[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_cubic_length() {
        let length = cubic_bezier_length(
            Vec2::ZERO,
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(30.0, 0.0),
            64,
        );
        assert_near(length, 30.0, 1e-3);
    }

    #[test]
    fn test_cubic_endpoints() {
        let (p0, p1, p2, p3) = (Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::ONE);
        assert_eq!(cubic_bezier_point(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(cubic_bezier_point(p0, p1, p2, p3, 1.0), p3);
    }

    #[test]
    fn test_distance_to_polyline() {
        let polyline = [Vec2::ZERO, Vec2::new(10.0, 0.0)];
        assert_near(distance_to_polyline(Vec2::new(5.0, 3.0), &polyline), 3.0, 1e-6);
        assert_near(distance_to_polyline(Vec2::new(13.0, 4.0), &polyline), 5.0, 1e-6);
    }

    #[test]
    #[should_panic]
    fn test_assert_non_decreasing_panics() {
        assert_non_decreasing(&[0.0, 0.5, 0.4]);
    }
}
