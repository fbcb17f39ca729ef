//! Control point sets used across tests and benchmarks.

use glam::Vec2;

/// Three points on a half circle of radius `25 * sqrt(2)` around `(25, 25)`.
pub const HALF_CIRCLE: [Vec2; 3] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(50.0, 0.0),
    Vec2::new(50.0, 50.0),
];

/// A cubic Bezier turning back on itself.
pub const CUBIC_HOOK: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(100.0, 0.0),
    Vec2::new(100.0, 100.0),
    Vec2::new(0.0, 100.0),
];

/// Three collinear points.
pub const COLLINEAR: [Vec2; 3] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(50.0, 50.0),
    Vec2::new(100.0, 100.0),
];

/// Zig-zag control polygon of `count` points, `step` apart horizontally.
pub fn zigzag(count: usize, step: f32, amplitude: f32) -> Vec<Vec2> {
    (0..count)
        .map(|i| {
            let y = if i % 2 == 0 { 0.0 } else { amplitude };
            Vec2::new(i as f32 * step, y)
        })
        .collect()
}

/// Points of a simple deterministic walk across the playfield.
///
/// Uses a linear congruential generator so benchmarks see the same input on
/// every run.
pub fn wander(count: usize, seed: u32) -> Vec<Vec2> {
    let mut state = seed.max(1);
    let mut next = move || {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (state >> 8) as f32 / (1u32 << 24) as f32
    };

    (0..count)
        .map(|_| Vec2::new(next() * 512.0, next() * 384.0))
        .collect()
}
