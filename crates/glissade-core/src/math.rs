//! Playfield math on SIMD-accelerated [`glam`] types.
//!
//! All playfield geometry is expressed with [`Vec2`] in logical playfield
//! units (the classic 512x384 playfield).
//!
//! # Examples
//!
//! ```
//! use glissade_core::math::{Vec2, PLAYFIELD_SIZE};
//!
//! let centre = PLAYFIELD_SIZE * 0.5;
//! assert_eq!(centre, Vec2::new(256.0, 192.0));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

/// Re-export of every [`glam`] type.
pub mod fast {
    pub use glam::*;
}

pub use fast::*;

use std::f32::consts::{PI, TAU};

/// Size of the logical playfield.
pub const PLAYFIELD_SIZE: Vec2 = Vec2::new(512.0, 384.0);

/// Lengths below this are treated as zero when normalising directions.
pub const LENGTH_EPSILON: f32 = 1e-4;

/// Wrap an angle into `(-PI, PI]`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Angle of a direction vector, `atan2` convention.
#[inline]
pub fn angle_of(direction: Vec2) -> f32 {
    direction.y.atan2(direction.x)
}

/// Unit vector pointing at `angle`.
#[inline]
pub fn direction_of(angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos, sin)
}

/// Compare two floats with an absolute tolerance.
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_range() {
        for raw in [-10.0_f32, -PI, -1.0, 0.0, 1.0, PI, 4.0, 10.0] {
            let wrapped = normalize_angle(raw);
            assert!(wrapped > -PI - 1e-6 && wrapped <= PI + 1e-6, "{raw} -> {wrapped}");
            assert!(approx_eq(wrapped.sin(), raw.sin(), 1e-4));
            assert!(approx_eq(wrapped.cos(), raw.cos(), 1e-4));
        }
    }

    #[test]
    fn test_direction_round_trip() {
        let dir = direction_of(0.75);
        assert!(approx_eq(dir.length(), 1.0, 1e-6));
        assert!(approx_eq(angle_of(dir), 0.75, 1e-6));
    }
}
