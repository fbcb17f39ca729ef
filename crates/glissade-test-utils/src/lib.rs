//! Test utilities for Glissade.
//!
//! Reference measurements computed independently of the geometry crate, so
//! tests can check sampled paths against numeric ground truth, plus the
//! control point sets shared by tests and benchmarks.
//!
//! # Example
//!
//! ```rust
//! use glissade_test_utils::{assert_vec2_near, cubic_bezier_length, fixtures};
//!
//! let [p0, p1, p2, p3] = fixtures::CUBIC_HOOK;
//! let length = cubic_bezier_length(p0, p1, p2, p3, 1024);
//! assert!((length - 200.0).abs() < 0.01);
//!
//! assert_vec2_near(p0, glam::Vec2::ZERO, 1e-6);
//! ```

pub mod fixtures;
pub mod numeric;

// Re-export main helpers at crate root
pub use numeric::*;
