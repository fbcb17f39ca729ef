//! Glissade Geometry - Slider path construction and body meshes
//!
//! This crate provides:
//! - Curve descriptions (linear, circular arc, polynomial Bezier, Catmull-Rom)
//! - Flattening of each curve kind into a dense polyline
//! - Arc-length parameterization fitted to the declared slider length
//! - Position and angle queries by completion
//! - Incremental ribbon meshes for snaking slider bodies
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use glissade_geometry::*;
//!
//! let spec = CurveSpec::from_points(
//!     CurveKind::Circular,
//!     vec![Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0), Vec2::new(50.0, 50.0)],
//!     100.0,
//! );
//!
//! let mut scratch = FlattenScratch::new();
//! let path = SliderPath::new(&spec, &mut scratch).unwrap();
//! let ball = path.position_at(0.5);
//!
//! let mut ribbon = RibbonMeshBuilder::new(RibbonOptions::default());
//! let vertices = ribbon.update(&path, 0.5);
//! # let _ = (ball, vertices);
//! ```

// Curve input and sampling
pub mod builders;
mod config;
mod curve;
mod error;
mod flatten;

// Parameterized paths
mod path;
mod reparam;

// Meshes
mod dirty_ranges;
mod ribbon;
mod vertex;

// Re-exports
pub use builders::{CurvePolyline, build_polyline, polyline_length};
pub use config::*;
pub use curve::*;
pub use error::*;
pub use flatten::*;

pub use path::*;
pub use reparam::*;

pub use dirty_ranges::*;
pub use ribbon::*;
pub use vertex::*;
