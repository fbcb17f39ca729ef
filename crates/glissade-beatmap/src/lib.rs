//! Glissade Beatmap - Load-time slider processing
//!
//! Every slider of a beatmap goes through one processing pass when the map is
//! loaded:
//!
//! - **Paths**: the curve is built into an arc-length parameterized path
//! - **Events**: head, ticks, repeats and tail are placed along the path
//! - **Stacking**: overlapping objects are shifted once
//! - **Snaking**: visible sliders grow their body mesh with the clock
//!
//! Large maps can be processed in parallel on a [`TaskPool`].
//!
//! # Quick Start
//!
//! ```
//! use glam::Vec2;
//! use glissade_beatmap::prelude::*;
//!
//! let curve = CurveSpec::from_points(
//!     CurveKind::Polynomial,
//!     vec![Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), Vec2::new(100.0, 100.0)],
//!     120.0,
//! );
//! let slider = SliderDefinition::new(1000.0, Vec2::ZERO, curve, 0.4).with_tick_distance(30.0);
//!
//! let mut processor = BeatmapProcessor::new();
//! let sliders = processor.process(&[slider]).unwrap();
//! assert_eq!(sliders[0].events().first().map(|e| e.kind), Some(SliderEventKind::Head));
//!
//! let body = processor.ribbon(0, 800.0).unwrap();
//! assert!(!body.is_empty());
//! ```

pub mod error;
pub mod events;
pub mod processor;
pub mod slider;
pub mod snaking;
pub mod task_pool;

// Re-export sub-crates
pub use glissade_core as core;
pub use glissade_geometry as geometry;

pub use error::{ProcessError, ProcessResult};
pub use events::{SliderEvent, SliderEventKind, SliderTiming, generate_events};
pub use processor::BeatmapProcessor;
pub use slider::{ProcessedSlider, SliderDefinition};
pub use snaking::{SnakingRibbon, snaking_completion};
pub use task_pool::TaskPool;

/// Commonly used types.
pub mod prelude {
    pub use crate::{
        BeatmapProcessor, ProcessError, ProcessedSlider, SliderDefinition, SliderEvent,
        SliderEventKind, SnakingRibbon, TaskPool,
    };
    pub use glissade_geometry::{
        CurveConfig, CurveKind, CurveSpec, RibbonOptions, RibbonVertex, SliderPath,
    };
}
