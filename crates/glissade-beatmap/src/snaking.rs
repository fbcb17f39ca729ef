//! Snaking slider bodies.
//!
//! A slider body fades in when its approach window opens and grows from the
//! head to the tail over the first third of that window.

use glissade_geometry::{RibbonMeshBuilder, RibbonOptions, RibbonVertex, SliderPath};
use std::ops::Range;

/// The body is revealed over `1 / REVEAL_DIVISOR` of the approach window.
pub const REVEAL_DIVISOR: f64 = 3.0;

/// Revealed completion of a slider body at `time`.
///
/// The approach window is `preempt` milliseconds long and ends at
/// `start_time`. A window that is not a positive finite duration reveals the
/// whole body immediately.
pub fn snaking_completion(time: f64, start_time: f64, preempt: f64) -> f32 {
    if !(preempt > 0.0 && preempt.is_finite()) {
        return 1.0;
    }
    if time.is_nan() {
        return 0.0;
    }

    let appear = start_time - preempt;
    let reveal = preempt / REVEAL_DIVISOR;
    ((time - appear) / reveal).clamp(0.0, 1.0) as f32
}

/// Ribbon mesh of one slider, revealed according to the clock.
#[derive(Debug, Clone)]
pub struct SnakingRibbon {
    builder: RibbonMeshBuilder,
    start_time: f64,
    preempt: f64,
}

impl SnakingRibbon {
    pub fn new(options: RibbonOptions, start_time: f64, preempt: f64) -> Self {
        Self {
            builder: RibbonMeshBuilder::new(options),
            start_time,
            preempt,
        }
    }

    /// Mesh of `path` at `time`.
    ///
    /// Moving forward in time extends the cached mesh; moving backwards
    /// rebuilds it.
    pub fn update(&mut self, path: &SliderPath, time: f64) -> &[RibbonVertex] {
        let completion = snaking_completion(time, self.start_time, self.preempt);

        if self
            .builder
            .completion()
            .is_some_and(|cached| completion < cached)
        {
            tracing::trace!("Snaking rewound to {:.3}, rebuilding", completion);
            return self.builder.rebuild(path, completion);
        }

        self.builder.update(path, completion)
    }

    /// Revealed completion of the current mesh.
    pub fn completion(&self) -> f32 {
        self.builder.completion().unwrap_or(0.0)
    }

    pub fn vertices(&self) -> &[RibbonVertex] {
        self.builder.vertices()
    }

    pub fn builder(&self) -> &RibbonMeshBuilder {
        &self.builder
    }

    /// Vertex ranges changed since the last call.
    pub fn take_dirty_ranges(&mut self) -> Vec<Range<usize>> {
        self.builder.take_dirty_ranges()
    }

    /// Drop the mesh, for a path that changed.
    pub fn reset(&mut self) {
        self.builder.reset();
    }
}
