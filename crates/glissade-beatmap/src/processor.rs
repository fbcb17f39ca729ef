//! The load-time processing pass over every slider of a beatmap.

use crate::error::{ProcessError, ProcessResult};
use crate::slider::{ProcessedSlider, SliderDefinition};
use crate::snaking::SnakingRibbon;
use crate::task_pool::TaskPool;
use glam::Vec2;
use glissade_core::alloc::HashMap;
use glissade_core::profiling::profile_function;
use glissade_geometry::{CurveConfig, FlattenScratch, RibbonOptions, RibbonVertex};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Approach window used when none is configured, in milliseconds.
pub const DEFAULT_PREEMPT: f64 = 1200.0;

/// Smallest number of sliders handed to one task.
const MIN_CHUNK_SIZE: usize = 16;

/// Builds slider paths and events, and keeps the snaking meshes of visible sliders.
#[derive(Debug, Default)]
pub struct BeatmapProcessor {
    curve_config: CurveConfig,
    ribbon_options: RibbonOptions,
    preempt: Option<f64>,
    chunk_size: Option<usize>,
    scratch: FlattenScratch,
    sliders: Vec<ProcessedSlider>,
    ribbons: HashMap<usize, SnakingRibbon>,
}

impl BeatmapProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_curve_config(mut self, config: CurveConfig) -> Self {
        self.curve_config = config;
        self
    }

    pub fn with_ribbon_options(mut self, options: RibbonOptions) -> Self {
        self.ribbon_options = options;
        self
    }

    /// Set the approach window, in milliseconds.
    pub fn with_preempt(mut self, preempt: f64) -> Self {
        self.preempt = Some(preempt);
        self
    }

    /// Set how many sliders one parallel task processes.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size.max(1));
        self
    }

    pub fn preempt(&self) -> f64 {
        self.preempt.unwrap_or(DEFAULT_PREEMPT)
    }

    /// Process every slider on the calling thread.
    ///
    /// Replaces the sliders of a previous pass. On error nothing is kept.
    pub fn process(&mut self, definitions: &[SliderDefinition]) -> ProcessResult<&[ProcessedSlider]> {
        profile_function!();

        self.clear();
        let sliders = process_chunk(0, definitions, &self.curve_config, &mut self.scratch)?;
        Ok(self.finish(sliders))
    }

    /// Process every slider on `pool`, in chunks that each own a scratch.
    ///
    /// The result is identical to [`process`](Self::process).
    pub fn process_parallel(
        &mut self,
        pool: &TaskPool,
        definitions: &[SliderDefinition],
    ) -> ProcessResult<&[ProcessedSlider]> {
        profile_function!();

        self.clear();
        let chunk_size = self
            .chunk_size
            .unwrap_or_else(|| default_chunk_size(definitions.len(), pool.thread_count()));

        let jobs = definitions
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk, definitions)| {
                let definitions = definitions.to_vec();
                let config = self.curve_config;
                let first = chunk * chunk_size;
                async move {
                    let mut scratch = FlattenScratch::new();
                    catch_unwind(AssertUnwindSafe(|| {
                        process_chunk(first, &definitions, &config, &mut scratch)
                    }))
                    .unwrap_or_else(|_| {
                        tracing::error!("Processing chunk {} panicked", chunk);
                        Err(ProcessError::TaskPanicked { chunk })
                    })
                }
            });

        let mut sliders = Vec::with_capacity(definitions.len());
        for chunk in pool.run_all(jobs) {
            sliders.extend(chunk?);
        }

        tracing::debug!(
            "Processed {} sliders in chunks of {} on {} threads",
            sliders.len(),
            chunk_size,
            pool.thread_count()
        );

        Ok(self.finish(sliders))
    }

    fn clear(&mut self) {
        self.sliders.clear();
        self.ribbons.clear();
    }

    fn finish(&mut self, sliders: Vec<ProcessedSlider>) -> &[ProcessedSlider] {
        self.sliders = sliders;
        &self.sliders
    }

    pub fn sliders(&self) -> &[ProcessedSlider] {
        &self.sliders
    }

    pub fn slider(&self, index: usize) -> Option<&ProcessedSlider> {
        self.sliders.get(index)
    }

    /// Move the slider at `index` by `stack_height` steps of `offset`.
    ///
    /// A slider is stacked at most once; its cached mesh is dropped.
    pub fn apply_stacking(
        &mut self,
        index: usize,
        stack_height: u32,
        offset: Vec2,
    ) -> ProcessResult<()> {
        let slider = self
            .sliders
            .get_mut(index)
            .ok_or(ProcessError::UnknownSlider { index })?;

        slider
            .apply_stacking(stack_height, offset)
            .map_err(|source| ProcessError::Curve { index, source })?;

        self.ribbons.remove(&index);
        Ok(())
    }

    /// Snaking body mesh of the slider at `index` at `time`.
    ///
    /// The mesh is created on first use and kept until released.
    pub fn ribbon(&mut self, index: usize, time: f64) -> ProcessResult<&[RibbonVertex]> {
        let slider = self
            .sliders
            .get(index)
            .ok_or(ProcessError::UnknownSlider { index })?;

        let preempt = self.preempt();
        let options = self.ribbon_options;
        let ribbon = self
            .ribbons
            .entry(index)
            .or_insert_with(|| SnakingRibbon::new(options, slider.start_time(), preempt));

        Ok(ribbon.update(slider.path(), time))
    }

    /// Cached snaking mesh of the slider at `index`, if any.
    pub fn cached_ribbon(&self, index: usize) -> Option<&SnakingRibbon> {
        self.ribbons.get(&index)
    }

    /// Drop the mesh of a slider that left the screen.
    pub fn release_ribbon(&mut self, index: usize) -> bool {
        self.ribbons.remove(&index).is_some()
    }

    /// Drop the meshes of every slider that ended before `time`.
    pub fn release_finished(&mut self, time: f64) -> usize {
        let sliders = &self.sliders;
        let before = self.ribbons.len();
        self.ribbons
            .retain(|&index, _| sliders.get(index).is_some_and(|s| s.end_time() >= time));
        before - self.ribbons.len()
    }

    pub fn cached_ribbon_count(&self) -> usize {
        self.ribbons.len()
    }
}

fn default_chunk_size(count: usize, threads: usize) -> usize {
    count.div_ceil(threads.max(1) * 4).max(MIN_CHUNK_SIZE)
}

fn process_chunk(
    first: usize,
    definitions: &[SliderDefinition],
    config: &CurveConfig,
    scratch: &mut FlattenScratch,
) -> ProcessResult<Vec<ProcessedSlider>> {
    profile_function!();

    definitions
        .iter()
        .enumerate()
        .map(|(offset, definition)| {
            ProcessedSlider::build(first + offset, definition, config, scratch)
        })
        .collect()
}
