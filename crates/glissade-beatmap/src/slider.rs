//! Slider definitions and their processed form.

use crate::error::{ProcessError, ProcessResult};
use crate::events::{SliderEvent, SliderTiming, generate_events};
use glam::Vec2;
use glissade_geometry::{CurveConfig, CurveResult, CurveSpec, FlattenScratch, SliderPath};

/// A slider as read from a beatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderDefinition {
    /// Time of the head, in milliseconds
    pub start_time: f64,
    /// Head position, used when the curve has no control points
    pub position: Vec2,
    pub curve: CurveSpec,
    /// Number of times the slider turns around
    pub repeat_count: u32,
    /// Playfield units per millisecond
    pub velocity: f32,
    /// Distance between ticks in playfield units, `0.0` for no ticks
    pub tick_distance: f32,
}

impl SliderDefinition {
    /// Create a slider without repeats or ticks.
    pub fn new(start_time: f64, position: Vec2, curve: CurveSpec, velocity: f32) -> Self {
        Self {
            start_time,
            position,
            curve,
            repeat_count: 0,
            velocity,
            tick_distance: 0.0,
        }
    }

    pub fn with_repeats(mut self, repeat_count: u32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    pub fn with_tick_distance(mut self, tick_distance: f32) -> Self {
        self.tick_distance = tick_distance;
        self
    }
}

/// A slider with its path built and events placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSlider {
    path: SliderPath,
    timing: SliderTiming,
    events: Vec<SliderEvent>,
}

impl ProcessedSlider {
    /// Build the path and events of the slider at `index`.
    pub fn build(
        index: usize,
        definition: &SliderDefinition,
        config: &CurveConfig,
        scratch: &mut FlattenScratch,
    ) -> ProcessResult<Self> {
        let velocity = definition.velocity;
        if !(velocity > 0.0 && velocity.is_finite()) {
            return Err(ProcessError::InvalidVelocity { index, velocity });
        }

        let path = if definition.curve.control_point_count() == 0 {
            tracing::debug!("Slider {} has no control points", index);
            SliderPath::point(definition.position)
        } else {
            SliderPath::with_config(&definition.curve, config, scratch)
                .map_err(|source| ProcessError::Curve { index, source })?
        };

        let timing = SliderTiming {
            start_time: definition.start_time,
            span_count: definition.repeat_count.saturating_add(1),
            span_duration: path.length() as f64 / velocity as f64,
            velocity,
            tick_distance: definition.tick_distance,
        };
        let events = generate_events(&path, &timing);

        Ok(Self {
            path,
            timing,
            events,
        })
    }

    pub fn path(&self) -> &SliderPath {
        &self.path
    }

    pub fn timing(&self) -> &SliderTiming {
        &self.timing
    }

    /// Events in time order, head first and tail last.
    pub fn events(&self) -> &[SliderEvent] {
        &self.events
    }

    pub fn start_time(&self) -> f64 {
        self.timing.start_time
    }

    /// Duration of one pass along the path, in milliseconds.
    pub fn span_duration(&self) -> f64 {
        self.timing.span_duration
    }

    pub fn span_count(&self) -> u32 {
        self.timing.span_count
    }

    pub fn end_time(&self) -> f64 {
        self.timing.end_time()
    }

    /// Index of the span active at `time`, clamped to the slider's lifetime.
    pub fn span_at(&self, time: f64) -> u32 {
        if self.timing.span_duration <= 0.0 {
            return 0;
        }

        let elapsed = (time - self.timing.start_time).max(0.0);
        let span = (elapsed / self.timing.span_duration).floor();
        (span as u32).min(self.timing.span_count.saturating_sub(1))
    }

    /// Completion of the ball at `time`, following repeats back and forth.
    pub fn progress_at(&self, time: f64) -> f32 {
        let duration = self.timing.span_duration;
        if duration <= 0.0 || time.is_nan() {
            return 0.0;
        }

        let elapsed = (time - self.timing.start_time).clamp(0.0, self.timing.duration());
        let span = self.span_at(time);
        let within = (elapsed / duration - span as f64).clamp(0.0, 1.0) as f32;

        if span % 2 == 1 { 1.0 - within } else { within }
    }

    /// Ball position at `time`.
    pub fn ball_position(&self, time: f64) -> Vec2 {
        self.path.position_at(self.progress_at(time))
    }

    /// Move the slider by `stack_height` steps of `offset`.
    ///
    /// A height of zero leaves the slider alone. Otherwise the path moves
    /// exactly once and events follow it.
    pub fn apply_stacking(&mut self, stack_height: u32, offset: Vec2) -> CurveResult<()> {
        if stack_height == 0 {
            return Ok(());
        }

        self.path.apply_stack_offset(offset * stack_height as f32)?;
        self.events = generate_events(&self.path, &self.timing);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glissade_geometry::{CurveError, CurveKind};

    fn definition(repeats: u32) -> SliderDefinition {
        SliderDefinition::new(
            500.0,
            Vec2::ZERO,
            CurveSpec::from_points(
                CurveKind::Linear,
                vec![Vec2::ZERO, Vec2::new(100.0, 0.0)],
                0.0,
            ),
            0.25,
        )
        .with_repeats(repeats)
    }

    fn build(definition: &SliderDefinition) -> ProcessResult<ProcessedSlider> {
        ProcessedSlider::build(0, definition, &CurveConfig::default(), &mut FlattenScratch::new())
    }

    #[test]
    fn test_timing() {
        let slider = build(&definition(2)).unwrap();

        assert_eq!(slider.span_duration(), 400.0);
        assert_eq!(slider.span_count(), 3);
        assert_eq!(slider.end_time(), 1700.0);
    }

    #[test]
    fn test_progress_ping_pongs() {
        let slider = build(&definition(1)).unwrap();

        assert_eq!(slider.progress_at(0.0), 0.0);
        assert_eq!(slider.progress_at(600.0), 0.25);
        assert_eq!(slider.progress_at(900.0), 1.0);
        assert_eq!(slider.progress_at(1000.0), 0.75);
        assert_eq!(slider.progress_at(1300.0), 0.0);
        assert_eq!(slider.progress_at(5000.0), 0.0);

        assert_eq!(slider.ball_position(1000.0), Vec2::new(75.0, 0.0));
    }

    #[test]
    fn test_invalid_velocity() {
        let mut bad = definition(0);
        bad.velocity = 0.0;

        assert_eq!(
            build(&bad),
            Err(ProcessError::InvalidVelocity {
                index: 0,
                velocity: 0.0
            })
        );
    }

    #[test]
    fn test_empty_curve_sits_at_head() {
        let mut empty = definition(0);
        empty.position = Vec2::new(256.0, 192.0);
        empty.curve = CurveSpec::new(CurveKind::Polynomial, Vec::new(), 0.0);

        let slider = build(&empty).unwrap();

        assert_eq!(slider.ball_position(600.0), Vec2::new(256.0, 192.0));
        assert_eq!(slider.span_duration(), 0.0);
        assert_eq!(slider.end_time(), 500.0);
    }

    #[test]
    fn test_stacking_moves_events() {
        let mut slider = build(&definition(0)).unwrap();

        slider.apply_stacking(2, Vec2::new(-3.2, -3.2)).unwrap();

        let head = slider.events()[0];
        assert_eq!(head.position, Vec2::new(-6.4, -6.4));
        assert_eq!(
            slider.apply_stacking(1, Vec2::ONE),
            Err(CurveError::StackOffsetAlreadyApplied)
        );
    }

    #[test]
    fn test_zero_stack_height_is_a_no_op() {
        let mut slider = build(&definition(0)).unwrap();

        slider.apply_stacking(0, Vec2::new(-3.2, -3.2)).unwrap();

        assert!(!slider.path().is_stacked());
    }
}
