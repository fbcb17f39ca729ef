//! Gameplay events along a slider.
//!
//! Events are generated once when the beatmap is loaded. A slider with `n`
//! repeats is travelled `n + 1` times, alternating direction, and each pass
//! (span) carries the same ticks in travel order.

use glam::Vec2;
use glissade_geometry::SliderPath;

/// Ticks closer than this to the end of their span are dropped, in milliseconds.
pub const MIN_TICK_GAP_MS: f32 = 10.0;

/// Upper bound on ticks per span, for absurdly small tick distances.
pub const MAX_TICKS_PER_SPAN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliderEventKind {
    /// Start of the slider
    Head,
    /// Scoring tick inside a span
    Tick,
    /// End of a span that turns around
    Repeat,
    /// End of the slider
    Tail,
}

/// A judged point in time along a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderEvent {
    pub kind: SliderEventKind,
    /// Absolute time in milliseconds
    pub time: f64,
    /// Completion along the path, regardless of travel direction
    pub completion: f32,
    pub position: Vec2,
    /// Span the event belongs to
    pub span: u32,
}

/// Timing of a slider, derived from its definition and path length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderTiming {
    /// Time of the head, in milliseconds
    pub start_time: f64,
    /// Number of passes along the path (repeats + 1)
    pub span_count: u32,
    /// Duration of one pass, in milliseconds
    pub span_duration: f64,
    /// Playfield units per millisecond
    pub velocity: f32,
    /// Distance between ticks in playfield units, `0.0` for no ticks
    pub tick_distance: f32,
}

impl SliderTiming {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.span_duration * self.span_count as f64
    }

    pub fn duration(&self) -> f64 {
        self.span_duration * self.span_count as f64
    }
}

/// Completions of the ticks of one span, in forward order.
pub fn tick_completions(length: f32, velocity: f32, tick_distance: f32) -> Vec<f32> {
    if length <= 0.0 || !(tick_distance > 0.0 && tick_distance.is_finite()) {
        return Vec::new();
    }

    let limit = length - velocity * MIN_TICK_GAP_MS;
    let mut ticks = Vec::new();
    let mut step = 1;

    loop {
        let distance = tick_distance * step as f32;
        if distance >= limit {
            break;
        }
        if ticks.len() == MAX_TICKS_PER_SPAN {
            tracing::warn!(
                "Tick distance {} on a {} long slider, keeping the first {} ticks",
                tick_distance,
                length,
                MAX_TICKS_PER_SPAN
            );
            break;
        }

        ticks.push(distance / length);
        step += 1;
    }

    ticks
}

/// Generate the head, tick, repeat and tail events of a slider, in time order.
pub fn generate_events(path: &SliderPath, timing: &SliderTiming) -> Vec<SliderEvent> {
    let span_count = timing.span_count.max(1);
    let ticks = tick_completions(path.length(), timing.velocity, timing.tick_distance);

    let mut events = Vec::with_capacity(2 + (ticks.len() + 1) * span_count as usize);
    let event = |kind, time, completion, span| SliderEvent {
        kind,
        time,
        completion,
        position: path.position_at(completion),
        span,
    };

    events.push(event(SliderEventKind::Head, timing.start_time, 0.0, 0));

    for span in 0..span_count {
        let span_start = timing.start_time + timing.span_duration * span as f64;
        let reversed = span % 2 == 1;

        // Reversed spans meet the ticks in descending completion
        for i in 0..ticks.len() {
            let completion = if reversed {
                ticks[ticks.len() - 1 - i]
            } else {
                ticks[i]
            };
            let progress = if reversed { 1.0 - completion } else { completion };
            let time = span_start + timing.span_duration * progress as f64;
            events.push(event(SliderEventKind::Tick, time, completion, span));
        }

        let span_end = span_start + timing.span_duration;
        let end_completion = if reversed { 0.0 } else { 1.0 };
        let kind = if span + 1 < span_count {
            SliderEventKind::Repeat
        } else {
            SliderEventKind::Tail
        };
        events.push(event(kind, span_end, end_completion, span));
    }

    events
}
