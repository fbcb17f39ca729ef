//! Example processing a generated beatmap sequentially and in parallel.
//!
//! This example shows how to:
//! - Install logging and profiling from a `Config`
//! - Process sliders on the calling thread and on a `TaskPool`
//! - Stack a slider and inspect its events
//! - Drive a snaking body mesh with the clock
//!
//! Run with: cargo run -p glissade-beatmap --example process_beatmap

use std::time::Instant;

use glam::Vec2;
use glissade_beatmap::prelude::*;
use glissade_core::Config;
use glissade_core::config::ProfilingMode;

fn generate(count: usize) -> Vec<SliderDefinition> {
    let kinds = [
        CurveKind::Linear,
        CurveKind::Circular,
        CurveKind::Polynomial,
        CurveKind::CatmullRom,
    ];

    (0..count)
        .map(|i| {
            let x = (i * 37 % 400) as f32;
            let y = (i * 53 % 300) as f32;
            let points = vec![
                Vec2::new(x, y),
                Vec2::new(x + 60.0, y + 20.0),
                Vec2::new(x + 90.0, y + 80.0),
                Vec2::new(x + 40.0, y + 120.0),
            ];
            let kind = kinds[i % kinds.len()];
            let points = if kind == CurveKind::Circular {
                points[..3].to_vec()
            } else {
                points
            };

            SliderDefinition::new(
                i as f64 * 500.0,
                points[0],
                CurveSpec::from_points(kind, points, 150.0),
                0.35,
            )
            .with_repeats((i % 3) as u32)
            .with_tick_distance(35.0)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Config::default()
        .with_log_filter("info,glissade_beatmap=debug")
        .with_profiling(ProfilingMode::On)
        .init();

    let definitions = generate(5_000);

    println!("=== Sequential processing ===\n");
    let mut sequential = BeatmapProcessor::new();
    let start = Instant::now();
    let count = sequential.process(&definitions)?.len();
    println!("{} sliders in {:?}\n", count, start.elapsed());

    println!("=== Parallel processing ===\n");
    let pool = TaskPool::default_threads()?;
    let mut parallel = BeatmapProcessor::new().with_preempt(800.0);
    let start = Instant::now();
    parallel.process_parallel(&pool, &definitions)?;
    println!(
        "{} sliders on {} threads in {:?}",
        parallel.sliders().len(),
        pool.thread_count(),
        start.elapsed()
    );
    println!(
        "Identical to sequential: {}\n",
        parallel.sliders() == sequential.sliders()
    );

    println!("=== Stacking and events ===\n");
    parallel.apply_stacking(1, 2, Vec2::splat(-3.2))?;
    if let Some(slider) = parallel.slider(1) {
        for event in slider.events() {
            println!(
                "{:?} at {:.0} ms, completion {:.2}, position {:?}",
                event.kind, event.time, event.completion, event.position
            );
        }
    }

    println!("\n=== Snaking ===\n");
    let start_time = parallel.slider(2).map_or(0.0, |s| s.start_time());
    for step in 0..=4 {
        let time = start_time - 800.0 + step as f64 * 80.0;
        let vertices = parallel.ribbon(2, time)?.len();
        let revealed = parallel.cached_ribbon(2).map_or(0.0, |r| r.completion());
        println!("t = {:.0} ms: {} vertices, revealed {:.2}", time, vertices, revealed);
    }

    pool.shutdown();
    Ok(())
}
