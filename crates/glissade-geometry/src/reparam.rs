//! Fitting a sampled polyline to a declared length.
//!
//! Builders produce polylines whose length only approximates the length the
//! beatmap asks for. [`reparameterize`] cuts or stretches the polyline so it
//! is exactly that long and assigns every point its completion, the fraction
//! of the total length travelled when reaching it.

use crate::builders::polyline_length;
use glam::Vec2;
use glissade_core::profiling::profile_function;

/// A polyline with a completion value per point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameterized {
    pub points: Vec<Vec2>,
    /// Strictly increasing from `0.0` to exactly `1.0`, one per point
    pub completions: Vec<f32>,
    /// Length of the fitted polyline
    pub length: f32,
}

/// Fit `polyline` to `target` units and compute completions.
///
/// A `target` that is not a positive finite number means "use the natural
/// length". Longer polylines are cut at exactly `target`, with an
/// interpolated end point. Shorter ones have their last point moved along the
/// last segment until the length matches; no point is added. Zero-length steps
/// are dropped, so completions never repeat.
pub fn reparameterize(polyline: &[Vec2], target: f32) -> Parameterized {
    profile_function!();

    let first = match polyline {
        [] => return Parameterized::default(),
        [single] => {
            return Parameterized {
                points: vec![*single],
                completions: vec![0.0],
                length: 0.0,
            };
        }
        [first, ..] => *first,
    };

    let natural = polyline_length(polyline);
    if natural <= 0.0 || !natural.is_finite() {
        tracing::debug!("Polyline of {} coincident points", polyline.len());
        return Parameterized {
            points: vec![first, first],
            completions: vec![0.0, 1.0],
            length: 0.0,
        };
    }

    let target = if target > 0.0 && target.is_finite() {
        target
    } else {
        natural
    };

    let mut points = Vec::with_capacity(polyline.len());
    let mut distances = Vec::with_capacity(polyline.len());
    points.push(first);
    distances.push(0.0);

    let mut travelled = 0.0_f32;
    let mut truncated = false;

    for window in polyline.windows(2) {
        let (from, to) = (window[0], window[1]);
        let step = from.distance(to);
        if step <= 0.0 {
            continue;
        }

        if travelled + step >= target {
            let t = (target - travelled) / step;
            points.push(from.lerp(to, t));
            distances.push(target);
            truncated = true;
            break;
        }

        travelled += step;
        points.push(to);
        distances.push(travelled);
    }

    if !truncated {
        // At least one non-zero step was taken since the natural length is positive
        let last = points.len() - 1;
        let anchor = points[last - 1];
        let direction = (points[last] - anchor).normalize_or_zero();
        points[last] = anchor + direction * (target - distances[last - 1]);
        distances[last] = target;

        tracing::trace!(
            "Extended polyline from {:.3} to {:.3} units",
            natural,
            target
        );
    }

    let mut completions: Vec<f32> = distances.iter().map(|d| d / target).collect();
    if let Some(last) = completions.last_mut() {
        *last = 1.0;
    }

    Parameterized {
        points,
        completions,
        length: target,
    }
}
