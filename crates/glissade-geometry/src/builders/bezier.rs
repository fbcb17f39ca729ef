//! Piecewise Bezier ("polynomial") curves.

use super::{CurvePolyline, append_joined};
use crate::config::CurveConfig;
use crate::curve::ControlSection;
use crate::error::{CurveError, CurveResult};
use crate::flatten::{FlattenScratch, flatten_bezier};

/// Flatten every section and join the results into one polyline.
///
/// Two-point sections are straight pieces and are copied as-is. Adjacent
/// sections share their boundary point, which is emitted once.
pub fn build(
    sections: &[ControlSection],
    config: &CurveConfig,
    scratch: &mut FlattenScratch,
) -> CurveResult<CurvePolyline> {
    let mut points = Vec::new();
    let mut flattened = Vec::new();

    for (index, section) in sections.iter().enumerate() {
        match section.points() {
            [] => return Err(CurveError::EmptySection { section: index }),
            straight @ ([_] | [_, _]) => append_joined(&mut points, straight),
            control => {
                flattened.clear();
                flatten_bezier(control, config.bezier_tolerance, scratch, &mut flattened);
                append_joined(&mut points, &flattened);
            }
        }
    }

    Ok(CurvePolyline::new(points))
}
