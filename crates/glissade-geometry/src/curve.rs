//! Curve input primitives.
//!
//! A slider curve arrives from the beatmap layer as a [`CurveKind`] tag, a list
//! of [`ControlSection`]s and a declared length.

use crate::error::{CurveError, CurveResult};
use glam::Vec2;

/// The curve strategy used to interpret control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Straight pieces between consecutive control points.
    Linear,
    /// Circular arc through exactly three points ("perfect" curve).
    Circular,
    /// Piecewise Bezier curve, one Bezier per section.
    Polynomial,
    /// Uniform Catmull-Rom spline through every control point.
    CatmullRom,
}

impl CurveKind {
    /// Parse the single-letter tag used by beatmap files.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'L' => Some(Self::Linear),
            'P' => Some(Self::Circular),
            'B' => Some(Self::Polynomial),
            'C' => Some(Self::CatmullRom),
            _ => None,
        }
    }

    /// The single-letter tag used by beatmap files.
    pub fn tag(self) -> char {
        match self {
            Self::Linear => 'L',
            Self::Circular => 'P',
            Self::Polynomial => 'B',
            Self::CatmullRom => 'C',
        }
    }
}

/// Control points of one continuous curve piece.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlSection {
    points: Vec<Vec2>,
}

impl ControlSection {
    /// Create a section from its control points.
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Get the control points.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Get the number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the section has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Split a flat control point list into sections.
    ///
    /// Two consecutive identical points mark a seam: the first copy ends the
    /// current section and the second starts the next one.
    pub fn split_at_duplicates(points: &[Vec2]) -> Vec<ControlSection> {
        let mut sections = Vec::new();
        let mut current: Vec<Vec2> = Vec::with_capacity(points.len());

        for &point in points {
            if current.last() == Some(&point) && current.len() > 1 {
                sections.push(ControlSection::new(std::mem::take(&mut current)));
            } else if current.last() == Some(&point) {
                // A duplicated first point is not a seam
                continue;
            }
            current.push(point);
        }

        if !current.is_empty() {
            sections.push(ControlSection::new(current));
        }

        sections
    }
}

impl From<Vec<Vec2>> for ControlSection {
    fn from(points: Vec<Vec2>) -> Self {
        Self::new(points)
    }
}

/// Everything needed to build one slider path.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSpec {
    /// Curve strategy
    pub kind: CurveKind,
    /// Ordered control sections
    pub sections: Vec<ControlSection>,
    /// Declared length in playfield units, `0.0` to derive it from the points
    pub length: f32,
}

impl CurveSpec {
    /// Create a curve description.
    pub fn new(kind: CurveKind, sections: Vec<ControlSection>, length: f32) -> Self {
        Self {
            kind,
            sections,
            length,
        }
    }

    /// Create a curve description from a flat control point list.
    ///
    /// Polynomial curves are split at duplicated points; every other kind
    /// keeps a single section.
    pub fn from_points(kind: CurveKind, points: Vec<Vec2>, length: f32) -> Self {
        let sections = match kind {
            CurveKind::Polynomial => ControlSection::split_at_duplicates(&points),
            _ if points.is_empty() => Vec::new(),
            _ => vec![ControlSection::new(points)],
        };
        Self::new(kind, sections, length)
    }

    /// Iterate over every control point of every section, in order.
    pub fn control_points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.sections
            .iter()
            .flat_map(|section| section.points().iter().copied())
    }

    /// Total number of control points.
    pub fn control_point_count(&self) -> usize {
        self.sections.iter().map(ControlSection::len).sum()
    }

    /// Check the structural preconditions of the control data.
    pub fn validate(&self) -> CurveResult<()> {
        for (section_index, section) in self.sections.iter().enumerate() {
            if section.is_empty() {
                return Err(CurveError::EmptySection {
                    section: section_index,
                });
            }

            if let Some(index) = section.points().iter().position(|p| !p.is_finite()) {
                return Err(CurveError::NonFiniteControlPoint {
                    section: section_index,
                    index,
                });
            }
        }

        Ok(())
    }
}
