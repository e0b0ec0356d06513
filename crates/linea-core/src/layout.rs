//! Point-placement layout engine.
//!
//! A [`Layout`] accumulates placed points into the sections declared by its
//! [`LayoutAction`]. Points only ever append during a session; the whole
//! section set is discarded on cancellation. Sections fill strictly in
//! declaration order.

use kurbo::{Point, Vec2};

use crate::error::LayoutError;

/// Declared point requirements for one object type: an ordered list of
/// required per-section point counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutAction {
    counts: Vec<usize>,
}

impl LayoutAction {
    /// A layout made of a single fixed-size section.
    pub fn single_section(points: usize) -> Self {
        debug_assert!(points >= 1);
        Self {
            counts: vec![points],
        }
    }

    /// A layout made of multiple fixed-size sections.
    pub fn sections(counts: &[usize]) -> Self {
        debug_assert!(!counts.is_empty() && counts.iter().all(|&n| n >= 1));
        Self {
            counts: counts.to_vec(),
        }
    }

    /// Required point count per section, in fill order.
    pub fn section_counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of points needed to complete the layout.
    pub fn total_points(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Outcome of one accepted point placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutProgress {
    /// Index of the section the point landed in.
    pub section: usize,
    /// Whether that section reached its required length with this point.
    pub section_completed: bool,
    /// Whether every declared section is now complete.
    pub layout_completed: bool,
}

/// The ordered point sections of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    action: LayoutAction,
    sections: Vec<Vec<Point>>,
}

impl Layout {
    /// Create an empty layout for the given action.
    pub fn new(action: LayoutAction) -> Self {
        let sections = action.counts.iter().map(|_| Vec::new()).collect();
        Self { action, sections }
    }

    /// The declared action this layout fills.
    pub fn action(&self) -> &LayoutAction {
        &self.action
    }

    /// Append a point to the first unfilled section.
    pub fn push(&mut self, point: Point) -> Result<LayoutProgress, LayoutError> {
        let counts = &self.action.counts;
        let section = self
            .sections
            .iter()
            .zip(counts)
            .position(|(pts, &n)| pts.len() < n)
            .ok_or(LayoutError::CapacityExceeded)?;
        self.sections[section].push(point);
        let section_completed = self.sections[section].len() == counts[section];
        let layout_completed = section_completed && section == counts.len() - 1;
        Ok(LayoutProgress {
            section,
            section_completed,
            layout_completed,
        })
    }

    /// Remove the most recently placed point, reopening its section.
    pub fn pop(&mut self) -> Option<Point> {
        self.sections
            .iter_mut()
            .rev()
            .find(|pts| !pts.is_empty())
            .and_then(Vec::pop)
    }

    /// Discard every placed point.
    pub fn cancel(&mut self) {
        for section in &mut self.sections {
            section.clear();
        }
    }

    /// Whether every declared section has reached its required length.
    pub fn is_complete(&self) -> bool {
        self.sections
            .iter()
            .zip(&self.action.counts)
            .all(|(pts, &n)| pts.len() == n)
    }

    /// Whether no point has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Total number of placed points.
    pub fn point_count(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    /// Points of one section.
    pub fn section(&self, index: usize) -> Option<&[Point]> {
        self.sections.get(index).map(Vec::as_slice)
    }

    /// All sections in order.
    pub fn sections(&self) -> impl Iterator<Item = &[Point]> {
        self.sections.iter().map(Vec::as_slice)
    }

    /// Replace one already-placed point, returning the previous value.
    pub fn set_point(&mut self, section: usize, index: usize, point: Point) -> Option<Point> {
        let slot = self.sections.get_mut(section)?.get_mut(index)?;
        Some(std::mem::replace(slot, point))
    }

    /// Translate every placed point by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        for section in &mut self.sections {
            for point in section.iter_mut() {
                *point += delta;
            }
        }
    }
}
