//! Marquee selection over committed objects.
//!
//! The selection set holds object ids, never objects; it is transient UI
//! state and produces no history commands. Hit testing walks the collection
//! newest-first (topmost z first) and, for a marquee rect, keeps every match.

use kurbo::{Point, Rect};

use crate::object::{Object, ObjectId, ObjectModel};

/// Ids of every object intersecting the marquee rect, topmost first.
pub fn select_within(objects: &[Object], rect: Rect) -> Vec<ObjectId> {
    objects
        .iter()
        .rev()
        .filter(|object| object.selection_test(rect))
        .map(|object| object.id())
        .collect()
}

/// Topmost object within `range` of a pointer position, if any.
pub fn object_at(objects: &[Object], point: Point, range: f64) -> Option<ObjectId> {
    objects
        .iter()
        .rev()
        .find(|object| {
            object
                .distance_to(point)
                .is_some_and(|distance| distance <= range)
        })
        .map(|object| object.id())
}

/// The current selection set.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<ObjectId>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    /// Replace the whole selection. Returns true if it changed.
    pub fn set(&mut self, ids: Vec<ObjectId>) -> bool {
        if self.ids == ids {
            return false;
        }
        self.ids = ids;
        true
    }

    /// Deselect everything. Returns true if anything was selected.
    pub fn clear(&mut self) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        self.ids.clear();
        true
    }

    /// Additive click toggle. Returns whether the id is now selected.
    pub fn toggle(&mut self, id: ObjectId) -> bool {
        if let Some(pos) = self.ids.iter().position(|&sel| sel == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Drop ids that no longer pass the filter (e.g. removed objects).
    /// Returns true if anything was dropped.
    pub fn retain(&mut self, keep: impl Fn(ObjectId) -> bool) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&id| keep(id));
        self.ids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectKind, ObjectStyle};

    fn line(start: Point, end: Point) -> Object {
        let mut object = ObjectKind::LineSegment.create(ObjectStyle::default());
        object.submit_point(start).unwrap();
        object.submit_point(end).unwrap();
        object
    }

    #[test]
    fn test_marquee_selects_all_matches_topmost_first() {
        let bottom = line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let top = line(Point::new(0.0, 5.0), Point::new(10.0, 5.0));
        let far = line(Point::new(100.0, 100.0), Point::new(110.0, 100.0));
        let objects = vec![bottom.clone(), top.clone(), far];

        let hits = select_within(&objects, Rect::new(-1.0, -1.0, 11.0, 6.0));
        assert_eq!(hits, vec![top.id(), bottom.id()]);
    }

    #[test]
    fn test_object_at_picks_topmost_in_range() {
        let bottom = line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let top = line(Point::new(0.0, 1.0), Point::new(10.0, 1.0));
        let objects = vec![bottom.clone(), top.clone()];

        assert_eq!(object_at(&objects, Point::new(5.0, 0.4), 2.0), Some(top.id()));
        assert_eq!(object_at(&objects, Point::new(5.0, 50.0), 2.0), None);
    }

    #[test]
    fn test_toggle_and_retain() {
        let a = line(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let mut selection = Selection::new();

        assert!(selection.toggle(a.id()));
        assert!(selection.contains(a.id()));
        assert!(!selection.toggle(a.id()));
        assert!(selection.is_empty());

        selection.set(vec![a.id()]);
        assert!(selection.retain(|_| false));
        assert!(selection.is_empty());
        assert!(!selection.retain(|_| false));
    }
}
