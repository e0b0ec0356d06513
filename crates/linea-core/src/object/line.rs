//! Two-point line segment object.

use kurbo::{BezPath, Point, Rect};
use uuid::Uuid;

use super::{ObjectId, ObjectKind, ObjectModel, ObjectStyle};
use crate::geometry::Segment;
use crate::layout::{Layout, LayoutAction};
use crate::render::Graphic;

/// A straight segment placed with two points.
#[derive(Debug, Clone)]
pub struct LineSegment {
    id: ObjectId,
    layout: Layout,
    style: ObjectStyle,
    geometry: Option<Segment>,
}

impl LineSegment {
    /// Declared point requirements: one section of two points.
    pub fn layout_action() -> LayoutAction {
        LayoutAction::single_section(2)
    }

    /// Create a new, empty line segment object.
    pub fn new(style: ObjectStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            layout: Layout::new(Self::layout_action()),
            style,
            geometry: None,
        }
    }

    /// Resolved segment geometry, if the layout is complete.
    pub fn segment(&self) -> Option<&Segment> {
        self.geometry.as_ref()
    }
}

impl ObjectModel for LineSegment {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::LineSegment
    }

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    fn layout_did_update(&mut self) {
        self.geometry = match self.layout.section(0) {
            Some([start, end]) => Some(Segment::new(*start, *end)),
            _ => None,
        };
    }

    fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    // A two-point placement needs no guide
    fn preliminary_graphics(&self) -> Vec<Graphic> {
        Vec::new()
    }

    fn main_graphics(&self) -> Vec<Graphic> {
        let Some(segment) = self.geometry else {
            return Vec::new();
        };
        let mut path = BezPath::new();
        path.move_to(segment.start);
        path.line_to(segment.end);
        vec![Graphic::stroke(path, &self.style)]
    }

    fn selection_test(&self, rect: Rect) -> bool {
        self.geometry
            .map(|segment| segment.intersects_rect(rect))
            .unwrap_or(false)
    }

    fn distance_to(&self, point: Point) -> Option<f64> {
        self.geometry.map(|segment| segment.distance_to(point))
    }

    fn style(&self) -> &ObjectStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ObjectStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn placed_line(start: Point, end: Point) -> Object {
        let mut object = Object::LineSegment(LineSegment::new(ObjectStyle::default()));
        object.submit_point(start).unwrap();
        object.submit_point(end).unwrap();
        object
    }

    #[test]
    fn test_geometry_from_two_points() {
        let object = placed_line(p(0.0, 0.0), p(10.0, 0.0));
        let Object::LineSegment(line) = &object else {
            panic!("wrong variant");
        };
        let segment = line.segment().unwrap();
        assert_eq!(segment.start, p(0.0, 0.0));
        assert_eq!(segment.end, p(10.0, 0.0));
    }

    #[test]
    fn test_no_preliminary_guide() {
        let mut object = Object::LineSegment(LineSegment::new(ObjectStyle::default()));
        object.submit_point(p(0.0, 0.0)).unwrap();
        assert!(object.preliminary_graphics().is_empty());
    }

    #[test]
    fn test_main_graphics_styled() {
        let style = ObjectStyle {
            line_width: 3.0,
            ..ObjectStyle::default()
        };
        let mut line = LineSegment::new(style);
        line.layout_mut().push(p(0.0, 0.0)).unwrap();
        line.layout_mut().push(p(10.0, 0.0)).unwrap();
        line.layout_did_update();

        let graphics = line.main_graphics();
        assert_eq!(graphics.len(), 1);
        assert_eq!(graphics[0].line_width, 3.0);
    }

    #[test]
    fn test_selection_by_containing_rect() {
        let object = placed_line(p(0.0, 0.0), p(10.0, 0.0));
        assert!(object.selection_test(Rect::new(-1.0, -1.0, 11.0, 1.0)));
        assert!(!object.selection_test(Rect::new(0.0, 5.0, 10.0, 10.0)));
    }
}
