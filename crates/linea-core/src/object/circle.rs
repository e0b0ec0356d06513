//! Three-point circle object.

use kurbo::{Point, Rect, Shape};
use uuid::Uuid;

use super::{guide_polyline, ObjectId, ObjectKind, ObjectModel, ObjectStyle};
use crate::geometry::Circle as CircleGeometry;
use crate::layout::{Layout, LayoutAction};
use crate::render::Graphic;

/// Flattening tolerance when converting the circle outline to a path.
const PATH_TOLERANCE: f64 = 0.1;

/// A circle placed through three points on its circumference.
#[derive(Debug, Clone)]
pub struct Circle {
    id: ObjectId,
    layout: Layout,
    style: ObjectStyle,
    geometry: Option<CircleGeometry>,
}

impl Circle {
    /// Declared point requirements: one section of three points.
    pub fn layout_action() -> LayoutAction {
        LayoutAction::single_section(3)
    }

    /// Create a new, empty circle object.
    pub fn new(style: ObjectStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            layout: Layout::new(Self::layout_action()),
            style,
            geometry: None,
        }
    }

    /// Resolved circle geometry, if the layout is complete and the points
    /// are not collinear.
    pub fn circle(&self) -> Option<&CircleGeometry> {
        self.geometry.as_ref()
    }
}

impl ObjectModel for Circle {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Circle
    }

    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    fn layout_did_update(&mut self) {
        self.geometry = match self.layout.section(0) {
            Some([a, b, c]) => CircleGeometry::through_points(*a, *b, *c),
            _ => None,
        };
    }

    fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }

    // Guide polyline connecting the placed circumference points
    fn preliminary_graphics(&self) -> Vec<Graphic> {
        guide_polyline(self.layout.section(0).unwrap_or(&[]), &self.style)
    }

    fn main_graphics(&self) -> Vec<Graphic> {
        let Some(circle) = self.geometry else {
            return Vec::new();
        };
        let path = kurbo::Circle::new(circle.center, circle.radius).to_path(PATH_TOLERANCE);
        vec![Graphic::stroke(path, &self.style)]
    }

    fn selection_test(&self, rect: Rect) -> bool {
        self.geometry
            .map(|circle| circle.intersects_rect(rect))
            .unwrap_or(false)
    }

    fn distance_to(&self, point: Point) -> Option<f64> {
        self.geometry.map(|circle| circle.distance_to(point))
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

    #[test]
    fn test_guide_appears_from_second_point() {
        let mut object = Object::Circle(Circle::new(ObjectStyle::default()));
        assert!(object.preliminary_graphics().is_empty());

        object.submit_point(p(0.0, 0.0)).unwrap();
        assert!(object.preliminary_graphics().is_empty());

        object.submit_point(p(10.0, 0.0)).unwrap();
        assert_eq!(object.preliminary_graphics().len(), 1);
    }

    #[test]
    fn test_geometry_from_three_points() {
        let mut object = Object::Circle(Circle::new(ObjectStyle::default()));
        object.submit_point(p(5.0, 0.0)).unwrap();
        object.submit_point(p(-5.0, 0.0)).unwrap();
        object.submit_point(p(0.0, 5.0)).unwrap();

        let Object::Circle(circle) = &object else {
            panic!("wrong variant");
        };
        let geometry = circle.circle().unwrap();
        assert!(geometry.center.distance(Point::ORIGIN) < 1e-9);
        assert!((geometry.radius - 5.0).abs() < 1e-9);
        assert_eq!(object.main_graphics().len(), 1);
    }

    #[test]
    fn test_collinear_points_resolve_nothing() {
        let mut object = Object::Circle(Circle::new(ObjectStyle::default()));
        object.submit_point(p(0.0, 0.0)).unwrap();
        object.submit_point(p(5.0, 0.0)).unwrap();
        object.submit_point(p(10.0, 0.0)).unwrap();
        assert!(!object.has_geometry());
        assert!(object.main_graphics().is_empty());
        assert!(!object.selection_test(Rect::new(-100.0, -100.0, 100.0, 100.0)));
    }

    #[test]
    fn test_selection_outside_bounding_circle() {
        let mut object = Object::Circle(Circle::new(ObjectStyle::default()));
        object.submit_point(p(5.0, 0.0)).unwrap();
        object.submit_point(p(-5.0, 0.0)).unwrap();
        object.submit_point(p(0.0, 5.0)).unwrap();
        assert!(object.selection_test(Rect::new(-10.0, -10.0, 10.0, 10.0)));
        assert!(!object.selection_test(Rect::new(20.0, 20.0, 30.0, 30.0)));
    }
}
