//! Typed object model: the capability contract every shape variant satisfies.
//!
//! Each variant owns one [`Layout`], a derived geometry value and an
//! [`ObjectStyle`]. Geometry is always recomputed in full from the layout,
//! never patched incrementally; a partial layout simply yields no geometry.

mod circle;
mod line;

pub use circle::Circle;
pub use line::LineSegment;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LayoutError;
use crate::layout::{Layout, LayoutAction, LayoutProgress};
use crate::render::Graphic;

/// Unique identifier for committed objects.
pub type ObjectId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style attributes snapshotted from the settings at object creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectStyle {
    /// Stroke width, strictly positive.
    pub line_width: f64,
    /// Stroke color.
    pub stroke_color: SerializableColor,
}

impl ObjectStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }
}

impl Default for ObjectStyle {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            stroke_color: SerializableColor::black(),
        }
    }
}

/// Type tag for the closed set of shape variants. Doubles as the factory
/// registry: `DrawingSession::start` stays generic over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    LineSegment,
    Circle,
}

impl ObjectKind {
    /// Declared point requirements for this kind.
    pub fn layout_action(&self) -> LayoutAction {
        match self {
            ObjectKind::LineSegment => LineSegment::layout_action(),
            ObjectKind::Circle => Circle::layout_action(),
        }
    }

    /// Create a fresh object of this kind with the given style snapshot.
    pub fn create(&self, style: ObjectStyle) -> Object {
        match self {
            ObjectKind::LineSegment => Object::LineSegment(LineSegment::new(style)),
            ObjectKind::Circle => Object::Circle(Circle::new(style)),
        }
    }
}

/// Capability contract every shape variant implements.
pub trait ObjectModel {
    /// Unique identifier.
    fn id(&self) -> ObjectId;

    /// Which variant this is.
    fn kind(&self) -> ObjectKind;

    /// The owned layout.
    fn layout(&self) -> &Layout;

    /// Mutable access to the owned layout.
    fn layout_mut(&mut self) -> &mut Layout;

    /// Recompute the derived geometry from the current layout. Partial
    /// layouts leave the geometry unresolved rather than failing.
    fn layout_did_update(&mut self);

    /// Whether the derived geometry is resolved.
    fn has_geometry(&self) -> bool;

    /// Guide rendering shown only while the drawing session is active.
    /// Variants with no useful guide return nothing.
    fn preliminary_graphics(&self) -> Vec<Graphic>;

    /// Rendering of the finished shape; empty while geometry is unresolved.
    fn main_graphics(&self) -> Vec<Graphic>;

    /// Analytic intersection test against a selection rectangle; false while
    /// geometry is unresolved.
    fn selection_test(&self, rect: Rect) -> bool;

    /// Distance from a pointer position to the shape outline, for click
    /// picking; `None` while geometry is unresolved.
    fn distance_to(&self, point: Point) -> Option<f64>;

    /// Style attributes.
    fn style(&self) -> &ObjectStyle;

    /// Mutable style attributes.
    fn style_mut(&mut self) -> &mut ObjectStyle;
}

/// Enum wrapper over the shape variants.
#[derive(Debug, Clone)]
pub enum Object {
    LineSegment(LineSegment),
    Circle(Circle),
}

impl Object {
    /// Append a point, rebuilding geometry whenever a section completes.
    pub fn submit_point(&mut self, point: Point) -> Result<LayoutProgress, LayoutError> {
        let progress = self.layout_mut().push(point)?;
        if progress.section_completed {
            self.layout_did_update();
        }
        Ok(progress)
    }

    /// Roll back the most recently placed point.
    pub fn retract_point(&mut self) -> Option<Point> {
        let point = self.layout_mut().pop()?;
        self.layout_did_update();
        Some(point)
    }

    /// Move the whole object by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.layout_mut().translate(delta);
        self.layout_did_update();
    }

    /// Replace one layout point, returning the previous value.
    pub fn set_point(&mut self, section: usize, index: usize, point: Point) -> Option<Point> {
        let old = self.layout_mut().set_point(section, index, point)?;
        self.layout_did_update();
        Some(old)
    }
}

impl ObjectModel for Object {
    fn id(&self) -> ObjectId {
        match self {
            Object::LineSegment(o) => o.id(),
            Object::Circle(o) => o.id(),
        }
    }

    fn kind(&self) -> ObjectKind {
        match self {
            Object::LineSegment(o) => o.kind(),
            Object::Circle(o) => o.kind(),
        }
    }

    fn layout(&self) -> &Layout {
        match self {
            Object::LineSegment(o) => o.layout(),
            Object::Circle(o) => o.layout(),
        }
    }

    fn layout_mut(&mut self) -> &mut Layout {
        match self {
            Object::LineSegment(o) => o.layout_mut(),
            Object::Circle(o) => o.layout_mut(),
        }
    }

    fn layout_did_update(&mut self) {
        match self {
            Object::LineSegment(o) => o.layout_did_update(),
            Object::Circle(o) => o.layout_did_update(),
        }
    }

    fn has_geometry(&self) -> bool {
        match self {
            Object::LineSegment(o) => o.has_geometry(),
            Object::Circle(o) => o.has_geometry(),
        }
    }

    fn preliminary_graphics(&self) -> Vec<Graphic> {
        match self {
            Object::LineSegment(o) => o.preliminary_graphics(),
            Object::Circle(o) => o.preliminary_graphics(),
        }
    }

    fn main_graphics(&self) -> Vec<Graphic> {
        match self {
            Object::LineSegment(o) => o.main_graphics(),
            Object::Circle(o) => o.main_graphics(),
        }
    }

    fn selection_test(&self, rect: Rect) -> bool {
        match self {
            Object::LineSegment(o) => o.selection_test(rect),
            Object::Circle(o) => o.selection_test(rect),
        }
    }

    fn distance_to(&self, point: Point) -> Option<f64> {
        match self {
            Object::LineSegment(o) => o.distance_to(point),
            Object::Circle(o) => o.distance_to(point),
        }
    }

    fn style(&self) -> &ObjectStyle {
        match self {
            Object::LineSegment(o) => o.style(),
            Object::Circle(o) => o.style(),
        }
    }

    fn style_mut(&mut self) -> &mut ObjectStyle {
        match self {
            Object::LineSegment(o) => o.style_mut(),
            Object::Circle(o) => o.style_mut(),
        }
    }
}

/// Build a guide polyline through already-placed points. Shared by variants
/// whose preliminary rendering connects placements in order.
pub(crate) fn guide_polyline(points: &[Point], style: &ObjectStyle) -> Vec<Graphic> {
    if points.len() < 2 {
        return Vec::new();
    }
    let mut path = kurbo::BezPath::new();
    path.move_to(points[0]);
    for &p in &points[1..] {
        path.line_to(p);
    }
    vec![Graphic::stroke(path, style)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_kind_registry_creates_matching_variant() {
        let line = ObjectKind::LineSegment.create(ObjectStyle::default());
        assert_eq!(line.kind(), ObjectKind::LineSegment);
        assert_eq!(line.layout().action().total_points(), 2);

        let circle = ObjectKind::Circle.create(ObjectStyle::default());
        assert_eq!(circle.kind(), ObjectKind::Circle);
        assert_eq!(circle.layout().action().total_points(), 3);
    }

    #[test]
    fn test_geometry_recomputes_on_section_completion() {
        let mut object = ObjectKind::LineSegment.create(ObjectStyle::default());
        object.submit_point(p(0.0, 0.0)).unwrap();
        assert!(!object.has_geometry());
        object.submit_point(p(10.0, 0.0)).unwrap();
        assert!(object.has_geometry());
    }

    #[test]
    fn test_retract_point_unresolves_geometry() {
        let mut object = ObjectKind::LineSegment.create(ObjectStyle::default());
        object.submit_point(p(0.0, 0.0)).unwrap();
        object.submit_point(p(10.0, 0.0)).unwrap();
        assert_eq!(object.retract_point(), Some(p(10.0, 0.0)));
        assert!(!object.has_geometry());
    }

    #[test]
    fn test_selection_test_false_without_geometry() {
        let mut object = ObjectKind::Circle.create(ObjectStyle::default());
        object.submit_point(p(0.0, 0.0)).unwrap();
        assert!(!object.selection_test(Rect::new(-100.0, -100.0, 100.0, 100.0)));
        assert!(object.main_graphics().is_empty());
    }

    #[test]
    fn test_color_round_trip() {
        let color = SerializableColor::new(10, 20, 30, 200);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }
}
