//! Pure geometric primitives and queries.
//!
//! Value types only, no engine state: construction from placed points,
//! distance queries for pointer picking, and rectangle intersection tests
//! for marquee selection.

use kurbo::{Point, Rect, Vec2};

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Distance from a point to the segment.
    pub fn distance_to(&self, point: Point) -> f64 {
        let seg = self.end - self.start;
        let pv = point - self.start;
        let len_sq = seg.hypot2();
        if len_sq < f64::EPSILON {
            // Segment is a point
            return pv.hypot();
        }
        let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
        let proj = self.start + t * seg;
        point.distance(proj)
    }

    /// Whether any part of the segment lies inside the rectangle.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        if rect.contains(self.start) || rect.contains(self.end) {
            return true;
        }
        let corners = [
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        (0..4).any(|i| {
            segments_intersect(self.start, self.end, corners[i], corners[(i + 1) % 4])
        })
    }
}

/// A circle defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Circumcircle through three points, or `None` if they are collinear.
    pub fn through_points(a: Point, b: Point, c: Point) -> Option<Self> {
        let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < 1e-9 {
            return None;
        }
        let a2 = a.x * a.x + a.y * a.y;
        let b2 = b.x * b.x + b.y * b.y;
        let c2 = c.x * c.x + c.y * c.y;
        let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
        let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
        let center = Point::new(ux, uy);
        Some(Self::new(center, center.distance(a)))
    }

    /// Whether the point lies on or inside the circle.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Distance from a point to the circle outline.
    pub fn distance_to(&self, point: Point) -> f64 {
        (self.center.distance(point) - self.radius).abs()
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    /// Whether the circle outline passes through the rectangle.
    ///
    /// The outline crosses the rect iff the radius falls between the nearest
    /// and farthest distances from the center to the rect region. A rect
    /// strictly inside the circle never selects it, a rect containing the
    /// whole circle always does.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        let nearest = rect_distance(rect, self.center);
        let farthest = rect_corner_distance(rect, self.center);
        nearest <= self.radius && self.radius <= farthest
    }
}

/// Distance from a point to a rectangle region (zero inside).
fn rect_distance(rect: Rect, p: Point) -> f64 {
    let dx = (rect.x0 - p.x).max(p.x - rect.x1).max(0.0);
    let dy = (rect.y0 - p.y).max(p.y - rect.y1).max(0.0);
    Vec2::new(dx, dy).hypot()
}

/// Distance from a point to the farthest corner of a rectangle.
fn rect_corner_distance(rect: Rect, p: Point) -> f64 {
    let dx = (p.x - rect.x0).abs().max((p.x - rect.x1).abs());
    let dy = (p.y - rect.y0).abs().max((p.y - rect.y1).abs());
    Vec2::new(dx, dy).hypot()
}

/// Signed area of the triangle (a, b, c); zero when collinear.
fn orient(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Whether `p`, known to be collinear with (a, b), lies within the segment's
/// bounding box.
fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) - 1e-9
        && p.x <= a.x.max(b.x) + 1e-9
        && p.y >= a.y.min(b.y) - 1e-9
        && p.y <= a.y.max(b.y) + 1e-9
}

/// Segment-segment intersection test, collinear overlaps included.
pub(crate) fn segments_intersect(a: Point, b: Point, c: Point, d: Point) -> bool {
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1.abs() < 1e-9 && on_segment(c, d, a))
        || (d2.abs() < 1e-9 && on_segment(c, d, b))
        || (d3.abs() < 1e-9 && on_segment(a, b, c))
        || (d4.abs() < 1e-9 && on_segment(a, b, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_length_and_midpoint() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!((seg.length() - 100.0).abs() < f64::EPSILON);
        assert_eq!(seg.midpoint(), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_segment_distance() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((seg.distance_to(Point::new(5.0, 3.0)) - 3.0).abs() < 1e-9);
        assert!((seg.distance_to(Point::new(-3.0, 4.0)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_rect_intersection() {
        let seg = Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        // Rect containing the whole bounding box
        assert!(seg.intersects_rect(Rect::new(-1.0, -1.0, 11.0, 1.0)));
        // Rect crossed by the segment but containing neither endpoint
        assert!(seg.intersects_rect(Rect::new(4.0, -2.0, 6.0, 2.0)));
        // Rect away from the segment
        assert!(!seg.intersects_rect(Rect::new(0.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn test_circumcircle() {
        let circle = Circle::through_points(
            Point::new(5.0, 0.0),
            Point::new(-5.0, 0.0),
            Point::new(0.0, 5.0),
        )
        .unwrap();
        assert!(circle.center.distance(Point::ORIGIN) < 1e-9);
        assert!((circle.radius - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_circumcircle_collinear() {
        let circle = Circle::through_points(
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!(circle.is_none());
    }

    #[test]
    fn test_circle_contains() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        assert!(circle.contains(Point::new(3.0, 4.0)));
        assert!(!circle.contains(Point::new(4.0, 4.0)));
    }

    #[test]
    fn test_circle_rect_intersection() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        // Rect containing the whole circle
        assert!(circle.intersects_rect(Rect::new(-10.0, -10.0, 10.0, 10.0)));
        // Rect crossing the outline
        assert!(circle.intersects_rect(Rect::new(4.0, -1.0, 6.0, 1.0)));
        // Rect entirely outside the bounding circle
        assert!(!circle.intersects_rect(Rect::new(10.0, 10.0, 20.0, 20.0)));
        // Rect strictly inside the circle never touches the outline
        assert!(!circle.intersects_rect(Rect::new(-1.0, -1.0, 1.0, 1.0)));
    }
}
