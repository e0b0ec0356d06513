//! Two-phase render pipeline.
//!
//! A stateless query run on every redraw: preliminary guide graphics from the
//! in-progress session object first, then main graphics from every committed
//! object in insertion order (insertion order is z-order).

use kurbo::BezPath;
use peniko::Color;

use crate::object::{Object, ObjectModel, ObjectStyle};

/// One drawable stroked path with its resolved style.
#[derive(Debug, Clone)]
pub struct Graphic {
    /// Path in canvas coordinates.
    pub path: BezPath,
    /// Stroke color.
    pub color: Color,
    /// Stroke width.
    pub line_width: f64,
}

impl Graphic {
    /// A stroked path styled from an object's current style.
    pub fn stroke(path: BezPath, style: &ObjectStyle) -> Self {
        Self {
            path,
            color: style.stroke(),
            line_width: style.line_width,
        }
    }
}

/// Collect everything to draw, guides first, then committed shapes.
pub fn renderables(session_object: Option<&Object>, objects: &[Object]) -> Vec<Graphic> {
    let mut out = Vec::new();
    if let Some(object) = session_object {
        out.extend(object.preliminary_graphics());
    }
    for object in objects {
        out.extend(object.main_graphics());
    }
    out
}
