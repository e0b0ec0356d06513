//! Error taxonomy for the editing engine.
//!
//! Every error here is recoverable and local: a failed operation leaves the
//! engine state untouched, so callers can surface the failure as a disabled
//! control or ignored input and carry on.

use thiserror::Error;

/// Errors reported by layout point placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A point was submitted but every declared section is already full.
    #[error("layout capacity exceeded")]
    CapacityExceeded,
}

/// Errors reported by canvas-level operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CanvasError {
    /// A drawing session was started while another one is collecting points.
    #[error("a drawing session is already active")]
    SessionAlreadyActive,
    /// A session operation was requested while no session is active.
    #[error("no drawing session is active")]
    NoActiveSession,
    /// A point was placed beyond the declared layout size; the point is dropped.
    #[error("layout capacity exceeded")]
    CapacityExceeded,
    /// The completing point does not resolve a geometry (e.g. three collinear
    /// points for a circle); the point is rolled back and the session keeps
    /// collecting.
    #[error("placed points do not resolve a geometry")]
    DegenerateGeometry,
    /// The undo stack is empty.
    #[error("nothing to undo")]
    NothingToUndo,
    /// The redo stack is empty.
    #[error("nothing to redo")]
    NothingToRedo,
    /// The operation requires a non-empty selection.
    #[error("selection is empty")]
    EmptySelection,
    /// No committed object carries the requested id.
    #[error("no object with the requested id")]
    UnknownObject,
    /// A drag update or end was requested with no drag in progress.
    #[error("no drag gesture is in progress")]
    NoActiveDrag,
    /// A layout point edit addressed a section or index that does not exist.
    #[error("layout point index out of range")]
    PointOutOfRange,
    /// Line widths must be strictly positive.
    #[error("line width must be positive")]
    InvalidLineWidth,
}

impl From<LayoutError> for CanvasError {
    fn from(err: LayoutError) -> Self {
        match err {
            LayoutError::CapacityExceeded => CanvasError::CapacityExceeded,
        }
    }
}
