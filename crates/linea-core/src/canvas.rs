//! Canvas coordinator: document, drawing session, selection, history and
//! settings.
//!
//! The canvas is the single owner of all mutable engine state. Every input
//! event runs synchronously to completion here: a point placement that
//! completes a layout commits the object and records history before the
//! call returns, so no interleaved partial state is ever observable.

use std::collections::VecDeque;

use kurbo::{Point, Rect, Vec2};

use crate::error::CanvasError;
use crate::history::{EditCommand, EditContext, HistoryStack};
use crate::layout::LayoutProgress;
use crate::object::{Object, ObjectId, ObjectKind, ObjectModel, SerializableColor};
use crate::render::{self, Graphic};
use crate::selection::{self, Selection};
use crate::settings::{SettingKey, Settings, UndoMode};

/// Ordered collection of committed objects. Insertion order is z-order for
/// rendering and hit-test priority.
#[derive(Debug, Clone, Default)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed objects in insertion order (back to front).
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|object| object.id() == id)
    }

    /// Append an object on top of the z-order.
    pub fn add(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Insert an object at a z-order position (clamped to the current size).
    pub fn insert(&mut self, index: usize, object: Object) {
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
    }

    /// Remove an object, returning its z-order position and the object.
    pub fn remove(&mut self, id: ObjectId) -> Option<(usize, Object)> {
        let index = self.objects.iter().position(|object| object.id() == id)?;
        Some((index, self.objects.remove(index)))
    }

    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.iter().find(|object| object.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.iter_mut().find(|object| object.id() == id)
    }
}

/// Observable session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Collecting(ObjectKind),
}

/// Outcome of one accepted point placement at the canvas level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionProgress {
    /// The session keeps collecting.
    Collecting(LayoutProgress),
    /// The layout completed and the object was committed under this id.
    Committed(ObjectId),
}

/// Notifications for UI state refresh, drained via [`Canvas::poll_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    SessionStarted(ObjectKind),
    SessionFinished(ObjectId),
    SessionCancelled,
    SelectionChanged,
}

/// Where a property change applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTarget {
    /// The currently selected objects, as one coalesced command.
    Selection,
    /// The process-wide defaults new objects inherit.
    Defaults,
}

/// The in-progress drawing session: exactly one un-committed object.
#[derive(Debug)]
struct DrawingSession {
    object: Object,
}

/// An in-flight drag gesture over the selection, coalesced into one command
/// when it ends.
#[derive(Debug)]
struct DragState {
    ids: Vec<ObjectId>,
    total: Vec2,
}

/// The canvas-level coordinator.
pub struct Canvas {
    document: Document,
    settings: Settings,
    selection: Selection,
    history: HistoryStack,
    session: Option<DrawingSession>,
    drag: Option<DragState>,
    events: VecDeque<CanvasEvent>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a canvas with default settings.
    pub fn new() -> Self {
        Self::with_settings(Settings::new())
    }

    /// Create a canvas owning the given settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            document: Document::new(),
            settings,
            selection: Selection::new(),
            history: HistoryStack::new(),
            session: None,
            drag: None,
            events: VecDeque::new(),
        }
    }

    // ------------------------------------------------------------------
    // Drawing session
    // ------------------------------------------------------------------

    /// Current session state.
    pub fn session_state(&self) -> SessionState {
        match &self.session {
            Some(session) => SessionState::Collecting(session.object.kind()),
            None => SessionState::Idle,
        }
    }

    /// The in-progress object, if a session is active.
    pub fn session_object(&self) -> Option<&Object> {
        self.session.as_ref().map(|session| &session.object)
    }

    /// Start collecting points for a new object of `kind`, seeded with the
    /// current settings.
    pub fn start_session(&mut self, kind: ObjectKind) -> Result<(), CanvasError> {
        if self.session.is_some() {
            return Err(CanvasError::SessionAlreadyActive);
        }
        let object = kind.create(self.settings.style());
        log::debug!("session started: {kind:?}");
        self.session = Some(DrawingSession { object });
        self.events.push_back(CanvasEvent::SessionStarted(kind));
        Ok(())
    }

    /// Place one point. Commits the object and returns to idle when the
    /// placement completes the layout.
    pub fn place_point(&mut self, point: Point) -> Result<SessionProgress, CanvasError> {
        let mut session = self.session.take().ok_or(CanvasError::NoActiveSession)?;

        let progress = match session.object.submit_point(point) {
            Ok(progress) => progress,
            Err(err) => {
                self.session = Some(session);
                return Err(err.into());
            }
        };
        if !progress.layout_completed {
            self.session = Some(session);
            return Ok(SessionProgress::Collecting(progress));
        }
        if !session.object.has_geometry() {
            // Completing point does not resolve a geometry (e.g. collinear
            // circle points); roll it back and keep collecting.
            session.object.retract_point();
            self.session = Some(session);
            return Err(CanvasError::DegenerateGeometry);
        }

        let id = session.object.id();
        log::debug!("session finished: committing {:?} {id}", session.object.kind());
        self.document.add(session.object.clone());
        self.history.push(EditCommand::AddObject {
            object: session.object,
        });
        self.events.push_back(CanvasEvent::SessionFinished(id));
        Ok(SessionProgress::Committed(id))
    }

    /// Discard the in-progress object. Touches neither the document nor the
    /// history.
    pub fn cancel_session(&mut self) -> Result<(), CanvasError> {
        let session = self.session.take().ok_or(CanvasError::NoActiveSession)?;
        log::debug!("session cancelled: {:?}", session.object.kind());
        self.events.push_back(CanvasEvent::SessionCancelled);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Everything to draw: session guides first, then committed objects in
    /// insertion order.
    pub fn renderables(&self) -> Vec<Graphic> {
        render::renderables(self.session_object(), self.document.objects())
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Committed objects, in z-order.
    pub fn objects(&self) -> &[Object] {
        self.document.objects()
    }

    /// Currently selected ids.
    pub fn selection(&self) -> &[ObjectId] {
        self.selection.ids()
    }

    /// Replace the selection with every object intersecting the marquee rect.
    pub fn select_within(&mut self, rect: Rect) -> &[ObjectId] {
        let hits = selection::select_within(self.document.objects(), rect);
        if self.selection.set(hits) {
            self.events.push_back(CanvasEvent::SelectionChanged);
        }
        self.selection.ids()
    }

    /// Topmost object within `range` of a pointer position.
    pub fn object_at(&self, point: Point, range: f64) -> Option<ObjectId> {
        selection::object_at(self.document.objects(), point, range)
    }

    /// Additive click toggle. Returns whether the object is now selected.
    pub fn toggle_selection(&mut self, id: ObjectId) -> Result<bool, CanvasError> {
        if !self.document.contains(id) {
            return Err(CanvasError::UnknownObject);
        }
        let selected = self.selection.toggle(id);
        self.events.push_back(CanvasEvent::SelectionChanged);
        Ok(selected)
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        if self.selection.clear() {
            self.events.push_back(CanvasEvent::SelectionChanged);
        }
    }

    /// Remove every selected object as one command. Returns how many were
    /// removed.
    pub fn remove_selected(&mut self) -> Result<usize, CanvasError> {
        if self.selection.is_empty() {
            return Err(CanvasError::EmptySelection);
        }
        let selected = self.selection.ids().to_vec();
        let mut removed = Vec::new();
        for id in selected {
            if let Some(entry) = self.document.remove(id) {
                removed.push(entry);
            }
        }
        // Ascending insertion positions so revert rebuilds the z-order
        removed.sort_by_key(|&(index, _)| index);
        let count = removed.len();
        self.selection.clear();
        self.events.push_back(CanvasEvent::SelectionChanged);
        self.history
            .push(EditCommand::RemoveObjects { objects: removed });
        Ok(count)
    }

    // ------------------------------------------------------------------
    // Drag gesture
    // ------------------------------------------------------------------

    /// Begin dragging the selected objects.
    pub fn begin_drag(&mut self) -> Result<(), CanvasError> {
        if self.selection.is_empty() {
            return Err(CanvasError::EmptySelection);
        }
        self.drag = Some(DragState {
            ids: self.selection.ids().to_vec(),
            total: Vec2::ZERO,
        });
        Ok(())
    }

    /// Apply one incremental drag delta.
    pub fn update_drag(&mut self, delta: Vec2) -> Result<(), CanvasError> {
        let drag = self.drag.as_mut().ok_or(CanvasError::NoActiveDrag)?;
        drag.total += delta;
        for &id in &drag.ids {
            if let Some(object) = self.document.get_mut(id) {
                object.translate(delta);
            }
        }
        Ok(())
    }

    /// End the gesture, recording one coalesced "Move" command. A gesture
    /// with zero total delta records nothing.
    pub fn end_drag(&mut self) -> Result<(), CanvasError> {
        let drag = self.drag.take().ok_or(CanvasError::NoActiveDrag)?;
        if drag.total != Vec2::ZERO {
            self.history.push(EditCommand::Translate {
                ids: drag.ids,
                delta: drag.total,
            });
        }
        Ok(())
    }

    /// Abort the gesture, reverting every applied delta without touching
    /// history.
    pub fn cancel_drag(&mut self) -> Result<(), CanvasError> {
        let drag = self.drag.take().ok_or(CanvasError::NoActiveDrag)?;
        self.revert_drag(drag);
        Ok(())
    }

    fn revert_drag(&mut self, drag: DragState) {
        if drag.total == Vec2::ZERO {
            return;
        }
        for &id in &drag.ids {
            if let Some(object) = self.document.get_mut(id) {
                object.translate(-drag.total);
            }
        }
    }

    // ------------------------------------------------------------------
    // Property edits
    // ------------------------------------------------------------------

    /// Replace one layout point of a committed object, as one "Edit" command.
    pub fn edit_point(
        &mut self,
        id: ObjectId,
        section: usize,
        index: usize,
        point: Point,
    ) -> Result<(), CanvasError> {
        let object = self.document.get_mut(id).ok_or(CanvasError::UnknownObject)?;
        let old = object
            .set_point(section, index, point)
            .ok_or(CanvasError::PointOutOfRange)?;
        if !object.has_geometry() {
            // Committed objects always carry resolved geometry
            object.set_point(section, index, old);
            return Err(CanvasError::DegenerateGeometry);
        }
        if old != point {
            self.history.push(EditCommand::EditPoint {
                id,
                section,
                index,
                old,
                new: point,
            });
        }
        Ok(())
    }

    /// Apply a line width to the selection or to the defaults.
    pub fn apply_line_width(
        &mut self,
        line_width: f64,
        target: StyleTarget,
    ) -> Result<(), CanvasError> {
        if !(line_width.is_finite() && line_width > 0.0) {
            return Err(CanvasError::InvalidLineWidth);
        }
        match target {
            StyleTarget::Defaults => self.set_default_line_width(line_width),
            StyleTarget::Selection => {
                if self.selection.is_empty() {
                    return Err(CanvasError::EmptySelection);
                }
                let mut changes = Vec::new();
                for &id in self.selection.ids() {
                    if let Some(object) = self.document.get_mut(id) {
                        let old = object.style().line_width;
                        if old != line_width {
                            object.style_mut().line_width = line_width;
                            changes.push((id, old, line_width));
                        }
                    }
                }
                if !changes.is_empty() {
                    self.history.push(EditCommand::SetLineWidth { changes });
                }
                Ok(())
            }
        }
    }

    /// Apply a stroke color to the selection or to the defaults.
    pub fn apply_stroke_color(
        &mut self,
        color: SerializableColor,
        target: StyleTarget,
    ) -> Result<(), CanvasError> {
        match target {
            StyleTarget::Defaults => {
                self.set_default_stroke_color(color);
                Ok(())
            }
            StyleTarget::Selection => {
                if self.selection.is_empty() {
                    return Err(CanvasError::EmptySelection);
                }
                let mut changes = Vec::new();
                for &id in self.selection.ids() {
                    if let Some(object) = self.document.get_mut(id) {
                        let old = object.style().stroke_color;
                        if old != color {
                            object.style_mut().stroke_color = color;
                            changes.push((id, old, color));
                        }
                    }
                }
                if !changes.is_empty() {
                    self.history.push(EditCommand::SetStrokeColor { changes });
                }
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------

    /// The settings store (subscribe, read, configure undo modes).
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Mutable settings store access.
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Write the default line width; recorded in history when the setting's
    /// undo mode is enabled.
    pub fn set_default_line_width(&mut self, line_width: f64) -> Result<(), CanvasError> {
        if !(line_width.is_finite() && line_width > 0.0) {
            return Err(CanvasError::InvalidLineWidth);
        }
        let old = self.settings.line_width();
        if old == line_width {
            return Ok(());
        }
        let name = match self.settings.undo_mode(SettingKey::LineWidth) {
            UndoMode::Enabled { name } => Some(name.clone()),
            UndoMode::Disabled => None,
        };
        self.settings.set_line_width(line_width);
        if let Some(name) = name {
            self.history.push(EditCommand::SetDefaultLineWidth {
                name,
                old,
                new: line_width,
            });
        }
        Ok(())
    }

    /// Write the default stroke color; recorded in history when the setting's
    /// undo mode is enabled.
    pub fn set_default_stroke_color(&mut self, color: SerializableColor) {
        let old = self.settings.stroke_color();
        if old == color {
            return;
        }
        let name = match self.settings.undo_mode(SettingKey::StrokeColor) {
            UndoMode::Enabled { name } => Some(name.clone()),
            UndoMode::Disabled => None,
        };
        self.settings.set_stroke_color(color);
        if let Some(name) = name {
            self.history.push(EditCommand::SetDefaultStrokeColor {
                name,
                old,
                new: color,
            });
        }
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Whether undo is available, and under what display name.
    pub fn undo_available(&self) -> Option<&str> {
        self.history.undo_available()
    }

    /// Whether redo is available, and under what display name.
    pub fn redo_available(&self) -> Option<&str> {
        self.history.redo_available()
    }

    /// Revert the most recent command. An in-flight drag is rolled back
    /// first so the checkpoint sees a consistent document.
    pub fn undo(&mut self) -> Result<(), CanvasError> {
        if !self.history.can_undo() {
            return Err(CanvasError::NothingToUndo);
        }
        if let Some(drag) = self.drag.take() {
            self.revert_drag(drag);
        }
        let mut ctx = EditContext {
            document: &mut self.document,
            settings: &mut self.settings,
        };
        self.history.undo(&mut ctx)?;
        self.prune_selection();
        Ok(())
    }

    /// Replay the most recently undone command.
    pub fn redo(&mut self) -> Result<(), CanvasError> {
        if !self.history.can_redo() {
            return Err(CanvasError::NothingToRedo);
        }
        if let Some(drag) = self.drag.take() {
            self.revert_drag(drag);
        }
        let mut ctx = EditContext {
            document: &mut self.document,
            settings: &mut self.settings,
        };
        self.history.redo(&mut ctx)?;
        self.prune_selection();
        Ok(())
    }

    fn prune_selection(&mut self) {
        let document = &self.document;
        if self.selection.retain(|id| document.contains(id)) {
            self.events.push_back(CanvasEvent::SelectionChanged);
        }
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Drain the next pending UI notification.
    pub fn poll_event(&mut self) -> Option<CanvasEvent> {
        self.events.pop_front()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("document", &self.document)
            .field("settings", &self.settings)
            .field("selection", &self.selection)
            .field("session", &self.session)
            .field("drag", &self.drag)
            .finish()
    }
}
