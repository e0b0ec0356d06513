//! Named, reversible edit commands and the undo/redo stacks.
//!
//! Every structural or property mutation of the canvas is recorded as one
//! [`EditCommand`] carrying forward and backward deltas. Continuous gestures
//! (a drag, an apply-to-selection style change) coalesce into a single
//! command, so one undo reverses the whole gesture. Display names are
//! directional: they describe what invoking undo or redo will do.

use kurbo::{Point, Vec2};

use crate::canvas::Document;
use crate::error::CanvasError;
use crate::object::{Object, ObjectId, ObjectModel, SerializableColor};
use crate::settings::Settings;

/// Mutable view of the state commands apply to.
pub struct EditContext<'a> {
    pub document: &'a mut Document,
    pub settings: &'a mut Settings,
}

/// One reversible unit of work.
#[derive(Debug, Clone)]
pub enum EditCommand {
    /// An object was committed to the canvas.
    AddObject { object: Object },
    /// Objects were removed; indices are ascending insertion positions so
    /// revert restores the original z-order.
    RemoveObjects { objects: Vec<(usize, Object)> },
    /// A coalesced drag gesture over the selected objects.
    Translate { ids: Vec<ObjectId>, delta: Vec2 },
    /// One layout point of one object was edited.
    EditPoint {
        id: ObjectId,
        section: usize,
        index: usize,
        old: Point,
        new: Point,
    },
    /// Line width applied to a selection; one entry per affected object,
    /// (id, old, new).
    SetLineWidth { changes: Vec<(ObjectId, f64, f64)> },
    /// Stroke color applied to a selection.
    SetStrokeColor {
        changes: Vec<(ObjectId, SerializableColor, SerializableColor)>,
    },
    /// An undo-enabled write of the default line width setting.
    SetDefaultLineWidth { name: String, old: f64, new: f64 },
    /// An undo-enabled write of the default stroke color setting.
    SetDefaultStrokeColor {
        name: String,
        old: SerializableColor,
        new: SerializableColor,
    },
}

impl EditCommand {
    /// Replay the forward delta.
    pub fn apply(&self, ctx: &mut EditContext<'_>) {
        match self {
            EditCommand::AddObject { object } => {
                ctx.document.add(object.clone());
            }
            EditCommand::RemoveObjects { objects } => {
                for (_, object) in objects {
                    ctx.document.remove(object.id());
                }
            }
            EditCommand::Translate { ids, delta } => {
                for &id in ids {
                    if let Some(object) = ctx.document.get_mut(id) {
                        object.translate(*delta);
                    }
                }
            }
            EditCommand::EditPoint {
                id,
                section,
                index,
                new,
                ..
            } => {
                if let Some(object) = ctx.document.get_mut(*id) {
                    object.set_point(*section, *index, *new);
                }
            }
            EditCommand::SetLineWidth { changes } => {
                for &(id, _, new) in changes {
                    if let Some(object) = ctx.document.get_mut(id) {
                        object.style_mut().line_width = new;
                    }
                }
            }
            EditCommand::SetStrokeColor { changes } => {
                for &(id, _, new) in changes {
                    if let Some(object) = ctx.document.get_mut(id) {
                        object.style_mut().stroke_color = new;
                    }
                }
            }
            EditCommand::SetDefaultLineWidth { new, .. } => {
                ctx.settings.set_line_width(*new);
            }
            EditCommand::SetDefaultStrokeColor { new, .. } => {
                ctx.settings.set_stroke_color(*new);
            }
        }
    }

    /// Replay the backward delta.
    pub fn revert(&self, ctx: &mut EditContext<'_>) {
        match self {
            EditCommand::AddObject { object } => {
                ctx.document.remove(object.id());
            }
            EditCommand::RemoveObjects { objects } => {
                // Ascending order keeps each stored index valid on reinsert
                for (index, object) in objects {
                    ctx.document.insert(*index, object.clone());
                }
            }
            EditCommand::Translate { ids, delta } => {
                for &id in ids {
                    if let Some(object) = ctx.document.get_mut(id) {
                        object.translate(-*delta);
                    }
                }
            }
            EditCommand::EditPoint {
                id,
                section,
                index,
                old,
                ..
            } => {
                if let Some(object) = ctx.document.get_mut(*id) {
                    object.set_point(*section, *index, *old);
                }
            }
            EditCommand::SetLineWidth { changes } => {
                for &(id, old, _) in changes {
                    if let Some(object) = ctx.document.get_mut(id) {
                        object.style_mut().line_width = old;
                    }
                }
            }
            EditCommand::SetStrokeColor { changes } => {
                for &(id, old, _) in changes {
                    if let Some(object) = ctx.document.get_mut(id) {
                        object.style_mut().stroke_color = old;
                    }
                }
            }
            EditCommand::SetDefaultLineWidth { old, .. } => {
                ctx.settings.set_line_width(*old);
            }
            EditCommand::SetDefaultStrokeColor { old, .. } => {
                ctx.settings.set_stroke_color(*old);
            }
        }
    }

    /// Display name for an undo of this command.
    pub fn undo_name(&self) -> &str {
        match self {
            EditCommand::AddObject { .. } => "Remove",
            EditCommand::RemoveObjects { .. } => "Restore",
            EditCommand::Translate { .. } => "Move",
            EditCommand::EditPoint { .. } => "Edit",
            EditCommand::SetLineWidth { .. } => "Lineweight",
            EditCommand::SetStrokeColor { .. } => "Color",
            EditCommand::SetDefaultLineWidth { name, .. } => name,
            EditCommand::SetDefaultStrokeColor { name, .. } => name,
        }
    }

    /// Display name for a redo of this command.
    pub fn redo_name(&self) -> &str {
        match self {
            EditCommand::AddObject { .. } => "Restore",
            EditCommand::RemoveObjects { .. } => "Remove",
            _ => self.undo_name(),
        }
    }
}

/// Two-stack undo/redo log.
#[derive(Debug, Default)]
pub struct HistoryStack {
    undo_stack: Vec<EditCommand>,
    redo_stack: Vec<EditCommand>,
}

impl HistoryStack {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an already-applied command. Discards the redo branch.
    pub fn push(&mut self, command: EditCommand) {
        log::debug!("history push: {}", command.undo_name());
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Revert the most recent command.
    pub fn undo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CanvasError> {
        let command = self.undo_stack.pop().ok_or(CanvasError::NothingToUndo)?;
        log::debug!("undo: {}", command.undo_name());
        command.revert(ctx);
        self.redo_stack.push(command);
        Ok(())
    }

    /// Replay the most recently undone command.
    pub fn redo(&mut self, ctx: &mut EditContext<'_>) -> Result<(), CanvasError> {
        let command = self.redo_stack.pop().ok_or(CanvasError::NothingToRedo)?;
        log::debug!("redo: {}", command.redo_name());
        command.apply(ctx);
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Display name of the command undo would revert.
    pub fn undo_available(&self) -> Option<&str> {
        self.undo_stack.last().map(EditCommand::undo_name)
    }

    /// Display name of the command redo would replay.
    pub fn redo_available(&self) -> Option<&str> {
        self.redo_stack.last().map(EditCommand::redo_name)
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{ObjectKind, ObjectStyle};
    use kurbo::Point;

    fn committed_line() -> Object {
        let mut object = ObjectKind::LineSegment.create(ObjectStyle::default());
        object.submit_point(Point::new(0.0, 0.0)).unwrap();
        object.submit_point(Point::new(10.0, 0.0)).unwrap();
        object
    }

    #[test]
    fn test_empty_stacks_report_errors() {
        let mut history = HistoryStack::new();
        let mut document = Document::new();
        let mut settings = Settings::new();
        let mut ctx = EditContext {
            document: &mut document,
            settings: &mut settings,
        };
        assert_eq!(history.undo(&mut ctx), Err(CanvasError::NothingToUndo));
        assert_eq!(history.redo(&mut ctx), Err(CanvasError::NothingToRedo));
        assert!(history.undo_available().is_none());
    }

    #[test]
    fn test_add_round_trips_with_directional_names() {
        let mut history = HistoryStack::new();
        let mut document = Document::new();
        let mut settings = Settings::new();

        let object = committed_line();
        let id = object.id();
        document.add(object.clone());
        history.push(EditCommand::AddObject { object });
        assert_eq!(history.undo_available(), Some("Remove"));

        let mut ctx = EditContext {
            document: &mut document,
            settings: &mut settings,
        };
        history.undo(&mut ctx).unwrap();
        assert!(ctx.document.is_empty());
        assert_eq!(history.redo_available(), Some("Restore"));

        history.redo(&mut ctx).unwrap();
        assert!(ctx.document.get(id).is_some());
        assert_eq!(history.undo_available(), Some("Remove"));
    }

    #[test]
    fn test_push_discards_redo_branch() {
        let mut history = HistoryStack::new();
        let mut document = Document::new();
        let mut settings = Settings::new();

        let first = committed_line();
        document.add(first.clone());
        history.push(EditCommand::AddObject { object: first });

        let mut ctx = EditContext {
            document: &mut document,
            settings: &mut settings,
        };
        history.undo(&mut ctx).unwrap();
        assert!(history.can_redo());

        let second = committed_line();
        document.add(second.clone());
        history.push(EditCommand::AddObject { object: second });
        assert!(!history.can_redo());
    }

    #[test]
    fn test_remove_restores_z_order() {
        let mut history = HistoryStack::new();
        let mut document = Document::new();
        let mut settings = Settings::new();

        let a = committed_line();
        let b = committed_line();
        let c = committed_line();
        let order = vec![a.id(), b.id(), c.id()];
        document.add(a);
        document.add(b.clone());
        document.add(c);

        // Remove the middle object
        let removed = document.remove(b.id()).unwrap();
        history.push(EditCommand::RemoveObjects {
            objects: vec![removed],
        });
        assert_eq!(history.undo_available(), Some("Restore"));

        let mut ctx = EditContext {
            document: &mut document,
            settings: &mut settings,
        };
        history.undo(&mut ctx).unwrap();
        let ids: Vec<_> = document.objects().iter().map(ObjectModel::id).collect();
        assert_eq!(ids, order);
    }

    #[test]
    fn test_translate_round_trip() {
        let mut history = HistoryStack::new();
        let mut document = Document::new();
        let mut settings = Settings::new();

        let object = committed_line();
        let id = object.id();
        document.add(object);
        if let Some(object) = document.get_mut(id) {
            object.translate(Vec2::new(5.0, 5.0));
        }
        history.push(EditCommand::Translate {
            ids: vec![id],
            delta: Vec2::new(5.0, 5.0),
        });

        let mut ctx = EditContext {
            document: &mut document,
            settings: &mut settings,
        };
        history.undo(&mut ctx).unwrap();
        let start = document.get(id).unwrap().layout().section(0).unwrap()[0];
        assert_eq!(start, Point::new(0.0, 0.0));
    }
}
