//! Process-wide drawing defaults with observation and optional undo.
//!
//! New objects snapshot these values at creation; there is no live binding
//! afterwards. Observers are an explicit subscription list invoked
//! synchronously on every write, for UI display sync only. Each setting
//! carries an independent undo mode; when enabled, the canvas records a
//! named history command for the write.

use crate::object::{ObjectStyle, SerializableColor};

/// Key identifying one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    LineWidth,
    StrokeColor,
}

/// A setting write, carrying the new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    LineWidth(f64),
    StrokeColor(SerializableColor),
}

impl SettingChange {
    /// Which setting changed.
    pub fn key(&self) -> SettingKey {
        match self {
            SettingChange::LineWidth(_) => SettingKey::LineWidth,
            SettingChange::StrokeColor(_) => SettingKey::StrokeColor,
        }
    }
}

/// Whether writes to a setting are recorded in history, and under what name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UndoMode {
    #[default]
    Disabled,
    Enabled {
        name: String,
    },
}

impl UndoMode {
    /// Enable undo with the given display name.
    pub fn enabled(name: impl Into<String>) -> Self {
        UndoMode::Enabled { name: name.into() }
    }
}

type Observer = Box<dyn FnMut(&SettingChange)>;

/// Current drawing defaults, owned by the canvas coordinator.
pub struct Settings {
    line_width: f64,
    stroke_color: SerializableColor,
    line_width_undo: UndoMode,
    stroke_color_undo: UndoMode,
    observers: Vec<(SettingKey, Observer)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Defaults: hairline black stroke, undo disabled.
    pub fn new() -> Self {
        Self {
            line_width: 1.0,
            stroke_color: SerializableColor::black(),
            line_width_undo: UndoMode::Disabled,
            stroke_color_undo: UndoMode::Disabled,
            observers: Vec::new(),
        }
    }

    /// Current default line width.
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Current default stroke color.
    pub fn stroke_color(&self) -> SerializableColor {
        self.stroke_color
    }

    /// Style snapshot applied to newly created objects.
    pub fn style(&self) -> ObjectStyle {
        ObjectStyle {
            line_width: self.line_width,
            stroke_color: self.stroke_color,
        }
    }

    /// Write the default line width, notifying observers when it changes.
    pub fn set_line_width(&mut self, line_width: f64) {
        if self.line_width == line_width {
            return;
        }
        self.line_width = line_width;
        log::trace!("default line width set to {line_width}");
        self.notify(SettingChange::LineWidth(line_width));
    }

    /// Write the default stroke color, notifying observers when it changes.
    pub fn set_stroke_color(&mut self, stroke_color: SerializableColor) {
        if self.stroke_color == stroke_color {
            return;
        }
        self.stroke_color = stroke_color;
        log::trace!("default stroke color set to {stroke_color:?}");
        self.notify(SettingChange::StrokeColor(stroke_color));
    }

    /// Undo mode for a setting.
    pub fn undo_mode(&self, key: SettingKey) -> &UndoMode {
        match key {
            SettingKey::LineWidth => &self.line_width_undo,
            SettingKey::StrokeColor => &self.stroke_color_undo,
        }
    }

    /// Set the undo mode for a setting.
    pub fn set_undo_mode(&mut self, key: SettingKey, mode: UndoMode) {
        match key {
            SettingKey::LineWidth => self.line_width_undo = mode,
            SettingKey::StrokeColor => self.stroke_color_undo = mode,
        }
    }

    /// Subscribe to writes of one setting. Callbacks run synchronously, in
    /// subscription order, with the new value.
    pub fn observe(&mut self, key: SettingKey, callback: impl FnMut(&SettingChange) + 'static) {
        self.observers.push((key, Box::new(callback)));
    }

    fn notify(&mut self, change: SettingChange) {
        let key = change.key();
        for (observed, callback) in &mut self.observers {
            if *observed == key {
                callback(&change);
            }
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("line_width", &self.line_width)
            .field("stroke_color", &self.stroke_color)
            .field("line_width_undo", &self.line_width_undo)
            .field("stroke_color_undo", &self.stroke_color_undo)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_style_snapshot() {
        let mut settings = Settings::new();
        settings.set_line_width(3.0);
        let style = settings.style();
        assert_eq!(style.line_width, 3.0);
        assert_eq!(style.stroke_color, SerializableColor::black());
    }

    #[test]
    fn test_observers_fire_synchronously_for_their_key() {
        let mut settings = Settings::new();
        let widths = Rc::new(RefCell::new(Vec::new()));
        let colors = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&widths);
        settings.observe(SettingKey::LineWidth, move |change| {
            if let SettingChange::LineWidth(w) = change {
                sink.borrow_mut().push(*w);
            }
        });
        let sink = Rc::clone(&colors);
        settings.observe(SettingKey::StrokeColor, move |change| {
            sink.borrow_mut().push(*change);
        });

        settings.set_line_width(2.0);
        settings.set_line_width(2.0); // unchanged, no notification
        settings.set_line_width(4.0);
        assert_eq!(*widths.borrow(), vec![2.0, 4.0]);
        assert!(colors.borrow().is_empty());

        settings.set_stroke_color(SerializableColor::new(255, 0, 0, 255));
        assert_eq!(colors.borrow().len(), 1);
    }

    #[test]
    fn test_undo_mode_flags() {
        let mut settings = Settings::new();
        assert_eq!(*settings.undo_mode(SettingKey::LineWidth), UndoMode::Disabled);

        settings.set_undo_mode(SettingKey::LineWidth, UndoMode::enabled("Lineweight"));
        match settings.undo_mode(SettingKey::LineWidth) {
            UndoMode::Enabled { name } => assert_eq!(name, "Lineweight"),
            UndoMode::Disabled => panic!("undo mode not enabled"),
        }
    }
}
