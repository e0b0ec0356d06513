//! linea core library
//!
//! Object lifecycle engine for an interactive vector editor: point placement
//! sessions, typed geometry derivation, two-phase rendering, analytic
//! selection testing and undo-integrated property editing. UI toolkits sit
//! on top and feed this crate discrete input events.

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod object;
pub mod render;
pub mod selection;
pub mod settings;

pub use canvas::{Canvas, CanvasEvent, Document, SessionProgress, SessionState, StyleTarget};
pub use error::{CanvasError, LayoutError};
pub use history::{EditCommand, EditContext, HistoryStack};
pub use layout::{Layout, LayoutAction, LayoutProgress};
pub use object::{Object, ObjectId, ObjectKind, ObjectModel, ObjectStyle, SerializableColor};
pub use render::Graphic;
pub use selection::Selection;
pub use settings::{SettingChange, SettingKey, Settings, UndoMode};
