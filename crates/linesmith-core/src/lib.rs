//! Linesmith Core Library
//!
//! Platform-agnostic data structures and interaction logic for the
//! Linesmith line editor.

pub mod config;
pub mod document;
pub mod export;
pub mod geometry;
pub mod input;
pub mod menu;
pub mod selection;
pub mod session;
pub mod shapes;

pub use config::{ConfigError, EditorConfig};
pub use document::LineStore;
pub use geometry::CanvasBounds;
pub use input::PointerEvent;
pub use menu::{MenuId, MenuState, ToolbarState};
pub use selection::{CursorHint, DragState, Handle, HandleKind, IconKind};
pub use session::EditorSession;
pub use shapes::{Line, LineId, LineKind, PointRef, SerializableColor};
