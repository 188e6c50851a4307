//! Pointer events delivered to the editor.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    DoubleClick { position: Point },
}
