//! Scripted input: a JSON array of steps replayed in order.

use kurbo::Point;
use linesmith_core::{LineKind, MenuId, PointerEvent, SerializableColor};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Script loading errors.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One step of a script: a pointer event or a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptStep {
    Press {
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Release {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    AddLine {
        #[serde(default)]
        kind: LineKind,
    },
    /// Update the active line; either field may be omitted.
    Update {
        #[serde(default)]
        color: Option<SerializableColor>,
        #[serde(default)]
        width: Option<u32>,
    },
    ToggleLock,
    DeleteLine,
    ToggleMenu {
        menu: MenuId,
    },
    ChooseWidth {
        width: u32,
    },
    ChooseColor {
        color: SerializableColor,
    },
    Resize {
        width: f64,
        height: f64,
    },
    Export,
}

impl ScriptStep {
    /// The pointer event this step stands for, if it is one.
    pub fn pointer_event(&self) -> Option<PointerEvent> {
        let event = match *self {
            ScriptStep::Press { x, y } => PointerEvent::Down {
                position: Point::new(x, y),
            },
            ScriptStep::Move { x, y } => PointerEvent::Move {
                position: Point::new(x, y),
            },
            ScriptStep::Release { x, y } => PointerEvent::Up {
                position: Point::new(x, y),
            },
            ScriptStep::DoubleClick { x, y } => PointerEvent::DoubleClick {
                position: Point::new(x, y),
            },
            _ => return None,
        };
        Some(event)
    }
}

/// Parse a script from JSON.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a script file.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<ScriptStep>, ScriptError> {
    let path = path.as_ref();
    let steps = parse_script(&std::fs::read_to_string(path)?)?;
    log::info!("Loaded {} script steps from {}", steps.len(), path.display());
    Ok(steps)
}
