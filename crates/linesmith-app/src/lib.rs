//! Linesmith Application
//!
//! The application shell: owns an editor session and a renderer, replays
//! scripted input and exports the drawing.

mod app;
mod script;

pub use app::{App, AppConfig, AppError};
pub use script::{ScriptError, ScriptStep, load_script, parse_script};
