//! Application state and script replay.

use crate::script::{ScriptError, ScriptStep};
use kurbo::Size;
use linesmith_core::{ConfigError, EditorConfig, EditorSession, export};
use linesmith_render::{RenderContext, Renderer, RendererError, Scene, SceneRenderer};
use peniko::Color;
use thiserror::Error;

/// Errors surfaced by the application binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub editor: EditorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Linesmith".to_string(),
            width: 1280,
            height: 800,
            background_color: Color::WHITE,
            editor: EditorConfig::default(),
        }
    }
}

/// The application: an editor session plus the renderer that redraws it.
pub struct App {
    config: AppConfig,
    session: EditorSession,
    renderer: SceneRenderer,
    /// Number of frames rendered so far.
    frames: usize,
    /// Data URIs produced by export steps, oldest first.
    exports: Vec<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        let viewport = Size::new(f64::from(config.width), f64::from(config.height));
        let session = EditorSession::new(config.editor.clone(), viewport);
        let mut app = Self {
            config,
            session,
            renderer: SceneRenderer::new(),
            frames: 0,
            exports: Vec::new(),
        };
        app.redraw_if_needed();
        app
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// CSS name of the cursor the host should show.
    pub fn cursor_name(&self) -> &'static str {
        self.session.cursor().css_name()
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// The most recently rendered frame.
    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    /// Export the drawing and remember the result.
    pub fn export(&mut self) -> String {
        let uri = self.session.export_data_uri();
        self.exports.push(uri.clone());
        uri
    }

    /// Rebuild the scene if the session changed. Returns whether a frame
    /// was rendered.
    pub fn redraw_if_needed(&mut self) -> bool {
        if !self.session.take_redraw() {
            return false;
        }
        let ctx = RenderContext::new(&self.session).with_background(self.config.background_color);
        self.renderer.build_scene(&ctx);
        self.frames += 1;
        true
    }

    /// Apply one step, then redraw if it changed anything.
    pub fn apply(&mut self, step: &ScriptStep) {
        log::debug!("Applying {step:?}");
        if let Some(event) = step.pointer_event() {
            let before = self.session.cursor();
            self.session.handle_pointer(event);
            if self.session.cursor() != before {
                log::trace!("Cursor: {}", self.cursor_name());
            }
        } else {
            let applied = match step {
                ScriptStep::AddLine { kind } => {
                    self.session.add_line(*kind);
                    true
                }
                ScriptStep::Update { color, width } => {
                    self.session.update_active_line(*color, *width)
                }
                ScriptStep::ToggleLock => self.session.toggle_lock().is_some(),
                ScriptStep::DeleteLine => self.session.delete_active_line().is_some(),
                ScriptStep::ToggleMenu { menu } => {
                    self.session.toggle_menu(*menu);
                    true
                }
                ScriptStep::ChooseWidth { width } => self.session.choose_width(*width),
                ScriptStep::ChooseColor { color } => self.session.choose_color(*color),
                ScriptStep::Resize { width, height } => {
                    self.session.resize(*width, *height);
                    true
                }
                ScriptStep::Export => {
                    self.export();
                    true
                }
                ScriptStep::Press { .. }
                | ScriptStep::Move { .. }
                | ScriptStep::Release { .. }
                | ScriptStep::DoubleClick { .. } => true,
            };
            if !applied {
                log::warn!("Ignored {step:?}: no active line");
            }
        }
        self.redraw_if_needed();
    }

    /// Replay a script in order.
    pub fn run_script(&mut self, steps: &[ScriptStep]) {
        for step in steps {
            self.apply(step);
        }
        log::info!(
            "Replayed {} steps: {} line(s), {} frame(s)",
            steps.len(),
            self.session.store().len(),
            self.frames
        );
        log::debug!("Drawing:\n{}", export::describe(self.session.store()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use kurbo::Point;
    use linesmith_core::export::decode_data_uri;
    use linesmith_core::{LineKind, MenuId, SerializableColor};

    fn app() -> App {
        App::with_config(AppConfig {
            width: 1000,
            height: 800,
            ..AppConfig::default()
        })
    }

    #[test]
    fn test_initial_frame() {
        let app = app();
        assert_eq!(app.frames(), 1);
        // Background only.
        assert_eq!(app.scene().len(), 1);
        assert_eq!(app.session().viewport_size(), Size::new(1000.0, 800.0));
    }

    #[test]
    fn test_every_change_redraws() {
        let mut app = app();
        app.apply(&ScriptStep::AddLine {
            kind: LineKind::Step,
        });
        assert_eq!(app.frames(), 2);
        assert!(app.scene().len() > 2);

        // Release without a drag changes nothing.
        app.apply(&ScriptStep::Release { x: 0.0, y: 0.0 });
        assert_eq!(app.frames(), 2);

        app.apply(&ScriptStep::Move { x: 10.0, y: 10.0 });
        assert_eq!(app.frames(), 3);
    }

    #[test]
    fn test_drag_script() {
        let mut app = app();
        let steps = parse_script(
            r#"[
                {"type": "add_line", "kind": "straight"},
                {"type": "press", "x": 700, "y": 300},
                {"type": "move", "x": 900, "y": 100},
                {"type": "move", "x": 2000, "y": -40},
                {"type": "release", "x": 2000, "y": -40},
                {"type": "double_click", "x": 550, "y": 200}
            ]"#,
        )
        .unwrap();
        app.run_script(&steps);
        let line = app.session().active_line().unwrap();
        assert_eq!(line.end, Point::new(995.0, 5.0));
        assert_eq!(line.elbows.len(), 0);
        assert!(!app.session().is_dragging());
    }

    #[test]
    fn test_cursor_follows_pointer() {
        let mut app = app();
        assert_eq!(app.cursor_name(), "default");
        app.apply(&ScriptStep::AddLine {
            kind: LineKind::Straight,
        });
        app.apply(&ScriptStep::Move { x: 403.0, y: 301.0 });
        assert_eq!(app.cursor_name(), "grab");
        app.apply(&ScriptStep::Press { x: 403.0, y: 301.0 });
        app.apply(&ScriptStep::Move { x: 420.0, y: 320.0 });
        assert_eq!(app.cursor_name(), "grabbing");
        app.apply(&ScriptStep::Release { x: 420.0, y: 320.0 });
        assert_eq!(app.cursor_name(), "grab");
        app.apply(&ScriptStep::Move { x: 900.0, y: 700.0 });
        assert_eq!(app.cursor_name(), "default");
    }

    #[test]
    fn test_commands_without_active_line_are_ignored() {
        let mut app = app();
        app.apply(&ScriptStep::ToggleLock);
        app.apply(&ScriptStep::DeleteLine);
        app.apply(&ScriptStep::ChooseWidth { width: 3 });
        assert!(app.session().store().is_empty());
        assert_eq!(app.session().menus().open(), None);
    }

    #[test]
    fn test_toolbar_commands() {
        let mut app = app();
        let green = SerializableColor::rgb(0x22, 0xc5, 0x5e);
        app.run_script(&[
            ScriptStep::AddLine {
                kind: LineKind::Curved,
            },
            ScriptStep::ToggleMenu {
                menu: MenuId::ColorPalette,
            },
            ScriptStep::ChooseColor { color: green },
            ScriptStep::Update {
                color: None,
                width: Some(13),
            },
            ScriptStep::ToggleLock,
        ]);
        let toolbar = app.session().toolbar().unwrap();
        assert_eq!(toolbar.swatch, green);
        assert_eq!(toolbar.width, 13);
        assert!(toolbar.locked);
        assert_eq!(toolbar.open_menu, None);

        app.apply(&ScriptStep::DeleteLine);
        assert!(app.session().toolbar().is_none());
    }

    #[test]
    fn test_export_step() {
        let mut app = app();
        app.run_script(&[
            ScriptStep::AddLine {
                kind: LineKind::Straight,
            },
            ScriptStep::AddLine {
                kind: LineKind::Step,
            },
            ScriptStep::Export,
        ]);
        assert_eq!(app.exports().len(), 1);
        let svg = decode_data_uri(&app.exports()[0]).unwrap();
        assert_eq!(svg.matches("<path ").count(), 2);
    }

    #[test]
    fn test_resize_step() {
        let mut app = app();
        app.apply(&ScriptStep::Resize {
            width: 400.0,
            height: 300.0,
        });
        assert_eq!(app.session().bounds().max_x(), 395.0);
        assert_eq!(
            kurbo::Shape::bounding_box(app.scene().commands()[0].path()),
            kurbo::Rect::new(0.0, 0.0, 400.0, 300.0)
        );
    }
}
